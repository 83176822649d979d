//! Property-based tests for window computations.
//!
//! These hold for any reference instant in any of the sampled timezones.

use chrono::{Datelike, NaiveDate, TimeDelta, TimeZone, Weekday};
use chrono_tz::Tz;
use mh_core::{next_working_day, work_week_bounds};
use proptest::prelude::*;

fn arb_timezone() -> impl Strategy<Value = Tz> {
    prop_oneof![
        Just(Tz::UTC),
        Just(chrono_tz::Europe::Copenhagen),
        Just(chrono_tz::America::New_York),
        Just(chrono_tz::America::Los_Angeles),
        Just(chrono_tz::Asia::Tokyo),
        Just(chrono_tz::Asia::Kolkata),
    ]
}

/// Naive reference instants across 2024-2027. Day is capped at 28.
fn arb_reference() -> impl Strategy<Value = chrono::NaiveDateTime> {
    (2024i32..=2027, 1u32..=12, 1u32..=28, 0u32..=23, 0u32..=59).prop_map(|(y, m, d, h, min)| {
        NaiveDate::from_ymd_opt(y, m, d)
            .unwrap()
            .and_hms_opt(h, min, 0)
            .unwrap()
    })
}

proptest! {
    #[test]
    fn work_week_spans_monday_to_friday(reference in arb_reference(), tz in arb_timezone()) {
        let bounds = work_week_bounds(reference, tz);
        prop_assert_eq!(bounds.start.weekday(), Weekday::Mon);
        prop_assert_eq!(bounds.end.weekday(), Weekday::Fri);

        // Compare wall-clock times so DST shifts inside the week do not matter.
        let span = bounds.end.naive_local() - bounds.start.naive_local();
        let expected = TimeDelta::days(5) - TimeDelta::microseconds(1);
        prop_assert_eq!(span, expected);
    }

    #[test]
    fn work_week_never_looks_backwards_from_weekend(reference in arb_reference(), tz in arb_timezone()) {
        let bounds = work_week_bounds(reference, tz);
        let date = reference.date();
        match date.weekday() {
            Weekday::Sat | Weekday::Sun => prop_assert!(bounds.start.date_naive() > date),
            _ => {
                prop_assert!(bounds.start.date_naive() <= date);
                prop_assert!(bounds.end.date_naive() >= date);
            }
        }
    }

    #[test]
    fn next_working_day_is_a_weekday(reference in arb_reference(), tz in arb_timezone()) {
        let next = next_working_day(reference, tz);
        prop_assert!(!matches!(next.weekday(), Weekday::Sat | Weekday::Sun));

        let gap = (next.date_naive() - reference.date()).num_days();
        let expected = match reference.date().weekday() {
            Weekday::Fri => 3,
            Weekday::Sat => 2,
            _ => 1,
        };
        prop_assert_eq!(gap, expected);
    }

    #[test]
    fn next_working_day_is_idempotent_per_day(reference in arb_reference(), tz in arb_timezone()) {
        let zoned = tz.from_local_datetime(&reference).earliest();
        prop_assume!(zoned.is_some());
        let midnight = reference.date().and_hms_opt(0, 0, 0).unwrap();
        prop_assert_eq!(next_working_day(reference, tz), next_working_day(midnight, tz));
    }
}
