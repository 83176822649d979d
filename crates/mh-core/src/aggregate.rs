//! Meeting-hour totals per window and per working day.
//!
//! Window membership is decided on `start` alone: an event that starts inside
//! the window counts in full even if it runs past the end, and an event that
//! started earlier never counts. Overlapping events are not merged.

use chrono::{Datelike, NaiveDate, TimeDelta, Weekday};
use chrono_tz::Tz;
use serde::Serialize;

use crate::event::Event;
use crate::filter::{Classification, ExclusionRules, classify};
use crate::window::{Window, day_window, is_weekend};

const MS_PER_CENTIHOUR: i64 = 36_000;

/// Total meeting hours and meeting count for one window.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct Summary {
    /// Rounded to two decimals; negative if upstream durations are inverted.
    pub total_hours: f64,
    pub count: usize,
}

/// Rounds a duration to hundredths of an hour, half away from zero.
///
/// Works on whole milliseconds so the result does not depend on float
/// rounding of intermediate sums.
#[expect(clippy::cast_precision_loss, reason = "centihour totals are far below 2^52")]
pub fn round_hours(total: TimeDelta) -> f64 {
    let ms = total.num_milliseconds();
    let whole = ms / MS_PER_CENTIHOUR;
    let rest = ms % MS_PER_CENTIHOUR;
    let centihours = if rest.abs() * 2 >= MS_PER_CENTIHOUR {
        whole + rest.signum()
    } else {
        whole
    };
    centihours as f64 / 100.0
}

/// Sums the durations of included events whose start lies in `window`.
pub fn summarize(events: &[Event], window: &Window, rules: &ExclusionRules) -> Summary {
    let mut total = TimeDelta::zero();
    let mut count = 0;
    let mut excluded = 0;

    for event in events.iter().filter(|e| window.contains(&e.start)) {
        match classify(event, rules) {
            Classification::Included => {
                total += event.duration();
                count += 1;
                tracing::debug!(subject = %event.subject, start = %event.start, "included");
            }
            Classification::Excluded(reason) => {
                excluded += 1;
                tracing::debug!(subject = %event.subject, start = %event.start, %reason, "excluded");
            }
        }
    }

    let summary = Summary {
        total_hours: round_hours(total),
        count,
    };
    tracing::debug!(
        window_start = %window.start,
        window_end = %window.end,
        hours = summary.total_hours,
        count,
        excluded,
        "summarized window"
    );
    summary
}

/// Summary for a single working day.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DaySummary {
    pub date: NaiveDate,
    pub weekday: Weekday,
    #[serde(flatten)]
    pub summary: Summary,
}

/// One summary per working day, starting at `start_date`.
///
/// Saturdays and Sundays are skipped without consuming a slot, so exactly
/// `working_days` entries are produced.
pub fn daily_summaries(
    events: &[Event],
    start_date: NaiveDate,
    working_days: usize,
    rules: &ExclusionRules,
    tz: Tz,
) -> Vec<DaySummary> {
    let mut days = Vec::with_capacity(working_days);
    let mut date = start_date;

    while days.len() < working_days {
        if !is_weekend(date.weekday()) {
            days.push(DaySummary {
                date,
                weekday: date.weekday(),
                summary: summarize(events, &day_window(date, tz), rules),
            });
        }
        let Some(next) = date.succ_opt() else {
            break;
        };
        date = next;
    }

    days
}

/// Coarse daily load bands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum LoadLevel {
    /// Up to 3 hours.
    Light,
    /// Up to 4 hours.
    Moderate,
    Heavy,
}

impl LoadLevel {
    pub fn for_hours(hours: f64) -> Self {
        if hours <= 3.0 {
            Self::Light
        } else if hours <= 4.0 {
            Self::Moderate
        } else {
            Self::Heavy
        }
    }

    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Light => "light",
            Self::Moderate => "moderate",
            Self::Heavy => "heavy",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::window::work_week_bounds;
    use chrono::{DateTime, TimeZone};
    use chrono_tz::Europe::Copenhagen;

    fn at(d: u32, h: u32, min: u32) -> DateTime<Tz> {
        // January 2025: the 13th is a Monday.
        Copenhagen.with_ymd_and_hms(2025, 1, d, h, min, 0).unwrap()
    }

    fn meeting(subject: &str, d: u32, h: u32, min: u32, minutes: i64) -> Event {
        let start = at(d, h, min);
        Event::new(subject, start, start + TimeDelta::minutes(minutes))
    }

    fn week() -> Window {
        Window::new(at(13, 0, 0), at(18, 0, 0))
    }

    #[test]
    fn reference_week_scenario() {
        let mut offsite = meeting("Offsite", 15, 0, 0, 24 * 60);
        offsite.is_all_day = true;
        let events = vec![
            meeting("Standup", 13, 9, 0, 30),
            meeting("Planning", 13, 10, 0, 60),
            meeting("Review", 14, 9, 0, 60),
            offsite,
            meeting("Workshop", 16, 9, 0, 120),
            meeting("Retro", 17, 9, 0, 90),
            meeting("Lunch with team", 17, 12, 0, 60),
        ];
        let rules = ExclusionRules::new(["^Lunch.*"]);

        let summary = summarize(&events, &week(), &rules);

        assert_eq!(summary.count, 5);
        assert_eq!(summary.total_hours, 6.0);
    }

    #[test]
    fn empty_input_is_zero() {
        let summary = summarize(&[], &week(), &ExclusionRules::default());
        assert_eq!(summary, Summary { total_hours: 0.0, count: 0 });
    }

    #[test]
    fn overlapping_events_are_double_counted() {
        let events = vec![meeting("A", 13, 9, 0, 120), meeting("B", 13, 10, 0, 60)];
        let summary = summarize(&events, &week(), &ExclusionRules::default());
        assert_eq!(summary.count, 2);
        assert_eq!(summary.total_hours, 3.0);
    }

    #[test]
    fn membership_is_decided_on_start_only() {
        let events = vec![
            // Starts before the window, ends inside: excluded.
            meeting("Early", 12, 23, 0, 120),
            // Starts inside, runs past the end: counted in full.
            meeting("Late", 17, 23, 0, 180),
        ];
        let summary = summarize(&events, &week(), &ExclusionRules::default());
        assert_eq!(summary.count, 1);
        assert_eq!(summary.total_hours, 3.0);
    }

    #[test]
    fn window_end_is_exclusive() {
        let events = vec![meeting("Boundary", 18, 0, 0, 60)];
        let summary = summarize(&events, &week(), &ExclusionRules::default());
        assert_eq!(summary.count, 0);
    }

    #[test]
    fn excluded_events_contribute_nothing() {
        let mut declined = meeting("Declined sync", 14, 11, 0, 60);
        declined.response_status = crate::types::ResponseStatus::Declined;
        let events = vec![meeting("Kept", 14, 9, 0, 45), declined];
        let summary = summarize(&events, &week(), &ExclusionRules::default());
        assert_eq!(summary.count, 1);
        assert_eq!(summary.total_hours, 0.75);
    }

    #[test]
    fn negative_durations_are_not_clamped() {
        let events = vec![meeting("Broken", 14, 9, 0, -30), meeting("Fine", 14, 10, 0, 60)];
        let summary = summarize(&events, &week(), &ExclusionRules::default());
        assert_eq!(summary.count, 2);
        assert_eq!(summary.total_hours, 0.5);
    }

    #[test]
    fn malformed_window_is_empty() {
        let events = vec![meeting("A", 14, 9, 0, 60)];
        let inverted = Window::new(at(18, 0, 0), at(13, 0, 0));
        let summary = summarize(&events, &inverted, &ExclusionRules::default());
        assert_eq!(summary, Summary::default());
    }

    #[test]
    fn overlapping_windows_count_independently() {
        let events = vec![meeting("A", 14, 9, 0, 60)];
        let rules = ExclusionRules::default();
        let first = summarize(&events, &week(), &rules);
        let second = summarize(&events, &work_week_bounds(at(14, 12, 0), Copenhagen), &rules);
        assert_eq!(first.count + second.count, 2);
    }

    #[test]
    fn rounding_is_half_away_from_zero() {
        // 18 seconds is exactly 0.005 hours.
        assert_eq!(round_hours(TimeDelta::seconds(18)), 0.01);
        assert_eq!(round_hours(TimeDelta::milliseconds(17_999)), 0.0);
        assert_eq!(round_hours(TimeDelta::seconds(-18)), -0.01);
        assert_eq!(round_hours(TimeDelta::minutes(20)), 0.33);
        assert_eq!(round_hours(TimeDelta::minutes(40)), 0.67);
    }

    #[test]
    fn total_is_rounded_once_not_per_event() {
        // Three 20-minute meetings are exactly one hour; per-event rounding
        // would give 0.99.
        let events = vec![
            meeting("A", 14, 9, 0, 20),
            meeting("B", 14, 10, 0, 20),
            meeting("C", 14, 11, 0, 20),
        ];
        let summary = summarize(&events, &week(), &ExclusionRules::default());
        assert_eq!(summary.total_hours, 1.0);
    }

    #[test]
    fn daily_summaries_skip_weekends() {
        let events = vec![
            meeting("Fri", 17, 9, 0, 60),
            meeting("Sat", 18, 9, 0, 60),
            meeting("Mon", 20, 9, 0, 30),
        ];
        let start = NaiveDate::from_ymd_opt(2025, 1, 16).unwrap();

        let days = daily_summaries(&events, start, 3, &ExclusionRules::default(), Copenhagen);

        let dates: Vec<_> = days.iter().map(|d| (d.date.day(), d.weekday)).collect();
        assert_eq!(dates, vec![(16, Weekday::Thu), (17, Weekday::Fri), (20, Weekday::Mon)]);
        assert_eq!(days[0].summary.count, 0);
        assert_eq!(days[1].summary.total_hours, 1.0);
        assert_eq!(days[2].summary.total_hours, 0.5);
    }

    #[test]
    fn daily_summaries_starting_on_weekend() {
        let start = NaiveDate::from_ymd_opt(2025, 1, 18).unwrap();
        let days = daily_summaries(&[], start, 5, &ExclusionRules::default(), Copenhagen);
        assert_eq!(days.len(), 5);
        assert_eq!(days[0].weekday, Weekday::Mon);
        assert_eq!(days[4].weekday, Weekday::Fri);
    }

    #[test]
    fn zero_working_days_is_empty() {
        let start = NaiveDate::from_ymd_opt(2025, 1, 18).unwrap();
        assert!(daily_summaries(&[], start, 0, &ExclusionRules::default(), Copenhagen).is_empty());
    }

    #[test]
    fn load_levels() {
        assert_eq!(LoadLevel::for_hours(0.0), LoadLevel::Light);
        assert_eq!(LoadLevel::for_hours(3.0), LoadLevel::Light);
        assert_eq!(LoadLevel::for_hours(3.5), LoadLevel::Moderate);
        assert_eq!(LoadLevel::for_hours(4.0), LoadLevel::Moderate);
        assert_eq!(LoadLevel::for_hours(4.25), LoadLevel::Heavy);
    }
}
