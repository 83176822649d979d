//! Calendar-aware window boundaries.
//!
//! All functions here are pure: the reference instant is always supplied by
//! the caller and no clock is read.

use chrono::{DateTime, Datelike, NaiveDate, NaiveDateTime, NaiveTime, TimeDelta, TimeZone, Utc, Weekday};
use chrono_tz::Tz;
use serde::Serialize;

/// A half-open interval `[start, end)` used for aggregation.
///
/// `start < end` is not enforced; a malformed window simply contains nothing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Window {
    pub start: DateTime<Tz>,
    pub end: DateTime<Tz>,
}

impl Window {
    pub const fn new(start: DateTime<Tz>, end: DateTime<Tz>) -> Self {
        Self { start, end }
    }

    /// Whether `instant` lies in `[start, end)`.
    pub fn contains(&self, instant: &DateTime<Tz>) -> bool {
        self.start <= *instant && *instant < self.end
    }
}

/// A reference instant that can be placed in the configured timezone.
pub trait IntoZoned {
    fn into_zoned(self, tz: Tz) -> DateTime<Tz>;
}

impl IntoZoned for NaiveDateTime {
    fn into_zoned(self, tz: Tz) -> DateTime<Tz> {
        attach_timezone(self, tz)
    }
}

impl IntoZoned for DateTime<Tz> {
    fn into_zoned(self, tz: Tz) -> DateTime<Tz> {
        self.with_timezone(&tz)
    }
}

impl IntoZoned for DateTime<Utc> {
    fn into_zoned(self, tz: Tz) -> DateTime<Tz> {
        self.with_timezone(&tz)
    }
}

/// Interprets a wall-clock time in `tz`.
///
/// Ambiguous times (DST fall-back) resolve to the earlier instant. Times in a
/// spring-forward gap are shifted one hour forward, which always exists.
pub fn attach_timezone(naive: NaiveDateTime, tz: Tz) -> DateTime<Tz> {
    tz.from_local_datetime(&naive)
        .earliest()
        .or_else(|| tz.from_local_datetime(&(naive + TimeDelta::hours(1))).earliest())
        .unwrap_or_else(|| tz.from_utc_datetime(&naive))
}

/// Local midnight of `date`.
pub fn start_of_day(date: NaiveDate, tz: Tz) -> DateTime<Tz> {
    attach_timezone(date.and_time(NaiveTime::MIN), tz)
}

/// Last representable microsecond (23:59:59.999999) of `date`.
fn end_of_day(date: NaiveDate, tz: Tz) -> DateTime<Tz> {
    let last = date.and_time(NaiveTime::MIN) + TimeDelta::days(1) - TimeDelta::microseconds(1);
    attach_timezone(last, tz)
}

/// `[00:00:00, 23:59:59.999999]` of a single local day.
pub fn day_window(date: NaiveDate, tz: Tz) -> Window {
    Window::new(start_of_day(date, tz), end_of_day(date, tz))
}

pub(crate) const fn is_weekend(day: Weekday) -> bool {
    matches!(day, Weekday::Sat | Weekday::Sun)
}

/// Monday 00:00 through Friday 23:59:59.999999 of the reference's work week.
///
/// Saturdays and Sundays roll forward to the upcoming week; any weekday maps
/// to the Monday of its own week.
pub fn work_week_bounds(reference: impl IntoZoned, tz: Tz) -> Window {
    let date = reference.into_zoned(tz).date_naive();
    let offset = match date.weekday() {
        Weekday::Sat => 2,
        Weekday::Sun => 1,
        weekday => -i64::from(weekday.num_days_from_monday()),
    };
    let monday = date + TimeDelta::days(offset);
    let friday = monday + TimeDelta::days(4);
    Window::new(start_of_day(monday, tz), end_of_day(friday, tz))
}

/// Local midnight of the next working day after the reference.
///
/// Friday, Saturday and Sunday all map to the following Monday.
pub fn next_working_day(reference: impl IntoZoned, tz: Tz) -> DateTime<Tz> {
    let next = reference.into_zoned(tz).date_naive() + TimeDelta::days(1);
    let next = match next.weekday() {
        Weekday::Sat => next + TimeDelta::days(2),
        Weekday::Sun => next + TimeDelta::days(1),
        _ => next,
    };
    start_of_day(next, tz)
}
