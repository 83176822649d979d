//! Detection of meetings that start exactly on the hour.
//!
//! Such meetings are candidates for a request to shift the start by a few
//! minutes. Events the user already dismissed are suppressed by identity.

use std::collections::{BTreeMap, HashSet};
use std::fmt;

use chrono::{DateTime, Timelike};
use chrono_tz::Tz;
use serde::Serialize;

use crate::event::Event;
use crate::filter::{Classification, ExclusionReason, ExclusionRules, classify};
use crate::window::Window;

/// Why an in-window event did not become a candidate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum RejectionReason {
    Excluded(ExclusionReason),
    AlreadyStarted,
    NotFullHour,
    PreviouslyIgnored,
}

impl RejectionReason {
    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Excluded(reason) => reason.label(),
            Self::AlreadyStarted => "already started",
            Self::NotFullHour => "not full hour",
            Self::PreviouslyIgnored => "previously ignored",
        }
    }
}

impl fmt::Display for RejectionReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl Serialize for RejectionReason {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(self.label())
    }
}

/// Per-reason counts of rejected events.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct RejectionTally(BTreeMap<RejectionReason, usize>);

impl RejectionTally {
    pub fn record(&mut self, reason: RejectionReason) {
        *self.0.entry(reason).or_insert(0) += 1;
    }

    pub fn count(&self, reason: RejectionReason) -> usize {
        self.0.get(&reason).copied().unwrap_or(0)
    }

    pub fn total(&self) -> usize {
        self.0.values().sum()
    }

    pub fn iter(&self) -> impl Iterator<Item = (RejectionReason, usize)> + '_ {
        self.0.iter().map(|(reason, count)| (*reason, *count))
    }
}

impl fmt::Display for RejectionTally {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.is_empty() {
            return f.write_str("none");
        }
        let parts: Vec<String> = self
            .iter()
            .map(|(reason, count)| format!("{count} ({reason})"))
            .collect();
        f.write_str(&parts.join(", "))
    }
}

/// Result of a full-hour scan.
#[derive(Debug, Clone, Default)]
pub struct CandidateScan<'a> {
    /// Accepted events, earliest first, at most `max_count`.
    pub candidates: Vec<&'a Event>,
    pub rejections: RejectionTally,
}

fn starts_on_full_hour(start: &DateTime<Tz>) -> bool {
    start.minute() == 0 && start.second() == 0
}

/// Finds upcoming meetings that start exactly on the hour.
///
/// Events whose start lies in `window` are checked in this order: exclusion
/// rules and attributes, already started relative to `now`, full-hour start,
/// and membership in `ignored`. Accepted events are stably sorted by start
/// before truncation to `max_count`, so ties keep their input order.
pub fn find_full_hour_candidates<'a>(
    events: &'a [Event],
    window: &Window,
    rules: &ExclusionRules,
    ignored: &HashSet<String>,
    now: &DateTime<Tz>,
    max_count: usize,
) -> CandidateScan<'a> {
    let mut scan = CandidateScan::default();

    for event in events.iter().filter(|e| window.contains(&e.start)) {
        let rejection = if let Classification::Excluded(reason) = classify(event, rules) {
            Some(RejectionReason::Excluded(reason))
        } else if event.start < *now {
            Some(RejectionReason::AlreadyStarted)
        } else if !starts_on_full_hour(&event.start) {
            Some(RejectionReason::NotFullHour)
        } else if !event.identity().is_empty() && ignored.contains(event.identity()) {
            tracing::info!(subject = %event.subject, start = %event.start, "skipped previously ignored meeting");
            Some(RejectionReason::PreviouslyIgnored)
        } else {
            None
        };

        match rejection {
            Some(reason) => scan.rejections.record(reason),
            None => {
                tracing::info!(
                    subject = %event.subject,
                    start = %event.start,
                    organizer = %event.organizer.name,
                    "found full-hour meeting"
                );
                scan.candidates.push(event);
            }
        }
    }

    scan.candidates.sort_by_key(|e| e.start);
    scan.candidates.truncate(max_count);

    tracing::info!(
        found = scan.candidates.len(),
        skipped = %scan.rejections,
        "full-hour meeting scan complete"
    );
    scan
}
