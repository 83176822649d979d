//! Calendar events as seen by the engine.

use chrono::{DateTime, TimeDelta};
use chrono_tz::Tz;
use serde::Serialize;

use crate::types::{ResponseStatus, Sensitivity, ShowAs};

/// Who organised a meeting.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Organizer {
    pub name: String,
    pub email: String,
}

/// A single calendar event, already converted into the configured timezone.
///
/// Events are read-only values owned by whoever fetched them. `end >= start`
/// is not guaranteed by upstream data and is not enforced here.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Event {
    /// Provider-global identifier (stable across updates).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub global_id: Option<String>,
    /// Provider-local identifier, used when no global id is present.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub local_id: Option<String>,
    pub subject: String,
    pub start: DateTime<Tz>,
    pub end: DateTime<Tz>,
    pub is_all_day: bool,
    pub is_cancelled: bool,
    pub response_status: ResponseStatus,
    pub sensitivity: Sensitivity,
    pub show_as: ShowAs,
    pub organizer: Organizer,
}

impl Event {
    /// Creates an accepted, normal, busy event with no identifiers.
    pub fn new(subject: impl Into<String>, start: DateTime<Tz>, end: DateTime<Tz>) -> Self {
        Self {
            global_id: None,
            local_id: None,
            subject: subject.into(),
            start,
            end,
            is_all_day: false,
            is_cancelled: false,
            response_status: ResponseStatus::Accepted,
            sensitivity: Sensitivity::Normal,
            show_as: ShowAs::Busy,
            organizer: Organizer::default(),
        }
    }

    /// The identifier used to recognise this event across fetches.
    ///
    /// Prefers the global id, falls back to the local id, and is empty when
    /// neither is present. Events with an empty identity cannot be ignored.
    pub fn identity(&self) -> &str {
        [&self.global_id, &self.local_id]
            .into_iter()
            .flatten()
            .map(String::as_str)
            .find(|id| !id.is_empty())
            .unwrap_or("")
    }

    /// Signed duration; negative when upstream data has `end < start`.
    pub fn duration(&self) -> TimeDelta {
        self.end - self.start
    }
}
