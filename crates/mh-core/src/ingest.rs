//! Conversion of provider event records into [`Event`]s.
//!
//! The feed has the shape of a Microsoft Graph `calendarView` response. Every
//! field is optional on the wire; the conversion happens once here so the rest
//! of the engine works on fully typed values.

use chrono::{DateTime, NaiveDateTime};
use chrono_tz::Tz;
use serde::Deserialize;
use thiserror::Error;

use crate::event::{Event, Organizer};
use crate::types::{ResponseStatus, Sensitivity, ShowAs};
use crate::window::attach_timezone;

#[derive(Debug, Error)]
pub enum IngestError {
    #[error("invalid event feed")]
    Feed(#[from] serde_json::Error),

    #[error("event '{subject}' has no {field} time")]
    MissingTime { subject: String, field: &'static str },

    #[error("invalid provider datetime '{value}'")]
    InvalidDateTime {
        value: String,
        #[source]
        source: chrono::ParseError,
    },
}

/// A provider timestamp: local wall-clock time plus the zone it is expressed in.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawDateTime {
    pub date_time: String,
    #[serde(default)]
    pub time_zone: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawResponse {
    #[serde(default)]
    pub response: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawEmailAddress {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub address: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawOrganizer {
    #[serde(default)]
    pub email_address: Option<RawEmailAddress>,
}

/// One event as delivered by the provider.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RawEvent {
    #[serde(rename = "iCalUId")]
    pub ical_uid: Option<String>,
    pub id: Option<String>,
    pub subject: Option<String>,
    pub start: Option<RawDateTime>,
    pub end: Option<RawDateTime>,
    pub is_all_day: Option<bool>,
    pub is_cancelled: Option<bool>,
    pub response_status: Option<RawResponse>,
    pub sensitivity: Option<String>,
    pub show_as: Option<String>,
    pub organizer: Option<RawOrganizer>,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum Feed {
    Page { value: Vec<RawEvent> },
    List(Vec<RawEvent>),
}

/// Converts a provider timestamp into `tz`.
///
/// Fractional seconds are dropped. RFC 3339 strings with an explicit offset
/// are honoured as-is; otherwise the wall-clock time is read in the record's
/// zone, falling back to UTC when that zone name is unknown.
pub fn parse_provider_datetime(raw: &RawDateTime, tz: Tz) -> Result<DateTime<Tz>, IngestError> {
    if let Ok(aware) = DateTime::parse_from_rfc3339(&raw.date_time) {
        return Ok(aware.with_timezone(&tz));
    }

    let stamp = raw.date_time.split('.').next().unwrap_or_default();
    let naive = NaiveDateTime::parse_from_str(stamp, "%Y-%m-%dT%H:%M:%S").map_err(|source| {
        IngestError::InvalidDateTime {
            value: raw.date_time.clone(),
            source,
        }
    })?;

    let source_tz = match raw.time_zone.as_deref() {
        None | Some("UTC") => Tz::UTC,
        Some(name) => name.parse().unwrap_or_else(|_| {
            tracing::debug!(zone = name, "unknown source timezone, assuming UTC");
            Tz::UTC
        }),
    };
    Ok(attach_timezone(naive, source_tz).with_timezone(&tz))
}

impl RawEvent {
    /// Validates and converts this record into an [`Event`] in `tz`.
    pub fn into_event(self, tz: Tz) -> Result<Event, IngestError> {
        let subject = self.subject.unwrap_or_default();
        let start = self.start.ok_or_else(|| IngestError::MissingTime {
            subject: subject.clone(),
            field: "start",
        })?;
        let end = self.end.ok_or_else(|| IngestError::MissingTime {
            subject: subject.clone(),
            field: "end",
        })?;

        let email = self
            .organizer
            .and_then(|o| o.email_address)
            .unwrap_or_default();

        Ok(Event {
            global_id: self.ical_uid,
            local_id: self.id,
            start: parse_provider_datetime(&start, tz)?,
            end: parse_provider_datetime(&end, tz)?,
            subject,
            is_all_day: self.is_all_day.unwrap_or(false),
            is_cancelled: self.is_cancelled.unwrap_or(false),
            response_status: self
                .response_status
                .and_then(|r| r.response)
                .map_or(ResponseStatus::None, |r| ResponseStatus::from_provider(&r)),
            sensitivity: self
                .sensitivity
                .map_or(Sensitivity::Normal, |s| Sensitivity::from_provider(&s)),
            show_as: self
                .show_as
                .map_or(ShowAs::Busy, |s| ShowAs::from_provider(&s)),
            organizer: Organizer {
                name: email.name.unwrap_or_default(),
                email: email.address.unwrap_or_default(),
            },
        })
    }
}

/// Parses a JSON feed (bare array or `{"value": [...]}` page) into events.
///
/// Malformed JSON fails the whole feed. Individual records that cannot be
/// converted are logged and skipped.
pub fn parse_feed(json: &str, tz: Tz) -> Result<Vec<Event>, IngestError> {
    let raw = match serde_json::from_str::<Feed>(json)? {
        Feed::Page { value } | Feed::List(value) => value,
    };

    let total = raw.len();
    let events: Vec<Event> = raw
        .into_iter()
        .filter_map(|record| match record.into_event(tz) {
            Ok(event) => Some(event),
            Err(e) => {
                tracing::warn!(error = %e, "skipping invalid calendar event");
                None
            }
        })
        .collect();

    tracing::debug!(total, parsed = events.len(), "parsed event feed");
    Ok(events)
}
