//! Shared utilities for CLI commands.

use std::path::Path;

use anyhow::{Context, Result, bail};
use chrono::{DateTime, NaiveDateTime, TimeDelta, Utc};
use chrono_tz::Tz;
use mh_core::{Event, attach_timezone, parse_feed};

/// Local formats accepted by `--now`, tried in order.
const NAIVE_FORMATS: [&str; 3] = ["%Y-%m-%dT%H:%M:%S", "%Y-%m-%dT%H:%M", "%Y-%m-%d %H:%M"];

/// Conservative bound for `lookahead_days` (about ten years).
const MAX_LOOKAHEAD_DAYS: i64 = 3660;

/// Conservative bound for `shift_minutes` in either direction (one day).
const MAX_SHIFT_MINUTES: i64 = 24 * 60;

/// Validates the configured scan horizon.
pub fn lookahead_span(days: i64) -> Result<TimeDelta> {
    if !(0..=MAX_LOOKAHEAD_DAYS).contains(&days) {
        bail!("lookahead_days must be between 0 and {MAX_LOOKAHEAD_DAYS}, got {days}");
    }
    TimeDelta::try_days(days).with_context(|| format!("lookahead_days out of range: {days}"))
}

/// Validates the configured start-time shift.
pub fn shift_span(minutes: i64) -> Result<TimeDelta> {
    if !(-MAX_SHIFT_MINUTES..=MAX_SHIFT_MINUTES).contains(&minutes) {
        bail!("shift_minutes must be between -{MAX_SHIFT_MINUTES} and {MAX_SHIFT_MINUTES}, got {minutes}");
    }
    TimeDelta::try_minutes(minutes).with_context(|| format!("shift_minutes out of range: {minutes}"))
}

/// Reads and parses a calendar feed file into events in `tz`.
pub fn load_events(path: &Path, tz: Tz) -> Result<Vec<Event>> {
    let json = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read {}", path.display()))?;
    let events =
        parse_feed(&json, tz).with_context(|| format!("failed to parse {}", path.display()))?;
    Ok(events)
}

/// Resolves the `--now` argument, defaulting to the system clock.
///
/// Supports:
/// - RFC 3339: "2025-01-15T14:30:00+01:00", converted into `tz`
/// - Local wall-clock time in `tz`: "2025-01-15T14:30", "2025-01-15T14:30:00"
pub fn resolve_now(value: Option<&str>, tz: Tz) -> Result<DateTime<Tz>> {
    let Some(s) = value else {
        return Ok(Utc::now().with_timezone(&tz));
    };

    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Ok(dt.with_timezone(&tz));
    }

    for format in NAIVE_FORMATS {
        if let Ok(naive) = NaiveDateTime::parse_from_str(s, format) {
            return Ok(attach_timezone(naive, tz));
        }
    }

    bail!("Invalid time: {s}. Use RFC 3339 (e.g., 2025-01-15T14:30:00Z) or local (e.g., 2025-01-15T14:30)")
}

/// Finds the event with the given identity.
pub fn find_event<'a>(events: &'a [Event], identity: &str) -> Result<&'a Event> {
    let identity = identity.trim();
    if identity.is_empty() {
        bail!("identity cannot be empty");
    }
    events
        .iter()
        .find(|e| e.identity() == identity)
        .with_context(|| format!("no event with identity {identity}"))
}
