//! Candidates command: upcoming meetings that start on the full hour.

use std::io::Write;

use anyhow::{Context, Result};
use chrono::DateTime;
use chrono_tz::Tz;
use mh_core::{CandidateScan, Event, RejectionTally, Window, find_full_hour_candidates, start_of_day};
use serde::Serialize;

use super::util::{load_events, lookahead_span, resolve_now};
use crate::{Config, FeedArgs};

/// The scan window: from `now` until local midnight `lookahead_days` later.
pub fn lookahead_window(now: DateTime<Tz>, lookahead_days: i64) -> Result<Window> {
    let end_date = now
        .date_naive()
        .checked_add_signed(lookahead_span(lookahead_days)?)
        .with_context(|| format!("lookahead of {lookahead_days} days is past the supported date range"))?;
    Ok(Window::new(now, start_of_day(end_date, now.timezone())))
}

#[derive(Debug, Serialize)]
struct JsonCandidates<'a> {
    window: Window,
    candidates: &'a [&'a Event],
    rejections: &'a RejectionTally,
}

fn write_candidates<W: Write>(writer: &mut W, window: &Window, scan: &CandidateScan<'_>) -> Result<()> {
    let found = scan.candidates.len();
    writeln!(
        writer,
        "FULL-HOUR MEETINGS: {found} found before {}",
        window.end.format("%a %b %d")
    )?;
    writeln!(writer)?;

    if scan.candidates.is_empty() {
        writeln!(writer, "No upcoming meetings start on the full hour.")?;
    }
    for event in &scan.candidates {
        let organizer = &event.organizer.name;
        if organizer.is_empty() {
            writeln!(writer, "{}  {}", event.start.format("%a %Y-%m-%d %H:%M"), event.subject)?;
        } else {
            writeln!(
                writer,
                "{}  {} ({organizer})",
                event.start.format("%a %Y-%m-%d %H:%M"),
                event.subject
            )?;
        }
        writeln!(writer, "  id: {}", event.identity())?;
    }

    writeln!(writer)?;
    writeln!(writer, "Skipped: {}", scan.rejections)?;
    if let Some(first) = scan.candidates.first() {
        writeln!(
            writer,
            "Tip: Run 'mh draft --events <file> {}' to request a later start",
            first.identity()
        )?;
    }
    Ok(())
}

/// Runs the candidates command.
pub fn run<W: Write>(writer: &mut W, config: &Config, feed: &FeedArgs, json: bool) -> Result<()> {
    let tz = config.tz()?;
    let now = resolve_now(feed.now.as_deref(), tz)?;
    let events = load_events(&feed.events, tz)?;
    let rules = config.exclusion_rules();
    let ignored = config.ignore_store().load();

    let window = lookahead_window(now, config.lookahead_days)?;
    let scan = find_full_hour_candidates(
        &events,
        &window,
        &rules,
        &ignored,
        &now,
        config.max_candidates,
    );

    if json {
        let report = JsonCandidates {
            window,
            candidates: &scan.candidates,
            rejections: &scan.rejections,
        };
        writeln!(writer, "{}", serde_json::to_string_pretty(&report)?)?;
    } else {
        write_candidates(writer, &window, &scan)?;
    }
    Ok(())
}
