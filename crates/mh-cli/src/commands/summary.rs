//! Summary command: meeting hours per period and per working day.
//!
//! This module implements `mh summary` with human-readable and JSON output.

use std::io::Write;

use anyhow::Result;
use chrono::{DateTime, TimeDelta};
use chrono_tz::Tz;
use mh_core::{
    DaySummary, Event, ExclusionRules, LoadLevel, Summary, Window, daily_summaries,
    next_working_day, start_of_day, summarize, work_week_bounds,
};
use serde::Serialize;

use super::util::{load_events, resolve_now};
use crate::{Config, FeedArgs};

/// Hours that fill a load bar completely.
pub const FULL_DAY_HOURS: f64 = 8.0;

/// Hours and meetings for one named window.
#[derive(Debug, Serialize)]
pub struct PeriodSummary {
    pub label: &'static str,
    #[serde(flatten)]
    pub window: Window,
    #[serde(flatten)]
    pub summary: Summary,
}

#[derive(Debug, Serialize)]
pub struct DailyLoad {
    #[serde(flatten)]
    pub day: DaySummary,
    pub level: LoadLevel,
}

/// Computed summary report.
#[derive(Debug, Serialize)]
pub struct SummaryReport {
    pub generated_at: DateTime<Tz>,
    pub timezone: &'static str,
    pub periods: Vec<PeriodSummary>,
    pub days: Vec<DailyLoad>,
    pub pattern_count: usize,
}

// ========== Report Generation ==========

/// Builds the report for `now`, evaluated in `now`'s timezone.
pub fn build_report(
    events: &[Event],
    rules: &ExclusionRules,
    now: DateTime<Tz>,
    working_days: usize,
) -> SummaryReport {
    let tz = now.timezone();
    let today = start_of_day(now.date_naive(), tz);
    let next_day = next_working_day(now, tz);
    let day_after = next_working_day(next_day, tz);
    let this_week = work_week_bounds(now, tz);
    let next_week = work_week_bounds(this_week.start.naive_local() + TimeDelta::days(7), tz);

    let periods = [
        ("Today", Window::new(today, next_day)),
        ("Next working day", Window::new(next_day, day_after)),
        ("This week", this_week),
        ("Next week", next_week),
    ]
    .into_iter()
    .map(|(label, window)| PeriodSummary {
        label,
        summary: summarize(events, &window, rules),
        window,
    })
    .collect();

    let days = daily_summaries(events, now.date_naive(), working_days, rules, tz)
        .into_iter()
        .map(|day| DailyLoad {
            level: LoadLevel::for_hours(day.summary.total_hours),
            day,
        })
        .collect();

    SummaryReport {
        generated_at: now,
        timezone: tz.name(),
        periods,
        days,
        pattern_count: rules.len(),
    }
}

// ========== Formatting ==========

/// Generates a 10-character load bar scaled to [`FULL_DAY_HOURS`].
/// Days under 5% of a full day but above zero get a single block.
#[expect(
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    reason = "ratio is clamped to 0..=1 before scaling"
)]
pub fn load_bar(hours: f64) -> String {
    let ratio = (hours / FULL_DAY_HOURS).clamp(0.0, 1.0);
    let filled = if ratio < 0.05 && hours > 0.0 {
        1
    } else {
        (ratio * 10.0).round() as usize
    };

    let empty = 10 - filled;
    format!("{}{}", "█".repeat(filled), "░".repeat(empty))
}

fn meetings(count: usize) -> String {
    if count == 1 {
        "1 meeting".to_string()
    } else {
        format!("{count} meetings")
    }
}

fn write_heading<W: Write>(writer: &mut W, title: &str) -> std::io::Result<()> {
    writeln!(writer)?;
    writeln!(writer, "{title}")?;
    writeln!(writer, "{}", "─".repeat(title.chars().count()))
}

/// Writes the human-readable report.
pub fn write_report<W: Write>(writer: &mut W, report: &SummaryReport) -> Result<()> {
    writeln!(
        writer,
        "MEETING HOURS: {} ({})",
        report.generated_at.format("%A, %b %-d, %Y %H:%M"),
        report.timezone
    )?;

    write_heading(writer, "PERIODS")?;
    for period in &report.periods {
        writeln!(
            writer,
            "{:<18}{:>5.2} h  ({})",
            period.label,
            period.summary.total_hours,
            meetings(period.summary.count)
        )?;
    }

    write_heading(writer, &format!("NEXT {} WORKING DAYS", report.days.len()))?;
    for entry in &report.days {
        let hours = entry.day.summary.total_hours;
        writeln!(
            writer,
            "{}  {hours:>5.2} h  {}  {}",
            entry.day.date.format("%a %b %d"),
            load_bar(hours),
            entry.level.as_str()
        )?;
    }

    writeln!(writer)?;
    let plural = if report.pattern_count == 1 { "" } else { "s" };
    writeln!(
        writer,
        "{} exclusion pattern{plural} applied",
        report.pattern_count
    )?;
    Ok(())
}

// ========== Public Interface ==========

/// Runs the summary command.
pub fn run<W: Write>(writer: &mut W, config: &Config, feed: &FeedArgs, json: bool) -> Result<()> {
    let tz = config.tz()?;
    let now = resolve_now(feed.now.as_deref(), tz)?;
    let events = load_events(&feed.events, tz)?;
    let rules = config.exclusion_rules();
    tracing::info!(events = events.len(), patterns = rules.len(), %now, "building summary");

    let report = build_report(&events, &rules, now, config.working_days);
    if json {
        writeln!(writer, "{}", serde_json::to_string_pretty(&report)?)?;
    } else {
        write_report(writer, &report)?;
    }
    Ok(())
}
