//! Core engine for meeting-load summaries.
//!
//! This crate contains the pure logic for:
//! - Windows: work-week bounds and next working day in a given timezone
//! - Filtering: deciding per event whether it counts as meeting load
//! - Aggregation: hour totals per window and per working day
//! - Rescheduling: finding upcoming meetings that start on the full hour
//!
//! Apart from the ignore store and the list/template loaders, nothing here
//! touches the filesystem or reads the clock; callers pass `now` explicitly.

pub mod aggregate;
pub mod event;
pub mod filter;
pub mod ignore_store;
pub mod ingest;
pub mod list_file;
pub mod reschedule;
pub mod template;
pub mod types;
pub mod window;

pub use aggregate::{DaySummary, LoadLevel, Summary, daily_summaries, round_hours, summarize};
pub use event::{Event, Organizer};
pub use filter::{Classification, ExclusionReason, ExclusionRules, classify};
pub use ignore_store::{IgnoreEntry, IgnoreStore, StoreError};
pub use ingest::{IngestError, RawEvent, parse_feed};
pub use reschedule::{CandidateScan, RejectionReason, RejectionTally, find_full_hour_candidates};
pub use template::{Draft, DraftError, render, reschedule_draft};
pub use types::{ResponseStatus, Sensitivity, ShowAs, ValidationError, parse_timezone};
pub use window::{
    IntoZoned, Window, attach_timezone, day_window, next_working_day, start_of_day,
    work_week_bounds,
};
