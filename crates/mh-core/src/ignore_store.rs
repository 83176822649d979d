//! Persistent list of event identities the user never wants to be asked about.
//!
//! The backing file is line oriented. Each append writes a human-readable
//! comment line followed by the bare identity:
//!
//! ```text
//! # Added: 2025-01-15 10:42:07 | Subject: Weekly sync | Start: 2025-01-20 09:00
//! 040000008200E00074C5B7101A82E008...
//! ```
//!
//! Appends never deduplicate; `load` collapses duplicates into a set.

use std::collections::HashSet;
use std::fs::OpenOptions;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use chrono::DateTime;
use chrono_tz::Tz;
use fs2::FileExt;
use thiserror::Error;

use crate::event::Event;
use crate::list_file::{IGNORE_LIST_FILE, read_list};

const HEADER: &str = "\
# Ignored Full-Hour Appointments
# This file contains appointment identifiers that should not trigger the reschedule prompt.
# Each line contains a calendar event identifier (global id, or provider id as fallback).
# Lines starting with # are comments and will be ignored.
# You can manually edit this file to add or remove entries.
#
";

/// Errors from writing the ignore list.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("failed to open ignore list {path}")]
    Open {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to lock ignore list {path}")]
    Lock {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to write ignore list {path}")]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// One record to append to the ignore list.
#[derive(Debug, Clone, PartialEq)]
pub struct IgnoreEntry {
    /// The only field consulted when suppressing candidates.
    pub identity: String,
    /// Diagnostic only.
    pub subject: String,
    pub start: DateTime<Tz>,
    pub recorded_at: DateTime<Tz>,
}

impl IgnoreEntry {
    pub fn for_event(event: &Event, recorded_at: DateTime<Tz>) -> Self {
        Self {
            identity: event.identity().to_string(),
            subject: event.subject.clone(),
            start: event.start,
            recorded_at,
        }
    }

    fn comment_line(&self) -> String {
        let subject: String = self
            .subject
            .chars()
            .map(|c| if c == '\n' || c == '\r' { ' ' } else { c })
            .collect();
        format!(
            "# Added: {} | Subject: {} | Start: {}",
            self.recorded_at.format("%Y-%m-%d %H:%M:%S"),
            subject,
            self.start.format("%Y-%m-%d %H:%M"),
        )
    }
}

/// File-backed ignore list.
///
/// Not safe for concurrent writers across processes beyond the advisory lock
/// held during a single append.
#[derive(Debug, Clone)]
pub struct IgnoreStore {
    path: PathBuf,
}

impl IgnoreStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Store at the conventional file name inside `dir`.
    pub fn in_dir(dir: &Path) -> Self {
        Self::new(dir.join(IGNORE_LIST_FILE))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// All recorded identities; a missing or unreadable file is empty.
    pub fn load(&self) -> HashSet<String> {
        read_list(&self.path).into_iter().collect()
    }

    /// Appends one entry.
    ///
    /// Returns `Ok(false)` without touching the file when the identity could
    /// not be read back by [`load`](Self::load): empty, starting with `#`, or
    /// spanning several lines.
    pub fn append(&self, entry: &IgnoreEntry) -> Result<bool, StoreError> {
        let identity = entry.identity.trim();
        if identity.is_empty() {
            tracing::warn!(subject = %entry.subject, "event has no stable identifier, not added to ignore list");
            return Ok(false);
        }
        if identity.starts_with('#') || identity.contains(['\n', '\r']) {
            tracing::warn!(subject = %entry.subject, identity, "identifier cannot be stored in the ignore list");
            return Ok(false);
        }

        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).map_err(|source| StoreError::Open {
                path: self.path.clone(),
                source,
            })?;
        }

        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .map_err(|source| StoreError::Open {
                path: self.path.clone(),
                source,
            })?;
        file.lock_exclusive().map_err(|source| StoreError::Lock {
            path: self.path.clone(),
            source,
        })?;

        let write_err = |source| StoreError::Write {
            path: self.path.clone(),
            source,
        };
        let is_new = file.metadata().map_err(write_err)?.len() == 0;

        let mut record = String::new();
        if is_new {
            record.push_str(HEADER);
        }
        record.push_str(&entry.comment_line());
        record.push('\n');
        record.push_str(identity);
        record.push('\n');
        file.write_all(record.as_bytes()).map_err(write_err)?;

        // The lock is released when the file is closed.
        tracing::info!(subject = %entry.subject, identity, "added to ignore list");
        Ok(true)
    }
}
