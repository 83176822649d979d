//! Per-event inclusion decisions.
//!
//! An event is checked against the exclusion patterns first, then against its
//! own attributes. The order is fixed and the first matching reason wins.

use std::fmt;
use std::path::Path;

use regex::{Regex, RegexBuilder};
use serde::Serialize;

use crate::event::Event;
use crate::list_file::read_list;
use crate::types::{ResponseStatus, Sensitivity, ShowAs};

/// Why an event is left out of summaries and scans.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ExclusionReason {
    IgnoredByPattern,
    AllDay,
    Cancelled,
    Declined,
    Private,
    OutOfOffice,
}

impl ExclusionReason {
    /// Short label used in logs and reports.
    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::IgnoredByPattern => "ignored pattern",
            Self::AllDay => "all-day",
            Self::Cancelled => "cancelled",
            Self::Declined => "declined",
            Self::Private => "private",
            Self::OutOfOffice => "out of office",
        }
    }
}

impl fmt::Display for ExclusionReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Outcome of [`classify`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Classification {
    Included,
    Excluded(ExclusionReason),
}

#[derive(Debug, Clone)]
struct Rule {
    pattern: String,
    regex: Option<Regex>,
}

/// Case-insensitive subject patterns, compiled once.
///
/// Patterns that fail to compile are kept for diagnostics but never match.
#[derive(Debug, Clone, Default)]
pub struct ExclusionRules {
    rules: Vec<Rule>,
}

impl ExclusionRules {
    pub fn new<I, S>(patterns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let rules = patterns
            .into_iter()
            .map(|pattern| {
                let pattern = pattern.into();
                let regex = match RegexBuilder::new(&pattern).case_insensitive(true).build() {
                    Ok(regex) => Some(regex),
                    Err(e) => {
                        tracing::warn!(pattern = %pattern, error = %e, "skipping invalid exclusion pattern");
                        None
                    }
                };
                Rule { pattern, regex }
            })
            .collect();
        Self { rules }
    }

    /// Loads patterns from a list file; a missing file yields no rules.
    pub fn load(path: &Path) -> Self {
        Self::new(read_list(path))
    }

    /// The first pattern (in list order) that matches `subject`.
    pub fn first_match(&self, subject: &str) -> Option<&str> {
        self.rules
            .iter()
            .find(|rule| rule.regex.as_ref().is_some_and(|re| re.is_match(subject)))
            .map(|rule| rule.pattern.as_str())
    }

    pub fn matches(&self, subject: &str) -> bool {
        self.first_match(subject).is_some()
    }

    /// All patterns, valid or not, in list order.
    pub fn patterns(&self) -> impl Iterator<Item = &str> {
        self.rules.iter().map(|rule| rule.pattern.as_str())
    }

    pub fn invalid_patterns(&self) -> impl Iterator<Item = &str> {
        self.rules
            .iter()
            .filter(|rule| rule.regex.is_none())
            .map(|rule| rule.pattern.as_str())
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}

/// Decides whether an event counts towards meeting load.
pub fn classify(event: &Event, rules: &ExclusionRules) -> Classification {
    let reason = if rules.matches(&event.subject) {
        ExclusionReason::IgnoredByPattern
    } else if event.is_all_day {
        ExclusionReason::AllDay
    } else if event.is_cancelled {
        ExclusionReason::Cancelled
    } else if event.response_status == ResponseStatus::Declined {
        ExclusionReason::Declined
    } else if event.sensitivity == Sensitivity::Private {
        ExclusionReason::Private
    } else if event.show_as == ShowAs::OutOfOffice {
        ExclusionReason::OutOfOffice
    } else {
        return Classification::Included;
    };
    Classification::Excluded(reason)
}
