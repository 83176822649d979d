//! Line-oriented list files shared by exclusion rules and the ignore store.

use std::fs;
use std::io::ErrorKind;
use std::path::Path;

/// File holding exclusion patterns, one regex per line.
pub const EXCLUSION_RULES_FILE: &str = "ignore_appointments.txt";

/// File holding identities the user asked never to be prompted about.
pub const IGNORE_LIST_FILE: &str = "ignored_full_hour_appointments.txt";

/// File holding the reschedule request template.
pub const TEMPLATE_FILE: &str = "meeting_change_request_template.txt";

/// Parses list entries: trimmed lines that are neither empty nor `#` comments.
pub fn parse_list(content: &str) -> Vec<String> {
    content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .map(ToString::to_string)
        .collect()
}

/// Reads a list file.
///
/// A missing file is an empty list. Any other read failure (permissions,
/// invalid UTF-8) is logged and also treated as an empty list.
pub fn read_list(path: &Path) -> Vec<String> {
    match fs::read_to_string(path) {
        Ok(content) => parse_list(&content),
        Err(e) if e.kind() == ErrorKind::NotFound => Vec::new(),
        Err(e) => {
            tracing::warn!(path = ?path, error = %e, "failed to read list file");
            Vec::new()
        }
    }
}
