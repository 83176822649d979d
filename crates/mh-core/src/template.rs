//! Placeholder templates for reschedule requests.

use std::fs;
use std::io::ErrorKind;
use std::path::Path;

use chrono::TimeDelta;
use serde::Serialize;
use thiserror::Error;

use crate::event::Event;

/// Subject used when a template has no `Subject:` line.
pub const DEFAULT_SUBJECT: &str = "Request to shift meeting start time to :05";

/// Template used when no template file is configured.
pub const DEFAULT_TEMPLATE: &str = "\
Subject: Request to shift meeting start time to :05

Dear {ORGANIZER},

I hope this message finds you well. I'm reaching out regarding our upcoming meeting:

Meeting: {SUBJECT}
Current Start Time: {START_TIME}

Would it be possible to shift the meeting start time by 5 minutes to {NEW_START_TIME}? This small adjustment would help create a buffer between back-to-back meetings and allow for better preparation time.

If this change works for you and other attendees, I would greatly appreciate it. If the current time is critical, please feel free to keep it as scheduled.

Thank you for considering this request.

Best regards
";

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DraftError {
    #[error("cannot determine organizer email address for '{subject}'")]
    MissingOrganizerEmail { subject: String },
}

/// A rendered reschedule request, ready for a mail client.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Draft {
    pub to: String,
    pub subject: String,
    pub body: String,
}

/// Replaces each `{KEY}` (key upper-cased) with its value.
///
/// Substitution is literal. Placeholders without a value are left as-is.
pub fn render(template: &str, values: &[(&str, &str)]) -> String {
    values
        .iter()
        .fold(template.to_string(), |text, (key, value)| {
            text.replace(&format!("{{{}}}", key.to_uppercase()), value)
        })
}

/// Reads a template file, falling back to [`DEFAULT_TEMPLATE`].
pub fn load_template(path: &Path) -> String {
    match fs::read_to_string(path) {
        Ok(content) => content,
        Err(e) => {
            if e.kind() != ErrorKind::NotFound {
                tracing::warn!(path = ?path, error = %e, "failed to load template, using default");
            }
            DEFAULT_TEMPLATE.to_string()
        }
    }
}

/// Splits a rendered template into mail subject and body.
///
/// The first line starting with `Subject:` supplies the subject; the body is
/// everything after that line, trimmed. Without such a line the default
/// subject is used and the text is returned unchanged.
pub fn split_subject(rendered: &str) -> (String, String) {
    let lines: Vec<&str> = rendered.lines().collect();
    let Some(index) = lines.iter().position(|line| line.starts_with("Subject:")) else {
        return (DEFAULT_SUBJECT.to_string(), rendered.to_string());
    };
    let subject = lines[index].strip_prefix("Subject:").unwrap_or_default().trim();
    let body = lines[index + 1..].join("\n");
    (subject.to_string(), body.trim().to_string())
}

/// Renders a request asking the organizer to move `event` by `shift`.
pub fn reschedule_draft(event: &Event, template: &str, shift: TimeDelta) -> Result<Draft, DraftError> {
    if event.organizer.email.trim().is_empty() {
        return Err(DraftError::MissingOrganizerEmail {
            subject: event.subject.clone(),
        });
    }

    let organizer = if event.organizer.name.is_empty() {
        "Unknown"
    } else {
        event.organizer.name.as_str()
    };
    let subject = if event.subject.is_empty() {
        "Untitled"
    } else {
        event.subject.as_str()
    };
    let start_time = event.start.format("%A, %B %d, %Y %H:%M").to_string();
    let new_start_time = (event.start + shift).format("%H:%M").to_string();

    let rendered = render(
        template,
        &[
            ("organizer", organizer),
            ("subject", subject),
            ("start_time", &start_time),
            ("new_start_time", &new_start_time),
        ],
    );
    let (mail_subject, body) = split_subject(&rendered);

    Ok(Draft {
        to: event.organizer.email.clone(),
        subject: mail_subject,
        body,
    })
}
