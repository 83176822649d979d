//! Closed enums for the provider-level attributes of a calendar event.

use std::fmt;

use chrono_tz::Tz;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Validation errors for core types.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// The timezone name is not a known IANA identifier.
    #[error("unknown timezone: {name}")]
    UnknownTimezone { name: String },
}

/// Resolves an IANA timezone name.
pub fn parse_timezone(name: &str) -> Result<Tz, ValidationError> {
    name.parse().map_err(|_| ValidationError::UnknownTimezone {
        name: name.to_string(),
    })
}

/// Generates the string conversions shared by provider enums.
///
/// Parsing is total: spellings the provider adds later map to the catch-all
/// variant instead of failing the whole event.
macro_rules! provider_enum {
    (
        $(#[$meta:meta])*
        $name:ident, fallback = $fallback:ident, { $($variant:ident => $text:literal),+ $(,)? }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        #[serde(rename_all = "snake_case")]
        pub enum $name {
            $($variant,)+
            $fallback,
        }

        impl $name {
            /// Provider spelling of this value.
            #[must_use]
            pub const fn as_str(&self) -> &'static str {
                match self {
                    $(Self::$variant => $text,)+
                    Self::$fallback => "unknown",
                }
            }

            /// Parses a provider spelling; unrecognised values become the catch-all.
            pub fn from_provider(s: &str) -> Self {
                match s {
                    $($text => Self::$variant,)+
                    _ => Self::$fallback,
                }
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.as_str())
            }
        }
    };
}

provider_enum!(
    /// The attendee's response to a meeting invitation.
    ResponseStatus, fallback = Other, {
        None => "none",
        Organizer => "organizer",
        TentativelyAccepted => "tentativelyAccepted",
        Accepted => "accepted",
        Declined => "declined",
        NotResponded => "notResponded",
    }
);

provider_enum!(
    /// Visibility marking of an event.
    Sensitivity, fallback = Other, {
        Normal => "normal",
        Personal => "personal",
        Private => "private",
        Confidential => "confidential",
    }
);

provider_enum!(
    /// How the event's time shows on the free/busy view.
    ShowAs, fallback = Unknown, {
        Free => "free",
        Tentative => "tentative",
        Busy => "busy",
        OutOfOffice => "oof",
        WorkingElsewhere => "workingElsewhere",
    }
);
