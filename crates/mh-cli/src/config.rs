//! Configuration loading and management.

use std::path::{Path, PathBuf};

use chrono_tz::Tz;
use figment::Figment;
use figment::providers::{Env, Format, Serialized, Toml};
use mh_core::list_file::{EXCLUSION_RULES_FILE, TEMPLATE_FILE};
use mh_core::{ExclusionRules, IgnoreStore, ValidationError, parse_timezone};
use serde::{Deserialize, Serialize};

/// Application configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// IANA timezone all events and windows are evaluated in.
    pub timezone: String,

    /// Directory holding the exclusion patterns, ignore list and template.
    pub config_dir: PathBuf,

    /// Maximum number of full-hour meetings reported per run.
    pub max_candidates: usize,

    /// Number of working days in the daily overview.
    pub working_days: usize,

    /// How far ahead to look for full-hour meetings.
    pub lookahead_days: i64,

    /// Proposed shift of the start time in reschedule requests.
    pub shift_minutes: i64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            timezone: iana_time_zone::get_timezone().unwrap_or_else(|_| "UTC".to_string()),
            config_dir: dirs_config_path().unwrap_or_else(|| PathBuf::from(".")),
            max_candidates: 10,
            working_days: 5,
            lookahead_days: 14,
            shift_minutes: 5,
        }
    }
}

impl Config {
    /// Loads configuration from default locations.
    #[expect(
        clippy::result_large_err,
        reason = "figment::Error is large but only returned at startup"
    )]
    pub fn load() -> Result<Self, figment::Error> {
        Self::load_from(None)
    }

    /// Loads configuration, optionally from a specific file.
    #[expect(
        clippy::result_large_err,
        reason = "figment::Error is large but only returned at startup"
    )]
    pub fn load_from(config_path: Option<&Path>) -> Result<Self, figment::Error> {
        let mut figment = Figment::from(Serialized::defaults(Self::default()));

        // Load from default config location
        if let Some(config_dir) = dirs_config_path() {
            figment = figment.merge(Toml::file(config_dir.join("config.toml")));
        }

        // Load from specified config file
        if let Some(path) = config_path {
            figment = figment.merge(Toml::file(path));
        }

        // Load from environment variables (MH_*)
        figment = figment.merge(Env::prefixed("MH_"));

        figment.extract()
    }

    /// The configured timezone, resolved.
    pub fn tz(&self) -> Result<Tz, ValidationError> {
        parse_timezone(&self.timezone)
    }

    pub fn rules_path(&self) -> PathBuf {
        self.config_dir.join(EXCLUSION_RULES_FILE)
    }

    pub fn template_path(&self) -> PathBuf {
        self.config_dir.join(TEMPLATE_FILE)
    }

    pub fn exclusion_rules(&self) -> ExclusionRules {
        ExclusionRules::load(&self.rules_path())
    }

    pub fn ignore_store(&self) -> IgnoreStore {
        IgnoreStore::in_dir(&self.config_dir)
    }
}

/// Returns the platform-specific config directory for mh.
///
/// On Linux: `~/.config/mh`
pub fn dirs_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|p| p.join("mh"))
}
