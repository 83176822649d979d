//! Command-line argument definitions.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use crate::commands::ignore::IgnoreArgs;

/// Meeting hours at a glance.
///
/// Summarizes how much of the working week is spent in meetings and finds
/// upcoming meetings that start on the full hour.
#[derive(Debug, Parser)]
#[command(name = "mh", version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose output.
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Path to config file.
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Append diagnostics to this file instead of stderr.
    #[arg(long, global = true)]
    pub log_file: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available subcommands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Show meeting hours for today, the next working day and both weeks.
    Summary {
        #[command(flatten)]
        feed: FeedArgs,

        /// Output as JSON.
        #[arg(long)]
        json: bool,
    },

    /// List upcoming meetings that start exactly on the hour.
    Candidates {
        #[command(flatten)]
        feed: FeedArgs,

        /// Output as JSON.
        #[arg(long)]
        json: bool,
    },

    /// Stop suggesting a meeting for rescheduling.
    Ignore(IgnoreArgs),

    /// Print a reschedule request for a meeting.
    Draft {
        #[command(flatten)]
        feed: FeedArgs,

        /// Identifier of the meeting, as printed by `mh candidates`.
        identity: String,
    },

    /// Show configuration and list file status.
    Status,
}

/// Where events come from and what "now" is.
#[derive(Debug, Clone, Args)]
pub struct FeedArgs {
    /// Calendar feed in JSON (a `calendarView` page or a bare array).
    #[arg(long)]
    pub events: PathBuf,

    /// Evaluate as of this time (RFC 3339 or local `YYYY-MM-DDTHH:MM[:SS]`).
    #[arg(long)]
    pub now: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn summary_accepts_feed_and_json() {
        let cli = Cli::try_parse_from([
            "mh",
            "summary",
            "--events",
            "feed.json",
            "--now",
            "2025-01-15T14:30",
            "--json",
        ])
        .unwrap();
        let Some(Commands::Summary { feed, json }) = cli.command else {
            panic!("expected summary command");
        };
        assert_eq!(feed.events, PathBuf::from("feed.json"));
        assert_eq!(feed.now.as_deref(), Some("2025-01-15T14:30"));
        assert!(json);
    }

    #[test]
    fn ignore_requires_identity() {
        assert!(Cli::try_parse_from(["mh", "ignore", "--events", "feed.json"]).is_err());
    }

    #[test]
    fn global_flags_after_subcommand() {
        let cli = Cli::try_parse_from([
            "mh",
            "status",
            "-v",
            "--config",
            "mh.toml",
            "--log-file",
            "mh.log",
        ])
        .unwrap();
        assert!(cli.verbose);
        assert_eq!(cli.config, Some(PathBuf::from("mh.toml")));
        assert_eq!(cli.log_file, Some(PathBuf::from("mh.log")));
    }
}
