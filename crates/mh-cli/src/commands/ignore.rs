//! Ignore command for dismissing a full-hour meeting.

use std::io::Write;

use anyhow::{Context, Result, bail};
use clap::Args;
use mh_core::IgnoreEntry;

use super::util::{find_event, load_events, resolve_now};
use crate::{Config, FeedArgs};

#[derive(Debug, Args)]
pub struct IgnoreArgs {
    #[command(flatten)]
    pub feed: FeedArgs,

    /// Identifier of the meeting, as printed by `mh candidates`.
    pub identity: String,
}

pub fn run<W: Write>(writer: &mut W, args: &IgnoreArgs, config: &Config) -> Result<()> {
    let tz = config.tz()?;
    let now = resolve_now(args.feed.now.as_deref(), tz)?;
    let events = load_events(&args.feed.events, tz)?;
    let event = find_event(&events, &args.identity)?;

    let store = config.ignore_store();
    let entry = IgnoreEntry::for_event(event, now);
    let appended = store
        .append(&entry)
        .with_context(|| format!("failed to update {}", store.path().display()))?;
    if !appended {
        bail!("event has no stable identifier: {}", event.subject);
    }

    writeln!(
        writer,
        "Ignoring {} ({}) in future scans",
        event.subject,
        event.identity()
    )?;
    Ok(())
}
