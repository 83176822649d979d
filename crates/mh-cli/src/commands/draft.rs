//! Draft command: prints a reschedule request for one meeting.

use std::io::Write;

use anyhow::Result;
use mh_core::reschedule_draft;
use mh_core::template::load_template;

use super::util::{find_event, load_events, shift_span};
use crate::{Config, FeedArgs};

pub fn run<W: Write>(writer: &mut W, config: &Config, feed: &FeedArgs, identity: &str) -> Result<()> {
    let tz = config.tz()?;
    let events = load_events(&feed.events, tz)?;
    let event = find_event(&events, identity)?;

    let shift = shift_span(config.shift_minutes)?;
    let template = load_template(&config.template_path());
    let draft = reschedule_draft(event, &template, shift)?;

    writeln!(writer, "To: {}", draft.to)?;
    writeln!(writer, "Subject: {}", draft.subject)?;
    writeln!(writer)?;
    writeln!(writer, "{}", draft.body)?;
    Ok(())
}
