//! Status command: shows resolved configuration and list file health.

use std::io::Write;

use anyhow::Result;

use crate::Config;

pub fn run<W: Write>(writer: &mut W, config: &Config) -> Result<()> {
    let tz = config.tz()?;
    let rules = config.exclusion_rules();
    let invalid: Vec<&str> = rules.invalid_patterns().collect();
    let ignored = config.ignore_store().load();

    writeln!(writer, "Timezone:           {}", tz.name())?;
    writeln!(writer, "Config directory:   {}", config.config_dir.display())?;
    if invalid.is_empty() {
        writeln!(writer, "Exclusion patterns: {}", rules.len())?;
    } else {
        writeln!(
            writer,
            "Exclusion patterns: {} ({} invalid, skipped)",
            rules.len(),
            invalid.len()
        )?;
    }
    for pattern in rules.patterns() {
        if invalid.contains(&pattern) {
            writeln!(writer, "  {pattern} (invalid)")?;
        } else {
            writeln!(writer, "  {pattern}")?;
        }
    }
    writeln!(writer, "Ignored meetings:   {}", ignored.len())?;
    Ok(())
}
