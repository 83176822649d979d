//! End-to-end tests for the `mh` binary.
//!
//! Each test runs against its own config directory and feed file:
//! summary → candidates → ignore → candidates again.

use std::path::Path;
use std::process::{Command, Output};

use tempfile::TempDir;

fn mh_binary() -> String {
    env!("CARGO_BIN_EXE_mh").to_string()
}

const FEED: &str = r#"{"value": [
    {"iCalUId": "ical-standup", "subject": "Standup",
     "start": {"dateTime": "2025-01-15T09:00:00.0000000", "timeZone": "Europe/Copenhagen"},
     "end": {"dateTime": "2025-01-15T09:30:00.0000000", "timeZone": "Europe/Copenhagen"},
     "organizer": {"emailAddress": {"name": "Ada Lovelace", "address": "ada@example.com"}}},
    {"iCalUId": "ical-review", "subject": "Review",
     "start": {"dateTime": "2025-01-16T10:00:00.0000000", "timeZone": "Europe/Copenhagen"},
     "end": {"dateTime": "2025-01-16T11:00:00.0000000", "timeZone": "Europe/Copenhagen"}},
    {"iCalUId": "ical-lunch", "subject": "Lunch",
     "start": {"dateTime": "2025-01-16T12:00:00.0000000", "timeZone": "Europe/Copenhagen"},
     "end": {"dateTime": "2025-01-16T13:00:00.0000000", "timeZone": "Europe/Copenhagen"}}
]}"#;

/// Writes the feed, an exclusion list and a config file pointing at `temp`.
fn setup(temp: &Path) {
    let config_dir = temp.join("mh");
    std::fs::create_dir_all(&config_dir).unwrap();
    std::fs::write(config_dir.join("ignore_appointments.txt"), "^lunch\n").unwrap();
    std::fs::write(temp.join("feed.json"), FEED).unwrap();
    std::fs::write(
        temp.join("mh.toml"),
        format!(
            "timezone = \"Europe/Copenhagen\"\nconfig_dir = \"{}\"\n",
            config_dir.display()
        ),
    )
    .unwrap();
}

fn mh(temp: &Path, args: &[&str]) -> Output {
    Command::new(mh_binary())
        .env("HOME", temp)
        .env("XDG_CONFIG_HOME", temp.join(".config"))
        .env_remove("RUST_LOG")
        .arg("--config")
        .arg(temp.join("mh.toml"))
        .args(args)
        .output()
        .expect("failed to run mh")
}

fn stdout_of(output: &Output) -> String {
    assert!(
        output.status.success(),
        "mh should succeed: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    String::from_utf8(output.stdout.clone()).unwrap()
}

#[test]
fn test_summary_json() {
    let temp = TempDir::new().unwrap();
    setup(temp.path());
    let feed = temp.path().join("feed.json");

    let output = mh(
        temp.path(),
        &[
            "summary",
            "--events",
            feed.to_str().unwrap(),
            "--now",
            "2025-01-15T08:00",
            "--json",
        ],
    );
    let value: serde_json::Value = serde_json::from_str(&stdout_of(&output)).unwrap();

    assert_eq!(value["timezone"], "Europe/Copenhagen");
    assert_eq!(value["pattern_count"], 1);
    assert_eq!(value["periods"][0]["total_hours"], 0.5);
    assert_eq!(value["periods"][1]["total_hours"], 1.0);
    assert_eq!(value["periods"][2]["total_hours"], 1.5);
    assert_eq!(value["periods"][2]["count"], 2);
}

#[test]
fn test_ignore_removes_candidate() {
    let temp = TempDir::new().unwrap();
    setup(temp.path());
    let feed = temp.path().join("feed.json");
    let feed = feed.to_str().unwrap();
    let now = "2025-01-15T08:00";

    let before = stdout_of(&mh(temp.path(), &["candidates", "--events", feed, "--now", now]));
    assert!(before.starts_with("FULL-HOUR MEETINGS: 2 found"));
    assert!(before.contains("id: ical-standup"));

    let ignored = stdout_of(&mh(
        temp.path(),
        &["ignore", "--events", feed, "--now", now, "ical-standup"],
    ));
    assert_eq!(ignored, "Ignoring Standup (ical-standup) in future scans\n");

    let after = stdout_of(&mh(temp.path(), &["candidates", "--events", feed, "--now", now]));
    assert!(after.starts_with("FULL-HOUR MEETINGS: 1 found"));
    assert!(!after.contains("ical-standup"));
    assert!(after.contains("1 (previously ignored)"));

    let status = stdout_of(&mh(temp.path(), &["status"]));
    assert!(status.contains("Ignored meetings:   1"));
}

#[test]
fn test_draft_prints_request() {
    let temp = TempDir::new().unwrap();
    setup(temp.path());
    let feed = temp.path().join("feed.json");

    let output = stdout_of(&mh(
        temp.path(),
        &["draft", "--events", feed.to_str().unwrap(), "ical-standup"],
    ));

    assert!(output.starts_with("To: ada@example.com\n"));
    assert!(output.contains("Current Start Time: Wednesday, January 15, 2025 09:00"));
}

#[test]
fn test_log_file_receives_diagnostics() {
    let temp = TempDir::new().unwrap();
    setup(temp.path());
    let log = temp.path().join("mh.log");

    let output = mh(
        temp.path(),
        &["status", "-v", "--log-file", log.to_str().unwrap()],
    );
    assert!(stdout_of(&output).contains("Timezone:           Europe/Copenhagen"));
    assert!(output.stderr.is_empty());

    let first = std::fs::read_to_string(&log).unwrap();
    assert!(first.contains("loaded configuration"));

    // A second run appends rather than truncating
    stdout_of(&mh(
        temp.path(),
        &["status", "-v", "--log-file", log.to_str().unwrap()],
    ));
    let second = std::fs::read_to_string(&log).unwrap();
    assert!(second.starts_with(&first));
    assert_eq!(second.matches("loaded configuration").count(), 2);
}

#[test]
fn test_unknown_identity_fails() {
    let temp = TempDir::new().unwrap();
    setup(temp.path());
    let feed = temp.path().join("feed.json");

    let output = mh(
        temp.path(),
        &["ignore", "--events", feed.to_str().unwrap(), "ical-missing"],
    );

    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("no event with identity ical-missing"));
}
