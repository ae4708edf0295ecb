#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
use super::*;
use crate::surface::StreamSurface;
use std::io::Cursor;
use std::path::Path;
use tempfile::TempDir;

fn config_in(dir: &Path) -> HarnessConfig {
    HarnessConfig {
        mode: CaptureMode::Stream,
        output_path: dir.join("cap.txt"),
        marker_path: dir.join("cap.txt.ready"),
        events_path: None,
    }
}

fn run_stream(input: &str, config: &HarnessConfig) -> anyhow::Result<()> {
    let mut surface = StreamSurface::new(Cursor::new(input.to_string()));
    let writer = SnapshotWriter::new(config.output_path.clone(), SnapshotPolicy::Append);
    let mut events = config
        .events_path
        .as_deref()
        .map(EventLog::create)
        .transpose()?;
    run_with_surface(&mut surface, &writer, config, &mut events)
}

#[test]
fn stream_session_appends_lines_and_creates_marker() {
    let dir = TempDir::new().unwrap();
    let config = config_in(dir.path());

    run_stream("foo\nbar\n", &config).unwrap();

    assert_eq!(
        std::fs::read_to_string(&config.output_path).unwrap(),
        "foo\nbar\n"
    );
    assert_eq!(
        std::fs::read_to_string(&config.marker_path).unwrap(),
        std::process::id().to_string()
    );
}

#[test]
fn marker_conflict_does_not_abort_capture() {
    let dir = TempDir::new().unwrap();
    let config = config_in(dir.path());
    std::fs::write(&config.marker_path, "424242").unwrap();

    run_stream("x\n", &config).unwrap();

    // Stale marker untouched, capture still recorded.
    assert_eq!(
        std::fs::read_to_string(&config.marker_path).unwrap(),
        "424242"
    );
    assert_eq!(std::fs::read_to_string(&config.output_path).unwrap(), "x\n");
}

#[test]
fn write_failures_do_not_abort_the_session() {
    let dir = TempDir::new().unwrap();
    let mut config = config_in(dir.path());
    config.output_path = dir.path().join("nope").join("cap.txt");

    run_stream("x\ny\n", &config).unwrap();

    assert!(!config.output_path.exists());
    // Marker creation is independent of snapshot failures.
    assert!(config.marker_path.exists());
}

#[test]
fn buffer_session_replaces_artifact_per_change() {
    use crate::surface::buffer::test_support::scripted_typing;

    let dir = TempDir::new().unwrap();
    let mut config = config_in(dir.path());
    config.mode = CaptureMode::Buffer;

    let mut surface = scripted_typing("hello");
    let writer = SnapshotWriter::new(config.output_path.clone(), SnapshotPolicy::Replace);
    run_with_surface(&mut surface, &writer, &config, &mut None).unwrap();

    assert_eq!(
        std::fs::read_to_string(&config.output_path).unwrap(),
        "hello"
    );
}

#[test]
fn event_log_records_lifecycle() {
    let dir = TempDir::new().unwrap();
    let mut config = config_in(dir.path());
    config.events_path = Some(dir.path().join("events.jsonl"));

    run_stream("foo\n", &config).unwrap();

    let log = std::fs::read_to_string(dir.path().join("events.jsonl")).unwrap();
    let lines: Vec<&str> = log.lines().collect();
    assert_eq!(lines.len(), 3);
    assert!(lines[0].contains("\"ready\""));
    assert!(lines[1].contains("\"change\""));
    assert!(lines[2].contains("\"exit\""));
}
