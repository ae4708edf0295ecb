#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
use super::*;
use crate::cli::Cli;

fn cli_with(
    output: Option<&str>,
    marker: Option<&str>,
    run_token: Option<&str>,
) -> Cli {
    Cli {
        output: output.map(PathBuf::from),
        mode: CaptureMode::Stream,
        marker: marker.map(PathBuf::from),
        run_token: run_token.map(String::from),
        events: None,
    }
}

#[test]
fn marker_derived_next_to_explicit_output() {
    let config = HarnessConfig::resolve(&cli_with(Some("/work/out/t1.txt"), None, None));
    assert_eq!(config.output_path, PathBuf::from("/work/out/t1.txt"));
    assert_eq!(config.marker_path, PathBuf::from("/work/out/t1.txt.ready"));
}

#[test]
fn explicit_marker_wins_over_derivation() {
    let config = HarnessConfig::resolve(&cli_with(
        Some("/work/out/t1.txt"),
        Some("/elsewhere/live.ready"),
        None,
    ));
    assert_eq!(config.marker_path, PathBuf::from("/elsewhere/live.ready"));
}

#[test]
fn run_token_names_derived_paths() {
    let config = HarnessConfig::resolve(&cli_with(None, None, Some("tok-1")));
    let temp = std::env::temp_dir();
    assert_eq!(config.output_path, temp.join("textsink_tok-1.txt"));
    assert_eq!(config.marker_path, temp.join("textsink_tok-1.txt.ready"));
}

#[test]
fn pid_names_derived_paths_without_token() {
    let config = HarnessConfig::resolve(&cli_with(None, None, None));
    let pid = std::process::id().to_string();
    let name = config.output_path.file_name().unwrap().to_string_lossy().into_owned();
    assert_eq!(name, format!("textsink_{pid}.txt"));
}

#[test]
fn extension_bearing_output_keeps_full_name_in_marker() {
    // "t1.txt" -> "t1.txt.ready", never "t1.ready": an output named
    // "t1.ready" must not collide with its own marker.
    let config = HarnessConfig::resolve(&cli_with(Some("/w/t1.ready"), None, None));
    assert_eq!(config.marker_path, PathBuf::from("/w/t1.ready.ready"));
}
