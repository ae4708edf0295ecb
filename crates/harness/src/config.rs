//! Resolved harness configuration.
//!
//! Paths are derived once at startup and handed to each component
//! explicitly, so tests can inject arbitrary locations.

use std::ffi::OsString;
use std::path::{Path, PathBuf};

use clap::ValueEnum;

use crate::cli::Cli;

/// Which capture surface and persistence policy the harness runs.
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum CaptureMode {
    /// Read stdin line by line, appending each line to the output file
    Stream,
    /// Interactive terminal entry field, rewriting the output file with the
    /// full buffer on every change
    Buffer,
}

/// Resolved paths and mode for one harness run.
#[derive(Clone, Debug)]
pub struct HarnessConfig {
    pub mode: CaptureMode,
    pub output_path: PathBuf,
    pub marker_path: PathBuf,
    pub events_path: Option<PathBuf>,
}

impl HarnessConfig {
    /// Resolve the configuration from parsed CLI arguments.
    ///
    /// The run identifier is the `--run-token` value when given, otherwise
    /// the process id. Process ids can be reused across runs, so drivers
    /// that launch many harnesses should pass a token.
    pub fn resolve(cli: &Cli) -> Self {
        let run_id = cli
            .run_token
            .clone()
            .unwrap_or_else(|| std::process::id().to_string());

        let output_path = cli
            .output
            .clone()
            .unwrap_or_else(|| std::env::temp_dir().join(format!("textsink_{run_id}.txt")));

        let marker_path = cli
            .marker
            .clone()
            .unwrap_or_else(|| default_marker_path(&output_path, &run_id));

        Self {
            mode: cli.mode,
            output_path,
            marker_path,
            events_path: cli.events.clone(),
        }
    }
}

/// Marker path derived from the output path: the output file name with
/// `.ready` appended, in the same directory.
fn default_marker_path(output: &Path, run_id: &str) -> PathBuf {
    match output.file_name() {
        Some(name) => {
            let mut marker_name = OsString::from(name);
            marker_name.push(".ready");
            output.with_file_name(marker_name)
        }
        // Output paths ending in ".." or "/" carry no file name to decorate.
        None => std::env::temp_dir().join(format!("textsink_{run_id}.ready")),
    }
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod tests;
