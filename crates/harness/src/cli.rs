//! CLI argument parsing.

use clap::Parser;
use std::path::PathBuf;

use crate::config::CaptureMode;

/// Text-capture harness for input-injection tests
#[derive(Parser, Debug, Clone)]
#[command(name = "textsink", version, about = "Text capture harness for input-injection tests")]
pub struct Cli {
    /// Output file for captured text (defaults to textsink_<id>.txt in the
    /// system temp directory)
    #[arg(value_name = "OUTPUT", env = "TEXTSINK_OUTPUT")]
    pub output: Option<PathBuf>,

    /// Capture mode
    #[arg(long, value_enum, default_value = "buffer")]
    pub mode: CaptureMode,

    /// Ready marker path (defaults to the output file name with ".ready"
    /// appended, in the same directory)
    #[arg(long)]
    pub marker: Option<PathBuf>,

    /// Unique run identifier used in derived paths instead of the pid
    #[arg(long, env = "TEXTSINK_RUN_TOKEN")]
    pub run_token: Option<String>,

    /// Write a JSONL log of lifecycle events to this path
    #[arg(long)]
    pub events: Option<PathBuf>,
}

#[cfg(test)]
#[path = "cli_tests.rs"]
mod tests;
