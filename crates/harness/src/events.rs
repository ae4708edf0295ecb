//! Optional JSONL log of harness lifecycle events.
//!
//! One JSON object per line, stamped with milliseconds since session start.
//! Diagnostic only: drivers assert on the ready marker and the output
//! artifact, never on this log.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;
use std::time::Instant;

use serde_json::json;

pub struct EventLog {
    start: Instant,
    out: BufWriter<File>,
}

impl EventLog {
    pub fn create(path: &Path) -> std::io::Result<Self> {
        let file = File::create(path)?;
        Ok(Self {
            start: Instant::now(),
            out: BufWriter::new(file),
        })
    }

    fn elapsed_ms(&self) -> u64 {
        self.start.elapsed().as_millis() as u64
    }

    fn write(&mut self, value: serde_json::Value) -> std::io::Result<()> {
        serde_json::to_writer(&mut self.out, &value).map_err(std::io::Error::from)?;
        self.out.write_all(b"\n")
    }

    pub fn log_ready(&mut self, marker: &Path) -> std::io::Result<()> {
        let ms = self.elapsed_ms();
        self.write(json!({"ms": ms, "ready": marker.display().to_string()}))
    }

    pub fn log_marker_failed(&mut self, reason: &str) -> std::io::Result<()> {
        let ms = self.elapsed_ms();
        self.write(json!({"ms": ms, "marker_failed": reason}))
    }

    pub fn log_change(&mut self, bytes: usize) -> std::io::Result<()> {
        let ms = self.elapsed_ms();
        self.write(json!({"ms": ms, "change": {"bytes": bytes}}))
    }

    pub fn log_write_error(&mut self, reason: &str) -> std::io::Result<()> {
        let ms = self.elapsed_ms();
        self.write(json!({"ms": ms, "write_error": reason}))
    }

    pub fn log_exit(&mut self) -> std::io::Result<()> {
        let ms = self.elapsed_ms();
        self.write(json!({"ms": ms, "exit": "clean"}))
    }

    pub fn flush(&mut self) -> std::io::Result<()> {
        self.out.flush()
    }
}

#[cfg(test)]
#[path = "events_tests.rs"]
mod tests;
