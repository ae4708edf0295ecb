//! Snapshot persistence for captured text.
//!
//! Two policies share one write entry point. Buffer mode replaces the whole
//! artifact per change; stream mode appends lines as they arrive. Replace
//! goes through a temporary file and an atomic rename so a reader racing
//! the harness never sees a half-written artifact.

use std::fs::OpenOptions;
use std::io::Write;
use std::path::{Path, PathBuf};

use tempfile::NamedTempFile;
use thiserror::Error;

/// How each change event is persisted.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SnapshotPolicy {
    /// Rewrite the artifact with the full event text (full-buffer capture).
    Replace,
    /// Append the event text as-is and flush (streaming capture).
    Append,
}

/// Failure to persist one change event.
#[derive(Debug, Error)]
#[error("failed to write snapshot to {path}: {source}")]
pub struct SnapshotError {
    pub path: PathBuf,
    #[source]
    pub source: std::io::Error,
}

/// Persists change events to a fixed output path.
pub struct SnapshotWriter {
    path: PathBuf,
    policy: SnapshotPolicy,
}

impl SnapshotWriter {
    pub fn new(path: PathBuf, policy: SnapshotPolicy) -> Self {
        Self { path, policy }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Persist one change event.
    ///
    /// Errors are per-event: the caller logs and carries on, and the next
    /// event retries independently. In replace mode every event carries the
    /// full current state, so a lost snapshot is superseded rather than
    /// retried.
    pub fn record(&self, text: &str) -> Result<(), SnapshotError> {
        match self.policy {
            SnapshotPolicy::Replace => self.replace(text),
            SnapshotPolicy::Append => self.append(text),
        }
        .map_err(|source| SnapshotError {
            path: self.path.clone(),
            source,
        })
    }

    fn replace(&self, text: &str) -> std::io::Result<()> {
        // The temporary file must live in the destination directory so the
        // rename stays on one filesystem and is atomic.
        let dir = match self.path.parent() {
            Some(p) if !p.as_os_str().is_empty() => p,
            _ => Path::new("."),
        };
        let mut tmp = NamedTempFile::new_in(dir)?;
        tmp.write_all(text.as_bytes())?;
        tmp.flush()?;
        tmp.persist(&self.path).map_err(|e| e.error)?;
        Ok(())
    }

    fn append(&self, text: &str) -> std::io::Result<()> {
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)?;
        file.write_all(text.as_bytes())?;
        file.flush()
    }
}

#[cfg(test)]
#[path = "snapshot_tests.rs"]
mod tests;
