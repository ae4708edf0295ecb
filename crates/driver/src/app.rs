// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Harness process supervision for driver test suites.

use std::path::{Path, PathBuf};
use std::process::Stdio;
use std::time::Duration;

use tokio::io::AsyncWriteExt;
use tokio::process::{Child, ChildStdin, Command};

use crate::poll::{wait_for_content, wait_for_marker, ReadyError, VerifyError};

/// A launched harness process and its filesystem artifacts.
///
/// Dropping the app kills the process and removes the artifacts, so a
/// failed test does not leave markers behind to confuse the next run.
pub struct HarnessApp {
    child: Child,
    stdin: Option<ChildStdin>,
    pid: u32,
    output_path: PathBuf,
    marker_path: PathBuf,
}

impl HarnessApp {
    /// Launch `program` in the given capture mode (`"stream"` or
    /// `"buffer"`) with artifacts under `dir`.
    ///
    /// Artifact paths are derived from a fresh uuid run token, so many apps
    /// can share one directory without colliding even across pid reuse.
    pub async fn launch(program: &Path, mode: &str, dir: &Path) -> std::io::Result<Self> {
        let token = uuid::Uuid::new_v4().to_string();
        let (output_path, marker_path) = artifact_paths(dir, &token);

        let mut child = Command::new(program)
            .arg("--mode")
            .arg(mode)
            .arg("--run-token")
            .arg(&token)
            .arg(&output_path)
            .stdin(Stdio::piped())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .kill_on_drop(true)
            .spawn()?;

        let stdin = child.stdin.take();
        let pid = child
            .id()
            .ok_or_else(|| std::io::Error::other("harness exited before its pid could be read"))?;
        tracing::debug!(pid, token = %token, "launched harness");

        Ok(Self {
            child,
            stdin,
            pid,
            output_path,
            marker_path,
        })
    }

    pub fn pid(&self) -> u32 {
        self.pid
    }

    pub fn output_path(&self) -> &Path {
        &self.output_path
    }

    pub fn marker_path(&self) -> &Path {
        &self.marker_path
    }

    /// Wait for the harness to signal readiness, verifying the marker
    /// belongs to this instance.
    pub async fn wait_ready(&self, timeout: Duration) -> Result<(), ReadyError> {
        wait_for_marker(&self.marker_path, Some(self.pid), timeout).await
    }

    /// Send one line of input to the harness's stdin (stream mode).
    pub async fn send_line(&mut self, text: &str) -> std::io::Result<()> {
        let stdin = self
            .stdin
            .as_mut()
            .ok_or_else(|| std::io::Error::other("harness stdin already closed"))?;
        stdin.write_all(text.as_bytes()).await?;
        stdin.write_all(b"\n").await?;
        stdin.flush().await
    }

    /// Close the harness's stdin, letting stream mode reach end-of-input.
    pub fn close_input(&mut self) {
        self.stdin.take();
    }

    /// Poll the output artifact until it matches `expected` exactly.
    pub async fn verify(&self, expected: &str, timeout: Duration) -> Result<(), VerifyError> {
        wait_for_content(&self.output_path, expected, timeout).await
    }

    /// Wait for the harness to exit, returning its exit code.
    pub async fn wait_exit(&mut self, timeout: Duration) -> std::io::Result<Option<i32>> {
        let status = tokio::time::timeout(timeout, self.child.wait())
            .await
            .map_err(|_| {
                std::io::Error::new(std::io::ErrorKind::TimedOut, "harness did not exit in time")
            })??;
        Ok(status.code())
    }
}

impl Drop for HarnessApp {
    fn drop(&mut self) {
        // kill_on_drop handles the process; artifact removal is best-effort.
        let _ = std::fs::remove_file(&self.output_path);
        let _ = std::fs::remove_file(&self.marker_path);
    }
}

/// Output and marker paths for a run token, matching the harness's own
/// derivation (`--marker` stays unset; the harness appends `.ready` to the
/// output file name).
pub(crate) fn artifact_paths(dir: &Path, token: &str) -> (PathBuf, PathBuf) {
    let output = dir.join(format!("textsink_{token}.txt"));
    let marker = dir.join(format!("textsink_{token}.txt.ready"));
    (output, marker)
}

#[cfg(test)]
#[path = "app_tests.rs"]
mod tests;
