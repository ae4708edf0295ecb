// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Polling against the harness's filesystem contract.

use std::path::{Path, PathBuf};
use std::time::Duration;

use thiserror::Error;
use tokio::time::{sleep, Instant};

const POLL_INTERVAL: Duration = Duration::from_millis(25);

/// Failure while waiting for the ready marker.
#[derive(Debug, Error)]
pub enum ReadyError {
    #[error("timed out after {timeout:?} waiting for ready marker at {path}")]
    Timeout { path: PathBuf, timeout: Duration },

    /// The marker exists but carries another process's id: a leftover from
    /// a prior run, or a different instance racing on the same path.
    #[error("ready marker at {path} belongs to pid {found:?}, expected {expected}")]
    ForeignMarker {
        path: PathBuf,
        found: String,
        expected: u32,
    },
}

/// Wait for the ready marker to appear.
///
/// The marker's content is the producing process's decimal pid. When
/// `expected_pid` is given, a marker carrying any other value is rejected
/// immediately rather than letting the caller inject input at the wrong
/// instance. An empty marker is accepted: the harness creates the file
/// before the pid write lands.
pub async fn wait_for_marker(
    path: &Path,
    expected_pid: Option<u32>,
    timeout: Duration,
) -> Result<(), ReadyError> {
    let deadline = Instant::now() + timeout;
    loop {
        if let Ok(content) = tokio::fs::read_to_string(path).await {
            let content = content.trim();
            match expected_pid {
                None => return Ok(()),
                Some(pid) if content.is_empty() || pid.to_string() == content => return Ok(()),
                Some(pid) => {
                    return Err(ReadyError::ForeignMarker {
                        path: path.to_path_buf(),
                        found: content.to_string(),
                        expected: pid,
                    })
                }
            }
        }
        if Instant::now() >= deadline {
            return Err(ReadyError::Timeout {
                path: path.to_path_buf(),
                timeout,
            });
        }
        sleep(POLL_INTERVAL).await;
    }
}

/// The output artifact never reached the expected content.
#[derive(Debug, Error)]
#[error("output at {path} did not reach expected content within {timeout:?}; last observed: {found:?}")]
pub struct VerifyError {
    pub path: PathBuf,
    pub timeout: Duration,
    /// Last content observed before the deadline, if the file was readable.
    pub found: Option<String>,
}

/// Poll the output artifact until it holds exactly `expected`.
pub async fn wait_for_content(
    path: &Path,
    expected: &str,
    timeout: Duration,
) -> Result<(), VerifyError> {
    let deadline = Instant::now() + timeout;
    let mut last = None;
    loop {
        if let Ok(content) = tokio::fs::read_to_string(path).await {
            if content == expected {
                return Ok(());
            }
            last = Some(content);
        }
        if Instant::now() >= deadline {
            return Err(VerifyError {
                path: path.to_path_buf(),
                timeout,
                found: last,
            });
        }
        sleep(POLL_INTERVAL).await;
    }
}

/// One-shot read of the output artifact.
pub async fn read_snapshot(path: &Path) -> std::io::Result<String> {
    tokio::fs::read_to_string(path).await
}

#[cfg(test)]
#[path = "poll_tests.rs"]
mod tests;
