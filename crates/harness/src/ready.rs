//! Readiness marker creation.
//!
//! The marker is a small file whose existence tells a polling driver that
//! the harness is live and accepting input. Its content is the decimal pid
//! so the driver can reject markers left over from another instance.

use std::fs::OpenOptions;
use std::io::Write;
use std::path::{Path, PathBuf};

use thiserror::Error;

/// Failure to create the ready marker.
#[derive(Debug, Error)]
pub enum MarkerError {
    /// The path already exists, either from a stale prior instance or from
    /// a symlink planted at the expected location. The existing file is
    /// left untouched.
    #[error("ready marker already exists at {path}")]
    AlreadyExists { path: PathBuf },

    #[error("failed to create ready marker at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Create the ready marker with exclusive-create semantics and write the
/// decimal process id into it.
///
/// `create_new` refuses to open through an existing file or symlink, which
/// is what makes observing the marker an all-or-nothing event for a
/// concurrent poller. Called at most once per process; the harness never
/// deletes the marker itself.
pub fn create_ready_marker(path: &Path) -> Result<(), MarkerError> {
    let mut file = OpenOptions::new()
        .write(true)
        .create_new(true)
        .open(path)
        .map_err(|source| {
            if source.kind() == std::io::ErrorKind::AlreadyExists {
                MarkerError::AlreadyExists {
                    path: path.to_path_buf(),
                }
            } else {
                MarkerError::Io {
                    path: path.to_path_buf(),
                    source,
                }
            }
        })?;

    write!(file, "{}", std::process::id()).map_err(|source| MarkerError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    file.flush().map_err(|source| MarkerError::Io {
        path: path.to_path_buf(),
        source,
    })
}

#[cfg(test)]
#[path = "ready_tests.rs"]
mod tests;
