//! Mode selection and event-loop orchestration.
//!
//! Builds the surface/writer pairing for the configured mode, creates the
//! ready marker once the surface is live, then pumps change events into the
//! snapshot writer until input is exhausted.

use anyhow::{Context, Result};

use crate::config::{CaptureMode, HarnessConfig};
use crate::events::EventLog;
use crate::ready::{create_ready_marker, MarkerError};
use crate::snapshot::{SnapshotPolicy, SnapshotWriter};
use crate::surface::{BufferSurface, CaptureSurface, StreamSurface};

/// Run one capture session to completion.
///
/// Returns an error only for startup configuration failures; once the event
/// loop is pumping, per-event write failures are logged and skipped so later
/// events can still land.
pub fn run(config: &HarnessConfig) -> Result<()> {
    let mut events = config
        .events_path
        .as_deref()
        .map(EventLog::create)
        .transpose()
        .context("failed to open event log")?;

    let (policy, mut surface): (SnapshotPolicy, Box<dyn CaptureSurface>) = match config.mode {
        CaptureMode::Stream => (
            SnapshotPolicy::Append,
            Box::new(StreamSurface::new(std::io::stdin().lock())),
        ),
        CaptureMode::Buffer => (SnapshotPolicy::Replace, Box::new(BufferSurface::attach()?)),
    };
    let writer = SnapshotWriter::new(config.output_path.clone(), policy);

    run_with_surface(surface.as_mut(), &writer, config, &mut events)
}

pub(crate) fn run_with_surface(
    surface: &mut dyn CaptureSurface,
    writer: &SnapshotWriter,
    config: &HarnessConfig,
    events: &mut Option<EventLog>,
) -> Result<()> {
    // The surface is live before the marker appears, so a driver that
    // observes the marker can start injecting immediately.
    match create_ready_marker(&config.marker_path) {
        Ok(()) => {
            tracing::info!(marker = %config.marker_path.display(), "ready marker created");
            if let Some(log) = events.as_mut() {
                log_or_warn(log.log_ready(&config.marker_path));
            }
        }
        Err(e @ MarkerError::AlreadyExists { .. }) => {
            // No retry: a stale marker is itself meaningful test signal,
            // and the poller is expected to time out on it.
            tracing::warn!(error = %e, "marker left in place from a prior instance");
            if let Some(log) = events.as_mut() {
                log_or_warn(log.log_marker_failed(&e.to_string()));
            }
        }
        Err(e) => {
            tracing::warn!(error = %e, "ready marker not created");
            if let Some(log) = events.as_mut() {
                log_or_warn(log.log_marker_failed(&e.to_string()));
            }
        }
    }

    surface.pump(&mut |text| match writer.record(text) {
        Ok(()) => {
            if let Some(log) = events.as_mut() {
                log_or_warn(log.log_change(text.len()));
            }
        }
        Err(e) => {
            tracing::warn!(error = %e, "snapshot write failed; continuing");
            if let Some(log) = events.as_mut() {
                log_or_warn(log.log_write_error(&e.to_string()));
            }
        }
    })?;

    if let Some(log) = events.as_mut() {
        log_or_warn(log.log_exit());
        log_or_warn(log.flush());
    }
    Ok(())
}

fn log_or_warn(result: std::io::Result<()>) {
    if let Err(e) = result {
        tracing::warn!(error = %e, "event log write failed");
    }
}

#[cfg(test)]
#[path = "session_tests.rs"]
mod tests;
