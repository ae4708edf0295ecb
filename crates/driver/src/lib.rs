// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Driver-side support for the textsink capture harness.
//!
//! A driver launches a harness process, polls for its ready marker before
//! injecting any input, and reads the output artifact to assert on the
//! captured text. The filesystem is the whole contract: nothing here talks
//! to the harness process directly.

mod app;
mod poll;

pub use app::HarnessApp;
pub use poll::{read_snapshot, wait_for_content, wait_for_marker, ReadyError, VerifyError};
