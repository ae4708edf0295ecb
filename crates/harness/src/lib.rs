//! Text-capture harness for input-injection testing.
//!
//! A `textsink` process exposes an editable text surface (a line-buffered
//! stdin stream or an interactive terminal entry field) and records
//! everything it captures to the filesystem, together with a readiness
//! marker, so an external test driver can inject input and assert on the
//! outcome without any IPC channel to the harness.

pub mod cli;
pub mod config;
pub mod events;
pub mod ready;
pub mod session;
pub mod snapshot;
pub mod surface;
