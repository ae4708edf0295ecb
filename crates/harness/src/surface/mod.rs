//! Capture surfaces.
//!
//! A surface owns the host event loop and reports every text mutation to a
//! registered listener, in the order the mutations occurred. Surfaces expose
//! no per-event errors: a surface that cannot start is a fatal configuration
//! error, and once pumping it only ends at end-of-input or a quit key.

pub mod buffer;
pub mod stream;

pub use buffer::{BufferSurface, EventSource, TerminalEvents};
pub use stream::StreamSurface;

/// Subscription contract between a capture surface and the snapshot path.
///
/// `pump` blocks inside the host event loop and invokes `on_change` with the
/// text of each mutation: the line just read in stream mode, the entire
/// current buffer in buffer mode.
pub trait CaptureSurface {
    fn pump(&mut self, on_change: &mut dyn FnMut(&str)) -> anyhow::Result<()>;
}
