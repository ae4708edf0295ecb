//! Interactive full-buffer capture.
//!
//! The terminal analog of a single-line GUI entry field: raw-mode key
//! events mutate an in-memory buffer, and every mutation reports the entire
//! current buffer (not a diff) to the change listener. Enter, Esc, Ctrl-C
//! and Ctrl-D end the session cleanly.

use std::io::IsTerminal;

use anyhow::{bail, Context, Result};
use crossterm::cursor::MoveToColumn;
use crossterm::event::{Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use crossterm::style::Print;
use crossterm::terminal::{disable_raw_mode, enable_raw_mode, Clear, ClearType};

use super::CaptureSurface;

/// Source of terminal events. A seam between the buffer surface and
/// crossterm so the pump loop can run under test without a tty.
pub trait EventSource {
    fn next_event(&mut self) -> std::io::Result<Event>;
}

/// Blocking crossterm event source for a real terminal.
pub struct TerminalEvents;

impl EventSource for TerminalEvents {
    fn next_event(&mut self) -> std::io::Result<Event> {
        crossterm::event::read()
    }
}

/// Restores cooked mode on every exit path, including errors.
struct RawModeGuard;

impl RawModeGuard {
    fn enter() -> std::io::Result<Self> {
        enable_raw_mode()?;
        Ok(Self)
    }
}

impl Drop for RawModeGuard {
    fn drop(&mut self) {
        if let Err(e) = disable_raw_mode() {
            tracing::debug!(error = %e, "failed to restore terminal mode");
        }
    }
}

/// Effect of one key event on the buffer.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum KeyOutcome {
    Changed,
    Unchanged,
    Quit,
}

/// Apply a key event to the buffer. Printable characters insert at the end,
/// Backspace removes the last character, everything else leaves the buffer
/// alone.
pub(crate) fn apply_key(text: &mut String, key: &KeyEvent) -> KeyOutcome {
    if key.kind == KeyEventKind::Release {
        return KeyOutcome::Unchanged;
    }
    match key.code {
        KeyCode::Char('c') | KeyCode::Char('d')
            if key.modifiers.contains(KeyModifiers::CONTROL) =>
        {
            KeyOutcome::Quit
        }
        KeyCode::Enter | KeyCode::Esc => KeyOutcome::Quit,
        KeyCode::Char(_)
            if key.modifiers.contains(KeyModifiers::CONTROL)
                || key.modifiers.contains(KeyModifiers::ALT) =>
        {
            KeyOutcome::Unchanged
        }
        KeyCode::Char(c) => {
            text.push(c);
            KeyOutcome::Changed
        }
        KeyCode::Backspace => {
            if text.pop().is_some() {
                KeyOutcome::Changed
            } else {
                KeyOutcome::Unchanged
            }
        }
        _ => KeyOutcome::Unchanged,
    }
}

/// Full-buffer capture surface over an event source.
pub struct BufferSurface<S> {
    source: S,
    text: String,
    raw: Option<RawModeGuard>,
}

impl BufferSurface<TerminalEvents> {
    /// Attach to the controlling terminal, entering raw mode.
    ///
    /// Fatal when stdin is not an interactive terminal; buffer mode has no
    /// surface to show without one.
    pub fn attach() -> Result<Self> {
        if !std::io::stdin().is_terminal() {
            bail!("buffer mode requires an interactive terminal on stdin");
        }
        let raw = RawModeGuard::enter().context("failed to enable raw terminal mode")?;
        Ok(Self {
            source: TerminalEvents,
            text: String::new(),
            raw: Some(raw),
        })
    }
}

impl<S: EventSource> BufferSurface<S> {
    /// Surface driven by an arbitrary event source, without touching the
    /// terminal.
    pub fn with_source(source: S) -> Self {
        Self {
            source,
            text: String::new(),
            raw: None,
        }
    }

    /// The full text currently held by the surface.
    pub fn current_text(&self) -> &str {
        &self.text
    }

    /// Redraw the entry line. Cosmetic only; failures stay out of the
    /// capture path.
    fn echo(&self) {
        if self.raw.is_none() {
            return;
        }
        let mut out = std::io::stdout();
        if let Err(e) = crossterm::execute!(
            out,
            MoveToColumn(0),
            Clear(ClearType::CurrentLine),
            Print(&self.text)
        ) {
            tracing::debug!(error = %e, "failed to redraw entry line");
        }
    }
}

impl<S: EventSource> CaptureSurface for BufferSurface<S> {
    fn pump(&mut self, on_change: &mut dyn FnMut(&str)) -> Result<()> {
        loop {
            let event = self
                .source
                .next_event()
                .context("failed to read terminal event")?;
            if let Event::Key(key) = event {
                match apply_key(&mut self.text, &key) {
                    KeyOutcome::Changed => {
                        self.echo();
                        on_change(&self.text);
                    }
                    KeyOutcome::Unchanged => {}
                    KeyOutcome::Quit => break,
                }
            }
        }
        Ok(())
    }
}

#[cfg(test)]
pub(crate) mod test_support {
    use super::*;
    use std::collections::VecDeque;

    /// Event source fed from a fixed script, for pumping without a tty.
    pub(crate) struct ScriptedEvents {
        events: VecDeque<Event>,
    }

    impl ScriptedEvents {
        pub(crate) fn new(events: impl IntoIterator<Item = Event>) -> Self {
            Self {
                events: events.into_iter().collect(),
            }
        }
    }

    impl EventSource for ScriptedEvents {
        fn next_event(&mut self) -> std::io::Result<Event> {
            self.events.pop_front().ok_or_else(|| {
                std::io::Error::new(std::io::ErrorKind::UnexpectedEof, "script exhausted")
            })
        }
    }

    pub(crate) fn key(code: KeyCode) -> Event {
        Event::Key(KeyEvent::new(code, KeyModifiers::NONE))
    }

    pub(crate) fn ctrl(c: char) -> Event {
        Event::Key(KeyEvent::new(KeyCode::Char(c), KeyModifiers::CONTROL))
    }

    pub(crate) fn typed(s: &str) -> Vec<Event> {
        s.chars().map(|c| key(KeyCode::Char(c))).collect()
    }

    /// Surface that types `s` character by character, then quits with Esc.
    pub(crate) fn scripted_typing(s: &str) -> BufferSurface<ScriptedEvents> {
        let mut events = typed(s);
        events.push(key(KeyCode::Esc));
        BufferSurface::with_source(ScriptedEvents::new(events))
    }
}

#[cfg(test)]
#[path = "buffer_tests.rs"]
mod tests;
