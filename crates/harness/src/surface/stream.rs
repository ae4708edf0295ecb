//! Line-buffered streaming capture.

use std::io::BufRead;

use anyhow::{Context, Result};

use super::CaptureSurface;

/// Streaming surface: reads its input a line at a time until end-of-input,
/// delivering each line (terminator included, exactly as received) as one
/// change event.
pub struct StreamSurface<R> {
    reader: R,
}

impl<R: BufRead> StreamSurface<R> {
    pub fn new(reader: R) -> Self {
        Self { reader }
    }
}

impl<R: BufRead> CaptureSurface for StreamSurface<R> {
    fn pump(&mut self, on_change: &mut dyn FnMut(&str)) -> Result<()> {
        let mut line = String::new();
        loop {
            line.clear();
            let n = self
                .reader
                .read_line(&mut line)
                .context("failed to read from input stream")?;
            if n == 0 {
                break;
            }
            on_change(&line);
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "stream_tests.rs"]
mod tests;
