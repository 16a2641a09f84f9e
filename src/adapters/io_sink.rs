//! Writer-backed sink adapter.
//!
//! Implements [`TransmitSink`] over any [`std::io::Write`]. The host binary
//! uses it to put response frames on stdout. The sink trait cannot fail, so
//! the first write error is parked here and surfaced by [`WriterSink::flush`].

use std::io::{self, Write};

use crate::link::TransmitSink;

/// Adapter that writes every outbound frame to `W`.
pub struct WriterSink<W: Write> {
    writer: W,
    error: Option<io::Error>,
}

impl<W: Write> WriterSink<W> {
    pub fn new(writer: W) -> Self {
        Self {
            writer,
            error: None,
        }
    }

    /// Flush the writer, reporting any error held since the last flush.
    pub fn flush(&mut self) -> io::Result<()> {
        if let Some(e) = self.error.take() {
            return Err(e);
        }
        self.writer.flush()
    }

    pub fn into_inner(self) -> W {
        self.writer
    }

    fn write(&mut self, bytes: &[u8]) {
        if self.error.is_some() {
            return;
        }
        if let Err(e) = self.writer.write_all(bytes) {
            self.error = Some(e);
        }
    }
}

impl<W: Write> TransmitSink for WriterSink<W> {
    fn transmit_byte(&mut self, byte: u8) {
        self.write(&[byte]);
    }

    fn transmit_frame(&mut self, frame: &[u8]) {
        self.write(frame);
    }
}
