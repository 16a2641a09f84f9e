//! Log-based sink adapter.
//!
//! Wraps another [`TransmitSink`] and writes every outbound frame to the
//! `log` facade before forwarding it. The host binary always wraps stdout
//! in it; with `-v` the responses show up on stderr next to the scanner's
//! trace output.

use log::info;

use crate::link::TransmitSink;

use super::utils::to_hex;

/// Adapter that logs every frame, then forwards it to `inner`.
pub struct LogSink<S> {
    inner: S,
    frames: u32,
}

impl<S: TransmitSink> LogSink<S> {
    pub fn new(inner: S) -> Self {
        Self { inner, frames: 0 }
    }

    pub fn frames_logged(&self) -> u32 {
        self.frames
    }

    pub fn inner_mut(&mut self) -> &mut S {
        &mut self.inner
    }

    pub fn into_inner(self) -> S {
        self.inner
    }
}

impl<S: TransmitSink> TransmitSink for LogSink<S> {
    fn transmit_byte(&mut self, byte: u8) {
        info!("TX | raw 0x{byte:02X}");
        self.inner.transmit_byte(byte);
    }

    fn transmit_frame(&mut self, frame: &[u8]) {
        self.frames += 1;
        info!("TX | frame #{} | {} bytes | {}", self.frames, frame.len(), to_hex(frame));
        self.inner.transmit_frame(frame);
    }
}
