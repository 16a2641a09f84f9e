//! Transmission sink — where encoded frames go.
//!
//! The host harness supplies the sink; the engine never touches a real
//! channel. Concrete implementations:
//! - `Vec<u8>` (collects everything, used by tests)
//! - [`NullSink`] (discards)
//! - [`FnSink`] (per-byte closure, the shape of a harness callback)
//! - [`WriterSink`](crate::adapters::io_sink::WriterSink) (any `std::io::Write`)
//!
//! Sinks are called synchronously and must not re-enter the engine.

/// Byte-oriented outbound channel.
pub trait TransmitSink {
    /// Accept one outbound byte.
    fn transmit_byte(&mut self, byte: u8);

    /// Accept one complete encoded frame. Called once per frame; the default
    /// clocks it out one byte at a time, in order.
    fn transmit_frame(&mut self, frame: &[u8]) {
        for &byte in frame {
            self.transmit_byte(byte);
        }
    }
}

impl TransmitSink for Vec<u8> {
    fn transmit_byte(&mut self, byte: u8) {
        self.push(byte);
    }

    fn transmit_frame(&mut self, frame: &[u8]) {
        self.extend_from_slice(frame);
    }
}

impl<S: TransmitSink + ?Sized> TransmitSink for &mut S {
    fn transmit_byte(&mut self, byte: u8) {
        (**self).transmit_byte(byte);
    }

    fn transmit_frame(&mut self, frame: &[u8]) {
        (**self).transmit_frame(frame);
    }
}

/// A sink that discards everything.
/// Useful when only the engine's statistics matter.
pub struct NullSink;

impl TransmitSink for NullSink {
    fn transmit_byte(&mut self, _byte: u8) {}

    fn transmit_frame(&mut self, _frame: &[u8]) {}
}

/// Adapts a per-byte callback into a sink.
pub struct FnSink<F>(pub F);

impl<F: FnMut(u8)> TransmitSink for FnSink<F> {
    fn transmit_byte(&mut self, byte: u8) {
        (self.0)(byte);
    }
}
