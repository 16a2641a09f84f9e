//! Link engine — owns the channel buffer and drives the framing pipeline.
//!
//! **Caller-driven**: the engine has no thread, timer or transport of its own.
//! The host feeds inbound bytes via [`LinkEngine::ingest`]; every valid frame
//! found is dispatched and its response is encoded and handed to the injected
//! [`TransmitSink`] before `ingest` returns.
//!
//! Each call runs the same pipeline:
//!
//! 1. **Buffer** — append to the bounded channel buffer.
//! 2. **Scan** — extract valid frames, resynchronizing past corruption.
//! 3. **Dispatch** — turn each payload into a response payload (or ignore it).
//! 4. **Encode + transmit** — frame the response and push it to the sink.
//!
//! One engine per device instance; nothing is shared between instances.

use log::{debug, warn};

use crate::config::LinkConfig;
use crate::error::{IngestError, Result};

use super::buffer::IngestBuffer;
use super::dispatch::dispatch;
use super::encoder::encode;
use super::scanner::{ScanReport, scan_and_consume};
use super::sink::TransmitSink;

/// Running totals over the lifetime of an engine.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EngineStats {
    /// Valid frames extracted from the stream.
    pub frames_accepted: u32,
    /// Encoded responses handed to the sink.
    pub responses_sent: u32,
    /// Valid frames whose payload produced no response.
    pub payloads_ignored: u32,
    /// Responses dropped because they did not fit in a frame.
    pub encode_failures: u32,
    /// Bytes discarded while resynchronizing.
    pub bytes_skipped: u32,
}

/// Outcome of one [`LinkEngine::ingest`] call.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct IngestReport {
    /// Input bytes stored in the channel buffer.
    pub accepted: usize,
    /// Valid frames extracted.
    pub frames: usize,
    /// Responses transmitted.
    pub responses: usize,
    /// Bytes discarded while resynchronizing.
    pub skipped: usize,
    /// Bytes left buffered, waiting for the rest of a frame.
    pub pending: usize,
}

impl IngestReport {
    fn absorb(&mut self, scan: &ScanReport) {
        self.frames += scan.frames;
        self.skipped += scan.skipped;
        self.pending = scan.pending;
    }
}

/// Framing engine for one simulated device.
pub struct LinkEngine<S: TransmitSink> {
    config: LinkConfig,
    buffer: IngestBuffer,
    sink: S,
    stats: EngineStats,
}

impl<S: TransmitSink> LinkEngine<S> {
    pub fn new(config: LinkConfig, sink: S) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            config,
            buffer: IngestBuffer::new(),
            sink,
            stats: EngineStats::default(),
        })
    }

    /// Engine answering to the default device id.
    pub fn with_sink(sink: S) -> Self {
        Self {
            config: LinkConfig::default(),
            buffer: IngestBuffer::new(),
            sink,
            stats: EngineStats::default(),
        }
    }

    /// Feed inbound bytes and process every frame they complete.
    ///
    /// Input larger than the free buffer space is taken in pieces, scanning
    /// between pieces to make room. Bytes are only refused, with
    /// [`IngestError::Overflow`], if a scan of a full buffer frees nothing.
    pub fn ingest(&mut self, bytes: &[u8]) -> Result<IngestReport> {
        let mut report = IngestReport::default();
        let sent_before = self.stats.responses_sent;
        let mut rest = bytes;

        loop {
            let accepted = match self.buffer.append(rest) {
                Ok(n) | Err(IngestError::Overflow { accepted: n, .. }) => n,
            };
            rest = &rest[accepted..];
            report.accepted += accepted;

            let scan = self.scan();
            report.absorb(&scan);
            report.responses = (self.stats.responses_sent - sent_before) as usize;

            if rest.is_empty() {
                return Ok(report);
            }
            if scan.consumed == 0 {
                warn!(
                    "ingest: buffer full with {} bytes pending, dropping {} bytes",
                    self.buffer.len(),
                    rest.len()
                );
                return Err(IngestError::Overflow {
                    accepted: report.accepted,
                    dropped: rest.len(),
                }
                .into());
            }
        }
    }

    /// Transmit a single raw byte, unframed.
    ///
    /// Lets a harness confirm the sink is wired up before it starts sending
    /// frames.
    pub fn loopback(&mut self, byte: u8) {
        self.sink.transmit_byte(byte);
    }

    /// Discard any partially received frame.
    pub fn reset(&mut self) {
        if !self.buffer.is_empty() {
            debug!("reset: discarding {} pending bytes", self.buffer.len());
        }
        self.buffer.clear();
    }

    /// Bytes buffered and waiting for the rest of a frame.
    pub fn pending(&self) -> &[u8] {
        self.buffer.as_slice()
    }

    pub fn stats(&self) -> EngineStats {
        self.stats
    }

    pub fn config(&self) -> &LinkConfig {
        &self.config
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }

    pub fn sink_mut(&mut self) -> &mut S {
        &mut self.sink
    }

    pub fn into_sink(self) -> S {
        self.sink
    }

    fn scan(&mut self) -> ScanReport {
        let Self {
            config,
            buffer,
            sink,
            stats,
        } = self;

        let scan = scan_and_consume(buffer, config, |payload| {
            Self::respond(config, sink, stats, payload);
        });
        stats.frames_accepted += scan.frames as u32;
        stats.bytes_skipped += scan.skipped as u32;
        scan
    }

    fn respond(config: &LinkConfig, sink: &mut S, stats: &mut EngineStats, payload: &[u8]) {
        let response = match dispatch(payload) {
            Ok(response) => response,
            Err(reason) => {
                debug!("dispatch: no response, {reason}");
                stats.payloads_ignored += 1;
                return;
            }
        };

        match encode(&response, config.reply_device_id) {
            Ok(frame) => {
                sink.transmit_frame(&frame);
                stats.responses_sent += 1;
            }
            Err(e) => {
                warn!("encode: dropping response, {e}");
                stats.encode_failures += 1;
            }
        }
    }
}
