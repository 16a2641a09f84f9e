//! Frame scanner: walks the channel buffer, hands out valid payloads and
//! resynchronizes past anything else one byte at a time.

use log::{debug, trace};

use crate::config::LinkConfig;

use super::buffer::IngestBuffer;
use super::frame::{self, Candidate};

/// What one scan pass did to the channel buffer.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ScanReport {
    /// Valid frames handed to the payload callback.
    pub frames: usize,
    /// Bytes discarded while resynchronizing.
    pub skipped: usize,
    /// Bytes removed from the head of the buffer (frames plus skipped).
    pub consumed: usize,
    /// Bytes left in the buffer, waiting for the rest of a frame.
    pub pending: usize,
}

/// Extract every complete frame from `buffer`, calling `on_payload` for each
/// valid one in arrival order, then drop the scanned prefix.
///
/// Each step either extracts a whole frame or advances the cursor by exactly
/// one byte, so a pass terminates after at most `buffer.len()` steps. The
/// cursor stops at the first position holding a plausible but incomplete
/// frame; those bytes stay buffered for the next pass.
pub fn scan_and_consume<const N: usize>(
    buffer: &mut IngestBuffer<N>,
    config: &LinkConfig,
    mut on_payload: impl FnMut(&[u8]),
) -> ScanReport {
    let mut report = ScanReport::default();
    let data = buffer.as_slice();
    let mut cursor = 0;

    while cursor < data.len() {
        match frame::inspect(&data[cursor..], config) {
            Candidate::Incomplete { needed, available } => {
                trace!("scan: waiting at {cursor}, have {available}/{needed} bytes");
                break;
            }
            Candidate::Corrupt(reject) => {
                trace!("scan: skip byte 0x{:02X} at {cursor}: {reject}", data[cursor]);
                report.skipped += 1;
                cursor += 1;
            }
            Candidate::Valid(frame) => {
                debug!(
                    "scan: frame at {cursor}, device 0x{:04X}, {} payload bytes",
                    frame.device_id,
                    frame.payload.len()
                );
                on_payload(frame.payload);
                report.frames += 1;
                cursor += frame.wire_len();
            }
        }
    }

    buffer.consume(cursor);
    report.consumed = cursor;
    report.pending = buffer.len();
    report
}
