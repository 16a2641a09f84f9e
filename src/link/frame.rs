//! Frame layout and candidate validation.
//!
//! Wire format:
//! ```text
//! ┌──────────┬──────────┬───────────────┬─────────────┬────────────┐
//! │ Length   │ Checksum │ Device ID     │ Payload     │ 0x10 0x10  │
//! │ 1B       │ 1B       │ 2B big-endian │ N B         │ terminator │
//! └──────────┴──────────┴───────────────┴─────────────┴────────────┘
//! ```
//!
//! `Length` counts every byte after itself, so a frame occupies
//! `1 + Length` bytes. `Checksum` is the XOR of `Device ID ..= terminator`.

use core::fmt;

use crate::config::LinkConfig;

use super::checksum::xor8;

/// Sentinel byte; two in a row close every frame.
pub const TERMINATOR: u8 = 0x10;

pub const CHECKSUM_LEN: usize = 1;
pub const DEVICE_ID_LEN: usize = 2;
pub const TERMINATOR_LEN: usize = 2;

/// Bytes counted by the length field in addition to the payload.
pub const FRAME_OVERHEAD: usize = CHECKSUM_LEN + DEVICE_ID_LEN + TERMINATOR_LEN;

/// Largest frame the one-byte length field can describe (length byte included).
pub const MAX_FRAME_SIZE: usize = 1 + u8::MAX as usize;

/// Largest payload that fits in a single frame.
pub const MAX_PAYLOAD_LEN: usize = u8::MAX as usize - FRAME_OVERHEAD;

/// Offset of the checksum byte within a frame.
pub const CHECKSUM_OFFSET: usize = 1;

/// Offset of the first byte covered by the checksum (device id high byte).
pub const CHECKSUM_SPAN_START: usize = CHECKSUM_OFFSET + CHECKSUM_LEN;

/// Offset of the payload within a frame.
pub const PAYLOAD_OFFSET: usize = CHECKSUM_SPAN_START + DEVICE_ID_LEN;

/// A validated frame borrowed from the channel buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Frame<'a> {
    pub checksum: u8,
    pub device_id: u16,
    pub payload: &'a [u8],
}

impl Frame<'_> {
    /// Bytes this frame occupies on the wire, length byte included.
    pub fn wire_len(&self) -> usize {
        1 + FRAME_OVERHEAD + self.payload.len()
    }
}

/// Why a candidate position was rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Reject {
    /// Frame would extend past the configured maximum frame size.
    Oversize { size: usize },
    /// Length field too small to hold checksum, device id and terminator.
    TooShort { length: u8 },
    /// One or both terminator bytes are wrong.
    BadTerminator,
    /// Transmitted checksum does not match the computed one.
    ChecksumMismatch { expected: u8, computed: u8 },
    /// Frame is addressed to another device.
    WrongDevice { device_id: u16 },
}

impl fmt::Display for Reject {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Oversize { size } => write!(f, "frame of {size} bytes exceeds limit"),
            Self::TooShort { length } => write!(f, "length {length} below frame overhead"),
            Self::BadTerminator => write!(f, "missing terminator"),
            Self::ChecksumMismatch { expected, computed } => {
                write!(f, "checksum 0x{expected:02X} != computed 0x{computed:02X}")
            }
            Self::WrongDevice { device_id } => write!(f, "device id 0x{device_id:04X}"),
        }
    }
}

/// Outcome of inspecting the bytes at a cursor position.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Candidate<'a> {
    /// Plausible frame whose tail has not arrived yet.
    Incomplete { needed: usize, available: usize },
    /// No valid frame starts here.
    Corrupt(Reject),
    /// A complete, addressed, checksum-correct frame.
    Valid(Frame<'a>),
}

/// Inspect `window` (the unconsumed bytes from the cursor onward) for a frame
/// starting at its first byte.
///
/// Checks that depend on the length byte alone run before the completeness
/// check, so an impossible length is rejected without waiting for bytes that
/// could never make it valid.
pub fn inspect<'a>(window: &'a [u8], config: &LinkConfig) -> Candidate<'a> {
    let Some(&length) = window.first() else {
        return Candidate::Incomplete {
            needed: 1,
            available: 0,
        };
    };

    let size = 1 + length as usize;
    if size > config.max_frame_size {
        return Candidate::Corrupt(Reject::Oversize { size });
    }
    if (length as usize) < FRAME_OVERHEAD {
        return Candidate::Corrupt(Reject::TooShort { length });
    }
    if window.len() < size {
        return Candidate::Incomplete {
            needed: size,
            available: window.len(),
        };
    }

    let frame = &window[..size];
    if frame[size - 2] != TERMINATOR || frame[size - 1] != TERMINATOR {
        return Candidate::Corrupt(Reject::BadTerminator);
    }

    let expected = frame[CHECKSUM_OFFSET];
    let computed = xor8(&frame[CHECKSUM_SPAN_START..]);
    if computed != expected {
        return Candidate::Corrupt(Reject::ChecksumMismatch { expected, computed });
    }

    let device_id =
        u16::from_be_bytes([frame[CHECKSUM_SPAN_START], frame[CHECKSUM_SPAN_START + 1]]);
    if device_id != config.device_id {
        return Candidate::Corrupt(Reject::WrongDevice { device_id });
    }

    Candidate::Valid(Frame {
        checksum: expected,
        device_id,
        payload: &frame[PAYLOAD_OFFSET..size - TERMINATOR_LEN],
    })
}
