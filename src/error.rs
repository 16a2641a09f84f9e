//! Unified error types for the sensorlink engine.
//!
//! A single `Error` enum that every subsystem converts into, so the host
//! harness handles failures from ingest, encoding and configuration
//! uniformly. All variants are `Copy`; nothing on the error path allocates.
//!
//! None of these are fatal to the engine: a corrupted stream is recovered
//! by resynchronization and never surfaces here.

use core::fmt;

// ---------------------------------------------------------------------------
// Top-level engine error
// ---------------------------------------------------------------------------

/// Every fallible operation in the crate funnels into this type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Error {
    /// Inbound bytes could not be buffered.
    Ingest(IngestError),
    /// An outbound frame could not be built.
    Encode(EncodeError),
    /// Configuration is invalid.
    Config(ConfigError),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Ingest(e) => write!(f, "ingest: {e}"),
            Self::Encode(e) => write!(f, "encode: {e}"),
            Self::Config(e) => write!(f, "config: {e}"),
        }
    }
}

impl core::error::Error for Error {}

// ---------------------------------------------------------------------------
// Ingest errors
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IngestError {
    /// The channel buffer ran out of room. The first `accepted` bytes of
    /// the offered input were stored; the trailing `dropped` bytes were not.
    Overflow { accepted: usize, dropped: usize },
}

impl fmt::Display for IngestError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Overflow { accepted, dropped } => {
                write!(f, "buffer full, accepted {accepted} bytes, dropped {dropped}")
            }
        }
    }
}

impl core::error::Error for IngestError {}

impl From<IngestError> for Error {
    fn from(e: IngestError) -> Self {
        Self::Ingest(e)
    }
}

// ---------------------------------------------------------------------------
// Encode errors
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EncodeError {
    /// Payload does not fit in a single frame (the length field is one byte).
    PayloadTooLarge { len: usize, max: usize },
}

impl fmt::Display for EncodeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::PayloadTooLarge { len, max } => {
                write!(f, "payload of {len} bytes exceeds frame limit of {max}")
            }
        }
    }
}

impl core::error::Error for EncodeError {}

impl From<EncodeError> for Error {
    fn from(e: EncodeError) -> Self {
        Self::Encode(e)
    }
}

// ---------------------------------------------------------------------------
// Configuration errors
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigError {
    /// `max_frame_size` is outside the range the wire format can express.
    FrameSizeOutOfRange { value: usize, min: usize, max: usize },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::FrameSizeOutOfRange { value, min, max } => {
                write!(f, "max_frame_size {value} not in {min}..={max}")
            }
        }
    }
}

impl core::error::Error for ConfigError {}

impl From<ConfigError> for Error {
    fn from(e: ConfigError) -> Self {
        Self::Config(e)
    }
}

// ---------------------------------------------------------------------------
// Convenience Result alias
// ---------------------------------------------------------------------------

/// Crate-wide `Result` alias.
pub type Result<T> = core::result::Result<T, Error>;
