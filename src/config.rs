//! Engine configuration parameters
//!
//! Addressing and size limits for one link engine instance.
//! Values can be overridden from a JSON file passed to the host binary.

use anyhow::Context;
use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::link::frame::{FRAME_OVERHEAD, MAX_FRAME_SIZE};

/// Identifier the reference device answers to.
pub const DEFAULT_DEVICE_ID: u16 = 0x000A;

/// Core link configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LinkConfig {
    // --- Addressing ---
    /// Inbound frames must carry this device id
    pub device_id: u16,
    /// Device id written into every outbound frame
    pub reply_device_id: u16,

    // --- Limits ---
    /// Largest frame (length byte included) the scanner will accept
    pub max_frame_size: usize,
}

impl Default for LinkConfig {
    fn default() -> Self {
        Self {
            device_id: DEFAULT_DEVICE_ID,
            reply_device_id: DEFAULT_DEVICE_ID,
            max_frame_size: MAX_FRAME_SIZE,
        }
    }
}

impl LinkConfig {
    /// Smallest frame that can be valid: length byte plus an empty payload.
    pub const MIN_FRAME_SIZE: usize = 1 + FRAME_OVERHEAD;

    /// Reject values the wire format cannot express.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(Self::MIN_FRAME_SIZE..=MAX_FRAME_SIZE).contains(&self.max_frame_size) {
            return Err(ConfigError::FrameSizeOutOfRange {
                value: self.max_frame_size,
                min: Self::MIN_FRAME_SIZE,
                max: MAX_FRAME_SIZE,
            });
        }
        Ok(())
    }

    /// Parse and validate a JSON document. Missing fields take defaults.
    pub fn from_json(text: &str) -> anyhow::Result<Self> {
        let config: Self = serde_json::from_str(text)?;
        config.validate().context("invalid link config")?;
        Ok(config)
    }
}
