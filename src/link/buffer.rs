//! Channel buffer: bounded accumulator of received, not-yet-parsed bytes.

use heapless::Vec;

use crate::error::IngestError;

/// Default channel capacity. Two maximum-size frames fit side by side.
pub const CHANNEL_CAPACITY: usize = 512;

/// Fixed-capacity byte accumulator.
///
/// Bytes enter at the tail via [`append`](Self::append) and leave only from
/// the head via [`consume`](Self::consume), once the scanner has verified or
/// skipped them.
pub struct IngestBuffer<const N: usize = CHANNEL_CAPACITY> {
    bytes: Vec<u8, N>,
}

impl<const N: usize> IngestBuffer<N> {
    pub fn new() -> Self {
        Self { bytes: Vec::new() }
    }

    /// Append as many of `data` as fit, in order.
    ///
    /// Returns the number of bytes stored. If some did not fit, the ones that
    /// did are still stored and the shortfall is reported as
    /// [`IngestError::Overflow`].
    pub fn append(&mut self, data: &[u8]) -> Result<usize, IngestError> {
        let (fits, dropped) = data.split_at(data.len().min(self.remaining()));
        // `fits` never exceeds the free space.
        let _ = self.bytes.extend_from_slice(fits);

        if !dropped.is_empty() {
            return Err(IngestError::Overflow {
                accepted: fits.len(),
                dropped: dropped.len(),
            });
        }
        Ok(fits.len())
    }

    /// Drop the first `n` bytes and shift the rest to offset 0.
    pub fn consume(&mut self, n: usize) {
        let n = n.min(self.bytes.len());
        if n == 0 {
            return;
        }
        let len = self.bytes.len();
        self.bytes.copy_within(n.., 0);
        self.bytes.truncate(len - n);
    }

    pub fn as_slice(&self) -> &[u8] {
        &self.bytes
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    pub const fn capacity(&self) -> usize {
        N
    }

    /// Free space left before appends start overflowing.
    pub fn remaining(&self) -> usize {
        N - self.bytes.len()
    }

    pub fn clear(&mut self) {
        self.bytes.clear();
    }
}

impl<const N: usize> Default for IngestBuffer<N> {
    fn default() -> Self {
        Self::new()
    }
}
