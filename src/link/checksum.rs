//! Integrity checks.
//!
//! The wire format only uses [`xor8`]. [`crc16_ccitt`] is kept for harness
//! tooling that cross-checks captured traffic against the 16-bit variant.

/// Running XOR of every byte, starting from zero.
pub fn xor8(bytes: &[u8]) -> u8 {
    bytes.iter().fold(0, |acc, b| acc ^ b)
}

/// CRC-16/CCITT: polynomial 0x1021, init 0xFFFF, MSB first, no reflection,
/// result bit-inverted. Empty input yields 0.
pub fn crc16_ccitt(bytes: &[u8]) -> u16 {
    const POLY: u16 = 0x1021;

    if bytes.is_empty() {
        return 0;
    }

    let mut crc: u16 = 0xFFFF;
    for &byte in bytes {
        crc ^= u16::from(byte) << 8;
        for _ in 0..8 {
            crc = if crc & 0x8000 != 0 {
                (crc << 1) ^ POLY
            } else {
                crc << 1
            };
        }
    }
    !crc
}
