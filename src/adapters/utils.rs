//! Shared utilities for adapter-layer formatting.

use core::fmt::Write;

/// Render `bytes` as space-separated upper-case hex pairs.
pub fn to_hex(bytes: &[u8]) -> String {
    let mut out = String::with_capacity(bytes.len() * 3);
    for (i, b) in bytes.iter().enumerate() {
        if i > 0 {
            out.push(' ');
        }
        let _ = write!(out, "{b:02X}");
    }
    out
}
