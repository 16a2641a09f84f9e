//! Response encoder — wraps a response payload into an outbound frame.

use heapless::Vec;

use crate::error::EncodeError;

use super::checksum::xor8;
use super::frame::{
    CHECKSUM_OFFSET, CHECKSUM_SPAN_START, FRAME_OVERHEAD, MAX_FRAME_SIZE, MAX_PAYLOAD_LEN,
    TERMINATOR,
};

/// Encoded frame, ready for the transmission sink.
pub type OutFrame = Vec<u8, MAX_FRAME_SIZE>;

/// Encode `payload` as `[length][checksum][id_hi][id_lo][payload..][0x10][0x10]`.
///
/// Payloads longer than [`MAX_PAYLOAD_LEN`] are refused: their length would
/// not fit the one-byte length field.
pub fn encode(payload: &[u8], device_id: u16) -> Result<OutFrame, EncodeError> {
    let too_large = EncodeError::PayloadTooLarge {
        len: payload.len(),
        max: MAX_PAYLOAD_LEN,
    };
    if payload.len() > MAX_PAYLOAD_LEN {
        return Err(too_large);
    }

    let length = (FRAME_OVERHEAD + payload.len()) as u8;
    let [id_hi, id_lo] = device_id.to_be_bytes();

    let mut out = OutFrame::new();
    out.extend_from_slice(&[length, 0x00, id_hi, id_lo])
        .map_err(|()| too_large)?;
    out.extend_from_slice(payload).map_err(|()| too_large)?;
    out.extend_from_slice(&[TERMINATOR, TERMINATOR])
        .map_err(|()| too_large)?;

    out[CHECKSUM_OFFSET] = xor8(&out[CHECKSUM_SPAN_START..]);
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn encodes_reference_ping() {
        let frame = encode(&[0x01, 0x05, 0x99], 0x000A).unwrap();
        assert_eq!(
            frame.as_slice(),
            &[8, 0x97, 0x00, 0x0A, 0x01, 0x05, 0x99, 0x10, 0x10]
        );
    }

    #[test]
    fn encodes_empty_payload() {
        let frame = encode(&[], 0x000A).unwrap();
        // 0x00 ^ 0x0A ^ 0x10 ^ 0x10
        assert_eq!(frame.as_slice(), &[5, 0x0A, 0x00, 0x0A, 0x10, 0x10]);
    }

    #[test]
    fn device_id_is_big_endian() {
        let frame = encode(&[0x42], 0x1234).unwrap();
        assert_eq!(&frame[2..4], &[0x12, 0x34]);
    }

    #[test]
    fn largest_payload_fills_frame() {
        let payload = [0xAB; MAX_PAYLOAD_LEN];
        let frame = encode(&payload, 0x000A).unwrap();
        assert_eq!(frame.len(), MAX_FRAME_SIZE);
        assert_eq!(frame[0], 0xFF);
    }

    #[test]
    fn oversized_payload_is_rejected() {
        let payload = [0xAB; MAX_PAYLOAD_LEN + 1];
        assert_eq!(
            encode(&payload, 0x000A),
            Err(EncodeError::PayloadTooLarge { len: 251, max: 250 })
        );
    }
}
