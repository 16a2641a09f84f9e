//! Integration tests: inbound bytes → LinkEngine → transmission sink.

use sensorlink::link::checksum::xor8;
use sensorlink::link::encoder::encode;
use sensorlink::link::frame::{Candidate, inspect};
use sensorlink::link::sink::FnSink;
use sensorlink::{IngestError, LinkConfig, LinkEngine, TransmitSink};

// ── Mock implementations ──────────────────────────────────────

/// Records every frame the engine hands over, plus any raw bytes.
struct RecordingSink {
    frames: Vec<Vec<u8>>,
    raw: Vec<u8>,
}
impl RecordingSink {
    fn new() -> Self {
        Self {
            frames: Vec::new(),
            raw: Vec::new(),
        }
    }

    /// Payloads of every recorded frame, validated as the harness would.
    fn payloads(&self) -> Vec<Vec<u8>> {
        let config = LinkConfig::default();
        self.frames
            .iter()
            .map(|f| match inspect(f, &config) {
                Candidate::Valid(frame) => {
                    assert_eq!(frame.wire_len(), f.len(), "response frame has trailing bytes");
                    frame.payload.to_vec()
                }
                other => panic!("engine emitted an invalid frame {f:02X?}: {other:?}"),
            })
            .collect()
    }
}
impl TransmitSink for RecordingSink {
    fn transmit_byte(&mut self, byte: u8) {
        self.raw.push(byte);
    }
    fn transmit_frame(&mut self, frame: &[u8]) {
        self.frames.push(frame.to_vec());
    }
}

fn make_engine() -> LinkEngine<RecordingSink> {
    LinkEngine::new(LinkConfig::default(), RecordingSink::new()).unwrap()
}

fn frame(payload: &[u8]) -> Vec<u8> {
    encode(payload, 0x000A).unwrap().to_vec()
}

// ── Reference vector ──────────────────────────────────────────

#[test]
fn reference_ping_is_answered_with_incremented_token() {
    let mut engine = make_engine();
    let report = engine
        .ingest(&[8, 0x97, 0x00, 0x0A, 0x01, 0x05, 0x99, 0x10, 0x10])
        .unwrap();

    assert_eq!(report.frames, 1);
    assert_eq!(report.responses, 1);
    assert_eq!(engine.sink().payloads(), vec![vec![0x01, 0x06, 0x99]]);
    assert_eq!(
        engine.sink().frames[0],
        vec![8, 0x94, 0x00, 0x0A, 0x01, 0x06, 0x99, 0x10, 0x10]
    );
}

// ── Command handling ──────────────────────────────────────────

#[test]
fn unknown_command_is_echoed_with_ff_prefix() {
    let mut engine = make_engine();
    engine.ingest(&frame(&[0x37, 0xAA, 0xBB])).unwrap();
    assert_eq!(engine.sink().payloads(), vec![vec![0xFF, 0x37, 0xAA, 0xBB]]);
}

#[test]
fn ping_without_token_gets_no_response_and_no_resync() {
    let mut engine = make_engine();
    let report = engine.ingest(&frame(&[0x01])).unwrap();
    assert_eq!(report.frames, 1);
    assert_eq!(report.skipped, 0);
    assert_eq!(report.responses, 0);
    assert!(engine.sink().frames.is_empty());
    assert_eq!(engine.stats().payloads_ignored, 1);
}

#[test]
fn empty_payload_is_silently_ignored() {
    let mut engine = make_engine();
    engine.ingest(&frame(&[])).unwrap();
    assert!(engine.sink().frames.is_empty());
    assert!(engine.pending().is_empty());
}

// ── Stream handling ───────────────────────────────────────────

#[test]
fn concatenated_frames_are_answered_in_order() {
    let mut engine = make_engine();
    let mut bytes = frame(&[0x01, 0x10]);
    bytes.extend_from_slice(&frame(&[0x22]));
    bytes.extend_from_slice(&frame(&[0x01, 0x20, 0x07]));

    let report = engine.ingest(&bytes).unwrap();
    assert_eq!(report.responses, 3);
    assert_eq!(
        engine.sink().payloads(),
        vec![vec![0x01, 0x11], vec![0xFF, 0x22], vec![0x01, 0x21, 0x07]]
    );
}

#[test]
fn frame_split_byte_by_byte_is_reassembled() {
    let mut engine = make_engine();
    let bytes = frame(&[0x01, 0x41, 0x00, 0x10]);
    for (i, b) in bytes.iter().enumerate() {
        let report = engine.ingest(&[*b]).unwrap();
        if i + 1 < bytes.len() {
            assert_eq!(report.responses, 0);
            assert_eq!(engine.pending(), &bytes[..=i]);
        }
    }
    assert_eq!(engine.sink().payloads(), vec![vec![0x01, 0x42, 0x00, 0x10]]);
    assert!(engine.pending().is_empty());
}

#[test]
fn input_larger_than_buffer_is_fully_processed() {
    let mut engine = make_engine();
    let one = frame(&[0x01, 0x05, 0x99]);
    let bytes: Vec<u8> = one.iter().copied().cycle().take(one.len() * 100).collect();
    assert!(bytes.len() > 512);

    let report = engine.ingest(&bytes).unwrap();
    assert_eq!(report.accepted, bytes.len());
    assert_eq!(report.responses, 100);
    assert_eq!(engine.stats().frames_accepted, 100);
}

#[test]
fn low_garbage_before_frame_is_skipped() {
    let mut engine = make_engine();
    let mut bytes = vec![0x00, 0x02, 0x04, 0x01, 0x03];
    bytes.extend_from_slice(&frame(&[0x01, 0x05]));
    let report = engine.ingest(&bytes).unwrap();
    assert_eq!(report.skipped, 5);
    assert_eq!(engine.sink().payloads(), vec![vec![0x01, 0x06]]);
}

// ── Corruption & addressing ───────────────────────────────────

#[test]
fn corrupted_checksum_drops_frame_silently() {
    let mut engine = make_engine();
    let mut bytes = frame(&[0x01, 0x05, 0x99]);
    bytes[1] ^= 0x01;

    let report = engine.ingest(&bytes).unwrap();
    assert!(report.skipped >= 1);
    assert_eq!(report.frames, 0);
    assert!(engine.sink().frames.is_empty());
    assert!(engine.sink().raw.is_empty());
}

#[test]
fn foreign_device_id_is_dropped_despite_valid_checksum() {
    let mut engine = make_engine();
    let mut bytes = encode(&[0x01, 0x05], 0x000B).unwrap().to_vec();
    assert_eq!(bytes[1], xor8(&bytes[2..]));

    let report = engine.ingest(&bytes).unwrap();
    assert_eq!(report.frames, 0);
    assert!(engine.sink().frames.is_empty());

    // the same frame re-addressed to us is answered
    bytes[3] = 0x0A;
    bytes[1] = xor8(&bytes[2..]);
    engine.reset();
    engine.ingest(&bytes).unwrap();
    assert_eq!(engine.sink().payloads(), vec![vec![0x01, 0x06]]);
}

#[test]
fn configured_device_id_is_honoured() {
    let config = LinkConfig {
        device_id: 0x0BEE,
        ..LinkConfig::default()
    };
    let mut engine = LinkEngine::new(config, RecordingSink::new()).unwrap();

    engine.ingest(&frame(&[0x01, 0x01])).unwrap();
    assert!(engine.sink().frames.is_empty());

    engine.reset();
    engine
        .ingest(&encode(&[0x01, 0x01], 0x0BEE).unwrap())
        .unwrap();
    // replies still go out under the default reply id
    assert_eq!(engine.sink().payloads(), vec![vec![0x01, 0x02]]);
}

#[test]
fn oversized_response_is_dropped_not_truncated() {
    let mut engine = make_engine();
    let mut payload = vec![0x55; 250];
    payload[0] = 0x02;
    engine.ingest(&frame(&payload)).unwrap();

    assert!(engine.sink().frames.is_empty());
    assert_eq!(engine.stats().encode_failures, 1);

    // the engine keeps going afterwards
    engine.ingest(&frame(&[0x01, 0x00])).unwrap();
    assert_eq!(engine.sink().payloads(), vec![vec![0x01, 0x01]]);
}

// ── Harness wiring ────────────────────────────────────────────

#[test]
fn per_byte_callback_receives_whole_frame_in_order() {
    let mut seen: Vec<u8> = Vec::new();
    {
        let sink = FnSink(|b: u8| seen.push(b));
        let mut engine = LinkEngine::new(LinkConfig::default(), sink).unwrap();
        engine.loopback(100);
        engine.ingest(&frame(&[0x01, 0x05, 0x99])).unwrap();
    }
    let mut expected = vec![100];
    expected.extend_from_slice(&frame(&[0x01, 0x06, 0x99]));
    assert_eq!(seen, expected);
}

#[test]
fn engines_do_not_share_state() {
    let mut a = make_engine();
    let mut b = make_engine();
    let bytes = frame(&[0x01, 0x09]);

    a.ingest(&bytes[..4]).unwrap();
    b.ingest(&bytes).unwrap();
    assert_eq!(a.pending().len(), 4);
    assert!(b.pending().is_empty());
    assert!(a.sink().frames.is_empty());
    assert_eq!(b.sink().frames.len(), 1);
}

#[test]
fn overflow_error_names_dropped_bytes() {
    let e = IngestError::Overflow {
        accepted: 512,
        dropped: 3,
    };
    assert_eq!(
        sensorlink::Error::from(e).to_string(),
        "ingest: buffer full, accepted 512 bytes, dropped 3"
    );
}
