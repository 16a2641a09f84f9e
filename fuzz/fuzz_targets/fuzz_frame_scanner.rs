//! Fuzz target: `LinkEngine::ingest`
//!
//! Drives arbitrary byte sequences through buffering, scanning and dispatch.
//! The engine must never panic, never refuse input and never keep more than
//! one partial frame buffered.
//!
//! cargo fuzz run fuzz_frame_scanner

#![no_main]

use libfuzzer_sys::fuzz_target;
use sensorlink::LinkEngine;
use sensorlink::link::sink::NullSink;

fuzz_target!(|data: &[u8]| {
    let mut engine = LinkEngine::with_sink(NullSink);

    let report = engine.ingest(data).expect("ingest must never overflow");
    assert_eq!(report.accepted, data.len());
    assert!(engine.pending().len() < 256, "stale partial frame too large");

    // Same bytes, one at a time, must produce the same frame count.
    let mut trickle = LinkEngine::with_sink(NullSink);
    for byte in data {
        let _ = trickle.ingest(core::slice::from_ref(byte));
    }
    assert_eq!(trickle.stats().frames_accepted, engine.stats().frames_accepted);
});
