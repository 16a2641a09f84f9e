//! Byte-stream framing engine.
//!
//! Turns a raw, possibly corrupted inbound byte stream into validated
//! frames, answers each recognized command and frames the answer back.
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────┐
//! │                        Link Engine                           │
//! │                                                              │
//! │  bytes ──▶ ┌─────────┐   ┌─────────┐   ┌──────────────────┐  │
//! │            │ Buffer  │──▶│ Scanner │──▶│ Dispatcher       │  │
//! │            │ (512 B) │   │ (resync)│   │ (ping / unknown) │  │
//! │            └─────────┘   └─────────┘   └──────────────────┘  │
//! │                               │                 │            │
//! │                               ▼                 ▼            │
//! │                          ┌──────────┐    ┌──────────┐        │
//! │                          │ Checksum │    │ Encoder  │──▶ sink│
//! │                          │ (XOR-8)  │    │          │        │
//! │                          └──────────┘    └──────────┘        │
//! └──────────────────────────────────────────────────────────────┘
//! ```

pub mod buffer;
pub mod checksum;
pub mod dispatch;
pub mod encoder;
pub mod engine;
pub mod frame;
pub mod scanner;
pub mod sink;

pub use engine::{EngineStats, IngestReport, LinkEngine};
pub use sink::TransmitSink;
