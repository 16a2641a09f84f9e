//! Sensorlink library.
//!
//! Control-plane framing engine of a simulated embedded sensor device.
//! A host test harness drives it over an abstract byte channel: inbound
//! bytes go in through [`LinkEngine::ingest`](link::LinkEngine::ingest),
//! framed responses come out through an injected
//! [`TransmitSink`](link::TransmitSink).

#![deny(unused_must_use)]

pub mod adapters;
pub mod config;
pub mod link;

mod error;

pub use config::LinkConfig;
pub use error::{ConfigError, EncodeError, Error, IngestError, Result};
pub use link::{EngineStats, IngestReport, LinkEngine, TransmitSink};
