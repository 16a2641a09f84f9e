//! Sensorlink host binary.
//!
//! Harness-side tooling around the framing engine:
//! - `run [--config <file>]` - bridge stdin/stdout to a link engine
//! - `encode <bytes>...` - print the frame a payload encodes to
//! - `checksum <bytes>...` - print the XOR-8 and CRC-16/CCITT of some bytes
//!
//! Byte arguments are decimal or `0x`-prefixed hex. Logs go to stderr so
//! stdout carries nothing but protocol bytes.
#![deny(unused_must_use)]

// ── Imports ───────────────────────────────────────────────────
use std::io::{self, BufWriter, Read};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use log::{debug, info, warn};

use sensorlink::adapters::io_sink::WriterSink;
use sensorlink::adapters::log_sink::LogSink;
use sensorlink::adapters::utils::to_hex;
use sensorlink::config::DEFAULT_DEVICE_ID;
use sensorlink::link::checksum::{crc16_ccitt, xor8};
use sensorlink::link::encoder::encode;
use sensorlink::{LinkConfig, LinkEngine};

/// Inbound read size; small enough to exercise frames split across reads.
const READ_CHUNK: usize = 64;

#[derive(Parser)]
#[command(name = "sensorlink")]
#[command(about = "Framing engine for a simulated sensor device")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Verbose logging (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,
}

#[derive(Subcommand)]
enum Commands {
    /// Feed stdin through the engine and write responses to stdout
    Run {
        /// JSON link configuration (defaults apply to missing fields)
        #[arg(short, long)]
        config: Option<PathBuf>,
    },
    /// Encode a payload into a frame and print it as hex
    Encode {
        /// Device id written into the frame
        #[arg(short, long, default_value_t = DEFAULT_DEVICE_ID, value_parser = parse_u16)]
        device_id: u16,

        /// Payload bytes
        #[arg(value_parser = parse_u8)]
        payload: Vec<u8>,
    },
    /// Print the XOR-8 and CRC-16/CCITT checksums of some bytes
    Checksum {
        #[arg(value_parser = parse_u8)]
        bytes: Vec<u8>,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match cli.command {
        Commands::Run { config } => run(config.as_deref()),
        Commands::Encode { device_id, payload } => {
            let frame = encode(&payload, device_id)?;
            println!("{}", to_hex(&frame));
            Ok(())
        }
        Commands::Checksum { bytes } => {
            println!("{} {}", xor8(&bytes), crc16_ccitt(&bytes));
            Ok(())
        }
    }
}

fn run(config_path: Option<&Path>) -> Result<()> {
    // ── 1. Load config (or defaults) ──────────────────────────
    let config = match config_path {
        Some(path) => {
            let text = std::fs::read_to_string(path)
                .with_context(|| format!("reading config {}", path.display()))?;
            LinkConfig::from_json(&text)?
        }
        None => LinkConfig::default(),
    };
    info!(
        "Sensorlink v{} | device 0x{:04X} | replies as 0x{:04X} | max frame {} B",
        env!("CARGO_PKG_VERSION"),
        config.device_id,
        config.reply_device_id,
        config.max_frame_size
    );

    // ── 2. Wire the engine to stdout ──────────────────────────
    let stdout = BufWriter::new(io::stdout().lock());
    let mut engine = LinkEngine::new(config, LogSink::new(WriterSink::new(stdout)))?;

    // ── 3. Pump stdin until EOF ───────────────────────────────
    let mut stdin = io::stdin().lock();
    let mut chunk = [0u8; READ_CHUNK];
    loop {
        let n = match stdin.read(&mut chunk) {
            Ok(0) => break,
            Ok(n) => n,
            Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
            Err(e) => return Err(e).context("reading stdin"),
        };

        match engine.ingest(&chunk[..n]) {
            Ok(report) => debug!(
                "RX | {} bytes | frames={} responses={} skipped={} pending={}",
                n, report.frames, report.responses, report.skipped, report.pending
            ),
            Err(e) => warn!("RX | {e}"),
        }
        engine
            .sink_mut()
            .inner_mut()
            .flush()
            .context("writing stdout")?;
    }

    // ── 4. Summary ────────────────────────────────────────────
    let stats = engine.stats();
    info!(
        "EOF | frames={} responses={} ignored={} encode_failures={} skipped={} pending={}",
        stats.frames_accepted,
        stats.responses_sent,
        stats.payloads_ignored,
        stats.encode_failures,
        stats.bytes_skipped,
        engine.pending().len()
    );
    Ok(())
}

fn init_logging(verbosity: u8) {
    let level = match verbosity {
        0 => log::LevelFilter::Warn,
        1 => log::LevelFilter::Info,
        2 => log::LevelFilter::Debug,
        _ => log::LevelFilter::Trace,
    };
    env_logger::Builder::new()
        .filter_level(level)
        .target(env_logger::Target::Stderr)
        .init();
}

fn parse_int(s: &str) -> Result<u32, String> {
    let parsed = match s.strip_prefix("0x").or_else(|| s.strip_prefix("0X")) {
        Some(hex) => u32::from_str_radix(hex, 16),
        None => s.parse(),
    };
    parsed.map_err(|e| format!("'{s}': {e}"))
}

fn parse_u8(s: &str) -> Result<u8, String> {
    let v = parse_int(s)?;
    u8::try_from(v).map_err(|_| format!("'{s}' does not fit in a byte"))
}

fn parse_u16(s: &str) -> Result<u16, String> {
    let v = parse_int(s)?;
    u16::try_from(v).map_err(|_| format!("'{s}' does not fit in 16 bits"))
}
