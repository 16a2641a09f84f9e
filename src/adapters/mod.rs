//! Adapters — concrete implementations of the engine's sink trait.
//!
//! | Adapter    | Implements     | Connects to                    |
//! |------------|----------------|--------------------------------|
//! | `io_sink`  | TransmitSink   | any `std::io::Write` (stdout)  |
//! | `log_sink` | TransmitSink   | `log` output, wraps another    |

pub mod io_sink;
pub mod log_sink;
pub mod utils;
