//! Command dispatcher — maps a decoded payload to a response payload.
//!
//! | First byte | Command | Response payload                 |
//! |------------|---------|----------------------------------|
//! | `0x01`     | Ping    | `[0x01, token + 1, rest...]`     |
//! | other      | Unknown | `[0xFF, original payload...]`    |
//!
//! Payloads that carry no command, or a ping without its token, get no
//! response. The frame around them was valid, so they are not treated as
//! stream corruption.

use core::fmt;

use heapless::Vec;

use super::frame::MAX_FRAME_SIZE;

pub const CMD_PING: u8 = 0x01;

/// Command byte of every reply to an unrecognized command.
pub const CMD_UNKNOWN_REPLY: u8 = 0xFF;

/// Response payload. Sized for any inbound payload plus the unknown-command
/// prefix; the encoder decides whether it still fits in a frame.
pub type Response = Vec<u8, MAX_FRAME_SIZE>;

/// Command decoded from the first payload byte.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Ping { token: u8 },
    Unknown(u8),
}

/// Why a payload produced no response.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Ignored {
    /// Payload has no command byte.
    Empty,
    /// Ping without the token byte.
    MissingToken,
    /// Payload too long to build any response from.
    TooLong { len: usize },
}

impl fmt::Display for Ignored {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty => write!(f, "empty payload"),
            Self::MissingToken => write!(f, "ping without token"),
            Self::TooLong { len } => write!(f, "payload of {len} bytes too long"),
        }
    }
}

impl Command {
    pub fn parse(payload: &[u8]) -> Result<Self, Ignored> {
        match payload {
            [] => Err(Ignored::Empty),
            [CMD_PING] => Err(Ignored::MissingToken),
            [CMD_PING, token, ..] => Ok(Self::Ping { token: *token }),
            [code, ..] => Ok(Self::Unknown(*code)),
        }
    }
}

/// Build the response payload for `payload`.
pub fn dispatch(payload: &[u8]) -> Result<Response, Ignored> {
    let too_long = Ignored::TooLong { len: payload.len() };
    let mut response = Response::new();

    match Command::parse(payload)? {
        Command::Ping { token } => {
            response
                .extend_from_slice(&[CMD_PING, token.wrapping_add(1)])
                .map_err(|()| too_long)?;
            response
                .extend_from_slice(&payload[2..])
                .map_err(|()| too_long)?;
        }
        Command::Unknown(_) => {
            response.push(CMD_UNKNOWN_REPLY).map_err(|_| too_long)?;
            response.extend_from_slice(payload).map_err(|()| too_long)?;
        }
    }
    Ok(response)
}
