//! Wire protocol for Skirmish.
//!
//! The protocol is plain text over a byte stream, one line at a time:
//!
//! - **Lines** ([`LineBuffer`], [`take_line`]): how bytes become lines.
//!   Either `\n` or `\r` ends a line; the terminator is never echoed.
//! - **Commands** ([`Command`]): the single-letter alphabet a player
//!   uses on their turn.
//! - **Notices** ([`Notice`]): every message the server can send, with
//!   its exact text.
//! - **Errors** ([`ProtocolError`]): what can go wrong while framing.
//!
//! # Architecture
//!
//! ```text
//! Transport (bytes) → Protocol (lines, commands, notices) → Session (clients)
//! ```

mod command;
mod error;
mod line;
mod notice;

pub use command::Command;
pub use error::ProtocolError;
pub use line::{
    DEFAULT_LINE_CAPACITY, LineBuffer, has_line, is_terminator, take_line,
};
pub use notice::Notice;
