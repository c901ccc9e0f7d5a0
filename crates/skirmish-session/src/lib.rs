//! Client tracking for Skirmish.
//!
//! This crate owns the server's record of who is connected:
//!
//! 1. **Client** ([`Client`]): one record per open connection: name,
//!    protocol state, pending input, match counters, and the outbox used
//!    to talk to it.
//! 2. **State** ([`ClientState`]): where the client is in the protocol,
//!    including the line-composing detour that remembers where to return.
//! 3. **Registry** ([`Registry`]): the authoritative set of connected
//!    clients, ordered by connection id, plus broadcast.
//!
//! # How it fits in the stack
//!
//! ```text
//! Arena Layer (above)    ← drives state transitions on clients
//!     ↕
//! Session Layer (this crate)
//!     ↕
//! Protocol Layer (below) ← line buffers and notices
//! ```
//!
//! Nothing here is shared between tasks. The registry is owned by the
//! game loop, and clients refer to each other only by [`ConnectionId`].
//!
//! [`ConnectionId`]: skirmish_transport::ConnectionId

mod client;
mod error;
mod registry;

pub use client::{Client, ClientState, MAX_PENDING_INPUT, Purpose, Resume};
pub use error::SessionError;
pub use registry::Registry;
