//! Stream transport layer for Skirmish.
//!
//! Provides the [`Transport`] and [`Connection`] traits that sit between the
//! operating system's byte streams and the single-threaded game loop.
//!
//! The game loop never touches a socket directly. Each accepted connection is
//! [attached](Connection::attach): a reader task forwards every chunk of bytes
//! (or the end of the stream) as an [`Inbound`] event onto one shared channel,
//! and a writer task drains the connection's [`Outbox`] into the socket. The
//! loop owns the receiving end of the event channel and is the only place
//! where client state changes.

#![allow(async_fn_in_trait)]

mod error;
mod outbox;
mod tcp;

pub use error::TransportError;
pub use outbox::Outbox;
pub use tcp::{TcpConnection, TcpTransport};

use std::fmt;
use std::net::SocketAddr;

use tokio::sync::mpsc;

/// Opaque identifier for a connection.
///
/// Ids are handed out in increasing order and never reused, so ordering
/// by id is the same as ordering by acceptance time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ConnectionId(u64);

impl ConnectionId {
    /// Creates a new `ConnectionId` from a raw `u64`.
    pub fn new(id: u64) -> Self {
        Self(id)
    }

    /// Returns the underlying `u64` value.
    pub fn into_inner(self) -> u64 {
        self.0
    }
}

impl fmt::Display for ConnectionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "conn-{}", self.0)
    }
}

/// What a reader task observed on its connection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InboundEvent {
    /// Bytes arrived. Never empty.
    Data(Vec<u8>),
    /// The peer closed the stream or the read failed.
    Closed,
}

/// An event from one connection, tagged with its id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Inbound {
    pub id: ConnectionId,
    pub event: InboundEvent,
}

/// Sending half of the shared inbound event channel.
pub type EventSender = mpsc::UnboundedSender<Inbound>;

/// Receiving half of the shared inbound event channel.
pub type EventReceiver = mpsc::UnboundedReceiver<Inbound>;

/// Accepts new incoming connections.
pub trait Transport: Send + 'static {
    /// The connection type produced by this transport.
    type Connection: Connection;
    /// The error type for transport operations.
    type Error: std::error::Error + Send + Sync;

    /// Waits for and accepts the next incoming connection.
    ///
    /// Must be cancel-safe: the game loop races it against other events.
    async fn accept(&mut self) -> Result<Self::Connection, Self::Error>;

    /// Returns the local address the transport is listening on.
    fn local_addr(&self) -> std::io::Result<SocketAddr>;
}

/// A freshly accepted connection, not yet wired into the game loop.
pub trait Connection: Send + 'static {
    /// Returns the unique identifier for this connection.
    fn id(&self) -> ConnectionId;

    /// Returns the remote peer's address.
    fn peer_addr(&self) -> SocketAddr;

    /// Starts the connection's I/O tasks.
    ///
    /// Every received chunk and the final closure are delivered to
    /// `events`. The returned [`Outbox`] is the only way to write to the
    /// peer; dropping it stops both tasks and releases the socket.
    fn attach(self, events: EventSender) -> Outbox;
}
