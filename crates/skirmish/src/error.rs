//! Unified error type for the Skirmish server.

use skirmish_arena::ArenaError;
use skirmish_protocol::ProtocolError;
use skirmish_session::SessionError;
use skirmish_transport::TransportError;

/// Top-level error that wraps all crate-specific errors.
///
/// The `#[from]` attribute on each variant generates the `From` impls, so
/// `?` converts layer errors automatically.
#[derive(Debug, thiserror::Error)]
pub enum SkirmishError {
    /// Binding, accepting, reading or writing a socket.
    #[error(transparent)]
    Transport(#[from] TransportError),

    /// Framing client input.
    #[error(transparent)]
    Protocol(#[from] ProtocolError),

    /// Registry lookups and name binding.
    #[error(transparent)]
    Session(#[from] SessionError),

    /// Game rules.
    #[error(transparent)]
    Arena(#[from] ArenaError),
}
