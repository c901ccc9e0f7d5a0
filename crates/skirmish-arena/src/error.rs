//! Error types for the game rules.

use skirmish_session::SessionError;
use skirmish_transport::ConnectionId;

/// Errors that can occur while applying a client's input.
///
/// None of these are fatal to the server. The loop logs them and moves on
/// to the next client.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ArenaError {
    /// A registry lookup failed.
    #[error(transparent)]
    Session(#[from] SessionError),

    /// A match operation was attempted on a client without an opponent.
    #[error("{0} is not in a match")]
    NotInMatch(ConnectionId),
}
