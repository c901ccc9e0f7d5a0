//! Error types for the session layer.

use skirmish_transport::ConnectionId;

/// Errors that can occur while tracking clients.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SessionError {
    /// No client is registered under this id. Usually a connection that
    /// was already removed.
    #[error("no client registered for {0}")]
    NotFound(ConnectionId),

    /// A client with this id is already registered.
    #[error("client {0} is already registered")]
    Duplicate(ConnectionId),

    /// The client already has a display name; names are bound once.
    #[error("client {0} already has a name")]
    NameAlreadyBound(ConnectionId),
}
