//! Error types for the protocol layer.

/// Errors that can occur while framing client input.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ProtocolError {
    /// A line grew past the buffer's capacity. The extra byte was dropped.
    #[error("line exceeds {capacity} bytes")]
    LineOverflow { capacity: usize },
}
