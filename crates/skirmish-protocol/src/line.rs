//! Line framing: bounded accumulation and whole-line extraction.

use std::collections::VecDeque;

use crate::ProtocolError;

/// Longest line (in bytes) a client may submit. Names and chat lines are
/// truncated to this.
pub const DEFAULT_LINE_CAPACITY: usize = 255;

/// Returns `true` for the bytes that end a line.
pub fn is_terminator(byte: u8) -> bool {
    byte == b'\n' || byte == b'\r'
}

/// Accumulates one line, byte by byte, never growing past its capacity.
#[derive(Debug, Clone)]
pub struct LineBuffer {
    bytes: Vec<u8>,
    capacity: usize,
}

impl LineBuffer {
    /// Creates an empty buffer that holds at most `capacity` bytes.
    pub fn new(capacity: usize) -> Self {
        Self {
            bytes: Vec::with_capacity(capacity),
            capacity,
        }
    }

    /// Appends one byte.
    ///
    /// # Errors
    /// Returns [`ProtocolError::LineOverflow`] when the buffer is full; the
    /// byte is discarded and the buffer is unchanged.
    pub fn push(&mut self, byte: u8) -> Result<(), ProtocolError> {
        if self.bytes.len() >= self.capacity {
            return Err(ProtocolError::LineOverflow {
                capacity: self.capacity,
            });
        }
        self.bytes.push(byte);
        Ok(())
    }

    /// Returns the accumulated line and resets the buffer.
    ///
    /// Invalid UTF-8 (including a multi-byte character cut by truncation)
    /// is replaced rather than rejected.
    pub fn take(&mut self) -> String {
        let line = String::from_utf8_lossy(&self.bytes).into_owned();
        self.bytes.clear();
        line
    }

    /// Discards the accumulated bytes.
    pub fn clear(&mut self) {
        self.bytes.clear();
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }
}

/// Returns `true` if [`take_line`] would yield a line.
pub fn has_line(inbox: &VecDeque<u8>, capacity: usize) -> bool {
    inbox.len() > capacity || inbox.iter().copied().any(is_terminator)
}

/// Removes one whole line from the front of `inbox`.
///
/// The terminator is consumed but not returned. A line longer than
/// `capacity` is cut at `capacity`; the remainder of that line is dropped
/// with its terminator. If there is no terminator yet but more than
/// `capacity` bytes are waiting, the first `capacity` bytes are returned
/// so a runaway client cannot wedge the buffer.
///
/// Returns `None` when no complete line is available.
pub fn take_line(
    inbox: &mut VecDeque<u8>,
    capacity: usize,
) -> Option<Vec<u8>> {
    match inbox.iter().position(|b| is_terminator(*b)) {
        Some(end) => {
            let mut line: Vec<u8> = inbox.drain(..=end).collect();
            line.pop();
            line.truncate(capacity);
            Some(line)
        }
        None if inbox.len() > capacity => {
            Some(inbox.drain(..capacity).collect())
        }
        None => None,
    }
}
