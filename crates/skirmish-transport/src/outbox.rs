//! Write handle for one connection.

use tokio::sync::mpsc;
use tokio::task::AbortHandle;

use crate::TransportError;

/// Queue of bytes waiting to be written to one peer.
///
/// Sending never blocks: the bytes are handed to the connection's writer
/// task. Once that task has stopped (the socket failed or was closed),
/// every send returns [`TransportError::ConnectionClosed`].
///
/// Dropping the outbox closes the queue, which ends the writer task, and
/// aborts the reader task, so the socket is released on both halves.
#[derive(Debug)]
pub struct Outbox {
    tx: mpsc::UnboundedSender<Vec<u8>>,
    reader: Option<AbortHandle>,
}

impl Outbox {
    pub(crate) fn new(
        tx: mpsc::UnboundedSender<Vec<u8>>,
        reader: AbortHandle,
    ) -> Self {
        Self {
            tx,
            reader: Some(reader),
        }
    }

    /// Creates an outbox that is not backed by a socket.
    ///
    /// Everything sent can be read back from the returned receiver. Used
    /// by tests and by anything that wants to drive the game without a
    /// network.
    pub fn channel() -> (Self, mpsc::UnboundedReceiver<Vec<u8>>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (Self { tx, reader: None }, rx)
    }

    /// Queues `data` for delivery to the peer.
    pub fn send(&self, data: impl Into<Vec<u8>>) -> Result<(), TransportError> {
        self.tx.send(data.into()).map_err(|_| {
            TransportError::ConnectionClosed("writer stopped".into())
        })
    }
}

impl Drop for Outbox {
    fn drop(&mut self) {
        if let Some(reader) = self.reader.take() {
            reader.abort();
        }
    }
}
