//! TCP transport: one persistent byte stream per client.

use std::net::SocketAddr;
use std::sync::atomic::{AtomicU64, Ordering};

use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::tcp::{OwnedReadHalf, OwnedWriteHalf};
use tokio::net::{TcpListener, TcpStream};
use tokio::sync::mpsc;

use crate::{
    Connection, ConnectionId, EventSender, Inbound, InboundEvent, Outbox,
    Transport, TransportError,
};

/// Counter for generating unique connection IDs.
static NEXT_CONNECTION_ID: AtomicU64 = AtomicU64::new(1);

/// Size of a single read from the socket.
const READ_CHUNK: usize = 512;

/// A TCP [`Transport`] that listens for incoming connections.
pub struct TcpTransport {
    listener: TcpListener,
}

impl TcpTransport {
    /// Binds a new TCP transport to the given address.
    pub async fn bind(addr: &str) -> Result<Self, TransportError> {
        let listener = TcpListener::bind(addr).await.map_err(|source| {
            TransportError::BindFailed {
                addr: addr.to_string(),
                source,
            }
        })?;
        tracing::info!(addr, "TCP transport listening");
        Ok(Self { listener })
    }
}

impl Transport for TcpTransport {
    type Connection = TcpConnection;
    type Error = TransportError;

    async fn accept(&mut self) -> Result<Self::Connection, Self::Error> {
        let (stream, peer) = self
            .listener
            .accept()
            .await
            .map_err(TransportError::AcceptFailed)?;

        let id = ConnectionId::new(
            NEXT_CONNECTION_ID.fetch_add(1, Ordering::Relaxed),
        );
        tracing::debug!(%id, %peer, "accepted TCP connection");

        Ok(TcpConnection { id, peer, stream })
    }

    fn local_addr(&self) -> std::io::Result<SocketAddr> {
        self.listener.local_addr()
    }
}

/// A single accepted TCP connection.
pub struct TcpConnection {
    id: ConnectionId,
    peer: SocketAddr,
    stream: TcpStream,
}

impl Connection for TcpConnection {
    fn id(&self) -> ConnectionId {
        self.id
    }

    fn peer_addr(&self) -> SocketAddr {
        self.peer
    }

    fn attach(self, events: EventSender) -> Outbox {
        let (read_half, write_half) = self.stream.into_split();
        let (tx, rx) = mpsc::unbounded_channel();

        let reader = tokio::spawn(read_loop(self.id, read_half, events));
        tokio::spawn(write_loop(self.id, write_half, rx));

        Outbox::new(tx, reader.abort_handle())
    }
}

/// Forwards everything the peer sends, then exactly one `Closed`.
async fn read_loop(
    id: ConnectionId,
    mut read_half: OwnedReadHalf,
    events: EventSender,
) {
    let mut buf = [0u8; READ_CHUNK];
    loop {
        let event = match read_half.read(&mut buf).await {
            Ok(0) => InboundEvent::Closed,
            Ok(n) => InboundEvent::Data(buf[..n].to_vec()),
            Err(e) => {
                let e = TransportError::ReceiveFailed(e);
                tracing::debug!(%id, error = %e, "read failed");
                InboundEvent::Closed
            }
        };
        let closed = event == InboundEvent::Closed;
        if events.send(Inbound { id, event }).is_err() || closed {
            break;
        }
    }
}

/// Writes queued bytes until the outbox is dropped or the socket fails.
async fn write_loop(
    id: ConnectionId,
    mut write_half: OwnedWriteHalf,
    mut rx: mpsc::UnboundedReceiver<Vec<u8>>,
) {
    while let Some(data) = rx.recv().await {
        if let Err(e) = write_half.write_all(&data).await {
            let e = TransportError::SendFailed(e);
            tracing::debug!(%id, error = %e, "write failed");
            break;
        }
    }
    // Dropping the write half sends FIN to the peer.
}
