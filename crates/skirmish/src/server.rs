//! `SkirmishServer` builder and the readiness loop.
//!
//! The loop is the only owner of the [`Arena`]. Each cycle it waits for
//! something to happen (a pending connection, bytes from a client, or the
//! idle timeout), then:
//!
//! 1. accepts at most one new connection,
//! 2. absorbs every inbound event already queued,
//! 3. dispatches each ready client once, in ascending id order,
//!    disconnecting any that report closure.
//!
//! If a client still holds input after a cycle, the next wait does not
//! sleep; it only picks up whatever is immediately available.

use std::net::SocketAddr;
use std::time::Duration;

use futures_util::FutureExt;
use skirmish_arena::{Arena, ArenaConfig, Dice, Dispatch, RandomDice};
use skirmish_transport::{
    Connection, EventReceiver, EventSender, Inbound, TcpConnection,
    TcpTransport, Transport, TransportError,
};
use tokio::sync::mpsc;

use crate::SkirmishError;

/// Port the server listens on unless told otherwise.
pub const DEFAULT_PORT: u16 = 56073;

/// How long the loop waits for activity before logging an idle tick.
pub const DEFAULT_IDLE_TIMEOUT: Duration = Duration::from_secs(10);

// ---------------------------------------------------------------------------
// Builder
// ---------------------------------------------------------------------------

/// Builder for configuring and starting a Skirmish server.
///
/// # Example
///
/// ```rust,ignore
/// let server = SkirmishServer::builder()
///     .bind("127.0.0.1:0")
///     .idle_timeout(Duration::from_secs(5))
///     .seed(42)
///     .build()
///     .await?;
/// let addr = server.local_addr()?;
/// server.run().await
/// ```
#[derive(Debug, Clone)]
pub struct SkirmishServerBuilder {
    bind_addr: String,
    idle_timeout: Duration,
    arena_config: ArenaConfig,
    seed: Option<u64>,
}

impl SkirmishServerBuilder {
    /// Creates a builder listening on every interface at [`DEFAULT_PORT`].
    pub fn new() -> Self {
        Self {
            bind_addr: format!("0.0.0.0:{DEFAULT_PORT}"),
            idle_timeout: DEFAULT_IDLE_TIMEOUT,
            arena_config: ArenaConfig::default(),
            seed: None,
        }
    }

    /// Sets the address to bind the server to.
    pub fn bind(mut self, addr: &str) -> Self {
        self.bind_addr = addr.to_string();
        self
    }

    /// Sets how long the loop may sit without activity before it logs an
    /// idle tick. A zero duration falls back to [`DEFAULT_IDLE_TIMEOUT`].
    pub fn idle_timeout(mut self, timeout: Duration) -> Self {
        self.idle_timeout = timeout;
        self
    }

    /// Sets the match parameters.
    pub fn arena_config(mut self, config: ArenaConfig) -> Self {
        self.arena_config = config;
        self
    }

    /// Seeds the dice so every run plays out the same way.
    pub fn seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Binds the listener and builds the server with [`RandomDice`].
    pub async fn build(self) -> Result<SkirmishServer, SkirmishError> {
        let dice = match self.seed {
            Some(seed) => RandomDice::seeded(seed),
            None => RandomDice::new(),
        };
        self.build_with_dice(dice).await
    }

    /// Binds the listener and builds the server with the given dice.
    ///
    /// # Errors
    /// Returns [`SkirmishError::Transport`] if the address cannot be bound.
    pub async fn build_with_dice<D: Dice>(
        self,
        dice: D,
    ) -> Result<SkirmishServer<D>, SkirmishError> {
        let transport = TcpTransport::bind(&self.bind_addr).await?;

        let idle_timeout = if self.idle_timeout.is_zero() {
            tracing::warn!("idle timeout of zero, using the default");
            DEFAULT_IDLE_TIMEOUT
        } else {
            self.idle_timeout
        };

        let (events_tx, events_rx) = mpsc::unbounded_channel();
        Ok(SkirmishServer {
            transport,
            arena: Arena::new(self.arena_config, dice),
            events_tx,
            events_rx,
            idle_timeout,
        })
    }
}

impl Default for SkirmishServerBuilder {
    fn default() -> Self {
        Self::new()
    }
}

// ---------------------------------------------------------------------------
// Server
// ---------------------------------------------------------------------------

/// What ended a wait.
enum Wake {
    Accepted(TcpConnection),
    AcceptFailed(TransportError),
    Event(Inbound),
    /// The idle timeout elapsed with nothing to do.
    Idle,
    /// Nothing new arrived, but clients still hold unconsumed input.
    Pending,
}

/// A bound Skirmish server.
///
/// Call [`run()`](Self::run) to start serving.
pub struct SkirmishServer<D: Dice = RandomDice> {
    transport: TcpTransport,
    arena: Arena<D>,
    events_tx: EventSender,
    events_rx: EventReceiver,
    idle_timeout: Duration,
}

impl SkirmishServer {
    /// Creates a new builder.
    pub fn builder() -> SkirmishServerBuilder {
        SkirmishServerBuilder::new()
    }
}

impl<D: Dice> SkirmishServer<D> {
    /// Returns the local address the server is bound to.
    pub fn local_addr(&self) -> std::io::Result<SocketAddr> {
        self.transport.local_addr()
    }

    /// Runs the readiness loop until the task is dropped.
    ///
    /// Nothing inside the loop is fatal: failed accepts, stale events and
    /// registry inconsistencies are logged and the loop carries on.
    pub async fn run(mut self) -> Result<(), SkirmishError> {
        tracing::info!(
            addr = ?self.local_addr().ok(),
            idle_timeout = ?self.idle_timeout,
            "Skirmish server running"
        );

        loop {
            let wake = self.wait().await;
            self.cycle(wake);
        }
    }

    async fn wait(&mut self) -> Wake {
        let pending = self.arena.has_ready();
        let idle_timeout = self.idle_timeout;
        let transport = &mut self.transport;
        let events = &mut self.events_rx;

        let next = async move {
            tokio::select! {
                biased;
                accepted = transport.accept() => match accepted {
                    Ok(conn) => Wake::Accepted(conn),
                    Err(e) => Wake::AcceptFailed(e),
                },
                Some(inbound) = events.recv() => Wake::Event(inbound),
            }
        };

        if pending {
            next.now_or_never().unwrap_or(Wake::Pending)
        } else {
            tokio::time::timeout(idle_timeout, next)
                .await
                .unwrap_or(Wake::Idle)
        }
    }

    fn cycle(&mut self, wake: Wake) {
        match wake {
            Wake::Accepted(conn) => self.admit(conn),
            Wake::AcceptFailed(e) => {
                tracing::warn!(error = %e, "accept failed");
            }
            Wake::Event(inbound) => self.arena.feed(inbound),
            Wake::Idle => {
                tracing::info!(
                    clients = self.arena.registry().len(),
                    "no activity for {:?}",
                    self.idle_timeout
                );
                return;
            }
            Wake::Pending => {}
        }

        while let Ok(inbound) = self.events_rx.try_recv() {
            self.arena.feed(inbound);
        }

        for id in self.arena.ready() {
            match self.arena.dispatch(id) {
                Ok(Dispatch::Continue) => {}
                Ok(Dispatch::Closed) => {
                    if let Err(e) = self.arena.disconnect(id) {
                        tracing::warn!(%id, error = %e, "disconnect failed");
                    }
                }
                Err(e) => tracing::warn!(%id, error = %e, "dispatch failed"),
            }
        }
    }

    fn admit(&mut self, conn: TcpConnection) {
        let id = conn.id();
        let peer = conn.peer_addr();
        let outbox = conn.attach(self.events_tx.clone());
        if let Err(e) = self.arena.admit(id, peer, outbox) {
            tracing::warn!(%id, %peer, error = %e, "could not register connection");
        }
    }
}
