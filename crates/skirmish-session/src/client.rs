//! The per-connection client record and its protocol state.

use std::collections::VecDeque;
use std::net::SocketAddr;

use skirmish_protocol::{LineBuffer, Notice, has_line, take_line};
use skirmish_transport::{ConnectionId, Outbox};

use crate::SessionError;

/// Upper bound on unconsumed input held for one client. Bytes arriving
/// beyond this are dropped.
pub const MAX_PENDING_INPUT: usize = 4096;

// ---------------------------------------------------------------------------
// ClientState
// ---------------------------------------------------------------------------

/// Where a client is in the protocol.
///
/// ```text
/// AwaitingRegistration ──(name)──→ LookingForMatch ──(paired)──→ Acting ⇄ Waiting
///                                        ↑                         │  ↑
///                                        └──────(match ends)───────┘  │
///                                                                  Composing
/// ```
///
/// `Composing` is a detour: the client is typing one line (chat or a mute
/// confirmation) and returns to `resume` when the line is complete.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClientState {
    /// Connected, typing a display name.
    AwaitingRegistration,
    /// Registered and not in a match.
    LookingForMatch,
    /// In a match, and it is this client's turn.
    Acting,
    /// In a match, waiting for the opponent's move.
    Waiting,
    /// Typing one line before returning to `resume`.
    Composing { resume: Resume, purpose: Purpose },
}

/// The state a composing client returns to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resume {
    Acting,
    Waiting,
    LookingForMatch,
}

/// What the line being composed is for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Purpose {
    /// Free text relayed to the opponent.
    Speech,
    /// Confirmation for toggling mute on the opponent.
    Mute,
}

impl From<Resume> for ClientState {
    fn from(resume: Resume) -> Self {
        match resume {
            Resume::Acting => Self::Acting,
            Resume::Waiting => Self::Waiting,
            Resume::LookingForMatch => Self::LookingForMatch,
        }
    }
}

// ---------------------------------------------------------------------------
// Client
// ---------------------------------------------------------------------------

/// One connected client.
///
/// Match fields (`opponent`, `health`, `power_moves`, `muting`) are only
/// meaningful while `opponent` is `Some`; they are reseeded at the start of
/// every match.
#[derive(Debug)]
pub struct Client {
    id: ConnectionId,
    peer: SocketAddr,
    name: Option<String>,

    /// Current protocol state.
    pub state: ClientState,

    /// Accumulates the name or a composed line.
    pub line: LineBuffer,

    /// Bytes received but not yet consumed by a dispatch.
    inbox: VecDeque<u8>,

    /// The stream ended or a write failed. The client is disconnected once
    /// its pending input has been consumed.
    hung_up: bool,

    /// Set on registration so the first matchmaking scan happens without
    /// waiting for further input.
    pub wants_pairing: bool,

    /// The other side of the current match.
    pub opponent: Option<ConnectionId>,

    /// The previous opponent. Only used to avoid an immediate rematch.
    pub last_played: Option<ConnectionId>,

    pub health: i32,
    pub power_moves: u32,

    /// This client refuses chat from its opponent.
    pub muting: bool,

    outbox: Outbox,
}

impl Client {
    /// Creates a client that has just connected.
    pub fn new(
        id: ConnectionId,
        peer: SocketAddr,
        outbox: Outbox,
        line_capacity: usize,
    ) -> Self {
        Self {
            id,
            peer,
            name: None,
            state: ClientState::AwaitingRegistration,
            line: LineBuffer::new(line_capacity),
            inbox: VecDeque::new(),
            hung_up: false,
            wants_pairing: false,
            opponent: None,
            last_played: None,
            health: 0,
            power_moves: 0,
            muting: false,
            outbox,
        }
    }

    pub fn id(&self) -> ConnectionId {
        self.id
    }

    pub fn peer(&self) -> SocketAddr {
        self.peer
    }

    /// The registered name, if any.
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// The name shown to other clients: the registered name, or the peer's
    /// IP address before registration.
    pub fn display_name(&self) -> String {
        match &self.name {
            Some(name) => name.clone(),
            None => self.peer.ip().to_string(),
        }
    }

    /// Binds the display name.
    ///
    /// # Errors
    /// Returns [`SessionError::NameAlreadyBound`] if a name was already set.
    pub fn bind_name(&mut self, name: String) -> Result<(), SessionError> {
        if self.name.is_some() {
            return Err(SessionError::NameAlreadyBound(self.id));
        }
        self.name = Some(name);
        Ok(())
    }

    // -----------------------------------------------------------------------
    // Output
    // -----------------------------------------------------------------------

    /// Sends a notice to this client.
    ///
    /// A failed write marks the client hung up instead of returning an
    /// error, so the next dispatch disconnects it through the normal path.
    pub fn send(&mut self, notice: &Notice) {
        if self.hung_up {
            return;
        }
        if let Err(e) = self.outbox.send(notice) {
            tracing::debug!(id = %self.id, error = %e, "write failed, hanging up");
            self.hung_up = true;
        }
    }

    // -----------------------------------------------------------------------
    // Input
    // -----------------------------------------------------------------------

    /// Queues bytes from the peer, dropping whatever exceeds
    /// [`MAX_PENDING_INPUT`].
    pub fn receive(&mut self, bytes: &[u8]) {
        let room = MAX_PENDING_INPUT.saturating_sub(self.inbox.len());
        let kept = bytes.len().min(room);
        self.inbox.extend(&bytes[..kept]);
        if kept < bytes.len() {
            tracing::debug!(
                id = %self.id,
                dropped = bytes.len() - kept,
                "pending input full, dropping bytes"
            );
        }
    }

    /// Records that the stream ended.
    pub fn hang_up(&mut self) {
        self.hung_up = true;
    }

    pub fn is_hung_up(&self) -> bool {
        self.hung_up
    }

    /// Takes the next pending byte.
    pub fn next_byte(&mut self) -> Option<u8> {
        self.inbox.pop_front()
    }

    /// Takes the next complete line, without its terminator.
    pub fn next_line(&mut self) -> Option<String> {
        take_line(&mut self.inbox, self.line.capacity())
            .map(|bytes| String::from_utf8_lossy(&bytes).into_owned())
    }

    /// Throws away all pending input and returns how many bytes it held.
    pub fn discard_input(&mut self) -> usize {
        let n = self.inbox.len();
        self.inbox.clear();
        n
    }

    pub fn pending_input(&self) -> usize {
        self.inbox.len()
    }

    /// Returns `true` if a dispatch would have something to consume.
    ///
    /// Acting clients consume whole lines, so a partial command is not yet
    /// ready. Every other state consumes whatever is there.
    pub fn is_ready(&self) -> bool {
        if self.hung_up || self.wants_pairing {
            return true;
        }
        match self.state {
            ClientState::Acting => has_line(&self.inbox, self.line.capacity()),
            _ => !self.inbox.is_empty(),
        }
    }

    /// Returns `true` while this client has an opponent.
    pub fn is_matched(&self) -> bool {
        self.opponent.is_some()
    }
}
