//! The arena and its per-client protocol state machine.
//!
//! Every call to [`Arena::dispatch`] consumes one input unit for one
//! client and makes at most one state transition:
//!
//! | State                | Unit consumed       | On completion                 |
//! |----------------------|---------------------|-------------------------------|
//! | AwaitingRegistration | one byte            | bind name, broadcast arrival  |
//! | LookingForMatch      | all pending input   | try to pair                   |
//! | Acting               | one whole line      | resolve the command           |
//! | Waiting              | all pending input   | discarded                     |
//! | Composing            | one byte            | finish the line, resume       |
//!
//! A client whose stream has ended is reported as [`Dispatch::Closed`]
//! once its remaining input has been consumed; the caller then
//! disconnects it.

use skirmish_protocol::{Command, Notice, is_terminator};
use skirmish_session::{
    Client, ClientState, Purpose, Registry, Resume, SessionError,
};
use skirmish_transport::{ConnectionId, Inbound, InboundEvent};

use crate::{ArenaConfig, ArenaError, Dice, RandomDice};

/// Result of dispatching one client.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dispatch {
    /// The client stays connected.
    Continue,
    /// The client's stream is done. Call [`Arena::disconnect`].
    Closed,
}

/// All connected clients and the rules that drive them.
pub struct Arena<D: Dice = RandomDice> {
    pub(crate) registry: Registry,
    pub(crate) dice: D,
    pub(crate) config: ArenaConfig,
}

impl<D: Dice> Arena<D> {
    /// Creates an empty arena. The config is [validated] first.
    ///
    /// [validated]: ArenaConfig::validated
    pub fn new(config: ArenaConfig, dice: D) -> Self {
        Self {
            registry: Registry::new(),
            dice,
            config: config.validated(),
        }
    }

    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    pub fn config(&self) -> &ArenaConfig {
        &self.config
    }

    /// Hands a transport event to its client.
    ///
    /// Events for connections that are no longer registered are dropped;
    /// a reader can still deliver after its client was removed.
    pub fn feed(&mut self, inbound: Inbound) {
        let Some(client) = self.registry.get_mut(inbound.id) else {
            tracing::debug!(id = %inbound.id, "event for unregistered connection dropped");
            return;
        };
        match inbound.event {
            InboundEvent::Data(bytes) => client.receive(&bytes),
            InboundEvent::Closed => client.hang_up(),
        }
    }

    /// Ids of every client a dispatch would make progress on, ascending.
    pub fn ready(&self) -> Vec<ConnectionId> {
        self.registry
            .iter()
            .filter(|c| c.is_ready())
            .map(Client::id)
            .collect()
    }

    /// Returns `true` if any client is ready.
    pub fn has_ready(&self) -> bool {
        self.registry.iter().any(Client::is_ready)
    }

    /// Consumes one input unit for `id` and applies it.
    ///
    /// # Errors
    /// Returns [`ArenaError`] if the client, or the opponent it refers
    /// to, is not registered. The client is left as it was before the
    /// failing step.
    pub fn dispatch(&mut self, id: ConnectionId) -> Result<Dispatch, ArenaError> {
        let client = self.client_mut(id)?;
        if !client.is_ready() {
            return Ok(Dispatch::Continue);
        }
        let state = client.state;
        match state {
            ClientState::AwaitingRegistration => self.register_step(id),
            ClientState::LookingForMatch => self.seek(id),
            ClientState::Acting => self.act(id),
            ClientState::Waiting => self.idle(id),
            ClientState::Composing { resume, purpose } => {
                self.compose_step(id, resume, purpose)
            }
        }
    }

    // -----------------------------------------------------------------------
    // State handlers
    // -----------------------------------------------------------------------

    fn register_step(&mut self, id: ConnectionId) -> Result<Dispatch, ArenaError> {
        let client = self.client_mut(id)?;
        let Some(byte) = client.next_byte() else {
            return Ok(closed_if_hung_up(client));
        };
        if !is_terminator(byte) {
            if let Err(e) = client.line.push(byte) {
                tracing::debug!(%id, error = %e, "name truncated");
            }
            return Ok(Dispatch::Continue);
        }
        if client.line.is_empty() {
            return Ok(Dispatch::Continue);
        }

        let name = client.line.take();
        client.bind_name(name.clone())?;
        client.state = ClientState::LookingForMatch;
        client.wants_pairing = true;
        tracing::info!(%id, name = %name, "client registered");

        self.registry.broadcast(&Notice::Joined { name: name.clone() });
        self.client_mut(id)?.send(&Notice::Welcome { name });
        Ok(Dispatch::Continue)
    }

    fn seek(&mut self, id: ConnectionId) -> Result<Dispatch, ArenaError> {
        let client = self.client_mut(id)?;
        client.discard_input();
        client.wants_pairing = false;
        if client.is_hung_up() {
            return Ok(Dispatch::Closed);
        }
        self.pair(id)?;
        Ok(Dispatch::Continue)
    }

    fn act(&mut self, id: ConnectionId) -> Result<Dispatch, ArenaError> {
        let client = self.client_mut(id)?;
        let Some(line) = client.next_line() else {
            return Ok(closed_if_hung_up(client));
        };
        let Some(command) = Command::parse(&line) else {
            return Ok(Dispatch::Continue);
        };
        tracing::debug!(%id, %command, "command received");
        self.resolve(id, command)?;
        Ok(Dispatch::Continue)
    }

    fn idle(&mut self, id: ConnectionId) -> Result<Dispatch, ArenaError> {
        let client = self.client_mut(id)?;
        let discarded = client.discard_input();
        if discarded > 0 {
            tracing::debug!(%id, bytes = discarded, "out-of-turn input discarded");
        }
        Ok(closed_if_hung_up(client))
    }

    fn compose_step(
        &mut self,
        id: ConnectionId,
        resume: Resume,
        purpose: Purpose,
    ) -> Result<Dispatch, ArenaError> {
        let client = self.client_mut(id)?;
        let Some(byte) = client.next_byte() else {
            return Ok(closed_if_hung_up(client));
        };
        if !is_terminator(byte) {
            if let Err(e) = client.line.push(byte) {
                tracing::debug!(%id, error = %e, "line truncated");
            }
            return Ok(Dispatch::Continue);
        }
        if client.line.is_empty() {
            return Ok(Dispatch::Continue);
        }
        let text = client.line.take();
        self.finish_line(id, text, resume, purpose)?;
        Ok(Dispatch::Continue)
    }

    // -----------------------------------------------------------------------
    // Lookups shared by the rule modules
    // -----------------------------------------------------------------------

    pub(crate) fn client_mut(
        &mut self,
        id: ConnectionId,
    ) -> Result<&mut Client, ArenaError> {
        Ok(self
            .registry
            .get_mut(id)
            .ok_or(SessionError::NotFound(id))?)
    }

    /// Both sides of a match, in the order asked.
    pub(crate) fn both_mut(
        &mut self,
        a: ConnectionId,
        b: ConnectionId,
    ) -> Result<(&mut Client, &mut Client), ArenaError> {
        if !self.registry.contains(b) {
            return Err(SessionError::NotFound(b).into());
        }
        self.registry
            .pair_mut(a, b)
            .ok_or(ArenaError::Session(SessionError::NotFound(a)))
    }

    pub(crate) fn opponent_of(
        &self,
        id: ConnectionId,
    ) -> Result<ConnectionId, ArenaError> {
        let client = self
            .registry
            .get(id)
            .ok_or(SessionError::NotFound(id))?;
        client.opponent.ok_or(ArenaError::NotInMatch(id))
    }
}

fn closed_if_hung_up(client: &Client) -> Dispatch {
    if client.is_hung_up() {
        Dispatch::Closed
    } else {
        Dispatch::Continue
    }
}
