//! Admitting new connections and tearing down closed ones.

use std::net::SocketAddr;

use skirmish_protocol::Notice;
use skirmish_session::{Client, SessionError};
use skirmish_transport::{ConnectionId, Outbox};

use crate::{Arena, ArenaError, Dice};

impl<D: Dice> Arena<D> {
    /// Registers a freshly accepted connection and asks for its name.
    ///
    /// # Errors
    /// Returns [`SessionError::Duplicate`] (wrapped) if `id` is already
    /// registered. The outbox is dropped, which closes that connection.
    pub fn admit(
        &mut self,
        id: ConnectionId,
        peer: SocketAddr,
        outbox: Outbox,
    ) -> Result<(), ArenaError> {
        let mut client = Client::new(id, peer, outbox, self.config.line_capacity);
        client.send(&Notice::Prompt);
        self.registry.insert(client)?;
        tracing::info!(%id, %peer, clients = self.registry.len(), "client connected");
        Ok(())
    }

    /// Removes a client whose stream has closed.
    ///
    /// If it was in a match, the opponent is told, returned to the queue,
    /// and both remember each other as the last opponent. Everyone still
    /// connected then gets a farewell.
    ///
    /// # Errors
    /// Returns [`SessionError::NotFound`] (wrapped) for an unknown id.
    /// Nothing is changed in that case.
    pub fn disconnect(&mut self, id: ConnectionId) -> Result<(), ArenaError> {
        let client = self
            .registry
            .get(id)
            .ok_or(SessionError::NotFound(id))?;
        let who = client.display_name();
        let opponent = client.opponent;

        if let Some(opponent) = opponent {
            if let Err(e) = self.abandon(id, opponent) {
                tracing::warn!(%id, %opponent, error = %e, "opponent missing during disconnect");
            }
        }

        let client = self.registry.remove(id)?;
        tracing::info!(
            %id,
            peer = %client.peer(),
            who = %who,
            clients = self.registry.len(),
            "client disconnected"
        );
        drop(client);

        self.registry.broadcast(&Notice::Farewell { who });
        Ok(())
    }

    /// `leaver` is going away mid-match: end the match and tell `survivor`.
    fn abandon(
        &mut self,
        leaver: ConnectionId,
        survivor: ConnectionId,
    ) -> Result<(), ArenaError> {
        self.dissolve(leaver, survivor)?;
        let name = self.client_mut(leaver)?.display_name();
        let client = self.client_mut(survivor)?;
        client.send(&Notice::OpponentLeft { name });
        client.send(&Notice::AwaitingOpponent);
        client.send(&Notice::FindNewMatch);
        tracing::info!(%leaver, %survivor, "match abandoned");
        Ok(())
    }
}
