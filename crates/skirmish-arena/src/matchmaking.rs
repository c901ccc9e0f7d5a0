//! Matchmaking: pairing idle clients and opening a match.

use skirmish_protocol::Notice;
use skirmish_session::{Client, ClientState, SessionError};
use skirmish_transport::ConnectionId;

use crate::{Arena, ArenaError, Dice};

impl<D: Dice> Arena<D> {
    /// Looks for an opponent for `id` and starts a match if one is found.
    ///
    /// Scans the registry once, in id order, for the first other client
    /// that is looking for a match, still connected, and not the one `id`
    /// just played. The client found by the scan has been waiting longer,
    /// so it takes the first turn; `id` waits.
    ///
    /// Returns the opponent's id, or `None` if nobody is available. No
    /// match is not an error; the client stays queued.
    pub(crate) fn pair(
        &mut self,
        id: ConnectionId,
    ) -> Result<Option<ConnectionId>, ArenaError> {
        let seeker = self
            .registry
            .get(id)
            .ok_or(SessionError::NotFound(id))?;
        let avoid = seeker.last_played;

        let partner = self
            .registry
            .iter()
            .find(|c| {
                c.id() != id
                    && c.state == ClientState::LookingForMatch
                    && Some(c.id()) != avoid
                    && !c.is_hung_up()
            })
            .map(Client::id);
        let Some(partner) = partner else {
            tracing::debug!(%id, "no opponent available");
            return Ok(None);
        };

        let seeker_health = self.roll_health();
        let seeker_power = self.dice.roll(self.config.power_moves.clone());
        let partner_health = self.roll_health();
        let partner_power = self.dice.roll(self.config.power_moves.clone());

        let (seeker, other) = self.both_mut(id, partner)?;
        seeker.opponent = Some(partner);
        seeker.health = seeker_health;
        seeker.power_moves = seeker_power;
        other.opponent = Some(id);
        other.health = partner_health;
        other.power_moves = partner_power;
        for client in [&mut *seeker, &mut *other] {
            client.muting = false;
            client.wants_pairing = false;
        }

        seeker.send(&Notice::Engaged {
            opponent: other.display_name(),
        });
        other.send(&Notice::Engaged {
            opponent: seeker.display_name(),
        });
        tracing::info!(
            first = %partner,
            second = %id,
            "match started"
        );

        self.announce_turn(partner, id)?;
        Ok(Some(partner))
    }

    /// Hands the turn to `actor`: sets both roles, then sends each side its
    /// status, the menu to the actor and a waiting notice to the other.
    ///
    /// Input the actor typed before its turn began is thrown away.
    pub(crate) fn announce_turn(
        &mut self,
        actor: ConnectionId,
        waiter: ConnectionId,
    ) -> Result<(), ArenaError> {
        let (actor, waiter) = self.both_mut(actor, waiter)?;
        actor.state = ClientState::Acting;
        waiter.state = ClientState::Waiting;

        let stale = actor.discard_input();
        if stale > 0 {
            tracing::debug!(id = %actor.id(), bytes = stale, "input typed before turn discarded");
        }

        let (actor_status, waiter_status) =
            (status(actor, waiter), status(waiter, actor));
        actor.send(&actor_status);
        waiter.send(&waiter_status);
        actor.send(&Notice::Menu);
        waiter.send(&Notice::AwaitingStrike {
            actor: actor.display_name(),
        });
        Ok(())
    }

    fn roll_health(&mut self) -> i32 {
        let roll = self.dice.roll(self.config.health.clone());
        i32::try_from(roll).unwrap_or(i32::MAX)
    }
}

/// The status block as `me` sees it.
fn status(me: &Client, opponent: &Client) -> Notice {
    Notice::Status {
        health: me.health,
        power_moves: me.power_moves,
        opponent: opponent.display_name(),
        opponent_health: opponent.health,
    }
}
