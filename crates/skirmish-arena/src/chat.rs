//! Composed lines: chat relay, mute confirmation and the cheat hook.

use skirmish_protocol::Notice;
use skirmish_session::{Purpose, Resume};
use skirmish_transport::ConnectionId;

use crate::{Arena, ArenaError, Dice};

/// A mute confirmation must contain this word.
const MUTE_CONFIRMATION: &str = "mute";

impl<D: Dice> Arena<D> {
    /// Handles a completed line from a composing client, then returns it
    /// to `resume`.
    ///
    /// The cheat token is checked first; a line that triggers it is never
    /// relayed, though it still counts as a mute confirmation. A mute line
    /// toggles muting, a speech line is relayed to the opponent unless the
    /// opponent is muting this client. If the match is still on, the turn
    /// is announced again to both sides.
    pub(crate) fn finish_line(
        &mut self,
        id: ConnectionId,
        text: String,
        resume: Resume,
        purpose: Purpose,
    ) -> Result<(), ArenaError> {
        let cheat = self
            .config
            .cheat
            .as_ref()
            .filter(|hook| text.contains(hook.token.as_str()))
            .map(|hook| hook.power_moves);

        if let Some(power_moves) = cheat {
            let client = self.client_mut(id)?;
            client.power_moves = power_moves;
            client.send(&Notice::CheatActivated { power_moves });
            tracing::info!(%id, power_moves, "cheat hook triggered");
        }

        match purpose {
            Purpose::Mute => self.confirm_mute(id, &text)?,
            Purpose::Speech if cheat.is_none() => self.relay(id, text)?,
            Purpose::Speech => {}
        }

        let client = self.client_mut(id)?;
        client.send(&Notice::LineDone);
        client.state = resume.into();
        let opponent = client.opponent;

        match (resume, opponent) {
            (Resume::Acting, Some(opponent)) => self.announce_turn(id, opponent),
            (Resume::Waiting, Some(opponent)) => self.announce_turn(opponent, id),
            _ => Ok(()),
        }
    }

    fn confirm_mute(&mut self, id: ConnectionId, text: &str) -> Result<(), ArenaError> {
        let client = self.client_mut(id)?;
        let opponent = client.opponent;
        let Some(opponent) = opponent.filter(|_| text.contains(MUTE_CONFIRMATION))
        else {
            client.send(&Notice::MuteCancelled);
            return Ok(());
        };

        let (client, other) = self.both_mut(id, opponent)?;
        client.muting = !client.muting;
        let name = other.display_name();
        if client.muting {
            client.send(&Notice::Muting { opponent: name });
        } else {
            client.send(&Notice::Unmuting { opponent: name });
        }
        tracing::debug!(%id, muting = client.muting, "mute toggled");
        Ok(())
    }

    fn relay(&mut self, id: ConnectionId, text: String) -> Result<(), ArenaError> {
        let Some(opponent) = self.client_mut(id)?.opponent else {
            tracing::debug!(%id, "no opponent, line dropped");
            return Ok(());
        };

        let (client, other) = self.both_mut(id, opponent)?;
        if other.muting {
            tracing::debug!(%id, %opponent, "opponent is muting, line dropped");
            return Ok(());
        }
        other.send(&Notice::Said {
            name: client.display_name(),
            text,
        });
        Ok(())
    }
}
