//! Combat: the acting player's commands and how a match ends.

use skirmish_protocol::{Command, Notice};
use skirmish_session::{Client, ClientState, Purpose, Resume};
use skirmish_transport::ConnectionId;

use crate::{Arena, ArenaError, Dice};

impl<D: Dice> Arena<D> {
    /// Applies one command from the acting client `id`.
    pub(crate) fn resolve(
        &mut self,
        id: ConnectionId,
        command: Command,
    ) -> Result<(), ArenaError> {
        let opponent = self.opponent_of(id)?;
        match command {
            Command::Attack => {
                let damage = self.dice.roll(self.config.damage.clone());
                self.strike(id, opponent, damage, false)
            }
            Command::PowerMove => self.power_move(id, opponent),
            Command::Speak => self.begin_composing(id, opponent, Purpose::Speech),
            Command::Mute => self.begin_composing(id, opponent, Purpose::Mute),
            Command::Unknown(c) => {
                tracing::debug!(%id, command = ?c, "unknown command ignored");
                Ok(())
            }
        }
    }

    fn power_move(
        &mut self,
        id: ConnectionId,
        opponent: ConnectionId,
    ) -> Result<(), ArenaError> {
        let client = self.client_mut(id)?;
        if client.power_moves == 0 {
            client.send(&Notice::OutOfPowerMoves);
            return self.pass_turn(id, opponent);
        }
        client.power_moves -= 1;

        if self.dice.flip() {
            let roll = self.dice.roll(self.config.damage.clone());
            let damage = roll.saturating_mul(self.config.power_multiplier);
            return self.strike(id, opponent, damage, true);
        }

        let (attacker, target) = self.both_mut(id, opponent)?;
        attacker.send(&Notice::Missed {
            target: target.display_name(),
        });
        target.send(&Notice::Dodged {
            attacker: attacker.display_name(),
        });
        tracing::debug!(%id, "power move missed");
        self.pass_turn(id, opponent)
    }

    /// Deals `damage` to `target`, tells both sides, then either ends the
    /// match or passes the turn.
    fn strike(
        &mut self,
        attacker: ConnectionId,
        target: ConnectionId,
        damage: u32,
        power: bool,
    ) -> Result<(), ArenaError> {
        let (a, t) = self.both_mut(attacker, target)?;
        t.health = t.health.saturating_sub_unsigned(damage);
        a.send(&Notice::Hit {
            target: t.display_name(),
            damage,
            power,
        });
        t.send(&Notice::Struck {
            attacker: a.display_name(),
            damage,
            power,
        });
        tracing::debug!(%attacker, %target, damage, power, health = t.health, "hit");

        if t.health <= 0 {
            self.end_match(attacker, target)
        } else {
            self.pass_turn(attacker, target)
        }
    }

    fn pass_turn(
        &mut self,
        from: ConnectionId,
        to: ConnectionId,
    ) -> Result<(), ArenaError> {
        self.announce_turn(to, from)
    }

    /// Suspends the turn so `id` can type one line. The opponent waits
    /// until the line is done.
    fn begin_composing(
        &mut self,
        id: ConnectionId,
        opponent: ConnectionId,
        purpose: Purpose,
    ) -> Result<(), ArenaError> {
        let (client, other) = self.both_mut(id, opponent)?;
        client.line.clear();
        client.state = ClientState::Composing {
            resume: Resume::Acting,
            purpose,
        };
        other.state = ClientState::Waiting;
        let prompt = match purpose {
            Purpose::Speech => Notice::SpeakPrompt,
            Purpose::Mute => Notice::MutePrompt,
        };
        client.send(&prompt);
        Ok(())
    }

    /// A kill: tells both sides the result and sends them back to the
    /// queue.
    fn end_match(
        &mut self,
        winner: ConnectionId,
        loser: ConnectionId,
    ) -> Result<(), ArenaError> {
        let (w, l) = self.both_mut(winner, loser)?;
        w.send(&Notice::Victory {
            loser: l.display_name(),
        });
        l.send(&Notice::Defeat {
            winner: w.display_name(),
        });
        for client in [&mut *w, &mut *l] {
            client.send(&Notice::AwaitingOpponent);
            client.send(&Notice::FindNewMatch);
        }
        tracing::info!(%winner, %loser, "match ended");
        self.dissolve(winner, loser)
    }

    /// Ends the match between `a` and `b` without a result: both go back
    /// to looking for a match and remember each other as the last opponent.
    ///
    /// A client caught mid-line keeps composing but will return to the
    /// queue instead of to its turn.
    pub(crate) fn dissolve(
        &mut self,
        a: ConnectionId,
        b: ConnectionId,
    ) -> Result<(), ArenaError> {
        let (x, y) = self.both_mut(a, b)?;
        requeue(x, b);
        requeue(y, a);
        Ok(())
    }
}

fn requeue(client: &mut Client, last: ConnectionId) {
    client.opponent = None;
    client.last_played = Some(last);
    client.state = match client.state {
        ClientState::Composing { purpose, .. } => ClientState::Composing {
            resume: Resume::LookingForMatch,
            purpose,
        },
        _ => ClientState::LookingForMatch,
    };
}
