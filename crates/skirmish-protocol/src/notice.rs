//! Every message the server sends to a client.
//!
//! A [`Notice`] carries only the data that varies; its [`Display`]
//! implementation renders the exact wire text, terminators included.
//!
//! [`Display`]: std::fmt::Display

use std::fmt;

/// One server-to-client message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notice {
    // -----------------------------------------------------------------
    // Registration and presence
    // -----------------------------------------------------------------
    /// Sent on accept.
    Prompt,
    /// Broadcast when a client binds its name.
    Joined { name: String },
    /// Acknowledges registration.
    Welcome { name: String },
    /// Broadcast when a client leaves. `who` is the display name, or the
    /// peer address for a client that never registered.
    Farewell { who: String },

    // -----------------------------------------------------------------
    // Match flow
    // -----------------------------------------------------------------
    Engaged { opponent: String },
    /// Per-turn status block, from the recipient's point of view.
    Status {
        health: i32,
        power_moves: u32,
        opponent: String,
        opponent_health: i32,
    },
    /// The command menu, sent to the acting side only.
    Menu,
    AwaitingStrike { actor: String },

    // -----------------------------------------------------------------
    // Combat results
    // -----------------------------------------------------------------
    Hit { target: String, damage: u32, power: bool },
    Struck { attacker: String, damage: u32, power: bool },
    Missed { target: String },
    Dodged { attacker: String },
    OutOfPowerMoves,

    // -----------------------------------------------------------------
    // Chat and mute
    // -----------------------------------------------------------------
    SpeakPrompt,
    MutePrompt,
    Said { name: String, text: String },
    Muting { opponent: String },
    Unmuting { opponent: String },
    MuteCancelled,
    CheatActivated { power_moves: u32 },
    /// Closes a composed line on the composer's side.
    LineDone,

    // -----------------------------------------------------------------
    // Match end
    // -----------------------------------------------------------------
    Victory { loser: String },
    Defeat { winner: String },
    OpponentLeft { name: String },
    AwaitingOpponent,
    FindNewMatch,
}

impl fmt::Display for Notice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Prompt => f.write_str("What is your name?\n"),
            Self::Joined { name } => {
                write!(f, "\r\n**{name} joined the area.**\r\n")
            }
            Self::Welcome { name } => {
                write!(f, "\nWelcome, {name}! Awaiting opponent...\n")
            }
            Self::Farewell { who } => write!(f, "Goodbye {who}\r\n"),

            Self::Engaged { opponent } => {
                write!(f, "\nYou engage {opponent}!\n")
            }
            Self::Status {
                health,
                power_moves,
                opponent,
                opponent_health,
            } => write!(
                f,
                "\nYour health:{health}\nYour powermoves: {power_moves}\n\
                 {opponent}'s health:{opponent_health}\n"
            ),
            Self::Menu => f.write_str(
                "\n(a)ttack\n(p)owermove\n(s)peak something\n(m)mute opponent\n\n",
            ),
            Self::AwaitingStrike { actor } => {
                write!(f, "Waiting for {actor} to strike...\n")
            }

            Self::Hit {
                target,
                damage,
                power,
            } => write!(
                f,
                "You hit {target} for {damage} damage{}!\n",
                power_suffix(*power)
            ),
            Self::Struck {
                attacker,
                damage,
                power,
            } => write!(
                f,
                "{attacker} hits you for {damage} damage{}!\n",
                power_suffix(*power)
            ),
            Self::Missed { target } => {
                write!(f, "Unlucky! You missed {target}!\n")
            }
            Self::Dodged { attacker } => {
                write!(f, "{attacker} missed you! How Lucky!\n")
            }
            Self::OutOfPowerMoves => f.write_str("You are out of power moves!\n"),

            Self::SpeakPrompt => f.write_str("\nSpeak: "),
            Self::MutePrompt => f.write_str(
                "\nDo you want to mute/unmute your opponent? type (mute) to confirm: ",
            ),
            Self::Said { name, text } => write!(f, "\n{name} says: {text}\n\n"),
            Self::Muting { opponent } => {
                write!(f, "\nYou are now muting {opponent}!\n")
            }
            Self::Unmuting { opponent } => {
                write!(f, "\nYou are no longer muting {opponent}!\n")
            }
            Self::MuteCancelled => f.write_str("\nMute cancelled.\n"),
            Self::CheatActivated { power_moves } => {
                write!(f, "Cheat activated: Power moves set to {power_moves}!\n")
            }
            Self::LineDone => f.write_str("\n"),

            Self::Victory { loser } => write!(f, "{loser} is dead!. You win!\n"),
            Self::Defeat { winner } => {
                write!(f, "You are dead!. {winner} is VICTORIUS!...\n")
            }
            Self::OpponentLeft { name } => {
                write!(f, "{name} has left the game!!\n")
            }
            Self::AwaitingOpponent => f.write_str("Awaiting opponent...\n"),
            Self::FindNewMatch => {
                f.write_str("Type anything to find a new match...: \n")
            }
        }
    }
}

fn power_suffix(power: bool) -> &'static str {
    if power { " with a power move" } else { "" }
}

impl From<&Notice> for Vec<u8> {
    fn from(notice: &Notice) -> Self {
        notice.to_string().into_bytes()
    }
}
