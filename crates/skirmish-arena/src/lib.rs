//! Game rules for Skirmish.
//!
//! The [`Arena`] owns the [`Registry`](skirmish_session::Registry) and is
//! the only thing that changes client state. The server loop feeds it
//! transport events and asks it to dispatch ready clients, one input unit
//! at a time:
//!
//! ```text
//! Inbound event ──→ Arena::feed ──→ client inbox
//!                                       │
//! Arena::ready ──→ Arena::dispatch(id) ─┴─→ registration / matchmaking /
//!                                           combat / chat
//! ```
//!
//! # Modules
//!
//! - `arena`: the per-client state machine and dispatch
//! - `matchmaking`: pairing idle clients and opening a match
//! - `combat`: attacks, power moves, turn alternation, match end
//! - `chat`: composed lines: speech, mute and the cheat hook
//! - `lifecycle`: admitting and disconnecting clients

mod arena;
mod chat;
mod combat;
mod config;
mod dice;
mod error;
mod lifecycle;
mod matchmaking;

pub use arena::{Arena, Dispatch};
pub use config::{ArenaConfig, CheatHook, DEFAULT_CHEAT_POWER_MOVES};
pub use dice::{Dice, RandomDice};
pub use error::ArenaError;
