//! Arena configuration: match parameters and the optional cheat hook.

use std::ops::RangeInclusive;

use serde::{Deserialize, Serialize};
use skirmish_protocol::DEFAULT_LINE_CAPACITY;
use tracing::warn;

/// Power moves granted by the cheat hook unless configured otherwise.
pub const DEFAULT_CHEAT_POWER_MOVES: u32 = 20;

// ---------------------------------------------------------------------------
// CheatHook
// ---------------------------------------------------------------------------

/// A test back door: a composed line containing `token` sets the
/// composer's power moves to `power_moves`.
///
/// Disabled unless explicitly configured.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheatHook {
    pub token: String,
    pub power_moves: u32,
}

impl CheatHook {
    /// Creates a hook for `token` granting [`DEFAULT_CHEAT_POWER_MOVES`].
    pub fn new(token: impl Into<String>) -> Self {
        Self {
            token: token.into(),
            power_moves: DEFAULT_CHEAT_POWER_MOVES,
        }
    }
}

// ---------------------------------------------------------------------------
// ArenaConfig
// ---------------------------------------------------------------------------

/// Parameters for every match played in the arena.
///
/// Each side of a match draws its own health and power-move allowance from
/// these ranges when the match starts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArenaConfig {
    /// Starting health. Default: 20..=30.
    pub health: RangeInclusive<u32>,

    /// Power moves available per match. Default: 1..=3.
    pub power_moves: RangeInclusive<u32>,

    /// Damage of a regular attack. Default: 1..=6.
    pub damage: RangeInclusive<u32>,

    /// A power move that lands deals a damage roll times this. Default: 3.
    pub power_multiplier: u32,

    /// Longest name or chat line, in bytes. Default: 255.
    pub line_capacity: usize,

    /// Optional cheat hook. Default: `None`.
    pub cheat: Option<CheatHook>,
}

impl Default for ArenaConfig {
    fn default() -> Self {
        Self {
            health: 20..=30,
            power_moves: 1..=3,
            damage: 1..=6,
            power_multiplier: 3,
            line_capacity: DEFAULT_LINE_CAPACITY,
            cheat: None,
        }
    }
}

impl ArenaConfig {
    /// Highest starting health accepted. Keeps health within `i32`.
    pub const MAX_HEALTH: u32 = 1_000_000;

    /// Clamp and fix any out-of-range values so the config is safe to use.
    ///
    /// Called automatically by [`Arena::new`](crate::Arena::new). Rules:
    /// - Inverted ranges collapse to their start.
    /// - Health starts at 1 or more and is capped at [`Self::MAX_HEALTH`].
    /// - `power_multiplier` and `line_capacity` are at least 1.
    /// - A cheat hook with an empty token is dropped (it would match every
    ///   line).
    pub fn validated(mut self) -> Self {
        let start = (*self.health.start()).clamp(1, Self::MAX_HEALTH);
        let end = (*self.health.end()).clamp(start, Self::MAX_HEALTH);
        if (start..=end) != self.health {
            warn!(health = ?self.health, start, end, "health range out of bounds, clamping");
            self.health = start..=end;
        }
        self.power_moves = ordered("power_moves", self.power_moves);
        self.damage = ordered("damage", self.damage);
        if self.power_multiplier == 0 {
            warn!("power_multiplier is 0, using 1");
            self.power_multiplier = 1;
        }
        if self.line_capacity == 0 {
            warn!("line_capacity is 0, using 1");
            self.line_capacity = 1;
        }
        if self.cheat.as_ref().is_some_and(|c| c.token.is_empty()) {
            warn!("cheat hook has an empty token, disabling");
            self.cheat = None;
        }
        self
    }
}

fn ordered(field: &str, range: RangeInclusive<u32>) -> RangeInclusive<u32> {
    let (start, end) = range.into_inner();
    if end < start {
        warn!(field, start, end, "inverted range, collapsing to start");
        return start..=start;
    }
    start..=end
}
