//! # Skirmish
//!
//! A turn-based duel server. Clients connect over TCP, pick a name, get
//! paired one-on-one, and trade attacks, power moves and chat lines until
//! someone drops.
//!
//! The server is one event loop that owns every client. Socket reads and
//! writes run in small per-connection tasks that only move bytes; all
//! game state changes happen in the loop, one client input at a time.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use skirmish::prelude::*;
//!
//! # async fn start() -> Result<(), SkirmishError> {
//! let server = SkirmishServer::builder()
//!     .bind("0.0.0.0:56073")
//!     .build()
//!     .await?;
//! server.run().await
//! # }
//! ```

mod error;
mod server;

pub use error::SkirmishError;
pub use server::{
    DEFAULT_IDLE_TIMEOUT, DEFAULT_PORT, SkirmishServer, SkirmishServerBuilder,
};

/// Everything needed to configure and run a server.
pub mod prelude {
    pub use crate::{
        DEFAULT_IDLE_TIMEOUT, DEFAULT_PORT, SkirmishError, SkirmishServer,
        SkirmishServerBuilder,
    };
    pub use skirmish_arena::{
        Arena, ArenaConfig, CheatHook, DEFAULT_CHEAT_POWER_MOVES, Dice,
        RandomDice,
    };
    pub use skirmish_transport::ConnectionId;
}
