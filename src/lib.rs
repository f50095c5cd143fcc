//! # whack-a-mole
//!
//! A deterministic, tick-driven whack-a-mole engine.
//!
//! ## Design Principles
//!
//! 1. **One owner**: `GameEngine` is the only thing that mutates a
//!    `GameState`. Every update reads the current state, computes the
//!    next one and commits it whole.
//!
//! 2. **Total operations**: off-grid indices, empty holes and calls
//!    outside a running round are no-ops, never errors.
//!
//! 3. **Injected time and randomness**: timers come from a host
//!    `TimerService`; randomness from one seedable `GameRng`. Same seed and
//!    same inputs replay the same game.
//!
//! ## Architecture
//!
//! - **Session tokens**: every `start()` mints a `SessionId`. Timers carry
//!   the token of the round that scheduled them, so a tick from a
//!   superseded round is recognised and dropped.
//!
//! - **Render boundary**: a `Renderer` receives each committed state; the
//!   presentation layer sends intents back through `GameDriver`.
//!
//! ## Modules
//!
//! - `core`: Cells, state, RNG, configuration, errors
//! - `engine`: Update rules, renderer and share boundary
//! - `schedule`: Session tokens, timer service, virtual clock, driver

pub mod core;
pub mod engine;
pub mod schedule;

#[cfg(feature = "python")]
pub mod python;

// Re-export commonly used types
pub use crate::core::{
    CellContent, GRID_COLUMNS, GRID_SIZE, grid_index,
    GameState, Phase, Screen,
    GameRng, GameRngState,
    EngineConfig, SpawnConfig, DespawnProfile,
    ConfigError, EngineError,
};

pub use crate::engine::{GameEngine, Renderer, ShareTarget, share_message};

pub use crate::schedule::{
    SessionId, TaskKind, TickTicket, TimerService,
    VirtualClock, GameDriver,
};
