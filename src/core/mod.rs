//! Core types: cells, state, RNG, configuration, errors.
//!
//! Everything here is plain data plus validation. The rules that move a
//! `GameState` forward live in `engine`.

pub mod cell;
pub mod config;
pub mod error;
pub mod rng;
pub mod state;

pub use cell::{grid_index, CellContent, GRID_COLUMNS, GRID_SIZE};
pub use config::{DespawnProfile, EngineConfig, SpawnConfig};
pub use error::{ConfigError, EngineError};
pub use rng::{GameRng, GameRngState};
pub use state::{EmptyCells, GameState, Phase, Screen};
