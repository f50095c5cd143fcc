//! Construction-time errors.
//!
//! Gameplay itself never fails: bad indices and off-session calls are
//! no-ops. Only building an engine from a config or a checkpoint can.

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConfigError {
    #[error("round length must be at least one second")]
    ZeroRoundLength,
    #[error("{task} period must be non-zero")]
    ZeroPeriod { task: &'static str },
    #[error("{name} must be a probability in [0, 1], got {value}")]
    InvalidProbability { name: &'static str, value: f64 },
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum EngineError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error("invalid game state: {0}")]
    InvalidState(String),
}
