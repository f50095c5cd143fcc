//! Engine configuration.
//!
//! Hosts configure the engine at startup:
//! - `SpawnConfig`: spawn cadence and occupant odds
//! - `DespawnProfile`: despawn cadence and per-cell removal chance
//! - `EngineConfig`: round length, countdown cadence, seed, and the above
//!
//! Everything is `serde`-serializable so a host can load it from JSON.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use super::error::ConfigError;

/// Spawn cadence and occupant odds.
///
/// Each spawn tick fills one empty hole. The occupant is golden with
/// probability `golden_chance`; otherwise plain with probability
/// `plain_chance`, else penalty.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SpawnConfig {
    /// Milliseconds between spawn ticks.
    pub period_ms: u64,

    /// Chance that a spawned occupant is golden.
    pub golden_chance: f64,

    /// Chance that a non-golden occupant is plain (rather than penalty).
    pub plain_chance: f64,
}

impl Default for SpawnConfig {
    fn default() -> Self {
        Self {
            period_ms: 1000,
            golden_chance: 0.1,
            plain_chance: 0.5,
        }
    }
}

impl SpawnConfig {
    #[must_use]
    pub fn period(&self) -> Duration {
        Duration::from_millis(self.period_ms)
    }
}

/// Despawn cadence and per-cell removal chance.
///
/// Golden occupants are cleared on every despawn tick regardless of
/// `chance`; other occupants each get an independent removal roll.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct DespawnProfile {
    /// Milliseconds between despawn ticks.
    pub period_ms: u64,

    /// Per-occupant removal chance for non-golden cells.
    pub chance: f64,
}

impl DespawnProfile {
    /// Slow profile: every 1500 ms, 30% removal chance.
    #[must_use]
    pub const fn relaxed() -> Self {
        Self {
            period_ms: 1500,
            chance: 0.3,
        }
    }

    /// Fast profile: every 200 ms, 40% removal chance.
    #[must_use]
    pub const fn rapid() -> Self {
        Self {
            period_ms: 200,
            chance: 0.4,
        }
    }

    #[must_use]
    pub fn period(&self) -> Duration {
        Duration::from_millis(self.period_ms)
    }
}

impl Default for DespawnProfile {
    fn default() -> Self {
        Self::relaxed()
    }
}

/// Complete engine configuration.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Round length in seconds (countdown ticks per round).
    pub round_seconds: u32,

    /// Milliseconds between countdown ticks.
    pub countdown_period_ms: u64,

    pub spawn: SpawnConfig,

    pub despawn: DespawnProfile,

    /// Seed for the engine's RNG.
    /// Same seed and same inputs produce identical games.
    pub seed: u64,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            round_seconds: 30,
            countdown_period_ms: 1000,
            spawn: SpawnConfig::default(),
            despawn: DespawnProfile::default(),
            seed: 42,
        }
    }
}

impl EngineConfig {
    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    #[must_use]
    pub fn with_round_seconds(mut self, seconds: u32) -> Self {
        self.round_seconds = seconds;
        self
    }

    #[must_use]
    pub fn with_spawn(mut self, spawn: SpawnConfig) -> Self {
        self.spawn = spawn;
        self
    }

    #[must_use]
    pub fn with_despawn(mut self, despawn: DespawnProfile) -> Self {
        self.despawn = despawn;
        self
    }

    #[must_use]
    pub fn countdown_period(&self) -> Duration {
        Duration::from_millis(self.countdown_period_ms)
    }

    /// Reject configurations the engine cannot run.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.round_seconds == 0 {
            return Err(ConfigError::ZeroRoundLength);
        }

        let periods = [
            ("countdown", self.countdown_period_ms),
            ("spawn", self.spawn.period_ms),
            ("despawn", self.despawn.period_ms),
        ];
        if let Some(&(task, _)) = periods.iter().find(|(_, ms)| *ms == 0) {
            return Err(ConfigError::ZeroPeriod { task });
        }

        let chances = [
            ("spawn.golden_chance", self.spawn.golden_chance),
            ("spawn.plain_chance", self.spawn.plain_chance),
            ("despawn.chance", self.despawn.chance),
        ];
        for (name, value) in chances {
            // NaN fails the range check too
            if !(0.0..=1.0).contains(&value) {
                return Err(ConfigError::InvalidProbability { name, value });
            }
        }

        Ok(())
    }
}
