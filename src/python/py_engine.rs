//! Engine bindings for Python.

use std::time::Duration;

use pyo3::prelude::*;

use crate::core::{grid_index, DespawnProfile, EngineConfig};
use crate::engine::{share_message, GameEngine};
use crate::schedule::{GameDriver, VirtualClock};

/// Python wrapper around a `GameDriver` on a virtual clock.
#[pyclass(name = "GameEngine", unsendable)]
pub struct PyGameEngine {
    driver: GameDriver<VirtualClock>,
}

#[pymethods]
impl PyGameEngine {
    /// Create an engine. Despawn settings default to the relaxed profile.
    #[new]
    #[pyo3(signature = (seed=42, round_seconds=30, despawn_period_ms=None, despawn_chance=None))]
    fn new(
        seed: u64,
        round_seconds: u32,
        despawn_period_ms: Option<u64>,
        despawn_chance: Option<f64>,
    ) -> PyResult<Self> {
        let mut despawn = DespawnProfile::relaxed();
        if let Some(period_ms) = despawn_period_ms {
            despawn.period_ms = period_ms;
        }
        if let Some(chance) = despawn_chance {
            despawn.chance = chance;
        }

        let config = EngineConfig::default()
            .with_seed(seed)
            .with_round_seconds(round_seconds)
            .with_despawn(despawn);

        let engine = GameEngine::new(config)
            .map_err(|e| PyErr::new::<pyo3::exceptions::PyValueError, _>(format!("{}", e)))?;

        Ok(Self {
            driver: GameDriver::new(engine, VirtualClock::new()),
        })
    }

    /// Start or restart a round. Returns the session number.
    fn start(&mut self) -> u64 {
        self.driver.request_start().0
    }

    /// Hit a hole. Returns what was hit, or None (including for
    /// negative or off-grid indices).
    fn whack(&mut self, index: i64) -> Option<&'static str> {
        grid_index(index)
            .and_then(|index| self.driver.request_whack(index))
            .map(|cell| cell.name())
    }

    /// Let `ms` milliseconds pass. Returns the number of ticks applied.
    fn advance(&mut self, ms: u64) -> usize {
        self.driver.advance(Duration::from_millis(ms))
    }

    #[getter]
    fn score(&self) -> u32 {
        self.driver.engine().state().score
    }

    #[getter]
    fn time_left(&self) -> u32 {
        self.driver.engine().state().time_left
    }

    #[getter]
    fn game_started(&self) -> bool {
        self.driver.engine().state().game_started
    }

    #[getter]
    fn game_over(&self) -> bool {
        self.driver.engine().state().game_over
    }

    #[getter]
    fn phase(&self) -> String {
        self.driver.engine().phase().to_string()
    }

    /// Cell names in grid order ("empty", "plain", "penalty", "golden").
    #[getter]
    fn cells(&self) -> Vec<&'static str> {
        self.driver
            .engine()
            .state()
            .cells
            .iter()
            .map(|cell| cell.name())
            .collect()
    }

    /// Share text for the final score, once the round is over.
    fn share_message(&self) -> Option<String> {
        let state = self.driver.engine().state();
        state.game_over.then(|| share_message(state.score))
    }

    fn __repr__(&self) -> String {
        let state = self.driver.engine().state();
        format!(
            "GameEngine(phase={}, score={}, time_left={})",
            state.phase(),
            state.score,
            state.time_left
        )
    }
}
