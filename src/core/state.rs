//! Game state and the views derived from it.
//!
//! ## GameState
//!
//! The single value the engine owns and republishes after every commit:
//! - Score and remaining time
//! - The 9 grid cells
//! - Session flags (`game_started`, `game_over`)
//!
//! ## Phase
//!
//! Session-level state derived from the two flags:
//! `NotStarted → Running → Ended → Running → ...`
//!
//! ## Screen
//!
//! What a renderer should draw for the current phase.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use super::cell::{CellContent, GRID_SIZE};
use super::error::EngineError;

/// Indices of empty holes. Never spills to the heap.
pub type EmptyCells = SmallVec<[usize; GRID_SIZE]>;

/// Session phase, derived from `GameState` flags.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Phase {
    /// Title screen, waiting for the first start.
    NotStarted,
    /// Round in progress: ticks and whacks take effect.
    Running,
    /// Time is up. Only `start()` leaves this phase.
    Ended,
}

impl std::fmt::Display for Phase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Phase::NotStarted => "not_started",
            Phase::Running => "running",
            Phase::Ended => "ended",
        };
        f.write_str(name)
    }
}

/// Complete state of one game session.
///
/// Updates never alias a live state: the engine copies the current
/// value, computes the next one and commits it wholesale.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct GameState {
    /// Current score. Unsigned, so it cannot go below zero.
    pub score: u32,

    /// Seconds remaining in the round.
    pub time_left: u32,

    /// Grid contents, row-major.
    pub cells: [CellContent; GRID_SIZE],

    /// Set once the countdown has reached zero.
    pub game_over: bool,

    /// Set while a round is running.
    pub game_started: bool,
}

impl GameState {
    /// State shown before the first round: nothing running, nothing over.
    #[must_use]
    pub fn idle(round_seconds: u32) -> Self {
        Self {
            score: 0,
            time_left: round_seconds,
            cells: [CellContent::Empty; GRID_SIZE],
            game_over: false,
            game_started: false,
        }
    }

    /// Canonical state at the start of a round.
    #[must_use]
    pub fn fresh_round(round_seconds: u32) -> Self {
        Self {
            game_started: true,
            ..Self::idle(round_seconds)
        }
    }

    #[must_use]
    pub fn phase(&self) -> Phase {
        match (self.game_started, self.game_over) {
            (true, _) => Phase::Running,
            (false, true) => Phase::Ended,
            (false, false) => Phase::NotStarted,
        }
    }

    #[must_use]
    pub fn is_running(&self) -> bool {
        self.phase() == Phase::Running
    }

    /// Get a cell, or `None` if the index is off the grid.
    #[must_use]
    pub fn cell(&self, index: usize) -> Option<CellContent> {
        self.cells.get(index).copied()
    }

    /// Indices of all empty holes, in grid order.
    #[must_use]
    pub fn empty_cells(&self) -> EmptyCells {
        self.cells
            .iter()
            .enumerate()
            .filter(|(_, cell)| cell.is_empty())
            .map(|(index, _)| index)
            .collect()
    }

    /// Number of holes with something in them.
    #[must_use]
    pub fn occupied_count(&self) -> usize {
        self.cells.iter().filter(|cell| cell.is_occupied()).count()
    }

    /// Add a (possibly negative) delta to the score, clamping at zero.
    pub fn apply_score(&mut self, delta: i32) {
        self.score = self.score.saturating_add_signed(delta);
    }

    /// Check the invariants every reachable state satisfies.
    ///
    /// Used when restoring a checkpoint supplied by a host.
    pub fn validate(&self, round_seconds: u32) -> Result<(), EngineError> {
        if self.game_started && self.game_over {
            return Err(EngineError::InvalidState(
                "game_started and game_over are both set".to_string(),
            ));
        }
        if self.time_left > round_seconds {
            return Err(EngineError::InvalidState(format!(
                "time_left {} exceeds round length {}",
                self.time_left, round_seconds
            )));
        }
        match self.phase() {
            Phase::Running if self.time_left == 0 => Err(EngineError::InvalidState(
                "running round with no time left".to_string(),
            )),
            Phase::Ended if self.time_left != 0 => Err(EngineError::InvalidState(format!(
                "round ended with {} seconds left",
                self.time_left
            ))),
            Phase::NotStarted if *self != Self::idle(round_seconds) => Err(
                EngineError::InvalidState("title screen state has been played on".to_string()),
            ),
            _ => Ok(()),
        }
    }

    /// What the presentation layer should draw.
    #[must_use]
    pub fn screen(&self) -> Screen<'_> {
        match self.phase() {
            Phase::NotStarted => Screen::StartPrompt,
            Phase::Running => Screen::Playing {
                score: self.score,
                time_left: self.time_left,
                cells: &self.cells,
            },
            Phase::Ended => Screen::GameOver {
                final_score: self.score,
            },
        }
    }
}

/// Render view of a `GameState`.
///
/// - `StartPrompt`: title and start button
/// - `Playing`: HUD (score, time) and the grid
/// - `GameOver`: final score, restart and share actions
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Screen<'a> {
    StartPrompt,
    Playing {
        score: u32,
        time_left: u32,
        cells: &'a [CellContent; GRID_SIZE],
    },
    GameOver {
        final_score: u32,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_idle_state() {
        let state = GameState::idle(30);

        assert_eq!(state.score, 0);
        assert_eq!(state.time_left, 30);
        assert_eq!(state.phase(), Phase::NotStarted);
        assert_eq!(state.occupied_count(), 0);
        assert_eq!(state.screen(), Screen::StartPrompt);
    }

    #[test]
    fn test_fresh_round() {
        let state = GameState::fresh_round(30);

        assert!(state.game_started);
        assert!(!state.game_over);
        assert_eq!(state.phase(), Phase::Running);
        assert_eq!(state.empty_cells().len(), GRID_SIZE);
    }

    #[test]
    fn test_phase_from_flags() {
        let mut state = GameState::idle(30);
        state.game_over = true;
        assert_eq!(state.phase(), Phase::Ended);
        assert_eq!(state.screen(), Screen::GameOver { final_score: 0 });
    }

    #[test]
    fn test_empty_cells() {
        let mut state = GameState::fresh_round(30);
        state.cells[0] = CellContent::Plain;
        state.cells[4] = CellContent::Golden;
        state.cells[8] = CellContent::Penalty;

        let empty = state.empty_cells();
        assert_eq!(empty.as_slice(), &[1, 2, 3, 5, 6, 7]);
        assert!(!empty.spilled());
        assert_eq!(state.occupied_count(), 3);
    }

    #[test]
    fn test_cell_out_of_range() {
        let state = GameState::fresh_round(30);
        assert_eq!(state.cell(0), Some(CellContent::Empty));
        assert_eq!(state.cell(GRID_SIZE), None);
    }

    #[test]
    fn test_apply_score_clamps() {
        let mut state = GameState::fresh_round(30);

        state.apply_score(-1);
        assert_eq!(state.score, 0);

        state.apply_score(3);
        state.apply_score(-1);
        assert_eq!(state.score, 2);
    }

    #[test]
    fn test_validate() {
        assert!(GameState::idle(30).validate(30).is_ok());
        assert!(GameState::fresh_round(30).validate(30).is_ok());

        let mut both = GameState::fresh_round(30);
        both.game_over = true;
        assert!(both.validate(30).is_err());

        let too_long = GameState::fresh_round(45);
        assert!(too_long.validate(30).is_err());

        let mut stalled = GameState::fresh_round(30);
        stalled.time_left = 0;
        assert!(stalled.validate(30).is_err());

        let mut ended = GameState::idle(30);
        ended.game_over = true;
        ended.time_left = 0;
        ended.score = 12;
        ended.cells[2] = CellContent::Plain;
        assert!(ended.validate(30).is_ok());

        ended.time_left = 17;
        assert!(ended.validate(30).is_err());

        let mut idle = GameState::idle(30);
        idle.time_left = 29;
        assert!(idle.validate(30).is_err());

        let mut idle = GameState::idle(30);
        idle.score = 99;
        assert!(idle.validate(30).is_err());

        let mut idle = GameState::idle(30);
        idle.cells[0] = CellContent::Golden;
        assert!(idle.validate(30).is_err());
    }

    #[test]
    fn test_playing_screen() {
        let mut state = GameState::fresh_round(30);
        state.score = 7;
        state.time_left = 12;

        match state.screen() {
            Screen::Playing { score, time_left, cells } => {
                assert_eq!(score, 7);
                assert_eq!(time_left, 12);
                assert_eq!(cells.len(), GRID_SIZE);
            }
            other => panic!("Unexpected screen: {:?}", other),
        }
    }

    #[test]
    fn test_state_serde() {
        let mut state = GameState::fresh_round(30);
        state.cells[3] = CellContent::Golden;
        state.score = 5;

        let json = serde_json::to_string(&state).unwrap();
        let deserialized: GameState = serde_json::from_str(&json).unwrap();

        assert_eq!(state, deserialized);
    }
}
