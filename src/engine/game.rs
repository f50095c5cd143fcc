//! The game engine: state ownership and the four update rules.

use log::{debug, info};

use crate::core::{
    CellContent, ConfigError, EngineConfig, EngineError, GameRng, GameRngState, GameState, Phase,
};
use crate::schedule::SessionId;

use super::render::Renderer;

/// Owns the `GameState` and applies every update to it.
///
/// Each operation reads the current state, computes the next one and
/// commits it in one step. Operations are total: calls that make no
/// sense for the current phase or index are no-ops.
///
/// ## Example
///
/// ```
/// use whack_a_mole::core::{EngineConfig, Phase};
/// use whack_a_mole::engine::GameEngine;
///
/// let mut engine = GameEngine::new(EngineConfig::default()).unwrap();
/// engine.start();
///
/// for _ in 0..30 {
///     engine.tick_countdown();
/// }
/// assert_eq!(engine.phase(), Phase::Ended);
/// ```
pub struct GameEngine {
    config: EngineConfig,
    state: GameState,
    rng: GameRng,
    session: SessionId,
    renderer: Option<Box<dyn Renderer>>,
}

impl GameEngine {
    /// Create an engine on the title screen.
    pub fn new(config: EngineConfig) -> Result<Self, ConfigError> {
        config.validate()?;

        Ok(Self {
            state: GameState::idle(config.round_seconds),
            rng: GameRng::new(config.seed),
            session: SessionId::default(),
            renderer: None,
            config,
        })
    }

    /// Rebuild an engine from a checkpoint.
    ///
    /// A running checkpoint gets a fresh session token, so timers from
    /// before the checkpoint can never touch it.
    pub fn restore(
        config: EngineConfig,
        state: GameState,
        rng: &GameRngState,
    ) -> Result<Self, EngineError> {
        config.validate()?;
        state.validate(config.round_seconds)?;

        let session = if state.is_running() {
            SessionId::default().next()
        } else {
            SessionId::default()
        };

        Ok(Self {
            config,
            state,
            rng: GameRng::from_state(rng),
            session,
            renderer: None,
        })
    }

    /// Attach a renderer. It immediately receives the current state.
    #[must_use]
    pub fn with_renderer(mut self, renderer: impl Renderer + 'static) -> Self {
        self.set_renderer(renderer);
        self
    }

    /// Replace the renderer. It immediately receives the current state.
    pub fn set_renderer(&mut self, renderer: impl Renderer + 'static) {
        let mut renderer: Box<dyn Renderer> = Box::new(renderer);
        renderer.render(&self.state);
        self.renderer = Some(renderer);
    }

    // === Accessors ===

    #[must_use]
    pub fn state(&self) -> &GameState {
        &self.state
    }

    #[must_use]
    pub fn phase(&self) -> Phase {
        self.state.phase()
    }

    /// Token of the current (or most recent) session.
    #[must_use]
    pub fn session(&self) -> SessionId {
        self.session
    }

    #[must_use]
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// RNG position, for checkpointing alongside `state()`.
    #[must_use]
    pub fn rng_state(&self) -> GameRngState {
        self.rng.state()
    }

    // === Commands ===

    /// Begin a new round, superseding any round in progress.
    ///
    /// Returns the token of the new session. Timers holding an older
    /// token must be treated as dead.
    pub fn start(&mut self) -> SessionId {
        self.session = self.session.next();
        self.state = GameState::fresh_round(self.config.round_seconds);
        info!("{} started ({}s round)", self.session, self.config.round_seconds);
        self.publish();
        self.session
    }

    /// One second of the countdown.
    ///
    /// The tick that reaches zero also ends the round, in the same commit.
    pub fn tick_countdown(&mut self) -> Phase {
        if !self.state.game_started || self.state.time_left == 0 {
            return self.phase();
        }

        let mut next = self.state.clone();
        next.time_left -= 1;
        if next.time_left == 0 {
            next.game_started = false;
            next.game_over = true;
            info!("{} ended with score {}", self.session, next.score);
        }

        self.commit(next);
        self.phase()
    }

    /// Put one occupant into a random empty hole.
    ///
    /// Returns the hole and occupant, or `None` if the grid is full or
    /// no round is running.
    pub fn tick_spawn(&mut self) -> Option<(usize, CellContent)> {
        if !self.state.is_running() {
            return None;
        }

        let empty = self.state.empty_cells();
        let index = *self.rng.choose(empty.as_slice())?;
        let occupant = self.roll_occupant();

        let mut next = self.state.clone();
        next.cells[index] = occupant;
        debug!("spawned {} at {}", occupant, index);

        self.commit(next);
        Some((index, occupant))
    }

    /// Clear golden occupants, and each other occupant with the
    /// configured chance.
    ///
    /// Returns how many holes were cleared.
    pub fn tick_despawn(&mut self) -> usize {
        if !self.state.is_running() {
            return 0;
        }

        let chance = self.config.despawn.chance;
        let mut next = self.state.clone();
        let mut cleared = 0;

        for cell in next.cells.iter_mut() {
            let remove = match *cell {
                CellContent::Empty => false,
                CellContent::Golden => true,
                CellContent::Plain | CellContent::Penalty => self.rng.gen_bool(chance),
            };
            if remove {
                *cell = CellContent::Empty;
                cleared += 1;
            }
        }

        if cleared > 0 {
            debug!("despawned {} occupant(s)", cleared);
        }
        self.commit(next);
        cleared
    }

    /// Hit a hole.
    ///
    /// Returns what was hit, or `None` if the hole was empty, the index
    /// is off the grid, or no round is running.
    pub fn whack(&mut self, index: usize) -> Option<CellContent> {
        if !self.state.is_running() {
            return None;
        }

        let occupant = self.state.cell(index).filter(|cell| cell.is_occupied())?;
        let delta = occupant.score_value()?;

        let mut next = self.state.clone();
        next.apply_score(delta);
        next.cells[index] = CellContent::Empty;
        debug!("whacked {} at {}: score {} -> {}", occupant, index, self.state.score, next.score);

        self.commit(next);
        Some(occupant)
    }

    // === Internals ===

    fn roll_occupant(&mut self) -> CellContent {
        let golden = self.config.spawn.golden_chance;
        let plain = self.config.spawn.plain_chance;

        if self.rng.gen_bool(golden) {
            CellContent::Golden
        } else if self.rng.gen_bool(plain) {
            CellContent::Plain
        } else {
            CellContent::Penalty
        }
    }

    /// Swap in `next` and publish it if anything changed.
    fn commit(&mut self, next: GameState) -> bool {
        if next == self.state {
            return false;
        }
        self.state = next;
        self.publish();
        true
    }

    fn publish(&mut self) {
        if let Some(renderer) = self.renderer.as_mut() {
            renderer.render(&self.state);
        }
    }
}

impl std::fmt::Debug for GameEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GameEngine")
            .field("config", &self.config)
            .field("state", &self.state)
            .field("session", &self.session)
            .field("has_renderer", &self.renderer.is_some())
            .finish()
    }
}
