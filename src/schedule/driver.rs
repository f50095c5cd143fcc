//! Input boundary and timer lifecycle.

use std::time::Duration;

use log::{debug, info};

use crate::core::{CellContent, Phase};
use crate::engine::{share_message, GameEngine, ShareTarget};

use super::{SessionId, TaskKind, TickTicket, TimerService, VirtualClock};

/// Couples a `GameEngine` with the timers that drive it.
///
/// The presentation layer talks to the driver, never to the engine
/// directly: `request_start`, `request_whack`, `request_share`. The host's
/// timers report back through `on_timer`.
///
/// Timers are tied to a session. Starting a new round cancels every
/// timer of the previous one before the new ones are scheduled, and the
/// round ending cancels all three together. A ticket that still arrives
/// for an old session is dropped.
pub struct GameDriver<T: TimerService> {
    engine: GameEngine,
    timers: T,
}

impl<T: TimerService> GameDriver<T> {
    /// Wrap an engine. If it is already mid-round (restored from a
    /// checkpoint), the round's timers are scheduled right away.
    pub fn new(engine: GameEngine, timers: T) -> Self {
        let mut driver = Self { engine, timers };
        if driver.engine.phase() == Phase::Running {
            let session = driver.engine.session();
            driver.schedule_round(session);
        }
        driver
    }

    #[must_use]
    pub fn engine(&self) -> &GameEngine {
        &self.engine
    }

    #[must_use]
    pub fn timers(&self) -> &T {
        &self.timers
    }

    /// Tear down into the engine and the timer service.
    #[must_use]
    pub fn into_parts(self) -> (GameEngine, T) {
        (self.engine, self.timers)
    }

    // === Intents ===

    /// Start (or restart) a round.
    pub fn request_start(&mut self) -> SessionId {
        let previous = self.engine.session();
        self.timers.cancel_session(previous);

        let session = self.engine.start();
        self.schedule_round(session);
        session
    }

    pub fn request_whack(&mut self, index: usize) -> Option<CellContent> {
        self.engine.whack(index)
    }

    /// Offer the final score to `target`. Only available on the end screen.
    pub fn request_share(&self, target: &mut impl ShareTarget) -> bool {
        if self.engine.phase() != Phase::Ended {
            return false;
        }
        target.share(&share_message(self.engine.state().score));
        true
    }

    // === Timer callbacks ===

    /// Apply one fired timer. Returns whether it changed anything it was
    /// allowed to (stale or off-round tickets return `false`).
    pub fn on_timer(&mut self, ticket: TickTicket) -> bool {
        if ticket.session != self.engine.session() || self.engine.phase() != Phase::Running {
            debug!("dropped stale {} tick from {}", ticket.task, ticket.session);
            return false;
        }

        match ticket.task {
            TaskKind::Countdown => {
                if self.engine.tick_countdown() == Phase::Ended {
                    self.timers.cancel_session(ticket.session);
                    info!("cancelled timers for {}", ticket.session);
                }
            }
            TaskKind::Spawn => {
                self.engine.tick_spawn();
            }
            TaskKind::Despawn => {
                self.engine.tick_despawn();
            }
        }
        true
    }

    fn period_of(&self, task: TaskKind) -> Duration {
        let config = self.engine.config();
        match task {
            TaskKind::Countdown => config.countdown_period(),
            TaskKind::Spawn => config.spawn.period(),
            TaskKind::Despawn => config.despawn.period(),
        }
    }

    fn schedule_round(&mut self, session: SessionId) {
        for task in TaskKind::ALL {
            let period = self.period_of(task);
            self.timers
                .schedule_repeating(TickTicket::new(session, task), period);
        }
    }
}

impl GameDriver<VirtualClock> {
    /// Let `elapsed` pass on the virtual clock, applying every tick that
    /// falls due, in chronological order.
    ///
    /// Returns the number of ticks applied.
    pub fn advance(&mut self, elapsed: Duration) -> usize {
        let deadline = self.timers.now() + elapsed;
        let mut applied = 0;

        while let Some(ticket) = self.timers.next_due(deadline) {
            if self.on_timer(ticket) {
                applied += 1;
            }
        }

        self.timers.advance_to(deadline);
        applied
    }
}

impl<T: TimerService + std::fmt::Debug> std::fmt::Debug for GameDriver<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GameDriver")
            .field("engine", &self.engine)
            .field("timers", &self.timers)
            .finish()
    }
}
