//! Periodic task scheduling.
//!
//! A round is driven by three independent repeating tasks (countdown,
//! spawn, despawn). The host provides the timers through `TimerService`;
//! every timer carries a `TickTicket` naming the session it belongs to,
//! so a tick that outlives its session is recognised and dropped.
//!
//! - `VirtualClock`: deterministic timer service advanced by the caller
//! - `GameDriver`: owns an engine and a timer service, routes intents and
//!   ticks, and starts/cancels timers with the session

use std::time::Duration;

use serde::{Deserialize, Serialize};

pub mod clock;
pub mod driver;

pub use clock::VirtualClock;
pub use driver::GameDriver;

/// Token identifying one run of `start()`.
///
/// Minted by the engine; strictly increasing per engine.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct SessionId(pub u64);

impl SessionId {
    #[must_use]
    pub const fn next(self) -> Self {
        Self(self.0 + 1)
    }
}

impl std::fmt::Display for SessionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Session({})", self.0)
    }
}

/// The three periodic tasks of a round.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TaskKind {
    Countdown,
    Spawn,
    Despawn,
}

impl TaskKind {
    /// All tasks, in the order they are scheduled.
    pub const ALL: [TaskKind; 3] = [TaskKind::Countdown, TaskKind::Spawn, TaskKind::Despawn];
}

impl std::fmt::Display for TaskKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            TaskKind::Countdown => "countdown",
            TaskKind::Spawn => "spawn",
            TaskKind::Despawn => "despawn",
        };
        f.write_str(name)
    }
}

/// What a timer hands back when it fires.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TickTicket {
    pub session: SessionId,
    pub task: TaskKind,
}

impl TickTicket {
    #[must_use]
    pub const fn new(session: SessionId, task: TaskKind) -> Self {
        Self { session, task }
    }
}

/// Repeating-timer capability supplied by the host environment.
///
/// Implementations deliver fired tickets to `GameDriver::on_timer`, one
/// at a time. Within one timer, firings must be chronological.
pub trait TimerService {
    /// Fire `ticket` every `period` until cancelled.
    fn schedule_repeating(&mut self, ticket: TickTicket, period: Duration);

    /// Cancel every timer belonging to `session`.
    ///
    /// After this returns, none of those timers may fire again.
    fn cancel_session(&mut self, session: SessionId);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_session_id() {
        let first = SessionId::default();
        assert_eq!(first.0, 0);
        assert_eq!(first.next(), SessionId(1));
        assert!(first.next() > first);
        assert_eq!(format!("{}", SessionId(3)), "Session(3)");
    }

    #[test]
    fn test_task_kind_display() {
        let names: Vec<_> = TaskKind::ALL.iter().map(|t| t.to_string()).collect();
        assert_eq!(names, vec!["countdown", "spawn", "despawn"]);
    }
}
