//! Deterministic timer service.
//!
//! `VirtualClock` keeps time as a plain `Duration` that only moves when
//! the caller asks. Hosts with a real clock feed it elapsed wall time;
//! tests feed it exact steps.

use std::time::Duration;

use super::{SessionId, TickTicket, TimerService};

#[derive(Clone, Debug)]
struct RepeatingTimer {
    ticket: TickTicket,
    period: Duration,
    next_due: Duration,
    /// Registration order, used to break ties between timers due together.
    order: u64,
}

/// Cooperative, single-threaded timer service driven by explicit time steps.
#[derive(Clone, Debug, Default)]
pub struct VirtualClock {
    now: Duration,
    timers: Vec<RepeatingTimer>,
    next_order: u64,
}

impl VirtualClock {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Time elapsed since the clock was created.
    #[must_use]
    pub fn now(&self) -> Duration {
        self.now
    }

    /// Number of live timers.
    #[must_use]
    pub fn active_timers(&self) -> usize {
        self.timers.len()
    }

    /// Whether any live timer belongs to `session`.
    #[must_use]
    pub fn has_session(&self, session: SessionId) -> bool {
        self.timers.iter().any(|t| t.ticket.session == session)
    }

    /// Fire the earliest timer due at or before `deadline`.
    ///
    /// Moves the clock to that timer's due time and re-arms it one period
    /// later. Returns `None` once nothing is due before `deadline`.
    /// Timers cancelled between two calls never fire.
    pub fn next_due(&mut self, deadline: Duration) -> Option<TickTicket> {
        let timer = self
            .timers
            .iter_mut()
            .filter(|t| t.next_due <= deadline)
            .min_by_key(|t| (t.next_due, t.order))?;

        let ticket = timer.ticket;
        self.now = self.now.max(timer.next_due);
        timer.next_due += timer.period;
        Some(ticket)
    }

    /// Move the clock forward to `deadline` without firing anything.
    ///
    /// Call after draining `next_due` for the same deadline.
    pub fn advance_to(&mut self, deadline: Duration) {
        self.now = self.now.max(deadline);
    }
}

impl TimerService for VirtualClock {
    fn schedule_repeating(&mut self, ticket: TickTicket, period: Duration) {
        let order = self.next_order;
        self.next_order += 1;

        self.timers.push(RepeatingTimer {
            ticket,
            period,
            next_due: self.now + period,
            order,
        });
    }

    fn cancel_session(&mut self, session: SessionId) {
        self.timers.retain(|t| t.ticket.session != session);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schedule::TaskKind;

    fn ticket(session: u64, task: TaskKind) -> TickTicket {
        TickTicket::new(SessionId(session), task)
    }

    fn drain(clock: &mut VirtualClock, deadline: Duration) -> Vec<(Duration, TickTicket)> {
        let mut fired = Vec::new();
        while let Some(t) = clock.next_due(deadline) {
            fired.push((clock.now(), t));
        }
        clock.advance_to(deadline);
        fired
    }

    #[test]
    fn test_nothing_due_before_first_period() {
        let mut clock = VirtualClock::new();
        clock.schedule_repeating(ticket(1, TaskKind::Countdown), Duration::from_secs(1));

        assert!(drain(&mut clock, Duration::from_millis(999)).is_empty());
        assert_eq!(clock.now(), Duration::from_millis(999));
    }

    #[test]
    fn test_fires_in_chronological_order() {
        let mut clock = VirtualClock::new();
        clock.schedule_repeating(ticket(1, TaskKind::Spawn), Duration::from_millis(1000));
        clock.schedule_repeating(ticket(1, TaskKind::Despawn), Duration::from_millis(1500));

        let fired = drain(&mut clock, Duration::from_millis(3000));
        let order: Vec<_> = fired.iter().map(|(at, t)| (at.as_millis(), t.task)).collect();

        assert_eq!(
            order,
            vec![
                (1000, TaskKind::Spawn),
                (1500, TaskKind::Despawn),
                (2000, TaskKind::Spawn),
                (3000, TaskKind::Spawn),
                (3000, TaskKind::Despawn),
            ]
        );
    }

    #[test]
    fn test_ties_follow_registration_order() {
        let mut clock = VirtualClock::new();
        clock.schedule_repeating(ticket(1, TaskKind::Countdown), Duration::from_secs(1));
        clock.schedule_repeating(ticket(1, TaskKind::Spawn), Duration::from_secs(1));

        let fired = drain(&mut clock, Duration::from_secs(1));
        let tasks: Vec<_> = fired.iter().map(|(_, t)| t.task).collect();
        assert_eq!(tasks, vec![TaskKind::Countdown, TaskKind::Spawn]);
    }

    #[test]
    fn test_cancel_session() {
        let mut clock = VirtualClock::new();
        clock.schedule_repeating(ticket(1, TaskKind::Countdown), Duration::from_secs(1));
        clock.schedule_repeating(ticket(2, TaskKind::Countdown), Duration::from_secs(1));
        assert_eq!(clock.active_timers(), 2);

        clock.cancel_session(SessionId(1));

        assert_eq!(clock.active_timers(), 1);
        assert!(!clock.has_session(SessionId(1)));
        assert!(clock.has_session(SessionId(2)));

        let fired = drain(&mut clock, Duration::from_secs(2));
        assert!(fired.iter().all(|(_, t)| t.session == SessionId(2)));
    }

    #[test]
    fn test_timers_scheduled_later_start_from_now() {
        let mut clock = VirtualClock::new();
        clock.advance_to(Duration::from_millis(500));
        clock.schedule_repeating(ticket(1, TaskKind::Spawn), Duration::from_secs(1));

        assert!(clock.next_due(Duration::from_millis(1499)).is_none());
        assert!(clock.next_due(Duration::from_millis(1500)).is_some());
    }
}
