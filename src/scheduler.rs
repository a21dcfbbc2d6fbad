//! Cooperative repeating polls driven by the host's clock.
//!
//! Every poll is tagged with the step generation it was scheduled under.
//! The session bumps the generation on each transition, so a poll that
//! outlives its step is dropped the next time it comes due instead of
//! acting on a superseded step.

/// Monotonic counter identifying the current step instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default)]
pub struct Generation(u64);

impl Generation {
    /// Invalidate everything tagged with the previous value.
    pub fn bump(&mut self) -> Generation {
        self.0 += 1;
        *self
    }

    pub fn value(self) -> u64 {
        self.0
    }
}

/// What a poll re-checks when it fires.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PollKind {
    /// Look for the current step's target.
    Target,
    /// Check whether a step's modal trigger has become visible.
    Modal,
}

#[derive(Debug, Clone)]
struct ScheduledPoll {
    kind: PollKind,
    generation: Generation,
    interval_ms: u64,
    next_due_ms: u64,
}

#[derive(Debug, Default)]
pub struct PollScheduler {
    polls: Vec<ScheduledPoll>,
}

impl PollScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Schedule a repeating poll. It first fires on the next tick at or after
    /// `first_due_ms`, then every `interval_ms`. Replaces an existing poll of the same kind.
    pub fn schedule(&mut self, kind: PollKind, generation: Generation, interval_ms: u64, first_due_ms: u64) {
        self.cancel(kind);
        self.polls.push(ScheduledPoll {
            kind,
            generation,
            interval_ms: interval_ms.max(1),
            next_due_ms: first_due_ms,
        });
    }

    /// Stop one kind of poll. Returns whether it was scheduled.
    pub fn cancel(&mut self, kind: PollKind) -> bool {
        let before = self.polls.len();
        self.polls.retain(|p| p.kind != kind);
        self.polls.len() != before
    }

    /// Stop everything. Returns how many polls were live.
    pub fn cancel_all(&mut self) -> usize {
        let n = self.polls.len();
        self.polls.clear();
        n
    }

    pub fn is_scheduled(&self, kind: PollKind) -> bool {
        self.polls.iter().any(|p| p.kind == kind)
    }

    pub fn is_empty(&self) -> bool {
        self.polls.is_empty()
    }

    /// Polls due at `now_ms` under `current`, in scheduling order.
    ///
    /// Stale-generation polls are discarded. Each due poll fires once even if
    /// several intervals were missed, and is rescheduled one interval after `now_ms`.
    pub fn due(&mut self, now_ms: u64, current: Generation) -> Vec<PollKind> {
        self.polls.retain(|p| {
            let live = p.generation == current;
            if !live {
                tracing::trace!(kind = ?p.kind, generation = p.generation.value(), "dropping stale poll");
            }
            live
        });

        let mut fired = Vec::new();
        for poll in &mut self.polls {
            if poll.next_due_ms <= now_ms {
                fired.push(poll.kind);
                poll.next_due_ms = now_ms + poll.interval_ms;
            }
        }
        fired
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_fire_is_on_next_tick() {
        let mut s = PollScheduler::new();
        let g = Generation::default();
        s.schedule(PollKind::Target, g, 300, 1000);
        assert_eq!(s.due(1000, g), vec![PollKind::Target]);
        assert!(s.due(1200, g).is_empty());
        assert_eq!(s.due(1300, g), vec![PollKind::Target]);
    }

    #[test]
    fn missed_intervals_fire_once() {
        let mut s = PollScheduler::new();
        let g = Generation::default();
        s.schedule(PollKind::Modal, g, 250, 0);
        s.due(0, g);
        assert_eq!(s.due(2000, g), vec![PollKind::Modal]);
        assert!(s.due(2100, g).is_empty());
        assert_eq!(s.due(2250, g), vec![PollKind::Modal]);
    }

    #[test]
    fn stale_generation_is_dropped() {
        let mut s = PollScheduler::new();
        let mut g = Generation::default();
        s.schedule(PollKind::Target, g, 300, 0);
        let next = g.bump();
        assert!(s.due(0, next).is_empty());
        assert!(s.is_empty());
    }

    #[test]
    fn schedule_replaces_same_kind() {
        let mut s = PollScheduler::new();
        let g = Generation::default();
        s.schedule(PollKind::Target, g, 300, 0);
        s.schedule(PollKind::Target, g, 300, 500);
        assert!(s.due(0, g).is_empty());
        assert_eq!(s.due(500, g), vec![PollKind::Target]);
    }

    #[test]
    fn cancel_all_reports_live_polls() {
        let mut s = PollScheduler::new();
        let g = Generation::default();
        s.schedule(PollKind::Target, g, 300, 0);
        s.schedule(PollKind::Modal, g, 250, 0);
        assert_eq!(s.cancel_all(), 2);
        assert!(!s.is_scheduled(PollKind::Target));
    }
}
