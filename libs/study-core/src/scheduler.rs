//! One-shot deferred work.
//!
//! The matching game never waits: it hands a [`PendingReset`] to a
//! [`Scheduler`] and the host delivers it back through
//! [`MatchingGame::apply_reset`](crate::matching_game::MatchingGame::apply_reset)
//! once the delay has elapsed. Scheduled work is never cancelled.

use crate::matching_game::PendingReset;
use std::collections::BTreeMap;
use std::time::Duration;

/// Schedules a mismatch reset to fire after `delay`.
pub trait Scheduler {
    fn schedule(&mut self, delay: Duration, reset: PendingReset);
}

/// Scheduler driven by a virtual clock.
///
/// Nothing fires on its own; call [`advance`](Self::advance) to move time
/// forward and collect the resets that became due, in firing order.
#[derive(Debug, Default)]
pub struct ManualScheduler {
    now: Duration,
    seq: u64,
    queue: BTreeMap<(Duration, u64), PendingReset>,
}

impl ManualScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Virtual time elapsed since creation.
    pub fn now(&self) -> Duration {
        self.now
    }

    /// Number of resets that have not fired yet.
    pub fn pending(&self) -> usize {
        self.queue.len()
    }

    /// Move the clock forward and return every reset due by the new time.
    pub fn advance(&mut self, by: Duration) -> Vec<PendingReset> {
        self.now += by;
        let later = self.queue.split_off(&(self.now, u64::MAX));
        let due = std::mem::replace(&mut self.queue, later);
        due.into_values().collect()
    }
}

impl Scheduler for ManualScheduler {
    fn schedule(&mut self, delay: Duration, reset: PendingReset) {
        let due = self.now + delay;
        self.queue.insert((due, self.seq), reset);
        self.seq += 1;
    }
}
