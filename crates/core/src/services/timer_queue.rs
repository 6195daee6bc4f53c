use std::collections::BTreeMap;
use std::time::Duration;

use crate::models::transition::TransitionToken;

/// Schedules transition callbacks.
///
/// The host decides how time passes; the coordinator only asks for a
/// callback carrying `token` after `delay`, and cancels it when the cycle is
/// superseded.
pub trait Scheduler {
    fn schedule(&mut self, token: TransitionToken, delay: Duration);

    /// Drop every pending callback carrying `token`. Unknown tokens are ignored.
    fn cancel(&mut self, token: TransitionToken);
}

/// Virtual-clock scheduler driven by `advance`.
///
/// Callbacks fire in due-time order; callbacks due at the same instant fire
/// in the order they were scheduled.
#[derive(Debug, Default)]
pub struct TimerQueue {
    now: Duration,
    seq: u64,
    entries: BTreeMap<(Duration, u64), TransitionToken>,
}

impl TimerQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Elapsed virtual time.
    pub fn now(&self) -> Duration {
        self.now
    }

    /// Number of callbacks still waiting to fire.
    pub fn pending(&self) -> usize {
        self.entries.len()
    }

    pub fn is_scheduled(&self, token: TransitionToken) -> bool {
        self.entries.values().any(|t| *t == token)
    }

    /// Due time of the earliest pending callback.
    pub fn next_due(&self) -> Option<Duration> {
        self.entries.keys().next().map(|(due, _)| *due)
    }

    /// Remove and return the earliest callback due at or before `until`,
    /// moving the clock to its due time. Callbacks scheduled while draining
    /// are picked up by later calls.
    pub fn pop_due(&mut self, until: Duration) -> Option<TransitionToken> {
        let key = *self.entries.keys().next()?;
        if key.0 > until {
            return None;
        }
        let token = self.entries.remove(&key)?;
        self.now = self.now.max(key.0);
        Some(token)
    }

    /// Move the clock forward to `until` without firing anything.
    pub fn advance_to(&mut self, until: Duration) {
        self.now = self.now.max(until);
    }

    /// Advance by `dt` and return every token that came due, in order.
    pub fn advance(&mut self, dt: Duration) -> Vec<TransitionToken> {
        let until = self.now.saturating_add(dt);
        let mut fired = Vec::new();
        while let Some(token) = self.pop_due(until) {
            fired.push(token);
        }
        self.advance_to(until);
        fired
    }
}

impl Scheduler for TimerQueue {
    fn schedule(&mut self, token: TransitionToken, delay: Duration) {
        self.seq += 1;
        self.entries.insert((self.now.saturating_add(delay), self.seq), token);
    }

    fn cancel(&mut self, token: TransitionToken) {
        self.entries.retain(|_, t| *t != token);
    }
}
