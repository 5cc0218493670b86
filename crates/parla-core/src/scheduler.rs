use std::time::Duration;

use parla_types::{TimerKind, TimerToken};

/// Cancellable one-shot timers, at most one pending per kind.
///
/// Scheduling a kind that is already pending replaces it.
pub trait Scheduler: Send {
    fn schedule(&mut self, token: TimerToken, delay: Duration);

    fn cancel(&mut self, kind: TimerKind);

    /// Drop every pending timer
    fn cancel_all(&mut self);
}

/// Virtual clock for driving timers deterministically
#[derive(Debug, Default)]
pub struct ManualScheduler {
    now: Duration,
    pending: Vec<(Duration, TimerToken)>,
}

impl ManualScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn now(&self) -> Duration {
        self.now
    }

    pub fn is_pending(&self, kind: TimerKind) -> bool {
        self.pending.iter().any(|(_, t)| t.kind == kind)
    }

    pub fn pending_count(&self) -> usize {
        self.pending.len()
    }

    /// Move the clock forward and return the timers that fired, earliest first
    pub fn advance(&mut self, by: Duration) -> Vec<TimerToken> {
        self.now += by;

        let mut fired: Vec<(Duration, TimerToken)> = Vec::new();
        let now = self.now;
        self.pending.retain(|entry| {
            if entry.0 <= now {
                fired.push(*entry);
                false
            } else {
                true
            }
        });

        fired.sort_by_key(|(deadline, token)| (*deadline, token.kind));
        fired.into_iter().map(|(_, token)| token).collect()
    }
}

impl Scheduler for ManualScheduler {
    fn schedule(&mut self, token: TimerToken, delay: Duration) {
        self.cancel(token.kind);
        self.pending.push((self.now + delay, token));
    }

    fn cancel(&mut self, kind: TimerKind) {
        self.pending.retain(|(_, t)| t.kind != kind);
    }

    fn cancel_all(&mut self) {
        self.pending.clear();
    }
}
