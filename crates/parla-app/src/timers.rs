use std::collections::HashMap;
use std::time::Duration;

use kanal::AsyncSender;
use parla_core::Scheduler;
use parla_types::{AppEvent, TimerKind, TimerToken};
use tokio_util::sync::CancellationToken;

/// Runs session timers as sleeping tasks that post `TimerFired` back to the
/// event loop
pub struct TokioScheduler {
    event_tx: AsyncSender<AppEvent>,
    cancel: CancellationToken,
    pending: HashMap<TimerKind, CancellationToken>,
}

impl TokioScheduler {
    /// Timers die with `cancel`
    pub fn new(event_tx: AsyncSender<AppEvent>, cancel: CancellationToken) -> Self {
        Self {
            event_tx,
            cancel,
            pending: HashMap::new(),
        }
    }
}

impl Scheduler for TokioScheduler {
    fn schedule(&mut self, token: TimerToken, delay: Duration) {
        self.cancel(token.kind);

        let timer_cancel = self.cancel.child_token();
        self.pending.insert(token.kind, timer_cancel.clone());

        let tx = self.event_tx.clone();
        tokio::spawn(async move {
            tokio::select! {
                _ = tokio::time::sleep(delay) => {
                    if let Err(e) = tx.send(AppEvent::TimerFired(token)).await {
                        tracing::debug!("Timer {:?} fired after event loop closed: {}", token, e);
                    }
                }
                _ = timer_cancel.cancelled() => {}
            }
        });
    }

    fn cancel(&mut self, kind: TimerKind) {
        if let Some(timer) = self.pending.remove(&kind) {
            timer.cancel();
        }
    }

    fn cancel_all(&mut self) {
        for (_, timer) in self.pending.drain() {
            timer.cancel();
        }
    }
}
