use std::time::Duration;

use parla_core::Scheduler;
use parla_types::{AppEvent, TimerKind, TimerToken};
use tokio::time::timeout;
use tokio_util::sync::CancellationToken;

use crate::timers::TokioScheduler;

fn token(kind: TimerKind, seq: u64) -> TimerToken {
    TimerToken { kind, seq }
}

#[tokio::test]
async fn test_timer_fires_after_delay() {
    let (tx, rx) = kanal::unbounded_async::<AppEvent>();
    let mut scheduler = TokioScheduler::new(tx, CancellationToken::new());

    scheduler.schedule(token(TimerKind::Translation, 1), Duration::from_millis(20));

    match timeout(Duration::from_secs(2), rx.recv()).await {
        Ok(Ok(AppEvent::TimerFired(fired))) => {
            assert_eq!(fired, token(TimerKind::Translation, 1));
        }
        Ok(Ok(_)) => panic!("Wrong event type"),
        Ok(Err(e)) => panic!("Channel error: {}", e),
        Err(_) => panic!("Timeout - timer never fired!"),
    }
}

#[tokio::test]
async fn test_rescheduling_replaces_pending_timer() {
    let (tx, rx) = kanal::unbounded_async::<AppEvent>();
    let mut scheduler = TokioScheduler::new(tx, CancellationToken::new());

    scheduler.schedule(token(TimerKind::History, 1), Duration::from_millis(20));
    scheduler.schedule(token(TimerKind::History, 2), Duration::from_millis(40));

    let fired = timeout(Duration::from_secs(2), rx.recv())
        .await
        .expect("Timeout - timer never fired!")
        .expect("channel closed");
    assert!(matches!(fired, AppEvent::TimerFired(t) if t.seq == 2));

    tokio::time::sleep(Duration::from_millis(60)).await;
    assert!(rx.try_recv().expect("channel closed").is_none());
}

#[tokio::test]
async fn test_cancelled_timers_never_fire() {
    let (tx, rx) = kanal::unbounded_async::<AppEvent>();
    let mut scheduler = TokioScheduler::new(tx, CancellationToken::new());

    scheduler.schedule(token(TimerKind::Translation, 1), Duration::from_millis(20));
    scheduler.schedule(token(TimerKind::CopiedReset, 2), Duration::from_millis(20));
    scheduler.schedule(token(TimerKind::History, 3), Duration::from_millis(20));
    scheduler.cancel(TimerKind::Translation);
    scheduler.cancel_all();

    tokio::time::sleep(Duration::from_millis(80)).await;
    assert!(rx.try_recv().expect("channel closed").is_none());
}

#[tokio::test]
async fn test_parent_cancellation_stops_timers() {
    let (tx, rx) = kanal::unbounded_async::<AppEvent>();
    let cancel = CancellationToken::new();
    let mut scheduler = TokioScheduler::new(tx, cancel.clone());

    scheduler.schedule(token(TimerKind::Translation, 1), Duration::from_millis(20));
    cancel.cancel();

    tokio::time::sleep(Duration::from_millis(80)).await;
    assert!(rx.try_recv().expect("channel closed").is_none());
}
