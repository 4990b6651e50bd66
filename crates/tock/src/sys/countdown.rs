use crate::events::CountdownRequest;
use async_channel::{Receiver, Sender};
use std::time::Duration;
use ticker::countdown::{Countdown, CountdownState};

/// Owns the window's countdown and runs it whenever a start request arrives.
///
/// Requests queued while a countdown runs are handled after it finishes; the window avoids
/// sending them in the first place. `updates` should be unbounded so the final idle state is
/// never dropped.
pub async fn run_service(
    requests: Receiver<CountdownRequest>,
    updates: Sender<CountdownState>,
    period: Duration,
) {
    let mut countdown = Countdown::new();
    countdown.subscribe(move |state| {
        if let Err(e) = updates.try_send(*state) {
            log::warn!("Dropped countdown update: {}", e);
        }
    });

    while let Ok(request) = requests.recv().await {
        match request {
            CountdownRequest::Start => countdown.run(period).await,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ticker::countdown::{Seconds, TICK_PERIOD};
    use ticker::task::TaskGuard;

    fn drain(rx: &Receiver<CountdownState>) -> Vec<CountdownState> {
        std::iter::from_fn(|| rx.try_recv().ok()).collect()
    }

    #[tokio::test(start_paused = true)]
    async fn test_start_request_runs_countdown() {
        let (req_tx, req_rx) = async_channel::bounded(1);
        let (tx, rx) = async_channel::unbounded();
        let _service = TaskGuard::spawn(run_service(req_rx, tx, TICK_PERIOD));

        req_tx.send(CountdownRequest::Start).await.unwrap();
        tokio::time::sleep(TICK_PERIOD * 7).await;

        let states = drain(&rx);
        let remaining: Vec<u32> = states.iter().map(|s| s.seconds_remaining.into()).collect();
        assert_eq!(remaining, [6, 5, 4, 3, 2, 1, 0]);
        assert!(!states.last().unwrap().is_running);
    }

    #[tokio::test(start_paused = true)]
    async fn test_dropping_service_cancels_countdown() {
        let (req_tx, req_rx) = async_channel::bounded(1);
        let (tx, rx) = async_channel::unbounded();
        let service = TaskGuard::spawn(run_service(req_rx, tx, TICK_PERIOD));

        req_tx.send(CountdownRequest::Start).await.unwrap();
        tokio::time::sleep(TICK_PERIOD * 3 + TICK_PERIOD / 2).await;
        drop(service);
        let before = drain(&rx);
        assert_eq!(before.last().unwrap().seconds_remaining, Seconds::new(3));

        tokio::time::sleep(TICK_PERIOD * 10).await;
        assert!(drain(&rx).is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn test_idle_state_survives_unread_backlog() {
        let (req_tx, req_rx) = async_channel::bounded(1);
        let (tx, rx) = async_channel::unbounded();
        for _ in 0..100 {
            tx.send(CountdownState::default()).await.unwrap();
        }
        let _service = TaskGuard::spawn(run_service(req_rx, tx, TICK_PERIOD));

        req_tx.send(CountdownRequest::Start).await.unwrap();
        tokio::time::sleep(TICK_PERIOD * 7).await;

        let states = drain(&rx);
        assert_eq!(states.len(), 107);
        let last = states.last().unwrap();
        assert_eq!(last.seconds_remaining, Seconds::ZERO);
        assert!(!last.is_running);
    }
}
