use crate::phase::AnimationPhase;
use derive_more::{Deref, Display, From, Into};
use std::time::Duration;

pub const TOTAL_SECONDS: Seconds = Seconds(6);
pub const TICK_PERIOD: Duration = Duration::from_secs(1);

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Display, Deref, From, Into,
)]
pub struct Seconds(u32);

impl Seconds {
    pub const ZERO: Self = Self(0);

    pub fn new(value: u32) -> Self {
        Self(value)
    }

    pub fn is_zero(&self) -> bool {
        self.0 == 0
    }

    pub fn decrement(self) -> Self {
        Self(self.0.saturating_sub(1))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CountdownState {
    pub phase: AnimationPhase,
    pub seconds_remaining: Seconds,
    pub is_running: bool,
}

pub type Subscriber = Box<dyn FnMut(&CountdownState) + Send>;

/// Owns the countdown state and notifies subscribers after every mutation.
///
/// `start` and `tick` are the synchronous steps of the loop; `run` drives them with a timer.
/// Guarding against a second `start` while running is left to the caller.
pub struct Countdown {
    state: CountdownState,
    subscribers: Vec<Subscriber>,
}

impl Countdown {
    pub fn new() -> Self {
        Self {
            state: CountdownState::default(),
            subscribers: Vec::new(),
        }
    }

    pub fn state(&self) -> CountdownState {
        self.state
    }

    pub fn subscribe(&mut self, subscriber: impl FnMut(&CountdownState) + Send + 'static) {
        self.subscribers.push(Box::new(subscriber));
    }

    fn notify(&mut self) {
        let state = self.state;
        for subscriber in &mut self.subscribers {
            subscriber(&state);
        }
    }

    pub fn start(&mut self) {
        self.state.is_running = true;
        self.state.seconds_remaining = TOTAL_SECONDS;
        self.advance();
        self.notify();
    }

    /// One elapsed period. Returns whether the countdown is still running afterwards.
    pub fn tick(&mut self) -> bool {
        if !self.state.is_running {
            return false;
        }
        self.state.seconds_remaining = self.state.seconds_remaining.decrement();
        self.advance();
        self.notify();
        self.state.is_running
    }

    fn advance(&mut self) {
        if self.state.seconds_remaining.is_zero() {
            self.state.is_running = false;
        } else {
            self.state.phase = self.state.phase.next();
        }
    }

    /// Runs a full countdown, sleeping `period` between ticks.
    ///
    /// Dropping the future cancels the pending sleep and leaves the state as last notified.
    pub async fn run(&mut self, period: Duration) {
        self.start();
        while self.state.is_running {
            tokio::time::sleep(period).await;
            self.tick();
        }
    }
}

impl Default for Countdown {
    fn default() -> Self {
        Self::new()
    }
}
