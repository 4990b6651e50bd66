use crate::easing::{CubicBezier, FAST_OUT_SLOW_IN};
use crate::phase::{AnimationPhase, PhaseColors};
use palette::{FromColor, Mix, Oklab, Srgb};
use std::time::{Duration, Instant};

pub const DEFAULT_DURATION: Duration = Duration::from_millis(1000);

pub trait Interpolate: Copy {
    fn interpolate(self, other: Self, fraction: f64) -> Self;
}

impl Interpolate for f64 {
    fn interpolate(self, other: Self, fraction: f64) -> Self {
        self + (other - self) * fraction
    }
}

impl Interpolate for Oklab<f64> {
    fn interpolate(self, other: Self, fraction: f64) -> Self {
        self.mix(other, fraction)
    }
}

/// Eased animation of a single value towards its latest target.
#[derive(Debug, Clone)]
pub struct Transition<T> {
    from: T,
    to: T,
    started: Option<Instant>,
    duration: Duration,
    easing: CubicBezier,
}

impl<T: Interpolate> Transition<T> {
    pub fn new(initial: T, duration: Duration, easing: CubicBezier) -> Self {
        Self {
            from: initial,
            to: initial,
            started: None,
            duration,
            easing,
        }
    }

    pub fn set_duration(&mut self, duration: Duration) {
        self.duration = duration;
    }

    fn fraction(&self, now: Instant) -> f64 {
        match self.started {
            None => 1.0,
            Some(_) if self.duration.is_zero() => 1.0,
            Some(started) => {
                let elapsed = now.saturating_duration_since(started);
                (elapsed.as_secs_f64() / self.duration.as_secs_f64()).min(1.0)
            }
        }
    }

    pub fn value_at(&self, now: Instant) -> T {
        let fraction = self.fraction(now);
        if fraction >= 1.0 {
            return self.to;
        }
        self.from.interpolate(self.to, self.easing.ease(fraction))
    }

    pub fn is_running(&self, now: Instant) -> bool {
        self.fraction(now) < 1.0
    }

    /// Starts animating towards `to` from whatever is displayed at `now`.
    pub fn retarget(&mut self, to: T, now: Instant) {
        self.from = self.value_at(now);
        self.to = to;
        self.started = Some(now);
    }

    /// Jumps to `value` without animating.
    pub fn snap(&mut self, value: T) {
        self.from = value;
        self.to = value;
        self.started = None;
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TransitionSnapshot {
    pub color: Srgb<f64>,
    pub degrees: f64,
}

/// Color and rotation animations keyed on the animation phase.
#[derive(Debug, Clone)]
pub struct PhaseTransition {
    phase: AnimationPhase,
    colors: PhaseColors,
    color: Transition<Oklab<f64>>,
    rotation: Transition<f64>,
}

impl PhaseTransition {
    pub fn new(phase: AnimationPhase, colors: PhaseColors, duration: Duration) -> Self {
        let target = phase.target(&colors);
        Self {
            phase,
            colors,
            color: Transition::new(Oklab::from_color(target.color), duration, FAST_OUT_SLOW_IN),
            rotation: Transition::new(target.degrees, duration, FAST_OUT_SLOW_IN),
        }
    }

    pub fn phase(&self) -> AnimationPhase {
        self.phase
    }

    /// Retargets both animations when the phase changes. Repeating the current phase is a no-op.
    pub fn update(&mut self, phase: AnimationPhase, now: Instant) {
        if phase == self.phase {
            return;
        }
        self.phase = phase;
        let target = phase.target(&self.colors);
        self.color.retarget(Oklab::from_color(target.color), now);
        self.rotation.retarget(target.degrees, now);
    }

    /// Swaps the color table. The current phase color is applied immediately.
    pub fn set_colors(&mut self, colors: PhaseColors) {
        self.colors = colors;
        let target = self.phase.target(&colors);
        self.color.snap(Oklab::from_color(target.color));
    }

    pub fn set_duration(&mut self, duration: Duration) {
        self.color.set_duration(duration);
        self.rotation.set_duration(duration);
    }

    pub fn is_running(&self, now: Instant) -> bool {
        self.color.is_running(now) || self.rotation.is_running(now)
    }

    pub fn snapshot(&self, now: Instant) -> TransitionSnapshot {
        TransitionSnapshot {
            color: Srgb::from_color(self.color.value_at(now)),
            degrees: self.rotation.value_at(now),
        }
    }
}
