use super::{DOT_OFFSET_FACTOR, FACE_RADIUS_DIVISOR};
use crate::config::Appearance;
use palette::Srgb;
use std::time::Instant;
use ticker::countdown::{CountdownState, Seconds};
use ticker::phase::AnimationPhase;
use ticker::transition::PhaseTransition;

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Unrotated layout of the orb inside a drawing area.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OrbGeometry {
    pub center: Point,
    pub face_radius: f64,
    pub dot_center: Point,
}

impl OrbGeometry {
    pub fn calculate(width: f64, height: f64) -> Self {
        let min = width.min(height);
        let center = Point::new(width / 2.0, height / 2.0);
        // 12 o'clock, on the rim of the face
        let dot_center = Point::new(center.x, center.y - min / 2.0 + min * DOT_OFFSET_FACTOR);

        Self {
            center,
            face_radius: min / FACE_RADIUS_DIVISOR,
            dot_center,
        }
    }
}

/// Everything the draw function needs: the animated phase, the label, and the styling.
pub struct Orb {
    pub transition: PhaseTransition,
    pub seconds_remaining: Seconds,
    pub face: Srgb<f64>,
    pub dot_radius: f64,
}

impl Orb {
    pub fn new(appearance: &Appearance) -> Self {
        Self {
            transition: PhaseTransition::new(
                AnimationPhase::default(),
                appearance.phase_colors(),
                appearance.transition_duration(),
            ),
            seconds_remaining: Seconds::ZERO,
            face: appearance.face(),
            dot_radius: appearance.dot_radius,
        }
    }

    pub fn apply(&mut self, state: &CountdownState, now: Instant) {
        self.transition.update(state.phase, now);
        self.seconds_remaining = state.seconds_remaining;
    }

    pub fn restyle(&mut self, appearance: &Appearance) {
        self.face = appearance.face();
        self.dot_radius = appearance.dot_radius;
        self.transition.set_colors(appearance.phase_colors());
        self.transition.set_duration(appearance.transition_duration());
    }

    pub fn is_animating(&self, now: Instant) -> bool {
        self.transition.is_running(now)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    fn state(phase: AnimationPhase, remaining: u32) -> CountdownState {
        CountdownState {
            phase,
            seconds_remaining: Seconds::new(remaining),
            is_running: remaining > 0,
        }
    }

    #[test]
    fn test_geometry_for_square_area() {
        let g = OrbGeometry::calculate(200.0, 200.0);
        assert_eq!(g.center, Point::new(100.0, 100.0));
        assert!((g.face_radius - 200.0 / 2.2).abs() < 1e-9);
        assert_eq!(g.dot_center, Point::new(100.0, 10.0));
    }

    #[test]
    fn test_geometry_uses_smaller_dimension() {
        let g = OrbGeometry::calculate(400.0, 200.0);
        assert_eq!(g.center, Point::new(200.0, 100.0));
        assert!((g.face_radius - 200.0 / 2.2).abs() < 1e-9);
        assert_eq!(g.dot_center, Point::new(200.0, 10.0));
    }

    #[test]
    fn test_dot_sits_on_face_rim() {
        let g = OrbGeometry::calculate(200.0, 200.0);
        let distance = g.center.y - g.dot_center.y;
        assert!((distance - g.face_radius).abs() < 2.0);
    }

    #[test]
    fn test_new_orb_is_idle() {
        let orb = Orb::new(&Appearance::default());
        let now = Instant::now();
        assert_eq!(orb.seconds_remaining, Seconds::ZERO);
        assert!(!orb.is_animating(now));
        assert_eq!(orb.transition.snapshot(now).degrees, 0.0);
    }

    #[test]
    fn test_apply_updates_label_and_animates() {
        let mut orb = Orb::new(&Appearance::default());
        let t0 = Instant::now();

        orb.apply(&state(AnimationPhase::End, 6), t0);
        assert_eq!(orb.seconds_remaining, Seconds::new(6));
        assert!(orb.is_animating(t0 + Duration::from_millis(500)));
        assert_eq!(orb.transition.snapshot(t0 + Duration::from_secs(1)).degrees, 360.0);

        orb.apply(&state(AnimationPhase::Start, 5), t0 + Duration::from_secs(1));
        assert_eq!(orb.seconds_remaining, Seconds::new(5));
        assert_eq!(orb.transition.snapshot(t0 + Duration::from_secs(2)).degrees, 0.0);
    }

    #[test]
    fn test_restyle_changes_duration_and_dot() {
        let mut orb = Orb::new(&Appearance::default());
        let appearance = Appearance {
            dot_radius: 8.0,
            transition_ms: 250,
            ..Appearance::default()
        };
        orb.restyle(&appearance);
        assert_eq!(orb.dot_radius, 8.0);

        let t0 = Instant::now();
        orb.apply(&state(AnimationPhase::End, 6), t0);
        assert!(!orb.is_animating(t0 + Duration::from_millis(250)));
    }
}
