/// A cubic bezier timing curve anchored at (0, 0) and (1, 1).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CubicBezier {
    x1: f64,
    y1: f64,
    x2: f64,
    y2: f64,
}

/// Quick acceleration, long deceleration.
pub const FAST_OUT_SLOW_IN: CubicBezier = CubicBezier::new(0.4, 0.0, 0.2, 1.0);
pub const LINEAR: CubicBezier = CubicBezier::new(0.0, 0.0, 1.0, 1.0);

const BISECTION_STEPS: usize = 32;

impl CubicBezier {
    pub const fn new(x1: f64, y1: f64, x2: f64, y2: f64) -> Self {
        Self { x1, y1, x2, y2 }
    }

    fn evaluate(a: f64, b: f64, t: f64) -> f64 {
        let inv = 1.0 - t;
        3.0 * a * inv * inv * t + 3.0 * b * inv * t * t + t * t * t
    }

    /// Maps a linear fraction in [0, 1] onto the curve.
    pub fn ease(&self, fraction: f64) -> f64 {
        if fraction <= 0.0 {
            return 0.0;
        }
        if fraction >= 1.0 {
            return 1.0;
        }

        // x(t) is monotonic for control points inside the unit square
        let (mut lo, mut hi) = (0.0, 1.0);
        for _ in 0..BISECTION_STEPS {
            let mid = (lo + hi) / 2.0;
            if Self::evaluate(self.x1, self.x2, mid) < fraction {
                lo = mid;
            } else {
                hi = mid;
            }
        }

        Self::evaluate(self.y1, self.y2, (lo + hi) / 2.0)
    }
}
