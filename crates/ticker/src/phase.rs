use palette::{FromColor, Mix, Oklab, Srgb};
use strum::{Display as StrumDisplay, EnumIter};

pub const RED: Srgb<f64> = Srgb::new(1.0, 0.0, 0.0);
pub const BLUE: Srgb<f64> = Srgb::new(0.0, 0.0, 1.0);
pub const YELLOW: Srgb<f64> = Srgb::new(1.0, 1.0, 0.0);
pub const WHITE: Srgb<f64> = Srgb::new(1.0, 1.0, 1.0);

pub const START_DEGREES: f64 = 0.0;
pub const END_DEGREES: f64 = 360.0;

/// Mixes two colors in Oklab. `fraction` 0.0 yields `from`, 1.0 yields `to`.
pub fn blend(from: Srgb<f64>, to: Srgb<f64>, fraction: f64) -> Srgb<f64> {
    let mixed = Oklab::from_color(from).mix(Oklab::from_color(to), fraction);
    Srgb::from_color(mixed)
}

/// The color halfway between `color` and white.
pub fn washed(color: Srgb<f64>) -> Srgb<f64> {
    blend(color, WHITE, 0.5)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, StrumDisplay, EnumIter)]
#[strum(serialize_all = "lowercase")]
pub enum AnimationPhase {
    #[default]
    Start,
    End,
    // Never produced by the countdown; kept so the target table is total.
    Finish,
}

impl AnimationPhase {
    pub fn next(self) -> Self {
        match self {
            Self::Start => Self::End,
            Self::End => Self::Start,
            Self::Finish => Self::End,
        }
    }

    pub fn target(self, colors: &PhaseColors) -> PhaseTarget {
        match self {
            Self::Start => PhaseTarget::new(colors.start, START_DEGREES),
            Self::End => PhaseTarget::new(colors.end, END_DEGREES),
            Self::Finish => PhaseTarget::new(colors.end, START_DEGREES),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PhaseTarget {
    pub color: Srgb<f64>,
    pub degrees: f64,
}

impl PhaseTarget {
    pub fn new(color: Srgb<f64>, degrees: f64) -> Self {
        Self { color, degrees }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PhaseColors {
    pub start: Srgb<f64>,
    pub end: Srgb<f64>,
}

impl Default for PhaseColors {
    fn default() -> Self {
        Self {
            start: washed(RED),
            end: washed(BLUE),
        }
    }
}
