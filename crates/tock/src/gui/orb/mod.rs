pub mod model;
pub mod view;

pub use model::{Orb, OrbGeometry, Point};
pub use view::draw;

pub const FACE_RADIUS_DIVISOR: f64 = 2.2; // face radius = min dimension / divisor
pub const DOT_OFFSET_FACTOR: f64 = 0.05; // dot distance from the top edge, relative to min dimension
pub const LABEL_FONT_SIZE: f64 = 14.0;
