pub mod control;
pub mod countdown;
pub mod easing;
pub mod phase;
pub mod task;
pub mod transition;
