pub mod app;
pub mod orb;
pub mod theme;
