pub mod countdown;
pub mod runtime;
pub mod server;
