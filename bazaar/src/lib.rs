mod app;
pub mod commands;
pub mod display;
pub mod events;
pub mod logging;
pub mod notifications;
pub mod testers;

pub use app::{repl, App};

// Always expose testing module (integration tests need it)
pub mod testing;
