pub mod app;
pub mod commands;
pub mod ui;

pub use app::{Cli, Commands};
