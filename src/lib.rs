pub mod api;
pub mod auth;
pub mod cli;
pub mod config;
pub mod editor;

use once_cell::sync::OnceCell;

// Global Config instance, initialized once by the binary.
static CONFIG: OnceCell<config::Config> = OnceCell::new();

/// Get a reference to the global Config
pub fn global_config() -> &'static config::Config {
    CONFIG.get().expect("Config not initialized")
}

/// Install the global Config. Fails when called twice.
pub fn init_config(config: config::Config) -> anyhow::Result<()> {
    CONFIG
        .set(config)
        .map_err(|_| anyhow::anyhow!("Config already initialized"))
}
