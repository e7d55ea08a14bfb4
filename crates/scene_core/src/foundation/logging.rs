//! Logging utilities and structured logging support

pub use log::{debug, info, warn, error, trace};

use crate::core::config::EngineConfig;

/// Initialize the logging system from `RUST_LOG`
///
/// Returns `false` if a logger was already installed.
pub fn init() -> bool {
    env_logger::try_init().is_ok()
}

/// Initialize the logging system with the configured default level
///
/// `RUST_LOG` still overrides `config.log_level` when set.
pub fn init_with_config(config: &EngineConfig) -> bool {
    let env = env_logger::Env::default().default_filter_or(config.log_level.as_str());
    env_logger::Builder::from_env(env).try_init().is_ok()
}
