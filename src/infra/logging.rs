//! Tracing setup for the chat shell. Logs go to stderr so they never
//! fight the TUI for stdout; `RUST_LOG` overrides the configured level.

use tracing_subscriber::EnvFilter;

use crate::infra::{config::LogConfig, error::AppError};

pub fn init(config: &LogConfig) -> Result<(), AppError> {
    let env_override = std::env::var("RUST_LOG").ok();

    tracing_subscriber::fmt()
        .with_env_filter(level_filter(env_override.as_deref(), &config.level))
        .with_writer(std::io::stderr)
        .with_target(true)
        .try_init()
        .map_err(AppError::LoggingInit)
}

/// `RUST_LOG` wins when set; otherwise the config file's level applies.
fn level_filter(env_override: Option<&str>, configured_level: &str) -> EnvFilter {
    match env_override {
        Some(directives) => EnvFilter::new(directives),
        None => EnvFilter::new(configured_level),
    }
}
