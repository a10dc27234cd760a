//! Tracing setup for the command-line front end.
//!
//! Logs always go to stderr so that stdout carries only acknowledgements.
//!
//! # Environment Variables
//!
//! - `LOG_FORMAT`: `text` (default) or `json`
//! - `RUST_LOG`: level filter (default: `warn`)

use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Log output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    #[default]
    Text,
    Json,
}

impl LogFormat {
    /// Parse a format name. Anything other than `json` selects text.
    pub fn from_name(name: &str) -> Self {
        match name.to_lowercase().as_str() {
            "json" => LogFormat::Json,
            _ => LogFormat::Text,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoggingConfig {
    pub format: LogFormat,
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            format: LogFormat::Text,
            level: "warn".to_string(),
        }
    }
}

impl LoggingConfig {
    pub fn from_env() -> Self {
        let format = std::env::var("LOG_FORMAT")
            .map(|value| LogFormat::from_name(&value))
            .unwrap_or_default();
        let level = std::env::var("RUST_LOG").unwrap_or_else(|_| "warn".to_string());
        Self { format, level }
    }
}

/// Install the global subscriber. Call once at startup.
pub fn init_logging(config: &LoggingConfig) {
    let filter =
        EnvFilter::try_new(&config.level).unwrap_or_else(|_| EnvFilter::new("warn"));

    match config.format {
        LogFormat::Json => {
            tracing_subscriber::registry()
                .with(filter)
                .with(fmt::layer().json().with_writer(std::io::stderr))
                .init();
        }
        LogFormat::Text => {
            tracing_subscriber::registry()
                .with(filter)
                .with(fmt::layer().with_target(false).with_writer(std::io::stderr))
                .init();
        }
    }
}
