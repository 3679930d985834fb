//! Log subscriber setup for the CLI.
//!
//! The library only emits `tracing` events; installing a subscriber is left
//! to the binary (or whatever embeds the library). Logs always go to stderr
//! so that reports on stdout stay machine-readable.

use std::env;
use std::io;

use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::error::RepformError;

/// Log output format options.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum LogFormat {
    /// Multi-line human-readable output.
    #[default]
    Pretty,
    /// Single-line output.
    Compact,
    /// One JSON object per event.
    Json,
}

/// Logging configuration.
#[derive(Clone, Debug)]
pub struct LoggingConfig {
    /// Filter directive used when `RUST_LOG` is unset.
    pub level: String,
    pub format: LogFormat,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "warn".into(),
            format: LogFormat::Pretty,
        }
    }
}

impl LoggingConfig {
    /// Reads `LOG_FORMAT` (`json`, `compact`, `pretty`).
    ///
    /// `verbose` raises this crate's level to `debug`.
    pub fn from_env(verbose: bool) -> Self {
        let format = match env::var("LOG_FORMAT").as_deref() {
            Ok("json") => LogFormat::Json,
            Ok("compact") => LogFormat::Compact,
            _ => LogFormat::Pretty,
        };
        let level = if verbose {
            "warn,repform=debug".to_string()
        } else {
            "warn".to_string()
        };
        Self { level, format }
    }

    /// Installs the global subscriber.
    ///
    /// `RUST_LOG`, when set, takes precedence over `level`.
    ///
    /// # Errors
    /// Returns an error if the filter is malformed or a global subscriber is
    /// already installed.
    pub fn init(&self) -> Result<(), RepformError> {
        let env_filter = match env::var("RUST_LOG") {
            Ok(directive) => EnvFilter::try_new(directive),
            Err(_) => EnvFilter::try_new(&self.level),
        }
        .map_err(|e| RepformError::LoggingInit(e.to_string()))?;

        let registry = tracing_subscriber::registry().with(env_filter);

        let result = match self.format {
            LogFormat::Json => registry
                .with(fmt::layer().json().with_writer(io::stderr))
                .try_init(),
            LogFormat::Pretty => registry
                .with(fmt::layer().with_target(true).with_writer(io::stderr))
                .try_init(),
            LogFormat::Compact => registry
                .with(
                    fmt::layer()
                        .compact()
                        .with_target(false)
                        .with_writer(io::stderr),
                )
                .try_init(),
        };

        result.map_err(|e| RepformError::LoggingInit(e.to_string()))
    }
}
