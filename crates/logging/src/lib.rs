//! # Loantrack Logging Infrastructure
//!
//! Structured logging utilities built on `tracing`.
//! Provides subscriber construction, request ids and logging macros.

pub mod config;
pub mod macros;
pub mod request_id;

pub use config::{LogFormat, LoggingConfig};
pub use request_id::{REQUEST_ID_HEADER, RequestId};
// Re-export tracing macros
pub use tracing::{debug, error, info, trace, warn};
pub use tracing_appender::non_blocking::WorkerGuard;

/// Error returned when a global subscriber is already installed.
pub type InitError = tracing::subscriber::SetGlobalDefaultError;

/// Initialize the logging system.
///
/// # Arguments
///
/// * `level` - Default filter directive when `RUST_LOG` is unset
/// * `format` - Output format (json, pretty, compact)
/// * `log_file` - Optional path to a daily rolling log file
///
/// # Returns
///
/// The file writer guard when a log file is configured. It must be held for as
/// long as logs should be flushed to the file.
pub fn init(level: &str, format: &str, log_file: Option<&str>) -> Result<Option<WorkerGuard>, InitError> {
    init_with_config(LoggingConfig::from_env(level, format, log_file))
}

/// Initialize logging with a custom configuration.
pub fn init_with_config(config: LoggingConfig) -> Result<Option<WorkerGuard>, InitError> {
    let (subscriber, guard) = config.build();
    tracing::subscriber::set_global_default(subscriber)?;
    info!(
        level = %config.level,
        format = %config.format,
        environment = %config.environment,
        "Logging initialized"
    );
    Ok(guard)
}
