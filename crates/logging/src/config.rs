//! # Logging Configuration
//!
//! Configuration for the logging subsystem.
//! Supports environment variables and programmatic configuration.

use std::{fmt, path::Path, str::FromStr};

use serde::{Deserialize, Serialize};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{EnvFilter, Layer, Registry, fmt as layer_fmt, prelude::*};

/// Console output format.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    Json,
    #[default]
    Pretty,
    Compact,
}

impl FromStr for LogFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "json" => Ok(Self::Json),
            "pretty" => Ok(Self::Pretty),
            "compact" => Ok(Self::Compact),
            other => Err(format!("Unknown log format: {}", other)),
        }
    }
}

impl fmt::Display for LogFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Json => "json",
            Self::Pretty => "pretty",
            Self::Compact => "compact",
        };
        f.write_str(name)
    }
}

/// Logging configuration structure.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub struct LoggingConfig {
    /// Filter directives in `RUST_LOG` syntax
    #[serde(default = "default_level")]
    pub level: String,

    /// Console output format
    #[serde(default)]
    pub format: LogFormat,

    /// Optional log file path, rolled daily
    #[serde(default)]
    pub log_file: Option<String>,

    /// Environment (development, testing, production)
    #[serde(default = "default_environment")]
    pub environment: String,
}

fn default_level() -> String { "info".to_string() }

fn default_environment() -> String { "development".to_string() }

type BoxedLayer = Box<dyn Layer<Registry> + Send + Sync>;

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level:       default_level(),
            format:      LogFormat::default(),
            log_file:    None,
            environment: default_environment(),
        }
    }
}

impl LoggingConfig {
    /// Create configuration from environment variables.
    ///
    /// `RUST_LOG`, `LOANTRACK_LOG_FORMAT`, `LOANTRACK_LOG_FILE` and
    /// `LOANTRACK_ENV` take precedence over the arguments. An unknown format
    /// falls back to the default.
    pub fn from_env(level: &str, format: &str, log_file: Option<&str>) -> Self {
        let format = std::env::var("LOANTRACK_LOG_FORMAT").unwrap_or_else(|_| format.to_string());

        Self {
            level: std::env::var("RUST_LOG").unwrap_or_else(|_| level.to_string()),
            format: format.parse().unwrap_or_default(),
            log_file: std::env::var("LOANTRACK_LOG_FILE")
                .ok()
                .or(log_file.map(|s| s.to_string())),
            environment: std::env::var("LOANTRACK_ENV").unwrap_or_else(|_| default_environment()),
        }
    }

    /// Build the filter from `level`, falling back to `info` on invalid directives.
    pub fn filter(&self) -> EnvFilter { EnvFilter::try_new(&self.level).unwrap_or_else(|_| EnvFilter::new("info")) }

    /// Build the tracing subscriber from this configuration.
    ///
    /// # Returns
    ///
    /// The subscriber and, when a log file is configured, the guard of its
    /// background writer.
    pub fn build(&self) -> (Box<dyn tracing::Subscriber + Send + Sync>, Option<WorkerGuard>) {
        let mut layers: Vec<BoxedLayer> = vec![self.console_layer()];

        let guard = self.log_file.as_deref().map(|log_file| {
            let (layer, guard) = file_layer(Path::new(log_file));
            layers.push(layer);
            guard
        });

        let subscriber = Registry::default().with(layers).with(self.filter());
        (Box::new(subscriber), guard)
    }

    fn console_layer(&self) -> BoxedLayer {
        let timer = layer_fmt::time::UtcTime::rfc_3339();
        match self.format {
            LogFormat::Json => {
                layer_fmt::layer()
                    .json()
                    .with_current_span(true)
                    .with_timer(timer)
                    .boxed()
            },
            LogFormat::Pretty => layer_fmt::layer().pretty().with_timer(timer).boxed(),
            LogFormat::Compact => layer_fmt::layer().compact().with_timer(timer).boxed(),
        }
    }
}

/// JSON file output through a non-blocking daily rolling appender.
fn file_layer(path: &Path) -> (BoxedLayer, WorkerGuard) {
    let directory = path
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new("."));
    let file_name = path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| "loantrack.log".to_string());

    let appender = tracing_appender::rolling::daily(directory, file_name);
    let (writer, guard) = tracing_appender::non_blocking(appender);
    let layer = layer_fmt::layer()
        .json()
        .with_ansi(false)
        .with_timer(layer_fmt::time::UtcTime::rfc_3339())
        .with_writer(writer)
        .boxed();

    (layer, guard)
}

#[cfg(test)]
mod tests {
    use serial_test::serial;

    use super::*;

    fn clear_env() {
        // Safe in test context, serialised by `serial`
        unsafe {
            std::env::remove_var("RUST_LOG");
            std::env::remove_var("LOANTRACK_LOG_FORMAT");
            std::env::remove_var("LOANTRACK_LOG_FILE");
            std::env::remove_var("LOANTRACK_ENV");
        }
    }

    #[test]
    #[serial]
    fn test_config_from_arguments() {
        clear_env();
        let config = LoggingConfig::from_env("warn", "json", None);
        assert_eq!(config.level, "warn");
        assert_eq!(config.format, LogFormat::Json);
        assert_eq!(config.environment, "development");
        assert!(config.log_file.is_none());
    }

    #[test]
    #[serial]
    fn test_config_from_env() {
        clear_env();
        // Safe in test context, serialised by `serial`
        unsafe {
            std::env::set_var("RUST_LOG", "debug,sqlx=warn");
            std::env::set_var("LOANTRACK_LOG_FORMAT", "compact");
            std::env::set_var("LOANTRACK_ENV", "production");
        }

        let config = LoggingConfig::from_env("info", "json", None);
        assert_eq!(config.level, "debug,sqlx=warn");
        assert_eq!(config.format, LogFormat::Compact);
        assert_eq!(config.environment, "production");

        clear_env();
    }

    #[test]
    #[serial]
    fn test_unknown_format_falls_back() {
        clear_env();
        let config = LoggingConfig::from_env("info", "xml", None);
        assert_eq!(config.format, LogFormat::Pretty);
    }

    #[test]
    fn test_format_parse() {
        assert_eq!("JSON".parse::<LogFormat>(), Ok(LogFormat::Json));
        assert!("yaml".parse::<LogFormat>().is_err());
        assert_eq!(LogFormat::Compact.to_string(), "compact");
    }

    #[test]
    fn test_build_without_file_has_no_guard() {
        let config = LoggingConfig {
            format: LogFormat::Json,
            ..Default::default()
        };
        let (_subscriber, guard) = config.build();
        assert!(guard.is_none());
    }

    #[test]
    fn test_build_with_file_keeps_guard() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("loantrack.log");
        let config = LoggingConfig {
            log_file: Some(path.to_string_lossy().into_owned()),
            ..Default::default()
        };
        let (_subscriber, guard) = config.build();
        assert!(guard.is_some());
    }
}
