//! # Database Configuration
//!
//! Database connection settings for the CLI, read from `DATABASE_URL` or the
//! individual `LOANTRACK_DATABASE_*` variables.

use std::net::SocketAddr;

/// Database configuration for CLI
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DatabaseConfig {
    /// Database host address
    pub host:     String,
    /// Database port number
    pub port:     u16,
    /// Database name
    pub database: String,
    /// Database username
    pub username: String,
    /// Database password
    pub password: String,
    /// SSL mode
    pub ssl_mode: String,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            host:     "localhost".to_owned(),
            port:     5432,
            database: "loantrack".to_owned(),
            username: "loantrack".to_owned(),
            password: String::new(),
            ssl_mode: "prefer".to_owned(),
        }
    }
}

/// Errors that can occur when parsing database configuration.
#[derive(Debug, thiserror::Error)]
pub enum DatabaseConfigError {
    /// The port number could not be parsed as a valid number.
    #[error("Invalid port number: {value}")]
    InvalidPort {
        /// The invalid port value that was provided.
        value: String,
    },
}

impl DatabaseConfig {
    /// Creates a new DatabaseConfig from environment variables.
    ///
    /// Unset variables keep their defaults. Returns `Err` if the port is not a
    /// valid number.
    pub fn from_env() -> Result<Self, DatabaseConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Builds the configuration from an arbitrary variable source.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, DatabaseConfigError> {
        let defaults = Self::default();

        let port = match lookup("LOANTRACK_DATABASE_PORT") {
            Some(value) => {
                value
                    .parse::<u16>()
                    .map_err(|_e| DatabaseConfigError::InvalidPort { value })?
            },
            None => defaults.port,
        };

        Ok(Self {
            host: lookup("LOANTRACK_DATABASE_HOST").unwrap_or(defaults.host),
            port,
            database: lookup("LOANTRACK_DATABASE_NAME").unwrap_or(defaults.database),
            username: lookup("LOANTRACK_DATABASE_USER").unwrap_or(defaults.username),
            password: lookup("LOANTRACK_DATABASE_PASSWORD").unwrap_or(defaults.password),
            ssl_mode: lookup("LOANTRACK_DATABASE_SSL_MODE").unwrap_or(defaults.ssl_mode),
        })
    }
}

/// Resolves the connection URL.
///
/// A non-empty `DATABASE_URL` wins; otherwise the URL is assembled from the
/// `LOANTRACK_DATABASE_*` parts.
pub fn database_url_from_env() -> Result<String, DatabaseConfigError> {
    if let Ok(url) = std::env::var("DATABASE_URL")
        && !url.trim().is_empty()
    {
        return Ok(url);
    }

    Ok(build_database_url(&DatabaseConfig::from_env()?))
}

/// Builds the DATABASE_URL from DatabaseConfig
///
/// # Arguments
///
/// * `config` - The database configuration to use
///
/// # Returns
///
/// A PostgreSQL connection URL string.
pub fn build_database_url(config: &DatabaseConfig) -> String {
    let encoded_username = percent_encode_userinfo(&config.username);
    let encoded_password = percent_encode_userinfo(&config.password);
    format!(
        "postgres://{}:{}@{}:{}/{}?sslmode={}",
        encoded_username, encoded_password, config.host, config.port, config.database, config.ssl_mode
    )
}

/// Percent-encoding for username/password in PostgreSQL URIs.
///
/// Everything except RFC 3986 unreserved characters is encoded byte by byte.
fn percent_encode_userinfo(s: &str) -> String {
    const HEX: &[u8; 16] = b"0123456789ABCDEF";

    let mut result = String::with_capacity(s.len().saturating_mul(3));
    for byte in s.bytes() {
        if byte.is_ascii_alphanumeric() || matches!(byte, b'-' | b'_' | b'.' | b'~') {
            result.push(char::from(byte));
        }
        else {
            result.push('%');
            result.push(char::from(HEX[usize::from(byte >> 4)]));
            result.push(char::from(HEX[usize::from(byte & 0x0F)]));
        }
    }
    result
}

/// Parses a host and port into a SocketAddr.
///
/// # Arguments
///
/// * `host` - The host string to parse
/// * `port` - The port number
///
/// # Returns
///
/// A `Result` containing the parsed `SocketAddr` or an error if parsing fails.
pub fn parse_socket_addr(host: &str, port: u16) -> Result<SocketAddr, std::net::AddrParseError> {
    // IPv6 literals need brackets before the port
    let addr_str = if host.contains(':') && !host.starts_with('[') {
        format!("[{}]:{}", host, port)
    }
    else {
        format!("{}:{}", host, port)
    };
    addr_str.parse()
}
