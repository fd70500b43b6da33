//! # CLI Validate Command
//!
//! Configuration validation for the Loantrack CLI. Reports every problem at
//! once instead of stopping at the first.

use std::path::Path;

use auth::{JwtConfig, JwtKeys};
use error::{AppError, Result};
use tracing::info;

use crate::{
    config::DatabaseConfig,
    tls::{load_certs, load_private_key},
};

/// Variables `serve` cannot start without
const REQUIRED_VARS: [&str; 2] = ["LOANTRACK_RSA_PRIVATE_KEY_PATH", "LOANTRACK_RSA_PUBLIC_KEY_PATH"];

/// Validates the process environment
pub fn validate() -> Result<()> {
    info!(target: "validate", "Validating configuration...");

    let problems = check(|name| std::env::var(name).ok());
    if !problems.is_empty() {
        return Err(AppError::config(format!(
            "Invalid configuration: {}",
            problems.join("; ")
        )));
    }

    info!(target: "validate", "Configuration is valid");
    Ok(())
}

/// Collects configuration problems from a variable source.
pub fn check(lookup: impl Fn(&str) -> Option<String>) -> Vec<String> {
    let mut problems = Vec::new();
    let present = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());

    let missing: Vec<&str> = REQUIRED_VARS
        .iter()
        .copied()
        .filter(|&name| present(name).is_none())
        .collect();
    if !missing.is_empty() {
        problems.push(format!("Missing required environment variables: {}", missing.join(", ")));
    }

    if present("DATABASE_URL").is_none()
        && let Err(e) = DatabaseConfig::from_lookup(&lookup)
    {
        problems.push(e.to_string());
    }

    if let Some(port) = present("LOANTRACK_PORT")
        && port.parse::<u16>().is_err()
    {
        problems.push(format!("LOANTRACK_PORT is not a valid port: {}", port));
    }

    let expiration = present("LOANTRACK_JWT_EXPIRATION_SECONDS");
    let expiration_seconds = match expiration.as_deref().map(str::parse::<u64>) {
        Some(Ok(0)) | Some(Err(_)) => {
            problems.push("LOANTRACK_JWT_EXPIRATION_SECONDS must be a positive number of seconds".to_string());
            None
        },
        Some(Ok(seconds)) => Some(seconds),
        None => Some(JwtConfig::default().expiration_seconds),
    };

    if let (Some(private), Some(public), Some(expiration_seconds)) = (
        present("LOANTRACK_RSA_PRIVATE_KEY_PATH"),
        present("LOANTRACK_RSA_PUBLIC_KEY_PATH"),
        expiration_seconds,
    ) {
        let config = JwtConfig {
            issuer: present("LOANTRACK_JWT_ISSUER").unwrap_or_else(|| JwtConfig::default().issuer),
            expiration_seconds,
        };
        if let Err(e) = JwtKeys::from_files(Path::new(&private), Path::new(&public), config) {
            problems.push(format!("RSA key pair is unusable: {}", e.message()));
        }
    }

    if present("LOANTRACK_TLS").is_some_and(|v| is_truthy(&v)) {
        match (present("LOANTRACK_TLS_CERT"), present("LOANTRACK_TLS_KEY")) {
            (Some(cert), Some(key)) => {
                if let Err(e) = load_certs(Path::new(&cert)) {
                    problems.push(format!("TLS certificate {}: {}", cert, e));
                }
                if let Err(e) = load_private_key(Path::new(&key)) {
                    problems.push(format!("TLS key {}: {}", key, e));
                }
            },
            _ => problems.push("LOANTRACK_TLS requires LOANTRACK_TLS_CERT and LOANTRACK_TLS_KEY".to_string()),
        }
    }

    problems
}

/// Boolean values accepted for flags set through the environment.
fn is_truthy(value: &str) -> bool { matches!(value.trim().to_ascii_lowercase().as_str(), "1" | "true" | "yes" | "on") }
