//! Password hashing and verification utilities using Argon2id.
//!
//! Hashes are stored as standard PHC strings
//! (`$argon2id$v=19$m=4096,t=3,p=1$<salt>$<hash>`), so hashes produced by any
//! conforming Argon2 encoder with the same parameters verify here.

use argon2::{
    Algorithm,
    Argon2,
    Params,
    Version,
    password_hash::{self, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
};
use rand::{RngCore, rng};
use secrecy::{ExposeSecret, SecretString};
use thiserror::Error;

/// Errors that can occur during password operations.
#[derive(Debug, Error)]
pub enum PasswordError {
    #[error("Hashing failed: {0}")]
    HashingFailed(String),

    #[error("Verification failed: password does not match")]
    VerificationFailed,

    #[error("Invalid hash format")]
    InvalidHashFormat,
}

/// Configuration for Argon2id password hashing.
#[derive(Debug, Clone)]
pub struct PasswordConfig {
    /// Memory cost in KiB (default: 4096)
    pub memory_cost: u32,
    /// Number of iterations (default: 3)
    pub time_cost:   u32,
    /// Number of lanes (default: 1)
    pub parallelism: u32,
    /// Length of the generated hash (default: 32 bytes)
    pub hash_length: usize,
    /// Length of the salt (default: 16 bytes)
    pub salt_length: usize,
}

impl Default for PasswordConfig {
    fn default() -> Self {
        Self {
            memory_cost: 4096,
            time_cost:   3,
            parallelism: 1,
            hash_length: 32,
            salt_length: 16,
        }
    }
}

/// Hashes a password using Argon2id.
///
/// # Arguments
///
/// * `password` - The password to hash
/// * `config` - Optional configuration for Argon2id parameters
///
/// # Returns
///
/// The PHC encoded hash as a `SecretString`.
///
/// # Example
///
/// ```
/// use auth::password::hash_password;
/// use secrecy::{ExposeSecret, SecretString};
///
/// let password = SecretString::from("correct horse battery staple");
/// let hash = hash_password(&password, None).unwrap();
/// assert!(hash.expose_secret().starts_with("$argon2id$v=19$m=4096,t=3,p=1$"));
/// ```
pub fn hash_password(password: &SecretString, config: Option<PasswordConfig>) -> Result<SecretString, PasswordError> {
    let config = config.unwrap_or_default();

    let mut salt = vec![0u8; config.salt_length];
    rng().fill_bytes(&mut salt);
    let salt = SaltString::encode_b64(&salt).map_err(|e| PasswordError::HashingFailed(e.to_string()))?;

    let params = Params::new(
        config.memory_cost,
        config.time_cost,
        config.parallelism,
        Some(config.hash_length),
    )
    .map_err(|e| PasswordError::HashingFailed(e.to_string()))?;
    let argon2 = Argon2::new(Algorithm::Argon2id, Version::V0x13, params);

    let hash = argon2
        .hash_password(password.expose_secret().as_bytes(), &salt)
        .map_err(|e| PasswordError::HashingFailed(e.to_string()))?;

    Ok(SecretString::from(hash.to_string()))
}

/// Verifies a password against a stored PHC hash.
///
/// The cost parameters are read from the hash itself.
///
/// # Errors
///
/// `InvalidHashFormat` when the stored hash cannot be parsed and
/// `VerificationFailed` when the password does not match.
pub fn verify_password(password: &SecretString, expected_hash: &str) -> Result<(), PasswordError> {
    let parsed = PasswordHash::new(expected_hash).map_err(|_| PasswordError::InvalidHashFormat)?;

    Argon2::default()
        .verify_password(password.expose_secret().as_bytes(), &parsed)
        .map_err(|e| {
            match e {
                password_hash::Error::Password => PasswordError::VerificationFailed,
                _ => PasswordError::InvalidHashFormat,
            }
        })
}
