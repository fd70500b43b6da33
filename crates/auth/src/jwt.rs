//! # JWT Token Management
//!
//! RS256 token issuance and validation. Tokens are signed with an RSA private
//! key and verified with the matching public key, both PEM encoded.

use std::{
    fmt,
    path::Path,
    time::{SystemTime, UNIX_EPOCH},
};

use error::{AppError, Result};
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, errors::ErrorKind};
use serde::{Deserialize, Serialize};

/// Token lifetime and issuer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JwtConfig {
    /// Value of the `iss` claim, checked on validation
    pub issuer:             String,
    /// Seconds between `iat` and `exp`
    pub expiration_seconds: u64,
}

impl Default for JwtConfig {
    fn default() -> Self {
        Self {
            issuer:             "self".to_string(),
            expiration_seconds: 1800,
        }
    }
}

/// JWT claims structure
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    /// Token issuer
    pub iss:   String,

    /// Subject (user email)
    pub sub:   String,

    /// Space separated authority names
    pub scope: String,

    /// Issued at (Unix timestamp)
    pub iat:   u64,

    /// Expiration time (Unix timestamp)
    pub exp:   u64,
}

impl Claims {
    /// Iterate over the authorities in the `scope` claim.
    pub fn scopes(&self) -> impl Iterator<Item = &str> { self.scope.split_whitespace() }
}

/// Signing and verification keys with their configuration.
#[derive(Clone)]
pub struct JwtKeys {
    encoding: EncodingKey,
    decoding: DecodingKey,
    config:   JwtConfig,
}

impl fmt::Debug for JwtKeys {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("JwtKeys")
            .field("encoding", &"[redacted]")
            .field("decoding", &"[redacted]")
            .field("config", &self.config)
            .finish()
    }
}

impl JwtKeys {
    /// Build keys from PEM encoded RSA material.
    ///
    /// # Arguments
    ///
    /// * `private_pem` - RSA private key, PKCS#1 or PKCS#8
    /// * `public_pem` - Matching RSA public key
    /// * `config` - Issuer and lifetime
    ///
    /// # Errors
    ///
    /// Returns a config error if either key cannot be parsed.
    pub fn from_pem(private_pem: &[u8], public_pem: &[u8], config: JwtConfig) -> Result<Self> {
        let encoding = EncodingKey::from_rsa_pem(private_pem)
            .map_err(|e| AppError::config(format!("Invalid RSA private key: {}", e)))?;
        let decoding = DecodingKey::from_rsa_pem(public_pem)
            .map_err(|e| AppError::config(format!("Invalid RSA public key: {}", e)))?;

        Ok(Self {
            encoding,
            decoding,
            config,
        })
    }

    /// Read both keys from PEM files.
    ///
    /// # Errors
    ///
    /// Returns an IO error naming the file that could not be read, or a
    /// config error if a key cannot be parsed.
    pub fn from_files(private_path: &Path, public_path: &Path, config: JwtConfig) -> Result<Self> {
        let private_pem = std::fs::read(private_path)
            .map_err(|e| AppError::from(e).context(format!("Reading {}", private_path.display())))?;
        let public_pem = std::fs::read(public_path)
            .map_err(|e| AppError::from(e).context(format!("Reading {}", public_path.display())))?;

        Self::from_pem(&private_pem, &public_pem, config)
    }

    /// Configuration the keys were built with.
    pub fn config(&self) -> &JwtConfig { &self.config }

    /// Issue a token for `subject` carrying `scope`, valid from now.
    ///
    /// # Errors
    ///
    /// Returns an internal error if the clock is before the epoch or signing fails.
    pub fn issue_token(&self, subject: &str, scope: &str) -> Result<String> {
        let issued_at = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map_err(|e| AppError::internal(format!("Failed to get current time: {}", e)))?
            .as_secs();

        let claims = Claims {
            iss:   self.config.issuer.clone(),
            sub:   subject.to_string(),
            scope: scope.to_string(),
            iat:   issued_at,
            exp:   issued_at + self.config.expiration_seconds,
        };

        self.sign(&claims)
    }

    /// Sign arbitrary claims.
    pub fn sign(&self, claims: &Claims) -> Result<String> {
        jsonwebtoken::encode(&Header::new(Algorithm::RS256), claims, &self.encoding)
            .map_err(|e| AppError::internal(format!("Failed to encode token: {}", e)))
    }

    /// Validate a token and return its claims.
    ///
    /// `exp`, `iss` and `sub` are required and the issuer must match.
    ///
    /// # Errors
    ///
    /// `JwtExpired`, `JwtInvalidSignature` or `JwtInvalidToken`.
    pub fn validate_token(&self, token: &str) -> Result<Claims> {
        let mut validation = Validation::new(Algorithm::RS256);
        validation.set_issuer(&[self.config.issuer.as_str()]);
        validation.set_required_spec_claims(&["exp", "iss", "sub"]);

        jsonwebtoken::decode::<Claims>(token, &self.decoding, &validation)
            .map(|data| data.claims)
            .map_err(|e| {
                match e.kind() {
                    ErrorKind::ExpiredSignature => AppError::JwtExpired,
                    ErrorKind::InvalidSignature => AppError::JwtInvalidSignature,
                    _ => AppError::JwtInvalidToken,
                }
            })
    }
}

/// Extracts the Bearer token from the Authorization header
///
/// # Returns
///
/// The token if the header uses the Bearer scheme and carries a non empty value.
pub fn extract_bearer_token(auth_header: &str) -> Option<&str> {
    let token = auth_header.strip_prefix("Bearer ")?.trim();
    (!token.is_empty()).then_some(token)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_bearer_token() {
        let token = "eyJhbGciOiJSUzI1NiJ9.payload.signature";
        let header = format!("Bearer {}", token);
        assert_eq!(extract_bearer_token(&header), Some(token));
    }

    #[test]
    fn test_extract_bearer_token_invalid_format() {
        assert!(extract_bearer_token("Basic abc123").is_none());
        assert!(extract_bearer_token("Bearer").is_none());
        assert!(extract_bearer_token("Bearer    ").is_none());
        assert!(extract_bearer_token("").is_none());
    }

    #[test]
    fn test_claims_scopes() {
        let claims = Claims {
            iss:   "self".to_string(),
            sub:   "admin@example.com".to_string(),
            scope: "Admin  Employee".to_string(),
            iat:   0,
            exp:   1800,
        };
        assert_eq!(claims.scopes().collect::<Vec<_>>(), vec!["Admin", "Employee"]);
    }

    #[test]
    fn test_invalid_pem_is_config_error() {
        let err = JwtKeys::from_pem(b"garbage", b"garbage", JwtConfig::default()).unwrap_err();
        assert_eq!(err.code(), "CONFIG_ERROR");
    }
}
