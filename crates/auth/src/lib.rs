//! # Authentication and Authorization
//!
//! - Argon2id password hashing and verification
//! - RS256 JWT issuance and validation
//! - Route authorization rules over token scopes

pub mod jwt;
pub mod password;
pub mod scopes;

// Re-export commonly used types
pub use jwt::{Claims, JwtConfig, JwtKeys, extract_bearer_token};
pub use password::{PasswordConfig, PasswordError, hash_password, verify_password};
pub use scopes::{Access, Authority, required_access};
pub use secrecy;
