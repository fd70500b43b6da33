//! # Loantrack API Server
//!
//! Axum-based HTTP API for the Loantrack device and loan tracker.
//!
//! ## Modules
//!
//! - [`auth`]: Login and logout endpoints
//! - [`dto`]: Request/response data transfer objects
//! - [`extract`]: Extractors that reject with the standard error body
//! - [`handlers`]: Resource handlers (users, locations, devices, bins, loans)
//! - [`middleware`]: HTTP middleware (authentication, CORS, security headers, request ids)
//! - [`router`]: API route configuration

use ::auth::JwtKeys;
pub use error::{AppError, Result};

pub mod auth;
pub mod dto;
pub mod extract;
pub mod handlers;
pub mod middleware;
pub mod router;

pub use middleware::security_headers::CorsConfig;
pub use router::create_app_router;

/// Name of the cookie carrying the access token
pub const AUTH_COOKIE: &str = "jwt-token";

/// Application state shared across request handlers
#[derive(Clone, Debug)]
pub struct AppState {
    /// Database connection pool
    pub db:            sea_orm::DbConn,
    /// RS256 signing and verification keys
    pub jwt:           JwtKeys,
    /// Whether the auth cookie carries the `Secure` attribute
    pub cookie_secure: bool,
    /// Cross-origin policy
    pub cors:          CorsConfig,
    /// Whether the server terminates TLS itself (enables HSTS)
    pub enable_tls:    bool,
    /// Server start time for uptime calculation
    pub start_time:    std::time::Instant,
}

impl AppState {
    /// Creates state with default cookie, CORS and TLS settings.
    #[must_use]
    pub fn new(db: sea_orm::DbConn, jwt: JwtKeys) -> Self {
        Self {
            db,
            jwt,
            cookie_secure: false,
            cors: CorsConfig::default(),
            enable_tls: false,
            start_time: std::time::Instant::now(),
        }
    }

    /// Set the `Secure` cookie attribute
    #[must_use]
    pub fn with_cookie_secure(mut self, secure: bool) -> Self {
        self.cookie_secure = secure;
        self
    }

    /// Replace the CORS policy
    #[must_use]
    pub fn with_cors(mut self, cors: CorsConfig) -> Self {
        self.cors = cors;
        self
    }

    /// Mark the server as TLS terminating
    #[must_use]
    pub fn with_tls(mut self, enable_tls: bool) -> Self {
        self.enable_tls = enable_tls;
        self
    }
}
