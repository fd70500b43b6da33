//! # CLI Commands
//!
//! Subcommands of the `loantrack` binary and their arguments.

pub mod completions;
pub mod create_admin;
pub mod migrate;
pub mod validate;

use std::{fmt, path::PathBuf};

use clap::{Args, Subcommand};

/// Available commands for the Loantrack CLI
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Start the API server (runs migrations and seeds first)
    Serve(ServeArgs),

    /// Run database migrations
    Migrate(MigrateArgs),

    /// Create an administrator account
    CreateAdmin(CreateAdminArgs),

    /// Generate shell completions
    Completions(CompletionsArgs),

    /// Verify configuration
    Validate,
}

/// Arguments for the serve command
#[derive(Args, Debug)]
pub struct ServeArgs {
    /// Server host to bind to
    #[arg(long, env = "LOANTRACK_HOST", default_value = "0.0.0.0")]
    pub host: String,

    /// Server port to bind to
    #[arg(short, long, env = "LOANTRACK_PORT", default_value = "8080")]
    pub port: u16,

    /// Enable TLS/HTTPS
    #[arg(long, env = "LOANTRACK_TLS", requires_all = ["tls_cert", "tls_key"])]
    pub tls: bool,

    /// TLS certificate file path
    #[arg(long, env = "LOANTRACK_TLS_CERT", requires = "tls")]
    pub tls_cert: Option<PathBuf>,

    /// TLS key file path
    #[arg(long, env = "LOANTRACK_TLS_KEY", requires = "tls")]
    pub tls_key: Option<PathBuf>,

    /// PEM encoded RSA private key used to sign tokens
    #[arg(long, env = "LOANTRACK_RSA_PRIVATE_KEY_PATH")]
    pub rsa_private_key: PathBuf,

    /// PEM encoded RSA public key used to verify tokens
    #[arg(long, env = "LOANTRACK_RSA_PUBLIC_KEY_PATH")]
    pub rsa_public_key: PathBuf,

    /// Issuer written to and required from tokens
    #[arg(long, env = "LOANTRACK_JWT_ISSUER", default_value = "self")]
    pub jwt_issuer: String,

    /// Token and cookie lifetime in seconds
    #[arg(long, env = "LOANTRACK_JWT_EXPIRATION_SECONDS", default_value = "1800")]
    pub jwt_expiration_seconds: u64,

    /// Mark the auth cookie `Secure`
    #[arg(long, env = "LOANTRACK_COOKIE_SECURE")]
    pub cookie_secure: bool,

    /// Comma separated list of allowed CORS origins
    #[arg(long, env = "LOANTRACK_CORS_ALLOWED_ORIGINS", default_value = "http://localhost:5173")]
    pub cors_allowed_origins: String,
}

/// Arguments for the migrate command
#[derive(Args, Debug)]
pub struct MigrateArgs {
    /// List pending migrations without applying them
    #[arg(long)]
    pub dry_run: bool,

    /// Roll back the last applied migration
    #[arg(long, conflicts_with = "dry_run")]
    pub rollback: bool,

    /// Skip the reference data seeds after migrating
    #[arg(long)]
    pub no_seed: bool,
}

/// Arguments for the create-admin command
#[derive(Args)]
pub struct CreateAdminArgs {
    /// Login email of the new administrator
    #[arg(long)]
    pub email: String,

    /// Initial password
    #[arg(long, env = "LOANTRACK_ADMIN_PASSWORD", hide_env_values = true)]
    pub password: String,

    /// Display name
    #[arg(long, default_value = "Administrator")]
    pub full_name: String,
}

impl fmt::Debug for CreateAdminArgs {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CreateAdminArgs")
            .field("email", &self.email)
            .field("password", &"[REDACTED]")
            .field("full_name", &self.full_name)
            .finish()
    }
}

/// Arguments for the completions command
#[derive(Args, Debug)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    #[arg(value_enum)]
    pub shell: clap_complete::Shell,
}
