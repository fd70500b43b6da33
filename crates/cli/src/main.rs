//! # Loantrack CLI
//!
//! Command-line interface for the Loantrack device loan tracker.
//!
//! ## Usage
//!
//! ```bash
//! loantrack serve          # Start the API server (runs migrations automatically)
//! loantrack migrate        # Run database migrations and seeds
//! loantrack create-admin --email admin@example.org --password ...
//! loantrack --help         # Show help
//! ```
//!
//! Every option can also be given through the environment; a `.env` file in
//! the working directory is loaded first.

mod commands;
mod config;
mod server;
mod tls;

use clap::{CommandFactory as _, Parser};
use error::Result;

use crate::commands::Commands;

/// Loantrack - device and loan tracking API
#[derive(Parser, Debug)]
#[command(name = "loantrack")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Log level or filter directives (debug, info, warn, error)
    #[arg(short = 'L', long, env = "RUST_LOG", default_value = "info", global = true)]
    log_level: String,

    /// Output format (json, pretty, compact)
    #[arg(short, long, env = "LOANTRACK_LOG_FORMAT", default_value = "pretty", global = true)]
    log_format: String,

    /// Also write logs to this file, rotated daily
    #[arg(long, env = "LOANTRACK_LOG_FILE", global = true)]
    log_file: Option<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    // A missing .env is normal in production
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();

    // Completion scripts go to stdout and must not be mixed with log lines
    if let Commands::Completions(args) = &cli.command {
        return commands::completions::completions(args.shell, &mut Cli::command(), &mut std::io::stdout());
    }

    let _guard = logging::init(&cli.log_level, &cli.log_format, cli.log_file.as_deref())
        .map_err(|e| anyhow::anyhow!("Failed to initialize logging: {}", e))?;

    logging::info!(target: "app", command = ?cli.command, "Loantrack CLI starting...");

    match cli.command {
        Commands::Serve(args) => server::serve(&database_url()?, &args).await?,
        Commands::Migrate(args) => commands::migrate::migrate(&database_url()?, &args).await?,
        Commands::CreateAdmin(args) => commands::create_admin::create_admin(&database_url()?, args).await?,
        Commands::Validate => commands::validate::validate()?,
        Commands::Completions(_) => {},
    }

    logging::info!(target: "app", "Loantrack CLI completed successfully");
    Ok(())
}

/// Connection URL from `DATABASE_URL` or the `LOANTRACK_DATABASE_*` parts.
fn database_url() -> Result<String> {
    config::database_url_from_env().map_err(|e| error::AppError::config(e.to_string()))
}
