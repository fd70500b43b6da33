//! # Loantrack Migrations
//!
//! Schema migrations, reference data seeds and connection helpers.

pub use sea_orm_migration::prelude::*;

mod m20240101_000001_create_user_role_table;
mod m20240101_000002_create_location_table;
mod m20240101_000003_create_app_user_table;
mod m20240101_000004_create_user_location_access_table;
mod m20240101_000005_create_lookup_tables;
mod m20240101_000006_create_device_table;
mod m20240101_000007_create_bin_table;
mod m20240101_000008_create_loan_table;
pub mod migrator;
pub mod seeds;

pub use migrator::Migrator;
pub use seeds::{SeedProvider, run_all_seeds};

/// Database connection helper for CLI usage
pub async fn connect_to_database(database_url: &str) -> Result<sea_orm::DatabaseConnection, sea_orm::DbErr> {
    let mut options = sea_orm::ConnectOptions::new(database_url.to_string());
    options.sqlx_logging(false);
    sea_orm::Database::connect(options).await
}

/// Apply pending migrations and then the reference seeds.
///
/// # Errors
///
/// Returns a migration error if the schema cannot be brought up to date, or
/// the first seed failure.
pub async fn migrate_and_seed(db: &sea_orm::DatabaseConnection) -> Result<Vec<::error::SeedResult>, ::error::AppError> {
    Migrator::up(db, None)
        .await
        .map_err(|e| ::error::AppError::migration(format!("Failed to run migrations: {}", e)))?;
    run_all_seeds(db).await
}
