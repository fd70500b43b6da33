//! # CLI Migration Command
//!
//! Database migration handling for the Loantrack CLI.

use error::Result;
use migration::{Migrator, MigratorTrait as _};
use sea_orm::DatabaseConnection;
use tracing::info;

use crate::commands::MigrateArgs;

/// Runs database migrations
///
/// Applies pending migrations and then the reference seeds, unless
/// `--dry-run` or `--rollback` asks for something else.
///
/// # Arguments
///
/// * `database_url` - Connection URL
/// * `args` - Migrate command arguments
pub async fn migrate(database_url: &str, args: &MigrateArgs) -> Result<()> {
    info!(
        target: "migrate",
        dry_run = %args.dry_run,
        rollback = %args.rollback,
        no_seed = %args.no_seed,
        "Running database migrations..."
    );

    let db = migration::connect_to_database(database_url)
        .await
        .map_err(|e| anyhow::anyhow!("Failed to connect to database: {}", e))?;

    run(&db, args).await
}

/// Runs the migrate command on an open connection.
pub async fn run(db: &DatabaseConnection, args: &MigrateArgs) -> Result<()> {
    if args.dry_run {
        let pending = pending_migrations(db).await?;
        info!(target: "migrate", pending_count = %pending.len(), "Dry run, nothing applied");
        for name in &pending {
            info!(target: "migrate", migration = %name, "Would apply");
        }
        return Ok(());
    }

    if args.rollback {
        info!(target: "migrate", "Rolling back the last migration...");
        Migrator::down(db, Some(1))
            .await
            .map_err(|e| anyhow::anyhow!("Failed to rollback migration: {}", e))?;
        info!(target: "migrate", "Rollback completed successfully");
        return Ok(());
    }

    Migrator::up(db, None)
        .await
        .map_err(|e| anyhow::anyhow!("Failed to run migrations: {}", e))?;
    info!(target: "migrate", "Migrations completed successfully");

    if args.no_seed {
        return Ok(());
    }

    let results = migration::run_all_seeds(db).await?;
    let inserted: usize = results.iter().map(|r| r.inserted_count).sum();
    info!(target: "migrate", seeds = results.len(), inserted, "Seed data applied");

    Ok(())
}

/// Names of the migrations not yet applied.
pub async fn pending_migrations(db: &DatabaseConnection) -> Result<Vec<String>> {
    let pending = Migrator::get_pending_migrations(db)
        .await
        .map_err(|e| anyhow::anyhow!("Failed to get pending migrations: {}", e))?;

    Ok(pending.iter().map(|m| m.name().to_string()).collect())
}

#[cfg(test)]
mod tests {
    use entity::{device_status, user_role};
    use sea_orm::{EntityTrait, PaginatorTrait};

    use super::*;

    async fn memory_db() -> DatabaseConnection {
        let mut options = sea_orm::ConnectOptions::new("sqlite::memory:");
        options.max_connections(1).min_connections(1).sqlx_logging(false);
        sea_orm::Database::connect(options).await.unwrap()
    }

    fn args(dry_run: bool, rollback: bool, no_seed: bool) -> MigrateArgs {
        MigrateArgs {
            dry_run,
            rollback,
            no_seed,
        }
    }

    #[tokio::test]
    async fn test_dry_run_applies_nothing() {
        let db = memory_db().await;
        let before = pending_migrations(&db).await.unwrap();
        assert!(!before.is_empty());

        run(&db, &args(true, false, false)).await.unwrap();

        assert_eq!(pending_migrations(&db).await.unwrap(), before);
    }

    #[tokio::test]
    async fn test_migrate_applies_schema_and_seeds() {
        let db = memory_db().await;

        run(&db, &args(false, false, false)).await.unwrap();

        assert!(pending_migrations(&db).await.unwrap().is_empty());
        assert_eq!(user_role::Entity::find().count(&db).await.unwrap(), 3);
        assert_eq!(device_status::Entity::find().count(&db).await.unwrap(), 4);
    }

    #[tokio::test]
    async fn test_no_seed_leaves_tables_empty() {
        let db = memory_db().await;

        run(&db, &args(false, false, true)).await.unwrap();

        assert_eq!(user_role::Entity::find().count(&db).await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_rollback_reverts_one_migration() {
        let db = memory_db().await;
        run(&db, &args(false, false, true)).await.unwrap();

        run(&db, &args(false, true, false)).await.unwrap();

        assert_eq!(pending_migrations(&db).await.unwrap().len(), 1);
    }
}
