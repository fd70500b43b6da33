//! # Seed Data Management
//!
//! Reference data every deployment needs: user roles and the lookup values
//! devices and loans point at. Seeding is idempotent and only inserts names
//! that are missing.

mod reference;

use std::time::Instant;

use ::error::{AppError, SeedResult};
use sea_orm::DatabaseConnection;

pub use self::reference::{LookupSeed, LookupTable, UserRoleSeed};

/// Trait for seed data providers
#[async_trait::async_trait]
pub trait SeedProvider: Send + Sync {
    /// The name of this seed
    fn name(&self) -> &str;

    /// Runs the seed operation
    ///
    /// # Errors
    ///
    /// Returns an error if the seed operation fails.
    async fn run(&self, db: &DatabaseConnection) -> Result<SeedResult, AppError>;
}

/// The providers run by [`run_all_seeds`], in order.
pub fn providers() -> Vec<Box<dyn SeedProvider>> {
    vec![
        Box::new(UserRoleSeed),
        Box::new(LookupSeed::new(
            LookupTable::DeviceStatus,
            &["Available", "Loaned", "Maintenance", "Retired"],
        )),
        Box::new(LookupSeed::new(
            LookupTable::DeviceCondition,
            &["New", "Good", "Fair", "Damaged"],
        )),
        Box::new(LookupSeed::new(
            LookupTable::LoanStatus,
            &["Active", "Returned", "Overdue"],
        )),
        Box::new(LookupSeed::new(
            LookupTable::DeviceType,
            &["Laptop", "Tablet", "Hotspot"],
        )),
    ]
}

/// Runs all registered seed providers
///
/// # Arguments
///
/// * `db` - The database connection
///
/// # Errors
///
/// Returns the first provider error; providers after it do not run.
pub async fn run_all_seeds(db: &DatabaseConnection) -> Result<Vec<SeedResult>, AppError> {
    let mut results = Vec::new();

    for provider in providers() {
        let started = Instant::now();
        let mut result = provider
            .run(db)
            .await
            .map_err(|e| e.context(format!("Seeding {}", provider.name())))?;
        result.duration_ms = started.elapsed().as_millis() as u64;

        tracing::info!(
            target: "seed",
            seed = %result.seed_name,
            inserted = result.inserted_count,
            skipped = result.skipped_count,
            duration_ms = result.duration_ms,
            "Seed applied"
        );
        results.push(result);
    }

    Ok(results)
}
