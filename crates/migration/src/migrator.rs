//! # Database Migrator
//!
//! Registers every schema migration in the order it must run. Tables are
//! created before the tables that reference them.

use sea_orm_migration::prelude::*;

use crate::{
    m20240101_000001_create_user_role_table,
    m20240101_000002_create_location_table,
    m20240101_000003_create_app_user_table,
    m20240101_000004_create_user_location_access_table,
    m20240101_000005_create_lookup_tables,
    m20240101_000006_create_device_table,
    m20240101_000007_create_bin_table,
    m20240101_000008_create_loan_table,
};

/// The main migrator that coordinates all migration operations
///
/// # Example
///
/// ```rust,ignore
/// use migration::{Migrator, MigratorTrait};
///
/// Migrator::up(&db, None).await?;
/// ```
#[derive(Debug)]
pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20240101_000001_create_user_role_table::Migration),
            Box::new(m20240101_000002_create_location_table::Migration),
            Box::new(m20240101_000003_create_app_user_table::Migration),
            Box::new(m20240101_000004_create_user_location_access_table::Migration),
            Box::new(m20240101_000005_create_lookup_tables::Migration),
            Box::new(m20240101_000006_create_device_table::Migration),
            Box::new(m20240101_000007_create_bin_table::Migration),
            Box::new(m20240101_000008_create_loan_table::Migration),
        ]
    }
}
