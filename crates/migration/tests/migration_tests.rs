//! Runs the real migrator and seeds against an in-memory SQLite database.

use entity::{device_condition, loan_status, user_role};
use migration::{Migrator, MigratorTrait, run_all_seeds};
use sea_orm::{ConnectOptions, ConnectionTrait, Database, DatabaseConnection, EntityTrait, QueryOrder};

async fn memory_db() -> DatabaseConnection {
    let mut options = ConnectOptions::new("sqlite::memory:");
    options.max_connections(1).min_connections(1).sqlx_logging(false);
    Database::connect(options).await.unwrap()
}

#[tokio::test]
async fn test_up_creates_every_table() {
    let db = memory_db().await;
    Migrator::up(&db, None).await.unwrap();

    let manager = sea_orm_migration::SchemaManager::new(&db);
    for table in [
        "user_role",
        "location",
        "app_user",
        "user_location_access",
        "device_type",
        "device_status",
        "device_condition",
        "loan_status",
        "device",
        "bin",
        "loan",
    ] {
        assert!(manager.has_table(table).await.unwrap(), "missing table {}", table);
    }
}

#[tokio::test]
async fn test_nothing_pending_after_up() {
    let db = memory_db().await;
    Migrator::up(&db, None).await.unwrap();

    assert!(Migrator::get_pending_migrations(&db).await.unwrap().is_empty());
}

#[tokio::test]
async fn test_down_removes_tables() {
    let db = memory_db().await;
    Migrator::up(&db, None).await.unwrap();
    Migrator::down(&db, None).await.unwrap();

    let manager = sea_orm_migration::SchemaManager::new(&db);
    assert!(!manager.has_table("loan").await.unwrap());
    assert!(!manager.has_table("user_role").await.unwrap());
}

#[tokio::test]
async fn test_seeds_insert_reference_data() {
    let db = memory_db().await;
    Migrator::up(&db, None).await.unwrap();

    let results = run_all_seeds(&db).await.unwrap();
    assert!(results.iter().all(|r| r.is_success()));
    assert_eq!(results.iter().map(|r| r.inserted_count).sum::<usize>(), 17);

    let roles = user_role::Entity::find()
        .order_by_asc(user_role::Column::UserRoleId)
        .all(&db)
        .await
        .unwrap();
    let names: Vec<_> = roles.iter().map(|r| r.user_role_name.as_str()).collect();
    assert_eq!(names, vec!["Admin", "Employee", "Citizen"]);
    assert!(roles[2].dl_required);
    assert!(!roles[0].dl_required);

    let statuses = loan_status::Entity::find().all(&db).await.unwrap();
    assert_eq!(statuses.len(), 3);
    let conditions = device_condition::Entity::find().all(&db).await.unwrap();
    assert_eq!(conditions.len(), 4);
}

#[tokio::test]
async fn test_seeds_are_idempotent() {
    let db = memory_db().await;
    Migrator::up(&db, None).await.unwrap();
    run_all_seeds(&db).await.unwrap();

    let second = run_all_seeds(&db).await.unwrap();
    assert_eq!(second.iter().map(|r| r.inserted_count).sum::<usize>(), 0);
    assert_eq!(second.iter().map(|r| r.skipped_count).sum::<usize>(), 17);
}

#[tokio::test]
async fn test_foreign_keys_enforced() {
    let db = memory_db().await;
    migration::migrate_and_seed(&db).await.unwrap();

    let result = db
        .execute_unprepared(
            "INSERT INTO app_user (full_name, app_user_full_name, email, password_hash, user_role_id) VALUES ('A', \
             'A', 'a@example.com', 'x', 999)",
        )
        .await;
    assert!(result.is_err());
}

#[tokio::test]
async fn test_deleting_referenced_row_is_a_conflict() {
    let db = memory_db().await;
    migration::migrate_and_seed(&db).await.unwrap();
    db.execute_unprepared(
        "INSERT INTO app_user (full_name, app_user_full_name, email, password_hash, user_role_id) VALUES ('A', 'A', \
         'a@example.com', 'x', 3)",
    )
    .await
    .unwrap();

    let err = db
        .execute_unprepared("DELETE FROM user_role WHERE user_role_id = 3")
        .await
        .unwrap_err();

    let err = error::AppError::from(err);
    assert_eq!(err.code(), "CONFLICT");
    assert_eq!(err.message(), "The record is referenced by other records");
}
