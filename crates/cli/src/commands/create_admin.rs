//! # CLI Create Admin Command
//!
//! Bootstraps an administrator so the user management API can be reached on
//! a fresh database.

use auth::{
    hash_password,
    secrecy::{ExposeSecret as _, SecretString},
};
use chrono::Utc;
use entity::{AppUser, UserRole, app_user, user_role};
use error::{AppError, Result};
use sea_orm::{ActiveModelTrait as _, ColumnTrait as _, DatabaseConnection, EntityTrait as _, QueryFilter as _, Set};
use tracing::info;

use crate::commands::CreateAdminArgs;

/// Name of the seeded administrator role
const ADMIN_ROLE: &str = "Admin";

/// Connects, brings the schema up to date and inserts the administrator.
pub async fn create_admin(database_url: &str, args: CreateAdminArgs) -> Result<()> {
    let db = migration::connect_to_database(database_url)
        .await
        .map_err(|e| anyhow::anyhow!("Failed to connect to database: {}", e))?;

    migration::migrate_and_seed(&db).await?;

    let user = insert_admin(&db, args).await?;
    logging::log_security_event!("admin_created", user.email.as_str(), "Administrator account created");
    info!(target: "create_admin", user_id = %user.app_user_id, email = %user.email, "Administrator created");

    Ok(())
}

/// Inserts an Admin-role user.
///
/// # Errors
///
/// Validation errors for a malformed email or blank password or name, a
/// conflict when the email is taken, and a configuration error when the
/// Admin role has not been seeded.
pub async fn insert_admin(db: &DatabaseConnection, args: CreateAdminArgs) -> Result<app_user::Model> {
    let email = args.email.trim().to_string();
    let full_name = args.full_name.trim().to_string();

    if !is_plausible_email(&email) {
        return Err(AppError::validation(format!("Invalid email address: {}", email)));
    }
    if args.password.trim().is_empty() {
        return Err(AppError::validation("Password cannot be empty"));
    }
    if full_name.is_empty() {
        return Err(AppError::validation("Full name cannot be empty"));
    }

    let role = UserRole::find()
        .filter(user_role::Column::UserRoleName.eq(ADMIN_ROLE))
        .one(db)
        .await?
        .ok_or_else(|| AppError::config("The Admin role is missing, run `loantrack migrate` first"))?;

    let taken = AppUser::find()
        .filter(app_user::Column::Email.eq(email.as_str()))
        .one(db)
        .await?
        .is_some();
    if taken {
        return Err(AppError::conflict(format!("A user with email '{}' already exists", email)));
    }

    let hash = hash_password(&SecretString::from(args.password), None)
        .map_err(|e| AppError::internal(format!("Failed to hash password: {}", e)))?;

    let now = Utc::now();
    let user = app_user::ActiveModel {
        full_name: Set(full_name.clone()),
        app_user_full_name: Set(full_name),
        email: Set(email),
        password_hash: Set(hash.expose_secret().to_string()),
        user_role_id: Set(role.user_role_id),
        created_at: Set(now),
        updated_at: Set(now),
        ..Default::default()
    }
    .insert(db)
    .await?;

    Ok(user)
}

/// One `@` with text on both sides and a dot in the domain.
fn is_plausible_email(email: &str) -> bool {
    match email.split_once('@') {
        Some((local, domain)) => {
            !local.is_empty() && !domain.contains('@') && domain.contains('.') && !domain.starts_with('.') && !domain.ends_with('.')
        },
        None => false,
    }
}

#[cfg(test)]
mod tests {
    use auth::verify_password;
    use migration::MigratorTrait as _;
    use sea_orm::EntityTrait as _;

    use super::*;

    async fn seeded_db() -> DatabaseConnection {
        let mut options = sea_orm::ConnectOptions::new("sqlite::memory:");
        options.max_connections(1).min_connections(1).sqlx_logging(false);
        let db = sea_orm::Database::connect(options).await.unwrap();
        migration::migrate_and_seed(&db).await.unwrap();
        db
    }

    fn args(email: &str, password: &str) -> CreateAdminArgs {
        CreateAdminArgs {
            email:     email.to_string(),
            password:  password.to_string(),
            full_name: "Root Admin".to_string(),
        }
    }

    #[tokio::test]
    async fn test_insert_admin() {
        let db = seeded_db().await;

        let user = insert_admin(&db, args(" root@example.org ", "s3cret-pass")).await.unwrap();

        assert_eq!(user.email, "root@example.org");
        assert_eq!(user.full_name, "Root Admin");
        assert_eq!(user.app_user_full_name, "Root Admin");
        let role = UserRole::find_by_id(user.user_role_id).one(&db).await.unwrap().unwrap();
        assert_eq!(role.user_role_name, "Admin");
        assert!(verify_password(&SecretString::from("s3cret-pass"), &user.password_hash).is_ok());
    }

    #[tokio::test]
    async fn test_insert_admin_duplicate_email() {
        let db = seeded_db().await;
        insert_admin(&db, args("root@example.org", "pw-one")).await.unwrap();

        let err = insert_admin(&db, args("root@example.org", "pw-two")).await.unwrap_err();

        assert_eq!(err.code(), "CONFLICT");
    }

    #[tokio::test]
    async fn test_insert_admin_rejects_bad_input() {
        let db = seeded_db().await;

        let err = insert_admin(&db, args("not-an-email", "pw")).await.unwrap_err();
        assert_eq!(err.code(), "VALIDATION_ERROR");

        let err = insert_admin(&db, args("root@example.org", "   ")).await.unwrap_err();
        assert_eq!(err.message(), "Password cannot be empty");
    }

    #[tokio::test]
    async fn test_insert_admin_without_seeds() {
        let mut options = sea_orm::ConnectOptions::new("sqlite::memory:");
        options.max_connections(1).min_connections(1).sqlx_logging(false);
        let db = sea_orm::Database::connect(options).await.unwrap();
        migration::Migrator::up(&db, None).await.unwrap();

        let err = insert_admin(&db, args("root@example.org", "pw")).await.unwrap_err();

        assert_eq!(err.code(), "CONFIG_ERROR");
    }

    #[test]
    fn test_is_plausible_email() {
        assert!(is_plausible_email("a@b.co"));
        assert!(!is_plausible_email("a@b"));
        assert!(!is_plausible_email("@b.co"));
        assert!(!is_plausible_email("a@@b.co"));
        assert!(!is_plausible_email("a@b.co."));
    }
}
