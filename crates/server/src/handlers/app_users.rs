//! # App User Handlers
//!
//! HTTP request handlers for user management. Passwords are stored as Argon2id
//! hashes and never leave the server; responses carry the role name and the
//! ids of the locations a user may access.

use std::collections::HashMap;

use ::auth::{
    hash_password,
    secrecy::{ExposeSecret, SecretString},
};
use axum::{Json, http::StatusCode};
use chrono::Utc;
use entity::{AppUser, Location, UserLocationAccess, UserRole, app_user, user_location_access, user_role};
use error::{AppError, Result};
use sea_orm::{
    ActiveModelTrait,
    ColumnTrait,
    ConnectionTrait,
    EntityTrait,
    QueryFilter,
    QueryOrder,
    Set,
    TransactionTrait,
};
use tracing::info;
use validator::Validate;

use crate::{
    AppState,
    dto::app_users::{AppUserListQuery, AppUserResponse, CreateAppUserRequest, UpdateAppUserRequest},
};

fn user_not_found(id: i32) -> AppError { AppError::not_found(format!("User not found with ID {}", id)) }

/// Hash a plain password for storage.
fn hash_for_storage(password: String) -> Result<String> {
    let secret = SecretString::from(password);
    let hashed = hash_password(&secret, None).map_err(|e| AppError::internal(format!("Failed to hash password: {}", e)))?;
    Ok(hashed.expose_secret().to_string())
}

/// Check that a role exists (404 `Role not found`).
async fn require_role<C: ConnectionTrait>(db: &C, role_id: i32) -> Result<user_role::Model> {
    UserRole::find_by_id(role_id)
        .one(db)
        .await?
        .ok_or_else(|| AppError::not_found("Role not found"))
}

/// Check every location id, returning them sorted without duplicates.
async fn require_locations<C: ConnectionTrait>(db: &C, mut ids: Vec<i32>) -> Result<Vec<i32>> {
    ids.sort_unstable();
    ids.dedup();

    for id in &ids {
        if Location::find_by_id(*id).one(db).await?.is_none() {
            return Err(AppError::not_found(format!("Location not found: {}", id)));
        }
    }
    Ok(ids)
}

/// Reject an email already used by another user.
async fn ensure_email_free<C: ConnectionTrait>(db: &C, email: &str, except: Option<i32>) -> Result<()> {
    let mut query = AppUser::find().filter(app_user::Column::Email.eq(email));
    if let Some(id) = except {
        query = query.filter(app_user::Column::AppUserId.ne(id));
    }

    if query.one(db).await?.is_some() {
        return Err(AppError::conflict("A user with this email already exists"));
    }
    Ok(())
}

/// Replace the set of locations a user may access.
async fn replace_location_access<C: ConnectionTrait>(db: &C, user_id: i32, location_ids: &[i32]) -> Result<()> {
    UserLocationAccess::delete_many()
        .filter(user_location_access::Column::AppUserId.eq(user_id))
        .exec(db)
        .await?;

    if location_ids.is_empty() {
        return Ok(());
    }

    let rows = location_ids.iter().map(|location_id| {
        user_location_access::ActiveModel {
            app_user_id: Set(user_id),
            location_id: Set(*location_id),
        }
    });
    UserLocationAccess::insert_many(rows)
        .exec_without_returning(db)
        .await?;
    Ok(())
}

async fn location_ids_of<C: ConnectionTrait>(db: &C, user_id: i32) -> Result<Vec<i32>> {
    let rows = UserLocationAccess::find()
        .filter(user_location_access::Column::AppUserId.eq(user_id))
        .order_by_asc(user_location_access::Column::LocationId)
        .all(db)
        .await?;

    Ok(rows.into_iter().map(|row| row.location_id).collect())
}

async fn to_response<C: ConnectionTrait>(db: &C, user: app_user::Model) -> Result<AppUserResponse> {
    let role_name = UserRole::find_by_id(user.user_role_id)
        .one(db)
        .await?
        .map(|role| role.user_role_name);
    let location_ids = location_ids_of(db, user.app_user_id).await?;

    Ok(AppUserResponse::new(user, role_name, location_ids))
}

/// List users, optionally filtered by exact email and/or full name
pub async fn list_app_users(state: &AppState, query: AppUserListQuery) -> Result<Json<Vec<AppUserResponse>>> {
    let mut select = AppUser::find().order_by_asc(app_user::Column::AppUserId);
    if let Some(email) = query.email {
        select = select.filter(app_user::Column::Email.eq(email));
    }
    if let Some(full_name) = query.full_name {
        select = select.filter(app_user::Column::FullName.eq(full_name));
    }
    let users = select.all(&state.db).await?;

    let role_names: HashMap<i32, String> = UserRole::find()
        .all(&state.db)
        .await?
        .into_iter()
        .map(|role| (role.user_role_id, role.user_role_name))
        .collect();

    let mut access: HashMap<i32, Vec<i32>> = HashMap::new();
    for row in UserLocationAccess::find()
        .order_by_asc(user_location_access::Column::LocationId)
        .all(&state.db)
        .await?
    {
        access.entry(row.app_user_id).or_default().push(row.location_id);
    }

    let responses = users
        .into_iter()
        .map(|user| {
            let role_name = role_names.get(&user.user_role_id).cloned();
            let location_ids = access.remove(&user.app_user_id).unwrap_or_default();
            AppUserResponse::new(user, role_name, location_ids)
        })
        .collect();

    Ok(Json(responses))
}

/// Get a single user by ID
pub async fn get_app_user(state: &AppState, id: i32) -> Result<Json<AppUserResponse>> {
    let user = AppUser::find_by_id(id)
        .one(&state.db)
        .await?
        .ok_or_else(|| user_not_found(id))?;

    Ok(Json(to_response(&state.db, user).await?))
}

/// Create a user with a hashed password and its location access
///
/// # Errors
///
/// - 400 `User role is required` when `roleId` is missing
/// - 404 `Role not found` / `Location not found: {id}` for unknown references
/// - 409 when the email is taken
pub async fn create_app_user(
    state: &AppState,
    req: CreateAppUserRequest,
) -> Result<(StatusCode, Json<AppUserResponse>)> {
    req.validate()?;

    let role_id = req.role_id.ok_or_else(|| AppError::bad_request("User role is required"))?;

    let txn = state.db.begin().await?;

    let role = require_role(&txn, role_id).await?;
    let location_ids = require_locations(&txn, req.location_ids).await?;
    ensure_email_free(&txn, &req.email, None).await?;

    let now = Utc::now();
    let user = app_user::ActiveModel {
        full_name: Set(req.full_name.clone()),
        app_user_full_name: Set(req.full_name),
        email: Set(req.email),
        password_hash: Set(hash_for_storage(req.password)?),
        user_role_id: Set(role.user_role_id),
        dl_num: Set(req.dl_num),
        dl_state: Set(req.dl_state),
        street_address: Set(req.street_address),
        city: Set(req.city),
        state: Set(req.state),
        zip_code: Set(req.zip_code),
        contact_number: Set(req.contact_number),
        date_of_birth: Set(req.date_of_birth),
        created_at: Set(now),
        updated_at: Set(now),
        ..Default::default()
    }
    .insert(&txn)
    .await?;

    replace_location_access(&txn, user.app_user_id, &location_ids).await?;
    txn.commit().await?;

    info!(user_id = %user.app_user_id, role = %role.user_role_name, "User created");

    Ok((
        StatusCode::CREATED,
        Json(AppUserResponse::new(user, Some(role.user_role_name), location_ids)),
    ))
}

/// Replace a user's profile
///
/// `password` is re-hashed when present. `roleId` and `locationIds` are only
/// applied when present.
pub async fn update_app_user(state: &AppState, id: i32, req: UpdateAppUserRequest) -> Result<Json<AppUserResponse>> {
    let user = AppUser::find_by_id(id)
        .one(&state.db)
        .await?
        .ok_or_else(|| user_not_found(id))?;

    req.validate()?;

    let txn = state.db.begin().await?;

    let mut active: app_user::ActiveModel = user.into();

    if let Some(role_id) = req.role_id {
        let role = require_role(&txn, role_id).await?;
        active.user_role_id = Set(role.user_role_id);
    }

    let location_ids = match req.location_ids {
        Some(ids) => Some(require_locations(&txn, ids).await?),
        None => None,
    };

    ensure_email_free(&txn, &req.email, Some(id)).await?;

    if let Some(password) = req.password {
        active.password_hash = Set(hash_for_storage(password)?);
    }

    active.full_name = Set(req.full_name.clone());
    active.app_user_full_name = Set(req.full_name);
    active.email = Set(req.email);
    active.dl_num = Set(req.dl_num);
    active.dl_state = Set(req.dl_state);
    active.street_address = Set(req.street_address);
    active.city = Set(req.city);
    active.state = Set(req.state);
    active.zip_code = Set(req.zip_code);
    active.contact_number = Set(req.contact_number);
    active.date_of_birth = Set(req.date_of_birth);
    active.updated_at = Set(Utc::now());

    let user = active.update(&txn).await?;

    if let Some(ref ids) = location_ids {
        replace_location_access(&txn, id, ids).await?;
    }

    let response = to_response(&txn, user).await?;
    txn.commit().await?;

    info!(user_id = %id, "User updated");

    Ok(Json(response))
}

/// Delete a user
///
/// Location access rows go with the user; users referenced by devices, bins
/// or loans cannot be deleted (409).
pub async fn delete_app_user(state: &AppState, id: i32) -> Result<StatusCode> {
    let result = AppUser::delete_by_id(id).exec(&state.db).await?;
    if result.rows_affected == 0 {
        return Err(user_not_found(id));
    }

    info!(user_id = %id, "User deleted");
    Ok(StatusCode::NO_CONTENT)
}
