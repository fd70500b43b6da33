//! # User Role Handlers
//!
//! CRUD for roles. Role names are unique and double as token authorities.

use axum::{Json, http::StatusCode};
use entity::{UserRole, user_role};
use error::{AppError, Result};
use sea_orm::{ActiveModelTrait, ColumnTrait, EntityTrait, QueryFilter, QueryOrder, Set};
use tracing::info;
use validator::Validate;

use super::non_blank;
use crate::{
    AppState,
    dto::user_roles::{CreateUserRoleRequest, UpdateUserRoleRequest, UserRoleResponse},
};

fn role_not_found(id: i32) -> AppError { AppError::not_found(format!("Role not found with ID {}", id)) }

/// Reject a name already used by another role.
async fn ensure_name_free(state: &AppState, name: &str, except: Option<i32>) -> Result<()> {
    let mut query = UserRole::find().filter(user_role::Column::UserRoleName.eq(name));
    if let Some(id) = except {
        query = query.filter(user_role::Column::UserRoleId.ne(id));
    }

    if query.one(&state.db).await?.is_some() {
        return Err(AppError::conflict(format!("Role '{}' already exists", name)));
    }
    Ok(())
}

/// List all roles
pub async fn list_user_roles(state: &AppState) -> Result<Json<Vec<UserRoleResponse>>> {
    let roles = UserRole::find()
        .order_by_asc(user_role::Column::UserRoleId)
        .all(&state.db)
        .await?;

    Ok(Json(roles.into_iter().map(UserRoleResponse::from).collect()))
}

/// Get a single role by ID
pub async fn get_user_role(state: &AppState, id: i32) -> Result<Json<UserRoleResponse>> {
    let role = UserRole::find_by_id(id)
        .one(&state.db)
        .await?
        .ok_or_else(|| role_not_found(id))?;

    Ok(Json(role.into()))
}

/// Create a role
///
/// # Errors
///
/// - 400 `Role name cannot be empty`
/// - 409 when the name is taken
pub async fn create_user_role(
    state: &AppState,
    req: CreateUserRoleRequest,
) -> Result<(StatusCode, Json<UserRoleResponse>)> {
    req.validate()?;

    let name = non_blank(req.role_name).ok_or_else(|| AppError::bad_request("Role name cannot be empty"))?;
    ensure_name_free(state, &name, None).await?;

    let role = user_role::ActiveModel {
        user_role_name: Set(name),
        dl_required: Set(req.dl_required.unwrap_or(false)),
        is_active: Set(req.is_active.unwrap_or(true)),
        ..Default::default()
    }
    .insert(&state.db)
    .await?;

    info!(role_id = %role.user_role_id, name = %role.user_role_name, "Role created");

    Ok((StatusCode::CREATED, Json(role.into())))
}

/// Update the provided fields of a role
pub async fn update_user_role(state: &AppState, id: i32, req: UpdateUserRoleRequest) -> Result<Json<UserRoleResponse>> {
    req.validate()?;

    let role = UserRole::find_by_id(id)
        .one(&state.db)
        .await?
        .ok_or_else(|| role_not_found(id))?;

    let mut active: user_role::ActiveModel = role.into();

    if let Some(name) = req.role_name {
        let name = non_blank(Some(name)).ok_or_else(|| AppError::bad_request("Role name cannot be empty"))?;
        ensure_name_free(state, &name, Some(id)).await?;
        active.user_role_name = Set(name);
    }
    if let Some(dl_required) = req.dl_required {
        active.dl_required = Set(dl_required);
    }
    if let Some(is_active) = req.is_active {
        active.is_active = Set(is_active);
    }

    let role = active.update(&state.db).await?;
    info!(role_id = %role.user_role_id, "Role updated");

    Ok(Json(role.into()))
}

/// Delete a role
///
/// Roles still assigned to users cannot be deleted (409).
pub async fn delete_user_role(state: &AppState, id: i32) -> Result<StatusCode> {
    let result = UserRole::delete_by_id(id).exec(&state.db).await?;
    if result.rows_affected == 0 {
        return Err(role_not_found(id));
    }

    info!(role_id = %id, "Role deleted");
    Ok(StatusCode::NO_CONTENT)
}
