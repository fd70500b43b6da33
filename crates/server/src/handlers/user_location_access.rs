//! # User Location Access Handlers
//!
//! Direct management of the user/location join table. A link is identified by
//! its user and location ids; moving a link replaces the row.

use axum::{Json, http::StatusCode};
use entity::{AppUser, Location, UserLocationAccess, user_location_access};
use error::{AppError, Result};
use sea_orm::{ActiveModelTrait, EntityTrait, QueryOrder, Set, TransactionTrait};
use tracing::info;

use super::find_reference;
use crate::{
    AppState,
    dto::user_location_access::{AccessResponse, CreateAccessRequest, UpdateAccessRequest},
};

/// List every access link
pub async fn list_access(state: &AppState) -> Result<Json<Vec<AccessResponse>>> {
    let rows = UserLocationAccess::find()
        .order_by_asc(user_location_access::Column::AppUserId)
        .order_by_asc(user_location_access::Column::LocationId)
        .all(&state.db)
        .await?;

    Ok(Json(rows.into_iter().map(AccessResponse::from).collect()))
}

/// Get a single access link
pub async fn get_access(state: &AppState, user_id: i32, location_id: i32) -> Result<Json<AccessResponse>> {
    let row = UserLocationAccess::find_by_id((user_id, location_id))
        .one(&state.db)
        .await?
        .ok_or_else(|| {
            AppError::not_found(format!(
                "User-location access not found for User ID {} and Location ID {}",
                user_id, location_id
            ))
        })?;

    Ok(Json(row.into()))
}

/// Grant a user access to a location
///
/// # Errors
///
/// - 400 when either id is missing or does not exist
/// - 409 when the link already exists
pub async fn create_access(state: &AppState, req: CreateAccessRequest) -> Result<(StatusCode, Json<AccessResponse>)> {
    let (Some(user_id), Some(location_id)) = (req.user_id, req.location_id)
    else {
        return Err(AppError::bad_request("Both userId and locationId are required."));
    };

    find_reference::<AppUser, _>(&state.db, user_id, "Invalid User ID.").await?;
    find_reference::<Location, _>(&state.db, location_id, "Invalid Location ID.").await?;

    if UserLocationAccess::find_by_id((user_id, location_id))
        .one(&state.db)
        .await?
        .is_some()
    {
        return Err(AppError::conflict(
            "Access link already exists for this user and location.",
        ));
    }

    let row = user_location_access::ActiveModel {
        app_user_id: Set(user_id),
        location_id: Set(location_id),
    }
    .insert(&state.db)
    .await?;

    info!(user_id = %user_id, location_id = %location_id, "Location access granted");

    Ok((StatusCode::CREATED, Json(row.into())))
}

/// Move an access link to another user and/or location
///
/// Ids absent from the request keep their current value.
pub async fn update_access(
    state: &AppState,
    user_id: i32,
    location_id: i32,
    req: UpdateAccessRequest,
) -> Result<Json<AccessResponse>> {
    let txn = state.db.begin().await?;

    let existing = UserLocationAccess::find_by_id((user_id, location_id))
        .one(&txn)
        .await?
        .ok_or_else(|| AppError::not_found("UserLocationAccess not found."))?;

    let new_user_id = match req.new_user_id {
        Some(id) => find_reference::<AppUser, _>(&txn, id, "Invalid new User ID.").await?.app_user_id,
        None => existing.app_user_id,
    };
    let new_location_id = match req.new_location_id {
        Some(id) => {
            find_reference::<Location, _>(&txn, id, "Invalid new Location ID.")
                .await?
                .location_id
        },
        None => existing.location_id,
    };

    if (new_user_id, new_location_id) != (user_id, location_id) &&
        UserLocationAccess::find_by_id((new_user_id, new_location_id))
            .one(&txn)
            .await?
            .is_some()
    {
        return Err(AppError::conflict(
            "Access link already exists for this user and location.",
        ));
    }

    UserLocationAccess::delete_by_id((user_id, location_id))
        .exec(&txn)
        .await?;
    let row = user_location_access::ActiveModel {
        app_user_id: Set(new_user_id),
        location_id: Set(new_location_id),
    }
    .insert(&txn)
    .await?;

    txn.commit().await?;

    info!(
        from_user = %user_id,
        from_location = %location_id,
        to_user = %new_user_id,
        to_location = %new_location_id,
        "Location access moved"
    );

    Ok(Json(row.into()))
}

/// Revoke an access link
pub async fn delete_access(state: &AppState, user_id: i32, location_id: i32) -> Result<StatusCode> {
    let result = UserLocationAccess::delete_by_id((user_id, location_id))
        .exec(&state.db)
        .await?;
    if result.rows_affected == 0 {
        return Err(AppError::not_found(format!(
            "User-location access not found for User ID {} and Location ID {}",
            user_id, location_id
        )));
    }

    info!(user_id = %user_id, location_id = %location_id, "Location access revoked");
    Ok(StatusCode::NO_CONTENT)
}
