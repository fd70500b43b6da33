//! # Location Handlers

use axum::{Json, http::StatusCode};
use chrono::Utc;
use entity::{Location, location};
use error::{AppError, Result};
use sea_orm::{ActiveModelTrait, ColumnTrait, EntityTrait, QueryFilter, QueryOrder, Set};
use tracing::info;
use validator::Validate;

use super::non_blank;
use crate::{
    AppState,
    dto::locations::{LocationListQuery, LocationRequest, LocationResponse, LocationSummary},
};

fn required_name(req: &LocationRequest) -> Result<String> {
    non_blank(req.location_name.clone()).ok_or_else(|| AppError::bad_request("Location name is required"))
}

/// List locations, optionally filtered by exact name
pub async fn list_locations(state: &AppState, query: LocationListQuery) -> Result<Json<Vec<LocationResponse>>> {
    let mut select = Location::find().order_by_asc(location::Column::LocationId);
    if let Some(name) = query.name {
        select = select.filter(location::Column::LocationName.eq(name));
    }

    let locations = select.all(&state.db).await?;
    Ok(Json(locations.into_iter().map(LocationResponse::from).collect()))
}

/// Get the address summary of a location
pub async fn get_location(state: &AppState, id: i32) -> Result<Json<LocationSummary>> {
    let location = Location::find_by_id(id)
        .one(&state.db)
        .await?
        .ok_or_else(|| AppError::not_found(format!("Location not found with ID {}", id)))?;

    Ok(Json(location.into()))
}

/// Create a location
pub async fn create_location(state: &AppState, req: LocationRequest) -> Result<(StatusCode, Json<LocationResponse>)> {
    req.validate()?;
    let name = required_name(&req)?;

    let now = Utc::now();
    let location = location::ActiveModel {
        location_name: Set(name),
        street_address: Set(req.street_address),
        city: Set(req.city),
        state: Set(req.state),
        zip_code: Set(req.zip_code),
        contact_number: Set(req.contact_number),
        created_at: Set(now),
        updated_at: Set(now),
        ..Default::default()
    }
    .insert(&state.db)
    .await?;

    info!(location_id = %location.location_id, "Location created");

    Ok((StatusCode::CREATED, Json(location.into())))
}

/// Replace every field of a location
pub async fn update_location(state: &AppState, id: i32, req: LocationRequest) -> Result<Json<LocationResponse>> {
    let location = Location::find_by_id(id)
        .one(&state.db)
        .await?
        .ok_or_else(|| AppError::not_found(format!("Location not found with id {}", id)))?;

    req.validate()?;
    let name = required_name(&req)?;

    let mut active: location::ActiveModel = location.into();
    active.location_name = Set(name);
    active.street_address = Set(req.street_address);
    active.city = Set(req.city);
    active.state = Set(req.state);
    active.zip_code = Set(req.zip_code);
    active.contact_number = Set(req.contact_number);
    active.updated_at = Set(Utc::now());

    let location = active.update(&state.db).await?;
    info!(location_id = %id, "Location updated");

    Ok(Json(location.into()))
}

/// Delete a location
///
/// Locations still holding devices or bins cannot be deleted (409).
pub async fn delete_location(state: &AppState, id: i32) -> Result<StatusCode> {
    let result = Location::delete_by_id(id).exec(&state.db).await?;
    if result.rows_affected == 0 {
        return Err(AppError::not_found(format!("Location not found with ID {}", id)));
    }

    info!(location_id = %id, "Location deleted");
    Ok(StatusCode::NO_CONTENT)
}
