//! # Bin Handlers

use axum::{Json, http::StatusCode};
use chrono::Utc;
use entity::{AppUser, Bin, Location, bin};
use error::{AppError, Result};
use sea_orm::{ActiveModelTrait, ColumnTrait, EntityTrait, QueryFilter, QueryOrder, Set};
use tracing::info;
use validator::Validate;

use super::find_reference;
use crate::{
    AppState,
    dto::bins::{BinResponse, CreateBinRequest, UpdateBinRequest},
};

fn bin_not_found(id: i32) -> AppError { AppError::not_found(format!("Bin not found with ID {}", id)) }

async fn ensure_asset_tag_free(state: &AppState, asset_tag: &str, except: Option<i32>) -> Result<()> {
    let mut query = Bin::find().filter(bin::Column::AssetTag.eq(asset_tag));
    if let Some(id) = except {
        query = query.filter(bin::Column::BinId.ne(id));
    }

    if query.one(&state.db).await?.is_some() {
        return Err(AppError::conflict(format!(
            "A bin with asset tag '{}' already exists",
            asset_tag
        )));
    }
    Ok(())
}

/// List all bins
pub async fn list_bins(state: &AppState) -> Result<Json<Vec<BinResponse>>> {
    let bins = Bin::find()
        .order_by_asc(bin::Column::BinId)
        .all(&state.db)
        .await?;

    Ok(Json(bins.into_iter().map(BinResponse::from).collect()))
}

pub async fn get_bin(state: &AppState, id: i32) -> Result<Json<BinResponse>> {
    let bin = Bin::find_by_id(id)
        .one(&state.db)
        .await?
        .ok_or_else(|| bin_not_found(id))?;

    Ok(Json(bin.into()))
}

/// Create a bin
///
/// # Errors
///
/// - 400 `Invalid User ID` / `Invalid Location ID`
/// - 409 when the asset tag is taken
pub async fn create_bin(state: &AppState, req: CreateBinRequest) -> Result<(StatusCode, Json<BinResponse>)> {
    req.validate()?;

    find_reference::<AppUser, _>(&state.db, req.created_by_user_id, "Invalid User ID").await?;
    find_reference::<Location, _>(&state.db, req.location_id, "Invalid Location ID").await?;
    ensure_asset_tag_free(state, &req.asset_tag, None).await?;

    let now = Utc::now();
    let bin = bin::ActiveModel {
        asset_tag: Set(req.asset_tag),
        bin_contents: Set(req.bin_contents),
        created_by_user_id: Set(req.created_by_user_id),
        location_id: Set(req.location_id),
        created_at: Set(now),
        updated_at: Set(now),
        ..Default::default()
    }
    .insert(&state.db)
    .await?;

    info!(bin_id = %bin.bin_id, asset_tag = %bin.asset_tag, "Bin created");

    Ok((StatusCode::CREATED, Json(bin.into())))
}

/// Update the provided fields of a bin
pub async fn update_bin(state: &AppState, id: i32, req: UpdateBinRequest) -> Result<Json<BinResponse>> {
    let bin = Bin::find_by_id(id)
        .one(&state.db)
        .await?
        .ok_or_else(|| bin_not_found(id))?;

    req.validate()?;

    let mut active: bin::ActiveModel = bin.into();

    if let Some(asset_tag) = req.asset_tag {
        ensure_asset_tag_free(state, &asset_tag, Some(id)).await?;
        active.asset_tag = Set(asset_tag);
    }
    if let Some(contents) = req.bin_contents {
        active.bin_contents = Set(Some(contents));
    }
    if let Some(user_id) = req.created_by_user_id {
        find_reference::<AppUser, _>(&state.db, user_id, "Invalid User ID").await?;
        active.created_by_user_id = Set(user_id);
    }
    if let Some(location_id) = req.location_id {
        find_reference::<Location, _>(&state.db, location_id, "Invalid Location ID").await?;
        active.location_id = Set(location_id);
    }
    active.updated_at = Set(Utc::now());

    let bin = active.update(&state.db).await?;
    info!(bin_id = %id, "Bin updated");

    Ok(Json(bin.into()))
}

/// Delete a bin
///
/// Bins with loan history cannot be deleted (409).
pub async fn delete_bin(state: &AppState, id: i32) -> Result<StatusCode> {
    let result = Bin::delete_by_id(id).exec(&state.db).await?;
    if result.rows_affected == 0 {
        return Err(bin_not_found(id));
    }

    info!(bin_id = %id, "Bin deleted");
    Ok(StatusCode::NO_CONTENT)
}
