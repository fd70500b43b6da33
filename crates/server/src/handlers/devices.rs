//! # Device Handlers
//!
//! Devices reference a type, a status, a location and the user who registered
//! them. Every reference is checked before a write and a dangling one is a 400.

use axum::{Json, http::StatusCode};
use chrono::Utc;
use entity::{AppUser, Device, DeviceStatus, DeviceType, Location, device};
use error::{AppError, Result};
use sea_orm::{ActiveModelTrait, ColumnTrait, EntityTrait, QueryFilter, QueryOrder, Set};
use tracing::info;
use validator::Validate;

use super::find_reference;
use crate::{
    AppState,
    dto::devices::{CreateDeviceRequest, DeviceListQuery, DeviceResponse, UpdateDeviceRequest},
};

fn device_not_found(id: i32) -> AppError { AppError::not_found(format!("Device not found with ID {}", id)) }

/// Reject a serial number already used by another device.
async fn ensure_serial_free(state: &AppState, serial_number: &str, except: Option<i32>) -> Result<()> {
    let mut query = Device::find().filter(device::Column::SerialNumber.eq(serial_number));
    if let Some(id) = except {
        query = query.filter(device::Column::DeviceId.ne(id));
    }

    if query.one(&state.db).await?.is_some() {
        return Err(AppError::conflict(format!(
            "A device with serial number '{}' already exists",
            serial_number
        )));
    }
    Ok(())
}

/// List devices, optionally filtered by status and/or type
pub async fn list_devices(state: &AppState, query: DeviceListQuery) -> Result<Json<Vec<DeviceResponse>>> {
    let mut select = Device::find().order_by_asc(device::Column::DeviceId);
    if let Some(status_id) = query.status_id {
        select = select.filter(device::Column::DeviceStatusId.eq(status_id));
    }
    if let Some(type_id) = query.type_id {
        select = select.filter(device::Column::DeviceTypeId.eq(type_id));
    }

    let devices = select.all(&state.db).await?;
    Ok(Json(devices.into_iter().map(DeviceResponse::from).collect()))
}

/// Get a single device by ID
pub async fn get_device(state: &AppState, id: i32) -> Result<Json<DeviceResponse>> {
    let device = Device::find_by_id(id)
        .one(&state.db)
        .await?
        .ok_or_else(|| device_not_found(id))?;

    Ok(Json(device.into()))
}

/// Register a device
///
/// # Errors
///
/// - 400 `Invalid DeviceType ID`, `Invalid DeviceStatus ID`, `Invalid Location ID` or `Invalid User ID`
/// - 409 when the serial number is taken
pub async fn create_device(state: &AppState, req: CreateDeviceRequest) -> Result<(StatusCode, Json<DeviceResponse>)> {
    req.validate()?;

    find_reference::<DeviceType, _>(&state.db, req.device_type_id, "Invalid DeviceType ID").await?;
    find_reference::<DeviceStatus, _>(&state.db, req.device_status_id, "Invalid DeviceStatus ID").await?;
    find_reference::<Location, _>(&state.db, req.location_id, "Invalid Location ID").await?;
    find_reference::<AppUser, _>(&state.db, req.created_by_user_id, "Invalid User ID").await?;
    ensure_serial_free(state, &req.serial_number, None).await?;

    let now = Utc::now();
    let device = device::ActiveModel {
        device_name: Set(req.device_name),
        serial_number: Set(req.serial_number),
        device_type_id: Set(req.device_type_id),
        device_status_id: Set(req.device_status_id),
        location_id: Set(req.location_id),
        created_by_user_id: Set(req.created_by_user_id),
        created_at: Set(now),
        updated_at: Set(now),
        ..Default::default()
    }
    .insert(&state.db)
    .await?;

    info!(device_id = %device.device_id, serial = %device.serial_number, "Device created");

    Ok((StatusCode::CREATED, Json(device.into())))
}

/// Update the provided fields of a device
pub async fn update_device(state: &AppState, id: i32, req: UpdateDeviceRequest) -> Result<Json<DeviceResponse>> {
    let device = Device::find_by_id(id)
        .one(&state.db)
        .await?
        .ok_or_else(|| device_not_found(id))?;

    req.validate()?;

    let mut active: device::ActiveModel = device.into();

    if let Some(name) = req.device_name {
        active.device_name = Set(name);
    }
    if let Some(serial_number) = req.serial_number {
        ensure_serial_free(state, &serial_number, Some(id)).await?;
        active.serial_number = Set(serial_number);
    }
    if let Some(type_id) = req.device_type_id {
        find_reference::<DeviceType, _>(&state.db, type_id, "Invalid DeviceType ID").await?;
        active.device_type_id = Set(type_id);
    }
    if let Some(status_id) = req.device_status_id {
        find_reference::<DeviceStatus, _>(&state.db, status_id, "Invalid DeviceStatus ID").await?;
        active.device_status_id = Set(status_id);
    }
    if let Some(location_id) = req.location_id {
        find_reference::<Location, _>(&state.db, location_id, "Invalid Location ID").await?;
        active.location_id = Set(location_id);
    }
    if let Some(user_id) = req.created_by_user_id {
        find_reference::<AppUser, _>(&state.db, user_id, "Invalid User ID").await?;
        active.created_by_user_id = Set(user_id);
    }
    active.updated_at = Set(Utc::now());

    let device = active.update(&state.db).await?;
    info!(device_id = %id, "Device updated");

    Ok(Json(device.into()))
}

/// Delete a device
pub async fn delete_device(state: &AppState, id: i32) -> Result<StatusCode> {
    let result = Device::delete_by_id(id).exec(&state.db).await?;
    if result.rows_affected == 0 {
        return Err(device_not_found(id));
    }

    info!(device_id = %id, "Device deleted");
    Ok(StatusCode::NO_CONTENT)
}
