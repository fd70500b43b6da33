//! # Device Data Transfer Objects

use entity::device;
use serde::{Deserialize, Serialize};
use validator::Validate;

use super::timestamp;

/// Request to create a device; every field is required
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateDeviceRequest {
    #[validate(length(
        min = 1,
        max = 150,
        message = "Device name must be between 1 and 150 characters"
    ))]
    pub device_name:        String,
    #[validate(length(
        min = 1,
        max = 100,
        message = "Serial number must be between 1 and 100 characters"
    ))]
    pub serial_number:      String,
    pub device_type_id:     i32,
    pub device_status_id:   i32,
    pub location_id:        i32,
    pub created_by_user_id: i32,
}

/// Partial update of a device; absent fields are left unchanged
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateDeviceRequest {
    #[validate(length(
        min = 1,
        max = 150,
        message = "Device name must be between 1 and 150 characters"
    ))]
    pub device_name:        Option<String>,
    #[validate(length(
        min = 1,
        max = 100,
        message = "Serial number must be between 1 and 100 characters"
    ))]
    pub serial_number:      Option<String>,
    pub device_type_id:     Option<i32>,
    pub device_status_id:   Option<i32>,
    pub location_id:        Option<i32>,
    pub created_by_user_id: Option<i32>,
}

/// Filters for the device list
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeviceListQuery {
    pub status_id: Option<i32>,
    pub type_id:   Option<i32>,
}

/// A device as returned by the API
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeviceResponse {
    pub device_id:          i32,
    pub device_name:        String,
    pub serial_number:      String,
    pub device_type_id:     i32,
    pub device_status_id:   i32,
    pub location_id:        i32,
    pub created_by_user_id: i32,
    pub created_at:         String,
    pub updated_at:         String,
}

impl From<device::Model> for DeviceResponse {
    fn from(model: device::Model) -> Self {
        Self {
            device_id:          model.device_id,
            device_name:        model.device_name,
            serial_number:      model.serial_number,
            device_type_id:     model.device_type_id,
            device_status_id:   model.device_status_id,
            location_id:        model.location_id,
            created_by_user_id: model.created_by_user_id,
            created_at:         timestamp(&model.created_at),
            updated_at:         timestamp(&model.updated_at),
        }
    }
}
