//! # Bin Data Transfer Objects

use entity::bin;
use serde::{Deserialize, Serialize};
use validator::Validate;

use super::timestamp;

/// Request to create a bin
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateBinRequest {
    #[validate(length(
        min = 1,
        max = 50,
        message = "Asset tag must be between 1 and 50 characters"
    ))]
    pub asset_tag:          String,
    #[validate(length(max = 255, message = "Bin contents must not exceed 255 characters"))]
    pub bin_contents:       Option<String>,
    pub created_by_user_id: i32,
    pub location_id:        i32,
}

/// Partial update of a bin; absent fields are left unchanged
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateBinRequest {
    #[validate(length(
        min = 1,
        max = 50,
        message = "Asset tag must be between 1 and 50 characters"
    ))]
    pub asset_tag:          Option<String>,
    #[validate(length(max = 255, message = "Bin contents must not exceed 255 characters"))]
    pub bin_contents:       Option<String>,
    pub created_by_user_id: Option<i32>,
    pub location_id:        Option<i32>,
}

/// A bin as returned by the API
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BinResponse {
    pub bin_id:             i32,
    pub asset_tag:          String,
    pub bin_contents:       Option<String>,
    pub created_by_user_id: i32,
    pub location_id:        i32,
    pub created_at:         String,
    pub updated_at:         String,
}

impl From<bin::Model> for BinResponse {
    fn from(model: bin::Model) -> Self {
        Self {
            bin_id:             model.bin_id,
            asset_tag:          model.asset_tag,
            bin_contents:       model.bin_contents,
            created_by_user_id: model.created_by_user_id,
            location_id:        model.location_id,
            created_at:         timestamp(&model.created_at),
            updated_at:         timestamp(&model.updated_at),
        }
    }
}
