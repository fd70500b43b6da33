//! # User Location Access Data Transfer Objects

use entity::user_location_access;
use serde::{Deserialize, Serialize};

/// Request to grant a user access to a location
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateAccessRequest {
    pub user_id:     Option<i32>,
    pub location_id: Option<i32>,
}

/// Request to move an access link to another user and/or location
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateAccessRequest {
    pub new_user_id:     Option<i32>,
    pub new_location_id: Option<i32>,
}

/// An access link as returned by the API
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AccessResponse {
    pub user_id:     i32,
    pub location_id: i32,
}

impl From<user_location_access::Model> for AccessResponse {
    fn from(model: user_location_access::Model) -> Self {
        Self {
            user_id:     model.app_user_id,
            location_id: model.location_id,
        }
    }
}
