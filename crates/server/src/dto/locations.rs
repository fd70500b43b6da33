//! # Location Data Transfer Objects

use entity::location;
use serde::{Deserialize, Serialize};
use validator::Validate;

use super::timestamp;

/// Body of location create and replace requests
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct LocationRequest {
    /// Required; checked by the handler so a blank name gets a specific message
    #[validate(length(max = 150, message = "Location name must not exceed 150 characters"))]
    pub location_name:  Option<String>,
    #[validate(length(max = 255, message = "Street address must not exceed 255 characters"))]
    pub street_address: Option<String>,
    #[validate(length(max = 100, message = "City must not exceed 100 characters"))]
    pub city:           Option<String>,
    #[validate(length(max = 2, message = "State must be a two letter code"))]
    pub state:          Option<String>,
    #[validate(length(max = 10, message = "Zip code must not exceed 10 characters"))]
    pub zip_code:       Option<String>,
    #[validate(length(max = 20, message = "Contact number must not exceed 20 characters"))]
    pub contact_number: Option<String>,
}

/// Exact-match filter for the location list
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct LocationListQuery {
    pub name: Option<String>,
}

/// A full location record
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LocationResponse {
    pub location_id:    i32,
    pub location_name:  String,
    pub street_address: Option<String>,
    pub city:           Option<String>,
    pub state:          Option<String>,
    pub zip_code:       Option<String>,
    pub contact_number: Option<String>,
    pub created_at:     String,
    pub updated_at:     String,
}

impl From<location::Model> for LocationResponse {
    fn from(model: location::Model) -> Self {
        Self {
            location_id:    model.location_id,
            location_name:  model.location_name,
            street_address: model.street_address,
            city:           model.city,
            state:          model.state,
            zip_code:       model.zip_code,
            contact_number: model.contact_number,
            created_at:     timestamp(&model.created_at),
            updated_at:     timestamp(&model.updated_at),
        }
    }
}

/// The single-location view: address fields only
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LocationSummary {
    pub location_id:   i32,
    pub location_name: String,
    pub address:       Option<String>,
    pub city:          Option<String>,
    pub state:         Option<String>,
    pub zip_code:      Option<String>,
}

impl From<location::Model> for LocationSummary {
    fn from(model: location::Model) -> Self {
        Self {
            location_id:   model.location_id,
            location_name: model.location_name,
            address:       model.street_address,
            city:          model.city,
            state:         model.state,
            zip_code:      model.zip_code,
        }
    }
}
