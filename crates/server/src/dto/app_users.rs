//! # App User Data Transfer Objects
//!
//! Request and response types for user management endpoints.

use chrono::NaiveDate;
use entity::app_user;
use serde::{Deserialize, Serialize};
use validator::Validate;

use super::timestamp;

/// Request to create a user
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateAppUserRequest {
    #[validate(length(
        min = 1,
        max = 100,
        message = "Full name must be between 1 and 100 characters"
    ))]
    pub full_name:      String,
    #[validate(email(message = "Invalid email format"))]
    pub email:          String,
    #[validate(length(min = 8, message = "Password must be at least 8 characters"))]
    pub password:       String,
    /// Role to assign; required
    pub role_id:        Option<i32>,
    #[validate(length(max = 50, message = "License number must not exceed 50 characters"))]
    pub dl_num:         Option<String>,
    #[validate(length(equal = 2, message = "License state must be a two letter code"))]
    pub dl_state:       Option<String>,
    #[validate(length(max = 255, message = "Street address must not exceed 255 characters"))]
    pub street_address: Option<String>,
    #[validate(length(max = 100, message = "City must not exceed 100 characters"))]
    pub city:           Option<String>,
    #[validate(length(equal = 2, message = "State must be a two letter code"))]
    pub state:          Option<String>,
    #[validate(length(max = 10, message = "Zip code must not exceed 10 characters"))]
    pub zip_code:       Option<String>,
    #[validate(length(max = 20, message = "Contact number must not exceed 20 characters"))]
    pub contact_number: Option<String>,
    pub date_of_birth:  Option<NaiveDate>,
    /// Locations the user may access
    #[serde(default)]
    pub location_ids:   Vec<i32>,
}

/// Replacement of a user's profile
///
/// Profile fields are replaced as given, so an absent optional field clears
/// the stored value. `password`, `roleId` and `locationIds` are only applied
/// when present.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateAppUserRequest {
    #[validate(length(
        min = 1,
        max = 100,
        message = "Full name must be between 1 and 100 characters"
    ))]
    pub full_name:      String,
    #[validate(email(message = "Invalid email format"))]
    pub email:          String,
    #[validate(length(min = 8, message = "Password must be at least 8 characters"))]
    pub password:       Option<String>,
    pub role_id:        Option<i32>,
    #[validate(length(max = 50, message = "License number must not exceed 50 characters"))]
    pub dl_num:         Option<String>,
    #[validate(length(equal = 2, message = "License state must be a two letter code"))]
    pub dl_state:       Option<String>,
    #[validate(length(max = 255, message = "Street address must not exceed 255 characters"))]
    pub street_address: Option<String>,
    #[validate(length(max = 100, message = "City must not exceed 100 characters"))]
    pub city:           Option<String>,
    #[validate(length(equal = 2, message = "State must be a two letter code"))]
    pub state:          Option<String>,
    #[validate(length(max = 10, message = "Zip code must not exceed 10 characters"))]
    pub zip_code:       Option<String>,
    #[validate(length(max = 20, message = "Contact number must not exceed 20 characters"))]
    pub contact_number: Option<String>,
    pub date_of_birth:  Option<NaiveDate>,
    pub location_ids:   Option<Vec<i32>>,
}

/// Exact-match filters for the user list
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AppUserListQuery {
    pub email:     Option<String>,
    pub full_name: Option<String>,
}

/// A user as returned by the API; never carries the password hash
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AppUserResponse {
    pub app_user_id:    i32,
    pub full_name:      String,
    pub email:          String,
    pub role_id:        i32,
    pub role_name:      Option<String>,
    pub dl_num:         Option<String>,
    pub dl_state:       Option<String>,
    pub street_address: Option<String>,
    pub city:           Option<String>,
    pub state:          Option<String>,
    pub zip_code:       Option<String>,
    pub contact_number: Option<String>,
    pub date_of_birth:  Option<NaiveDate>,
    pub location_ids:   Vec<i32>,
    pub created_at:     String,
    pub updated_at:     String,
}

impl AppUserResponse {
    /// Build a response from a user row plus its role name and location ids.
    pub fn new(model: app_user::Model, role_name: Option<String>, location_ids: Vec<i32>) -> Self {
        Self {
            app_user_id: model.app_user_id,
            full_name: model.full_name,
            email: model.email,
            role_id: model.user_role_id,
            role_name,
            dl_num: model.dl_num,
            dl_state: model.dl_state,
            street_address: model.street_address,
            city: model.city,
            state: model.state,
            zip_code: model.zip_code,
            contact_number: model.contact_number,
            date_of_birth: model.date_of_birth,
            location_ids,
            created_at: timestamp(&model.created_at),
            updated_at: timestamp(&model.updated_at),
        }
    }
}
