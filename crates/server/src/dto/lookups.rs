//! # Lookup Table Data Transfer Objects
//!
//! Device types, device statuses, device conditions and loan statuses all
//! share one shape: an id and a unique name.

use serde::{Deserialize, Serialize};
use validator::Validate;

/// Request to add a lookup value
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Validate)]
pub struct LookupRequest {
    #[validate(length(max = 50, message = "Name must not exceed 50 characters"))]
    pub name: Option<String>,
}

/// A lookup value as returned by the API
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LookupResponse {
    pub id:   i32,
    pub name: String,
}
