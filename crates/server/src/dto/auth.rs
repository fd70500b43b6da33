//! # Authentication Data Transfer Objects
//!
//! Request types for authentication endpoints.

use serde::Deserialize;
use validator::Validate;

/// Request body for user login
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Validate)]
pub struct LoginRequest {
    /// User's email address, looked up as given
    pub email: String,

    /// User's password
    #[validate(length(min = 1, message = "Password is required"))]
    pub password: String,
}
