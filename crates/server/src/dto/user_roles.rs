//! # User Role Data Transfer Objects

use entity::user_role;
use serde::{Deserialize, Serialize};
use validator::Validate;

/// Request to create a role
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateUserRoleRequest {
    /// Role name, also used as the token authority
    #[validate(length(max = 50, message = "Role name must not exceed 50 characters"))]
    pub role_name:   Option<String>,
    /// Whether members must hold a driver's license (default false)
    pub dl_required: Option<bool>,
    /// Whether the role is active (default true)
    pub is_active:   Option<bool>,
}

/// Partial update of a role; absent fields are left unchanged
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateUserRoleRequest {
    #[validate(length(max = 50, message = "Role name must not exceed 50 characters"))]
    pub role_name:   Option<String>,
    pub dl_required: Option<bool>,
    pub is_active:   Option<bool>,
}

/// A role as returned by the API
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserRoleResponse {
    pub user_role_id: i32,
    pub role_name:    String,
    pub dl_required:  bool,
    pub is_active:    bool,
}

impl From<user_role::Model> for UserRoleResponse {
    fn from(model: user_role::Model) -> Self {
        Self {
            user_role_id: model.user_role_id,
            role_name:    model.user_role_name,
            dl_required:  model.dl_required,
            is_active:    model.is_active,
        }
    }
}
