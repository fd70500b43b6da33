//! # Resource Handlers
//!
//! Inner handlers for every REST resource. Each takes `&AppState` plus the
//! already extracted request parts and is wrapped by a thin axum handler in
//! [`crate::router`].

use error::{AppError, Result};
use sea_orm::{ConnectionTrait, EntityTrait, PrimaryKeyTrait};

pub mod app_users;
pub mod bins;
pub mod devices;
pub mod loans;
pub mod locations;
pub mod lookups;
pub mod user_location_access;
pub mod user_roles;

/// Load a referenced row, failing with 400 and `message` when it is absent.
///
/// Used for foreign keys supplied in request bodies, where a dangling id is a
/// client error rather than a missing resource.
pub(crate) async fn find_reference<E, C>(db: &C, id: i32, message: &str) -> Result<E::Model>
where
    E: EntityTrait,
    <E::PrimaryKey as PrimaryKeyTrait>::ValueType: From<i32>,
    C: ConnectionTrait,
{
    E::find_by_id(id)
        .one(db)
        .await?
        .ok_or_else(|| AppError::bad_request(message))
}

/// Trim a required text field, treating blank as absent.
pub(crate) fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_non_blank() {
        assert_eq!(non_blank(Some("  Admin ".to_string())), Some("Admin".to_string()));
        assert_eq!(non_blank(Some("   ".to_string())), None);
        assert_eq!(non_blank(None), None);
    }
}
