//! # Data Transfer Objects Module
//!
//! Request and response types for API endpoints.
//!
//! Entity endpoints speak camelCase JSON. Loan endpoints answer in snake_case
//! and wrap their payloads as `{"message": ..., "data": ...}`.

pub mod app_users;
pub mod auth;
pub mod bins;
pub mod devices;
pub mod loans;
pub mod locations;
pub mod lookups;
pub mod user_location_access;
pub mod user_roles;

/// Format a timestamp the way every response does.
pub(crate) fn timestamp(value: &chrono::DateTime<chrono::Utc>) -> String { value.to_rfc3339() }
