//! # Authentication Module
//!
//! Login and logout endpoints. Token validation for protected routes lives in
//! [`crate::middleware::auth`].

pub mod handlers;
