//! # Error Rendering
//!
//! Converts [`AppError`] values into HTTP responses.
//!
//! ## Usage
//!
//! ```rust
//! use error::{AppError, ErrorHandler};
//!
//! let handler = ErrorHandler::new(false);
//! let response = handler.to_response(&AppError::not_found("Loan not found"));
//! assert_eq!(response.status(), 404);
//! ```

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};

use crate::{AppError, response::ErrorBody};

/// Error handler that converts errors to HTTP responses.
#[derive(Debug, Clone, Copy)]
pub struct ErrorHandler {
    /// Whether to include server error details in the response.
    pub include_details: bool,
}

impl ErrorHandler {
    /// Create a new error handler.
    #[inline]
    pub fn new(include_details: bool) -> Self {
        Self {
            include_details,
        }
    }

    /// Convert an error to a response.
    ///
    /// Client errors always carry their message. Server errors are logged and
    /// replaced with a generic message unless `include_details` is set.
    pub fn to_response(&self, err: &AppError) -> Response {
        let status = err.status();
        let message = if status.is_server_error() && !self.include_details {
            tracing::error!(code = err.code(), error = %err, "Request failed with a server error");
            match status {
                StatusCode::INTERNAL_SERVER_ERROR => "Internal server error".to_string(),
                _ => "An error occurred".to_string(),
            }
        }
        else {
            err.message()
        };

        let mut response = (status, Json(ErrorBody::new(message, err.code()))).into_response();

        if status == StatusCode::UNAUTHORIZED {
            response
                .headers_mut()
                .insert(http::header::WWW_AUTHENTICATE, http::HeaderValue::from_static("Bearer"));
        }

        response
    }
}

impl Default for ErrorHandler {
    fn default() -> Self { Self::new(false) }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response { ErrorHandler::default().to_response(&self) }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_handler_status() {
        let handler = ErrorHandler::new(false);
        let response = handler.to_response(&AppError::not_found("Bin not found with ID 4"));

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        assert_eq!(
            response.headers().get(http::header::CONTENT_TYPE).unwrap(),
            "application/json"
        );
    }

    #[test]
    fn test_unauthorized_sets_www_authenticate() {
        let response = AppError::JwtExpired.into_response();

        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(
            response.headers().get(http::header::WWW_AUTHENTICATE).unwrap(),
            "Bearer"
        );
    }

    #[test]
    fn test_forbidden_has_no_challenge() {
        let response = AppError::forbidden("Admin authority is required").into_response();

        assert_eq!(response.status(), StatusCode::FORBIDDEN);
        assert!(response.headers().get(http::header::WWW_AUTHENTICATE).is_none());
    }
}
