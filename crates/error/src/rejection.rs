//! # Rejection Handlers
//!
//! Converts axum extractor rejections into [`AppError`] values so they render
//! with the standard error body.

use axum::extract::rejection::{JsonRejection, PathRejection, QueryRejection};

use crate::AppError;

/// Extract the field name from a serde message like
/// "missing field `email` at line 1 column 2".
fn missing_field(message: &str) -> Option<&str> {
    let start = message.find("missing field `")? + "missing field `".len();
    let len = message[start ..].find('`')?;
    Some(&message[start .. start + len])
}

/// Map a JSON body rejection to a 400 error.
pub fn json_rejection(rejection: JsonRejection) -> AppError {
    let message = rejection.body_text();
    match missing_field(&message) {
        Some(field) => AppError::bad_request(format!("Missing required field: {}", field)),
        None => AppError::bad_request(message),
    }
}

/// Map a query string rejection to a 400 error.
pub fn query_rejection(rejection: QueryRejection) -> AppError {
    AppError::bad_request(format!("Invalid query string: {}", rejection.body_text()))
}

/// Map a path parameter rejection to a 400 error.
pub fn path_rejection(rejection: PathRejection) -> AppError {
    AppError::bad_request(format!("Invalid path parameter: {}", rejection.body_text()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_field_extraction() {
        let message = "Failed to deserialize the JSON body into the target type: missing field `email` at line 1 \
                       column 22";
        assert_eq!(missing_field(message), Some("email"));
    }

    #[test]
    fn test_missing_field_absent() {
        assert_eq!(missing_field("expected value at line 1 column 1"), None);
    }
}
