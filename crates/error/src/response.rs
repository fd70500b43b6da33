//! # Response Bodies
//!
//! JSON bodies shared by the HTTP handlers.
//!
//! Errors render as `{"error": "...", "code": "..."}`, plain acknowledgements
//! as `{"message": "..."}` and wrapped payloads as `{"message": "...", "data": ...}`.

use serde::{Deserialize, Serialize};

/// Body of every error response.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ErrorBody {
    /// Human readable message.
    pub error: String,
    /// Stable machine readable code.
    pub code:  String,
}

impl ErrorBody {
    pub fn new(error: impl Into<String>, code: impl Into<String>) -> Self {
        Self {
            error: error.into(),
            code:  code.into(),
        }
    }
}

/// A bare acknowledgement message.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// A payload accompanied by a message.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DataResponse<T> {
    pub message: String,
    pub data:    T,
}

impl<T> DataResponse<T> {
    /// Wrap `data` with `message`.
    ///
    /// # Arguments
    ///
    /// * `message` - Text placed in the `message` field
    /// * `data` - Payload placed in the `data` field
    pub fn new(message: impl Into<String>, data: T) -> Self {
        Self {
            message: message.into(),
            data,
        }
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn test_error_body_shape() {
        let body = ErrorBody::new("Loan not found", "NOT_FOUND");
        let value = serde_json::to_value(&body).unwrap();

        assert_eq!(value, json!({"error": "Loan not found", "code": "NOT_FOUND"}));
    }

    #[test]
    fn test_data_response_shape() {
        let body = DataResponse::new("Loans retrieved successfully", vec![1, 2]);
        let value = serde_json::to_value(&body).unwrap();

        assert_eq!(value["message"], "Loans retrieved successfully");
        assert_eq!(value["data"], json!([1, 2]));
    }
}
