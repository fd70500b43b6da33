//! # Logging Macros
//!
//! Convenience macros for structured logging with consistent targets and fields.

/// Log a completed API request with method, path, status and duration.
///
/// # Example
///
/// ```rust
/// use logging::log_api_request;
///
/// log_api_request!("GET", "/api/loans", 200, 12, "k192v2g4w3zq8h6j5k1abc");
/// ```
#[macro_export]
macro_rules! log_api_request {
    ($method:expr, $path:expr, $status:expr, $duration:expr, $request_id:expr) => {
        $crate::info!(
            target: "api",
            method = %$method,
            path = %$path,
            status = %$status,
            duration_ms = %$duration,
            request_id = %$request_id,
            "API request"
        )
    };
}

/// Log an authentication event.
#[macro_export]
macro_rules! log_auth_event {
    ($event:expr, $subject:expr, $success:expr) => {
        $crate::info!(
            target: "auth",
            event = %$event,
            subject = %$subject,
            success = $success,
            "Authentication event"
        )
    };
}

/// Log a security event such as a rejected token or a denied route.
#[macro_export]
macro_rules! log_security_event {
    ($event:expr, $subject:expr, $details:expr) => {
        $crate::warn!(
            target: "security",
            event = %$event,
            subject = %$subject,
            details = %$details,
            "Security event"
        )
    };
}
