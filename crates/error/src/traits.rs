//! # Error Traits
//!
//! Extension methods for results whose errors convert into [`AppError`].

use crate::{AppError, Result};

/// Extension methods for Result types.
pub trait ResultExt<T> {
    /// Convert the error and prefix its message with `context`.
    fn context<C: ToString>(self, context: C) -> Result<T>;

    /// Convert the error and log it at error level.
    fn log_error(self) -> Result<T>;
}

impl<T, E> ResultExt<T> for std::result::Result<T, E>
where
    E: Into<AppError>,
{
    fn context<C: ToString>(self, context: C) -> Result<T> {
        self.map_err(|e| {
            let err: AppError = e.into();
            err.context(context)
        })
    }

    fn log_error(self) -> Result<T> {
        self.map_err(|e| {
            let err: AppError = e.into();
            tracing::error!(code = err.code(), error = %err, "Operation failed");
            err
        })
    }
}

/// Convert a Result to an Option, logging errors.
pub fn ok_or_log<T>(result: Result<T>) -> Option<T> {
    result
        .map_err(|e| {
            tracing::warn!(error = %e, "Operation failed");
            e
        })
        .ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_context() {
        let result: Result<i32> = Err(AppError::not_found("Device"));
        let err = result.context("Loading bin").unwrap_err();

        assert_eq!(err.to_string(), "NotFound: Loading bin: Device");
    }

    #[test]
    fn test_context_on_foreign_error() {
        let result: std::result::Result<(), std::io::Error> =
            Err(std::io::Error::new(std::io::ErrorKind::NotFound, "no such file"));
        let err = result.context("Reading private key").unwrap_err();

        assert_eq!(err.code(), "IO_ERROR");
        assert_eq!(err.message(), "Reading private key: no such file");
    }

    #[test]
    fn test_log_error() {
        let result: Result<i32> = Err(AppError::conflict("duplicate"));
        assert!(result.log_error().is_err());
    }

    #[test]
    fn test_ok_or_log() {
        assert_eq!(ok_or_log(Ok(42)), Some(42));
        assert_eq!(ok_or_log::<i32>(Err(AppError::internal("x"))), None);
    }
}
