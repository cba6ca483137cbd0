// Copyright (c) The Stratum Project Authors.
// Licensed under the MIT License.

//! Error types for backend operations.

/// An error from a cache backend operation.
///
/// This is an opaque error type that can wrap any underlying failure from an
/// adapter. Use [`std::error::Error::source()`] to access the underlying
/// cause if needed.
///
/// # Example
///
/// ```
/// use stratum_tier::Error;
///
/// let error = Error::from_message("operation failed");
/// assert_eq!(error.to_string(), "operation failed");
/// ```
#[derive(Debug, thiserror::Error)]
#[error("{message}")]
pub struct Error {
    message: String,
    #[source]
    source: Option<Box<dyn std::error::Error + Send + Sync>>,
}

impl Error {
    /// Creates an error from a message.
    pub fn from_message(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            source: None,
        }
    }

    /// Creates an error wrapping an underlying cause.
    pub fn from_source(source: impl Into<Box<dyn std::error::Error + Send + Sync>>) -> Self {
        let source = source.into();
        Self {
            message: source.to_string(),
            source: Some(source),
        }
    }
}

/// A specialized [`Result`] type for backend operations.
pub type Result<T, E = Error> = std::result::Result<T, E>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display_contains_message() {
        let error = Error::from_message("display test");
        assert!(error.to_string().contains("display test"));
    }

    #[test]
    fn error_from_source_exposes_cause() {
        let cause = std::io::Error::other("connection reset");
        let error = Error::from_source(cause);
        assert!(error.to_string().contains("connection reset"));
        assert!(std::error::Error::source(&error).is_some());
    }

    #[test]
    fn error_from_message_has_no_source() {
        let error = Error::from_message("plain");
        assert!(std::error::Error::source(&error).is_none());
    }

    #[test]
    fn result_type_alias_propagates_errors() {
        fn returns_err() -> Result<i32> {
            Err(Error::from_message("expected failure"))
        }

        let err = returns_err().expect_err("should return an error");
        assert!(err.to_string().contains("expected failure"));
    }
}
