// Copyright (c) The Stratum Project Authors.
// Licensed under the MIT License.

//! Error types for cache orchestration.
//!
//! Three failure classes exist, with different propagation rules:
//!
//! - [`ConfigurationError`]: construction-time, fatal. The tier chain could
//!   not be built.
//! - [`ArgumentError`]: call-time, fatal to that call. Raised eagerly before
//!   any backend is touched.
//! - Backend errors ([`stratum_tier::Error`]): runtime, recoverable. Reads
//!   absorb them into the fallback path; broadcast writes surface only the
//!   error from the tier designated to carry the caller's result.

/// A problem with the tier configuration discovered while building the chain.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum ConfigurationError {
    /// Every primary tier was dropped or failed to connect, leaving nothing
    /// to serve reads from.
    #[error("no usable primary tiers ({attempted} configured, all unavailable)")]
    NoPrimaryTiers {
        /// How many primary tier configs were processed before giving up.
        attempted: usize,
    },
}

/// An operation was called with arguments it cannot act on.
///
/// These are raised synchronously, before any tier is contacted, so a failed
/// call is guaranteed to have had no effect.
#[derive(Debug, thiserror::Error)]
#[error(".{operation}() requires {requirement}")]
pub struct ArgumentError {
    operation: &'static str,
    requirement: &'static str,
}

impl ArgumentError {
    pub(crate) fn new(operation: &'static str, requirement: &'static str) -> Self {
        Self { operation, requirement }
    }

    /// The operation that rejected its arguments.
    #[must_use]
    pub fn operation(&self) -> &'static str {
        self.operation
    }
}

/// The error type returned by cache orchestration operations.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum Error {
    /// The tier chain could not be built.
    #[error(transparent)]
    Configuration(#[from] ConfigurationError),

    /// The call was rejected before reaching any backend.
    #[error(transparent)]
    Argument(#[from] ArgumentError),

    /// A backend error from the tier designated to carry the caller's result.
    #[error(transparent)]
    Backend(#[from] stratum_tier::Error),
}

/// A specialized result type for cache orchestration operations.
pub type Result<T, E = Error> = std::result::Result<T, E>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn argument_error_names_operation_and_requirement() {
        let err = ArgumentError::new("mget", "at least one key");
        assert_eq!(err.to_string(), ".mget() requires at least one key");
        assert_eq!(err.operation(), "mget");
    }

    #[test]
    fn configuration_error_reports_attempt_count() {
        let err = ConfigurationError::NoPrimaryTiers { attempted: 3 };
        assert_eq!(err.to_string(), "no usable primary tiers (3 configured, all unavailable)");
    }

    #[test]
    fn backend_errors_convert_transparently() {
        let backend = stratum_tier::Error::from_message("connection reset");
        let err = Error::from(backend);
        assert_eq!(err.to_string(), "connection reset");
        assert!(matches!(err, Error::Backend(_)));
    }
}
