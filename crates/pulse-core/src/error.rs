//! Error types for the core crate.

use thiserror::Error;

/// Result type for core operations.
pub type CoreResult<T> = Result<T, CoreError>;

/// Errors that can occur while constructing core types.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CoreError {
    /// A status string could not be parsed.
    #[error("Unknown project status: {value}")]
    InvalidStatus {
        /// The unrecognized status string.
        value: String,
    },

    /// A reporting period was invalid or could not be parsed.
    #[error("Invalid reporting period: {value}")]
    InvalidPeriod {
        /// The offending period representation.
        value: String,
    },

    /// A geographic coordinate was out of range.
    #[error("Invalid {field}: {value}")]
    InvalidCoordinate {
        /// Which coordinate was invalid ("latitude" or "longitude").
        field: &'static str,
        /// The out-of-range value.
        value: f64,
    },
}

impl CoreError {
    /// Create an invalid status error.
    #[must_use]
    pub fn invalid_status(value: impl Into<String>) -> Self {
        Self::InvalidStatus {
            value: value.into(),
        }
    }

    /// Create an invalid period error.
    #[must_use]
    pub fn invalid_period(value: impl Into<String>) -> Self {
        Self::InvalidPeriod {
            value: value.into(),
        }
    }
}
