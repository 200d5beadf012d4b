//! Error types for portfolio analytics.
//!
//! Structural misuse (duplicate ids, invalid thresholds, malformed records)
//! is a typed error. Data-quality problems on otherwise valid input are
//! *not* errors; they surface as [`crate::types::DataQualityWarning`]s
//! attached to results.

use thiserror::Error;

/// Result type for portfolio operations.
pub type PortfolioResult<T> = Result<T, PortfolioError>;

/// Errors that can occur during portfolio operations.
#[derive(Error, Debug, Clone)]
pub enum PortfolioError {
    /// Missing required field during construction.
    #[error("Missing required field: {field}")]
    MissingField {
        /// The name of the missing field.
        field: String,
    },

    /// Invalid project record data.
    #[error("Invalid project '{id}': {reason}")]
    InvalidRecord {
        /// The project ID.
        id: String,
        /// The reason the record is invalid.
        reason: String,
    },

    /// Invalid risk-register entry.
    #[error("Invalid risk '{id}': {reason}")]
    InvalidRisk {
        /// The risk ID.
        id: String,
        /// The reason the entry is invalid.
        reason: String,
    },

    /// Two records in one snapshot share a project ID.
    #[error("Duplicate project ID in snapshot: {id}")]
    DuplicateProject {
        /// The duplicated project ID.
        id: String,
    },

    /// Invalid classification thresholds.
    #[error("Invalid thresholds: {reason}")]
    InvalidThresholds {
        /// The reason the thresholds are invalid.
        reason: String,
    },

    /// A core type failed to validate or parse.
    #[error(transparent)]
    Core(#[from] pulse_core::CoreError),
}

impl PortfolioError {
    /// Create a missing field error.
    #[must_use]
    pub fn missing_field(field: impl Into<String>) -> Self {
        Self::MissingField {
            field: field.into(),
        }
    }

    /// Create an invalid record error.
    #[must_use]
    pub fn invalid_record(id: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidRecord {
            id: id.into(),
            reason: reason.into(),
        }
    }

    /// Create an invalid risk error.
    #[must_use]
    pub fn invalid_risk(id: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidRisk {
            id: id.into(),
            reason: reason.into(),
        }
    }

    /// Create an invalid thresholds error.
    #[must_use]
    pub fn invalid_thresholds(reason: impl Into<String>) -> Self {
        Self::InvalidThresholds {
            reason: reason.into(),
        }
    }
}
