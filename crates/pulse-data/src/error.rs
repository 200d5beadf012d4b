//! Error types for data ingestion.

use thiserror::Error;

/// Result type for data operations.
pub type DataResult<T> = Result<T, DataError>;

/// Errors that can occur while loading data.
///
/// These cover structural failures only - an unreadable file, a broken
/// header, an unbuildable snapshot. Row-level problems are
/// [`pulse_portfolio::DataQualityWarning`]s on the import result instead.
#[derive(Error, Debug)]
pub enum DataError {
    /// The file could not be read.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The CSV structure could not be parsed at all.
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// A required header column is absent.
    #[error("Missing required column: {name}")]
    MissingColumn {
        /// The absent column.
        name: String,
    },

    /// The assembled snapshot failed validation.
    #[error(transparent)]
    Snapshot(#[from] pulse_portfolio::PortfolioError),
}

impl DataError {
    /// Create a missing column error.
    #[must_use]
    pub fn missing_column(name: impl Into<String>) -> Self {
        Self::MissingColumn { name: name.into() }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = DataError::missing_column("budget");
        assert!(err.to_string().contains("budget"));

        let err: DataError = std::io::Error::new(std::io::ErrorKind::NotFound, "gone").into();
        assert!(err.to_string().contains("gone"));
    }
}
