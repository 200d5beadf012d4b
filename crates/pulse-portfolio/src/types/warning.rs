//! Data-quality warnings.
//!
//! Incomplete but valid data never aborts an aggregation. Records excluded
//! from a computation, and referential oddities in a snapshot, are reported
//! as warnings alongside the result for the caller to display.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Kind of data-quality problem.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum WarningKind {
    /// A required field was absent in the source data.
    MissingField,
    /// A field held an unusable value.
    InvalidValue,
    /// A ratio denominator was zero; the KPI is undefined for this record.
    ZeroDenominator,
    /// A row references a project that is not in the snapshot.
    UnknownProject,
    /// A duplicate identifier was encountered.
    DuplicateId,
    /// Dates contradict each other.
    InconsistentDates,
}

impl WarningKind {
    /// Returns a human-readable name.
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            Self::MissingField => "missing field",
            Self::InvalidValue => "invalid value",
            Self::ZeroDenominator => "zero denominator",
            Self::UnknownProject => "unknown project",
            Self::DuplicateId => "duplicate id",
            Self::InconsistentDates => "inconsistent dates",
        }
    }
}

/// A non-fatal data-quality finding.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DataQualityWarning {
    /// The project the finding concerns, when attributable.
    pub project_id: Option<String>,

    /// The field or column involved.
    pub field: String,

    /// Human-readable description.
    pub message: String,

    /// Problem kind.
    pub kind: WarningKind,
}

impl DataQualityWarning {
    /// Creates a warning not tied to a particular project.
    #[must_use]
    pub fn new(kind: WarningKind, field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            project_id: None,
            field: field.into(),
            message: message.into(),
            kind,
        }
    }

    /// Creates a warning attributed to a project.
    #[must_use]
    pub fn for_project(
        project_id: impl Into<String>,
        kind: WarningKind,
        field: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            project_id: Some(project_id.into()),
            field: field.into(),
            message: message.into(),
            kind,
        }
    }
}

impl fmt::Display for DataQualityWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.project_id {
            Some(id) => write!(
                f,
                "[{}] {} ({}): {}",
                id,
                self.kind.name(),
                self.field,
                self.message
            ),
            None => write!(f, "{} ({}): {}", self.kind.name(), self.field, self.message),
        }
    }
}
