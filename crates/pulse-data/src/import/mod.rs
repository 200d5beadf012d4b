//! CSV import for projects, risks, and performance history.
//!
//! Each loader is tolerant at the row level: a row that cannot become a
//! valid domain object is skipped with a
//! [`pulse_portfolio::DataQualityWarning`], and the rest of the file loads
//! normally. File-level problems (unreadable path, missing header) are
//! [`crate::DataError`]s.

mod history;
mod projects;
mod risks;

pub use history::{load_history_csv, read_history, HistoryImport};
pub use projects::{load_projects_csv, read_projects, ProjectImport};
pub use risks::{load_risks_csv, read_risks, RiskImport};

use crate::{DataError, DataResult};
use chrono::NaiveDate;
use pulse_portfolio::{DataQualityWarning, PortfolioSnapshot};
use std::path::{Path, PathBuf};
use tracing::debug;

/// Verifies that every required column is present in the header.
pub(crate) fn check_header<R: std::io::Read>(
    reader: &mut csv::Reader<R>,
    required: &[&str],
) -> DataResult<()> {
    let headers = reader.headers()?;
    for name in required {
        if !headers.iter().any(|h| h == *name) {
            return Err(DataError::missing_column(*name));
        }
    }
    Ok(())
}

/// File locations for a full snapshot load.
#[derive(Debug, Clone)]
pub struct SnapshotPaths {
    /// Project records CSV (required).
    pub projects: PathBuf,

    /// Risk register CSV (optional).
    pub risks: Option<PathBuf>,

    /// Monthly performance history CSV (optional).
    pub history: Option<PathBuf>,
}

impl SnapshotPaths {
    /// Creates paths with only the required projects file.
    #[must_use]
    pub fn new(projects: impl AsRef<Path>) -> Self {
        Self {
            projects: projects.as_ref().to_path_buf(),
            risks: None,
            history: None,
        }
    }

    /// Sets the risk register path.
    #[must_use]
    pub fn with_risks(mut self, path: impl AsRef<Path>) -> Self {
        self.risks = Some(path.as_ref().to_path_buf());
        self
    }

    /// Sets the history path.
    #[must_use]
    pub fn with_history(mut self, path: impl AsRef<Path>) -> Self {
        self.history = Some(path.as_ref().to_path_buf());
        self
    }
}

/// A loaded snapshot with the merged warnings of every file.
#[derive(Debug)]
pub struct SnapshotImport {
    /// The assembled snapshot.
    pub snapshot: PortfolioSnapshot,

    /// Row-level findings from all files, in load order.
    pub warnings: Vec<DataQualityWarning>,
}

/// Loads a complete snapshot from its CSV files.
///
/// # Errors
///
/// Returns an error if any named file cannot be read or the assembled
/// snapshot fails validation (duplicate project IDs).
pub fn load_snapshot(
    paths: &SnapshotPaths,
    name: impl Into<String>,
    reporting_date: NaiveDate,
) -> DataResult<SnapshotImport> {
    let projects = load_projects_csv(&paths.projects)?;
    let mut warnings = projects.warnings;

    let mut builder = PortfolioSnapshot::builder(reporting_date)
        .name(name)
        .add_records(projects.records);

    if let Some(risks_path) = &paths.risks {
        let risks = load_risks_csv(risks_path)?;
        warnings.extend(risks.warnings);
        builder = builder.add_risks(risks.risks);
    }

    if let Some(history_path) = &paths.history {
        let history = load_history_csv(history_path)?;
        warnings.extend(history.warnings);
        for (project_id, points) in history.history {
            builder = builder.add_history(project_id, points);
        }
    }

    let snapshot = builder.build()?;
    warnings.extend(snapshot.quality_warnings());

    debug!(
        records = snapshot.record_count(),
        risks = snapshot.risks.len(),
        warnings = warnings.len(),
        "assembled portfolio snapshot"
    );

    Ok(SnapshotImport { snapshot, warnings })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn write_file(dir: &tempfile::TempDir, name: &str, content: &str) -> PathBuf {
        let path = dir.path().join(name);
        let mut file = std::fs::File::create(&path).unwrap();
        file.write_all(content.as_bytes()).unwrap();
        path
    }

    #[test]
    fn test_load_snapshot_from_three_files() {
        let dir = tempfile::tempdir().unwrap();

        let projects = write_file(
            &dir,
            "projects.csv",
            "project_id,project_name,sector,status,budget,planned_cost,actual_cost,earned_value,start_date,planned_end_date\n\
             P001,Harbor,Infrastructure,On Track,1000000,100,90,80,2025-01-01,2025-12-31\n\
             P002,Depot,Buildings,At Risk,2000000,200,210,150,2025-02-01,2026-02-01\n",
        );
        let risks = write_file(
            &dir,
            "risks.csv",
            "risk_id,project_id,risk_name,category,probability,impact_cost,status\n\
             R001,P001,Permit delay,External Factors,0.4,100000,Active\n",
        );
        let history = write_file(
            &dir,
            "history.csv",
            "project_id,month,spi,cpi\n\
             P001,2025-04,0.95,1.0\n\
             P001,2025-05,0.9,0.98\n",
        );

        let paths = SnapshotPaths::new(projects)
            .with_risks(risks)
            .with_history(history);
        let import = load_snapshot(&paths, "Test", date(2025, 6, 30)).unwrap();

        assert_eq!(import.snapshot.record_count(), 2);
        assert_eq!(import.snapshot.risks.len(), 1);
        assert_eq!(import.snapshot.history_for("P001").len(), 2);
        assert!(import.warnings.is_empty());
    }

    #[test]
    fn test_load_snapshot_projects_only() {
        let dir = tempfile::tempdir().unwrap();
        let projects = write_file(
            &dir,
            "projects.csv",
            "project_id,project_name,budget,planned_cost,actual_cost,earned_value,start_date,planned_end_date\n\
             P001,Harbor,1000000,100,90,80,2025-01-01,2025-12-31\n",
        );

        let import =
            load_snapshot(&SnapshotPaths::new(projects), "Solo", date(2025, 6, 30)).unwrap();
        assert_eq!(import.snapshot.record_count(), 1);
    }

    #[test]
    fn test_orphan_rows_surface_as_warnings() {
        let dir = tempfile::tempdir().unwrap();
        let projects = write_file(
            &dir,
            "projects.csv",
            "project_id,project_name,budget,planned_cost,actual_cost,earned_value,start_date,planned_end_date\n\
             P001,Harbor,1000000,100,90,80,2025-01-01,2025-12-31\n",
        );
        let risks = write_file(
            &dir,
            "risks.csv",
            "risk_id,project_id,risk_name,category,probability,impact_cost,status\n\
             R001,P404,Orphan,Other,0.5,1000,Active\n",
        );

        let paths = SnapshotPaths::new(projects).with_risks(risks);
        let import = load_snapshot(&paths, "Test", date(2025, 6, 30)).unwrap();

        assert!(import
            .warnings
            .iter()
            .any(|w| w.project_id.as_deref() == Some("P404")));
    }

    #[test]
    fn test_missing_file_is_an_error() {
        let paths = SnapshotPaths::new("/nonexistent/projects.csv");
        assert!(load_snapshot(&paths, "Test", date(2025, 6, 30)).is_err());
    }
}
