//! Monthly performance history CSV import.

use crate::DataResult;
use pulse_core::ReportingPeriod;
use pulse_portfolio::{DataQualityWarning, PerformancePoint, WarningKind};
use serde::Deserialize;
use std::collections::HashMap;
use std::io::Read;
use std::path::Path;
use tracing::{debug, warn};

/// CSV row for one observed month.
#[derive(Debug, Deserialize)]
struct HistoryRow {
    project_id: String,
    month: String,
    spi: Option<f64>,
    cpi: Option<f64>,
}

/// Result of a history file load.
#[derive(Debug)]
pub struct HistoryImport {
    /// Observed points grouped by project, in file order.
    pub history: HashMap<String, Vec<PerformancePoint>>,

    /// Rows excluded, with the reason.
    pub warnings: Vec<DataQualityWarning>,
}

/// Loads performance history from a CSV file.
///
/// # Errors
///
/// Returns an error if the file cannot be read. Malformed rows are
/// skipped with warnings, not errors.
pub fn load_history_csv(path: impl AsRef<Path>) -> DataResult<HistoryImport> {
    let reader = csv::Reader::from_path(path.as_ref())?;
    let import = read_rows(reader)?;
    debug!(
        path = %path.as_ref().display(),
        projects = import.history.len(),
        warnings = import.warnings.len(),
        "loaded performance history"
    );
    Ok(import)
}

/// Reads performance history from any CSV source.
///
/// # Errors
///
/// Returns an error if the header cannot be parsed.
pub fn read_history(reader: impl Read) -> DataResult<HistoryImport> {
    read_rows(csv::Reader::from_reader(reader))
}

/// Columns a history file must carry.
const REQUIRED_COLUMNS: [&str; 4] = ["project_id", "month", "spi", "cpi"];

fn read_rows<R: Read>(mut reader: csv::Reader<R>) -> DataResult<HistoryImport> {
    super::check_header(&mut reader, &REQUIRED_COLUMNS)?;

    let mut history: HashMap<String, Vec<PerformancePoint>> = HashMap::new();
    let mut warnings = Vec::new();

    for (index, result) in reader.deserialize::<HistoryRow>().enumerate() {
        let line = index + 2;

        let row = match result {
            Ok(row) => row,
            Err(err) => {
                warn!(line, error = %err, "skipping unparseable history row");
                warnings.push(DataQualityWarning::new(
                    WarningKind::InvalidValue,
                    "row",
                    format!("line {line}: {err}"),
                ));
                continue;
            }
        };

        let period = match row.month.parse::<ReportingPeriod>() {
            Ok(period) => period,
            Err(err) => {
                warnings.push(DataQualityWarning::for_project(
                    &row.project_id,
                    WarningKind::InvalidValue,
                    "month",
                    format!("observation excluded: {err}"),
                ));
                continue;
            }
        };

        let (Some(spi), Some(cpi)) = (row.spi, row.cpi) else {
            warnings.push(DataQualityWarning::for_project(
                &row.project_id,
                WarningKind::MissingField,
                "spi/cpi",
                format!("observation for {period} excluded: both indices are required"),
            ));
            continue;
        };

        if !spi.is_finite() || !cpi.is_finite() || spi < 0.0 || cpi < 0.0 {
            warnings.push(DataQualityWarning::for_project(
                &row.project_id,
                WarningKind::InvalidValue,
                "spi/cpi",
                format!("observation for {period} excluded: indices must be non-negative"),
            ));
            continue;
        }

        history
            .entry(row.project_id)
            .or_default()
            .push(PerformancePoint::new(period, spi, cpi));
    }

    Ok(HistoryImport { history, warnings })
}
