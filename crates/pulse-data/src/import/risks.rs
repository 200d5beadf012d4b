//! Risk register CSV import.

use crate::DataResult;
use pulse_portfolio::{DataQualityWarning, RiskCategory, RiskEntry, RiskStatus, WarningKind};
use rust_decimal::Decimal;
use serde::Deserialize;
use std::io::Read;
use std::path::Path;
use tracing::{debug, warn};

/// CSV row for a risk-register entry.
#[derive(Debug, Deserialize)]
struct RiskRow {
    risk_id: String,
    project_id: String,
    risk_name: String,
    #[serde(default)]
    category: Option<String>,
    probability: Option<f64>,
    impact_cost: Option<Decimal>,
    #[serde(default)]
    status: Option<String>,
}

/// Result of a risk register load.
#[derive(Debug)]
pub struct RiskImport {
    /// Successfully ingested entries.
    pub risks: Vec<RiskEntry>,

    /// Rows excluded or adjusted, with the reason.
    pub warnings: Vec<DataQualityWarning>,
}

/// Loads a risk register from a CSV file.
///
/// # Errors
///
/// Returns an error if the file cannot be read. Malformed rows are
/// skipped with warnings, not errors.
pub fn load_risks_csv(path: impl AsRef<Path>) -> DataResult<RiskImport> {
    let reader = csv::Reader::from_path(path.as_ref())?;
    let import = read_rows(reader)?;
    debug!(
        path = %path.as_ref().display(),
        risks = import.risks.len(),
        warnings = import.warnings.len(),
        "loaded risk register"
    );
    Ok(import)
}

/// Reads risk-register entries from any CSV source.
///
/// # Errors
///
/// Returns an error if the header cannot be parsed.
pub fn read_risks(reader: impl Read) -> DataResult<RiskImport> {
    read_rows(csv::Reader::from_reader(reader))
}

/// Columns a risk file must carry; the rest are optional.
const REQUIRED_COLUMNS: [&str; 5] = [
    "risk_id",
    "project_id",
    "risk_name",
    "probability",
    "impact_cost",
];

fn read_rows<R: Read>(mut reader: csv::Reader<R>) -> DataResult<RiskImport> {
    super::check_header(&mut reader, &REQUIRED_COLUMNS)?;

    let mut risks = Vec::new();
    let mut warnings = Vec::new();

    for (index, result) in reader.deserialize::<RiskRow>().enumerate() {
        let line = index + 2;

        let row = match result {
            Ok(row) => row,
            Err(err) => {
                warn!(line, error = %err, "skipping unparseable risk row");
                warnings.push(DataQualityWarning::new(
                    WarningKind::InvalidValue,
                    "row",
                    format!("line {line}: {err}"),
                ));
                continue;
            }
        };

        match build_risk(row, &mut warnings) {
            Ok(risk) => risks.push(risk),
            Err(warning) => {
                warn!(line, %warning, "excluding risk row");
                warnings.push(warning);
            }
        }
    }

    Ok(RiskImport { risks, warnings })
}

fn build_risk(
    row: RiskRow,
    warnings: &mut Vec<DataQualityWarning>,
) -> Result<RiskEntry, DataQualityWarning> {
    let id = row.risk_id.clone();

    let missing = |field: &str| {
        DataQualityWarning::for_project(
            &row.project_id,
            WarningKind::MissingField,
            field,
            format!("risk '{id}' excluded: {field} is required"),
        )
    };

    let probability = row.probability.ok_or_else(|| missing("probability"))?;
    let impact_cost = row.impact_cost.ok_or_else(|| missing("impact_cost"))?;

    let category = row
        .category
        .as_deref()
        .map(|c| c.parse::<RiskCategory>().unwrap_or_default())
        .unwrap_or_default();

    let entry = RiskEntry::new(
        &id,
        &row.project_id,
        row.risk_name,
        category,
        probability,
        impact_cost,
    )
    .map_err(|err| {
        DataQualityWarning::for_project(
            &row.project_id,
            WarningKind::InvalidValue,
            "risk",
            format!("risk excluded: {err}"),
        )
    })?;

    let status = match row.status.as_deref() {
        None => RiskStatus::Active,
        Some(raw) => raw.parse::<RiskStatus>().unwrap_or_else(|_| {
            warnings.push(DataQualityWarning::for_project(
                &row.project_id,
                WarningKind::InvalidValue,
                "status",
                format!("unknown risk status '{raw}', assuming Active"),
            ));
            RiskStatus::Active
        }),
    };

    Ok(entry.with_status(status))
}
