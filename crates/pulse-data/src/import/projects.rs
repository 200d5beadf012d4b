//! Project record CSV import.

use crate::DataResult;
use chrono::NaiveDate;
use pulse_core::{GeoPoint, ProjectStatus, Sector};
use pulse_portfolio::{DataQualityWarning, ProjectRecord, WarningKind};
use rust_decimal::Decimal;
use serde::Deserialize;
use std::io::Read;
use std::path::Path;
use tracing::{debug, warn};

/// CSV row for a project record.
///
/// Loosely typed so a single bad cell fails only its own row: strings are
/// parsed after deserialization, numbers are optional.
#[derive(Debug, Deserialize)]
struct ProjectRow {
    project_id: String,
    project_name: String,
    #[serde(default)]
    sector: Option<String>,
    #[serde(default)]
    status: Option<String>,
    budget: Option<Decimal>,
    planned_cost: Option<Decimal>,
    actual_cost: Option<Decimal>,
    earned_value: Option<Decimal>,
    start_date: Option<NaiveDate>,
    planned_end_date: Option<NaiveDate>,
    #[serde(default)]
    planned_duration_days: Option<i64>,
    #[serde(default)]
    elapsed_days: Option<i64>,
    #[serde(default)]
    risk_count: Option<u32>,
    #[serde(default)]
    project_manager: Option<String>,
    #[serde(default)]
    latitude: Option<f64>,
    #[serde(default)]
    longitude: Option<f64>,
    #[serde(default)]
    location: Option<String>,
}

/// Result of a project file load.
#[derive(Debug)]
pub struct ProjectImport {
    /// Successfully ingested records.
    pub records: Vec<ProjectRecord>,

    /// Rows excluded or adjusted, with the reason.
    pub warnings: Vec<DataQualityWarning>,
}

/// Loads project records from a CSV file.
///
/// # Errors
///
/// Returns an error if the file cannot be read. Malformed rows are
/// skipped with warnings, not errors.
pub fn load_projects_csv(path: impl AsRef<Path>) -> DataResult<ProjectImport> {
    let reader = csv::Reader::from_path(path.as_ref())?;
    let import = read_rows(reader)?;
    debug!(
        path = %path.as_ref().display(),
        records = import.records.len(),
        warnings = import.warnings.len(),
        "loaded project records"
    );
    Ok(import)
}

/// Reads project records from any CSV source.
///
/// # Errors
///
/// Returns an error if the header cannot be parsed.
pub fn read_projects(reader: impl Read) -> DataResult<ProjectImport> {
    read_rows(csv::Reader::from_reader(reader))
}

/// Columns a project file must carry; the rest are optional.
const REQUIRED_COLUMNS: [&str; 8] = [
    "project_id",
    "project_name",
    "budget",
    "planned_cost",
    "actual_cost",
    "earned_value",
    "start_date",
    "planned_end_date",
];

fn read_rows<R: Read>(mut reader: csv::Reader<R>) -> DataResult<ProjectImport> {
    super::check_header(&mut reader, &REQUIRED_COLUMNS)?;

    let mut records = Vec::new();
    let mut warnings = Vec::new();

    for (index, result) in reader.deserialize::<ProjectRow>().enumerate() {
        let line = index + 2; // header is line 1

        let row = match result {
            Ok(row) => row,
            Err(err) => {
                warn!(line, error = %err, "skipping unparseable project row");
                warnings.push(DataQualityWarning::new(
                    WarningKind::InvalidValue,
                    "row",
                    format!("line {line}: {err}"),
                ));
                continue;
            }
        };

        match build_record(row, &mut warnings) {
            Ok(record) => records.push(record),
            Err(warning) => {
                warn!(line, %warning, "excluding project row");
                warnings.push(warning);
            }
        }
    }

    Ok(ProjectImport { records, warnings })
}

/// Turns a row into a domain record, or the warning explaining why not.
fn build_record(
    row: ProjectRow,
    warnings: &mut Vec<DataQualityWarning>,
) -> Result<ProjectRecord, DataQualityWarning> {
    let id = row.project_id.clone();

    let missing = |field: &str| {
        DataQualityWarning::for_project(
            &id,
            WarningKind::MissingField,
            field,
            format!("record excluded: {field} is required"),
        )
    };

    let budget = row.budget.ok_or_else(|| missing("budget"))?;
    let planned_cost = row.planned_cost.ok_or_else(|| missing("planned_cost"))?;
    let actual_cost = row.actual_cost.ok_or_else(|| missing("actual_cost"))?;
    let earned_value = row.earned_value.ok_or_else(|| missing("earned_value"))?;
    let start_date = row.start_date.ok_or_else(|| missing("start_date"))?;
    let planned_end_date = row
        .planned_end_date
        .ok_or_else(|| missing("planned_end_date"))?;

    if planned_end_date <= start_date {
        return Err(DataQualityWarning::for_project(
            &id,
            WarningKind::InconsistentDates,
            "planned_end_date",
            format!(
                "record excluded: planned_end_date {planned_end_date} is not after \
                 start_date {start_date}"
            ),
        ));
    }

    let status = parse_status(&id, row.status.as_deref(), warnings);
    let sector = row
        .sector
        .as_deref()
        .map(|s| s.parse::<Sector>().unwrap_or_default())
        .unwrap_or_default();

    let mut builder = ProjectRecord::builder()
        .id(&id)
        .name(row.project_name)
        .sector(sector)
        .status(status)
        .budget(budget)
        .planned_cost(planned_cost)
        .actual_cost(actual_cost)
        .earned_value(earned_value)
        .start_date(start_date)
        .planned_end_date(planned_end_date)
        .risk_count(row.risk_count.unwrap_or(0));

    if let Some(days) = row.planned_duration_days {
        builder = builder.planned_duration_days(days);
    }
    if let Some(days) = row.elapsed_days {
        builder = builder.elapsed_days(days);
    }
    if let Some(manager) = row.project_manager {
        builder = builder.manager(manager);
    }
    if let Some(point) = parse_location(&id, &row.latitude, &row.longitude, row.location, warnings)
    {
        builder = builder.location(point);
    }

    builder.build().map_err(|err| {
        DataQualityWarning::for_project(
            &id,
            WarningKind::InvalidValue,
            "record",
            format!("record excluded: {err}"),
        )
    })
}

/// Parses a reported status, mapping legacy vocabulary and defaulting to
/// on-track with a warning for unknown values.
fn parse_status(
    id: &str,
    raw: Option<&str>,
    warnings: &mut Vec<DataQualityWarning>,
) -> ProjectStatus {
    let Some(raw) = raw else {
        return ProjectStatus::OnTrack;
    };

    // Older exports carry a five-state vocabulary.
    match raw.trim().to_ascii_lowercase().as_str() {
        "minor issues" => return ProjectStatus::OnTrack,
        "delayed" => return ProjectStatus::Critical,
        _ => {}
    }

    match raw.parse::<ProjectStatus>() {
        Ok(status) => status,
        Err(_) => {
            warnings.push(DataQualityWarning::for_project(
                id,
                WarningKind::InvalidValue,
                "status",
                format!("unknown status '{raw}', assuming On Track"),
            ));
            ProjectStatus::OnTrack
        }
    }
}

/// Builds a geolocation when both coordinates are present and valid.
fn parse_location(
    id: &str,
    latitude: &Option<f64>,
    longitude: &Option<f64>,
    label: Option<String>,
    warnings: &mut Vec<DataQualityWarning>,
) -> Option<GeoPoint> {
    match (latitude, longitude) {
        (Some(lat), Some(lon)) => match GeoPoint::new(*lat, *lon) {
            Ok(point) => Some(match label {
                Some(label) => point.with_label(label),
                None => point,
            }),
            Err(err) => {
                warnings.push(DataQualityWarning::for_project(
                    id,
                    WarningKind::InvalidValue,
                    "location",
                    format!("location dropped: {err}"),
                ));
                None
            }
        },
        (None, None) => None,
        _ => {
            warnings.push(DataQualityWarning::for_project(
                id,
                WarningKind::MissingField,
                "location",
                "location dropped: latitude and longitude must both be present",
            ));
            None
        }
    }
}
