//! Validation logic for campus point data
use crate::points::core::{Bounds, IdKey, Issue, IssueKind, RequiredField, coordinates};
use crate::points::errors::{Error, Result};
use crate::points::report::Report;
use crate::points::utils::sha256_hex;
use chrono::Utc;
use serde_json::{Map, Value};
use std::collections::HashSet;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

/// A point data file loaded into memory.
#[derive(Debug, Clone)]
pub struct Dataset {
    pub path: PathBuf,
    pub sha256: String,
    pub records: Vec<Value>,
}

fn describe(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

/// Read and parse a point data file. The top-level value must be an array.
pub fn load_dataset(file_path: &Path) -> Result<Dataset> {
    let bytes = std::fs::read(file_path).map_err(|e| match e.kind() {
        ErrorKind::NotFound => Error::file_not_found(file_path),
        _ => Error::Io(e),
    })?;
    tracing::debug!(path = %file_path.display(), bytes = bytes.len(), "read data file");

    let sha256 = sha256_hex(&bytes);
    let records = match serde_json::from_slice::<Value>(&bytes)? {
        Value::Array(records) => records,
        other => {
            return Err(Error::invalid_format(format!(
                "expected a top-level array of point records, found {}",
                describe(&other)
            )));
        }
    };
    tracing::debug!(records = records.len(), %sha256, "parsed data file");

    Ok(Dataset {
        path: file_path.to_path_buf(),
        sha256,
        records,
    })
}

fn check_point(
    index: usize,
    point: &Map<String, Value>,
    seen: &mut HashSet<IdKey>,
    issues: &mut Vec<Issue>,
) {
    for field in RequiredField::ALL {
        if !point.contains_key(field.as_str()) {
            issues.push(Issue::new(index, IssueKind::MissingField { field }));
        }
    }

    if let Some(id) = point.get(RequiredField::Id.as_str()) {
        if !seen.insert(IdKey::from(id)) {
            issues.push(Issue::new(index, IssueKind::DuplicateId { id: id.clone() }));
        }
    }

    for field in RequiredField::COORDINATES {
        if let Some(value) = point.get(field.as_str()) {
            if !value.is_number() {
                issues.push(Issue::new(index, IssueKind::NonNumericCoordinate { field }));
            }
        }
    }
}

/// Check every record in array order and collect all issues.
pub fn validate_records(records: &[Value]) -> Vec<Issue> {
    let mut seen = HashSet::new();
    let mut issues = Vec::new();

    for (index, record) in records.iter().enumerate() {
        match record.as_object() {
            Some(point) => check_point(index, point, &mut seen, &mut issues),
            None => issues.push(Issue::new(index, IssueKind::NotAnObject)),
        }
        tracing::trace!(index, issues = issues.len(), "checked record");
    }

    issues
}

/// Extent of all records whose three coordinates are numeric
pub fn bounds_of(records: &[Value]) -> Option<Bounds> {
    records
        .iter()
        .filter_map(Value::as_object)
        .filter_map(coordinates)
        .fold(None, |bounds: Option<Bounds>, point| match bounds {
            Some(mut b) => {
                b.include(point);
                Some(b)
            }
            None => Some(Bounds::from_point(point)),
        })
}

/// Validate a loaded dataset
pub fn validate_dataset(dataset: Dataset) -> Result<Report> {
    let issues = validate_records(&dataset.records);
    let bounds = bounds_of(&dataset.records);

    Report::builder()
        .source(dataset.path)
        .sha256(dataset.sha256)
        .checked_at(Utc::now())
        .records(dataset.records.len())
        .issues(issues)
        .bounds(bounds)
        .build()
        .map_err(|e| Error::Builder(e.to_string()))
}

/// Validate a campus point data file
pub fn validate_file(file_path: &Path) -> Result<Report> {
    let dataset = load_dataset(file_path)?;
    let report = validate_dataset(dataset)?;
    if !report.passed() {
        tracing::debug!(errors = report.error_count(), "validation found errors");
    }
    Ok(report)
}
