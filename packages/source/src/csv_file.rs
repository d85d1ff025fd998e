//! CSV incident export reader.
//!
//! Parses one period's export, resolves the configured header aliases
//! (case-insensitive, whitespace-trimmed) and normalizes every row into an
//! [`IncidentRecord`] tagged with the dataset's period.

use std::io::Read;
use std::path::Path;

use callcenter_incident_models::IncidentRecord;

use crate::SourceError;
use crate::dataset_def::DatasetDefinition;
use crate::normalize::normalize_record;

/// Column positions of the fields the dashboard needs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct ColumnIndex {
    report_type: usize,
    category: usize,
    reported_at: usize,
}

/// Normalizes a header name for comparison.
fn normalize_header(header: &str) -> String {
    header.trim().to_lowercase()
}

/// Finds the first alias present in `headers`.
fn find_column(
    headers: &[String],
    aliases: &[String],
    dataset: &str,
    field: &'static str,
) -> Result<usize, SourceError> {
    aliases
        .iter()
        .map(|alias| normalize_header(alias))
        .find_map(|alias| headers.iter().position(|h| *h == alias))
        .ok_or_else(|| SourceError::MissingColumn {
            dataset: dataset.to_owned(),
            field,
        })
}

fn resolve_columns(
    definition: &DatasetDefinition,
    headers: &csv::StringRecord,
) -> Result<ColumnIndex, SourceError> {
    let headers: Vec<String> = headers.iter().map(normalize_header).collect();
    let fields = &definition.fields;

    Ok(ColumnIndex {
        report_type: find_column(&headers, &fields.report_type, &definition.id, "report_type")?,
        category: find_column(&headers, &fields.category, &definition.id, "category")?,
        reported_at: find_column(&headers, &fields.reported_at, &definition.id, "reported_at")?,
    })
}

/// Reads and normalizes the export for `definition` from any reader.
///
/// # Errors
///
/// Returns [`SourceError`] if the CSV is malformed or a required column is
/// missing.
pub fn read_records<R: Read>(
    definition: &DatasetDefinition,
    reader: R,
) -> Result<Vec<IncidentRecord>, SourceError> {
    let mut reader = csv::ReaderBuilder::new()
        .delimiter(definition.delimiter_byte())
        .flexible(true)
        .from_reader(reader);

    let columns = resolve_columns(definition, reader.headers()?)?;

    let mut records = Vec::new();
    for result in reader.records() {
        let row = result?;
        records.push(normalize_record(
            row.get(columns.report_type).unwrap_or(""),
            row.get(columns.category).unwrap_or(""),
            row.get(columns.reported_at).unwrap_or(""),
            definition.period,
        ));
    }

    let unparsed = records.iter().filter(|r| r.reported_at.is_none()).count();
    if unparsed > 0 {
        log::warn!(
            "[{}] {unparsed} of {} rows have a missing or unparseable reported-at time",
            definition.id,
            records.len()
        );
    }

    Ok(records)
}

/// Reads and normalizes the export for `definition` from `data_dir`.
///
/// # Errors
///
/// Returns [`SourceError::MissingInput`] if the file does not exist, or any
/// error from [`read_records`].
pub fn read_dataset(
    definition: &DatasetDefinition,
    data_dir: &Path,
) -> Result<Vec<IncidentRecord>, SourceError> {
    let path = definition.path_in(data_dir);

    if !path.is_file() {
        return Err(SourceError::MissingInput {
            dataset: definition.id.clone(),
            path,
        });
    }

    log::info!("[{}] Reading {}", definition.id, path.display());
    let file = std::fs::File::open(&path)?;
    let records = read_records(definition, file)?;
    log::info!("[{}] Parsed {} records", definition.id, records.len());

    Ok(records)
}
