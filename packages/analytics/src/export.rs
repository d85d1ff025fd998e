//! CSV export of the filtered subset.

use std::io::Write;

use callcenter_incident_models::IncidentRecord;
use serde::Serialize;

use crate::queries::count_by_category;

/// Error type for CSV exports.
#[derive(Debug, thiserror::Error)]
pub enum ExportError {
    /// Writing a CSV row failed.
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// Flushing the output failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// An in-memory export was not valid UTF-8.
    #[error("UTF-8 error: {0}")]
    Utf8(#[from] std::string::FromUtf8Error),
}

#[derive(Serialize)]
struct RecordRow<'a> {
    period: &'a str,
    reported_at: String,
    month: &'a str,
    report_type: &'a str,
    category: &'a str,
    big_category: &'a str,
    validity: &'a str,
}

#[derive(Serialize)]
struct SummaryRow<'a> {
    big_category: &'a str,
    count: u64,
}

/// Writes one row per record, in iteration order, after a header row.
///
/// Returns the number of records written.
///
/// # Errors
///
/// Returns [`ExportError`] if serializing or writing a row fails.
pub fn export_records_csv<'a, W: Write>(
    records: impl IntoIterator<Item = &'a IncidentRecord>,
    writer: W,
) -> Result<usize, ExportError> {
    let mut csv_writer = csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(writer);
    csv_writer.write_record([
        "period",
        "reported_at",
        "month",
        "report_type",
        "category",
        "big_category",
        "validity",
    ])?;

    let mut written = 0;
    for record in records {
        csv_writer.serialize(RecordRow {
            period: record.period.as_ref(),
            reported_at: record
                .reported_at
                .map(|at| at.format("%Y-%m-%d %H:%M:%S").to_string())
                .unwrap_or_default(),
            month: record.month.as_deref().unwrap_or_default(),
            report_type: &record.report_type,
            category: &record.category,
            big_category: record.big_category.as_ref(),
            validity: record.validity.as_ref(),
        })?;
        written += 1;
    }

    csv_writer.flush()?;
    log::debug!("Exported {written} records");
    Ok(written)
}

/// Writes the per-category counts of the records in canonical category
/// order. Categories without records are omitted.
///
/// # Errors
///
/// Returns [`ExportError`] if serializing or writing a row fails.
pub fn export_category_summary_csv<'a, W: Write>(
    records: impl IntoIterator<Item = &'a IncidentRecord>,
    writer: W,
) -> Result<(), ExportError> {
    let mut csv_writer = csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(writer);
    csv_writer.write_record(["big_category", "count"])?;

    for (category, count) in count_by_category(records) {
        csv_writer.serialize(SummaryRow {
            big_category: category.as_ref(),
            count,
        })?;
    }

    csv_writer.flush()?;
    Ok(())
}

/// Renders [`export_records_csv`] into a string.
///
/// # Errors
///
/// Returns [`ExportError`] if the export fails.
pub fn records_csv_string<'a>(
    records: impl IntoIterator<Item = &'a IncidentRecord>,
) -> Result<String, ExportError> {
    let mut buf = Vec::new();
    export_records_csv(records, &mut buf)?;
    Ok(String::from_utf8(buf)?)
}

/// Renders [`export_category_summary_csv`] into a string.
///
/// # Errors
///
/// Returns [`ExportError`] if the export fails.
pub fn category_summary_csv_string<'a>(
    records: impl IntoIterator<Item = &'a IncidentRecord>,
) -> Result<String, ExportError> {
    let mut buf = Vec::new();
    export_category_summary_csv(records, &mut buf)?;
    Ok(String::from_utf8(buf)?)
}

#[cfg(test)]
mod tests {
    use callcenter_incident_models::Period;
    use callcenter_source::normalize::normalize_record;

    use super::*;

    #[test]
    fn records_export_has_header_and_rows() {
        let records = [
            normalize_record("Call", "Laka Lantas", "2024-01-05 10:30:00", Period::Y2024),
            normalize_record("Prank", "Lain-lain", "rusak", Period::Y2024),
        ];

        let csv = records_csv_string(&records).unwrap();
        let lines: Vec<&str> = csv.lines().collect();
        assert_eq!(
            lines,
            [
                "period,reported_at,month,report_type,category,big_category,validity",
                "2024,2024-01-05 10:30:00,2024-01,Call,Laka Lantas,TRAFFIC_INCIDENT,VALID",
                "2024,,,Prank,Lain-lain,PRANK,INVALID",
            ]
        );
    }

    #[test]
    fn fields_with_delimiters_are_quoted() {
        let records = [normalize_record(
            "Call",
            "Pohon Tumbang, Jalan Utama",
            "",
            Period::Y2025,
        )];
        let csv = records_csv_string(&records).unwrap();
        assert!(csv.contains("\"Pohon Tumbang, Jalan Utama\""));
    }

    #[test]
    fn summary_export_is_canonical() {
        let records = [
            normalize_record("Call", "Kebakaran", "", Period::Y2024),
            normalize_record("Call", "Laka Lantas", "", Period::Y2024),
            normalize_record("Call", "Kebakaran", "", Period::Y2025),
        ];
        let csv = category_summary_csv_string(&records).unwrap();
        assert_eq!(
            csv.lines().collect::<Vec<_>>(),
            ["big_category,count", "TRAFFIC_INCIDENT,1", "FIRE,2"]
        );
    }

    #[test]
    fn empty_export_is_header_only() {
        let csv = records_csv_string(std::iter::empty()).unwrap();
        assert_eq!(csv.lines().count(), 1);
        assert_eq!(
            category_summary_csv_string(std::iter::empty()).unwrap(),
            "big_category,count\n"
        );
    }
}
