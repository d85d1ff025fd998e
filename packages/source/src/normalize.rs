//! Builds normalized [`IncidentRecord`]s from raw cell values.
//!
//! All derived fields are computed here, exactly once per record, so that
//! every downstream view sees the same labels.

use callcenter_incident_models::{IncidentRecord, Period, month_key};

use crate::parsing::parse_reported_at;
use crate::type_mapping::{classify, is_valid};

/// Normalizes one raw row into an [`IncidentRecord`].
///
/// `report_type` and `category` are stored as recorded; the timestamp is
/// parsed (coercing failures to `None`) and the month, category and
/// validity labels are derived from them.
#[must_use]
pub fn normalize_record(
    report_type: &str,
    category: &str,
    reported_at: &str,
    period: Period,
) -> IncidentRecord {
    let reported_at = parse_reported_at(reported_at);

    IncidentRecord {
        report_type: report_type.to_owned(),
        category: category.to_owned(),
        month: reported_at.as_ref().map(month_key),
        reported_at,
        period,
        big_category: classify(report_type, category),
        validity: is_valid(report_type),
    }
}
