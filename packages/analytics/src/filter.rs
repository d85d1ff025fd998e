//! Filter application over the snapshot.

use callcenter_analytics_models::IncidentFilter;
use callcenter_incident_models::IncidentRecord;

/// Returns the records selected by `filter`, in their original order.
///
/// The result borrows from `records`; nothing is copied or mutated.
#[must_use]
pub fn apply_filter<'a>(
    records: &'a [IncidentRecord],
    filter: &IncidentFilter,
) -> Vec<&'a IncidentRecord> {
    records.iter().filter(|r| filter.matches(r)).collect()
}
