//! Dataset registry. Loads all dataset definitions from embedded TOML configs.
//!
//! Each `.toml` file in `packages/source/datasets/` is baked into the binary
//! at compile time via [`include_str!`]. Adding a reporting period means
//! adding a TOML file here and a [`callcenter_incident_models::Period`]
//! variant.

use crate::dataset_def::{DatasetDefinition, parse_dataset_toml};

/// TOML configs embedded at compile time.
const DATASET_TOMLS: &[(&str, &str)] = &[
    (
        "callcenter_2024",
        include_str!("../datasets/callcenter_2024.toml"),
    ),
    (
        "callcenter_2025",
        include_str!("../datasets/callcenter_2025.toml"),
    ),
];

/// Returns all configured dataset definitions, parsed from embedded TOML,
/// ordered by period.
///
/// # Panics
///
/// Panics if any TOML config is malformed (the configs are embedded, so
/// this is caught by the tests below).
#[must_use]
pub fn all_datasets() -> Vec<DatasetDefinition> {
    let mut datasets: Vec<DatasetDefinition> = DATASET_TOMLS
        .iter()
        .map(|(name, toml)| {
            parse_dataset_toml(toml).unwrap_or_else(|e| panic!("Failed to parse {name}.toml: {e}"))
        })
        .collect();
    datasets.sort_by_key(|d| d.period);
    datasets
}

#[cfg(test)]
mod tests {
    use callcenter_incident_models::Period;

    use super::*;

    #[test]
    fn loads_all_datasets() {
        let datasets = all_datasets();
        assert_eq!(datasets.len(), DATASET_TOMLS.len());
    }

    #[test]
    fn one_dataset_per_period() {
        let periods: Vec<Period> = all_datasets().iter().map(|d| d.period).collect();
        assert_eq!(periods, Period::all());
    }

    #[test]
    fn all_datasets_have_required_fields() {
        for dataset in &all_datasets() {
            assert!(!dataset.id.is_empty(), "dataset id is empty");
            assert!(!dataset.file_name.is_empty(), "{}: no file name", dataset.id);
            assert!(
                !dataset.fields.report_type.is_empty(),
                "{}: no report_type headers",
                dataset.id
            );
            assert!(
                !dataset.fields.category.is_empty(),
                "{}: no category headers",
                dataset.id
            );
            assert!(
                !dataset.fields.reported_at.is_empty(),
                "{}: no reported_at headers",
                dataset.id
            );
        }
    }
}
