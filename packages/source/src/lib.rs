#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions)]

//! Call center incident ingestion and normalization.
//!
//! Each reporting period is described by a [`DatasetDefinition`]. The
//! loader reads every configured export, normalizes headers and
//! timestamps, classifies each row, and returns one immutable
//! [`Snapshot`] for the whole session.

pub mod csv_file;
pub mod dataset_def;
pub mod normalize;
pub mod parsing;
pub mod progress;
pub mod registry;
pub mod type_mapping;

use std::collections::BTreeSet;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use callcenter_incident_models::Snapshot;

pub use dataset_def::DatasetDefinition;
use progress::ProgressCallback;

/// Data directory used when none is configured.
pub const DEFAULT_DATA_DIR: &str = "data";

/// Environment variable overriding the data directory.
pub const DATA_DIR_ENV: &str = "CALLCENTER_DATA_DIR";

/// Errors that can occur while loading the incident snapshot.
#[derive(Debug, thiserror::Error)]
pub enum SourceError {
    /// An input export does not exist.
    #[error(
        "Input file for '{dataset}' not found at {}. Place the CSV exports in the data \
         directory (set --data-dir or CALLCENTER_DATA_DIR) using the file names listed by \
         `callcenter datasets`",
        .path.display()
    )]
    MissingInput {
        /// Dataset whose file is missing.
        dataset: String,
        /// Path that was checked.
        path: PathBuf,
    },

    /// None of a field's header aliases was present.
    #[error("Dataset '{dataset}' has no column for field '{field}'")]
    MissingColumn {
        /// Dataset being read.
        dataset: String,
        /// Field that could not be resolved.
        field: &'static str,
    },

    /// CSV parsing failed.
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// I/O error (file read).
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Dataset configuration is inconsistent.
    #[error("Configuration error: {message}")]
    Config {
        /// Description of what went wrong.
        message: String,
    },
}

impl SourceError {
    /// Returns `true` for the "missing input" failure class; every other
    /// variant is an "other failure".
    #[must_use]
    pub const fn is_missing_input(&self) -> bool {
        matches!(self, Self::MissingInput { .. })
    }
}

/// Resolves the data directory from an explicit value, then
/// [`DATA_DIR_ENV`], then [`DEFAULT_DATA_DIR`].
#[must_use]
pub fn resolve_data_dir(explicit: Option<&Path>) -> PathBuf {
    explicit.map_or_else(
        || {
            std::env::var(DATA_DIR_ENV)
                .map_or_else(|_| PathBuf::from(DEFAULT_DATA_DIR), PathBuf::from)
        },
        Path::to_path_buf,
    )
}

/// Loads every dataset in `datasets` from `data_dir` into one snapshot.
///
/// Datasets are read in period order so that the snapshot keeps batches in
/// period order and rows in file order.
///
/// # Errors
///
/// Returns [`SourceError::Config`] if two datasets share a period, or the
/// first error encountered while reading a dataset.
pub fn load_snapshot(
    datasets: &[DatasetDefinition],
    data_dir: &Path,
    progress: &Arc<dyn ProgressCallback>,
) -> Result<Arc<Snapshot>, SourceError> {
    let mut seen = BTreeSet::new();
    for dataset in datasets {
        if !seen.insert(dataset.period) {
            return Err(SourceError::Config {
                message: format!(
                    "more than one dataset configured for period {} (duplicate: '{}')",
                    dataset.period, dataset.id
                ),
            });
        }
    }

    let mut ordered: Vec<&DatasetDefinition> = datasets.iter().collect();
    ordered.sort_by_key(|d| d.period);

    progress.set_total(ordered.len() as u64);

    let mut records = Vec::new();
    for dataset in ordered {
        progress.set_message(format!("Loading {}", dataset.name()));
        records.extend(csv_file::read_dataset(dataset, data_dir)?);
        progress.inc(1);
    }

    log::info!(
        "Loaded snapshot: {} records from {} dataset(s)",
        records.len(),
        datasets.len()
    );
    progress.finish(format!("Loaded {} records", records.len()));

    Ok(Arc::new(Snapshot::new(records)))
}

#[cfg(test)]
mod tests {
    use callcenter_incident_models::{BigCategory, Period};

    use super::*;
    use crate::dataset_def::parse_dataset_toml;
    use crate::progress::null_progress;

    fn dataset(id: &str, period: &str, file_name: &str) -> DatasetDefinition {
        parse_dataset_toml(&format!(
            r#"
            id = "{id}"
            name = "{id}"
            period = "{period}"
            file_name = "{file_name}"

            [fields]
            report_type = ["tipe laporan"]
            category = ["kategori"]
            reported_at = ["waktu lapor"]
            "#
        ))
        .unwrap()
    }

    fn fixture_dir(name: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!("callcenter_source_{name}"));
        std::fs::create_dir_all(&dir).unwrap();
        dir
    }

    #[test]
    fn loads_datasets_in_period_order() {
        let dir = fixture_dir("period_order");
        std::fs::write(
            dir.join("a.csv"),
            "tipe laporan,kategori,waktu lapor\nCall,Kebakaran,2025-01-02 00:00:00\n",
        )
        .unwrap();
        std::fs::write(
            dir.join("b.csv"),
            "tipe laporan,kategori,waktu lapor\nCall,Laka Lantas,2024-06-01 00:00:00\nPrank,-,\n",
        )
        .unwrap();

        // Deliberately listed out of order.
        let datasets = [dataset("d25", "2025", "a.csv"), dataset("d24", "2024", "b.csv")];
        let snapshot = load_snapshot(&datasets, &dir, &null_progress()).unwrap();

        assert_eq!(snapshot.len(), 3);
        let periods: Vec<Period> = snapshot.records().iter().map(|r| r.period).collect();
        assert_eq!(periods, [Period::Y2024, Period::Y2024, Period::Y2025]);
        assert_eq!(snapshot.records()[1].big_category, BigCategory::Prank);
        assert_eq!(snapshot.period(Period::Y2025).count(), 1);
    }

    #[test]
    fn duplicate_period_is_config_error() {
        let dir = fixture_dir("duplicate_period");
        let datasets = [dataset("a", "2024", "a.csv"), dataset("b", "2024", "b.csv")];
        let err = load_snapshot(&datasets, &dir, &null_progress()).unwrap_err();
        assert!(matches!(err, SourceError::Config { .. }));
        assert!(!err.is_missing_input());
    }

    #[test]
    fn missing_file_halts_load() {
        let dir = fixture_dir("missing_input");
        let datasets = [dataset("absent", "2024", "does-not-exist.csv")];
        let err = load_snapshot(&datasets, &dir, &null_progress()).unwrap_err();
        assert!(err.is_missing_input());
        assert!(err.to_string().contains("does-not-exist.csv"));
    }

    #[test]
    fn explicit_data_dir_wins() {
        assert_eq!(
            resolve_data_dir(Some(Path::new("/srv/exports"))),
            PathBuf::from("/srv/exports")
        );
    }
}
