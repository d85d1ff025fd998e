//! Config-driven dataset definition.
//!
//! [`DatasetDefinition`] captures everything unique about one period's
//! incident export: where the file lives, how it is delimited, and which
//! header names hold the fields the dashboard needs. A single generic
//! loader handles every dataset.

use std::path::{Path, PathBuf};

use callcenter_incident_models::Period;
use serde::Deserialize;

/// A config-driven incident export definition.
///
/// Loaded from TOML files embedded at compile time.
#[derive(Debug, Clone, Deserialize)]
pub struct DatasetDefinition {
    /// Unique identifier (e.g., `"callcenter_2024"`).
    pub id: String,
    /// Human-readable name.
    pub name: String,
    /// Reporting batch every row of this dataset belongs to.
    pub period: Period,
    /// File name, resolved relative to the data directory.
    pub file_name: String,
    /// Field delimiter (default: comma).
    #[serde(default)]
    pub delimiter: Option<String>,
    /// Header name mappings for normalization.
    pub fields: FieldMapping,
}

/// Accepted header names for each field, tried in order.
///
/// Matching ignores case and surrounding whitespace on both sides.
#[derive(Debug, Clone, Deserialize)]
pub struct FieldMapping {
    /// Header names for the report type.
    pub report_type: Vec<String>,
    /// Header names for the category.
    pub category: Vec<String>,
    /// Header names for the reported-at timestamp.
    pub reported_at: Vec<String>,
}

impl DatasetDefinition {
    /// Returns the identifier of this dataset.
    #[must_use]
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Returns the human-readable name of this dataset.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Resolves the input file path inside `data_dir`.
    #[must_use]
    pub fn path_in(&self, data_dir: &Path) -> PathBuf {
        data_dir.join(&self.file_name)
    }

    /// Returns the delimiter byte, defaulting to a comma.
    #[must_use]
    pub fn delimiter_byte(&self) -> u8 {
        self.delimiter
            .as_deref()
            .and_then(|d| d.as_bytes().first().copied())
            .unwrap_or(b',')
    }
}

/// Parses a TOML string into a [`DatasetDefinition`].
///
/// # Errors
///
/// Returns an error string if the TOML is malformed or missing required
/// fields.
pub fn parse_dataset_toml(toml_str: &str) -> Result<DatasetDefinition, String> {
    toml::de::from_str(toml_str).map_err(|e| e.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_minimal_toml() {
        let def = parse_dataset_toml(
            r#"
            id = "test"
            name = "Test export"
            period = "2025"
            file_name = "test.csv"

            [fields]
            report_type = ["tipe laporan"]
            category = ["kategori"]
            reported_at = ["waktu lapor", "waktu"]
            "#,
        )
        .unwrap();

        assert_eq!(def.id(), "test");
        assert_eq!(def.period, Period::Y2025);
        assert_eq!(def.delimiter_byte(), b',');
        assert_eq!(def.fields.reported_at.len(), 2);
        assert_eq!(
            def.path_in(Path::new("data")),
            Path::new("data").join("test.csv")
        );
    }

    #[test]
    fn parses_custom_delimiter() {
        let def = parse_dataset_toml(
            r#"
            id = "semi"
            name = "Semicolon export"
            period = "2024"
            file_name = "semi.csv"
            delimiter = ";"

            [fields]
            report_type = ["type"]
            category = ["category"]
            reported_at = ["time"]
            "#,
        )
        .unwrap();

        assert_eq!(def.delimiter_byte(), b';');
    }

    #[test]
    fn rejects_unknown_period() {
        let result = parse_dataset_toml(
            r#"
            id = "old"
            name = "Old export"
            period = "2019"
            file_name = "old.csv"

            [fields]
            report_type = ["type"]
            category = ["category"]
            reported_at = ["time"]
            "#,
        );
        assert!(result.is_err());
    }
}
