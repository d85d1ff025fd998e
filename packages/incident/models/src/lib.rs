#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions)]

//! Call center incident taxonomy types.
//!
//! This crate defines the coarse, policy-relevant category taxonomy, the
//! validity classes and the reporting periods used across the whole
//! dashboard. Every ingested incident carries these derived labels, and all
//! analytics group by them.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use strum_macros::{AsRefStr, Display, EnumString};

/// Yearly reporting batch an incident was ingested from.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    AsRefStr,
)]
pub enum Period {
    /// Incidents logged in the 2024 export
    #[serde(rename = "2024")]
    #[strum(serialize = "2024")]
    Y2024,
    /// Incidents logged in the 2025 export
    #[serde(rename = "2025")]
    #[strum(serialize = "2025")]
    Y2025,
}

impl Period {
    /// Returns the calendar year of this period.
    #[must_use]
    pub const fn year(self) -> i32 {
        match self {
            Self::Y2024 => 2024,
            Self::Y2025 => 2025,
        }
    }

    /// Creates a period from a calendar year.
    ///
    /// # Errors
    ///
    /// Returns an error if no reporting batch exists for the year.
    pub const fn from_year(year: i32) -> Result<Self, InvalidPeriodError> {
        match year {
            2024 => Ok(Self::Y2024),
            2025 => Ok(Self::Y2025),
            _ => Err(InvalidPeriodError { year }),
        }
    }

    /// Returns all variants of this enum.
    #[must_use]
    pub const fn all() -> &'static [Self] {
        &[Self::Y2024, Self::Y2025]
    }
}

/// Error returned when attempting to create a [`Period`] from a year that
/// has no reporting batch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InvalidPeriodError {
    /// The year that was provided.
    pub year: i32,
}

impl std::fmt::Display for InvalidPeriodError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "invalid period {}: expected 2024 or 2025", self.year)
    }
}

impl std::error::Error for InvalidPeriodError {}

/// Coarse incident categories.
///
/// Declaration order is the canonical order: it drives `Ord`, map
/// iteration order, and tie-breaking in every ranking.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    AsRefStr,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum BigCategory {
    /// Traffic accidents, broken traffic lights, congestion, signage
    TrafficIncident,
    /// Medical emergencies, mentally ill or at-risk persons
    Health,
    /// Street lighting, damaged roads, cabling, water utility, fallen trees,
    /// floods, poles, oil spills
    Infrastructure,
    /// Crime, security disturbances, illegal parking
    Security,
    /// Fires
    Fire,
    /// Administrative services, billboard permits, scholarships, drills
    PublicService,
    /// Prank calls
    Prank,
    /// Ghost calls (connected, nobody on the line)
    Ghost,
    /// Information requests
    Information,
    /// Anything no rule matched
    Other,
}

impl BigCategory {
    /// Returns a human-readable label for display.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::TrafficIncident => "Traffic Incident",
            Self::Health => "Health",
            Self::Infrastructure => "Infrastructure",
            Self::Security => "Security",
            Self::Fire => "Fire",
            Self::PublicService => "Public Service",
            Self::Prank => "Prank",
            Self::Ghost => "Ghost",
            Self::Information => "Information",
            Self::Other => "Other",
        }
    }

    /// Returns all variants of this enum in canonical order.
    #[must_use]
    pub const fn all() -> &'static [Self] {
        &[
            Self::TrafficIncident,
            Self::Health,
            Self::Infrastructure,
            Self::Security,
            Self::Fire,
            Self::PublicService,
            Self::Prank,
            Self::Ghost,
            Self::Information,
            Self::Other,
        ]
    }
}

/// Whether a call is genuine or a nuisance/non-actionable call.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    AsRefStr,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum Validity {
    /// A genuine call
    Valid,
    /// Prank, ghost or silent call
    Invalid,
}

impl Validity {
    /// Returns all variants of this enum.
    #[must_use]
    pub const fn all() -> &'static [Self] {
        &[Self::Valid, Self::Invalid]
    }
}

/// A single logged call center incident with its derived labels.
///
/// The derived fields (`month`, `big_category`, `validity`) are computed
/// once when the record is created during ingestion and never recomputed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IncidentRecord {
    /// Raw report type as recorded (e.g. "Prank", "Call").
    pub report_type: String,
    /// Raw category as recorded (e.g. "Laka Lantas Tunggal").
    pub category: String,
    /// When the call was logged. `None` when the source value is missing
    /// or unparseable.
    pub reported_at: Option<NaiveDateTime>,
    /// Reporting batch this record was ingested from.
    pub period: Period,
    /// `YYYY-MM` bucket of `reported_at`.
    pub month: Option<String>,
    /// Coarse category.
    pub big_category: BigCategory,
    /// Validity class.
    pub validity: Validity,
}

/// Formats a timestamp as its sortable `YYYY-MM` month key.
#[must_use]
pub fn month_key(at: &NaiveDateTime) -> String {
    at.format("%Y-%m").to_string()
}

/// The immutable record set produced once by ingestion.
///
/// Records are kept in ingestion order: batches in period order, rows in
/// file order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Snapshot {
    records: Vec<IncidentRecord>,
}

impl Snapshot {
    /// Wraps an already-normalized record set.
    #[must_use]
    pub const fn new(records: Vec<IncidentRecord>) -> Self {
        Self { records }
    }

    /// Returns every record in ingestion order.
    #[must_use]
    pub fn records(&self) -> &[IncidentRecord] {
        &self.records
    }

    /// Returns the number of records.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.records.len()
    }

    /// Returns `true` if the snapshot holds no records.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Returns the records of a single reporting batch.
    pub fn period(&self, period: Period) -> impl Iterator<Item = &IncidentRecord> {
        self.records.iter().filter(move |r| r.period == period)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn period_year_roundtrip() {
        for period in Period::all() {
            assert_eq!(Period::from_year(period.year()).unwrap(), *period);
        }
        assert!(Period::from_year(2023).is_err());
    }

    #[test]
    fn period_string_forms() {
        assert_eq!(Period::Y2024.to_string(), "2024");
        assert_eq!("2025".parse::<Period>().unwrap(), Period::Y2025);
    }

    #[test]
    fn category_all_is_canonical_order() {
        let mut sorted = BigCategory::all().to_vec();
        sorted.sort();
        assert_eq!(sorted, BigCategory::all());
    }

    #[test]
    fn category_string_roundtrip() {
        for cat in BigCategory::all() {
            assert_eq!(cat.as_ref().parse::<BigCategory>().unwrap(), *cat);
        }
        assert_eq!(BigCategory::PublicService.to_string(), "PUBLIC_SERVICE");
    }

    #[test]
    fn month_key_is_zero_padded() {
        let at = chrono::NaiveDate::from_ymd_opt(2024, 3, 9)
            .unwrap()
            .and_hms_opt(7, 5, 0)
            .unwrap();
        assert_eq!(month_key(&at), "2024-03");
    }
}
