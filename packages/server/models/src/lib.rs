#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! API request and response types for the call center dashboard server.
//!
//! These types are serialized to JSON for the REST API. They are separate
//! from the ingested record type to allow independent evolution of the API
//! contract.

use callcenter_analytics_models::{FilterParseError, IncidentFilter};
use callcenter_incident_models::{BigCategory, IncidentRecord, Period, Validity};
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// Default page size of the incidents endpoint.
pub const DEFAULT_INCIDENT_LIMIT: u32 = 100;

/// Filter query parameters accepted by every dashboard endpoint.
///
/// Each field is a comma-separated list. An absent field selects every
/// value on its axis; a present but empty one selects none.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardQueryParams {
    /// Reporting years, e.g. `2024,2025`.
    pub years: Option<String>,
    /// Category names, e.g. `TRAFFIC_INCIDENT,FIRE`.
    pub categories: Option<String>,
    /// Validity classes, e.g. `VALID`.
    pub validities: Option<String>,
}

impl DashboardQueryParams {
    /// Builds the [`IncidentFilter`] these parameters describe.
    ///
    /// # Errors
    ///
    /// Returns [`FilterParseError`] if a list contains an unknown value.
    pub fn to_filter(&self) -> Result<IncidentFilter, FilterParseError> {
        IncidentFilter::from_lists(
            self.years.as_deref(),
            self.categories.as_deref(),
            self.validities.as_deref(),
        )
    }
}

/// Query parameters for the incidents endpoint.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IncidentsQueryParams {
    /// Reporting years.
    pub years: Option<String>,
    /// Category names.
    pub categories: Option<String>,
    /// Validity classes.
    pub validities: Option<String>,
    /// Maximum number of results.
    pub limit: Option<u32>,
    /// Offset for pagination.
    pub offset: Option<u32>,
}

impl From<&IncidentsQueryParams> for DashboardQueryParams {
    fn from(p: &IncidentsQueryParams) -> Self {
        Self {
            years: p.years.clone(),
            categories: p.categories.clone(),
            validities: p.validities.clone(),
        }
    }
}

/// An incident as returned by the API.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiIncident {
    /// Reporting period.
    pub period: Period,
    /// When the call was logged.
    pub reported_at: Option<NaiveDateTime>,
    /// `YYYY-MM` bucket.
    pub month: Option<String>,
    /// Raw report type.
    pub report_type: String,
    /// Raw category.
    pub category: String,
    /// Coarse category.
    pub big_category: BigCategory,
    /// Validity class.
    pub validity: Validity,
}

impl From<&IncidentRecord> for ApiIncident {
    fn from(record: &IncidentRecord) -> Self {
        Self {
            period: record.period,
            reported_at: record.reported_at,
            month: record.month.clone(),
            report_type: record.report_type.clone(),
            category: record.category.clone(),
            big_category: record.big_category,
            validity: record.validity,
        }
    }
}

/// A page of filtered incidents.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiIncidentPage {
    /// Incidents on this page, in snapshot order.
    pub incidents: Vec<ApiIncident>,
    /// Number of incidents matching the filter.
    pub total_count: u64,
    /// Whether more incidents are available beyond this page.
    pub has_more: bool,
}

/// A category entry of the taxonomy endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiCategory {
    /// Category name.
    pub name: BigCategory,
    /// Human-readable label.
    pub label: String,
}

/// Health check response.
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiHealth {
    /// Whether the service is healthy.
    pub healthy: bool,
    /// Service version.
    pub version: String,
    /// Number of records in the loaded snapshot.
    pub record_count: u64,
}

/// Error body returned with non-2xx responses.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiError {
    /// What went wrong.
    pub error: String,
}

impl ApiError {
    /// Creates an error body from any displayable error.
    pub fn new(error: impl std::fmt::Display) -> Self {
        Self {
            error: error.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn absent_params_select_everything() {
        let filter = DashboardQueryParams::default().to_filter().unwrap();
        assert_eq!(filter, IncidentFilter::all());
    }

    #[test]
    fn incidents_params_carry_filter() {
        let params = IncidentsQueryParams {
            years: Some("2025".to_string()),
            validities: Some(String::new()),
            limit: Some(5),
            ..IncidentsQueryParams::default()
        };
        let filter = DashboardQueryParams::from(&params).to_filter().unwrap();
        assert_eq!(filter.years.len(), 1);
        assert!(filter.validities.is_empty());
        assert_eq!(filter.categories.len(), BigCategory::all().len());
    }

    #[test]
    fn incident_serializes_camel_case() {
        let record = IncidentRecord {
            report_type: "Call".to_string(),
            category: "Kebakaran".to_string(),
            reported_at: None,
            period: Period::Y2024,
            month: None,
            big_category: BigCategory::Fire,
            validity: Validity::Valid,
        };
        let json = serde_json::to_value(ApiIncident::from(&record)).unwrap();
        assert_eq!(json["bigCategory"], "FIRE");
        assert_eq!(json["period"], "2024");
        assert_eq!(json["reportType"], "Call");
        assert!(json["reportedAt"].is_null());
    }
}
