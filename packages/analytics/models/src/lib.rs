#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Dashboard filter and aggregate result types.
//!
//! Defines the [`IncidentFilter`] every dashboard view is evaluated
//! against, the plain result types of the aggregate queries, and the
//! per-view structures the presentation layer renders. All result types
//! serialize to chart-ready JSON.

use std::collections::{BTreeMap, BTreeSet};
use std::str::FromStr;

use callcenter_incident_models::{BigCategory, IncidentRecord, Period, Validity};
use serde::{Deserialize, Serialize};

/// Error returned when a filter list contains an unknown value.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown {axis} '{value}'")]
pub struct FilterParseError {
    /// Filter axis being parsed (`year`, `category` or `validity`).
    pub axis: &'static str,
    /// The offending token.
    pub value: String,
}

/// Explicit selection on each filter axis.
///
/// A record matches when its period, category and validity are all
/// selected. An empty set on any axis matches nothing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IncidentFilter {
    /// Selected reporting periods.
    pub years: BTreeSet<Period>,
    /// Selected coarse categories.
    pub categories: BTreeSet<BigCategory>,
    /// Selected validity classes.
    pub validities: BTreeSet<Validity>,
}

impl Default for IncidentFilter {
    fn default() -> Self {
        Self::all()
    }
}

impl IncidentFilter {
    /// The identity filter: every value selected on every axis.
    #[must_use]
    pub fn all() -> Self {
        Self {
            years: Period::all().iter().copied().collect(),
            categories: BigCategory::all().iter().copied().collect(),
            validities: Validity::all().iter().copied().collect(),
        }
    }

    /// Returns `true` if the record is selected on all three axes.
    #[must_use]
    pub fn matches(&self, record: &IncidentRecord) -> bool {
        self.years.contains(&record.period)
            && self.categories.contains(&record.big_category)
            && self.validities.contains(&record.validity)
    }

    /// Returns `true` if every reporting period is selected, which enables
    /// the period comparison views.
    #[must_use]
    pub fn selects_all_periods(&self) -> bool {
        Period::all().iter().all(|p| self.years.contains(p))
    }

    /// Builds a filter from comma-separated lists.
    ///
    /// `None` selects every value on that axis; `Some("")` selects none.
    /// Category and validity names are matched case-insensitively against
    /// their `SCREAMING_SNAKE_CASE` names.
    ///
    /// # Errors
    ///
    /// Returns [`FilterParseError`] for the first unknown token.
    pub fn from_lists(
        years: Option<&str>,
        categories: Option<&str>,
        validities: Option<&str>,
    ) -> Result<Self, FilterParseError> {
        let all = Self::all();
        Ok(Self {
            years: years.map_or(Ok(all.years), |s| parse_list(s, "year", str::to_owned))?,
            categories: categories.map_or(Ok(all.categories), |s| {
                parse_list(s, "category", normalize_enum_token)
            })?,
            validities: validities.map_or(Ok(all.validities), |s| {
                parse_list(s, "validity", normalize_enum_token)
            })?,
        })
    }
}

fn normalize_enum_token(token: &str) -> String {
    token.to_uppercase().replace(['-', ' '], "_")
}

fn parse_list<T: FromStr + Ord>(
    s: &str,
    axis: &'static str,
    normalize: impl Fn(&str) -> String,
) -> Result<BTreeSet<T>, FilterParseError> {
    s.split(',')
        .map(str::trim)
        .filter(|token| !token.is_empty())
        .map(|token| {
            normalize(token).parse().map_err(|_| FilterParseError {
                axis,
                value: token.to_owned(),
            })
        })
        .collect()
}

// ── Aggregate results ───────────────────────────────────────────────────

/// Count of incidents in a single category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryCount {
    /// Coarse category.
    pub category: BigCategory,
    /// Number of incidents.
    pub count: u64,
}

/// Count of incidents sharing a free-text label (e.g. a raw report type).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LabelCount {
    /// Label as recorded.
    pub label: String,
    /// Number of incidents.
    pub count: u64,
}

/// Incidents in one month of one reporting period.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MonthlyCount {
    /// Month key (`YYYY-MM`).
    pub month: String,
    /// Reporting period.
    pub period: Period,
    /// Number of incidents.
    pub count: u64,
}

/// Incidents in one month of one category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryMonthlyCount {
    /// Month key (`YYYY-MM`).
    pub month: String,
    /// Coarse category.
    pub category: BigCategory,
    /// Number of incidents.
    pub count: u64,
}

/// Dense category × month count matrix (rows are categories).
///
/// Every (category, month) pair inside the matrix has a cell, zero when no
/// incident fell in it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MonthCategoryMatrix {
    /// Column labels, ascending.
    pub months: Vec<String>,
    /// Row labels, canonical order.
    pub categories: Vec<BigCategory>,
    /// `counts[row][column]`.
    pub counts: Vec<Vec<u64>>,
}

impl MonthCategoryMatrix {
    /// Returns the count for a (category, month) pair, `0` when the pair is
    /// not in the matrix.
    #[must_use]
    pub fn get(&self, category: BigCategory, month: &str) -> u64 {
        let Some(row) = self.categories.iter().position(|c| *c == category) else {
            return 0;
        };
        let Some(column) = self.months.iter().position(|m| m == month) else {
            return 0;
        };
        self.counts[row][column]
    }
}

/// Change in one category's count between two periods.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryDelta {
    /// Coarse category.
    pub category: BigCategory,
    /// Count in the earlier period.
    pub before: u64,
    /// Count in the later period.
    pub after: u64,
    /// `after - before`.
    pub delta: i64,
    /// Delta as a percentage of `before` (`0` when `before` is zero).
    pub percent_change: f64,
}

/// Side-by-side category counts for the two reporting periods.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PeriodCategoryComparison {
    /// Coarse category.
    pub category: BigCategory,
    /// Count in the earlier period.
    pub period_a_count: u64,
    /// Count in the later period.
    pub period_b_count: u64,
    /// Sum of both periods.
    pub total: u64,
}

// ── Dashboard views ─────────────────────────────────────────────────────

/// Key indicators for the filtered subset.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OverviewView {
    /// Filtered incident count.
    pub total: u64,
    /// Filtered valid incident count.
    pub valid_count: u64,
    /// Valid share of the filtered subset.
    pub valid_percent: f64,
    /// Growth of the full later batch over the full earlier batch, only
    /// when both periods are selected.
    pub growth_percent: Option<f64>,
    /// Absolute change between the full batches, only when both periods
    /// are selected.
    pub growth_count: Option<i64>,
    /// Most frequent category, `None` when there is no data.
    pub top_category: Option<BigCategory>,
    /// Filtered counts per period.
    pub by_period: BTreeMap<Period, u64>,
    /// Filtered counts per validity class.
    pub by_validity: BTreeMap<Validity, u64>,
}

/// Category and report type distributions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DistributionView {
    /// Top categories of the filtered subset.
    pub top_categories: Vec<CategoryCount>,
    /// Full-batch comparison of the top categories, only when both periods
    /// are selected.
    pub period_comparison: Option<Vec<PeriodCategoryComparison>>,
    /// Most frequent raw report types of the filtered subset.
    pub top_report_types: Vec<LabelCount>,
}

/// Time-based views.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrendsView {
    /// Filtered counts per (month, period).
    pub monthly: Vec<MonthlyCount>,
    /// Categories followed in `category_series` (top of the whole
    /// snapshot).
    pub tracked_categories: Vec<BigCategory>,
    /// Filtered counts per (month, tracked category).
    pub category_series: Vec<CategoryMonthlyCount>,
    /// Filtered category × month heatmap.
    pub heatmap: MonthCategoryMatrix,
}

/// Validity counts of one full reporting batch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PeriodValidity {
    /// Reporting period.
    pub period: Period,
    /// Counts per validity class.
    pub counts: BTreeMap<Validity, u64>,
}

/// Validity breakdown.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidityView {
    /// Validity split of every full reporting batch.
    pub by_period: Vec<PeriodValidity>,
    /// Raw report types of the invalid filtered incidents.
    pub invalid_by_report_type: Vec<LabelCount>,
    /// Invalid filtered incident count.
    pub invalid_total: u64,
    /// Invalid share of the filtered subset.
    pub invalid_percent: f64,
    /// Change in invalid calls between the full batches, only when both
    /// periods are selected.
    pub invalid_change: Option<i64>,
}

/// Policy recommendation for a leading category.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Recommendation {
    /// 1-based rank.
    pub rank: usize,
    /// Coarse category.
    pub category: BigCategory,
    /// Incidents in the whole snapshot.
    pub count: u64,
    /// Share of the whole snapshot.
    pub percent: f64,
    /// Recommended action.
    pub text: String,
}

/// Year-over-year changes and recommendations.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InsightsView {
    /// Largest increases, only when both periods are selected.
    pub top_increasing: Option<Vec<CategoryDelta>>,
    /// Largest decreases, only when both periods are selected.
    pub top_decreasing: Option<Vec<CategoryDelta>>,
    /// Recommendations for the leading categories of the whole snapshot.
    pub recommendations: Vec<Recommendation>,
}

/// Every view of the dashboard for one filter.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardReport {
    /// Filter the views were evaluated against.
    pub filter: IncidentFilter,
    /// Key indicators.
    pub overview: OverviewView,
    /// Distributions.
    pub distribution: DistributionView,
    /// Time trends.
    pub trends: TrendsView,
    /// Validity breakdown.
    pub validity: ValidityView,
    /// Insights and recommendations.
    pub insights: InsightsView,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn absent_lists_select_everything() {
        let filter = IncidentFilter::from_lists(None, None, None).unwrap();
        assert_eq!(filter, IncidentFilter::all());
        assert!(filter.selects_all_periods());
    }

    #[test]
    fn empty_list_selects_nothing() {
        let filter = IncidentFilter::from_lists(None, Some(""), None).unwrap();
        assert!(filter.categories.is_empty());
        assert_eq!(filter.years.len(), 2);
    }

    #[test]
    fn parses_lists_leniently() {
        let filter = IncidentFilter::from_lists(
            Some("2024"),
            Some("traffic-incident, PUBLIC_SERVICE,fire"),
            Some("valid"),
        )
        .unwrap();
        assert_eq!(filter.years, BTreeSet::from([Period::Y2024]));
        assert_eq!(
            filter.categories,
            BTreeSet::from([
                BigCategory::TrafficIncident,
                BigCategory::PublicService,
                BigCategory::Fire
            ])
        );
        assert_eq!(filter.validities, BTreeSet::from([Validity::Valid]));
        assert!(!filter.selects_all_periods());
    }

    #[test]
    fn rejects_unknown_tokens() {
        let err = IncidentFilter::from_lists(Some("2023"), None, None).unwrap_err();
        assert_eq!(err.axis, "year");
        assert_eq!(err.value, "2023");

        let err = IncidentFilter::from_lists(None, Some("FLOOD"), None).unwrap_err();
        assert_eq!(err.axis, "category");
    }

    #[test]
    fn matrix_get_defaults_to_zero() {
        let matrix = MonthCategoryMatrix {
            months: vec!["2024-01".to_string(), "2024-03".to_string()],
            categories: vec![BigCategory::Fire],
            counts: vec![vec![0, 4]],
        };
        assert_eq!(matrix.get(BigCategory::Fire, "2024-03"), 4);
        assert_eq!(matrix.get(BigCategory::Fire, "2024-01"), 0);
        assert_eq!(matrix.get(BigCategory::Fire, "2024-02"), 0);
        assert_eq!(matrix.get(BigCategory::Health, "2024-03"), 0);
    }

    #[test]
    fn serializes_enums_as_names() {
        let json = serde_json::to_value(CategoryCount {
            category: BigCategory::TrafficIncident,
            count: 3,
        })
        .unwrap();
        assert_eq!(
            json,
            serde_json::json!({"category": "TRAFFIC_INCIDENT", "count": 3})
        );
    }
}
