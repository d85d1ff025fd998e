//! Dashboard view builders.
//!
//! Each view is evaluated against the filtered subset of the snapshot.
//! Period comparisons always read the full 2024 and 2025 batches and are
//! only produced when the filter selects both periods. The tracked trend
//! categories and the recommendations are ranked over the whole snapshot.

use std::collections::BTreeSet;

use callcenter_analytics_models::{
    CategoryDelta, DashboardReport, DistributionView, IncidentFilter, InsightsView, OverviewView,
    PeriodValidity, Recommendation, TrendsView, ValidityView,
};
use callcenter_incident_models::{BigCategory, IncidentRecord, Period, Snapshot, Validity};

use crate::filter::apply_filter;
use crate::queries::{
    category_time_series, compare_periods, count_by_category, count_by_period,
    count_by_report_type, count_by_validity, growth_rate, month_category_matrix, monthly_series,
    percent_change, percent_of, rank_categories, signed, top_category, top_decreasing,
    top_increasing, year_over_year_delta,
};
use crate::recommendations::recommendation_for;

/// Categories shown in the distribution ranking.
pub const TOP_CATEGORIES: usize = 10;
/// Raw report types shown in the distribution.
pub const TOP_REPORT_TYPES: usize = 15;
/// Categories followed in the trend series.
pub const TRACKED_CATEGORIES: usize = 4;
/// Entries in each year-over-year change list.
pub const TOP_DELTAS: usize = 5;
/// Categories that receive a recommendation.
pub const TOP_RECOMMENDATIONS: usize = 5;

const BEFORE: Period = Period::Y2024;
const AFTER: Period = Period::Y2025;

/// Builds every dashboard view for `filter`.
#[must_use]
pub fn build_report(snapshot: &Snapshot, filter: &IncidentFilter) -> DashboardReport {
    let subset = apply_filter(snapshot.records(), filter);
    log::debug!(
        "Building dashboard for {}/{} records",
        subset.len(),
        snapshot.len()
    );

    DashboardReport {
        filter: filter.clone(),
        overview: overview_of(snapshot, filter, &subset),
        distribution: distribution_of(snapshot, filter, &subset),
        trends: trends_of(snapshot, &subset),
        validity: validity_of(snapshot, filter, &subset),
        insights: insights_of(snapshot, filter),
    }
}

/// Builds the key indicator view.
#[must_use]
pub fn overview(snapshot: &Snapshot, filter: &IncidentFilter) -> OverviewView {
    overview_of(snapshot, filter, &apply_filter(snapshot.records(), filter))
}

/// Builds the category and report type distribution view.
#[must_use]
pub fn distribution(snapshot: &Snapshot, filter: &IncidentFilter) -> DistributionView {
    distribution_of(snapshot, filter, &apply_filter(snapshot.records(), filter))
}

/// Builds the time trend view.
#[must_use]
pub fn trends(snapshot: &Snapshot, filter: &IncidentFilter) -> TrendsView {
    trends_of(snapshot, &apply_filter(snapshot.records(), filter))
}

/// Builds the validity breakdown view.
#[must_use]
pub fn validity(snapshot: &Snapshot, filter: &IncidentFilter) -> ValidityView {
    validity_of(snapshot, filter, &apply_filter(snapshot.records(), filter))
}

/// Builds the year-over-year insight and recommendation view.
#[must_use]
pub fn insights(snapshot: &Snapshot, filter: &IncidentFilter) -> InsightsView {
    insights_of(snapshot, filter)
}

fn overview_of(
    snapshot: &Snapshot,
    filter: &IncidentFilter,
    subset: &[&IncidentRecord],
) -> OverviewView {
    let total = subset.len() as u64;
    let by_validity = count_by_validity(subset.iter().copied());
    let valid_count = by_validity.get(&Validity::Valid).copied().unwrap_or(0);

    let growth = filter.selects_all_periods().then(|| {
        let before = snapshot.period(BEFORE).count() as u64;
        let after = snapshot.period(AFTER).count() as u64;
        (growth_rate(before, after), signed(after) - signed(before))
    });

    OverviewView {
        total,
        valid_count,
        valid_percent: percent_of(valid_count, total),
        growth_percent: growth.map(|(percent, _)| percent),
        growth_count: growth.map(|(_, count)| count),
        top_category: top_category(&count_by_category(subset.iter().copied())),
        by_period: count_by_period(subset.iter().copied()),
        by_validity,
    }
}

fn distribution_of(
    snapshot: &Snapshot,
    filter: &IncidentFilter,
    subset: &[&IncidentRecord],
) -> DistributionView {
    let counts = count_by_category(subset.iter().copied());

    let period_comparison = filter.selects_all_periods().then(|| {
        compare_periods(
            &count_by_category(snapshot.period(BEFORE)),
            &count_by_category(snapshot.period(AFTER)),
            TOP_CATEGORIES,
        )
    });

    let mut top_report_types = count_by_report_type(subset.iter().copied());
    top_report_types.truncate(TOP_REPORT_TYPES);

    DistributionView {
        top_categories: rank_categories(&counts, Some(TOP_CATEGORIES)),
        period_comparison,
        top_report_types,
    }
}

fn trends_of(snapshot: &Snapshot, subset: &[&IncidentRecord]) -> TrendsView {
    let tracked_categories: Vec<BigCategory> = rank_categories(
        &count_by_category(snapshot.records()),
        Some(TRACKED_CATEGORIES),
    )
    .into_iter()
    .map(|entry| entry.category)
    .collect();
    let tracked: BTreeSet<BigCategory> = tracked_categories.iter().copied().collect();

    TrendsView {
        monthly: monthly_series(subset.iter().copied()),
        category_series: category_time_series(subset.iter().copied(), &tracked),
        tracked_categories,
        heatmap: month_category_matrix(subset.iter().copied()),
    }
}

fn validity_of(
    snapshot: &Snapshot,
    filter: &IncidentFilter,
    subset: &[&IncidentRecord],
) -> ValidityView {
    let by_period: Vec<PeriodValidity> = Period::all()
        .iter()
        .map(|period| PeriodValidity {
            period: *period,
            counts: count_by_validity(snapshot.period(*period)),
        })
        .collect();

    let invalid = || {
        subset
            .iter()
            .copied()
            .filter(|r| r.validity == Validity::Invalid)
    };
    let invalid_total = invalid().count() as u64;

    let invalid_change = filter.selects_all_periods().then(|| {
        let count = |period: Period| {
            by_period
                .iter()
                .find(|entry| entry.period == period)
                .and_then(|entry| entry.counts.get(&Validity::Invalid).copied())
                .unwrap_or(0)
        };
        signed(count(AFTER)) - signed(count(BEFORE))
    });

    ValidityView {
        invalid_by_report_type: count_by_report_type(invalid()),
        invalid_total,
        invalid_percent: percent_of(invalid_total, subset.len() as u64),
        invalid_change,
        by_period,
    }
}

fn insights_of(snapshot: &Snapshot, filter: &IncidentFilter) -> InsightsView {
    let (top_increasing, top_decreasing) = if filter.selects_all_periods() {
        let before = count_by_category(snapshot.period(BEFORE));
        let after = count_by_category(snapshot.period(AFTER));
        let deltas = year_over_year_delta(&before, &after);

        let describe = |ranked: Vec<(BigCategory, i64)>| -> Vec<CategoryDelta> {
            ranked
                .into_iter()
                .map(|(category, delta)| {
                    let before_count = before.get(&category).copied().unwrap_or(0);
                    CategoryDelta {
                        category,
                        before: before_count,
                        after: after.get(&category).copied().unwrap_or(0),
                        delta,
                        percent_change: percent_change(delta, before_count),
                    }
                })
                .collect()
        };

        (
            Some(describe(top_increasing(&deltas, TOP_DELTAS))),
            Some(describe(top_decreasing(&deltas, TOP_DELTAS))),
        )
    } else {
        (None, None)
    };

    InsightsView {
        top_increasing,
        top_decreasing,
        recommendations: recommendations(snapshot),
    }
}

/// Ranks the leading categories of the whole snapshot and attaches their
/// recommended action.
#[must_use]
pub fn recommendations(snapshot: &Snapshot) -> Vec<Recommendation> {
    let total = snapshot.len() as u64;
    rank_categories(
        &count_by_category(snapshot.records()),
        Some(TOP_RECOMMENDATIONS),
    )
    .into_iter()
    .enumerate()
    .map(|(i, entry)| Recommendation {
        rank: i + 1,
        category: entry.category,
        count: entry.count,
        percent: percent_of(entry.count, total),
        text: recommendation_for(entry.category).to_owned(),
    })
    .collect()
}

#[cfg(test)]
mod tests {
    use callcenter_source::normalize::normalize_record;

    use super::*;

    fn snapshot() -> Snapshot {
        let rows = [
            ("Call", "Laka Lantas", "2024-01-03 08:00:00", Period::Y2024),
            ("Call", "Laka Lantas", "2024-01-09 08:00:00", Period::Y2024),
            ("Call", "Kebakaran Rumah", "2024-02-01 08:00:00", Period::Y2024),
            ("Prank", "Lain-lain", "2024-02-03 08:00:00", Period::Y2024),
            ("Call", "Kriminalitas", "2024-02-04 08:00:00", Period::Y2024),
            ("Call", "Laka Lantas", "2025-01-03 08:00:00", Period::Y2025),
            ("Call", "Pohon Tumbang", "2025-01-04 08:00:00", Period::Y2025),
            ("Call", "PJU Mati", "2025-02-05 08:00:00", Period::Y2025),
            ("Ghost", "Lain-lain", "2025-02-06 08:00:00", Period::Y2025),
            ("Prank", "Lain-lain", "2025-03-01 08:00:00", Period::Y2025),
        ];
        Snapshot::new(
            rows.iter()
                .map(|(t, c, at, p)| normalize_record(t, c, at, *p))
                .collect(),
        )
    }

    fn only_2024() -> IncidentFilter {
        IncidentFilter {
            years: BTreeSet::from([Period::Y2024]),
            ..IncidentFilter::all()
        }
    }

    #[test]
    fn overview_over_everything() {
        let view = overview(&snapshot(), &IncidentFilter::all());
        assert_eq!(view.total, 10);
        assert_eq!(view.valid_count, 7);
        assert!((view.valid_percent - 70.0).abs() < 1e-9);
        assert_eq!(view.growth_count, Some(0));
        assert!(view.growth_percent.unwrap().abs() < f64::EPSILON);
        assert_eq!(view.top_category, Some(BigCategory::TrafficIncident));
        assert_eq!(view.by_period[&Period::Y2024], 5);
    }

    #[test]
    fn comparisons_need_both_periods() {
        let snapshot = snapshot();
        let filter = only_2024();

        let report = build_report(&snapshot, &filter);
        assert_eq!(report.overview.growth_percent, None);
        assert_eq!(report.overview.growth_count, None);
        assert_eq!(report.distribution.period_comparison, None);
        assert_eq!(report.validity.invalid_change, None);
        assert_eq!(report.insights.top_increasing, None);
        assert_eq!(report.insights.top_decreasing, None);
        assert_eq!(report.overview.total, 5);

        // whole-snapshot parts are unaffected by the filter
        assert_eq!(report.insights.recommendations.len(), 5);
        assert_eq!(report.validity.by_period.len(), 2);
    }

    #[test]
    fn empty_subset_is_not_an_error() {
        let filter = IncidentFilter {
            validities: BTreeSet::new(),
            ..IncidentFilter::all()
        };
        let report = build_report(&snapshot(), &filter);
        assert_eq!(report.overview.total, 0);
        assert_eq!(report.overview.top_category, None);
        assert!(report.overview.valid_percent.abs() < f64::EPSILON);
        assert!(report.distribution.top_categories.is_empty());
        assert!(report.trends.monthly.is_empty());
        assert!(report.trends.heatmap.counts.is_empty());
        assert!(report.validity.invalid_percent.abs() < f64::EPSILON);
    }

    #[test]
    fn tracked_categories_come_from_whole_snapshot() {
        let snapshot = snapshot();
        let filter = IncidentFilter {
            categories: BTreeSet::from([BigCategory::Fire]),
            ..IncidentFilter::all()
        };
        let view = trends(&snapshot, &filter);

        assert_eq!(
            view.tracked_categories,
            [
                BigCategory::TrafficIncident,
                BigCategory::Infrastructure,
                BigCategory::Prank,
                BigCategory::Security
            ]
        );
        assert!(view.category_series.is_empty());
        assert_eq!(view.heatmap.categories, [BigCategory::Fire]);
        assert_eq!(view.heatmap.get(BigCategory::Fire, "2024-02"), 1);
    }

    #[test]
    fn validity_breakdown() {
        let view = validity(&snapshot(), &IncidentFilter::all());
        assert_eq!(view.invalid_total, 3);
        assert!((view.invalid_percent - 30.0).abs() < 1e-9);
        assert_eq!(view.invalid_change, Some(1));
        assert_eq!(view.invalid_by_report_type[0].label, "Prank");
        assert_eq!(view.invalid_by_report_type[0].count, 2);
        assert_eq!(view.by_period[1].counts[&Validity::Invalid], 2);
    }

    #[test]
    fn insights_describe_deltas() {
        let view = insights(&snapshot(), &IncidentFilter::all());
        let increasing = view.top_increasing.unwrap();
        assert_eq!(increasing[0].category, BigCategory::Infrastructure);
        assert_eq!(increasing[0].delta, 2);
        assert_eq!(increasing[0].before, 0);
        assert!(increasing[0].percent_change.abs() < f64::EPSILON);

        // three categories drop by one; ties resolve by name
        let decreasing = view.top_decreasing.unwrap();
        let names: Vec<BigCategory> = decreasing.iter().map(|d| d.category).collect();
        assert_eq!(
            names[..3],
            [
                BigCategory::Fire,
                BigCategory::Security,
                BigCategory::TrafficIncident
            ]
        );
        assert_eq!(decreasing[2].delta, -1);
        assert!((decreasing[2].percent_change + 50.0).abs() < 1e-9);
    }

    #[test]
    fn recommendations_rank_whole_snapshot() {
        let recs = recommendations(&snapshot());
        assert_eq!(recs[0].rank, 1);
        assert_eq!(recs[0].category, BigCategory::TrafficIncident);
        assert_eq!(recs[0].count, 3);
        assert!((recs[0].percent - 30.0).abs() < 1e-9);
        assert_eq!(recs[0].text, recommendation_for(BigCategory::TrafficIncident));
    }
}
