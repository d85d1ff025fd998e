//! Plain-text rendering of a [`DashboardReport`].

use std::fmt::Write as _;

use callcenter_analytics_models::{DashboardReport, IncidentFilter};
use callcenter_incident_models::{Period, Validity};

const BOTH_YEARS_NOTE: &str = "  (select both years to compare periods)";

/// Renders every view of the report as terminal text.
#[must_use]
pub fn render(report: &DashboardReport) -> String {
    let mut out = String::new();
    // Writing to a String cannot fail.
    let _ = write_report(&mut out, report);
    out
}

fn write_report(out: &mut String, report: &DashboardReport) -> std::fmt::Result {
    writeln!(out, "Filter: {}", describe_filter(&report.filter))?;
    writeln!(out)?;

    let overview = &report.overview;
    writeln!(out, "== Overview ==")?;
    writeln!(out, "  Total incidents:  {}", overview.total)?;
    writeln!(
        out,
        "  Valid incidents:  {} ({:.1}%)",
        overview.valid_count, overview.valid_percent
    )?;
    match (overview.growth_percent, overview.growth_count) {
        (Some(percent), Some(count)) => {
            writeln!(out, "  Growth 2024-2025: {percent:+.1}% ({count:+})")?;
        }
        _ => writeln!(out, "  Growth 2024-2025: n/a")?,
    }
    writeln!(
        out,
        "  Top category:     {}",
        overview.top_category.map_or("-", |c| c.label())
    )?;
    for period in Period::all() {
        writeln!(
            out,
            "  {period}:             {}",
            overview.by_period.get(period).copied().unwrap_or(0)
        )?;
    }
    writeln!(out)?;

    let distribution = &report.distribution;
    writeln!(out, "== Top categories ==")?;
    for entry in &distribution.top_categories {
        writeln!(out, "  {:<18} {:>8}", entry.category.label(), entry.count)?;
    }
    writeln!(out)?;

    writeln!(out, "== 2024 vs 2025 ==")?;
    match &distribution.period_comparison {
        Some(rows) => {
            writeln!(out, "  {:<18} {:>8} {:>8}", "", "2024", "2025")?;
            for row in rows {
                writeln!(
                    out,
                    "  {:<18} {:>8} {:>8}",
                    row.category.label(),
                    row.period_a_count,
                    row.period_b_count
                )?;
            }
        }
        None => writeln!(out, "{BOTH_YEARS_NOTE}")?,
    }
    writeln!(out)?;

    writeln!(out, "== Report types ==")?;
    for entry in &distribution.top_report_types {
        writeln!(out, "  {:<24} {:>8}", entry.label, entry.count)?;
    }
    writeln!(out)?;

    writeln!(out, "== Monthly trend ==")?;
    for point in &report.trends.monthly {
        writeln!(out, "  {} [{}] {:>8}", point.month, point.period, point.count)?;
    }
    writeln!(out)?;

    let validity = &report.validity;
    writeln!(out, "== Validity ==")?;
    for batch in &validity.by_period {
        writeln!(
            out,
            "  {}: {} valid, {} invalid",
            batch.period,
            batch.counts.get(&Validity::Valid).copied().unwrap_or(0),
            batch.counts.get(&Validity::Invalid).copied().unwrap_or(0)
        )?;
    }
    writeln!(
        out,
        "  Invalid in selection: {} ({:.1}%)",
        validity.invalid_total, validity.invalid_percent
    )?;
    if let Some(change) = validity.invalid_change {
        writeln!(out, "  Invalid change 2024-2025: {change:+}")?;
    }
    for entry in &validity.invalid_by_report_type {
        writeln!(out, "    {:<22} {:>8}", entry.label, entry.count)?;
    }
    writeln!(out)?;

    let insights = &report.insights;
    writeln!(out, "== Year-over-year ==")?;
    match (&insights.top_increasing, &insights.top_decreasing) {
        (Some(increasing), Some(decreasing)) => {
            writeln!(out, "  Increasing:")?;
            for d in increasing {
                writeln!(
                    out,
                    "    {:<18} {:+6} ({:+.1}%)",
                    d.category.label(),
                    d.delta,
                    d.percent_change
                )?;
            }
            writeln!(out, "  Decreasing:")?;
            for d in decreasing {
                writeln!(
                    out,
                    "    {:<18} {:+6} ({:+.1}%)",
                    d.category.label(),
                    d.delta,
                    d.percent_change
                )?;
            }
        }
        _ => writeln!(out, "{BOTH_YEARS_NOTE}")?,
    }
    writeln!(out)?;

    writeln!(out, "== Recommendations ==")?;
    for rec in &insights.recommendations {
        writeln!(
            out,
            "  {}. {} ({} incidents, {:.1}%)",
            rec.rank,
            rec.category.label(),
            rec.count,
            rec.percent
        )?;
        writeln!(out, "     {}", rec.text)?;
    }

    Ok(())
}

/// Summarizes a filter as `years | categories | validities`, printing
/// `all` for fully selected axes.
#[must_use]
pub fn describe_filter(filter: &IncidentFilter) -> String {
    let all = IncidentFilter::all();
    let axis = |selected: Vec<String>, complete: bool| {
        if complete {
            "all".to_string()
        } else if selected.is_empty() {
            "none".to_string()
        } else {
            selected.join(",")
        }
    };

    format!(
        "years={} | categories={} | validities={}",
        axis(
            filter.years.iter().map(ToString::to_string).collect(),
            filter.years == all.years
        ),
        axis(
            filter.categories.iter().map(ToString::to_string).collect(),
            filter.categories == all.categories
        ),
        axis(
            filter.validities.iter().map(ToString::to_string).collect(),
            filter.validities == all.validities
        ),
    )
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeSet;

    use callcenter_analytics::build_report;
    use callcenter_incident_models::{BigCategory, Snapshot};
    use callcenter_source::normalize::normalize_record;

    use super::*;

    fn snapshot() -> Snapshot {
        Snapshot::new(vec![
            normalize_record("Call", "Laka Lantas", "2024-01-03 08:00:00", Period::Y2024),
            normalize_record("Prank", "Lain-lain", "2025-02-03 08:00:00", Period::Y2025),
        ])
    }

    #[test]
    fn renders_all_sections() {
        let text = render(&build_report(&snapshot(), &IncidentFilter::all()));
        for heading in [
            "== Overview ==",
            "== Top categories ==",
            "== 2024 vs 2025 ==",
            "== Monthly trend ==",
            "== Validity ==",
            "== Year-over-year ==",
            "== Recommendations ==",
        ] {
            assert!(text.contains(heading), "missing {heading}");
        }
        assert!(text.contains("Total incidents:  2"));
        assert!(!text.contains(BOTH_YEARS_NOTE));
    }

    #[test]
    fn single_year_hides_comparisons() {
        let filter = IncidentFilter {
            years: BTreeSet::from([Period::Y2025]),
            ..IncidentFilter::all()
        };
        let text = render(&build_report(&snapshot(), &filter));
        assert!(text.contains("Growth 2024-2025: n/a"));
        assert!(text.contains(BOTH_YEARS_NOTE));
    }

    #[test]
    fn describes_partial_filters() {
        let filter = IncidentFilter {
            categories: BTreeSet::from([BigCategory::Fire, BigCategory::Health]),
            validities: BTreeSet::new(),
            ..IncidentFilter::all()
        };
        assert_eq!(
            describe_filter(&filter),
            "years=all | categories=HEALTH,FIRE | validities=none"
        );
    }
}
