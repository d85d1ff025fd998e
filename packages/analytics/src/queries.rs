//! Aggregate queries over a record subset.
//!
//! Every query accepts any iterator of record references (the whole
//! snapshot, a single period, or a filtered subset), is read-only, and is
//! total: empty input yields empty or zero-valued results, never an error.

use std::cmp::Ordering;
use std::collections::{BTreeMap, BTreeSet, HashMap};

use callcenter_analytics_models::{
    CategoryCount, CategoryMonthlyCount, LabelCount, MonthCategoryMatrix, MonthlyCount,
    PeriodCategoryComparison,
};
use callcenter_incident_models::{BigCategory, IncidentRecord, Period, Validity};

/// Counts records per reporting period, ascending by period. Periods with
/// no records are omitted.
pub fn count_by_period<'a>(
    records: impl IntoIterator<Item = &'a IncidentRecord>,
) -> BTreeMap<Period, u64> {
    let mut counts = BTreeMap::new();
    for record in records {
        *counts.entry(record.period).or_insert(0) += 1;
    }
    counts
}

/// Counts records per validity class. Both classes are always present.
pub fn count_by_validity<'a>(
    records: impl IntoIterator<Item = &'a IncidentRecord>,
) -> BTreeMap<Validity, u64> {
    let mut counts: BTreeMap<Validity, u64> = Validity::all().iter().map(|v| (*v, 0)).collect();
    for record in records {
        *counts.entry(record.validity).or_insert(0) += 1;
    }
    counts
}

/// Counts records per category. Categories with no records are omitted.
pub fn count_by_category<'a>(
    records: impl IntoIterator<Item = &'a IncidentRecord>,
) -> BTreeMap<BigCategory, u64> {
    let mut counts = BTreeMap::new();
    for record in records {
        *counts.entry(record.big_category).or_insert(0) += 1;
    }
    counts
}

/// Ranks categories descending by count, ties in canonical category order.
#[must_use]
pub fn rank_categories(
    counts: &BTreeMap<BigCategory, u64>,
    limit: Option<usize>,
) -> Vec<CategoryCount> {
    // BTreeMap iteration is canonical order; the sort is stable.
    let mut ranked: Vec<CategoryCount> = counts
        .iter()
        .map(|(category, count)| CategoryCount {
            category: *category,
            count: *count,
        })
        .collect();
    ranked.sort_by(|a, b| b.count.cmp(&a.count));
    if let Some(limit) = limit {
        ranked.truncate(limit);
    }
    ranked
}

/// Returns the most frequent category, or `None` when there is no data.
#[must_use]
pub fn top_category(counts: &BTreeMap<BigCategory, u64>) -> Option<BigCategory> {
    rank_categories(counts, Some(1))
        .first()
        .map(|entry| entry.category)
}

/// Counts records per raw report type (trimmed), descending by count with
/// ties in order of first appearance.
pub fn count_by_report_type<'a>(
    records: impl IntoIterator<Item = &'a IncidentRecord>,
) -> Vec<LabelCount> {
    let mut index: HashMap<&str, usize> = HashMap::new();
    let mut counts: Vec<LabelCount> = Vec::new();

    for record in records {
        let label = record.report_type.trim();
        if let Some(&i) = index.get(label) {
            counts[i].count += 1;
        } else {
            index.insert(label, counts.len());
            counts.push(LabelCount {
                label: label.to_owned(),
                count: 1,
            });
        }
    }

    counts.sort_by(|a, b| b.count.cmp(&a.count));
    counts
}

/// Counts records per (month, period), sorted by month then period.
///
/// Only combinations that actually occur are emitted; records without a
/// month are skipped.
pub fn monthly_series<'a>(
    records: impl IntoIterator<Item = &'a IncidentRecord>,
) -> Vec<MonthlyCount> {
    let mut counts: BTreeMap<(&str, Period), u64> = BTreeMap::new();
    for record in records {
        if let Some(month) = record.month.as_deref() {
            *counts.entry((month, record.period)).or_insert(0) += 1;
        }
    }

    counts
        .into_iter()
        .map(|((month, period), count)| MonthlyCount {
            month: month.to_owned(),
            period,
            count,
        })
        .collect()
}

/// Counts records per (month, category) for the given categories, sorted
/// by month then canonical category order.
///
/// Only combinations that actually occur are emitted; records without a
/// month are skipped.
pub fn category_time_series<'a>(
    records: impl IntoIterator<Item = &'a IncidentRecord>,
    categories: &BTreeSet<BigCategory>,
) -> Vec<CategoryMonthlyCount> {
    let mut counts: BTreeMap<(&str, BigCategory), u64> = BTreeMap::new();
    for record in records {
        if !categories.contains(&record.big_category) {
            continue;
        }
        if let Some(month) = record.month.as_deref() {
            *counts.entry((month, record.big_category)).or_insert(0) += 1;
        }
    }

    counts
        .into_iter()
        .map(|((month, category), count)| CategoryMonthlyCount {
            month: month.to_owned(),
            category,
            count,
        })
        .collect()
}

/// Builds the dense category × month matrix of the records.
///
/// Rows are the categories present, columns the months present; every
/// cell without records is `0`. Records without a month are skipped.
pub fn month_category_matrix<'a>(
    records: impl IntoIterator<Item = &'a IncidentRecord>,
) -> MonthCategoryMatrix {
    let mut cells: BTreeMap<(BigCategory, &str), u64> = BTreeMap::new();
    let mut months: BTreeSet<&str> = BTreeSet::new();
    let mut categories: BTreeSet<BigCategory> = BTreeSet::new();

    for record in records {
        if let Some(month) = record.month.as_deref() {
            *cells.entry((record.big_category, month)).or_insert(0) += 1;
            months.insert(month);
            categories.insert(record.big_category);
        }
    }

    let counts = categories
        .iter()
        .map(|category| {
            months
                .iter()
                .map(|month| cells.get(&(*category, *month)).copied().unwrap_or(0))
                .collect()
        })
        .collect();

    MonthCategoryMatrix {
        months: months.into_iter().map(str::to_owned).collect(),
        categories: categories.into_iter().collect(),
        counts,
    }
}

/// Computes `b - a` per category over the union of both count maps. A
/// category absent on either side counts as zero there.
#[must_use]
pub fn year_over_year_delta(
    counts_a: &BTreeMap<BigCategory, u64>,
    counts_b: &BTreeMap<BigCategory, u64>,
) -> BTreeMap<BigCategory, i64> {
    counts_a
        .keys()
        .chain(counts_b.keys())
        .map(|category| {
            let a = counts_a.get(category).copied().unwrap_or(0);
            let b = counts_b.get(category).copied().unwrap_or(0);
            (*category, signed(b) - signed(a))
        })
        .collect()
}

/// Returns the `n` largest deltas, descending, ties by category name.
#[must_use]
pub fn top_increasing(deltas: &BTreeMap<BigCategory, i64>, n: usize) -> Vec<(BigCategory, i64)> {
    let mut ranked: Vec<(BigCategory, i64)> = deltas.iter().map(|(c, d)| (*c, *d)).collect();
    ranked.sort_by(|(ca, da), (cb, db)| db.cmp(da).then_with(|| by_name(*ca, *cb)));
    ranked.truncate(n);
    ranked
}

/// Returns the `n` smallest deltas, ascending, ties by category name.
#[must_use]
pub fn top_decreasing(deltas: &BTreeMap<BigCategory, i64>, n: usize) -> Vec<(BigCategory, i64)> {
    let mut ranked: Vec<(BigCategory, i64)> = deltas.iter().map(|(c, d)| (*c, *d)).collect();
    ranked.sort_by(|(ca, da), (cb, db)| da.cmp(db).then_with(|| by_name(*ca, *cb)));
    ranked.truncate(n);
    ranked
}

fn by_name(a: BigCategory, b: BigCategory) -> Ordering {
    let (a, b): (&str, &str) = (a.as_ref(), b.as_ref());
    a.cmp(b)
}

/// Pairs up per-category counts of two periods, ranked descending by their
/// combined total (ties in canonical order), truncated to `limit`.
#[must_use]
pub fn compare_periods(
    counts_a: &BTreeMap<BigCategory, u64>,
    counts_b: &BTreeMap<BigCategory, u64>,
    limit: usize,
) -> Vec<PeriodCategoryComparison> {
    let categories: BTreeSet<BigCategory> =
        counts_a.keys().chain(counts_b.keys()).copied().collect();

    let mut rows: Vec<PeriodCategoryComparison> = categories
        .into_iter()
        .map(|category| {
            let a = counts_a.get(&category).copied().unwrap_or(0);
            let b = counts_b.get(&category).copied().unwrap_or(0);
            PeriodCategoryComparison {
                category,
                period_a_count: a,
                period_b_count: b,
                total: a + b,
            }
        })
        .collect();

    rows.sort_by(|x, y| y.total.cmp(&x.total));
    rows.truncate(limit);
    rows
}

/// Returns `count` as a percentage of `total`, `0.0` when `total` is zero.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn percent_of(count: u64, total: u64) -> f64 {
    if total == 0 {
        return 0.0;
    }
    count as f64 / total as f64 * 100.0
}

/// Returns a signed change as a percentage of `base`, `0.0` when `base` is
/// zero.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn percent_change(delta: i64, base: u64) -> f64 {
    if base == 0 {
        return 0.0;
    }
    delta as f64 / base as f64 * 100.0
}

/// Growth from `before` to `after` in percent, `0.0` when `before` is zero.
#[must_use]
pub fn growth_rate(before: u64, after: u64) -> f64 {
    percent_change(signed(after) - signed(before), before)
}

/// Converts a count to a signed value, saturating at `i64::MAX`.
pub(crate) fn signed(count: u64) -> i64 {
    i64::try_from(count).unwrap_or(i64::MAX)
}
