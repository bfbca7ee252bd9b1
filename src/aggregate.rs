//! Aggregation of survey rows into one rate per (year, category)
//!
//! Three reductions live here:
//!
//! - [`weighted_mean`]: sample-size weighted mean of a single group
//! - [`weighted_by_year_category`] / [`mean_by_year`]: grouping helpers
//! - [`growth_since`]: left join of each point against its baseline-year rate
//!
//! The age and income views use the weighted mean; the national trend uses a
//! plain per-year mean of the raw state rows.

use crate::reader::{RegionalRow, StratifiedRow};
use std::collections::{BTreeMap, HashMap};

/// One aggregated rate
#[derive(Debug, Clone, PartialEq)]
pub struct AggregatedPoint {
    pub year: i64,
    /// Age or income band; `None` for national per-year points
    pub category: Option<String>,
    pub rate: f64,
}

/// Current rate of a category joined with its baseline-year rate
#[derive(Debug, Clone, PartialEq)]
pub struct GrowthRecord {
    pub category: String,
    pub year: i64,
    pub current: f64,
    /// `None` when the category has no point in the baseline year
    pub baseline: Option<f64>,
    /// `current - baseline`; `None` whenever `baseline` is
    pub growth: Option<f64>,
}

/// Weighted mean `sum(value * weight) / sum(weight)` of a group of rows.
///
/// `value` and `weight` select the fields to reduce.
///
/// # Preconditions
///
/// Every weight must be finite and non-negative. Rows whose weight failed
/// coercion must be filtered out before calling this (see
/// [`crate::reader::observation::stratified_rows`]). A negative weight is not
/// detected in release builds and silently skews the result.
///
/// Rows whose value is NaN or infinite do not contribute.
///
/// # Returns
///
/// `None` when the group has no row with a finite value and a positive
/// weight. Otherwise the mean, which:
///
/// - is the same bit-for-bit for any ordering of `rows`
/// - lies within `[min, max]` of the positively weighted values
/// - equals `v` exactly when every contributing value is `v`
pub fn weighted_mean<T, V, W>(rows: &[T], value: V, weight: W) -> Option<f64>
where
    V: Fn(&T) -> f64,
    W: Fn(&T) -> f64,
{
    let mut pairs: Vec<(f64, f64)> = rows
        .iter()
        .map(|row| (value(row), weight(row)))
        .inspect(|(_, w)| debug_assert!(*w >= 0.0, "negative weight {}", w))
        .filter(|(v, w)| v.is_finite() && *w > 0.0)
        .collect();

    if pairs.is_empty() {
        return None;
    }

    // Sorting fixes the accumulation order, which makes the sum independent
    // of the input order.
    pairs.sort_by(|a, b| a.0.total_cmp(&b.0).then(a.1.total_cmp(&b.1)));

    let min = pairs[0].0;
    let max = pairs[pairs.len() - 1].0;

    let (shifted, total) = pairs
        .iter()
        .fold((0.0, 0.0), |(sum, total), (v, w)| (sum + (v - min) * w, total + w));

    Some((min + shifted / total).clamp(min, max))
}

/// Weighted mean rate per (year, category), ordered by year then category
///
/// Groups whose weights are all zero have no defined mean and are left out.
pub fn weighted_by_year_category(rows: &[StratifiedRow]) -> Vec<AggregatedPoint> {
    let mut groups: BTreeMap<(i64, &str), Vec<&StratifiedRow>> = BTreeMap::new();
    for row in rows {
        groups
            .entry((row.year, row.category.as_str()))
            .or_default()
            .push(row);
    }

    groups
        .into_iter()
        .filter_map(|((year, category), group)| {
            let rate = weighted_mean(&group, |r| r.value, |r| r.sample_size);
            if rate.is_none() {
                tracing::debug!(year, category, "Skipping group with zero total sample size");
            }
            Some(AggregatedPoint {
                year,
                category: Some(category.to_string()),
                rate: rate?,
            })
        })
        .collect()
}

/// Unweighted mean of the raw rows per year, ordered by year
pub fn mean_by_year(rows: &[RegionalRow]) -> Vec<AggregatedPoint> {
    let mut sums: BTreeMap<i64, (f64, usize)> = BTreeMap::new();
    for row in rows {
        let entry = sums.entry(row.year).or_insert((0.0, 0));
        entry.0 += row.value;
        entry.1 += 1;
    }

    sums.into_iter()
        .map(|(year, (sum, count))| AggregatedPoint {
            year,
            category: None,
            rate: sum / count as f64,
        })
        .collect()
}

/// Join every categorized point with its category's rate in `baseline_year`
///
/// Left join: every input point with a category yields exactly one record.
/// Categories without a baseline-year point keep `None` for both baseline and
/// growth. Points without a category are skipped.
pub fn growth_since(points: &[AggregatedPoint], baseline_year: i64) -> Vec<GrowthRecord> {
    let baselines: HashMap<&str, f64> = points
        .iter()
        .filter(|p| p.year == baseline_year)
        .filter_map(|p| Some((p.category.as_deref()?, p.rate)))
        .collect();

    points
        .iter()
        .filter_map(|p| {
            let category = p.category.as_deref()?;
            let baseline = baselines.get(category).copied();
            Some(GrowthRecord {
                category: category.to_string(),
                year: p.year,
                current: p.rate,
                baseline,
                growth: baseline.map(|b| p.rate - b),
            })
        })
        .collect()
}
