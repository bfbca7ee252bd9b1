//! Chart builders
//!
//! Each builder consumes one loaded table and returns a [`Figure`]: the chart
//! specification plus the named datasets it reads. Builders are independent
//! of each other and share only the aggregation helpers and the chart model.
//!
//! - [`age_heatmap`]: weighted rate per (year, age band) as a heatmap
//! - [`trend_and_map`]: national trend linked to a per-state map by hovered year
//! - [`income_gap`]: income-band trends linked to growth-since-2011 bars

use crate::plot::{ChartSpec, HoverState, Selection};
use crate::{naming, DataFrame, HealthvizError, Result};
use polars::prelude::*;
use std::collections::{BTreeSet, HashMap};

mod age;
mod income;
mod trend_map;

pub use age::{age_heatmap, AGE_ORDER};
pub use income::{income_gap, INCOME_ORDER};
pub use trend_map::trend_and_map;

/// A chart specification together with the data it references
#[derive(Debug, Clone)]
pub struct Figure {
    chart: ChartSpec,
    data: HashMap<String, DataFrame>,
    selection: Option<Selection>,
}

impl Figure {
    pub fn new(chart: ChartSpec) -> Self {
        Self {
            chart,
            data: HashMap::new(),
            selection: None,
        }
    }

    pub fn with_data(mut self, key: &str, df: DataFrame) -> Self {
        self.data.insert(key.to_string(), df);
        self
    }

    /// Record the hover selection that links this figure's views
    pub fn with_selection(mut self, selection: Selection) -> Self {
        self.selection = Some(selection);
        self
    }

    pub fn chart(&self) -> &ChartSpec {
        &self.chart
    }

    /// All datasets by name
    pub fn data(&self) -> &HashMap<String, DataFrame> {
        &self.data
    }

    pub fn dataset(&self, key: &str) -> Option<&DataFrame> {
        self.data.get(key)
    }

    pub fn selection(&self) -> Option<&Selection> {
        self.selection.as_ref()
    }

    /// Total number of inline rows across all datasets
    pub fn row_count(&self) -> usize {
        self.data.values().map(DataFrame::height).sum()
    }

    /// Rows of `key` that a view filtered by this figure's selection shows
    /// in the given hover state
    ///
    /// # Errors
    ///
    /// Returns `HealthvizError::BuildError` if the figure has no selection,
    /// the dataset does not exist or lacks the selection field.
    pub fn linked_rows(&self, key: &str, state: &HoverState) -> Result<DataFrame> {
        let selection = self.selection.as_ref().ok_or_else(|| {
            HealthvizError::BuildError("Figure has no linked selection".to_string())
        })?;
        let df = self.dataset(key).ok_or_else(|| {
            HealthvizError::BuildError(format!("Unknown dataset '{}'", key))
        })?;

        let years = df
            .column(selection.field())
            .and_then(|c| c.as_materialized_series().cast(&DataType::Int64))
            .map_err(|e| {
                HealthvizError::BuildError(format!(
                    "Dataset '{}' cannot be filtered on '{}': {}",
                    key,
                    selection.field(),
                    e
                ))
            })?;
        let years = years.i64().map_err(build_error)?;

        let mask: Vec<bool> = years
            .into_iter()
            .map(|year| year.is_some_and(|y| selection.admits(state, y)))
            .collect();
        let mask = Series::new("mask".into(), mask);

        df.filter(mask.bool().map_err(build_error)?)
            .map_err(build_error)
    }
}

/// States drawn on the map of a trend + map figure in the given hover state
pub fn rendered_regions(figure: &Figure, state: &HoverState) -> Result<BTreeSet<String>> {
    let rows = figure.linked_rows(naming::MAP_DATASET, state)?;
    let abbrs = rows
        .column(naming::LOCATION_ABBR)
        .map_err(build_error)?
        .as_materialized_series()
        .str()
        .map_err(build_error)?
        .into_iter()
        .flatten()
        .map(|s| s.to_string())
        .collect();
    Ok(abbrs)
}

/// Category order for an axis or legend: the canonical sequence first, then
/// any other category present in the data, alphabetically.
pub fn canonical_order<'a>(
    canonical: &[&str],
    present: impl IntoIterator<Item = &'a str>,
    dimension: &str,
) -> Vec<String> {
    let mut extra: Vec<&str> = present
        .into_iter()
        .filter(|c| !canonical.contains(c))
        .collect();
    extra.sort_unstable();
    extra.dedup();

    if !extra.is_empty() {
        tracing::warn!(
            dimension,
            unknown = ?extra,
            "Categories outside the canonical order are appended after it"
        );
    }

    canonical
        .iter()
        .copied()
        .chain(extra)
        .map(str::to_string)
        .collect()
}

pub(crate) fn build_error(e: PolarsError) -> HealthvizError {
    HealthvizError::BuildError(e.to_string())
}
