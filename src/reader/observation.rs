//! Typed row extraction
//!
//! Converts loaded DataFrames into typed rows. Cells that cannot be coerced
//! (missing, non-numeric, negative sample sizes) exclude their row. Excluded
//! rows are counted, never reported as errors.

use crate::{naming, DataFrame, HealthvizError, Result};
use polars::prelude::*;

/// One row of the age or income table
#[derive(Debug, Clone, PartialEq)]
pub struct StratifiedRow {
    pub year: i64,
    /// Age band or income band
    pub category: String,
    /// Obesity rate in percent
    pub value: f64,
    /// Always finite and non-negative after extraction
    pub sample_size: f64,
}

/// One row of the per-state map table
#[derive(Debug, Clone, PartialEq)]
pub struct RegionalRow {
    pub year: i64,
    /// Two-letter state abbreviation
    pub abbr: String,
    /// State name
    pub name: String,
    pub value: f64,
}

/// Rows kept by an extraction plus the number of rows that were dropped
#[derive(Debug, Clone, PartialEq)]
pub struct Extraction<T> {
    pub rows: Vec<T>,
    pub excluded: usize,
}

impl<T> Extraction<T> {
    fn new(rows: Vec<T>, total: usize, table: &str) -> Self {
        let excluded = total - rows.len();
        if excluded > 0 {
            tracing::info!(
                table,
                kept = rows.len(),
                excluded,
                "Excluded rows with missing or unparseable values"
            );
        }
        Self { rows, excluded }
    }
}

/// Extract rows from the age or income table
///
/// Requires `YearStart`, `Stratification1`, `Data_Value` and `Sample_Size`.
/// A row is dropped when its year, band or value is missing, or when its
/// sample size is missing, non-numeric or negative.
pub fn stratified_rows(df: &DataFrame) -> Result<Extraction<StratifiedRow>> {
    let years = year_column(df)?;
    let categories = text_column(df, naming::STRATIFICATION)?;
    let values = float_column(df, naming::DATA_VALUE)?;
    let sizes = float_column(df, naming::SAMPLE_SIZE)?;

    let rows: Vec<StratifiedRow> = years
        .into_iter()
        .zip(categories)
        .zip(values)
        .zip(sizes)
        .filter_map(|(((year, category), value), size)| {
            Some(StratifiedRow {
                year: year?,
                category: category?,
                value: value?,
                sample_size: size.filter(|s| *s >= 0.0)?,
            })
        })
        .collect();

    Ok(Extraction::new(rows, df.height(), naming::STRATIFICATION))
}

/// Extract rows from the map table
///
/// Requires `YearStart`, `LocationAbbr`, `LocationDesc` and `Data_Value`.
/// A row is dropped when its year, abbreviation or value is missing. A missing
/// state name falls back to the abbreviation.
pub fn regional_rows(df: &DataFrame) -> Result<Extraction<RegionalRow>> {
    let years = year_column(df)?;
    let abbrs = text_column(df, naming::LOCATION_ABBR)?;
    let names = text_column(df, naming::LOCATION_DESC)?;
    let values = float_column(df, naming::DATA_VALUE)?;

    let rows: Vec<RegionalRow> = years
        .into_iter()
        .zip(abbrs)
        .zip(names)
        .zip(values)
        .filter_map(|(((year, abbr), name), value)| {
            let abbr = abbr?;
            Some(RegionalRow {
                year: year?,
                name: name.unwrap_or_else(|| abbr.clone()),
                abbr,
                value: value?,
            })
        })
        .collect();

    Ok(Extraction::new(rows, df.height(), naming::LOCATION_ABBR))
}

// =============================================================================
// Column coercion
// =============================================================================

fn required<'a>(df: &'a DataFrame, name: &str) -> Result<&'a Series> {
    df.column(name)
        .map(|c| c.as_materialized_series())
        .map_err(|_| {
            HealthvizError::SchemaError(format!(
                "Required column '{}' not found (have: {})",
                name,
                df.get_column_names()
                    .iter()
                    .map(|s| s.as_str())
                    .collect::<Vec<_>>()
                    .join(", ")
            ))
        })
}

/// Numeric column with unparseable and non-finite cells as `None`
fn float_column(df: &DataFrame, name: &str) -> Result<Vec<Option<f64>>> {
    let series = required(df, name)?;

    let values: Vec<Option<f64>> = if series.dtype() == &DataType::String {
        let ca = series
            .str()
            .map_err(|e| HealthvizError::SchemaError(format!("Column '{}': {}", name, e)))?;
        ca.into_iter()
            .map(|cell| cell.and_then(|s| s.trim().parse::<f64>().ok()))
            .collect()
    } else {
        let cast = series
            .cast(&DataType::Float64)
            .map_err(|e| HealthvizError::SchemaError(format!("Column '{}': {}", name, e)))?;
        let ca = cast
            .f64()
            .map_err(|e| HealthvizError::SchemaError(format!("Column '{}': {}", name, e)))?;
        ca.into_iter().collect()
    };

    Ok(values
        .into_iter()
        .map(|v| v.filter(|x| x.is_finite()))
        .collect())
}

/// Year column; fractional years are treated as unparseable
fn year_column(df: &DataFrame) -> Result<Vec<Option<i64>>> {
    Ok(float_column(df, naming::YEAR_START)?
        .into_iter()
        .map(|v| v.filter(|y| y.fract() == 0.0).map(|y| y as i64))
        .collect())
}

/// Text column with empty cells as `None`
fn text_column(df: &DataFrame, name: &str) -> Result<Vec<Option<String>>> {
    let series = required(df, name)?;
    let cast = series
        .cast(&DataType::String)
        .map_err(|e| HealthvizError::SchemaError(format!("Column '{}': {}", name, e)))?;
    let ca = cast
        .str()
        .map_err(|e| HealthvizError::SchemaError(format!("Column '{}': {}", name, e)))?;

    Ok(ca
        .into_iter()
        .map(|cell| {
            cell.map(str::trim)
                .filter(|s| !s.is_empty())
                .map(|s| s.to_string())
        })
        .collect())
}
