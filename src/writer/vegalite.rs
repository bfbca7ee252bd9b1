//! Vega-Lite JSON writer implementation
//!
//! Converts figures into Vega-Lite v6 JSON documents.
//!
//! # Mapping Strategy
//!
//! - Figure datasets → top-level `datasets`, one array of row objects per name
//! - Unit charts → `{"data": {"name": ...}}` references into those datasets
//! - Chart body (`layer`, `vconcat`, ...) → merged into the document root
//!
//! # Example
//!
//! ```rust,ignore
//! use healthviz::writer::{Writer, VegaLiteWriter};
//!
//! let writer = VegaLiteWriter::new();
//! let vega_json = writer.write(&figure)?;
//! // Can be rendered in browser with vega-embed
//! ```

use super::RowLimit;
use crate::writer::Writer;
use crate::{DataFrame, Figure, HealthvizError, Result};
use polars::prelude::*;
use serde_json::{json, Map, Value};

/// Vega-Lite JSON writer
///
/// Generates Vega-Lite v6 specifications from figures.
pub struct VegaLiteWriter {
    /// Vega-Lite schema version
    schema: String,
    row_limit: RowLimit,
}

impl VegaLiteWriter {
    /// Create a new Vega-Lite writer with default settings (no row limit)
    pub fn new() -> Self {
        Self {
            schema: "https://vega.github.io/schema/vega-lite/v6.json".to_string(),
            row_limit: RowLimit::Unlimited,
        }
    }

    pub fn with_row_limit(mut self, row_limit: RowLimit) -> Self {
        self.row_limit = row_limit;
        self
    }

    pub fn row_limit(&self) -> RowLimit {
        self.row_limit
    }

    /// Build the complete document as a JSON value
    pub fn to_value(&self, figure: &Figure) -> Result<Value> {
        self.validate(figure)?;

        let mut vl_spec = json!({
            "$schema": self.schema
        });

        // Build datasets - convert all DataFrames to Vega-Lite format
        let mut datasets = Map::new();
        for (key, df) in figure.data() {
            datasets.insert(key.clone(), json!(self.dataframe_to_values(df)?));
        }
        vl_spec["datasets"] = Value::Object(datasets);

        match (vl_spec.as_object_mut(), figure.chart().to_value()) {
            (Some(root), Value::Object(body)) => root.extend(body),
            _ => {
                return Err(HealthvizError::WriterError(
                    "Chart specification is not a JSON object".to_string(),
                ))
            }
        }

        Ok(vl_spec)
    }

    /// Convert Polars DataFrame to Vega-Lite data values (array of objects)
    fn dataframe_to_values(&self, df: &DataFrame) -> Result<Vec<Value>> {
        let mut values = Vec::with_capacity(df.height());
        let column_names = df.get_column_names();

        for row_idx in 0..df.height() {
            let mut row_obj = Map::new();

            for (col_idx, col_name) in column_names.iter().enumerate() {
                let column = df.get_columns().get(col_idx).ok_or_else(|| {
                    HealthvizError::WriterError(format!("Failed to get column {}", col_name))
                })?;

                let value = self.series_value_at(column.as_materialized_series(), row_idx)?;
                row_obj.insert(col_name.to_string(), value);
            }

            values.push(Value::Object(row_obj));
        }

        Ok(values)
    }

    /// Get a single value from a series at a given index as JSON Value
    ///
    /// Nulls and non-finite floats become `null`.
    fn series_value_at(&self, series: &Series, idx: usize) -> Result<Value> {
        use DataType::*;

        match series.dtype() {
            Int32 => {
                let ca = series.i32().map_err(|e| {
                    HealthvizError::WriterError(format!("Failed to cast to i32: {}", e))
                })?;
                Ok(ca.get(idx).map(|v| json!(v)).unwrap_or(Value::Null))
            }
            Int64 => {
                let ca = series.i64().map_err(|e| {
                    HealthvizError::WriterError(format!("Failed to cast to i64: {}", e))
                })?;
                Ok(ca.get(idx).map(|v| json!(v)).unwrap_or(Value::Null))
            }
            UInt32 => {
                let ca = series.u32().map_err(|e| {
                    HealthvizError::WriterError(format!("Failed to cast to u32: {}", e))
                })?;
                Ok(ca.get(idx).map(|v| json!(v)).unwrap_or(Value::Null))
            }
            Float64 => {
                let ca = series.f64().map_err(|e| {
                    HealthvizError::WriterError(format!("Failed to cast to f64: {}", e))
                })?;
                Ok(ca
                    .get(idx)
                    .filter(|v| v.is_finite())
                    .map(|v| json!(v))
                    .unwrap_or(Value::Null))
            }
            Boolean => {
                let ca = series.bool().map_err(|e| {
                    HealthvizError::WriterError(format!("Failed to cast to bool: {}", e))
                })?;
                Ok(ca.get(idx).map(|v| json!(v)).unwrap_or(Value::Null))
            }
            String => {
                let ca = series.str().map_err(|e| {
                    HealthvizError::WriterError(format!("Failed to cast to string: {}", e))
                })?;
                Ok(ca.get(idx).map(|v| json!(v)).unwrap_or(Value::Null))
            }
            Null => Ok(Value::Null),
            _ => {
                // Fallback: convert to string
                Ok(json!(series
                    .get(idx)
                    .map(|v| v.to_string())
                    .unwrap_or_default()))
            }
        }
    }
}

impl Default for VegaLiteWriter {
    fn default() -> Self {
        Self::new()
    }
}

impl Writer for VegaLiteWriter {
    type Output = String;

    fn write(&self, figure: &Figure) -> Result<String> {
        let vl_spec = self.to_value(figure)?;
        serde_json::to_string_pretty(&vl_spec).map_err(|e| {
            HealthvizError::WriterError(format!("Failed to serialize Vega-Lite JSON: {}", e))
        })
    }

    fn validate(&self, figure: &Figure) -> Result<()> {
        for name in figure.chart().datasets() {
            if figure.dataset(name).is_none() {
                return Err(HealthvizError::WriterError(format!(
                    "Chart references missing dataset '{}'",
                    name
                )));
            }
        }

        let rows = figure.row_count();
        if !self.row_limit.allows(rows) {
            return Err(HealthvizError::WriterError(format!(
                "Figure embeds {} rows, which exceeds the row limit ({:?})",
                rows, self.row_limit
            )));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::plot::{layer, Chart, Field, FieldType, Mark, MarkType};

    fn figure() -> Figure {
        let df = df! {
            "YearStart" => &[2011i64, 2012],
            "Stratification1" => &["A", "B"],
            "Growth" => &[Some(0.0), None],
        }
        .unwrap();

        let chart = Chart::new("income")
            .mark(Mark::new(MarkType::Bar))
            .encode("x", Field::new("Growth", FieldType::Quantitative));
        Figure::new(layer(vec![chart]).title("Bars").into()).with_data("income", df)
    }

    #[test]
    fn test_document_structure() {
        let writer = VegaLiteWriter::new();
        let json_str = writer.write(&figure()).unwrap();
        let vl_spec: Value = serde_json::from_str(&json_str).unwrap();

        assert_eq!(
            vl_spec["$schema"],
            "https://vega.github.io/schema/vega-lite/v6.json"
        );
        assert_eq!(vl_spec["title"], "Bars");
        assert_eq!(vl_spec["layer"][0]["data"]["name"], "income");
        assert_eq!(vl_spec["layer"][0]["mark"]["type"], "bar");
    }

    #[test]
    fn test_dataset_values() {
        let writer = VegaLiteWriter::new();
        let vl_spec = writer.to_value(&figure()).unwrap();

        let values = vl_spec["datasets"]["income"].as_array().unwrap();
        assert_eq!(values.len(), 2);
        assert_eq!(values[0]["YearStart"], 2011);
        assert_eq!(values[0]["Stratification1"], "A");
        assert_eq!(values[0]["Growth"], 0.0);
        assert_eq!(values[1]["Growth"], Value::Null);
    }

    #[test]
    fn test_missing_dataset_rejected() {
        let chart = Chart::new("elsewhere").mark(Mark::new(MarkType::Point));
        let figure = Figure::new(chart.into());

        let err = VegaLiteWriter::new().write(&figure).unwrap_err();
        assert!(matches!(err, HealthvizError::WriterError(_)));
    }

    #[test]
    fn test_row_limit() {
        let writer = VegaLiteWriter::new().with_row_limit(RowLimit::Max(1));
        assert!(writer.write(&figure()).is_err());

        let writer = VegaLiteWriter::new().with_row_limit(RowLimit::Max(2));
        assert!(writer.write(&figure()).is_ok());
    }
}
