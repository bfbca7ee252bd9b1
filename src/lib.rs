//! # healthviz - obesity survey tables to interactive charts
//!
//! Reads three cleaned survey tables and turns each one into a standalone,
//! interactive Vega-Lite document.
//!
//! ## Pipeline
//!
//! ```text
//! Data/*.csv ──► reader ──► aggregate ──► figure ──► writer ──► *.html
//! ```
//!
//! - [`reader`] - CSV loading and typed row extraction
//! - [`aggregate`] - sample-size weighted means, per-year means, growth joins
//! - [`plot`] - immutable Vega-Lite chart builders, hover selections, region ids
//! - [`figure`] - the three chart builders (age heatmap, trend + map, income gap)
//! - [`writer`] - Vega-Lite JSON and standalone HTML output
//! - [`pipeline`] - load, build and export in one pass
//!
//! ## Example
//!
//! ```rust,ignore
//! use healthviz::{pipeline, Config};
//!
//! let config = Config::default();
//! let saved = pipeline::run(&config)?;
//! ```

pub mod aggregate;
pub mod config;
pub mod figure;
pub mod naming;
pub mod pipeline;
pub mod plot;
pub mod reader;
pub mod writer;

// Re-export key types for convenience
pub use config::Config;
pub use figure::Figure;
pub use plot::{Chart, ChartSpec, HoverState, Selection};
pub use writer::{HtmlWriter, RowLimit, VegaLiteWriter, Writer};

// DataFrame abstraction (wraps Polars)
pub use polars::prelude::DataFrame;

use std::path::PathBuf;

/// Main library error type
#[derive(thiserror::Error, Debug)]
pub enum HealthvizError {
    #[error("Input file not found: {}", .0.display())]
    InputMissing(PathBuf),

    #[error("Parse error: {0}")]
    ParseError(String),

    #[error("Schema error: {0}")]
    SchemaError(String),

    #[error("Chart construction error: {0}")]
    BuildError(String),

    #[error("Output generation error: {0}")]
    WriterError(String),

    #[error("Export error: {0}")]
    ExportError(String),
}

pub type Result<T> = std::result::Result<T, HealthvizError>;

/// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[cfg(test)]
mod integration_tests {
    use super::*;
    use std::fs;
    use std::path::Path;

    fn write_inputs(dir: &Path) {
        let data = dir.join(naming::DATA_DIR);
        fs::create_dir_all(&data).unwrap();
        fs::write(
            data.join(naming::MAP_FILE),
            "YearStart,LocationAbbr,LocationDesc,Data_Value\n\
             2011,AL,Alabama,32.0\n\
             2011,ZZ,Nowhere,99.0\n\
             2013,AL,Alabama,33.5\n\
             2013,CA,California,24.1\n",
        )
        .unwrap();
        fs::write(
            data.join(naming::AGE_FILE),
            "YearStart,Stratification1,Data_Value,Sample_Size\n\
             2015,18 - 24,28.0,100\n\
             2015,18 - 24,32.0,300\n\
             2015,65 or older,27.0,~\n",
        )
        .unwrap();
        fs::write(
            data.join(naming::INCOME_FILE),
            "YearStart,Stratification1,Data_Value,Sample_Size\n\
             2011,\"Less than $15,000\",30.0,500\n\
             2015,\"Less than $15,000\",33.5,450\n",
        )
        .unwrap();
    }

    #[test]
    fn test_end_to_end_writes_all_documents() {
        let tmp = tempfile::tempdir().unwrap();
        write_inputs(tmp.path());

        let config = Config {
            data_dir: tmp.path().join(naming::DATA_DIR),
            output_dir: tmp.path().to_path_buf(),
            row_limit: RowLimit::Unlimited,
        };
        let saved = pipeline::run(&config).unwrap();

        assert_eq!(saved.len(), 3);
        for name in naming::OUTPUT_FILES {
            let html = fs::read_to_string(tmp.path().join(name)).unwrap();
            assert!(html.contains("vegaEmbed"), "{} is not an embed page", name);
        }

        // The unknown region never reaches the map dataset
        let trend_map = fs::read_to_string(tmp.path().join(naming::TREND_MAP_OUTPUT)).unwrap();
        assert!(trend_map.contains("Alabama"));
        assert!(!trend_map.contains("Nowhere"));
    }

    #[test]
    fn test_end_to_end_missing_input_aborts() {
        let tmp = tempfile::tempdir().unwrap();
        write_inputs(tmp.path());
        fs::remove_file(tmp.path().join(naming::DATA_DIR).join(naming::INCOME_FILE)).unwrap();

        let config = Config {
            data_dir: tmp.path().join(naming::DATA_DIR),
            output_dir: tmp.path().to_path_buf(),
            row_limit: RowLimit::Unlimited,
        };
        let err = pipeline::run(&config).unwrap_err();

        assert!(matches!(err, HealthvizError::InputMissing(_)));
        // Nothing was exported before loading failed
        assert!(!tmp.path().join(naming::AGE_HEATMAP_OUTPUT).exists());
    }

    #[test]
    fn test_end_to_end_row_limit_stops_export() {
        let tmp = tempfile::tempdir().unwrap();
        write_inputs(tmp.path());

        let config = Config {
            data_dir: tmp.path().join(naming::DATA_DIR),
            output_dir: tmp.path().to_path_buf(),
            row_limit: RowLimit::Max(0),
        };
        let err = pipeline::run(&config).unwrap_err();

        assert!(matches!(err, HealthvizError::WriterError(_)));
    }

    #[test]
    fn test_end_to_end_unparseable_input_aborts() {
        let tmp = tempfile::tempdir().unwrap();
        write_inputs(tmp.path());
        fs::write(tmp.path().join(naming::DATA_DIR).join(naming::INCOME_FILE), "").unwrap();

        let config = Config {
            data_dir: tmp.path().join(naming::DATA_DIR),
            output_dir: tmp.path().to_path_buf(),
            row_limit: RowLimit::Unlimited,
        };
        let err = pipeline::run(&config).unwrap_err();

        assert!(matches!(err, HealthvizError::ParseError(_)));
        for name in naming::OUTPUT_FILES {
            assert!(!tmp.path().join(name).exists(), "{} was written", name);
        }
    }

    #[test]
    fn test_end_to_end_export_failure_keeps_earlier_documents() {
        let tmp = tempfile::tempdir().unwrap();
        write_inputs(tmp.path());
        // A directory in place of the second document makes its write fail
        fs::create_dir(tmp.path().join(naming::TREND_MAP_OUTPUT)).unwrap();

        let config = Config {
            data_dir: tmp.path().join(naming::DATA_DIR),
            output_dir: tmp.path().to_path_buf(),
            row_limit: RowLimit::Unlimited,
        };
        let err = pipeline::run(&config).unwrap_err();

        assert!(matches!(err, HealthvizError::ExportError(_)));
        let age = fs::read_to_string(tmp.path().join(naming::AGE_HEATMAP_OUTPUT)).unwrap();
        assert!(age.contains("vegaEmbed"));
        assert!(!tmp.path().join(naming::INCOME_GAP_OUTPUT).exists());
    }
}
