//! Data source abstraction layer for healthviz
//!
//! The reader module loads the three cleaned survey tables into Polars
//! DataFrames and extracts typed rows from them.
//!
//! # Architecture
//!
//! All readers implement the `Reader` trait, which provides:
//! - Table name → DataFrame loading
//! - A `load()` entry point that fetches all three tables at once
//!
//! Readers do no schema validation. Missing columns surface as
//! `HealthvizError::SchemaError` when rows are extracted in [`observation`].
//!
//! # Example
//!
//! ```rust,ignore
//! use healthviz::reader::{CsvReader, Reader};
//!
//! let reader = CsvReader::new("Data");
//! let tables = reader.load()?;
//! println!("{} map rows", tables.map.height());
//! ```

use crate::{naming, DataFrame, Result};

pub mod csv;
pub mod observation;

pub use csv::CsvReader;
pub use observation::{Extraction, RegionalRow, StratifiedRow};

/// The three input tables of the pipeline
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TableName {
    /// Table A: per-state rates (YearStart, LocationAbbr, LocationDesc, Data_Value)
    Map,
    /// Table B: age-band rates (YearStart, Stratification1, Data_Value, Sample_Size)
    Age,
    /// Table C: income-band rates (YearStart, Stratification1, Data_Value, Sample_Size)
    Income,
}

impl TableName {
    pub const ALL: [TableName; 3] = [TableName::Map, TableName::Age, TableName::Income];

    /// File name of the table inside the data directory
    pub fn file_name(&self) -> &'static str {
        match self {
            TableName::Map => naming::MAP_FILE,
            TableName::Age => naming::AGE_FILE,
            TableName::Income => naming::INCOME_FILE,
        }
    }
}

impl std::fmt::Display for TableName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            TableName::Map => "map",
            TableName::Age => "age",
            TableName::Income => "income",
        };
        write!(f, "{}", s)
    }
}

/// Loaded input tables
#[derive(Debug, Clone)]
pub struct Tables {
    pub map: DataFrame,
    pub age: DataFrame,
    pub income: DataFrame,
}

/// Trait for table readers
pub trait Reader {
    /// Read a single table
    ///
    /// # Errors
    ///
    /// Returns `HealthvizError::InputMissing` if the table's source does not
    /// exist, and `HealthvizError::ParseError` if it is not delimited text.
    fn read_table(&self, table: TableName) -> Result<DataFrame>;

    /// Check that every table's source exists before anything is parsed
    fn ensure_available(&self) -> Result<()> {
        Ok(())
    }

    /// Read all three tables
    fn load(&self) -> Result<Tables> {
        self.ensure_available()?;
        Ok(Tables {
            map: self.read_table(TableName::Map)?,
            age: self.read_table(TableName::Age)?,
            income: self.read_table(TableName::Income)?,
        })
    }
}
