//! CSV directory reader
//!
//! Reads the cleaned tables from a base directory using Polars' CSV reader.

use crate::reader::{Reader, TableName};
use crate::{DataFrame, HealthvizError, Result};
use polars::prelude::*;
use std::path::{Path, PathBuf};

/// Reader for the comma-delimited tables in a data directory
///
/// Every column is read as text. Numeric coercion happens during row
/// extraction so that unparseable cells turn into excluded rows instead of
/// failing the whole file.
pub struct CsvReader {
    base_dir: PathBuf,
}

impl CsvReader {
    pub fn new(base_dir: impl Into<PathBuf>) -> Self {
        Self {
            base_dir: base_dir.into(),
        }
    }

    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }

    /// Full path of a table inside the base directory
    pub fn table_path(&self, table: TableName) -> PathBuf {
        self.base_dir.join(table.file_name())
    }

    fn read_csv(path: &Path) -> Result<DataFrame> {
        CsvReadOptions::default()
            .with_has_header(true)
            // Read everything as String; coercion is per column later on
            .with_infer_schema_length(Some(0))
            .try_into_reader_with_file_path(Some(path.to_path_buf()))
            .and_then(|reader| reader.finish())
            .map_err(|e| {
                HealthvizError::ParseError(format!("Failed to parse '{}': {}", path.display(), e))
            })
    }
}

impl Reader for CsvReader {
    fn read_table(&self, table: TableName) -> Result<DataFrame> {
        let path = self.table_path(table);
        if !path.is_file() {
            return Err(HealthvizError::InputMissing(path));
        }

        let df = Self::read_csv(&path)?;
        tracing::debug!(
            table = %table,
            rows = df.height(),
            columns = df.width(),
            "Loaded {}",
            path.display()
        );
        Ok(df)
    }

    fn ensure_available(&self) -> Result<()> {
        for table in TableName::ALL {
            let path = self.table_path(table);
            if !path.is_file() {
                return Err(HealthvizError::InputMissing(path));
            }
        }
        Ok(())
    }
}
