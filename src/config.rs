//! Run configuration
//!
//! Defaults reproduce the fixed layout: tables under `Data/`, documents
//! written to the working directory, no cap on embedded rows.

use crate::naming;
use crate::writer::RowLimit;
use std::path::PathBuf;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Directory holding the three cleaned tables
    pub data_dir: PathBuf,
    /// Directory the HTML documents are written to
    pub output_dir: PathBuf,
    pub row_limit: RowLimit,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from(naming::DATA_DIR),
            output_dir: PathBuf::from("."),
            row_limit: RowLimit::Unlimited,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.data_dir, PathBuf::from("Data"));
        assert_eq!(config.output_dir, PathBuf::from("."));
        assert_eq!(config.row_limit, RowLimit::Unlimited);
    }
}
