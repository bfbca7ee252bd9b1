//! Centralized naming conventions for input columns, derived columns,
//! dataset keys, selection params and file names.
//!
//! # Categories
//!
//! - **Input columns**: fixed by the upstream cleaning step (`YearStart`, `Data_Value`, ...)
//! - **Derived columns**: produced by aggregation (`year`, `obesity_rate`, `Base_2011`, ...)
//! - **Dataset keys**: names of inline datasets inside a Vega-Lite document
//! - **Params**: names of hover selections
//! - **Files**: input tables and output documents

use const_format::concatcp;

// ============================================================================
// Input Columns
// ============================================================================

pub const YEAR_START: &str = "YearStart";
pub const LOCATION_ABBR: &str = "LocationAbbr";
pub const LOCATION_DESC: &str = "LocationDesc";
pub const DATA_VALUE: &str = "Data_Value";
pub const SAMPLE_SIZE: &str = "Sample_Size";
/// Age band or income band, depending on the table
pub const STRATIFICATION: &str = "Stratification1";

// ============================================================================
// Derived Columns
// ============================================================================

/// Reference year for growth computations
pub const BASELINE_YEAR: i64 = 2011;

pub const YEAR: &str = "year";
pub const AGE_GROUP: &str = "age_group";
pub const OBESITY_RATE: &str = "obesity_rate";
/// Unweighted national mean per year
pub const NATIONAL_RATE: &str = "national_rate";
/// Numeric region identifier joined against boundary geometry
pub const REGION_ID: &str = "id";
/// Baseline rate column: `Base_2011`
pub const BASELINE_RATE: &str = concatcp!("Base_", BASELINE_YEAR);
pub const GROWTH: &str = "Growth";

// ============================================================================
// Dataset Keys
// ============================================================================

const DATASET_PREFIX: &str = "healthviz_";

pub const AGE_DATASET: &str = concatcp!(DATASET_PREFIX, "age");
pub const TREND_DATASET: &str = concatcp!(DATASET_PREFIX, "trend");
pub const MAP_DATASET: &str = concatcp!(DATASET_PREFIX, "map");
pub const INCOME_DATASET: &str = concatcp!(DATASET_PREFIX, "income");

// ============================================================================
// Selection Params
// ============================================================================

pub const HOVER_YEAR: &str = "hover_year";
pub const HOVER_INCOME: &str = "hover_inc";

// ============================================================================
// Files
// ============================================================================

/// Default directory holding the cleaned input tables
pub const DATA_DIR: &str = "Data";

pub const MAP_FILE: &str = "clean_map.csv";
pub const AGE_FILE: &str = "clean_heatmap.csv";
pub const INCOME_FILE: &str = "clean_income.csv";

pub const AGE_HEATMAP_OUTPUT: &str = "age_heatmap.html";
pub const TREND_MAP_OUTPUT: &str = "trend_map.html";
pub const INCOME_GAP_OUTPUT: &str = "income_gap.html";

/// Output documents in export order
pub const OUTPUT_FILES: [&str; 3] = [AGE_HEATMAP_OUTPUT, TREND_MAP_OUTPUT, INCOME_GAP_OUTPUT];
