//! Declarative chart model
//!
//! Charts are built as immutable values: every builder method takes `&self`
//! and returns a new chart, so one base chart can be specialized into several
//! layers. Nothing here renders; [`ChartSpec::to_value`] produces the
//! Vega-Lite JSON body that the [`crate::writer`] module wraps into a document.
//!
//! - [`chart`]: units, layers, vertical concatenation, marks and fields
//! - [`selection`]: named hover selections and their evaluation
//! - [`region`]: state abbreviation → FIPS id mapping and boundary lookup

pub mod chart;
pub mod region;
pub mod selection;

pub use chart::{layer, vconcat, Chart, ChartSpec, Field, FieldType, Layer, Mark, MarkType};
pub use region::region_id;
pub use selection::{HoverState, Selection};
