//! Output writer abstraction layer for healthviz
//!
//! The writer module turns a [`Figure`] into output documents.
//!
//! # Architecture
//!
//! All writers implement the `Writer` trait, which provides:
//! - Figure → Output conversion
//! - Validation for writer compatibility
//!
//! [`VegaLiteWriter`] produces the Vega-Lite JSON document; [`HtmlWriter`]
//! wraps it into a standalone page and saves it to disk.
//!
//! # Example
//!
//! ```rust,ignore
//! use healthviz::writer::{HtmlWriter, Writer};
//!
//! let writer = HtmlWriter::new();
//! writer.save(&figure, "age_heatmap.html")?;
//! ```

use crate::{Figure, Result};

pub mod html;
pub mod vegalite;

pub use html::HtmlWriter;
pub use vegalite::VegaLiteWriter;

/// Cap on the number of inline data rows a document may embed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RowLimit {
    /// Embed every row
    #[default]
    Unlimited,
    /// Reject figures whose datasets hold more rows than this in total
    Max(usize),
}

impl RowLimit {
    pub fn allows(&self, rows: usize) -> bool {
        match self {
            RowLimit::Unlimited => true,
            RowLimit::Max(max) => rows <= *max,
        }
    }
}

/// Trait for figure output writers
///
/// # Associated Types
///
/// * `Output` - The type returned by `write()`.
pub trait Writer {
    /// The output type produced by this writer.
    type Output;

    /// Generate output from a figure
    ///
    /// # Errors
    ///
    /// Returns `HealthvizError::WriterError` if:
    /// - The figure is incompatible with this writer
    /// - Output generation fails
    fn write(&self, figure: &Figure) -> Result<Self::Output>;

    /// Validate that a figure is compatible with this writer
    ///
    /// Checks whether the figure can be written without actually generating
    /// output.
    fn validate(&self, figure: &Figure) -> Result<()>;
}
