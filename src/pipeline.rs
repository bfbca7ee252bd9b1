//! Load → build → export, in one pass
//!
//! Every table is loaded before any figure is built, and every figure is built
//! before anything is written. Exports run in a fixed order and stop at the
//! first failure; documents saved before it stay on disk.

use crate::figure::{age_heatmap, income_gap, trend_and_map, Figure};
use crate::reader::{CsvReader, Reader};
use crate::writer::HtmlWriter;
use crate::{naming, Config, Result};
use std::path::PathBuf;

/// Build the three figures from the loaded tables, in export order
pub fn build_figures(reader: &impl Reader) -> Result<Vec<(&'static str, Figure)>> {
    let tables = reader.load()?;

    Ok(vec![
        (naming::AGE_HEATMAP_OUTPUT, age_heatmap(&tables.age)?),
        (naming::TREND_MAP_OUTPUT, trend_and_map(&tables.map)?),
        (naming::INCOME_GAP_OUTPUT, income_gap(&tables.income)?),
    ])
}

/// Run the whole pipeline and return the paths of the saved documents
pub fn run(config: &Config) -> Result<Vec<PathBuf>> {
    let reader = CsvReader::new(&config.data_dir);
    let figures = build_figures(&reader)?;

    let writer = HtmlWriter::new().with_row_limit(config.row_limit);
    let mut saved = Vec::with_capacity(figures.len());
    for (file_name, figure) in &figures {
        let path = config.output_dir.join(file_name);
        writer.save(figure, &path)?;
        saved.push(path);
    }

    Ok(saved)
}
