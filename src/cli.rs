/*!
healthviz Command Line Interface

Builds the age heatmap, the trend + map view and the income view from the
cleaned tables and saves them as standalone HTML documents.
*/

use clap::Parser;
use healthviz::writer::RowLimit;
use healthviz::{naming, pipeline, Config, VERSION};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "healthviz")]
#[command(about = "Interactive obesity charts from cleaned survey tables")]
#[command(version = VERSION)]
pub struct Cli {
    /// Directory holding clean_map.csv, clean_heatmap.csv and clean_income.csv
    #[arg(long, default_value = naming::DATA_DIR)]
    data_dir: PathBuf,

    /// Directory the HTML documents are written to
    #[arg(long, default_value = ".")]
    output_dir: PathBuf,

    /// Maximum number of data rows embedded per document (default: unlimited)
    #[arg(long)]
    max_rows: Option<usize>,
}

impl Cli {
    fn into_config(self) -> Config {
        Config {
            data_dir: self.data_dir,
            output_dir: self.output_dir,
            row_limit: self.max_rows.map_or(RowLimit::Unlimited, RowLimit::Max),
        }
    }
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let config = Cli::parse().into_config();
    tracing::debug!(?config, "Starting");

    let saved = pipeline::run(&config)?;

    let names: Vec<String> = saved
        .iter()
        .filter_map(|p| p.file_name())
        .map(|n| n.to_string_lossy().into_owned())
        .collect();
    println!("Saved: {}", names.join(", "));

    Ok(())
}
