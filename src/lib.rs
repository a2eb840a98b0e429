#![allow(clippy::type_complexity)]

// Core modules
pub mod analysis;
pub mod config;
pub mod data;
pub mod display;
pub mod domain;
pub mod engine;
pub mod error;
pub mod models;
pub mod utils;

// Re-export commonly used types outside of crate (for the binaries and tests)
pub use {
    config::Preset,
    data::{BarSource, CsvBarSource, JsonRecordsSource},
    display::{ComponentArgs, DisplayBoundary, JsonFileBoundary},
    domain::Bar,
    engine::{PipelineSpec, run_pipeline},
    error::{ChartError, ChartResult},
    models::{ChartPayload, DataTable},
};

// CLI argument parsing
use {clap::Parser, std::path::PathBuf};

#[derive(Parser, Debug, Clone)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Day bars to chart (.csv, or .json records)
    #[arg(long)]
    pub bars: PathBuf,

    /// Built-in chart arrangement
    #[arg(long, value_enum, default_value_t = Preset::Multipane, conflicts_with = "spec")]
    pub preset: Preset,

    /// JSON pipeline spec to use instead of a preset
    #[arg(long)]
    pub spec: Option<PathBuf>,

    /// Symbol shown in titles and watermarks
    #[arg(long, default_value = "AAPL")]
    pub symbol: String,

    /// Widget key; defaults to the pipeline's own key
    #[arg(long)]
    pub key: Option<String>,

    /// Where to write the payload (stdout if omitted)
    #[arg(long)]
    pub out: Option<PathBuf>,
}

impl Cli {
    pub fn pipeline_spec(&self) -> anyhow::Result<PipelineSpec> {
        use anyhow::Context;

        match &self.spec {
            Some(path) => {
                let text = std::fs::read_to_string(path)
                    .with_context(|| format!("reading spec {}", path.display()))?;
                PipelineSpec::from_json(&text)
                    .with_context(|| format!("parsing spec {}", path.display()))
            }
            None => Ok(self.preset.spec(&self.symbol)),
        }
    }
}
