//! CLI for batchfetch.

mod run;

use anyhow::{Context, Result};
use batchfetch_core::config::{self, BatchConfig};
use batchfetch_core::pool::FailurePolicy;
use clap::Parser;
use std::path::PathBuf;

pub use run::run_batch;

/// Download every URL listed in a JSON manifest using a fixed pool of workers.
#[derive(Debug, Parser)]
#[command(name = "batchfetch")]
#[command(about = "batchfetch: download a list of URLs with a fixed worker pool", long_about = None)]
pub struct Cli {
    /// Path to the JSON manifest, e.g. {"urls": ["https://host/1.jpg"]}.
    pub input: PathBuf,

    /// Number of concurrent workers (overrides config).
    #[arg(short, long, value_name = "N", value_parser = clap::value_parser!(u32).range(1..))]
    pub workers: Option<u32>,

    /// Existing directory that receives `<id>.<ext>` files (overrides config).
    #[arg(short, long, value_name = "DIR")]
    pub output_dir: Option<PathBuf>,

    /// Extension for output files (overrides config).
    #[arg(long, value_name = "EXT")]
    pub ext: Option<String>,

    /// Keep downloading after a job fails; report every failure at the end.
    #[arg(long)]
    pub keep_going: bool,
}

impl Cli {
    /// Config file values with command-line overrides applied.
    pub fn apply(&self, mut cfg: BatchConfig) -> BatchConfig {
        if let Some(n) = self.workers {
            cfg.workers = n as usize;
        }
        if let Some(dir) = &self.output_dir {
            cfg.output_dir = dir.clone();
        }
        if let Some(ext) = &self.ext {
            cfg.extension = ext.clone();
        }
        if self.keep_going {
            cfg.failure_policy = FailurePolicy::Continue;
        }
        cfg
    }

    pub fn run_from_args() -> Result<()> {
        let cli = Cli::parse();
        let cfg = config::load_or_init().context("failed to load config")?;
        tracing::debug!("loaded config: {:?}", cfg);
        let cfg = cli.apply(cfg);

        run_batch(&cli.input, &cfg)?;
        Ok(())
    }
}
