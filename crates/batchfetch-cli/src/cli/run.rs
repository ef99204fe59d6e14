//! `batchfetch <INPUT>`: load the manifest, drain it through the pool, report.

use anyhow::{Context, Result};
use batchfetch_core::config::BatchConfig;
use batchfetch_core::fetch::CurlFetcher;
use batchfetch_core::manifest::Manifest;
use batchfetch_core::pool::{JobEvent, Pool, RunSummary};
use batchfetch_core::storage::OutputDir;
use std::path::Path;
use std::sync::mpsc;
use std::time::Instant;

pub fn run_batch(input: &Path, cfg: &BatchConfig) -> Result<RunSummary> {
    let manifest = Manifest::load(input)?;
    let output = OutputDir::open(&cfg.output_dir, cfg.extension.as_str())?;
    let total = manifest.urls.len();

    let (event_tx, event_rx) = mpsc::channel::<JobEvent>();
    let printer = std::thread::Builder::new()
        .name("batchfetch-progress".into())
        .spawn(move || {
            for event in event_rx {
                println!("{}", event);
            }
        })
        .context("failed to spawn progress printer")?;

    let mut pool = Pool::build(cfg.workers, CurlFetcher::new(cfg.curl_options()), output)
        .with_failure_policy(cfg.failure_policy)
        .with_events(event_tx);
    pool.load_jobs(manifest.urls);

    let started = Instant::now();
    let result = pool.start();
    // Dropping the pool closes the event channel so the printer drains and exits.
    drop(pool);
    let _ = printer.join();
    let summary = result?;

    if !summary.failed.is_empty() {
        for f in &summary.failed {
            eprintln!("  job #{} ({}): {}", f.job_id, f.location, f.error);
        }
        anyhow::bail!("{} of {} job(s) failed", summary.failed.len(), total);
    }

    tracing::info!(
        jobs = summary.completed.len(),
        elapsed_ms = started.elapsed().as_millis() as u64,
        "batch completed"
    );
    if total == 0 {
        println!("No URLs in {}.", input.display());
    } else {
        println!(
            "Downloaded {} of {} file(s) to {}",
            summary.completed.len(),
            total,
            cfg.output_dir.display()
        );
    }
    Ok(summary)
}
