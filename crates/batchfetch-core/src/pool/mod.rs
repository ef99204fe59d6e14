//! Fixed-size worker pool draining a shared job queue.
//!
//! `Pool::build` → `Pool::load_jobs` → `Pool::start`. `start` runs every worker
//! on its own scoped thread and returns only after all of them have exited.
//! Each job is claimed by exactly one worker; claim order is unspecified.

mod control;
mod error;
mod event;
mod guard;
mod summary;
mod worker;


pub use control::CancelToken;
pub use error::{JobError, PoolError};
pub use event::JobEvent;
pub use summary::{JobFailure, RunSummary};
pub use worker::Worker;

use std::sync::atomic::AtomicUsize;
use std::sync::mpsc::Sender;

use serde::{Deserialize, Serialize};

use crate::fetch::Fetcher;
use crate::job::Job;
use crate::queue::JobQueue;
use crate::storage::OutputDir;

use control::FailureLog;
use worker::RunContext;

/// What a worker does when one of its jobs fails.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum FailurePolicy {
    /// Record the failure, cancel the run, and return it as `PoolError::JobFailed`.
    #[default]
    FailFast,
    /// Record the failure and keep draining; failures are listed in the `RunSummary`.
    Continue,
}

/// Owns the job queue and the workers for one batch run.
pub struct Pool<F> {
    queue: JobQueue,
    workers: Vec<Worker>,
    fetcher: F,
    output: OutputDir,
    policy: FailurePolicy,
    cancel: CancelToken,
    events: Option<Sender<JobEvent>>,
}

impl<F: Fetcher> Pool<F> {
    /// Creates `worker_count` workers numbered `0..worker_count`.
    /// A pool with zero workers is valid and does nothing when started.
    pub fn build(worker_count: usize, fetcher: F, output: OutputDir) -> Self {
        Self {
            queue: JobQueue::new(),
            workers: (0..worker_count).map(Worker::new).collect(),
            fetcher,
            output,
            policy: FailurePolicy::default(),
            cancel: CancelToken::new(),
            events: None,
        }
    }

    pub fn with_failure_policy(mut self, policy: FailurePolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Sends a [`JobEvent`] for every job start and end to `tx`.
    pub fn with_events(mut self, tx: Sender<JobEvent>) -> Self {
        self.events = Some(tx);
        self
    }

    /// Turns `locations` into jobs (id = position) and replaces the queue contents.
    /// Returns the number of jobs loaded.
    pub fn load_jobs<I, S>(&mut self, locations: I) -> usize
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let jobs = Job::from_locations(locations);
        let n = jobs.len();
        self.queue.populate(jobs);
        tracing::debug!(jobs = n, "loaded jobs");
        n
    }

    pub fn workers(&self) -> &[Worker] {
        &self.workers
    }

    /// Jobs not yet claimed.
    pub fn pending(&self) -> usize {
        self.queue.len()
    }

    pub fn policy(&self) -> FailurePolicy {
        self.policy
    }

    pub fn fetcher(&self) -> &F {
        &self.fetcher
    }

    /// Handle for cancelling the run from another thread. Workers stop claiming
    /// once it is set; in-flight jobs finish.
    pub fn cancel_handle(&self) -> CancelToken {
        self.cancel.clone()
    }

    /// Runs all workers concurrently and blocks until every one has exited.
    ///
    /// Under [`FailurePolicy::FailFast`] the first recorded job failure is
    /// returned as an error once all workers have joined.
    pub fn start(&self) -> Result<RunSummary, PoolError> {
        let total = self.queue.len();
        if self.workers.is_empty() {
            tracing::warn!(pending = total, "pool has no workers, nothing to run");
            return Ok(RunSummary {
                unclaimed: total,
                cancelled: self.cancel.is_cancelled(),
                ..RunSummary::default()
            });
        }
        tracing::info!(
            workers = self.workers.len(),
            jobs = total,
            policy = ?self.policy,
            "starting pool"
        );

        let failures = FailureLog::default();
        let active = AtomicUsize::new(0);
        let ctx = RunContext {
            queue: &self.queue,
            fetcher: &self.fetcher,
            output: &self.output,
            policy: self.policy,
            cancel: &self.cancel,
            failures: &failures,
            active: &active,
        };

        let mut spawn_err = None;
        let mut completed = Vec::with_capacity(total);
        let mut panicked = None;
        std::thread::scope(|s| {
            let mut handles = Vec::with_capacity(self.workers.len());
            for worker in &self.workers {
                let ctx = &ctx;
                let events = self.events.clone();
                let spawned = std::thread::Builder::new()
                    .name(format!("batchfetch-worker-{}", worker.id()))
                    .spawn_scoped(s, move || worker.run(ctx, events));
                match spawned {
                    Ok(handle) => handles.push((worker.id(), handle)),
                    Err(source) => {
                        tracing::error!(worker = worker.id(), "failed to spawn worker: {}", source);
                        self.cancel.cancel();
                        spawn_err = Some(PoolError::Spawn {
                            worker_id: worker.id(),
                            source,
                        });
                        break;
                    }
                }
            }
            for (worker_id, handle) in handles {
                match handle.join() {
                    Ok(report) => completed.extend(report.completed),
                    Err(_) => {
                        panicked.get_or_insert(PoolError::WorkerPanicked { worker_id });
                    }
                }
            }
        });

        completed.sort_unstable();
        let mut summary = RunSummary {
            completed,
            failed: failures.into_inner(),
            unclaimed: self.queue.len(),
            cancelled: self.cancel.is_cancelled(),
        };
        tracing::info!(
            completed = summary.completed.len(),
            failed = summary.failed.len(),
            unclaimed = summary.unclaimed,
            cancelled = summary.cancelled,
            "pool finished"
        );

        if let Some(e) = spawn_err.or(panicked) {
            return Err(e);
        }
        if self.policy == FailurePolicy::FailFast && !summary.failed.is_empty() {
            let first = summary.failed.remove(0);
            for other in &summary.failed {
                tracing::warn!(
                    worker = other.worker_id,
                    job = other.job_id,
                    location = %other.location,
                    "additional failure while cancelling: {}",
                    other.error
                );
            }
            return Err(PoolError::JobFailed {
                job_id: first.job_id,
                location: first.location,
                worker_id: first.worker_id,
                source: first.error,
            });
        }
        Ok(summary)
    }
}
