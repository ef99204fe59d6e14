//! Worker run loop: claim, process, repeat until the queue is drained.

use std::sync::atomic::AtomicUsize;
use std::sync::mpsc::Sender;

use crate::fetch::Fetcher;
use crate::job::{Job, JobId};
use crate::queue::JobQueue;
use crate::storage::OutputDir;

use super::control::{CancelToken, FailureLog};
use super::error::JobError;
use super::event::JobEvent;
use super::guard::WorkerGuard;
use super::summary::JobFailure;
use super::FailurePolicy;

/// Everything a worker borrows from the pool for one run.
pub(super) struct RunContext<'a, F> {
    pub(super) queue: &'a JobQueue,
    pub(super) fetcher: &'a F,
    pub(super) output: &'a OutputDir,
    pub(super) policy: FailurePolicy,
    pub(super) cancel: &'a CancelToken,
    pub(super) failures: &'a FailureLog,
    pub(super) active: &'a AtomicUsize,
}

/// Jobs a worker finished successfully.
#[derive(Debug)]
pub(super) struct WorkerReport {
    pub(super) completed: Vec<JobId>,
}

/// A logical actor identified by `id`. Holds no state between jobs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Worker {
    id: usize,
}

impl Worker {
    pub fn new(id: usize) -> Self {
        Self { id }
    }

    pub fn id(&self) -> usize {
        self.id
    }

    /// Claims and processes jobs until the queue is empty or the run is cancelled.
    /// Seeing an empty queue ends the loop for good: the queue never refills.
    pub(super) fn run<F: Fetcher>(
        &self,
        ctx: &RunContext<'_, F>,
        events: Option<Sender<JobEvent>>,
    ) -> WorkerReport {
        let _guard = WorkerGuard::enter(self.id, ctx.active, ctx.cancel);
        let emit = |event: JobEvent| {
            if let Some(tx) = &events {
                let _ = tx.send(event);
            }
        };
        let mut report = WorkerReport {
            completed: Vec::new(),
        };

        loop {
            if ctx.cancel.is_cancelled() {
                tracing::debug!(worker = self.id, "run cancelled, not claiming further jobs");
                break;
            }
            let Some(job) = ctx.queue.claim_one() else {
                tracing::debug!(worker = self.id, "queue drained");
                break;
            };

            tracing::info!(worker = self.id, job = job.id, location = %job.location, "downloading");
            emit(JobEvent::Started {
                worker_id: self.id,
                job_id: job.id,
                location: job.location.clone(),
            });

            match self.process_job(&job, ctx.fetcher, ctx.output) {
                Ok(bytes) => {
                    tracing::info!(
                        worker = self.id,
                        job = job.id,
                        location = %job.location,
                        bytes,
                        "completed"
                    );
                    emit(JobEvent::Completed {
                        worker_id: self.id,
                        job_id: job.id,
                        location: job.location.clone(),
                        bytes,
                    });
                    report.completed.push(job.id);
                }
                Err(error) => {
                    tracing::error!(
                        worker = self.id,
                        job = job.id,
                        location = %job.location,
                        "job failed: {}",
                        error
                    );
                    emit(JobEvent::Failed {
                        worker_id: self.id,
                        job_id: job.id,
                        location: job.location.clone(),
                        error: error.to_string(),
                    });
                    ctx.failures.record(JobFailure {
                        job_id: job.id,
                        location: job.location,
                        worker_id: self.id,
                        error,
                    });
                    if ctx.policy == FailurePolicy::FailFast {
                        ctx.cancel.cancel();
                        break;
                    }
                }
            }
        }
        report
    }

    /// Fetches `job.location` into `<output>/<id>.<ext>`. On any error the
    /// partial output is removed when the part file is dropped.
    fn process_job<F: Fetcher>(
        &self,
        job: &Job,
        fetcher: &F,
        output: &OutputDir,
    ) -> Result<u64, JobError> {
        let mut part = output.create(job.id)?;
        let bytes = fetcher.fetch(&job.location, &mut part)?;
        part.finalize()?;
        Ok(bytes)
    }
}
