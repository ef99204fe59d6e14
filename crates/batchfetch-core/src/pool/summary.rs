//! Outcome of a pool run.

use super::error::JobError;
use crate::job::JobId;

/// A job that was claimed but did not produce its output.
#[derive(Debug)]
pub struct JobFailure {
    pub job_id: JobId,
    pub location: String,
    pub worker_id: usize,
    pub error: JobError,
}

/// What a completed `Pool::start` did.
#[derive(Debug, Default)]
pub struct RunSummary {
    /// Ids whose output was finalized, ascending.
    pub completed: Vec<JobId>,
    /// Failures in the order workers recorded them.
    pub failed: Vec<JobFailure>,
    /// Jobs still in the queue when the last worker exited.
    pub unclaimed: usize,
    /// Whether the run was cancelled (externally or by a fail-fast failure).
    pub cancelled: bool,
}

impl RunSummary {
    /// Number of jobs claimed by some worker.
    pub fn processed(&self) -> usize {
        self.completed.len() + self.failed.len()
    }

    pub fn is_success(&self) -> bool {
        self.failed.is_empty() && self.unclaimed == 0 && !self.cancelled
    }
}
