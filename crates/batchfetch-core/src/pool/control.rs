//! Run control shared by all workers: cancellation token and failure log.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

use super::summary::JobFailure;

/// Cooperative cancellation flag. Once set, workers stop claiming new jobs;
/// a job already in flight runs to completion.
#[derive(Debug, Clone, Default)]
pub struct CancelToken(Arc<AtomicBool>);

impl CancelToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.0.store(true, Ordering::Release);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::Acquire)
    }
}

/// Failures recorded by workers, in the order they were recorded.
#[derive(Debug, Default)]
pub(super) struct FailureLog {
    failures: Mutex<Vec<JobFailure>>,
}

impl FailureLog {
    pub(super) fn record(&self, failure: JobFailure) {
        self.failures
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .push(failure);
    }

    pub(super) fn into_inner(self) -> Vec<JobFailure> {
        self.failures.into_inner().unwrap_or_else(|e| e.into_inner())
    }
}
