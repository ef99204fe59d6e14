//! RAII guard marking a worker as active for the lifetime of its run loop.

use std::sync::atomic::{AtomicUsize, Ordering};

use super::control::CancelToken;

/// Counts the worker in on creation and out on drop, including during unwinding.
/// A worker that panics also cancels the run so its peers stop claiming.
pub(super) struct WorkerGuard<'a> {
    worker_id: usize,
    active: &'a AtomicUsize,
    cancel: &'a CancelToken,
}

impl<'a> WorkerGuard<'a> {
    pub(super) fn enter(worker_id: usize, active: &'a AtomicUsize, cancel: &'a CancelToken) -> Self {
        active.fetch_add(1, Ordering::AcqRel);
        Self {
            worker_id,
            active,
            cancel,
        }
    }
}

impl Drop for WorkerGuard<'_> {
    fn drop(&mut self) {
        if std::thread::panicking() {
            tracing::error!(worker = self.worker_id, "worker panicked; cancelling run");
            self.cancel.cancel();
        }
        let still_active = self.active.fetch_sub(1, Ordering::AcqRel) - 1;
        tracing::debug!(worker = self.worker_id, still_active, "worker exited");
        if still_active == 0 {
            tracing::debug!("all workers exited");
        }
    }
}
