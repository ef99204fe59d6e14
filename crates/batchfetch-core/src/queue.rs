//! Shared queue of pending jobs.
//!
//! Workers race for jobs through [`JobQueue::claim_one`]. Which job a claim
//! returns is unspecified; the only guarantees are that each
//! job is returned exactly once and that the queue only ever drains.

use std::collections::VecDeque;
use std::sync::{Mutex, MutexGuard};

use crate::job::Job;

/// Mutex-guarded list of pending jobs. Safe to share by reference across worker threads.
#[derive(Debug, Default)]
pub struct JobQueue {
    jobs: Mutex<VecDeque<Job>>,
}

impl JobQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the current contents with `jobs`.
    /// Must happen before any worker starts claiming.
    pub fn populate(&self, jobs: impl IntoIterator<Item = Job>) {
        let mut pending = self.lock();
        pending.clear();
        pending.extend(jobs);
    }

    /// Removes and returns one arbitrary pending job, or `None` when drained.
    /// Selection and removal happen under a single lock acquisition, in O(1).
    pub fn claim_one(&self) -> Option<Job> {
        self.lock().pop_front()
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    // Every mutation is a single deque call, so a poisoned queue is still consistent.
    fn lock(&self) -> MutexGuard<'_, VecDeque<Job>> {
        self.jobs.lock().unwrap_or_else(|e| e.into_inner())
    }
}
