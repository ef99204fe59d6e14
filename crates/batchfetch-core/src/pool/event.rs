//! Per-job progress notifications sent by workers.

use std::fmt;

use crate::job::JobId;

/// Start/end notification for one job. Observability only: nothing in the
/// pool depends on these being received.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum JobEvent {
    Started {
        worker_id: usize,
        job_id: JobId,
        location: String,
    },
    Completed {
        worker_id: usize,
        job_id: JobId,
        location: String,
        bytes: u64,
    },
    Failed {
        worker_id: usize,
        job_id: JobId,
        location: String,
        error: String,
    },
}

impl JobEvent {
    pub fn worker_id(&self) -> usize {
        match self {
            JobEvent::Started { worker_id, .. }
            | JobEvent::Completed { worker_id, .. }
            | JobEvent::Failed { worker_id, .. } => *worker_id,
        }
    }

    pub fn job_id(&self) -> JobId {
        match self {
            JobEvent::Started { job_id, .. }
            | JobEvent::Completed { job_id, .. }
            | JobEvent::Failed { job_id, .. } => *job_id,
        }
    }
}

impl fmt::Display for JobEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            JobEvent::Started {
                worker_id,
                job_id,
                location,
            } => write!(f, "worker #{} - Downloading job #{} - {}", worker_id, job_id, location),
            JobEvent::Completed {
                worker_id,
                job_id,
                location,
                ..
            } => write!(f, "worker #{} - Completed job #{} - {}", worker_id, job_id, location),
            JobEvent::Failed {
                worker_id,
                job_id,
                location,
                error,
            } => write!(
                f,
                "worker #{} - Failed job #{} - {}: {}",
                worker_id, job_id, location, error
            ),
        }
    }
}
