//! Errors surfaced by a pool run.

use crate::fetch::FetchError;
use crate::job::JobId;
use crate::storage::StorageError;

/// Why a single job failed.
#[derive(Debug, thiserror::Error)]
pub enum JobError {
    #[error(transparent)]
    Fetch(#[from] FetchError),
    #[error(transparent)]
    Storage(#[from] StorageError),
}

#[derive(Debug, thiserror::Error)]
pub enum PoolError {
    /// First job failure under the fail-fast policy.
    #[error("job #{job_id} ({location}) failed on worker #{worker_id}")]
    JobFailed {
        job_id: JobId,
        location: String,
        worker_id: usize,
        #[source]
        source: JobError,
    },
    #[error("worker #{worker_id} panicked")]
    WorkerPanicked { worker_id: usize },
    #[error("failed to spawn worker #{worker_id}")]
    Spawn {
        worker_id: usize,
        #[source]
        source: std::io::Error,
    },
}
