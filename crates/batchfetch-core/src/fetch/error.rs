//! Transfer error type.

use std::io;

/// Error returned by a single fetch (curl failure, HTTP error, or sink write failure).
#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    /// Curl reported an error (DNS, connection refused, timeout, bad URL, ...).
    #[error(transparent)]
    Curl(#[from] curl::Error),
    /// HTTP response had a non-2xx status.
    #[error("HTTP {0}")]
    Http(u32),
    /// Writing the body to the output failed (e.g. disk full).
    #[error("write to output failed: {0}")]
    Write(#[source] io::Error),
}
