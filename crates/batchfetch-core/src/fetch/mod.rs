//! Fetching job content from its source location.
//!
//! The pool only sees the [`Fetcher`] trait; [`CurlFetcher`] is the libcurl
//! implementation used by the CLI.

mod curl_fetcher;
mod error;

pub use curl_fetcher::{CurlFetcher, CurlOptions};
pub use error::FetchError;

use std::io::Write;

/// Transfers the content at `location` into `sink`, returning the number of bytes written.
///
/// Called concurrently from every worker thread, hence `Send + Sync`.
pub trait Fetcher: Send + Sync {
    fn fetch(&self, location: &str, sink: &mut dyn Write) -> Result<u64, FetchError>;
}
