//! Single-stream HTTP GET via libcurl.
//!
//! Streams the response body straight into the caller's sink.

use std::io::{self, Write};
use std::time::Duration;

use serde::{Deserialize, Serialize};

use super::{FetchError, Fetcher};

/// Transfer knobs (optional `[fetch]` section in config.toml).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CurlOptions {
    /// Maximum number of redirects to follow.
    pub max_redirections: u32,
    /// Connect timeout in seconds (None = libcurl default).
    #[serde(default)]
    pub connect_timeout_secs: Option<u64>,
    /// User-Agent header (None = no header).
    #[serde(default)]
    pub user_agent: Option<String>,
}

impl Default for CurlOptions {
    fn default() -> Self {
        Self {
            max_redirections: 10,
            connect_timeout_secs: None,
            user_agent: None,
        }
    }
}

/// [`Fetcher`] backed by a fresh libcurl `Easy` handle per transfer.
#[derive(Debug, Clone, Default)]
pub struct CurlFetcher {
    opts: CurlOptions,
}

impl CurlFetcher {
    pub fn new(opts: CurlOptions) -> Self {
        Self { opts }
    }

    fn configure(&self, easy: &mut curl::easy::Easy, location: &str) -> Result<(), curl::Error> {
        easy.url(location)?;
        easy.follow_location(true)?;
        easy.max_redirections(self.opts.max_redirections)?;
        if let Some(secs) = self.opts.connect_timeout_secs {
            easy.connect_timeout(Duration::from_secs(secs))?;
        }
        if let Some(ua) = &self.opts.user_agent {
            easy.useragent(ua)?;
        }
        Ok(())
    }
}

impl Fetcher for CurlFetcher {
    fn fetch(&self, location: &str, sink: &mut dyn Write) -> Result<u64, FetchError> {
        let mut easy = curl::easy::Easy::new();
        self.configure(&mut easy, location)?;

        let mut written = 0u64;
        let mut write_err: Option<io::Error> = None;
        let performed = {
            let mut transfer = easy.transfer();
            transfer.write_function(|data| match sink.write_all(data) {
                Ok(()) => {
                    written += data.len() as u64;
                    Ok(data.len())
                }
                Err(e) => {
                    write_err = Some(e);
                    Ok(0) // abort transfer
                }
            })?;
            transfer.perform()
        };
        if let Some(e) = write_err {
            return Err(FetchError::Write(e));
        }
        performed?;

        // Non-HTTP schemes (file://) report 0.
        let code = easy.response_code()?;
        if code != 0 && !(200..300).contains(&code) {
            return Err(FetchError::Http(code));
        }
        sink.flush().map_err(FetchError::Write)?;
        Ok(written)
    }
}
