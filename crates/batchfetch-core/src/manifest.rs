//! Input manifest: a JSON document listing the locations to download.
//!
//! ```json
//! { "urls": ["http://example.com/1.jpg", "http://example.com/2.jpg"] }
//! ```

use std::path::{Path, PathBuf};

use serde::Deserialize;

#[derive(Debug, thiserror::Error)]
pub enum ManifestError {
    #[error("failed to read manifest {}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse manifest {}", .path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("entry {index} is not a valid URL: {url:?}")]
    InvalidUrl {
        index: usize,
        url: String,
        #[source]
        source: url::ParseError,
    },
}

/// Parsed manifest. Order of `urls` defines job ids.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Manifest {
    pub urls: Vec<String>,
}

impl Manifest {
    /// Reads and validates the manifest at `path`.
    pub fn load(path: &Path) -> Result<Self, ManifestError> {
        let data = std::fs::read_to_string(path).map_err(|source| ManifestError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let manifest: Manifest =
            serde_json::from_str(&data).map_err(|source| ManifestError::Parse {
                path: path.to_path_buf(),
                source,
            })?;
        manifest.validate()?;
        tracing::debug!(path = %path.display(), urls = manifest.urls.len(), "loaded manifest");
        Ok(manifest)
    }

    /// Every entry must parse as an absolute URL.
    pub fn validate(&self) -> Result<(), ManifestError> {
        for (index, u) in self.urls.iter().enumerate() {
            url::Url::parse(u).map_err(|source| ManifestError::InvalidUrl {
                index,
                url: u.clone(),
                source,
            })?;
        }
        Ok(())
    }
}
