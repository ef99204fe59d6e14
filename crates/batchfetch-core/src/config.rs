use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

use crate::fetch::CurlOptions;
use crate::pool::FailurePolicy;

/// Global configuration loaded from `~/.config/batchfetch/config.toml`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BatchConfig {
    /// Number of concurrent workers.
    pub workers: usize,
    /// Existing directory receiving `<id>.<extension>` outputs.
    pub output_dir: PathBuf,
    /// Extension appended to each output file name.
    pub extension: String,
    /// "fail-fast" (default) aborts the batch on the first failed job; "continue" drains everything.
    #[serde(default)]
    pub failure_policy: FailurePolicy,
    /// Optional transfer settings; if missing, built-in defaults are used.
    #[serde(default)]
    pub fetch: Option<CurlOptions>,
}

impl Default for BatchConfig {
    fn default() -> Self {
        Self {
            workers: 3,
            output_dir: PathBuf::from(".data"),
            extension: "jpg".to_string(),
            failure_policy: FailurePolicy::FailFast,
            fetch: None,
        }
    }
}

impl BatchConfig {
    /// Transfer settings, falling back to defaults when the section is absent.
    pub fn curl_options(&self) -> CurlOptions {
        self.fetch.clone().unwrap_or_default()
    }
}

pub fn config_path() -> Result<PathBuf> {
    let xdg_dirs = xdg::BaseDirectories::with_prefix("batchfetch")?;
    Ok(xdg_dirs.place_config_file("config.toml")?)
}

/// Load configuration from disk, creating a default file if none exists.
pub fn load_or_init() -> Result<BatchConfig> {
    let path = config_path()?;
    if !path.exists() {
        let default_cfg = BatchConfig::default();
        let toml = toml::to_string_pretty(&default_cfg)?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&path, toml)?;
        tracing::info!("created default config at {}", path.display());
        return Ok(default_cfg);
    }

    let data = fs::read_to_string(&path)?;
    let cfg: BatchConfig = toml::from_str(&data)?;
    Ok(cfg)
}
