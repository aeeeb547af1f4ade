use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

use crate::validate::MAX_CONTENT_LENGTH;

/// Directory images are saved into, relative to the working directory.
pub const DEFAULT_OUTPUT_DIR: &str = "Fetched_Images";

/// Identifies the fetcher to the servers it talks to.
pub const DEFAULT_USER_AGENT: &str = "UbuntuImageFetcher/1.0 (Educational Project)";

/// Seconds allowed to connect, and to go without receiving data.
pub const DEFAULT_TIMEOUT_SECS: u64 = 15;

/// Configuration loaded from `~/.config/uif/config.toml`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FetcherConfig {
    /// Target directory for saved images.
    pub output_dir: PathBuf,
    /// Network timeout in seconds.
    pub timeout_secs: u64,
    /// Ceiling in bytes for declared (and, if enforced, received) content length.
    pub max_content_length: u64,
    /// `User-Agent` header sent with every request.
    pub user_agent: String,
    /// Also abort when the received body outgrows `max_content_length`,
    /// regardless of what the server declared.
    pub enforce_received_limit: bool,
}

impl Default for FetcherConfig {
    fn default() -> Self {
        Self {
            output_dir: PathBuf::from(DEFAULT_OUTPUT_DIR),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            max_content_length: MAX_CONTENT_LENGTH,
            user_agent: DEFAULT_USER_AGENT.to_string(),
            enforce_received_limit: true,
        }
    }
}

pub fn config_path() -> Result<PathBuf> {
    let xdg_dirs = xdg::BaseDirectories::with_prefix("uif")?;
    Ok(xdg_dirs.place_config_file("config.toml")?)
}

/// Load configuration from disk, creating a default file if none exists.
pub fn load_or_init() -> Result<FetcherConfig> {
    let path = config_path()?;
    if !path.exists() {
        let default_cfg = FetcherConfig::default();
        let toml = toml::to_string_pretty(&default_cfg)?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&path, toml)?;
        tracing::info!("created default config at {}", path.display());
        return Ok(default_cfg);
    }

    let data = fs::read_to_string(&path)?;
    let cfg: FetcherConfig = toml::from_str(&data)?;
    Ok(cfg)
}
