use anyhow::{Context, Result};
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

use crate::request::{DEFAULT_ACCEPT_FORMAT, DEFAULT_PROD_VERSION, DEFAULT_UPDATE_URL};

/// Global configuration loaded from `~/.config/crxdl/config.toml`.
///
/// Every key is optional in the file; missing keys take the built-in defaults.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct CrxdlConfig {
    /// Web Store update endpoint that redirects to the CRX binary.
    pub update_url: String,
    /// Value sent as `prodversion`. The endpoint refuses very old Chrome versions.
    pub prod_version: String,
    /// Value sent as `acceptformat` (comma-separated package formats).
    pub accept_format: String,
    /// Maximum number of redirects followed for the single GET.
    pub max_redirections: u32,
    /// Connect timeout in seconds (None = HTTP client default).
    pub connect_timeout_secs: Option<u64>,
    /// Whole-transfer timeout in seconds (None = no limit).
    pub timeout_secs: Option<u64>,
    /// Optional User-Agent header.
    pub user_agent: Option<String>,
}

impl Default for CrxdlConfig {
    fn default() -> Self {
        Self {
            update_url: DEFAULT_UPDATE_URL.to_string(),
            prod_version: DEFAULT_PROD_VERSION.to_string(),
            accept_format: DEFAULT_ACCEPT_FORMAT.to_string(),
            max_redirections: 10,
            connect_timeout_secs: None,
            timeout_secs: None,
            user_agent: None,
        }
    }
}

/// Location of the user config file, if one exists.
pub fn config_path() -> Result<Option<PathBuf>> {
    let xdg_dirs = xdg::BaseDirectories::with_prefix("crxdl")?;
    Ok(xdg_dirs.find_config_file("config.toml"))
}

/// Load configuration from the XDG config dir. A missing file yields defaults;
/// nothing is written to disk.
pub fn load() -> Result<CrxdlConfig> {
    match config_path()? {
        Some(path) => load_from(&path),
        None => Ok(CrxdlConfig::default()),
    }
}

/// Load configuration from an explicit path.
pub fn load_from(path: &Path) -> Result<CrxdlConfig> {
    let data =
        fs::read_to_string(path).with_context(|| format!("read config {}", path.display()))?;
    let cfg: CrxdlConfig =
        toml::from_str(&data).with_context(|| format!("parse config {}", path.display()))?;
    tracing::debug!("loaded config from {}", path.display());
    Ok(cfg)
}
