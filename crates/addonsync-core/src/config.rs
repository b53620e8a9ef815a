use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Default port of the locally hosted addon source (streaming server).
pub const DEFAULT_LOCAL_SOURCE_PORT: u16 = 11470;

/// Default base of the remote addon-collection API.
pub const DEFAULT_API_BASE: &str = "https://api.strem.io/api/";

/// How a catalog is persisted after a version change.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UpdatePolicy {
    /// Rewrite only the version value in the original text; all other bytes are kept.
    #[default]
    Patch,
    /// Replace the whole local manifest and re-serialize the catalog.
    Replace,
}

/// HTTP client tuning (optional `[http]` section in config.toml).
///
/// Every field is optional; unset fields leave libcurl's defaults in place.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HttpConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub connect_timeout_secs: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timeout_secs: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_agent: Option<String>,
}

impl HttpConfig {
    pub fn connect_timeout(&self) -> Option<Duration> {
        self.connect_timeout_secs.map(Duration::from_secs)
    }

    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_secs.map(Duration::from_secs)
    }
}

/// Global configuration loaded from `~/.config/addonsync/config.toml`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SyncConfig {
    /// Update list naming the catalogs to sync. Relative paths resolve against the working directory.
    #[serde(default = "default_list_file")]
    pub list_file: PathBuf,
    /// Persistence policy applied to every catalog in a run.
    #[serde(default)]
    pub policy: UpdatePolicy,
    /// Connection refused on this loopback port is treated as "local source offline", not an error.
    #[serde(default = "default_local_source_port")]
    pub local_source_port: u16,
    /// Base URL of the addon-collection API.
    #[serde(default = "default_api_base")]
    pub api_base: String,
    /// Optional HTTP client tuning; if missing, libcurl defaults are used.
    #[serde(default)]
    pub http: Option<HttpConfig>,
}

fn default_list_file() -> PathBuf {
    PathBuf::from("update-addons-list.json")
}

fn default_local_source_port() -> u16 {
    DEFAULT_LOCAL_SOURCE_PORT
}

fn default_api_base() -> String {
    DEFAULT_API_BASE.to_string()
}

impl Default for SyncConfig {
    fn default() -> Self {
        Self {
            list_file: default_list_file(),
            policy: UpdatePolicy::default(),
            local_source_port: DEFAULT_LOCAL_SOURCE_PORT,
            api_base: default_api_base(),
            http: None,
        }
    }
}

impl SyncConfig {
    /// HTTP settings, falling back to an all-default section.
    pub fn http(&self) -> HttpConfig {
        self.http.clone().unwrap_or_default()
    }
}

pub fn config_path() -> Result<PathBuf> {
    let xdg_dirs = xdg::BaseDirectories::with_prefix("addonsync")?;
    Ok(xdg_dirs.place_config_file("config.toml")?)
}

/// Load configuration from disk, creating a default file if none exists.
pub fn load_or_init() -> Result<SyncConfig> {
    let path = config_path()?;
    if !path.exists() {
        let default_cfg = SyncConfig::default();
        let toml = toml::to_string_pretty(&default_cfg)?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&path, toml)?;
        tracing::info!("created default config at {}", path.display());
        return Ok(default_cfg);
    }

    load_from(&path)
}

/// Load configuration from an explicit path (`--config`). The file must exist.
pub fn load_from(path: &Path) -> Result<SyncConfig> {
    let data =
        fs::read_to_string(path).with_context(|| format!("read config: {}", path.display()))?;
    let cfg: SyncConfig =
        toml::from_str(&data).with_context(|| format!("parse config: {}", path.display()))?;
    Ok(cfg)
}
