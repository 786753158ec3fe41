use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::debug;

/// Prefix of the persisted collection keys (`cinetrack-watchlist`, `cinetrack-watched`)
pub const DEFAULT_NAMESPACE: &str = "cinetrack";

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub catalog: CatalogConfig,
    #[serde(default)]
    pub storage: StorageConfig,
}

/// Remote popular-movies catalog. The API key lives in the credential store.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CatalogConfig {
    #[serde(default = "default_true")]
    pub enabled: bool,
    #[serde(default = "default_base_url")]
    pub base_url: String,
    #[serde(default = "default_popular_path")]
    pub popular_path: String,
    #[serde(default = "default_api_host")]
    pub api_host: String,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
    #[serde(default = "default_max_results")]
    pub max_results: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageConfig {
    #[serde(default = "default_namespace")]
    pub namespace: String,
    /// Overrides the platform data directory
    #[serde(default)]
    pub data_dir: Option<PathBuf>,
}

fn default_true() -> bool {
    true
}

fn default_base_url() -> String {
    "https://imdb236.p.rapidapi.com".to_string()
}

fn default_popular_path() -> String {
    "/api/imdb/most-popular-movies".to_string()
}

fn default_api_host() -> String {
    "imdb236.p.rapidapi.com".to_string()
}

fn default_timeout_secs() -> u64 {
    10
}

fn default_max_results() -> usize {
    12
}

fn default_namespace() -> String {
    DEFAULT_NAMESPACE.to_string()
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            enabled: default_true(),
            base_url: default_base_url(),
            popular_path: default_popular_path(),
            api_host: default_api_host(),
            timeout_secs: default_timeout_secs(),
            max_results: default_max_results(),
        }
    }
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            namespace: default_namespace(),
            data_dir: None,
        }
    }
}

impl CatalogConfig {
    pub fn popular_url(&self) -> String {
        format!(
            "{}/{}",
            self.base_url.trim_end_matches('/'),
            self.popular_path.trim_start_matches('/')
        )
    }
}

impl Config {
    pub fn load_from_file(path: &Path) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)?;
        Ok(config)
    }

    /// Defaults when the file does not exist yet; a malformed file is still an error
    pub fn load_or_default(path: &Path) -> anyhow::Result<Self> {
        if !path.exists() {
            debug!("No config file at {:?}, using defaults", path);
            return Ok(Self::default());
        }
        Self::load_from_file(path)
    }

    pub fn save_to_file(&self, path: &Path) -> anyhow::Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    pub fn validate(&self) -> anyhow::Result<()> {
        if self.catalog.timeout_secs == 0 {
            return Err(anyhow::anyhow!("catalog.timeout_secs must be greater than zero"));
        }
        if self.catalog.max_results == 0 {
            return Err(anyhow::anyhow!("catalog.max_results must be greater than zero"));
        }
        if self.catalog.enabled {
            if self.catalog.base_url.trim().is_empty() {
                return Err(anyhow::anyhow!("catalog.base_url is required when the catalog is enabled"));
            }
            if self.catalog.api_host.trim().is_empty() {
                return Err(anyhow::anyhow!("catalog.api_host is required when the catalog is enabled"));
            }
        }
        if self.storage.namespace.trim().is_empty() {
            return Err(anyhow::anyhow!("storage.namespace cannot be empty"));
        }
        Ok(())
    }
}
