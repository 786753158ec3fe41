use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::PathBuf;
use toml;

/// Environment variable that takes precedence over the stored catalog API key
pub const API_KEY_ENV_VAR: &str = "CINETRACK_API_KEY";

const CATALOG_API_KEY: &str = "catalog_api_key";

#[derive(Debug, Serialize, Deserialize, Default)]
struct CredentialsData {
    #[serde(flatten)]
    data: HashMap<String, String>,
}

/// Secrets kept out of `config.toml`, stored in `credentials.toml`
pub struct CredentialStore {
    path: PathBuf,
    credentials: HashMap<String, String>,
}

impl CredentialStore {
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            credentials: HashMap::new(),
        }
    }

    pub fn load(&mut self) -> Result<()> {
        if self.path.exists() {
            let content = std::fs::read_to_string(&self.path)?;
            let creds_data: CredentialsData = toml::from_str(&content)?;
            self.credentials = creds_data.data;
        }
        Ok(())
    }

    pub fn save(&self) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let creds_data = CredentialsData {
            data: self.credentials.clone(),
        };
        let content = toml::to_string_pretty(&creds_data)?;
        std::fs::write(&self.path, content)?;
        Ok(())
    }

    pub fn get(&self, key: &str) -> Option<&String> {
        self.credentials.get(key)
    }

    pub fn set(&mut self, key: String, value: String) {
        self.credentials.insert(key, value);
    }

    pub fn remove(&mut self, key: &str) {
        self.credentials.remove(key);
    }

    pub fn get_catalog_api_key(&self) -> Option<&String> {
        self.get(CATALOG_API_KEY)
    }

    pub fn set_catalog_api_key(&mut self, key: String) {
        self.set(CATALOG_API_KEY.to_string(), key);
    }

    pub fn remove_catalog_api_key(&mut self) {
        self.remove(CATALOG_API_KEY);
    }

    /// API key from the environment first, then from the credentials file
    pub fn resolve_catalog_api_key(&self) -> Option<String> {
        std::env::var(API_KEY_ENV_VAR)
            .ok()
            .filter(|key| !key.trim().is_empty())
            .or_else(|| self.get_catalog_api_key().cloned())
    }

    pub fn get_all_keys(&self) -> Vec<String> {
        self.credentials.keys().cloned().collect()
    }
}
