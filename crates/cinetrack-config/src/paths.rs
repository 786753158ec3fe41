use anyhow::Result;
use dirs;
use std::path::{Path, PathBuf};

/// Base directory override, e.g. for containers: `CINETRACK_BASE_PATH=/app`
pub fn base_path_override() -> Option<PathBuf> {
    std::env::var("CINETRACK_BASE_PATH").ok().map(PathBuf::from)
}

pub struct PathManager {
    config_dir: PathBuf,
    data_dir: PathBuf,
    log_dir: PathBuf,
}

impl PathManager {
    pub fn new() -> Result<Self> {
        let base_dir = dirs::config_dir()
            .ok_or_else(|| anyhow::anyhow!("Could not determine config directory"))?
            .join("cinetrack");

        Ok(Self::from_base(base_dir))
    }

    /// Config files directly in `base`, data and logs in subdirectories
    pub fn from_base(base: PathBuf) -> Self {
        Self {
            config_dir: base.clone(),
            data_dir: base.join("data"),
            log_dir: base.join("logs"),
        }
    }

    pub fn config_dir(&self) -> &Path {
        &self.config_dir
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    pub fn log_dir(&self) -> &Path {
        &self.log_dir
    }

    /// Where the watchlist and watched collections are persisted
    pub fn storage_dir(&self) -> PathBuf {
        self.data_dir.join("storage")
    }

    pub fn config_file(&self) -> PathBuf {
        self.config_dir.join("config.toml")
    }

    pub fn credentials_file(&self) -> PathBuf {
        self.config_dir.join("credentials.toml")
    }

    pub fn log_file(&self) -> PathBuf {
        self.log_dir.join("cinetrack.log")
    }

    pub fn ensure_directories(&self) -> Result<()> {
        std::fs::create_dir_all(&self.config_dir)?;
        std::fs::create_dir_all(&self.data_dir)?;
        std::fs::create_dir_all(&self.log_dir)?;
        std::fs::create_dir_all(self.storage_dir())?;
        Ok(())
    }
}

impl Default for PathManager {
    fn default() -> Self {
        if let Some(base) = base_path_override() {
            return Self::from_base(base);
        }

        // Platform config dir (~/.config/cinetrack on Linux), else the working directory
        Self::new().unwrap_or_else(|_| Self::from_base(PathBuf::from(".cinetrack")))
    }
}
