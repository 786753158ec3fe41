use cinetrack_catalog::{catalog_from_config, CatalogSource};
use cinetrack_config::{Config, CredentialStore, PathManager};
use cinetrack_core::{FileKeyValueStore, MovieStore, PersistenceAdapter};
use color_eyre::eyre::Context;
use color_eyre::Result;
use tracing::{debug, warn};

/// Everything a command needs: resolved paths, configuration and the opened store
pub struct AppContext {
    pub paths: PathManager,
    pub config: Config,
    pub store: MovieStore<FileKeyValueStore>,
}

impl AppContext {
    pub fn load() -> Result<Self> {
        Self::load_from(PathManager::default())
    }

    pub fn load_from(paths: PathManager) -> Result<Self> {
        let config_file = paths.config_file();
        let config = Config::load_or_default(&config_file)
            .map_err(|e| color_eyre::eyre::eyre!("Failed to load config from {}: {}", config_file.display(), e))?;
        config
            .validate()
            .map_err(|e| color_eyre::eyre::eyre!("Invalid configuration in {}: {}", config_file.display(), e))?;

        let storage_dir = config.storage.data_dir.clone().unwrap_or_else(|| paths.storage_dir());
        let kv = FileKeyValueStore::new(storage_dir.clone())
            .wrap_err_with(|| format!("Failed to open storage at {}", storage_dir.display()))?;
        debug!(storage = %storage_dir.display(), namespace = %config.storage.namespace, "Opening collection store");
        let store = MovieStore::open(PersistenceAdapter::new(kv, config.storage.namespace.clone()));

        Ok(Self { paths, config, store })
    }

    /// The configured catalog; unreadable credentials fall back to the seed catalog
    pub fn catalog(&self) -> Result<Box<dyn CatalogSource>> {
        let mut credentials = CredentialStore::new(self.paths.credentials_file());
        if let Err(e) = credentials.load() {
            warn!("Failed to load credentials: {}", e);
        }
        catalog_from_config(&self.config.catalog, credentials.resolve_catalog_api_key())
            .wrap_err("Failed to set up the movie catalog")
    }
}
