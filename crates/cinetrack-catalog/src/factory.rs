use cinetrack_config::CatalogConfig;
use tracing::{info, warn};

use crate::error::CatalogError;
use crate::rapidapi::RapidApiCatalog;
use crate::seed::SeedCatalog;
use crate::traits::CatalogSource;

/// Build the catalog described by the configuration.
///
/// A disabled catalog, or one without an API key, is served from the seed dataset.
/// Fails only when the HTTP client for the remote catalog cannot be built.
pub fn catalog_from_config(
    config: &CatalogConfig,
    api_key: Option<String>,
) -> Result<Box<dyn CatalogSource>, CatalogError> {
    if !config.enabled {
        info!("Remote catalog disabled, using seed catalog");
        return Ok(Box::new(SeedCatalog));
    }

    match api_key.filter(|key| !key.trim().is_empty()) {
        Some(key) => Ok(Box::new(RapidApiCatalog::new(config, key)?)),
        None => {
            warn!("No catalog API key configured, using seed catalog");
            Ok(Box::new(SeedCatalog))
        }
    }
}
