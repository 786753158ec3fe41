use async_trait::async_trait;
use cinetrack_models::{seed_movies, MovieRecord};

use crate::error::CatalogError;
use crate::traits::CatalogSource;

/// Offline catalog backed by the static seed dataset
#[derive(Debug, Clone, Default)]
pub struct SeedCatalog;

#[async_trait]
impl CatalogSource for SeedCatalog {
    fn source_name(&self) -> &str {
        "seed"
    }

    async fn fetch_popular(&self) -> Result<Vec<MovieRecord>, CatalogError> {
        Ok(seed_movies())
    }
}
