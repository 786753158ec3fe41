use async_trait::async_trait;
use cinetrack_models::MovieRecord;

use crate::error::CatalogError;

/// A read-only provider of popular movies
#[async_trait]
pub trait CatalogSource: Send + Sync {
    fn source_name(&self) -> &str;

    /// Normalized records, never empty on success
    async fn fetch_popular(&self) -> Result<Vec<MovieRecord>, CatalogError>;
}
