use cinetrack_models::{seed_movies, MovieRecord};
use tracing::{info, warn};

use crate::traits::CatalogSource;

/// Result of a popular-movies fetch after the failure policy was applied
#[derive(Debug, Clone, PartialEq)]
pub struct CatalogOutcome {
    pub movies: Vec<MovieRecord>,
    /// Non-fatal message for the user when seed data stands in for the catalog
    pub advisory: Option<String>,
}

/// Fetch popular movies, substituting the seed dataset on any failure.
///
/// The returned list is never empty.
pub async fn fetch_popular_or_seed(source: &dyn CatalogSource) -> CatalogOutcome {
    match source.fetch_popular().await {
        Ok(movies) if !movies.is_empty() => {
            info!(
                operation = "catalog_fetch",
                source = source.source_name(),
                count = movies.len(),
                "Loaded popular movies"
            );
            CatalogOutcome { movies, advisory: None }
        }
        Ok(_) => fallback(source, "No movies found in API response".to_string()),
        Err(e) => fallback(source, e.to_string()),
    }
}

fn fallback(source: &dyn CatalogSource, reason: String) -> CatalogOutcome {
    warn!(
        operation = "catalog_fetch",
        source = source.source_name(),
        "Catalog fetch failed ({}), falling back to demo data",
        reason
    );
    CatalogOutcome {
        movies: seed_movies(),
        advisory: Some(format!("Using demo data. API Error: {}", reason)),
    }
}
