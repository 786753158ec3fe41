pub mod error;
pub mod factory;
pub mod fallback;
pub mod rapidapi;
pub mod seed;
pub mod traits;

pub use error::CatalogError;
pub use factory::catalog_from_config;
pub use fallback::{fetch_popular_or_seed, CatalogOutcome};
pub use rapidapi::RapidApiCatalog;
pub use seed::SeedCatalog;
pub use traits::CatalogSource;
