use thiserror::Error;

/// Why a popular-movies fetch produced nothing usable
#[derive(Debug, Error)]
pub enum CatalogError {
    /// Transport failure, timeout or a non-success status
    #[error("catalog unavailable: {0}")]
    Unavailable(String),
    /// The body was neither an array nor an object with a `movies` array
    #[error("unexpected catalog response format: {0}")]
    Format(String),
    #[error("no movies found in catalog response")]
    Empty,
    /// The HTTP client could not be constructed from the configuration
    #[error("failed to build HTTP client: {0}")]
    Client(String),
}
