use async_trait::async_trait;
use cinetrack_config::CatalogConfig;
use cinetrack_models::MovieRecord;
use reqwest::Client;
use serde_json::Value;
use std::time::Duration;
use tracing::{debug, info};

use crate::error::CatalogError;
use crate::rapidapi::api;
use crate::traits::CatalogSource;

const API_KEY_HEADER: &str = "x-rapidapi-key";
const API_HOST_HEADER: &str = "x-rapidapi-host";

/// Popular-movies catalog served through RapidAPI
#[derive(Clone)]
pub struct RapidApiCatalog {
    client: Client,
    url: String,
    api_key: String,
    api_host: String,
    timeout: Duration,
    max_results: usize,
}

impl RapidApiCatalog {
    /// Fails when the HTTP client cannot be built; the request timeout is never dropped
    pub fn new(config: &CatalogConfig, api_key: String) -> Result<Self, CatalogError> {
        let timeout = Duration::from_secs(config.timeout_secs);
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| CatalogError::Client(e.to_string()))?;

        Ok(Self {
            client,
            url: config.popular_url(),
            api_key,
            api_host: config.api_host.clone(),
            timeout,
            max_results: config.max_results,
        })
    }

    fn transport_error(&self, error: reqwest::Error) -> CatalogError {
        if error.is_timeout() {
            CatalogError::Unavailable(format!("request timed out after {}s", self.timeout.as_secs()))
        } else {
            CatalogError::Unavailable(error.to_string())
        }
    }
}

#[async_trait]
impl CatalogSource for RapidApiCatalog {
    fn source_name(&self) -> &str {
        "rapidapi"
    }

    async fn fetch_popular(&self) -> Result<Vec<MovieRecord>, CatalogError> {
        info!(operation = "catalog_fetch", url = %self.url, "Fetching popular movies");

        let response = self
            .client
            .get(&self.url)
            .header(API_KEY_HEADER, &self.api_key)
            .header(API_HOST_HEADER, &self.api_host)
            .send()
            .await
            .map_err(|e| self.transport_error(e))?;

        if !response.status().is_success() {
            let status = response.status();
            return Err(CatalogError::Unavailable(format!(
                "API request failed with status {}",
                status.as_u16()
            )));
        }

        let body = response.text().await.map_err(|e| self.transport_error(e))?;
        let json: Value = serde_json::from_str(&body)
            .map_err(|e| CatalogError::Format(format!("response is not JSON: {}", e)))?;

        let movies = api::parse_popular(&json, self.max_results)?;
        debug!("Normalized {} popular movies", movies.len());
        Ok(movies)
    }
}
