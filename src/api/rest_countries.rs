//! REST Countries v3.1 client.
//!
//! Two endpoints cover the whole contract:
//! - `GET {base}/all` - the full collection
//! - `GET {base}/name/{name}?fullText=true` - exact common-name lookup,
//!   returning a zero-or-one element array (404 when empty)
//!
//! The base URL is injected so tests can point the client at a mock server.

use std::time::Duration;

use async_trait::async_trait;
use log::{debug, info, warn};
use reqwest::Url;

use super::source::{CountrySource, SourceError};
use super::types::Country;

pub const DEFAULT_BASE_URL: &str = "https://restcountries.com/v3.1";

pub struct RestCountriesClient {
    base_url: String,
    client: reqwest::Client,
}

impl RestCountriesClient {
    /// Creates a new client.
    ///
    /// # Arguments
    /// * `base_url` - Optional custom base URL (defaults to restcountries.com)
    /// * `timeout_secs` - Per-request timeout
    pub fn new(base_url: Option<String>, timeout_secs: u64) -> Self {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .build()
            .unwrap_or_default();
        Self {
            base_url: base_url.unwrap_or_else(|| DEFAULT_BASE_URL.to_string()),
            client,
        }
    }

    /// Builds `{base}/{segments...}`, percent-encoding each segment.
    fn endpoint(&self, segments: &[&str]) -> Result<Url, SourceError> {
        let mut url = Url::parse(&self.base_url)
            .map_err(|e| SourceError::Network(format!("invalid base URL: {e}")))?;
        url.path_segments_mut()
            .map_err(|_| SourceError::Network("base URL cannot have segments".to_string()))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    /// Sends a GET request and maps transport / status failures.
    async fn get(&self, url: Url) -> Result<reqwest::Response, SourceError> {
        debug!("GET {url}");
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| SourceError::Network(e.to_string()))?;

        let status = response.status();
        debug!("REST Countries response status: {status}");

        if !status.is_success() {
            let err_body = response
                .text()
                .await
                .unwrap_or_else(|_| "unknown error".to_string());
            warn!("REST Countries API error: {} - {}", status.as_u16(), err_body);
            return Err(SourceError::Api {
                status: status.as_u16(),
                message: err_body,
            });
        }

        Ok(response)
    }

    /// Reads the body and deserializes a country array.
    async fn parse_countries(response: reqwest::Response) -> Result<Vec<Country>, SourceError> {
        let body = response
            .text()
            .await
            .map_err(|e| SourceError::Network(e.to_string()))?;
        serde_json::from_str(&body).map_err(|e| SourceError::Parse(e.to_string()))
    }
}

#[async_trait]
impl CountrySource for RestCountriesClient {
    fn name(&self) -> &str {
        "restcountries"
    }

    async fn fetch_all(&self) -> Result<Vec<Country>, SourceError> {
        let url = self.endpoint(&["all"])?;
        let response = self.get(url).await?;
        let countries = Self::parse_countries(response).await?;
        info!("Fetched {} countries", countries.len());
        Ok(countries)
    }

    async fn fetch_by_name(&self, name: &str) -> Result<Country, SourceError> {
        let mut url = self.endpoint(&["name", name])?;
        url.query_pairs_mut().append_pair("fullText", "true");

        let response = match self.get(url).await {
            Ok(response) => response,
            // The API signals zero matches with a 404
            Err(SourceError::Api { status: 404, .. }) => return Err(SourceError::NotFound),
            Err(e) => return Err(e),
        };

        let mut countries = Self::parse_countries(response).await?;
        if countries.is_empty() {
            return Err(SourceError::NotFound);
        }
        info!("Resolved country: {name}");
        Ok(countries.remove(0))
    }
}
