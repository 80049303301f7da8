use std::fmt;

use async_trait::async_trait;

use super::types::Country;

/// Errors that can occur while talking to a country data source.
/// Every variant is converted to local view state at the fetch boundary;
/// none propagate further up.
#[derive(Debug)]
pub enum SourceError {
    /// Network-level failure (timeout, DNS, connection refused).
    Network(String),
    /// The API returned a non-success response.
    Api { status: u16, message: String },
    /// Failed to parse the response body.
    Parse(String),
    /// The lookup matched zero records (detail fetch only).
    NotFound,
}

impl fmt::Display for SourceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SourceError::Network(msg) => write!(f, "network error: {msg}"),
            SourceError::Api { status, message } => {
                write!(f, "API error (HTTP {status}): {message}")
            }
            SourceError::Parse(msg) => write!(f, "parse error: {msg}"),
            SourceError::NotFound => write!(f, "Country not found"),
        }
    }
}

impl std::error::Error for SourceError {}

/// A source of country records. Any implementation honoring this contract
/// is substitutable - the production REST client, or a fixture stub in
/// tests.
#[async_trait]
pub trait CountrySource: Send + Sync {
    /// Returns the name of the source (for logging).
    fn name(&self) -> &str;

    /// Fetches the entire country collection.
    async fn fetch_all(&self) -> Result<Vec<Country>, SourceError>;

    /// Fetches a single country by exact common name.
    /// Zero matches is `SourceError::NotFound`.
    async fn fetch_by_name(&self, name: &str) -> Result<Country, SourceError>;
}
