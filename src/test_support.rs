//! Test utilities shared across the crate.
//!
//! This module is only compiled during tests (`#[cfg(test)]`).

use std::sync::Arc;

use async_trait::async_trait;

use crate::api::{Country, CountryName, CountrySource, Flags, SourceError};
use crate::core::state::{App, SortKey, ViewMode};

/// A fixture-backed source for tests that don't need real HTTP.
pub struct StubSource {
    pub countries: Vec<Country>,
}

#[async_trait]
impl CountrySource for StubSource {
    fn name(&self) -> &str {
        "stub"
    }

    async fn fetch_all(&self) -> Result<Vec<Country>, SourceError> {
        Ok(self.countries.clone())
    }

    async fn fetch_by_name(&self, name: &str) -> Result<Country, SourceError> {
        self.countries
            .iter()
            .find(|c| c.name.common == name)
            .cloned()
            .ok_or(SourceError::NotFound)
    }
}

/// Builds a minimal country record. The capital mirrors the name except
/// for a few well-known fixtures, which get their real capitals.
pub fn country(name: &str, region: &str, population: u64) -> Country {
    let capital = match name {
        "Chad" => "N'Djamena",
        "Chile" => "Santiago",
        "China" => "Beijing",
        other => other,
    };
    Country {
        name: CountryName {
            common: name.to_string(),
            official: format!("Republic of {name}"),
        },
        capital: vec![capital.to_string()],
        population,
        region: region.to_string(),
        subregion: None,
        flags: Flags {
            svg: format!("https://flags.test/{name}.svg"),
            alt: None,
        },
        languages: Default::default(),
        currencies: Default::default(),
        timezones: vec!["UTC".to_string()],
        maps: Default::default(),
        borders: Vec::new(),
    }
}

/// Creates a test App backed by an empty StubSource.
pub fn test_app() -> App {
    App::new(
        Arc::new(StubSource {
            countries: Vec::new(),
        }),
        ViewMode::Grid,
        SortKey::Name,
    )
}
