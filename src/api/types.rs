//! Country record as returned by the REST Countries API.
//!
//! Everything here is read-only data plus the small pure helpers that
//! compute display values from it. Optional fields in the payload
//! (`capital`, `subregion`, `languages`, `currencies`, `borders`) default
//! to empty rather than failing deserialization - absence is expected,
//! not exceptional.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct CountryName {
    /// Common display name. Unique key for routing and list identity
    /// within a loaded snapshot.
    pub common: String,
    pub official: String,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Flags {
    pub svg: String,
    #[serde(default)]
    pub alt: Option<String>,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Currency {
    pub name: String,
    #[serde(default)]
    pub symbol: Option<String>,
}

#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
pub struct Maps {
    #[serde(rename = "googleMaps", default)]
    pub google_maps: String,
    #[serde(rename = "openStreetMaps", default)]
    pub open_street_maps: String,
}

/// One country record. `BTreeMap` keeps the language/currency display
/// order deterministic (code-sorted) across re-renders.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Country {
    pub name: CountryName,
    #[serde(default)]
    pub capital: Vec<String>,
    pub population: u64,
    pub region: String,
    #[serde(default)]
    pub subregion: Option<String>,
    pub flags: Flags,
    #[serde(default)]
    pub languages: BTreeMap<String, String>,
    #[serde(default)]
    pub currencies: BTreeMap<String, Currency>,
    #[serde(default)]
    pub timezones: Vec<String>,
    #[serde(default)]
    pub maps: Maps,
    #[serde(default)]
    pub borders: Vec<String>,
}

impl Country {
    /// First capital entry, if any. Callers render "N/A" for `None`.
    pub fn first_capital(&self) -> Option<&str> {
        self.capital.first().map(String::as_str)
    }

    /// Language display names, in code order. Empty when the field is absent.
    pub fn language_names(&self) -> Vec<&str> {
        self.languages.values().map(String::as_str).collect()
    }

    /// One `"{name} ({symbol})"` label per currency; symbol-less entries
    /// render the name alone. Empty when the field is absent.
    pub fn currency_labels(&self) -> Vec<String> {
        self.currencies
            .values()
            .map(|c| match &c.symbol {
                Some(symbol) => format!("{} ({})", c.name, symbol),
                None => c.name.clone(),
            })
            .collect()
    }

    /// Alt text for the flag, falling back to "Flag of {name}".
    pub fn flag_label(&self) -> String {
        self.flags
            .alt
            .clone()
            .unwrap_or_else(|| format!("Flag of {}", self.name.common))
    }

    /// True when the borders section should be rendered at all.
    pub fn has_borders(&self) -> bool {
        !self.borders.is_empty()
    }
}

/// Formats a population count with comma thousands separators.
pub fn format_population(n: u64) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}
