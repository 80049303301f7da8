//! # Application State
//!
//! Core business state for Atlas. This module contains domain logic only -
//! no TUI-specific types. Presentation state lives in the `tui` module.
//!
//! ```text
//! App
//! ├── source: Arc<dyn CountrySource>   // country data source
//! ├── route: Route                     // Collection | Detail(name)
//! ├── collection: CollectionState      // snapshot + search/region/sort/view
//! ├── detail: DetailState              // one-shot lookup state + seq
//! └── status_message: String           // status bar text
//! ```
//!
//! State changes only happen through `update(state, action)` in action.rs.
//! The displayed list is never stored: `CollectionState::filtered()`
//! recomputes it from its inputs on every render, so it can never go stale.

use std::collections::BTreeSet;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::api::{Country, CountrySource};

/// Sortable columns of the collection view.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum SortKey {
    Name,
    Population,
    Region,
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    Asc,
    Desc,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SortConfig {
    pub key: SortKey,
    pub direction: SortDirection,
}

impl Default for SortConfig {
    fn default() -> Self {
        Self {
            key: SortKey::Name,
            direction: SortDirection::Asc,
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, Default, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ViewMode {
    #[default]
    Grid,
    List,
}

impl ViewMode {
    pub fn toggled(self) -> Self {
        match self {
            ViewMode::Grid => ViewMode::List,
            ViewMode::List => ViewMode::Grid,
        }
    }
}

/// Addressable views. `Detail` is keyed by the country's common name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    Collection,
    Detail(String),
}

/// Owns the fetched snapshot and the UI-selection state the displayed
/// list is derived from.
pub struct CollectionState {
    /// Immutable snapshot from the last successful full fetch. Set exactly
    /// once per session; empty before load completes or after failure.
    pub countries: Vec<Country>,
    pub search: String,
    /// Selected region, empty meaning "all".
    pub region: String,
    pub sort: SortConfig,
    pub view_mode: ViewMode,
    /// True until the initial fetch settles (success or failure).
    pub loading: bool,
    pub error: Option<String>,
}

impl CollectionState {
    pub fn new(view_mode: ViewMode, sort_key: SortKey) -> Self {
        Self {
            countries: Vec::new(),
            search: String::new(),
            region: String::new(),
            sort: SortConfig {
                key: sort_key,
                direction: SortDirection::Asc,
            },
            view_mode,
            loading: true,
            error: None,
        }
    }

    /// Derives the displayed list: filter by search + region, then sort.
    ///
    /// Pure function of (`countries`, `search`, `region`, `sort`). A record
    /// survives the filter iff its common name or first capital contains
    /// the search text case-insensitively, and its region equals the
    /// selected one exactly (empty selection matches all). `sort_by` is
    /// stable, so records with equal sort keys retain input order across
    /// re-derivations.
    pub fn filtered(&self) -> Vec<&Country> {
        let needle = self.search.to_lowercase();
        let mut result: Vec<&Country> = self
            .countries
            .iter()
            .filter(|c| {
                let matches_search = needle.is_empty()
                    || c.name.common.to_lowercase().contains(&needle)
                    || c.first_capital()
                        .is_some_and(|cap| cap.to_lowercase().contains(&needle));
                let matches_region = self.region.is_empty() || c.region == self.region;
                matches_search && matches_region
            })
            .collect();

        result.sort_by(|a, b| {
            let ordering = match self.sort.key {
                SortKey::Name => a
                    .name
                    .common
                    .to_lowercase()
                    .cmp(&b.name.common.to_lowercase()),
                SortKey::Population => a.population.cmp(&b.population),
                SortKey::Region => a.region.cmp(&b.region),
            };
            match self.sort.direction {
                SortDirection::Asc => ordering,
                SortDirection::Desc => ordering.reverse(),
            }
        });

        result
    }

    /// Distinct regions in the snapshot, sorted ascending. Independent of
    /// the current filters.
    pub fn available_regions(&self) -> Vec<&str> {
        self.countries
            .iter()
            .map(|c| c.region.as_str())
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }

    /// Toggles direction when `key` is already active, otherwise switches
    /// to `key` ascending.
    pub fn set_sort(&mut self, key: SortKey) {
        let direction = if self.sort.key == key && self.sort.direction == SortDirection::Asc {
            SortDirection::Desc
        } else {
            SortDirection::Asc
        };
        self.sort = SortConfig { key, direction };
    }
}

/// State of the current detail lookup. One logical instance per detail
/// visit; `seq` identifies the latest issued request so stale responses
/// can be discarded.
pub struct DetailState {
    pub country: Option<Country>,
    pub loading: bool,
    pub error: Option<String>,
    /// Monotonically increasing request sequence number. Bumped on every
    /// lookup and on navigating back, invalidating in-flight responses.
    pub seq: u64,
}

impl DetailState {
    pub fn idle() -> Self {
        Self::idle_after(0)
    }

    /// Idle state carrying a sequence floor, so responses issued before
    /// the reset remain invalid.
    pub fn idle_after(seq: u64) -> Self {
        Self {
            country: None,
            loading: false,
            error: None,
            seq,
        }
    }

    /// Resets for a fresh lookup: loading, nothing stale visible.
    fn begin_lookup(&mut self) -> u64 {
        self.country = None;
        self.error = None;
        self.loading = true;
        self.seq += 1;
        self.seq
    }
}

pub struct App {
    pub source: Arc<dyn CountrySource>,
    pub route: Route,
    pub collection: CollectionState,
    pub detail: DetailState,
    pub status_message: String,
}

impl App {
    pub fn new(source: Arc<dyn CountrySource>, view_mode: ViewMode, sort_key: SortKey) -> Self {
        Self {
            source,
            route: Route::Collection,
            collection: CollectionState::new(view_mode, sort_key),
            detail: DetailState::idle(),
            status_message: String::from("Loading countries..."),
        }
    }

    /// Starts a detail lookup for `name`, returning the sequence number
    /// the response must carry to be accepted.
    pub fn begin_detail_lookup(&mut self, name: &str) -> u64 {
        self.route = Route::Detail(name.to_string());
        self.detail.begin_lookup()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{country, test_app};

    fn sample() -> CollectionState {
        let mut state = CollectionState::new(ViewMode::Grid, SortKey::Name);
        state.countries = vec![
            country("Chad", "Africa", 100),
            country("Chile", "Americas", 200),
            country("China", "Asia", 300),
        ];
        state.loading = false;
        state
    }

    fn names(countries: &[&Country]) -> Vec<String> {
        countries.iter().map(|c| c.name.common.clone()).collect()
    }

    #[test]
    fn test_app_defaults() {
        let app = test_app();
        assert_eq!(app.route, Route::Collection);
        assert!(app.collection.loading);
        assert!(app.collection.search.is_empty());
        assert_eq!(app.collection.view_mode, ViewMode::Grid);
        assert_eq!(app.collection.sort, SortConfig::default());
        assert!(app.detail.country.is_none());
    }

    #[test]
    fn test_empty_search_returns_all_sorted_by_name() {
        let state = sample();
        assert_eq!(names(&state.filtered()), vec!["Chad", "Chile", "China"]);
    }

    #[test]
    fn test_search_matches_name_case_insensitively() {
        let mut state = sample();
        state.search = "CH".to_string();
        assert_eq!(names(&state.filtered()), vec!["Chad", "Chile", "China"]);

        state.search = "chi".to_string();
        assert_eq!(names(&state.filtered()), vec!["Chile", "China"]);
    }

    #[test]
    fn test_search_matches_first_capital() {
        let mut state = sample();
        // Chile's capital is "Santiago" in the fixture
        state.search = "santia".to_string();
        assert_eq!(names(&state.filtered()), vec!["Chile"]);
    }

    #[test]
    fn test_search_ignores_later_capitals() {
        let mut state = sample();
        state.countries[0].capital =
            vec!["Pretoria".to_string(), "Cape Town".to_string()];
        state.search = "cape town".to_string();
        assert!(state.filtered().is_empty());
    }

    #[test]
    fn test_no_match_returns_empty() {
        let mut state = sample();
        state.search = "zanzibar".to_string();
        assert!(state.filtered().is_empty());
    }

    #[test]
    fn test_region_filter_is_exact() {
        let mut state = sample();
        state.region = "Africa".to_string();
        assert_eq!(names(&state.filtered()), vec!["Chad"]);

        // Case-sensitive: lowercase does not match
        state.region = "africa".to_string();
        assert!(state.filtered().is_empty());
    }

    #[test]
    fn test_search_and_region_combine() {
        let mut state = sample();
        state.search = "ch".to_string();
        state.region = "Asia".to_string();
        assert_eq!(names(&state.filtered()), vec!["China"]);
    }

    #[test]
    fn test_sort_by_population() {
        let mut state = sample();
        state.sort = SortConfig {
            key: SortKey::Population,
            direction: SortDirection::Desc,
        };
        assert_eq!(names(&state.filtered()), vec!["China", "Chile", "Chad"]);
    }

    #[test]
    fn test_sort_by_region() {
        let mut state = sample();
        state.sort = SortConfig {
            key: SortKey::Region,
            direction: SortDirection::Asc,
        };
        assert_eq!(names(&state.filtered()), vec!["Chad", "Chile", "China"]);
    }

    #[test]
    fn test_sort_name_desc() {
        let mut state = sample();
        state.sort = SortConfig {
            key: SortKey::Name,
            direction: SortDirection::Desc,
        };
        assert_eq!(names(&state.filtered()), vec!["China", "Chile", "Chad"]);
    }

    #[test]
    fn test_sort_is_stable_for_equal_keys() {
        let mut state = sample();
        state.countries = vec![
            country("Beta", "Africa", 100),
            country("Alpha", "Africa", 100),
            country("Gamma", "Africa", 100),
        ];
        state.sort = SortConfig {
            key: SortKey::Population,
            direction: SortDirection::Asc,
        };
        // Equal populations keep input order
        assert_eq!(names(&state.filtered()), vec!["Beta", "Alpha", "Gamma"]);

        state.sort.direction = SortDirection::Desc;
        assert_eq!(names(&state.filtered()), vec!["Beta", "Alpha", "Gamma"]);
    }

    #[test]
    fn test_filtered_is_idempotent() {
        let mut state = sample();
        state.search = "ch".to_string();
        let first = names(&state.filtered());
        let second = names(&state.filtered());
        assert_eq!(first, second);
    }

    #[test]
    fn test_available_regions_deduped_and_sorted() {
        let mut state = sample();
        state.countries.push(country("Nigeria", "Africa", 400));
        assert_eq!(
            state.available_regions(),
            vec!["Africa", "Americas", "Asia"]
        );
    }

    #[test]
    fn test_available_regions_ignores_filters() {
        let mut state = sample();
        state.search = "chad".to_string();
        state.region = "Africa".to_string();
        assert_eq!(
            state.available_regions(),
            vec!["Africa", "Americas", "Asia"]
        );
    }

    #[test]
    fn test_set_sort_toggles_direction() {
        let mut state = sample();
        state.set_sort(SortKey::Population);
        assert_eq!(state.sort.key, SortKey::Population);
        assert_eq!(state.sort.direction, SortDirection::Asc);

        state.set_sort(SortKey::Population);
        assert_eq!(state.sort.direction, SortDirection::Desc);

        state.set_sort(SortKey::Population);
        assert_eq!(state.sort.direction, SortDirection::Asc);
    }

    #[test]
    fn test_set_sort_new_key_resets_to_asc() {
        let mut state = sample();
        state.set_sort(SortKey::Name);
        state.set_sort(SortKey::Name); // now Desc
        state.set_sort(SortKey::Region);
        assert_eq!(state.sort.key, SortKey::Region);
        assert_eq!(state.sort.direction, SortDirection::Asc);
    }

    #[test]
    fn test_begin_detail_lookup_bumps_seq_and_resets() {
        let mut app = test_app();
        app.detail.country = Some(country("Chad", "Africa", 100));
        app.detail.error = Some("old".to_string());

        let seq = app.begin_detail_lookup("Chile");
        assert_eq!(seq, 1);
        assert_eq!(app.route, Route::Detail("Chile".to_string()));
        assert!(app.detail.loading);
        assert!(app.detail.country.is_none());
        assert!(app.detail.error.is_none());

        let seq2 = app.begin_detail_lookup("China");
        assert_eq!(seq2, 2);
    }

    #[test]
    fn test_view_mode_toggles() {
        assert_eq!(ViewMode::Grid.toggled(), ViewMode::List);
        assert_eq!(ViewMode::List.toggled(), ViewMode::Grid);
    }
}
