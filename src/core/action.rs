//! # Actions
//!
//! Everything that can happen in Atlas becomes an `Action`.
//! User picks a region? That's `Action::RegionSelected`.
//! A fetch settles? That's `Action::CountriesLoaded(result)`.
//!
//! The `update()` function takes the current state and an action,
//! then mutates the state and returns an `Effect` describing the I/O the
//! shell must perform. No side effects here - fetches happen elsewhere.
//!
//! ```text
//! State + Action  →  update()  →  New State + Effect
//! ```
//!
//! This makes everything testable: apply an action, assert on the state.

use log::{debug, info, warn};

use crate::api::{Country, SourceError};
use crate::core::state::{App, DetailState, Route, SortKey, ViewMode};

#[derive(Debug)]
pub enum Action {
    /// The one-shot collection fetch settled.
    CountriesLoaded(Result<Vec<Country>, SourceError>),
    SearchChanged(String),
    /// Region filter selection; empty string means "all regions".
    RegionSelected(String),
    SortBy(SortKey),
    SetViewMode(ViewMode),
    /// Navigate to the detail view for the named country.
    OpenDetail(String),
    /// A detail lookup settled. `seq` identifies which request this
    /// response belongs to; stale sequence numbers are discarded.
    DetailLoaded {
        seq: u64,
        result: Result<Country, SourceError>,
    },
    /// Navigate from the detail view back to the collection.
    GoBack,
    Quit,
}

/// Requested side effects for the shell to perform after an update.
#[derive(Debug, PartialEq, Eq)]
pub enum Effect {
    None,
    /// Spawn a detail lookup tagged with `seq`.
    FetchDetail { name: String, seq: u64 },
    Quit,
}

pub fn update(app: &mut App, action: Action) -> Effect {
    match action {
        Action::CountriesLoaded(Ok(countries)) => {
            info!("Collection loaded: {} countries", countries.len());
            app.status_message = format!("{} countries", countries.len());
            app.collection.countries = countries;
            app.collection.loading = false;
            Effect::None
        }
        Action::CountriesLoaded(Err(e)) => {
            // Terminal for this session: no retry, countries stays empty
            warn!("Collection fetch failed: {e}");
            app.collection.error = Some(e.to_string());
            app.collection.loading = false;
            app.status_message = String::from("Load failed");
            Effect::None
        }
        Action::SearchChanged(search) => {
            app.collection.search = search;
            Effect::None
        }
        Action::RegionSelected(region) => {
            app.collection.region = region;
            Effect::None
        }
        Action::SortBy(key) => {
            app.collection.set_sort(key);
            Effect::None
        }
        Action::SetViewMode(mode) => {
            app.collection.view_mode = mode;
            Effect::None
        }
        Action::OpenDetail(name) => {
            let seq = app.begin_detail_lookup(&name);
            app.status_message = format!("Loading {name}...");
            Effect::FetchDetail { name, seq }
        }
        Action::DetailLoaded { seq, result } => {
            if seq != app.detail.seq {
                // Latest request wins: a response from a superseded lookup
                debug!(
                    "Discarding stale detail response (seq {seq}, current {})",
                    app.detail.seq
                );
                return Effect::None;
            }
            app.detail.loading = false;
            match result {
                Ok(country) => {
                    info!("Detail loaded: {}", country.name.common);
                    app.status_message = country.name.common.clone();
                    app.detail.country = Some(country);
                }
                Err(SourceError::NotFound) => {
                    app.detail.error = Some(String::from("Country not found"));
                }
                Err(e) => {
                    warn!("Detail fetch failed: {e}");
                    app.detail.error = Some(e.to_string());
                }
            }
            Effect::None
        }
        Action::GoBack => {
            app.route = Route::Collection;
            // Invalidate any in-flight lookup so a late response cannot
            // repopulate the abandoned view
            app.detail = DetailState::idle_after(app.detail.seq + 1);
            app.status_message = String::new();
            Effect::None
        }
        Action::Quit => Effect::Quit,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::SourceError;
    use crate::core::state::{SortDirection, ViewMode};
    use crate::test_support::{country, test_app};

    #[test]
    fn test_countries_loaded_stores_snapshot() {
        let mut app = test_app();
        let effect = update(
            &mut app,
            Action::CountriesLoaded(Ok(vec![country("Chad", "Africa", 100)])),
        );
        assert_eq!(effect, Effect::None);
        assert_eq!(app.collection.countries.len(), 1);
        assert!(!app.collection.loading);
        assert!(app.collection.error.is_none());
    }

    #[test]
    fn test_countries_load_failure_is_terminal() {
        let mut app = test_app();
        update(
            &mut app,
            Action::CountriesLoaded(Err(SourceError::Api {
                status: 500,
                message: "boom".to_string(),
            })),
        );
        assert!(app.collection.countries.is_empty());
        assert!(!app.collection.loading);
        assert_eq!(
            app.collection.error.as_deref(),
            Some("API error (HTTP 500): boom")
        );
    }

    #[test]
    fn test_search_and_region_actions() {
        let mut app = test_app();
        update(&mut app, Action::SearchChanged("ch".to_string()));
        assert_eq!(app.collection.search, "ch");

        update(&mut app, Action::RegionSelected("Africa".to_string()));
        assert_eq!(app.collection.region, "Africa");

        update(&mut app, Action::RegionSelected(String::new()));
        assert_eq!(app.collection.region, "");
    }

    #[test]
    fn test_sort_action_toggles() {
        let mut app = test_app();
        update(&mut app, Action::SortBy(SortKey::Population));
        assert_eq!(app.collection.sort.direction, SortDirection::Asc);
        update(&mut app, Action::SortBy(SortKey::Population));
        assert_eq!(app.collection.sort.direction, SortDirection::Desc);
    }

    #[test]
    fn test_set_view_mode_has_no_derived_side_effects() {
        let mut app = test_app();
        app.collection.countries = vec![
            country("Chad", "Africa", 100),
            country("Chile", "Americas", 200),
        ];
        let before: Vec<String> = app
            .collection
            .filtered()
            .iter()
            .map(|c| c.name.common.clone())
            .collect();

        update(&mut app, Action::SetViewMode(ViewMode::List));
        assert_eq!(app.collection.view_mode, ViewMode::List);

        let after: Vec<String> = app
            .collection
            .filtered()
            .iter()
            .map(|c| c.name.common.clone())
            .collect();
        assert_eq!(before, after);
    }

    #[test]
    fn test_open_detail_requests_fetch() {
        let mut app = test_app();
        let effect = update(&mut app, Action::OpenDetail("Chad".to_string()));
        assert_eq!(
            effect,
            Effect::FetchDetail {
                name: "Chad".to_string(),
                seq: 1
            }
        );
        assert_eq!(app.route, Route::Detail("Chad".to_string()));
        assert!(app.detail.loading);
    }

    #[test]
    fn test_detail_loaded_success() {
        let mut app = test_app();
        update(&mut app, Action::OpenDetail("Chad".to_string()));
        update(
            &mut app,
            Action::DetailLoaded {
                seq: 1,
                result: Ok(country("Chad", "Africa", 100)),
            },
        );
        assert!(!app.detail.loading);
        assert_eq!(
            app.detail.country.as_ref().map(|c| c.name.common.as_str()),
            Some("Chad")
        );
        assert!(app.detail.error.is_none());
    }

    #[test]
    fn test_detail_not_found_message() {
        let mut app = test_app();
        update(&mut app, Action::OpenDetail("Atlantis".to_string()));
        update(
            &mut app,
            Action::DetailLoaded {
                seq: 1,
                result: Err(SourceError::NotFound),
            },
        );
        assert!(app.detail.country.is_none());
        assert_eq!(app.detail.error.as_deref(), Some("Country not found"));
    }

    #[test]
    fn test_detail_transport_failure_message() {
        let mut app = test_app();
        update(&mut app, Action::OpenDetail("Chad".to_string()));
        update(
            &mut app,
            Action::DetailLoaded {
                seq: 1,
                result: Err(SourceError::Network("connection refused".to_string())),
            },
        );
        assert!(app.detail.country.is_none());
        assert_eq!(
            app.detail.error.as_deref(),
            Some("network error: connection refused")
        );
    }

    #[test]
    fn test_stale_detail_response_is_discarded() {
        let mut app = test_app();
        update(&mut app, Action::OpenDetail("Chad".to_string()));
        update(&mut app, Action::OpenDetail("Chile".to_string()));

        // The Chad response arrives late, tagged with the old seq
        update(
            &mut app,
            Action::DetailLoaded {
                seq: 1,
                result: Ok(country("Chad", "Africa", 100)),
            },
        );
        assert!(app.detail.loading, "stale response must not settle the view");
        assert!(app.detail.country.is_none());

        update(
            &mut app,
            Action::DetailLoaded {
                seq: 2,
                result: Ok(country("Chile", "Americas", 200)),
            },
        );
        assert_eq!(
            app.detail.country.as_ref().map(|c| c.name.common.as_str()),
            Some("Chile")
        );
    }

    #[test]
    fn test_go_back_invalidates_in_flight_lookup() {
        let mut app = test_app();
        update(&mut app, Action::OpenDetail("Chad".to_string()));
        update(&mut app, Action::GoBack);
        assert_eq!(app.route, Route::Collection);

        // The abandoned lookup's response arrives after navigating back
        update(
            &mut app,
            Action::DetailLoaded {
                seq: 1,
                result: Ok(country("Chad", "Africa", 100)),
            },
        );
        assert!(app.detail.country.is_none());
    }

    #[test]
    fn test_quit_effect() {
        let mut app = test_app();
        assert_eq!(update(&mut app, Action::Quit), Effect::Quit);
    }
}
