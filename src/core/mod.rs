//! # Core
//!
//! Domain state and logic, independent of any UI toolkit. The TUI layer
//! translates terminal events into `Action` values and performs the
//! `Effect`s that `update()` requests; everything in here is synchronous
//! and deterministic.
//!
//! - `state` - `App`, the collection view-model, and detail lookup state
//! - `action` - `Action` / `Effect` / `update()` reducer
//! - `config` - TOML config loading and resolution

pub mod action;
pub mod config;
pub mod state;

pub use action::{Action, Effect, update};
pub use state::{App, CollectionState, DetailState, Route, SortConfig, SortDirection, SortKey, ViewMode};
