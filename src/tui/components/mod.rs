//! # TUI Components
//!
//! Each component file is self-contained: state types, event types,
//! rendering, and tests live together. Stateless components (TitleBar,
//! Detail) receive everything as props; stateful ones (SearchBar,
//! CountryTable, CountryGrid, RegionPicker) follow the persistent state +
//! transient render wrapper pattern and emit high-level events.

pub mod country_grid;
pub mod country_table;
pub mod detail;
pub mod region_picker;
pub mod search_bar;
pub mod title_bar;

pub use country_grid::{CountryGrid, GridState};
pub use country_table::{CountryTable, CountryTableState};
pub use detail::Detail;
pub use region_picker::{RegionEvent, RegionPicker, RegionPickerState};
pub use search_bar::{SearchBar, SearchEvent};
pub use title_bar::TitleBar;
