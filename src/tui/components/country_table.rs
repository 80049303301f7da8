//! # Country Table Component
//!
//! List-mode view: one row per country with Name / Capital / Population /
//! Region columns. The active sort column carries an up or down arrow
//! matching the sort direction.
//!
//! Follows the persistent state + transient wrapper pattern:
//! - `CountryTableState` lives in `TuiState`
//! - `CountryTable` is created each frame with borrowed state

use ratatui::Frame;
use ratatui::layout::{Constraint, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::widgets::{Block, Borders, Row, Table, TableState};
use unicode_width::UnicodeWidthStr;

use crate::api::{Country, types::format_population};
use crate::core::state::{SortConfig, SortDirection, SortKey};

/// Persistent scroll/selection state for the table.
pub struct CountryTableState {
    pub table_state: TableState,
}

impl CountryTableState {
    pub fn new() -> Self {
        Self {
            table_state: TableState::default(),
        }
    }
}

/// Transient render wrapper for the list-mode table.
pub struct CountryTable<'a> {
    state: &'a mut CountryTableState,
    countries: &'a [&'a Country],
    sort: SortConfig,
    selected: Option<usize>,
}

impl<'a> CountryTable<'a> {
    pub fn new(
        state: &'a mut CountryTableState,
        countries: &'a [&'a Country],
        sort: SortConfig,
        selected: Option<usize>,
    ) -> Self {
        Self {
            state,
            countries,
            sort,
            selected,
        }
    }

    pub fn render(&mut self, frame: &mut Frame, area: Rect) {
        self.state.table_state.select(self.selected);

        let header = Row::new(vec![
            column_label("Name", SortKey::Name, self.sort),
            "Capital".to_string(),
            column_label("Population", SortKey::Population, self.sort),
            column_label("Region", SortKey::Region, self.sort),
        ])
        .style(
            Style::default()
                .fg(Color::DarkGray)
                .add_modifier(Modifier::BOLD),
        );

        let name_width = area.width.saturating_sub(4) as usize * 35 / 100;
        let rows: Vec<Row> = self
            .countries
            .iter()
            .map(|country| {
                Row::new(vec![
                    truncate_str(&country.name.common, name_width),
                    country.first_capital().unwrap_or("N/A").to_string(),
                    format_population(country.population),
                    country.region.clone(),
                ])
            })
            .collect();

        let table = Table::new(
            rows,
            [
                Constraint::Percentage(35),
                Constraint::Percentage(25),
                Constraint::Percentage(18),
                Constraint::Percentage(22),
            ],
        )
        .header(header)
        .row_highlight_style(
            Style::default()
                .fg(Color::White)
                .add_modifier(Modifier::BOLD | Modifier::REVERSED),
        )
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::DarkGray))
                .title(" Countries "),
        );

        frame.render_stateful_widget(table, area, &mut self.state.table_state);
    }
}

/// Column header text plus the sort indicator when this column is active.
fn column_label(label: &str, key: SortKey, sort: SortConfig) -> String {
    if sort.key != key {
        return label.to_string();
    }
    match sort.direction {
        SortDirection::Asc => format!("{label} \u{2191}"),
        SortDirection::Desc => format!("{label} \u{2193}"),
    }
}

/// Truncate a string to fit within `max_width` columns, adding "..." if needed.
pub fn truncate_str(s: &str, max_width: usize) -> String {
    if s.width() <= max_width {
        return s.to_string();
    }
    if max_width <= 3 {
        return ".".repeat(max_width);
    }
    let mut out = String::new();
    for c in s.chars() {
        if out.width() + 3 >= max_width {
            break;
        }
        out.push(c);
    }
    out.push_str("...");
    out
}
