//! # Country Grid Component
//!
//! Grid-mode view: one bordered card per country showing capital,
//! population, and region, laid out in as many columns as the width
//! allows. Selection moves in two dimensions; rows scroll to keep the
//! selected card visible.

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::Line;
use ratatui::widgets::{Block, Borders, Paragraph};

use crate::api::{Country, types::format_population};

use super::country_table::truncate_str;

const CARD_MIN_WIDTH: u16 = 30;
const CARD_HEIGHT: u16 = 5;

/// Persistent grid state. `columns` is a layout cache updated during
/// render so the event loop can translate Up/Down into row moves.
pub struct GridState {
    pub columns: usize,
    pub row_offset: usize,
}

impl GridState {
    pub fn new() -> Self {
        Self {
            columns: 1,
            row_offset: 0,
        }
    }
}

/// Transient render wrapper for the grid of country cards.
pub struct CountryGrid<'a> {
    state: &'a mut GridState,
    countries: &'a [&'a Country],
    selected: Option<usize>,
}

impl<'a> CountryGrid<'a> {
    pub fn new(
        state: &'a mut GridState,
        countries: &'a [&'a Country],
        selected: Option<usize>,
    ) -> Self {
        Self {
            state,
            countries,
            selected,
        }
    }

    pub fn render(&mut self, frame: &mut Frame, area: Rect) {
        let columns = (area.width / CARD_MIN_WIDTH).max(1) as usize;
        let visible_rows = (area.height / CARD_HEIGHT).max(1) as usize;
        self.state.columns = columns;

        // Keep the selected card's row in view
        if let Some(selected) = self.selected {
            let row = selected / columns;
            if row < self.state.row_offset {
                self.state.row_offset = row;
            } else if row >= self.state.row_offset + visible_rows {
                self.state.row_offset = row + 1 - visible_rows;
            }
        }
        let total_rows = self.countries.len().div_ceil(columns);
        self.state.row_offset = self
            .state
            .row_offset
            .min(total_rows.saturating_sub(visible_rows));

        let card_width = area.width / columns as u16;
        let first = self.state.row_offset * columns;
        for (offset, country) in self.countries.iter().skip(first).enumerate() {
            let row = offset / columns;
            if row >= visible_rows {
                break;
            }
            let col = offset % columns;
            let card_area = Rect::new(
                area.x + col as u16 * card_width,
                area.y + row as u16 * CARD_HEIGHT,
                card_width,
                CARD_HEIGHT,
            );
            let is_selected = self.selected == Some(first + offset);
            render_card(frame, card_area, country, is_selected);
        }
    }
}

fn render_card(frame: &mut Frame, area: Rect, country: &Country, is_selected: bool) {
    let (border_style, title_style) = if is_selected {
        (
            Style::default().fg(Color::Yellow),
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD | Modifier::REVERSED),
        )
    } else {
        (
            Style::default().fg(Color::DarkGray),
            Style::default().fg(Color::White).add_modifier(Modifier::BOLD),
        )
    };

    let inner_width = area.width.saturating_sub(4) as usize;
    let lines = vec![
        Line::from(format!(
            "Capital: {}",
            truncate_str(country.first_capital().unwrap_or("N/A"), inner_width.saturating_sub(9))
        )),
        Line::from(format!(
            "Population: {}",
            format_population(country.population)
        )),
        Line::from(format!("Region: {}", country.region)),
    ];

    let title = format!(" {} ", truncate_str(&country.name.common, inner_width));
    let card = Paragraph::new(lines).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(border_style)
            .title(title)
            .title_style(title_style),
    );
    frame.render_widget(card, area);
}
