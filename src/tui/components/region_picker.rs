//! # Region Picker Component
//!
//! Centered overlay for choosing the region filter. Opened with `f` in
//! Browse mode. The first entry is always "All Regions" (empty filter);
//! the rest are the distinct regions present in the loaded snapshot.
//!
//! Follows the persistent state + transient wrapper pattern:
//! - `RegionPickerState` lives in `TuiState` (None = hidden)
//! - `RegionPicker` is created each frame with borrowed state

use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::Line;
use ratatui::widgets::{Block, Borders, Clear, List, ListItem, ListState, Padding, Paragraph};

use crate::tui::event::TuiEvent;

/// Persistent state for the region picker overlay.
pub struct RegionPickerState {
    /// Entry 0 is "All Regions"; the rest are region names.
    pub regions: Vec<String>,
    pub selected: usize,
    pub list_state: ListState,
    /// The filter active when the picker was opened (empty = all).
    current: String,
}

impl RegionPickerState {
    pub fn new(regions: Vec<String>, current: &str) -> Self {
        let mut entries = vec![String::from("All Regions")];
        entries.extend(regions);

        // Start on the active filter so Enter is a no-op by default
        let selected = entries
            .iter()
            .skip(1)
            .position(|r| r == current)
            .map(|i| i + 1)
            .unwrap_or(0);

        let mut list_state = ListState::default();
        list_state.select(Some(selected));
        Self {
            regions: entries,
            selected,
            list_state,
            current: current.to_string(),
        }
    }

    /// Handle a key event, returning a RegionEvent if the overlay should act.
    pub fn handle_event(&mut self, event: &TuiEvent) -> Option<RegionEvent> {
        match event {
            TuiEvent::Escape => Some(RegionEvent::Dismiss),
            TuiEvent::CursorUp => {
                self.selected = self.selected.saturating_sub(1);
                self.list_state.select(Some(self.selected));
                None
            }
            TuiEvent::CursorDown => {
                self.selected = (self.selected + 1).min(self.regions.len() - 1);
                self.list_state.select(Some(self.selected));
                None
            }
            TuiEvent::Submit => {
                let region = if self.selected == 0 {
                    String::new()
                } else {
                    self.regions[self.selected].clone()
                };
                Some(RegionEvent::Select(region))
            }
            _ => None,
        }
    }
}

/// Events emitted by the region picker.
pub enum RegionEvent {
    /// Apply this region filter; empty string means "all".
    Select(String),
    Dismiss,
}

/// Transient render wrapper for the region picker overlay.
pub struct RegionPicker<'a> {
    state: &'a mut RegionPickerState,
}

impl<'a> RegionPicker<'a> {
    pub fn new(state: &'a mut RegionPickerState) -> Self {
        Self { state }
    }

    pub fn render(&mut self, frame: &mut Frame, area: Rect) {
        let overlay = centered_rect(40, 50, area);

        // Clear underlying content
        frame.render_widget(Clear, overlay);

        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::DarkGray))
            .title(" Regions ")
            .title_alignment(Alignment::Left)
            .title_bottom(Line::from(" Enter Select  Esc Back ").centered())
            .padding(Padding::horizontal(1));

        if self.state.regions.len() <= 1 {
            let empty = Paragraph::new("No regions loaded yet.")
                .style(Style::default().fg(Color::DarkGray))
                .alignment(Alignment::Center)
                .block(block);
            frame.render_widget(empty, overlay);
            return;
        }

        let items: Vec<ListItem> = self
            .state
            .regions
            .iter()
            .enumerate()
            .map(|(i, region)| {
                let is_active = if i == 0 {
                    self.state.current.is_empty()
                } else {
                    *region == self.state.current
                };
                let marker = if is_active { " *" } else { "" };

                let style = if i == self.state.selected {
                    Style::default()
                        .fg(Color::White)
                        .add_modifier(Modifier::BOLD | Modifier::REVERSED)
                } else if is_active {
                    Style::default().fg(Color::Cyan)
                } else {
                    Style::default().fg(Color::Gray)
                };

                ListItem::new(Line::styled(format!("{region}{marker}"), style))
            })
            .collect();

        let list = List::new(items).block(block);
        frame.render_stateful_widget(list, overlay, &mut self.state.list_state);
    }
}

/// Compute a centered rect using percentage of the outer rect.
fn centered_rect(percent_x: u16, percent_y: u16, outer: Rect) -> Rect {
    let [_, center_v, _] = Layout::vertical([
        Constraint::Percentage((100 - percent_y) / 2),
        Constraint::Percentage(percent_y),
        Constraint::Percentage((100 - percent_y) / 2),
    ])
    .areas(outer);
    let [_, center, _] = Layout::horizontal([
        Constraint::Percentage((100 - percent_x) / 2),
        Constraint::Percentage(percent_x),
        Constraint::Percentage((100 - percent_x) / 2),
    ])
    .areas(center_v);
    center
}
