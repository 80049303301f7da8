//! # Search Bar Component
//!
//! One-line text input for the collection search query. Emits a
//! `Changed` event on every edit so the derived list updates as the
//! user types.

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::widgets::{Block, Borders, Paragraph};

use crate::tui::component::{Component, EventHandler};
use crate::tui::event::TuiEvent;

pub struct SearchBar {
    pub content: String,
    /// Dimmed and cursor hidden when the user is browsing, not typing.
    pub focused: bool,
}

pub enum SearchEvent {
    Changed(String),
}

impl SearchBar {
    pub fn new() -> Self {
        Self {
            content: String::new(),
            focused: true,
        }
    }
}

impl EventHandler for SearchBar {
    type Event = SearchEvent;

    fn handle_event(&mut self, event: &TuiEvent) -> Option<SearchEvent> {
        match event {
            TuiEvent::InputChar(c) => {
                self.content.push(*c);
                Some(SearchEvent::Changed(self.content.clone()))
            }
            TuiEvent::Backspace => {
                self.content.pop()?;
                Some(SearchEvent::Changed(self.content.clone()))
            }
            _ => None,
        }
    }
}

impl Component for SearchBar {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let border_style = if self.focused {
            Style::default().fg(Color::Cyan)
        } else {
            Style::default().fg(Color::DarkGray).add_modifier(Modifier::DIM)
        };

        let display: &str = if self.content.is_empty() && !self.focused {
            "Search countries..."
        } else {
            &self.content
        };
        let text_style = if self.content.is_empty() {
            Style::default().fg(Color::DarkGray)
        } else {
            Style::default()
        };

        let input = Paragraph::new(display).style(text_style).block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(border_style)
                .title(" Search "),
        );
        frame.render_widget(input, area);

        if self.focused {
            let cursor_x = area.x + 1 + self.content.chars().count() as u16;
            frame.set_cursor_position((cursor_x.min(area.right().saturating_sub(2)), area.y + 1));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_typing_emits_changed() {
        let mut bar = SearchBar::new();
        let event = bar.handle_event(&TuiEvent::InputChar('c'));
        assert!(matches!(event, Some(SearchEvent::Changed(s)) if s == "c"));
        bar.handle_event(&TuiEvent::InputChar('h'));
        assert_eq!(bar.content, "ch");
    }

    #[test]
    fn test_backspace_removes_last_char() {
        let mut bar = SearchBar::new();
        bar.handle_event(&TuiEvent::InputChar('a'));
        bar.handle_event(&TuiEvent::InputChar('b'));
        let event = bar.handle_event(&TuiEvent::Backspace);
        assert!(matches!(event, Some(SearchEvent::Changed(s)) if s == "a"));
    }

    #[test]
    fn test_backspace_on_empty_is_silent() {
        let mut bar = SearchBar::new();
        assert!(bar.handle_event(&TuiEvent::Backspace).is_none());
    }

    #[test]
    fn test_other_events_ignored() {
        let mut bar = SearchBar::new();
        assert!(bar.handle_event(&TuiEvent::CursorUp).is_none());
        assert!(bar.content.is_empty());
    }
}
