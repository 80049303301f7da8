//! # TitleBar Component
//!
//! One-line header: application name, shown/total record counts, and the
//! active region filter. Purely presentational - all fields are props.

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Style};
use ratatui::text::Span;

use crate::tui::component::Component;

pub struct TitleBar {
    pub shown: usize,
    pub total: usize,
    pub region: String,
    pub status_message: String,
}

impl TitleBar {
    fn title_text(&self) -> String {
        let mut text = format!("Atlas ({}/{} countries)", self.shown, self.total);
        if !self.region.is_empty() {
            text.push_str(&format!(" | Region: {}", self.region));
        }
        if !self.status_message.is_empty() {
            text.push_str(&format!(" | {}", self.status_message));
        }
        text
    }
}

impl Component for TitleBar {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let span = Span::styled(self.title_text(), Style::default().fg(Color::Cyan));
        frame.render_widget(span, area);
    }
}
