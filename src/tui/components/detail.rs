//! # Detail Component
//!
//! Full-record view for one country: loading skeleton, error view with a
//! go-back hint, or the labeled field list. The borders section renders
//! only when the record actually has borders. Content scrolls when taller
//! than the viewport.

use ratatui::Frame;
use ratatui::layout::{Alignment, Rect, Size};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Paragraph, Wrap};
use tui_scrollview::{ScrollView, ScrollViewState, ScrollbarVisibility};

use crate::api::{Country, types::format_population};
use crate::core::state::DetailState;

pub struct Detail<'a> {
    detail: &'a DetailState,
    name: &'a str,
}

impl<'a> Detail<'a> {
    pub fn new(detail: &'a DetailState, name: &'a str) -> Self {
        Self { detail, name }
    }

    pub fn render(&self, frame: &mut Frame, area: Rect, scroll: &mut ScrollViewState) {
        if self.detail.loading {
            let loading = Paragraph::new(format!("Loading {}...", self.name))
                .style(Style::default().fg(Color::DarkGray))
                .alignment(Alignment::Center);
            frame.render_widget(loading, area);
            return;
        }

        if let Some(message) = &self.detail.error {
            render_error(frame, area, message);
            return;
        }
        let Some(country) = &self.detail.country else {
            render_error(frame, area, "Country not found");
            return;
        };

        let content_width = area.width.saturating_sub(1);
        let lines = detail_lines(country);
        let paragraph = Paragraph::new(lines.clone()).wrap(Wrap { trim: false });

        let total_height = lines.len() as u16;
        let mut scroll_view = ScrollView::new(Size::new(content_width, total_height))
            .vertical_scrollbar_visibility(ScrollbarVisibility::Automatic)
            .horizontal_scrollbar_visibility(ScrollbarVisibility::Never);
        scroll_view.render_widget(
            paragraph,
            Rect::new(0, 0, content_width, total_height),
        );
        frame.render_stateful_widget(scroll_view, area, scroll);
    }
}

fn render_error(frame: &mut Frame, area: Rect, message: &str) {
    let lines = vec![
        Line::from(""),
        Line::styled("Oops!", Style::default().add_modifier(Modifier::BOLD)),
        Line::from(""),
        Line::from(message.to_string()),
        Line::from(""),
        Line::styled(
            "Press Esc to go back",
            Style::default().fg(Color::DarkGray),
        ),
    ];
    let paragraph = Paragraph::new(lines).alignment(Alignment::Center);
    frame.render_widget(paragraph, area);
}

fn label_style() -> Style {
    Style::default().fg(Color::DarkGray)
}

fn field(label: &str, value: String) -> Line<'static> {
    Line::from(vec![
        Span::styled(format!("{label:<13}"), label_style()),
        Span::raw(value),
    ])
}

/// The full field list for a loaded record.
fn detail_lines(country: &Country) -> Vec<Line<'static>> {
    let region = match &country.subregion {
        Some(subregion) => format!("{} ({subregion})", country.region),
        None => country.region.clone(),
    };

    let mut lines = vec![
        Line::styled(
            country.name.common.clone(),
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        ),
        Line::styled(country.name.official.clone(), label_style()),
        Line::from(""),
        field("Capital", country.first_capital().unwrap_or("N/A").to_string()),
        field("Region", region),
        field("Population", format_population(country.population)),
        field("Languages", country.language_names().join(", ")),
        field("Currencies", country.currency_labels().join(", ")),
        field("Timezones", country.timezones.join(", ")),
        Line::from(""),
        field("Flag", format!("{} ({})", country.flags.svg, country.flag_label())),
        field("Google Maps", country.maps.google_maps.clone()),
        field("OpenStreetMap", country.maps.open_street_maps.clone()),
    ];

    // Conditional render: absent or empty borders suppress the section
    if country.has_borders() {
        lines.push(Line::from(""));
        lines.push(Line::styled(
            "Bordering Countries",
            Style::default().add_modifier(Modifier::BOLD),
        ));
        lines.push(Line::from(country.borders.join("  ")));
    }

    lines
}
