//! Frame layout and route dispatch. Translates the current `App` state
//! into widgets; all interaction lives in `tui::run`.

use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Layout, Rect};
use ratatui::style::{Color, Style};
use ratatui::text::Span;
use ratatui::widgets::{Block, Paragraph};

use crate::core::state::{App, Route, ViewMode};
use crate::tui::component::Component;
use crate::tui::components::{
    CountryGrid, CountryTable, Detail, RegionPicker, TitleBar,
};
use crate::tui::{InputMode, TuiState};

pub fn draw_ui(frame: &mut Frame, app: &App, tui: &mut TuiState) {
    use Constraint::{Length, Min};
    let layout = Layout::vertical([Length(1), Min(0), Length(1)]);
    let [title_area, main_area, status_area] = layout.areas(frame.area());

    let filtered = app.collection.filtered();

    let mut title_bar = TitleBar {
        shown: filtered.len(),
        total: app.collection.countries.len(),
        region: app.collection.region.clone(),
        status_message: app.status_message.clone(),
    };
    title_bar.render(frame, title_area);

    match &app.route {
        Route::Collection => draw_collection(frame, main_area, app, tui, &filtered),
        Route::Detail(name) => {
            Detail::new(&app.detail, name).render(frame, main_area, &mut tui.detail_scroll);
        }
    }

    let hints = key_hints(app, tui);
    frame.render_widget(
        Span::styled(hints, Style::default().fg(Color::DarkGray)),
        status_area,
    );

    // Overlay renders last, on top of everything
    if let Some(ref mut picker) = tui.region_picker {
        RegionPicker::new(picker).render(frame, frame.area());
    }
}

fn draw_collection(
    frame: &mut Frame,
    area: Rect,
    app: &App,
    tui: &mut TuiState,
    filtered: &[&crate::api::Country],
) {
    use Constraint::{Length, Min};
    let [search_area, list_area] = Layout::vertical([Length(3), Min(0)]).areas(area);

    tui.search_bar.render(frame, search_area);

    if app.collection.loading {
        draw_centered_notice(frame, list_area, "Loading countries...");
        return;
    }
    if let Some(error_msg) = &app.collection.error {
        draw_error_view(frame, list_area, error_msg);
        return;
    }
    if filtered.is_empty() {
        draw_centered_notice(frame, list_area, "No countries match the current filters.");
        return;
    }

    let selected = Some(tui.selected.min(filtered.len() - 1));
    match app.collection.view_mode {
        ViewMode::Grid => {
            CountryGrid::new(&mut tui.grid, filtered, selected).render(frame, list_area);
        }
        ViewMode::List => {
            CountryTable::new(&mut tui.table, filtered, app.collection.sort, selected)
                .render(frame, list_area);
        }
    }
}

fn draw_centered_notice(frame: &mut Frame, area: Rect, message: &str) {
    let notice = Paragraph::new(message)
        .style(Style::default().fg(Color::DarkGray))
        .alignment(Alignment::Center);
    frame.render_widget(notice, area);
}

fn draw_error_view(frame: &mut Frame, area: Rect, error_msg: &str) {
    let error_paragraph = Paragraph::new(error_msg)
        .block(Block::bordered().title("ERROR"))
        .style(Style::default().fg(Color::Red))
        .alignment(Alignment::Center);
    frame.render_widget(error_paragraph, area);
}

fn key_hints(app: &App, tui: &TuiState) -> &'static str {
    if tui.region_picker.is_some() {
        return " \u{2191}\u{2193} select  Enter apply  Esc close";
    }
    match app.route {
        Route::Detail(_) => " \u{2191}\u{2193} scroll  Esc back  q quit",
        Route::Collection => match tui.input_mode {
            InputMode::Search => " type to search  Enter/Esc browse  Ctrl+C quit",
            InputMode::Browse => {
                " \u{2191}\u{2193} select  Enter details  n/p/r sort  v view  f region  / search  q quit"
            }
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::action::{Action, update};
    use crate::test_support::{country, test_app};
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;

    fn draw(app: &App) {
        let backend = TestBackend::new(80, 24);
        let mut terminal = Terminal::new(backend).unwrap();
        let mut tui = TuiState::new();
        terminal.draw(|f| draw_ui(f, app, &mut tui)).unwrap();
    }

    #[test]
    fn test_draw_loading_collection() {
        let app = test_app();
        draw(&app);
    }

    #[test]
    fn test_draw_loaded_collection_both_modes() {
        let mut app = test_app();
        update(
            &mut app,
            Action::CountriesLoaded(Ok(vec![
                country("Chad", "Africa", 100),
                country("Chile", "Americas", 200),
            ])),
        );
        draw(&app);

        update(
            &mut app,
            Action::SetViewMode(crate::core::state::ViewMode::List),
        );
        draw(&app);
    }

    #[test]
    fn test_draw_collection_error() {
        let mut app = test_app();
        update(
            &mut app,
            Action::CountriesLoaded(Err(crate::api::SourceError::Network(
                "connection refused".to_string(),
            ))),
        );
        draw(&app);
    }

    #[test]
    fn test_draw_detail_states() {
        let mut app = test_app();
        update(&mut app, Action::OpenDetail("Chad".to_string()));
        draw(&app); // loading

        update(
            &mut app,
            Action::DetailLoaded {
                seq: 1,
                result: Ok(country("Chad", "Africa", 100)),
            },
        );
        draw(&app); // loaded

        update(&mut app, Action::OpenDetail("Atlantis".to_string()));
        update(
            &mut app,
            Action::DetailLoaded {
                seq: 2,
                result: Err(crate::api::SourceError::NotFound),
            },
        );
        draw(&app); // not found
    }
}
