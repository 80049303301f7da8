//! # TUI Adapter
//!
//! The ratatui-specific layer. Handles terminal I/O, renders the UI,
//! and translates keyboard events into core::Action values.
//!
//! This is the only module that knows about ratatui and crossterm.
//!
//! ## Redraw Strategy
//!
//! The event loop only redraws when something changed: an input event
//! arrived, a background fetch reported back, or the terminal resized.
//! Otherwise it sleeps in `poll_event_timeout`.

mod component;
mod components;
mod event;
mod ui;

use std::io::stdout;
use std::sync::{Arc, mpsc};

use crossterm::event::{DisableMouseCapture, EnableMouseCapture};
use crossterm::execute;
use log::{debug, info, warn};
use tui_scrollview::ScrollViewState;

use crate::api::{CountrySource, RestCountriesClient};
use crate::core::action::{Action, Effect, update};
use crate::core::config::ResolvedConfig;
use crate::core::state::{App, Route, SortKey, ViewMode};
use crate::tui::component::EventHandler;
use crate::tui::components::{
    CountryTableState, GridState, RegionEvent, RegionPickerState, SearchBar, SearchEvent,
};
use crate::tui::event::{TuiEvent, poll_event_immediate, poll_event_timeout};

/// Modal input mode: determines how keyboard events are interpreted on
/// the collection view.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputMode {
    /// Keystrokes edit the search query. Esc switches to Browse.
    Search,
    /// Arrow keys move the selection. Typing auto-switches to Search.
    Browse,
}

/// TUI-specific presentation state (not part of core business logic)
pub struct TuiState {
    pub input_mode: InputMode,
    pub search_bar: SearchBar,
    /// Index into the derived (filtered) list, shared by grid and table.
    pub selected: usize,
    pub table: CountryTableState,
    pub grid: GridState,
    /// Region filter overlay (None = hidden)
    pub region_picker: Option<RegionPickerState>,
    pub detail_scroll: ScrollViewState,
}

impl TuiState {
    pub fn new() -> Self {
        Self {
            input_mode: InputMode::Search, // User expects to type immediately
            search_bar: SearchBar::new(),
            selected: 0,
            table: CountryTableState::new(),
            grid: GridState::new(),
            region_picker: None,
            detail_scroll: ScrollViewState::default(),
        }
    }

    fn clamp_selection(&mut self, visible: usize) {
        if visible == 0 {
            self.selected = 0;
        } else if self.selected >= visible {
            self.selected = visible - 1;
        }
    }
}

struct TerminalModeGuard;

impl TerminalModeGuard {
    fn new() -> std::io::Result<Self> {
        execute!(stdout(), EnableMouseCapture)?;
        info!("Terminal modes enabled (mouse capture)");
        Ok(Self)
    }
}

impl Drop for TerminalModeGuard {
    fn drop(&mut self) {
        let _ = execute!(stdout(), DisableMouseCapture);
    }
}

pub fn run(config: ResolvedConfig) -> std::io::Result<()> {
    let source: Arc<dyn CountrySource> = Arc::new(RestCountriesClient::new(
        Some(config.base_url.clone()),
        config.timeout_secs,
    ));
    let mut app = App::new(source.clone(), config.view_mode, config.sort_key);
    let mut tui = TuiState::new();

    let mut terminal = ratatui::init();
    let _terminal_mode_guard = TerminalModeGuard::new();

    // Channel for actions from background fetch tasks
    let (tx, rx) = mpsc::channel();

    // The one-shot collection load for this session
    spawn_collection_fetch(source.clone(), tx.clone());

    let mut needs_redraw = true; // Force first frame

    loop {
        // Keep selection within the derived list and sync search focus
        let visible = app.collection.filtered().len();
        tui.clamp_selection(visible);
        tui.search_bar.focused = tui.input_mode == InputMode::Search
            && app.route == Route::Collection
            && tui.region_picker.is_none();

        if needs_redraw {
            terminal.draw(|f| ui::draw_ui(f, &app, &mut tui))?;
            needs_redraw = false;
        }

        let first_event = poll_event_timeout(std::time::Duration::from_millis(250));

        // Process first event + drain ALL pending events before next draw
        let mut should_quit = false;
        if first_event.is_some() {
            needs_redraw = true;
        }
        for tui_event in first_event
            .into_iter()
            .chain(std::iter::from_fn(poll_event_immediate))
        {
            // Resize just needs a redraw (already flagged above)
            if matches!(tui_event, TuiEvent::Resize) {
                continue;
            }

            // Ctrl+C always quits regardless of mode
            if matches!(tui_event, TuiEvent::ForceQuit) {
                if update(&mut app, Action::Quit) == Effect::Quit {
                    should_quit = true;
                }
                continue;
            }

            // When the region picker is open, route all events to it
            if let Some(ref mut picker) = tui.region_picker {
                if let Some(region_event) = picker.handle_event(&tui_event) {
                    match region_event {
                        RegionEvent::Select(region) => {
                            update(&mut app, Action::RegionSelected(region));
                            tui.selected = 0;
                        }
                        RegionEvent::Dismiss => {}
                    }
                    tui.region_picker = None;
                }
                continue;
            }

            let effect = match &app.route {
                Route::Detail(_) => handle_detail_event(&mut app, &mut tui, &tui_event),
                Route::Collection => handle_collection_event(&mut app, &mut tui, &tui_event),
            };
            match effect {
                Effect::Quit => should_quit = true,
                Effect::FetchDetail { name, seq } => {
                    spawn_detail_fetch(source.clone(), name, seq, tx.clone());
                }
                Effect::None => {}
            }
        }

        if should_quit {
            break;
        }

        // Handle background fetch results
        while let Ok(action) = rx.try_recv() {
            needs_redraw = true;
            debug!("Event loop received: {:?}", action);
            match update(&mut app, action) {
                Effect::Quit => should_quit = true,
                Effect::FetchDetail { name, seq } => {
                    spawn_detail_fetch(source.clone(), name, seq, tx.clone());
                }
                Effect::None => {}
            }
        }

        if should_quit {
            break;
        }
    }

    ratatui::restore();
    Ok(())
}

/// Detail view: scrolling plus back navigation.
fn handle_detail_event(app: &mut App, tui: &mut TuiState, tui_event: &TuiEvent) -> Effect {
    match tui_event {
        TuiEvent::Escape | TuiEvent::Backspace => update(app, Action::GoBack),
        TuiEvent::InputChar('q') => update(app, Action::Quit),
        TuiEvent::CursorUp | TuiEvent::ScrollUp => {
            tui.detail_scroll.scroll_up();
            Effect::None
        }
        TuiEvent::CursorDown | TuiEvent::ScrollDown => {
            tui.detail_scroll.scroll_down();
            Effect::None
        }
        TuiEvent::PageUp => {
            tui.detail_scroll.scroll_page_up();
            Effect::None
        }
        TuiEvent::PageDown => {
            tui.detail_scroll.scroll_page_down();
            Effect::None
        }
        _ => Effect::None,
    }
}

/// Collection view: modal dispatch between Search and Browse.
fn handle_collection_event(app: &mut App, tui: &mut TuiState, tui_event: &TuiEvent) -> Effect {
    // Selection movement works in both modes (arrow keys never type)
    match tui_event {
        TuiEvent::CursorUp | TuiEvent::ScrollUp => {
            move_selection_vertically(app, tui, -1);
            return Effect::None;
        }
        TuiEvent::CursorDown | TuiEvent::ScrollDown => {
            move_selection_vertically(app, tui, 1);
            return Effect::None;
        }
        TuiEvent::PageUp => {
            tui.selected = tui.selected.saturating_sub(10);
            return Effect::None;
        }
        TuiEvent::PageDown => {
            move_selection(app, tui, 10);
            return Effect::None;
        }
        _ => {}
    }

    match tui.input_mode {
        InputMode::Search => match tui_event {
            // Esc or Enter hands focus to the list
            TuiEvent::Escape | TuiEvent::Submit => {
                tui.input_mode = InputMode::Browse;
                Effect::None
            }
            other => {
                if let Some(SearchEvent::Changed(search)) = tui.search_bar.handle_event(other) {
                    tui.selected = 0;
                    return update(app, Action::SearchChanged(search));
                }
                Effect::None
            }
        },
        InputMode::Browse => match tui_event {
            TuiEvent::Submit => {
                let name = app
                    .collection
                    .filtered()
                    .get(tui.selected)
                    .map(|c| c.name.common.clone());
                match name {
                    Some(name) => {
                        tui.detail_scroll = ScrollViewState::default();
                        update(app, Action::OpenDetail(name))
                    }
                    None => Effect::None,
                }
            }
            TuiEvent::CursorLeft => {
                if app.collection.view_mode == ViewMode::Grid {
                    tui.selected = tui.selected.saturating_sub(1);
                }
                Effect::None
            }
            TuiEvent::CursorRight => {
                if app.collection.view_mode == ViewMode::Grid {
                    move_selection(app, tui, 1);
                }
                Effect::None
            }
            TuiEvent::InputChar('q') => update(app, Action::Quit),
            TuiEvent::InputChar('v') => {
                let mode = app.collection.view_mode.toggled();
                update(app, Action::SetViewMode(mode))
            }
            TuiEvent::InputChar('n') => update(app, Action::SortBy(SortKey::Name)),
            TuiEvent::InputChar('p') => update(app, Action::SortBy(SortKey::Population)),
            TuiEvent::InputChar('r') => update(app, Action::SortBy(SortKey::Region)),
            TuiEvent::InputChar('f') => {
                let regions: Vec<String> = app
                    .collection
                    .available_regions()
                    .into_iter()
                    .map(String::from)
                    .collect();
                tui.region_picker =
                    Some(RegionPickerState::new(regions, &app.collection.region));
                Effect::None
            }
            TuiEvent::InputChar('/') => {
                tui.input_mode = InputMode::Search;
                Effect::None
            }
            // Any other printable character auto-switches to Search
            TuiEvent::InputChar(_) => {
                tui.input_mode = InputMode::Search;
                if let Some(SearchEvent::Changed(search)) = tui.search_bar.handle_event(tui_event)
                {
                    tui.selected = 0;
                    return update(app, Action::SearchChanged(search));
                }
                Effect::None
            }
            TuiEvent::Backspace => {
                if let Some(SearchEvent::Changed(search)) = tui.search_bar.handle_event(tui_event)
                {
                    tui.selected = 0;
                    return update(app, Action::SearchChanged(search));
                }
                Effect::None
            }
            _ => Effect::None,
        },
    }
}

/// Up/Down moves by one table row, or one grid row (the cached column count).
fn move_selection_vertically(app: &App, tui: &mut TuiState, direction: i64) {
    let step = match app.collection.view_mode {
        ViewMode::Grid => tui.grid.columns.max(1),
        ViewMode::List => 1,
    };
    if direction < 0 {
        tui.selected = tui.selected.saturating_sub(step);
    } else {
        move_selection(app, tui, step);
    }
}

fn move_selection(app: &App, tui: &mut TuiState, step: usize) {
    let visible = app.collection.filtered().len();
    if visible == 0 {
        return;
    }
    tui.selected = (tui.selected + step).min(visible - 1);
}

fn spawn_collection_fetch(source: Arc<dyn CountrySource>, tx: mpsc::Sender<Action>) {
    info!("Spawning collection fetch");
    tokio::spawn(async move {
        let result = source.fetch_all().await;
        if tx.send(Action::CountriesLoaded(result)).is_err() {
            warn!("Failed to send collection result: receiver dropped");
        }
    });
}

fn spawn_detail_fetch(
    source: Arc<dyn CountrySource>,
    name: String,
    seq: u64,
    tx: mpsc::Sender<Action>,
) {
    info!("Spawning detail fetch for {name} (seq={seq})");
    tokio::spawn(async move {
        let result = source.fetch_by_name(&name).await;
        if tx.send(Action::DetailLoaded { seq, result }).is_err() {
            warn!("Failed to send detail result for {name}: receiver dropped");
        }
    });
}
