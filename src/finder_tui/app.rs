//! Main TUI application state and logic

use anyhow::Result;
use crossterm::event::{Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use ratatui::{
    backend::Backend,
    layout::{Constraint, Direction, Layout, Rect},
    widgets::{Block, Borders, Paragraph},
    Frame, Terminal,
};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc::{unbounded_channel, UnboundedReceiver, UnboundedSender};
use tracing::{debug, info};

use super::events::AppEvent;
use super::ui::{self, Styles};
use crate::finder::{
    client::StationSource,
    controller::FinderController,
    form::{FormField, SearchForm},
    render::render_cards,
};

const POLL_INTERVAL: Duration = Duration::from_millis(100);

/// Finder screen state
pub struct App {
    pub controller: FinderController,
    source: Arc<dyn StationSource>,
    event_tx: UnboundedSender<AppEvent>,
    event_rx: UnboundedReceiver<AppEvent>,

    pub scroll_offset: usize,
    pub should_quit: bool,
    tick: usize,
}

impl App {
    pub fn new(source: Arc<dyn StationSource>, form: SearchForm) -> Self {
        let (event_tx, event_rx) = unbounded_channel();
        Self {
            controller: FinderController::with_form(form),
            source,
            event_tx,
            event_rx,
            scroll_offset: 0,
            should_quit: false,
            tick: 0,
        }
    }

    /// Run the main application loop
    pub async fn run<B: Backend>(&mut self, terminal: &mut Terminal<B>) -> Result<()> {
        loop {
            terminal.draw(|f| self.draw(f))?;

            if crossterm::event::poll(POLL_INTERVAL)? {
                if let Event::Key(key) = crossterm::event::read()? {
                    if key.kind == KeyEventKind::Press {
                        self.handle_key_event(key);
                    }
                }
            }

            while let Ok(event) = self.event_rx.try_recv() {
                self.handle_app_event(event);
            }

            self.tick = self.tick.wrapping_add(1);

            if self.should_quit {
                break;
            }
        }

        Ok(())
    }

    /// Wait for the next background event and apply it
    pub async fn process_next_event(&mut self) -> bool {
        match self.event_rx.recv().await {
            Some(event) => {
                self.handle_app_event(event);
                true
            }
            None => false,
        }
    }

    pub fn handle_app_event(&mut self, event: AppEvent) {
        match event {
            AppEvent::SearchFinished(outcome) => {
                self.controller.complete(outcome);
                self.scroll_offset = 0;
            }
        }
    }

    /// Handle keyboard input events
    pub fn handle_key_event(&mut self, key: KeyEvent) {
        if key.modifiers.contains(KeyModifiers::CONTROL) {
            match key.code {
                KeyCode::Char('c') => {
                    self.should_quit = true;
                    return;
                }
                KeyCode::Char('l') if self.controller.notification().is_none() => {
                    self.controller.form.clear();
                    return;
                }
                _ => return,
            }
        }

        // Modal dialogs swallow input until dismissed
        if self.controller.notification().is_some() {
            if matches!(key.code, KeyCode::Enter | KeyCode::Esc) {
                self.controller.dismiss_notification();
            }
            return;
        }

        let on_selector = self.controller.form.focused_field() == FormField::ChargingType;

        match key.code {
            KeyCode::Esc => {
                self.should_quit = true;
            }
            KeyCode::Tab => {
                self.controller.form.next_field();
            }
            KeyCode::BackTab => {
                self.controller.form.previous_field();
            }
            KeyCode::Enter => {
                self.start_search();
            }
            KeyCode::Left if on_selector => self.controller.form.previous_charging_type(),
            KeyCode::Right if on_selector => self.controller.form.next_charging_type(),
            KeyCode::Left => self.with_input(|input| input.move_cursor_left()),
            KeyCode::Right => self.with_input(|input| input.move_cursor_right()),
            KeyCode::Home => self.with_input(|input| input.move_cursor_to_start()),
            KeyCode::End => self.with_input(|input| input.move_cursor_to_end()),
            KeyCode::Backspace => self.controller.form.handle_backspace(),
            KeyCode::Delete => self.controller.form.handle_delete(),
            KeyCode::Char(c) => self.controller.form.handle_char_input(c),
            KeyCode::Up => {
                self.scroll_offset = self.scroll_offset.saturating_sub(1);
            }
            KeyCode::Down => self.scroll_down(1),
            KeyCode::PageUp => {
                self.scroll_offset = self.scroll_offset.saturating_sub(10);
            }
            KeyCode::PageDown => self.scroll_down(10),
            _ => {}
        }
    }

    /// Scroll down, stopping at the last rendered card line
    fn scroll_down(&mut self, lines: usize) {
        self.scroll_offset = (self.scroll_offset + lines).min(self.max_scroll());
    }

    fn max_scroll(&self) -> usize {
        let cards = render_cards(self.controller.results());
        ui::card_lines(&cards, usize::MAX).len().saturating_sub(1)
    }

    fn with_input<F>(&mut self, edit: F)
    where
        F: FnOnce(&mut crate::finder::form::TextInput),
    {
        if let Some(input) = self.controller.form.focused_input_mut() {
            edit(input);
        }
    }

    /// Validate the form and send the request on a background task
    pub fn start_search(&mut self) {
        if !self.controller.can_submit() {
            debug!("Submit ignored while a search is in flight");
            return;
        }

        let Some(query) = self.controller.begin_submit() else {
            return;
        };

        let source = Arc::clone(&self.source);
        let tx = self.event_tx.clone();
        tokio::spawn(async move {
            let outcome = source.find_stations(&query).await;
            // Receiver only goes away when the app is shutting down
            let _ = tx.send(AppEvent::SearchFinished(outcome));
        });
        info!("Search request dispatched");
    }

    /// Draw the UI
    pub fn draw(&mut self, f: &mut Frame) {
        let size = f.size();

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3), // Title
                Constraint::Length(3), // Coordinates
                Constraint::Length(3), // Charging type
                Constraint::Length(3), // Submit
                Constraint::Min(0),    // Results
                Constraint::Length(3), // Status bar
            ])
            .split(size);

        let title = Paragraph::new("EV Charging Station Finder")
            .style(Styles::title())
            .alignment(ratatui::layout::Alignment::Center)
            .block(Block::default().borders(Borders::ALL));
        f.render_widget(title, chunks[0]);

        self.draw_form(f, chunks[1], chunks[2]);
        ui::render_submit(f, chunks[3], self.controller.can_submit());

        let cards = render_cards(self.controller.results());
        ui::render_results(f, chunks[4], &cards, self.scroll_offset);

        self.draw_status_bar(f, chunks[5]);

        if let Some(notification) = self.controller.notification() {
            ui::render_notification(f, size, notification, self.tick);
        }
    }

    fn draw_form(&self, f: &mut Frame, coordinates: Rect, selector: Rect) {
        let form = &self.controller.form;
        let focused = form.focused_field();
        let modal_open = self.controller.notification().is_some();

        let halves = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
            .split(coordinates);

        ui::render_input(
            f,
            halves[0],
            FormField::Latitude.as_str(),
            "e.g. 37.7749",
            &form.latitude,
            !modal_open && focused == FormField::Latitude,
        );
        ui::render_input(
            f,
            halves[1],
            FormField::Longitude.as_str(),
            "e.g. -122.4194",
            &form.longitude,
            !modal_open && focused == FormField::Longitude,
        );
        ui::render_selector(
            f,
            selector,
            form.charging_type,
            !modal_open && focused == FormField::ChargingType,
        );
    }

    fn draw_status_bar(&self, f: &mut Frame, area: Rect) {
        let (text, style) = if self.controller.is_loading() {
            ("Searching...".to_string(), Styles::warning())
        } else {
            (
                format!(
                    "{} stations | Tab: Next field | Enter: Find Stations | Ctrl+L: Clear | ↑/↓: Scroll | Esc: Quit",
                    self.controller.results().len()
                ),
                Styles::inactive(),
            )
        };

        let status_bar = Paragraph::new(text)
            .style(style)
            .block(Block::default().borders(Borders::ALL));

        f.render_widget(status_bar, area);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::finder::errors::FinderError;
    use crate::finder::notification::NotificationKind;
    use crate::models::{
        ChargingType, PortCount, SearchQuery, SearchResultSet, Station, StationResult,
    };
    use async_trait::async_trait;
    use ratatui::backend::TestBackend;
    use std::sync::Mutex;

    struct FixedSource {
        outcome: Mutex<Option<Result<SearchResultSet, FinderError>>>,
        queries: Mutex<Vec<SearchQuery>>,
    }

    impl FixedSource {
        fn new(outcome: Result<SearchResultSet, FinderError>) -> Arc<Self> {
            Arc::new(Self {
                outcome: Mutex::new(Some(outcome)),
                queries: Mutex::new(Vec::new()),
            })
        }
    }

    #[async_trait]
    impl StationSource for FixedSource {
        async fn find_stations(
            &self,
            query: &SearchQuery,
        ) -> Result<SearchResultSet, FinderError> {
            self.queries.lock().unwrap().push(query.clone());
            self.outcome
                .lock()
                .unwrap()
                .take()
                .unwrap_or_else(|| Ok(Vec::new()))
        }
    }

    fn civic_center() -> StationResult {
        StationResult {
            station: Station {
                name: "Civic Center Garage".to_string(),
                street_address: "355 McAllister St".to_string(),
                city: "San Francisco".to_string(),
                state: "CA".to_string(),
                ev_dc_fast: Some(PortCount::Integer(2)),
                ev_level2: None,
                ev_level1: Some(PortCount::Text(String::new())),
            },
            distance_meters: 1500.0,
        }
    }

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn type_text(app: &mut App, text: &str) {
        for c in text.chars() {
            app.handle_key_event(key(KeyCode::Char(c)));
        }
    }

    fn screen_text(app: &mut App) -> String {
        let mut terminal = Terminal::new(TestBackend::new(100, 40)).unwrap();
        terminal.draw(|f| app.draw(f)).unwrap();
        terminal
            .backend()
            .buffer()
            .content
            .iter()
            .map(|cell| cell.symbol())
            .collect()
    }

    #[tokio::test]
    async fn test_empty_form_shows_missing_information() {
        let source = FixedSource::new(Ok(vec![civic_center()]));
        let mut app = App::new(source.clone(), SearchForm::new());

        app.handle_key_event(key(KeyCode::Enter));

        assert!(source.queries.lock().unwrap().is_empty());
        let text = screen_text(&mut app);
        assert!(text.contains("Missing Information"));

        app.handle_key_event(key(KeyCode::Esc));
        assert!(app.controller.notification().is_none());
        assert!(!app.should_quit);
    }

    #[tokio::test]
    async fn test_typed_search_renders_station_card() {
        let source = FixedSource::new(Ok(vec![civic_center()]));
        let mut app = App::new(source.clone(), SearchForm::new());

        type_text(&mut app, "37.7749");
        app.handle_key_event(key(KeyCode::Tab));
        type_text(&mut app, "-122.4194");
        app.handle_key_event(key(KeyCode::Tab));
        app.handle_key_event(key(KeyCode::Right));
        app.handle_key_event(key(KeyCode::Enter));

        assert!(app.controller.is_loading());
        assert!(screen_text(&mut app).contains("Finding Stations..."));

        // Input is ignored while the progress dialog is up
        app.handle_key_event(key(KeyCode::Enter));
        app.handle_key_event(key(KeyCode::Esc));
        assert!(app.controller.is_loading());

        assert!(app.process_next_event().await);
        assert!(!app.controller.is_loading());

        let queries = source.queries.lock().unwrap().clone();
        assert_eq!(queries.len(), 1);
        assert_eq!(
            queries[0],
            SearchQuery {
                latitude: 37.7749,
                longitude: -122.4194,
                charging_type: ChargingType::DcFast,
            }
        );

        let text = screen_text(&mut app);
        assert!(text.contains("Stations (1)"));
        assert!(text.contains("Civic Center Garage"));
        assert!(text.contains("San Francisco, CA"));
        assert!(text.contains("1500.00 Meters Or 1.50 Kilometers"));
        assert!(text.contains("DC Fast Charger: 2 ports"));
    }

    #[tokio::test]
    async fn test_failed_search_keeps_results_and_shows_error() {
        let source = FixedSource::new(Err(FinderError::Status { status_code: 500 }));
        let mut app = App::new(
            source,
            SearchForm::prefilled(Some("1.0"), Some("2.0"), None),
        );
        app.controller.begin_submit();
        app.controller.complete(Ok(vec![civic_center()]));

        app.start_search();
        assert!(app.process_next_event().await);

        let note = app.controller.notification().unwrap();
        assert_eq!(note.kind, NotificationKind::Error);
        let text = screen_text(&mut app);
        assert!(text.contains("Oops..."));
        assert!(text.contains("Failed to fetch stations"));
        assert_eq!(app.controller.results().len(), 1);

        app.handle_key_event(key(KeyCode::Enter));
        assert!(app.controller.notification().is_none());
    }

    #[tokio::test]
    async fn test_selector_loses_focus_behind_modal() {
        use ratatui::style::Color;

        fn selector_corner(app: &mut App) -> Color {
            let mut terminal = Terminal::new(TestBackend::new(100, 40)).unwrap();
            terminal.draw(|f| app.draw(f)).unwrap();
            // Title and coordinate rows take the first six lines
            terminal.backend().buffer().get(0, 6).fg
        }

        let source = FixedSource::new(Ok(Vec::new()));
        let mut app = App::new(source, SearchForm::new());
        app.handle_key_event(key(KeyCode::Tab));
        app.handle_key_event(key(KeyCode::Tab));
        assert_eq!(app.controller.form.focused_field(), FormField::ChargingType);
        assert_eq!(selector_corner(&mut app), Color::Yellow);

        app.handle_key_event(key(KeyCode::Enter));
        assert!(app.controller.notification().is_some());
        assert_eq!(selector_corner(&mut app), Color::Gray);
    }

    #[tokio::test]
    async fn test_scroll_stops_at_last_card_line() {
        let source = FixedSource::new(Ok(vec![civic_center(), civic_center()]));
        let mut app = App::new(
            source,
            SearchForm::prefilled(Some("1.0"), Some("2.0"), None),
        );

        app.handle_key_event(key(KeyCode::Down));
        assert_eq!(app.scroll_offset, 0);

        app.start_search();
        assert!(app.process_next_event().await);

        // Two cards of five lines plus one separator
        for _ in 0..20 {
            app.handle_key_event(key(KeyCode::Down));
        }
        assert_eq!(app.scroll_offset, 10);

        app.handle_key_event(key(KeyCode::PageDown));
        assert_eq!(app.scroll_offset, 10);

        app.handle_key_event(key(KeyCode::PageUp));
        assert_eq!(app.scroll_offset, 0);
    }

    #[tokio::test]
    async fn test_ctrl_shortcuts() {
        let source = FixedSource::new(Ok(Vec::new()));
        let mut app = App::new(
            source,
            SearchForm::prefilled(Some("1.0"), Some("2.0"), Some(ChargingType::Level2)),
        );

        app.handle_key_event(KeyEvent::new(KeyCode::Char('l'), KeyModifiers::CONTROL));
        assert!(app.controller.form.latitude.value.is_empty());
        assert_eq!(app.controller.form.charging_type, ChargingType::All);

        app.handle_key_event(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL));
        assert!(app.should_quit);
    }
}
