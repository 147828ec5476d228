//! Finder Terminal User Interface (TUI)
//!
//! A single screen holding the search form, the submit control, the station
//! cards and modal dialogs for warnings, progress and errors.

pub mod app;
pub mod events;
pub mod ui;

pub use app::App;
pub use events::AppEvent;

use anyhow::Result;
use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io;
use tracing::{error, info};

/// Set up the terminal, run the app, and restore the terminal afterwards
pub async fn run_tui(mut app: App) -> Result<()> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    info!("Starting main application loop");
    let result = app.run(&mut terminal).await;

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    match &result {
        Ok(_) => info!("Finder TUI exited successfully"),
        Err(e) => error!("Finder TUI encountered an error: {}", e),
    }

    result
}
