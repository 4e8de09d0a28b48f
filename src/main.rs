use std::io;
use std::sync::Arc;
use std::time::Duration;

use cocktail_search::config::AppConfig;
use cocktail_search::core::client::HttpResultSource;
use cocktail_search::core::history::MemoryHistory;
use cocktail_search::core::ingredients::SearchState;
use cocktail_search::core::session::{SearchSession, SessionConfig};
use cocktail_search::tui::app::AppState;
use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use tokio::sync::mpsc;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = AppConfig::load();

    // Initialize logging (file only; the TUI owns the terminal)
    let _log_guard = cocktail_search::core::logging::init_tui(&config.log_dir());
    log::info!("{} v{} starting", cocktail_search::NAME, cocktail_search::VERSION);

    // Optional initial fragment, e.g. `cocktail-search '#gin;lime'`
    let initial = std::env::args()
        .nth(1)
        .map(|address| SearchState::from_address(&address))
        .unwrap_or_default();

    let source = HttpResultSource::from_config(&config.search)?;
    log::info!("Search endpoint: {}", source.endpoint());

    let session = SearchSession::new(MemoryHistory::new(initial), SessionConfig::from(&config));
    let (event_tx, event_rx) = mpsc::unbounded_channel();
    let mut app = AppState::new(session, Arc::new(source), event_rx, event_tx);

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    if config.tui.mouse_enabled {
        execute!(stdout, EnableMouseCapture)?;
    }
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Run the app
    let result = app
        .run(&mut terminal, Duration::from_millis(config.tui.tick_rate_ms))
        .await;

    // Restore terminal
    disable_raw_mode()?;
    if config.tui.mouse_enabled {
        execute!(terminal.backend_mut(), DisableMouseCapture)?;
    }
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(e) = result {
        log::error!("Terminal error: {e}");
        eprintln!("Error: {e}");
        std::process::exit(1);
    }

    log::info!("Exiting");
    Ok(())
}
