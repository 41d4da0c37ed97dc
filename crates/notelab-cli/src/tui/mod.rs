//! NoteLab TUI
//!
//! Terminal view of the account and sync status.
//!
//! ## Keys
//!
//! - l: Open/close the sign-in form (signed out)
//! - Enter: Send the login link (form open)
//! - Esc: Close the form
//! - s: Sync now (signed in)
//! - o: Sign out (signed in)
//! - r: Refresh status
//! - ?: Help
//! - q / Ctrl-C: Quit

mod app;
mod ui;

use std::io::stdout;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use crossterm::{
    event::{self, Event, KeyEventKind},
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
    ExecutableCommand,
};
use ratatui::prelude::*;
use tracing::info;

use notelab_core::{Config, HttpSyncClient, StatusView, SyncClient};

use app::App;

use crate::logging;

/// Run the TUI application
pub async fn run(config: Config) -> Result<()> {
    logging::init_tui_logging(&config);

    // Fail before touching the terminal if the service isn't configured
    config.ensure_data_dir()?;
    let client = HttpSyncClient::open(&config).context("Failed to open sync client")?;
    let sync_url = config.sync_url.clone().unwrap_or_default();

    let view = StatusView::mount(Arc::new(client) as Arc<dyn SyncClient>);
    let mut app = App::new(view, sync_url);
    info!("TUI started, state={:?}", app.view.state());

    // Setup terminal
    enable_raw_mode()?;
    stdout().execute(EnterAlternateScreen)?;
    let mut terminal = Terminal::new(CrosstermBackend::new(stdout()))?;

    let result = run_app(&mut terminal, &mut app).await;

    // Restore terminal
    disable_raw_mode()?;
    stdout().execute(LeaveAlternateScreen)?;

    result
}

async fn run_app<B: Backend>(terminal: &mut Terminal<B>, app: &mut App) -> Result<()> {
    loop {
        app.tick();

        terminal.draw(|frame| ui::draw(frame, app))?;

        tokio::time::sleep(Duration::from_millis(50)).await;

        // Check for terminal events (non-blocking)
        if event::poll(Duration::from_millis(0))? {
            if let Event::Key(key) = event::read()? {
                // Only handle key press events (not release)
                if key.kind != KeyEventKind::Press {
                    continue;
                }

                if let Some(command) = app.handle_key(key.code, key.modifiers) {
                    // Show the in-flight command before awaiting the service
                    app.working = Some(command);
                    terminal.draw(|frame| ui::draw(frame, app))?;

                    app.view.execute(command).await;
                    app.working = None;
                }
            }
        }

        if app.should_quit {
            break;
        }
    }

    Ok(())
}
