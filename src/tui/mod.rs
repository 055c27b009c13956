//! TUI module for stokemeet
//!
//! Interactive meeting browser using ratatui.

mod app;
pub mod screens;
pub mod widgets;

use anyhow::Result;
use crossterm::{
    event::{self, Event, KeyCode, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::prelude::*;
use std::io::{self, Stdout};
use std::time::Duration;

use crate::config::Settings;
pub use app::{App, AppScreen};

type Tui = Terminal<CrosstermBackend<Stdout>>;

/// Run the TUI application
pub async fn run(settings: &Settings) -> Result<()> {
    // Build state before touching the terminal so setup errors print normally
    let mut app = App::new(settings.clone())?;

    let mut terminal = setup_terminal()?;
    let result = run_app(&mut terminal, &mut app).await;
    restore_terminal(&mut terminal)?;

    result
}

fn setup_terminal() -> Result<Tui> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    Ok(Terminal::new(CrosstermBackend::new(stdout))?)
}

fn restore_terminal(terminal: &mut Tui) -> Result<()> {
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;
    Ok(())
}

/// Main application loop
async fn run_app<B: Backend>(terminal: &mut Terminal<B>, app: &mut App) -> Result<()> {
    loop {
        terminal.draw(|f| app.draw(f))?;

        // Poll with a timeout so queued work runs between key presses
        if event::poll(Duration::from_millis(100))? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press {
                    if app.is_editing() {
                        // Text inputs own q, ? and Esc
                        app.handle_key(key.code).await?;
                    } else {
                        match key.code {
                            KeyCode::Char('q') | KeyCode::Esc => {
                                if app.should_quit() {
                                    return Ok(());
                                }
                                app.handle_back();
                            }
                            KeyCode::Char('?') => {
                                app.toggle_help();
                            }
                            _ => {
                                app.handle_key(key.code).await?;
                            }
                        }
                    }
                }
            }
        }

        // Run queued network and generation work
        app.update().await?;
    }
}
