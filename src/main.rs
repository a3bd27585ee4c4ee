//! twobytwo - Terminal 2x2 Matrix Editor
//!
//! Edits a 2x2 integer matrix in the terminal. Each cell is an editable
//! field; edits are published on an event bus and applied by the grid that
//! owns the values.

use std::io;

use anyhow::Result;
use clap::Parser;
use crossterm::{
    event::{self, Event, KeyCode, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::{Backend, CrosstermBackend},
    Terminal,
};

use twobytwo::application::{App, AppMode};
use twobytwo::infrastructure::{init_logging, Config};
use twobytwo::presentation::{render_ui, InputHandler};

/// Entry point for the matrix editor.
///
/// Installs logging, sets up the terminal, runs the event loop until the
/// user quits and restores the terminal before reporting any error.
fn main() -> Result<()> {
    let config = Config::parse();
    init_logging(&config)?;

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let mut app = App::default();
    let res = run_app(&mut terminal, &mut app);

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(err) = res {
        tracing::error!("event loop failed: {err}");
        return Err(err.into());
    }

    let matrix = app.matrix();
    tracing::info!(?matrix, "exiting");
    if config.print_on_exit {
        println!("{}", serde_json::to_string(&matrix)?);
    }

    Ok(())
}

/// Main application event loop.
///
/// Redraws after every key press and stops when the user presses 'q' in
/// normal mode.
fn run_app<B: Backend>(terminal: &mut Terminal<B>, app: &mut App) -> io::Result<()> {
    loop {
        terminal.draw(|f| render_ui(f, app))?;

        if let Event::Key(key) = event::read()? {
            if key.kind == KeyEventKind::Press {
                match key.code {
                    KeyCode::Char('q') if matches!(app.mode, AppMode::Normal) => return Ok(()),
                    _ => InputHandler::handle_key_event(app, key.code, key.modifiers),
                }
            }
        }
    }
}
