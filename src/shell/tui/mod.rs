//! Terminal user interface built on [ratatui](https://github.com/ratatui-org/ratatui).
//!
//! The UI is organized into three layers:
//!
//! - **[`app`]**: application state, keyboard event loop, pane focus
//! - **[`panes`]**: render functions for each visible pane (source, frames,
//!   bindings, status bar)
//! - **[`theme`]**: centralized color palette used by all panes
//!
//! [`TuiShell`] owns terminal setup and teardown; [`App`] drives the session.

pub mod app;
pub mod panes;
pub mod theme;

pub use app::App;

use super::InteractiveShell;
use crate::session::Session;
use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io;
use tracing::debug;

/// Full-screen backend
#[derive(Debug, Default)]
pub struct TuiShell;

impl TuiShell {
    pub fn new() -> Self {
        TuiShell
    }
}

impl InteractiveShell for TuiShell {
    fn name(&self) -> &'static str {
        "tui"
    }

    fn run(&mut self, session: &mut Session<'_>) -> anyhow::Result<()> {
        // Begin before touching the terminal so errors print normally
        let mut app = App::new(session)?;

        // Set up terminal
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        if let Err(err) = execute!(stdout, EnterAlternateScreen) {
            let _ = disable_raw_mode();
            return Err(err.into());
        }
        let backend = CrosstermBackend::new(stdout);
        let mut terminal = Terminal::new(backend)?;

        debug!("tui started");
        let res = app.run(&mut terminal);

        // Restore terminal
        disable_raw_mode()?;
        execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
        terminal.show_cursor()?;

        res
    }
}
