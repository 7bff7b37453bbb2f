//! Session configuration

use crate::source::DEFAULT_RADIUS;
use std::io::IsTerminal;

/// Which interactive shell drives the session
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShellKind {
    /// Full-screen terminal UI
    Tui,
    /// Line-oriented console
    Console,
}

impl ShellKind {
    /// The TUI unless it was refused or stdout is not a terminal
    pub fn select(force_console: bool) -> Self {
        if force_console || !std::io::stdout().is_terminal() {
            ShellKind::Console
        } else {
            ShellKind::Tui
        }
    }
}

/// Settings fixed for the lifetime of a session
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionConfig {
    /// Never read source files; render diagnostics instead
    pub no_sources: bool,
    /// Frame the cursor starts on
    pub start_frame: usize,
    /// Default source window radius
    pub source_radius: usize,
    pub shell: ShellKind,
}

impl Default for SessionConfig {
    fn default() -> Self {
        SessionConfig {
            no_sources: false,
            start_frame: 0,
            source_radius: DEFAULT_RADIUS,
            shell: ShellKind::Console,
        }
    }
}
