//! Interactive shells that drive a [`Session`]
//!
//! Two backends implement [`InteractiveShell`]:
//!
//! - **[`tui`]**: full-screen terminal UI with source, frames and bindings panes
//! - **[`console`]**: line console for plain terminals and pipes
//!
//! The backend is chosen once, when the session starts, from
//! [`ShellKind`](crate::config::ShellKind).

pub mod command;
pub mod console;
pub mod tui;

pub use crate::session::PromptLabel;

use crate::config::ShellKind;
use crate::session::Session;

/// A front end that runs a session until the user exits
pub trait InteractiveShell {
    fn name(&self) -> &'static str;

    /// Begin the session and run its loop to completion
    fn run(&mut self, session: &mut Session<'_>) -> anyhow::Result<()>;
}

/// Build the shell for `kind`
pub fn spawn(kind: ShellKind) -> Box<dyn InteractiveShell> {
    match kind {
        ShellKind::Tui => Box::new(tui::TuiShell::new()),
        ShellKind::Console => Box::new(console::ConsoleShell::new()),
    }
}
