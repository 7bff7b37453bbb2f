//! Line console shell
//!
//! Reads commands with `rustyline`, prints source windows and frame listings to
//! stdout. Ctrl-C cancels the current line, Ctrl-D (or `quit`) leaves the session.

use super::command::Command;
use super::InteractiveShell;
use crate::session::listing::FrameListing;
use crate::session::namespace::{Environment, Helper, FRAME_MARKER};
use crate::session::{Navigation, PromptLabel, Refresh, Session};
use crate::source::{SourceLine, SourceView};
use crossterm::style::{Color, ContentStyle, Stylize};
use rustyline::error::ReadlineError;
use rustyline::DefaultEditor;
use std::fmt::Display;
use std::io::{self, IsTerminal, Write};
use tracing::debug;

/// Prompt strings derived from the current frame's label
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConsolePrompt {
    primary: String,
}

impl ConsolePrompt {
    pub fn new() -> Self {
        ConsolePrompt {
            primary: ">>> ".to_string(),
        }
    }

    pub fn primary(&self) -> &str {
        &self.primary
    }
}

impl Default for ConsolePrompt {
    fn default() -> Self {
        Self::new()
    }
}

impl PromptLabel for ConsolePrompt {
    fn set_label(&mut self, label: &str) {
        self.primary = format!("{} >>> ", label);
    }
}

/// Console backend
pub struct ConsoleShell {
    prompt: ConsolePrompt,
    color: bool,
}

impl ConsoleShell {
    pub fn new() -> Self {
        ConsoleShell {
            prompt: ConsolePrompt::new(),
            color: io::stdout().is_terminal(),
        }
    }

    /// Console that never emits escape sequences
    pub fn plain() -> Self {
        ConsoleShell {
            prompt: ConsolePrompt::new(),
            color: false,
        }
    }

    pub fn prompt(&self) -> &ConsolePrompt {
        &self.prompt
    }

    /// Begin the session and print the opening screen
    pub fn start(&mut self, session: &mut Session<'_>, out: &mut dyn Write) -> anyhow::Result<()> {
        let refresh = session.begin(&mut self.prompt)?;

        if let Some(message) = session.store().message() {
            writeln!(out, "{}", message.trim_end())?;
            writeln!(out)?;
        }
        self.write_listing(&refresh.frames, out)?;
        writeln!(out)?;
        writeln!(
            out,
            "The current frame is available through the `{}` binding. Type 'help' for commands.",
            FRAME_MARKER
        )?;
        writeln!(out)?;
        Ok(())
    }

    /// Run one command; returns `false` when the session should end
    pub fn execute(
        &mut self,
        session: &mut Session<'_>,
        command: Command,
        out: &mut dyn Write,
    ) -> anyhow::Result<bool> {
        debug!(?command, "console command");
        match command {
            Command::Empty => {}
            Command::Quit => return Ok(false),
            Command::Frames => {
                let listing = session.list_frames()?;
                self.write_listing(&listing, out)?;
            }
            Command::Up(count) => {
                let navigation = session.move_up(count, &mut self.prompt)?;
                self.write_navigation(navigation, out)?;
            }
            Command::Down(count) => {
                let navigation = session.move_down(count, &mut self.prompt)?;
                self.write_navigation(navigation, out)?;
            }
            Command::Sources(radius) => {
                let view = session.show_source(radius)?;
                self.write_source(&view, out)?;
            }
            Command::Locals => {
                session.current_index()?;
                self.write_environment(session, session.namespace().locals(), out)?;
            }
            Command::Globals => {
                session.current_index()?;
                self.write_environment(session, session.namespace().globals(), out)?;
            }
            Command::Set { name, value } => {
                session.assign(&name, value)?;
            }
            Command::Help => self.write_help(out)?,
            Command::Inspect(name) => match session.lookup(&name)? {
                Some(entry) => writeln!(out, "{}", session.describe(entry))?,
                None => writeln!(out, "Unknown name '{}'", name)?,
            },
        }
        Ok(true)
    }

    fn write_navigation(&self, navigation: Navigation, out: &mut dyn Write) -> io::Result<()> {
        match navigation {
            Navigation::Moved(Refresh { source, frames, .. }) => {
                self.write_source(&source, out)?;
                writeln!(out)?;
                self.write_listing(&frames, out)
            }
            Navigation::OutOfRange(out_of_range) => writeln!(out, "{}", out_of_range),
        }
    }

    fn write_listing(&self, listing: &FrameListing, out: &mut dyn Write) -> io::Result<()> {
        writeln!(out, "Available frames")?;
        for row in &listing.rows {
            if row.is_current {
                let text = row.to_string();
                writeln!(out, "  {}", self.paint(text, ContentStyle::new().bold()))?;
            } else {
                writeln!(out, "  {}", row)?;
            }
        }
        Ok(())
    }

    fn write_source(&self, view: &SourceView, out: &mut dyn Write) -> io::Result<()> {
        let bar = ContentStyle::new().on(Color::AnsiValue(236));
        for line in &view.lines {
            let gutter = line.gutter(view.gutter_width);
            match line {
                SourceLine::Current { text, .. } => writeln!(
                    out,
                    "{}{}",
                    self.paint(gutter, bar.green().bold()),
                    self.paint(text, ContentStyle::new().on(Color::AnsiValue(234)))
                )?,
                SourceLine::OtherFrame { text, .. } => writeln!(
                    out,
                    "{}{}",
                    self.paint(gutter, bar.dark_green()),
                    text
                )?,
                SourceLine::Plain { text, .. } => {
                    writeln!(out, "{}{}", self.paint(gutter, bar), text)?
                }
                SourceLine::Diagnostic(message) => {
                    writeln!(out, "{}", self.paint(message, ContentStyle::new().yellow()))?
                }
            }
        }
        Ok(())
    }

    fn write_environment(
        &self,
        session: &Session<'_>,
        env: &Environment,
        out: &mut dyn Write,
    ) -> io::Result<()> {
        if env.is_empty() {
            return writeln!(out, "  (empty)");
        }
        for (name, entry) in env.iter() {
            writeln!(
                out,
                "  {}: {} = {}",
                name,
                self.paint(entry.type_name(), ContentStyle::new().cyan()),
                session.describe(entry)
            )?;
        }
        Ok(())
    }

    fn write_help(&self, out: &mut dyn Write) -> io::Result<()> {
        writeln!(out)?;
        writeln!(out, "{}", self.paint("Commands:", ContentStyle::new().bold()))?;
        for helper in Helper::ALL {
            writeln!(out, "  {:<20} {}", helper.signature(), helper.summary())?;
        }
        writeln!(out, "  {:<20} {}", "locals", "Show local bindings")?;
        writeln!(out, "  {:<20} {}", "globals", "Show global bindings")?;
        writeln!(out, "  {:<20} {}", "set NAME VALUE", "Bind a value locally")?;
        writeln!(out, "  {:<20} {}", "NAME", "Print a binding")?;
        writeln!(out, "  {:<20} {}", "quit", "Leave the session")?;
        writeln!(out)
    }

    fn paint<D: Display>(&self, text: D, style: ContentStyle) -> String {
        if self.color {
            style.apply(text).to_string()
        } else {
            text.to_string()
        }
    }
}

impl Default for ConsoleShell {
    fn default() -> Self {
        Self::new()
    }
}

impl InteractiveShell for ConsoleShell {
    fn name(&self) -> &'static str {
        "console"
    }

    fn run(&mut self, session: &mut Session<'_>) -> anyhow::Result<()> {
        let mut stdout = io::stdout();
        self.start(session, &mut stdout)?;

        let mut editor = DefaultEditor::new()?;
        loop {
            match editor.readline(self.prompt.primary()) {
                Ok(line) => {
                    if !line.trim().is_empty() {
                        let _ = editor.add_history_entry(line.as_str());
                    }
                    match Command::parse(&line) {
                        Ok(command) => {
                            if !self.execute(session, command, &mut stdout)? {
                                break;
                            }
                        }
                        Err(message) => writeln!(stdout, "{}", message)?,
                    }
                }
                Err(ReadlineError::Interrupted) => {
                    writeln!(stdout, "^C - Use 'quit' to exit")?;
                }
                Err(ReadlineError::Eof) => break,
                Err(err) => return Err(err.into()),
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SessionConfig;
    use crate::dump::{FrameRecord, FrameStore};

    fn run_commands(store: &FrameStore, commands: &[&str]) -> (String, ConsolePrompt) {
        let config = SessionConfig {
            no_sources: true,
            ..SessionConfig::default()
        };
        let mut session = Session::new(store, &config);
        let mut shell = ConsoleShell::plain();
        let mut out = Vec::new();

        shell.start(&mut session, &mut out).unwrap();
        for input in commands {
            let command = Command::parse(input).unwrap();
            if !shell.execute(&mut session, command, &mut out).unwrap() {
                break;
            }
        }
        (String::from_utf8(out).unwrap(), shell.prompt().clone())
    }

    fn store() -> FrameStore {
        FrameStore::from_frames(vec![
            FrameRecord::new(0, "src/inner.py", 3),
            FrameRecord::new(0, "src/outer.py", 20),
        ])
        .unwrap()
        .with_message(Some("ZeroDivisionError: division by zero".to_string()))
    }

    #[test]
    fn test_start_prints_message_and_listing() {
        let (out, prompt) = run_commands(&store(), &[]);
        assert!(out.starts_with("ZeroDivisionError: division by zero\n"));
        assert!(out.contains("  0. src/inner.py:3 # sources disabled <=="));
        assert_eq!(prompt.primary(), "[inner.py:3 (0)] >>> ");
    }

    #[test]
    fn test_navigation_output() {
        let (out, prompt) = run_commands(&store(), &["down", "down", "_frame"]);
        assert!(out.contains("Sources are disabled."));
        assert!(out.contains("  1. src/outer.py:20 # sources disabled <=="));
        assert!(out.contains("Frame out of range."));
        assert!(out.contains("<Frame 1 at src/outer.py:20>"));
        assert_eq!(prompt.primary(), "[outer.py:20 (1)] >>> ");
    }

    #[test]
    fn test_oversized_count_is_refused() {
        let (out, prompt) = run_commands(&store(), &["up 18446744073709551615"]);
        assert!(out.contains("Frame out of range."));
        assert_eq!(prompt.primary(), "[inner.py:3 (0)] >>> ");
    }

    #[test]
    fn test_set_then_inspect() {
        let (out, _) = run_commands(&store(), &["set answer 42", "answer", "missing", "quit", "up"]);
        assert!(out.contains("42\n"));
        assert!(out.contains("Unknown name 'missing'"));
        // commands after quit are not run
        assert!(!out.contains("Frame out of range."));
    }
}
