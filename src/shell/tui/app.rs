//! Main TUI application state and logic

use super::panes::{
    self, bindings::BindingsScrollState, frames::FramesScrollState, source::SourceScrollState,
};
use crate::session::listing::FrameListing;
use crate::session::{Navigation, PromptLabel, Refresh, Session};
use crate::source::SourceView;
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind};
use ratatui::{
    backend::Backend,
    layout::{Constraint, Direction, Layout},
    Frame, Terminal,
};

/// Which pane is currently focused
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FocusedPane {
    Source,
    Frames,
    Bindings,
}

impl FocusedPane {
    /// Move focus to the next pane (source -> frames -> bindings)
    pub fn next(self) -> Self {
        match self {
            FocusedPane::Source => FocusedPane::Frames,
            FocusedPane::Frames => FocusedPane::Bindings,
            FocusedPane::Bindings => FocusedPane::Source,
        }
    }

    /// Move focus to the previous pane
    pub fn prev(self) -> Self {
        match self {
            FocusedPane::Source => FocusedPane::Bindings,
            FocusedPane::Frames => FocusedPane::Source,
            FocusedPane::Bindings => FocusedPane::Frames,
        }
    }
}

/// Prompt label shown in the status bar
#[derive(Debug, Default)]
pub struct StatusLabel(pub String);

impl PromptLabel for StatusLabel {
    fn set_label(&mut self, label: &str) {
        self.0 = label.to_string();
    }
}

/// The main application state
pub struct App<'s, 'a> {
    session: &'s mut Session<'a>,

    /// Label of the projected frame
    label: StatusLabel,

    /// Latest renders from the session
    source: SourceView,
    listing: FrameListing,

    pub focused_pane: FocusedPane,

    /// Per-pane scroll offsets
    source_scroll: SourceScrollState,
    frames_scroll: FramesScrollState,
    bindings_scroll: BindingsScrollState,

    /// Whether the app should quit
    pub should_quit: bool,

    /// Status message to display
    pub status_message: String,

    /// Whether the status message reports a refused action
    pub is_warning: bool,
}

impl<'s, 'a> App<'s, 'a> {
    /// Begin the session and build the initial view
    pub fn new(session: &'s mut Session<'a>) -> anyhow::Result<Self> {
        let mut label = StatusLabel::default();
        let refresh = session.begin(&mut label)?;

        let status_message = match session.store().message() {
            Some(message) => message.lines().last().unwrap_or("Ready!").to_string(),
            None => String::from("Ready!"),
        };

        Ok(App {
            session,
            label,
            source: refresh.source,
            listing: refresh.frames,
            focused_pane: FocusedPane::Source,
            source_scroll: SourceScrollState {
                offset: 0,
                recenter: true,
            },
            frames_scroll: FramesScrollState::default(),
            bindings_scroll: BindingsScrollState::default(),
            should_quit: false,
            status_message,
            is_warning: false,
        })
    }

    /// Label of the frame currently shown
    pub fn label(&self) -> &str {
        &self.label.0
    }

    pub fn source(&self) -> &SourceView {
        &self.source
    }

    /// Run the TUI application
    pub fn run<B: Backend>(&mut self, terminal: &mut Terminal<B>) -> anyhow::Result<()> {
        loop {
            terminal.draw(|f| self.render(f))?;

            if self.should_quit {
                break;
            }

            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press {
                    self.handle_key_event(key)?;
                }
            }
        }

        Ok(())
    }

    /// Render the UI
    fn render(&mut self, frame: &mut Frame) {
        let size = frame.area();

        // Panes, plus status bar at bottom
        let main_chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Min(0), Constraint::Length(1)])
            .split(size);

        let pane_area = main_chunks[0];
        let status_area = main_chunks[1];

        // Split into 2 columns
        let columns = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(60), Constraint::Percentage(40)])
            .split(pane_area);

        // Right column: Frames (top) | Bindings (bottom)
        let right_rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Percentage(40), Constraint::Percentage(60)])
            .split(columns[1]);

        panes::render_source_pane(
            frame,
            columns[0],
            &self.source,
            self.session.radius(),
            self.focused_pane == FocusedPane::Source,
            &mut self.source_scroll,
        );

        panes::render_frames_pane(
            frame,
            right_rows[0],
            &self.listing,
            self.focused_pane == FocusedPane::Frames,
            &mut self.frames_scroll,
        );

        panes::render_bindings_pane(
            frame,
            right_rows[1],
            self.session,
            self.focused_pane == FocusedPane::Bindings,
            &mut self.bindings_scroll,
        );

        panes::render_status_bar(
            frame,
            status_area,
            &self.label.0,
            &self.status_message,
            self.session.current_index().unwrap_or(0),
            self.session.store().len(),
            self.is_warning,
        );
    }

    /// Handle keyboard events
    pub fn handle_key_event(&mut self, key: KeyEvent) -> anyhow::Result<()> {
        match key.code {
            KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => {
                self.should_quit = true;
            }
            KeyCode::Up | KeyCode::Char('k') => {
                let navigation = self.session.move_up(1, &mut self.label)?;
                self.apply(navigation, "Moved up");
            }
            KeyCode::Down | KeyCode::Char('j') => {
                let navigation = self.session.move_down(1, &mut self.label)?;
                self.apply(navigation, "Moved down");
            }
            KeyCode::Home => {
                let navigation = self.session.move_to(0, &mut self.label)?;
                self.apply(navigation, "Jumped to innermost frame");
            }
            KeyCode::End => {
                let last = self.session.store().len() - 1;
                let navigation = self.session.move_to(last, &mut self.label)?;
                self.apply(navigation, "Jumped to outermost frame");
            }
            KeyCode::Char('+') | KeyCode::Char('=') => {
                let radius = self.session.radius().saturating_add(1);
                self.set_radius(radius)?;
            }
            KeyCode::Char('-') => {
                let radius = self.session.radius().saturating_sub(1);
                self.set_radius(radius)?;
            }
            KeyCode::Tab => {
                self.focused_pane = self.focused_pane.next();
            }
            KeyCode::BackTab => {
                self.focused_pane = self.focused_pane.prev();
            }
            KeyCode::PageUp => match self.focused_pane {
                FocusedPane::Source => {
                    self.source_scroll.offset = self.source_scroll.offset.saturating_sub(5)
                }
                FocusedPane::Frames => {
                    self.frames_scroll.offset = self.frames_scroll.offset.saturating_sub(5)
                }
                FocusedPane::Bindings => {
                    self.bindings_scroll.offset = self.bindings_scroll.offset.saturating_sub(5)
                }
            },
            KeyCode::PageDown => match self.focused_pane {
                FocusedPane::Source => {
                    self.source_scroll.offset = self.source_scroll.offset.saturating_add(5)
                }
                FocusedPane::Frames => {
                    self.frames_scroll.offset = self.frames_scroll.offset.saturating_add(5)
                }
                FocusedPane::Bindings => {
                    self.bindings_scroll.offset = self.bindings_scroll.offset.saturating_add(5)
                }
            },
            _ => {}
        }
        Ok(())
    }

    fn apply(&mut self, navigation: Navigation, message: &str) {
        match navigation {
            Navigation::Moved(Refresh { source, frames, .. }) => {
                self.source = source;
                self.listing = frames;
                self.source_scroll.recenter = true;
                self.status_message = message.to_string();
                self.is_warning = false;
            }
            Navigation::OutOfRange(out_of_range) => {
                self.status_message = out_of_range.to_string();
                self.is_warning = true;
            }
        }
    }

    fn set_radius(&mut self, radius: usize) -> anyhow::Result<()> {
        self.session.set_radius(radius);
        self.source = self.session.show_source(None)?;
        self.source_scroll.recenter = true;
        self.status_message = format!("Showing {} lines of context", radius);
        self.is_warning = false;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SessionConfig;
    use crate::dump::{FrameRecord, FrameStore};
    use crossterm::event::KeyModifiers;
    use ratatui::backend::TestBackend;

    fn press(app: &mut App<'_, '_>, code: KeyCode) {
        app.handle_key_event(KeyEvent::new(code, KeyModifiers::NONE))
            .unwrap();
    }

    fn store() -> FrameStore {
        FrameStore::from_frames(vec![
            FrameRecord::new(0, "lib/a.py", 2),
            FrameRecord::new(0, "lib/b.py", 7),
            FrameRecord::new(0, "lib/c.py", 9),
        ])
        .unwrap()
    }

    fn config() -> SessionConfig {
        SessionConfig {
            no_sources: true,
            ..SessionConfig::default()
        }
    }

    #[test]
    fn test_keys_move_between_frames() {
        let store = store();
        let mut session = Session::new(&store, &config());
        let mut app = App::new(&mut session).unwrap();
        assert_eq!(app.label(), "[a.py:2 (0)]");

        press(&mut app, KeyCode::Up);
        assert!(app.is_warning);
        assert_eq!(app.status_message, "Frame out of range.");

        press(&mut app, KeyCode::Char('j'));
        assert_eq!(app.label(), "[b.py:7 (1)]");
        assert!(!app.is_warning);

        press(&mut app, KeyCode::End);
        assert_eq!(app.label(), "[c.py:9 (2)]");

        press(&mut app, KeyCode::Home);
        assert_eq!(app.label(), "[a.py:2 (0)]");

        press(&mut app, KeyCode::Char('q'));
        assert!(app.should_quit);
    }

    #[test]
    fn test_focus_cycles_and_radius_changes() {
        let store = store();
        let mut session = Session::new(&store, &config());
        let mut app = App::new(&mut session).unwrap();

        press(&mut app, KeyCode::Tab);
        assert_eq!(app.focused_pane, FocusedPane::Frames);
        press(&mut app, KeyCode::BackTab);
        assert_eq!(app.focused_pane, FocusedPane::Source);

        press(&mut app, KeyCode::Char('-'));
        assert_eq!(app.status_message, "Showing 14 lines of context");
    }

    #[test]
    fn test_renders_all_panes() {
        let store = store();
        let mut session = Session::new(&store, &config());
        let mut app = App::new(&mut session).unwrap();

        let mut terminal = Terminal::new(TestBackend::new(120, 30)).unwrap();
        terminal.draw(|f| app.render(f)).unwrap();

        let buffer = terminal.backend().buffer();
        let screen: String = buffer.content().iter().map(|cell| cell.symbol()).collect();
        assert!(screen.contains("Frames"));
        assert!(screen.contains("Bindings"));
        assert!(screen.contains("Sources are disabled."));
        assert!(screen.contains("[a.py:2 (0)]"));
    }
}
