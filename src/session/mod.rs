//! Session state machine
//!
//! A [`Session`] ties a read-only [`FrameStore`] to the mutable state of one
//! interactive inspection:
//! - [`cursor`]: which frame is current, with bounded moves
//! - [`namespace`]: the environments a shell reads, fed by frame projection
//! - [`listing`]: the "all frames" display
//!
//! The cursor is authoritative. The namespace marker only mirrors it so code inside a
//! shell can ask which frame it is looking at.
//!
//! # Lifecycle
//!
//! ```text
//! Session::new → begin (project start frame) → move_up / move_down … → drop
//! ```
//!
//! Every command other than `begin` fails with [`SessionError::NoCurrentFrame`]
//! until `begin` has succeeded.

pub mod cursor;
pub mod listing;
pub mod namespace;

use crate::config::SessionConfig;
use crate::dump::{FrameRecord, FrameStore, Value};
use crate::error::SessionError;
use crate::source::{render_window, SourceReader, SourceView};
use cursor::{Cursor, OutOfRange};
use listing::FrameListing;
use namespace::{Entry, Namespace};
use tracing::debug;

/// Capability to show a label in the host shell's prompt
pub trait PromptLabel {
    fn set_label(&mut self, label: &str);
}

/// Everything a shell needs to redraw after a projection
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Refresh {
    pub source: SourceView,
    pub frames: FrameListing,
    pub label: String,
}

/// Outcome of a move request
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Navigation {
    Moved(Refresh),
    /// The move was refused; cursor and namespace are unchanged
    OutOfRange(OutOfRange),
}

/// One interactive inspection of a dump
pub struct Session<'a> {
    store: &'a FrameStore,
    reader: SourceReader,
    start_frame: usize,
    radius: usize,
    cursor: Option<Cursor>,
    namespace: Namespace,
}

impl<'a> Session<'a> {
    pub fn new(store: &'a FrameStore, config: &SessionConfig) -> Self {
        Session {
            store,
            reader: SourceReader::new(!config.no_sources),
            start_frame: config.start_frame,
            radius: config.source_radius,
            cursor: None,
            namespace: Namespace::new(),
        }
    }

    pub fn store(&self) -> &'a FrameStore {
        self.store
    }

    /// Source window radius used when none is given
    pub fn radius(&self) -> usize {
        self.radius
    }

    pub fn set_radius(&mut self, radius: usize) {
        self.radius = radius;
    }

    pub fn sources_enabled(&self) -> bool {
        self.reader.is_enabled()
    }

    /// Project the configured start frame and place the cursor on it
    pub fn begin(&mut self, prompt: &mut dyn PromptLabel) -> Result<Refresh, SessionError> {
        let cursor =
            Cursor::new(self.start_frame, self.store.len()).map_err(|_| {
                SessionError::StartOutOfRange {
                    index: self.start_frame,
                    len: self.store.len(),
                }
            })?;
        self.cursor = Some(cursor);
        debug!(start = self.start_frame, "session started");
        self.project(prompt)
    }

    pub fn has_begun(&self) -> bool {
        self.cursor.is_some()
    }

    fn cursor(&self) -> Result<&Cursor, SessionError> {
        self.cursor.as_ref().ok_or(SessionError::NoCurrentFrame)
    }

    /// Index of the current frame
    pub fn current_index(&self) -> Result<usize, SessionError> {
        Ok(self.cursor()?.current())
    }

    pub fn current_frame(&self) -> Result<&'a FrameRecord, SessionError> {
        let index = self.current_index()?;
        self.store.get(index).ok_or(SessionError::NoCurrentFrame)
    }

    /// Move toward frame 0 by `count` frames
    pub fn move_up(
        &mut self,
        count: usize,
        prompt: &mut dyn PromptLabel,
    ) -> Result<Navigation, SessionError> {
        self.navigate(prompt, |cursor| cursor.move_up(count))
    }

    /// Move away from frame 0 by `count` frames
    pub fn move_down(
        &mut self,
        count: usize,
        prompt: &mut dyn PromptLabel,
    ) -> Result<Navigation, SessionError> {
        self.navigate(prompt, |cursor| cursor.move_down(count))
    }

    /// Move by a signed offset, re-projecting on success
    pub fn move_by(
        &mut self,
        offset: isize,
        prompt: &mut dyn PromptLabel,
    ) -> Result<Navigation, SessionError> {
        self.navigate(prompt, |cursor| cursor.move_by(offset))
    }

    /// Jump to an absolute frame index
    pub fn move_to(
        &mut self,
        index: usize,
        prompt: &mut dyn PromptLabel,
    ) -> Result<Navigation, SessionError> {
        self.navigate(prompt, |cursor| cursor.move_to(index))
    }

    fn navigate(
        &mut self,
        prompt: &mut dyn PromptLabel,
        step: impl FnOnce(&mut Cursor) -> Result<usize, OutOfRange>,
    ) -> Result<Navigation, SessionError> {
        let cursor = self.cursor.as_mut().ok_or(SessionError::NoCurrentFrame)?;
        match step(cursor) {
            Ok(_) => Ok(Navigation::Moved(self.project(prompt)?)),
            Err(out_of_range) => {
                debug!(
                    offset = out_of_range.offset,
                    from = out_of_range.from,
                    "move refused"
                );
                Ok(Navigation::OutOfRange(out_of_range))
            }
        }
    }

    fn project(&mut self, prompt: &mut dyn PromptLabel) -> Result<Refresh, SessionError> {
        let frame = self.current_frame()?;
        self.namespace.project(frame, self.store);

        let label = frame.prompt_label();
        prompt.set_label(&label);

        Ok(Refresh {
            source: self.show_source(None)?,
            frames: self.list_frames()?,
            label,
        })
    }

    /// List every frame, marking the current one
    pub fn list_frames(&self) -> Result<FrameListing, SessionError> {
        let current = self.current_index()?;
        Ok(FrameListing::build(self.store, &self.reader, current))
    }

    /// Source window around the current frame; `None` uses the session radius
    pub fn show_source(&self, radius: Option<usize>) -> Result<SourceView, SessionError> {
        let frame = self.current_frame()?;
        Ok(render_window(
            &self.reader,
            self.store,
            frame,
            radius.unwrap_or(self.radius),
        ))
    }

    /// Prompt label of the current frame
    pub fn prompt_label(&self) -> Result<String, SessionError> {
        Ok(self.current_frame()?.prompt_label())
    }

    pub fn namespace(&self) -> &Namespace {
        &self.namespace
    }

    /// Resolve a name in the session namespace
    pub fn lookup(&self, name: &str) -> Result<Option<&Entry>, SessionError> {
        self.cursor()?;
        Ok(self.namespace.lookup(name))
    }

    /// Bind a user value in the local environment
    pub fn assign(&mut self, name: &str, value: Value) -> Result<(), SessionError> {
        self.cursor()?;
        self.namespace.assign(name, value);
        Ok(())
    }

    /// Human-readable form of a namespace entry
    pub fn describe(&self, entry: &Entry) -> String {
        match entry {
            Entry::Value(value) => value.repr().to_string(),
            Entry::Helper(helper) => format!("<helper {}>", helper.signature()),
            Entry::FrameMarker(index) => match self.store.get(*index) {
                Some(frame) => frame.to_string(),
                None => format!("<Frame {}>", index),
            },
            Entry::Dump { frames, message } => match message {
                Some(message) => format!("<Dump of {} frames: {}>", frames, first_line(message)),
                None => format!("<Dump of {} frames>", frames),
            },
        }
    }
}

fn first_line(text: &str) -> &str {
    text.lines().next().unwrap_or("")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct Recorder {
        labels: Vec<String>,
    }

    impl PromptLabel for Recorder {
        fn set_label(&mut self, label: &str) {
            self.labels.push(label.to_string());
        }
    }

    fn store() -> FrameStore {
        FrameStore::from_frames(vec![
            FrameRecord::new(0, "/tmp/missing/inner.py", 4),
            FrameRecord::new(0, "/tmp/missing/outer.py", 11),
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
    fn test_commands_fail_before_begin() {
        let store = store();
        let mut session = Session::new(&store, &config());
        let mut prompt = Recorder::default();

        assert_eq!(session.list_frames(), Err(SessionError::NoCurrentFrame));
        assert_eq!(session.show_source(None), Err(SessionError::NoCurrentFrame));
        assert_eq!(
            session.move_down(1, &mut prompt),
            Err(SessionError::NoCurrentFrame)
        );
        assert!(prompt.labels.is_empty());
    }

    #[test]
    fn test_begin_rejects_invalid_start() {
        let store = store();
        let config = SessionConfig {
            start_frame: 5,
            ..config()
        };
        let mut session = Session::new(&store, &config);
        assert_eq!(
            session.begin(&mut Recorder::default()),
            Err(SessionError::StartOutOfRange { index: 5, len: 2 })
        );
        assert!(!session.has_begun());
    }

    #[test]
    fn test_moves_update_prompt_label() {
        let store = store();
        let mut session = Session::new(&store, &config());
        let mut prompt = Recorder::default();

        let refresh = session.begin(&mut prompt).unwrap();
        assert_eq!(refresh.label, "[inner.py:4 (0)]");

        match session.move_down(1, &mut prompt).unwrap() {
            Navigation::Moved(refresh) => {
                assert_eq!(refresh.label, "[outer.py:11 (1)]");
                assert_eq!(refresh.frames.current().map(|row| row.index), Some(1));
            }
            other => panic!("Expected a move, got {:?}", other),
        }

        assert!(matches!(
            session.move_down(1, &mut prompt).unwrap(),
            Navigation::OutOfRange(_)
        ));
        assert_eq!(session.current_index(), Ok(1));
        assert_eq!(prompt.labels, vec!["[inner.py:4 (0)]", "[outer.py:11 (1)]"]);
    }

    #[test]
    fn test_huge_counts_leave_cursor_in_place() {
        let store = store();
        let mut session = Session::new(&store, &config());
        let mut prompt = Recorder::default();
        session.begin(&mut prompt).unwrap();

        for count in [usize::MAX, 1 << 63] {
            assert!(matches!(
                session.move_up(count, &mut prompt).unwrap(),
                Navigation::OutOfRange(_)
            ));
            assert_eq!(session.current_index(), Ok(0));
        }
        assert!(matches!(
            session.move_down(usize::MAX, &mut prompt).unwrap(),
            Navigation::OutOfRange(_)
        ));
        assert!(matches!(
            session.move_to(usize::MAX, &mut prompt).unwrap(),
            Navigation::OutOfRange(_)
        ));
        assert_eq!(session.current_index(), Ok(0));
        assert_eq!(prompt.labels, vec!["[inner.py:4 (0)]"]);
    }

    #[test]
    fn test_describe_reserved_bindings() {
        let store = store().with_message(Some("ValueError: bad\nmore".to_string()));
        let mut session = Session::new(&store, &config());
        session.begin(&mut Recorder::default()).unwrap();

        let marker = session.lookup(namespace::FRAME_MARKER).unwrap().unwrap().clone();
        assert_eq!(session.describe(&marker), "<Frame 0 at /tmp/missing/inner.py:4>");

        let dump = session.lookup(namespace::DUMP_BINDING).unwrap().unwrap().clone();
        assert_eq!(session.describe(&dump), "<Dump of 2 frames: ValueError: bad>");
    }
}
