//! Source context around captured frames
//!
//! Sources are read from disk lazily, at display time, and may have changed or
//! disappeared since the dump was written. Every file-system failure is converted
//! into a [`SourceUnavailable`] diagnostic at the point of use and rendered in
//! place of the missing text; nothing in this module returns an error.
//!
//! # Window policy
//!
//! A window of radius `r` around line `n` covers lines `n - r ..= n + r`,
//! inclusive on both ends and clamped to `1 ..= len`. A frame whose line lies past
//! the end of its file is "too small": the rows that exist are still shown and a
//! placeholder stands in for the current line.

use crate::dump::{FrameRecord, FrameStore};
use rustc_hash::FxHashMap;
use std::fmt;
use std::fs;
use std::io;
use std::rc::Rc;
use tracing::{debug, warn};

/// Default number of lines shown on each side of the current line
pub const DEFAULT_RADIUS: usize = 15;

/// Why a source line could not be shown
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SourceUnavailable {
    /// Source reading was turned off for this session
    Disabled,
    NotFound,
    /// The file exists but could not be read
    Unreadable(String),
    /// The file has fewer lines than the frame's line number
    TooShort { line: usize, len: usize },
}

impl SourceUnavailable {
    /// Text used in place of a source line in the frame listing
    pub fn listing_text(&self) -> String {
        match self {
            SourceUnavailable::Disabled => "# sources disabled".to_string(),
            SourceUnavailable::TooShort { .. } => "# file too small to find line".to_string(),
            other => format!("# unable to load sources: {}", other),
        }
    }
}

impl fmt::Display for SourceUnavailable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SourceUnavailable::Disabled => write!(f, "Sources are disabled."),
            SourceUnavailable::NotFound => write!(f, "File not found"),
            SourceUnavailable::Unreadable(reason) => write!(f, "Unreadable file ({})", reason),
            SourceUnavailable::TooShort { .. } => write!(f, "file too small to find line"),
        }
    }
}

/// Reads source files, or refuses to when sources are disabled
#[derive(Debug, Clone, Copy)]
pub struct SourceReader {
    enabled: bool,
}

impl SourceReader {
    pub fn new(enabled: bool) -> Self {
        SourceReader { enabled }
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Read all lines of `file`, without line terminators
    pub fn read_lines(&self, file: &str) -> Result<Vec<String>, SourceUnavailable> {
        if !self.enabled {
            return Err(SourceUnavailable::Disabled);
        }

        match fs::read(file) {
            Ok(bytes) => Ok(String::from_utf8_lossy(&bytes)
                .lines()
                .map(|line| line.trim_end_matches('\r').to_string())
                .collect()),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Err(SourceUnavailable::NotFound),
            Err(e) => {
                warn!(file, error = %e, "failed to read source file");
                Err(SourceUnavailable::Unreadable(e.to_string()))
            }
        }
    }
}

impl Default for SourceReader {
    fn default() -> Self {
        Self::new(true)
    }
}

/// Per-pass cache of file contents
///
/// Meant to live for one listing pass only, so each file shared by several frames is
/// read once per pass and changes on disk show up on the next pass.
pub struct LineCache {
    reader: SourceReader,
    files: FxHashMap<String, Result<Rc<Vec<String>>, SourceUnavailable>>,
}

impl LineCache {
    pub fn new(reader: SourceReader) -> Self {
        LineCache {
            reader,
            files: FxHashMap::default(),
        }
    }

    /// All lines of `file`, reading it on first request
    pub fn lines(&mut self, file: &str) -> Result<Rc<Vec<String>>, SourceUnavailable> {
        if let Some(cached) = self.files.get(file) {
            return cached.clone();
        }
        debug!(file, "reading source file");
        let loaded = self.reader.read_lines(file).map(Rc::new);
        self.files.insert(file.to_string(), loaded.clone());
        loaded
    }

    /// The 1-based `line` of `file`
    pub fn line(&mut self, file: &str, line: usize) -> Result<String, SourceUnavailable> {
        let lines = self.lines(file)?;
        line.checked_sub(1)
            .and_then(|idx| lines.get(idx))
            .cloned()
            .ok_or(SourceUnavailable::TooShort {
                line,
                len: lines.len(),
            })
    }

    /// Number of distinct files requested so far
    pub fn files_read(&self) -> usize {
        self.files.len()
    }
}

/// One row of a rendered source window
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SourceLine {
    /// The line the frame is stopped at
    Current { number: usize, text: String },
    /// A line where another frame of the same file is stopped
    OtherFrame {
        number: usize,
        frame_index: usize,
        text: String,
    },
    Plain { number: usize, text: String },
    /// Stand-in for text that could not be shown
    Diagnostic(String),
}

impl SourceLine {
    pub fn number(&self) -> Option<usize> {
        match self {
            SourceLine::Current { number, .. }
            | SourceLine::OtherFrame { number, .. }
            | SourceLine::Plain { number, .. } => Some(*number),
            SourceLine::Diagnostic(_) => None,
        }
    }

    pub fn text(&self) -> &str {
        match self {
            SourceLine::Current { text, .. }
            | SourceLine::OtherFrame { text, .. }
            | SourceLine::Plain { text, .. }
            | SourceLine::Diagnostic(text) => text,
        }
    }

    /// Left gutter, right-aligned to `width` columns plus a trailing space
    ///
    /// `==>` marks the current line, `<i>>` a back-reference to frame `i`.
    pub fn gutter(&self, width: usize) -> String {
        match self {
            SourceLine::Current { .. } => format!("{:>width$} ", "==>"),
            SourceLine::OtherFrame { frame_index, .. } => {
                format!("{:>w$}> ", frame_index, w = width.saturating_sub(1))
            }
            SourceLine::Plain { number, .. } => format!("{:>width$} ", number),
            SourceLine::Diagnostic(_) => String::new(),
        }
    }
}

/// A rendered window of source around one frame
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceView {
    pub file: String,
    pub lines: Vec<SourceLine>,
    /// Column width of the gutter
    pub gutter_width: usize,
}

impl SourceView {
    fn diagnostic(file: &str, message: String) -> Self {
        SourceView {
            file: file.to_string(),
            lines: vec![SourceLine::Diagnostic(message)],
            gutter_width: 0,
        }
    }

    /// True when the view holds only a diagnostic
    pub fn is_unavailable(&self) -> bool {
        matches!(self.lines.as_slice(), [SourceLine::Diagnostic(_)])
    }

    /// Plain text rows: gutter followed by the line text
    pub fn to_lines(&self) -> Vec<String> {
        self.lines
            .iter()
            .map(|line| format!("{}{}", line.gutter(self.gutter_width), line.text()))
            .collect()
    }
}

/// Render the source window of `radius` lines around `frame`
///
/// Reads the file fresh on every call.
pub fn render_window(
    reader: &SourceReader,
    store: &FrameStore,
    frame: &FrameRecord,
    radius: usize,
) -> SourceView {
    let lines = match reader.read_lines(frame.file()) {
        Ok(lines) => lines,
        Err(SourceUnavailable::Disabled) => {
            return SourceView::diagnostic(frame.file(), SourceUnavailable::Disabled.to_string());
        }
        Err(reason) => {
            return SourceView::diagnostic(frame.file(), format!("{}: {}", frame.file(), reason));
        }
    };

    // Later frames win when several share a line
    let other_frames: FxHashMap<usize, usize> = store
        .others_in_file(frame)
        .map(|other| (other.line(), other.index()))
        .collect();

    let current = frame.line();
    let start = current.saturating_sub(radius).max(1);
    let end = current.saturating_add(radius).min(lines.len());

    let mut rendered: Vec<SourceLine> = (start..=end)
        .map(|number| {
            let text = lines[number - 1].clone();
            if number == current {
                SourceLine::Current { number, text }
            } else if let Some(&frame_index) = other_frames.get(&number) {
                SourceLine::OtherFrame {
                    number,
                    frame_index,
                    text,
                }
            } else {
                SourceLine::Plain { number, text }
            }
        })
        .collect();

    if current > lines.len() {
        rendered.push(SourceLine::Diagnostic(
            SourceUnavailable::TooShort {
                line: current,
                len: lines.len(),
            }
            .to_string(),
        ));
    }

    let max_frame_width = other_frames
        .values()
        .map(|index| index.to_string().len())
        .max()
        .unwrap_or(0);
    let gutter_width = (max_frame_width + 1)
        .max(lines.len().to_string().len())
        .max(3);

    SourceView {
        file: frame.file().to_string(),
        lines: rendered,
        gutter_width,
    }
}
