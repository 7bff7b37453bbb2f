//! A single captured stack frame

use super::value::Value;
use crate::error::FrameDefect;
use serde_json::{Map, Value as Json};
use std::collections::BTreeMap;
use std::fmt;
use std::path::Path;

/// Identifier -> captured value
pub type Bindings = BTreeMap<String, Value>;

/// Immutable record of one captured frame
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FrameRecord {
    index: usize,
    file: String,
    line: usize,
    globals: Bindings,
    locals: Bindings,
}

impl FrameRecord {
    pub fn new(index: usize, file: impl Into<String>, line: usize) -> Self {
        FrameRecord {
            index,
            file: file.into(),
            line,
            globals: Bindings::new(),
            locals: Bindings::new(),
        }
    }

    pub fn with_globals(mut self, globals: Bindings) -> Self {
        self.globals = globals;
        self
    }

    pub fn with_locals(mut self, locals: Bindings) -> Self {
        self.locals = locals;
        self
    }

    pub(crate) fn reindexed(mut self, index: usize) -> Self {
        self.index = index;
        self
    }

    /// Decode the frame at `index` from its JSON entry
    pub(crate) fn from_json(index: usize, entry: &Json) -> Result<Self, FrameDefect> {
        let map = entry.as_object().ok_or(FrameDefect::NotAnObject)?;

        let globals = decode_bindings(map, "globals")?;
        let locals = decode_bindings(map, "locals")?;

        let line = field(map, "line")?
            .as_u64()
            .filter(|line| *line > 0)
            .and_then(|line| usize::try_from(line).ok())
            .ok_or(FrameDefect::InvalidField {
                field: "line",
                expected: "a positive integer",
            })?;

        let file = field(map, "file")?
            .as_str()
            .ok_or(FrameDefect::InvalidField {
                field: "file",
                expected: "a string",
            })?;

        Ok(FrameRecord::new(index, file, line)
            .with_globals(globals)
            .with_locals(locals))
    }

    /// Position of this frame in its store
    pub fn index(&self) -> usize {
        self.index
    }

    pub fn file(&self) -> &str {
        &self.file
    }

    /// 1-based line the frame was stopped at
    pub fn line(&self) -> usize {
        self.line
    }

    pub fn globals(&self) -> &Bindings {
        &self.globals
    }

    pub fn locals(&self) -> &Bindings {
        &self.locals
    }

    /// Final path component of the frame's file
    pub fn file_name(&self) -> &str {
        Path::new(&self.file)
            .file_name()
            .and_then(|name| name.to_str())
            .unwrap_or(&self.file)
    }

    /// Prompt label of the form `[<basename>:<line> (<index>)]`
    pub fn prompt_label(&self) -> String {
        format!("[{}:{} ({})]", self.file_name(), self.line, self.index)
    }
}

impl fmt::Display for FrameRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "<Frame {} at {}:{}>", self.index, self.file, self.line)
    }
}

fn field<'a>(map: &'a Map<String, Json>, name: &'static str) -> Result<&'a Json, FrameDefect> {
    map.get(name).ok_or(FrameDefect::MissingField(name))
}

fn decode_bindings(map: &Map<String, Json>, name: &'static str) -> Result<Bindings, FrameDefect> {
    let object = field(map, name)?
        .as_object()
        .ok_or(FrameDefect::InvalidField {
            field: name,
            expected: "an object",
        })?;

    Ok(object
        .iter()
        .map(|(ident, value)| (ident.clone(), Value::from_json(value)))
        .collect())
}
