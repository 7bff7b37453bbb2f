//! Error types for loading dumps and driving a session
//!
//! Two families live here:
//!
//! - [`DumpError`]: structural problems with a dump file. These are fatal to loading;
//!   no session is started.
//! - [`SessionError`]: misuse of the session API by a host shell, such as asking for
//!   the current frame before one was projected. These indicate an integration bug.
//!
//! Expected, user-facing conditions are *not* errors here: a navigation past either
//! end of the store is reported as [`OutOfRange`](crate::session::cursor::OutOfRange),
//! and a missing source file as
//! [`SourceUnavailable`](crate::source::SourceUnavailable).

use std::fmt;
use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while loading a dump into a frame store
#[derive(Debug, Error)]
pub enum DumpError {
    /// The dump file could not be read
    #[error("failed to read dump {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// The dump file is not valid JSON
    #[error("failed to decode dump {}: {source}", path.display())]
    Decode {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// The top level is neither a frame array nor an object with a `frames` array
    #[error("unexpected dump layout: {0}")]
    Layout(String),

    /// The dump holds zero frames
    #[error("dump contains no frames")]
    EmptyDump,

    /// A frame entry lacks a field or carries one of the wrong shape
    #[error("frame {index} is malformed: {defect}")]
    MalformedFrame { index: usize, defect: FrameDefect },
}

/// What exactly is wrong with a malformed frame entry
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FrameDefect {
    NotAnObject,
    MissingField(&'static str),
    InvalidField {
        field: &'static str,
        expected: &'static str,
    },
}

impl fmt::Display for FrameDefect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FrameDefect::NotAnObject => write!(f, "entry is not an object"),
            FrameDefect::MissingField(field) => write!(f, "missing field '{}'", field),
            FrameDefect::InvalidField { field, expected } => {
                write!(f, "field '{}' must be {}", field, expected)
            }
        }
    }
}

/// Errors raised by [`Session`](crate::session::Session) when driven incorrectly
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SessionError {
    /// A navigation or render command ran before `begin` projected a frame
    #[error("no frame has been projected yet; call begin() first")]
    NoCurrentFrame,

    /// The requested start frame does not exist
    #[error("start frame {index} is outside the dump (it has {len} frames)")]
    StartOutOfRange { index: usize, len: usize },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_malformed_frame_message_names_index_and_field() {
        let err = DumpError::MalformedFrame {
            index: 2,
            defect: FrameDefect::MissingField("line"),
        };
        assert_eq!(err.to_string(), "frame 2 is malformed: missing field 'line'");
    }

    #[test]
    fn test_invalid_field_message() {
        let defect = FrameDefect::InvalidField {
            field: "line",
            expected: "a positive integer",
        };
        assert_eq!(defect.to_string(), "field 'line' must be a positive integer");
    }
}
