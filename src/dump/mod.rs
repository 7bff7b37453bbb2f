//! Dump loading and the frame data model
//!
//! This module provides the read side of a dump:
//! - [`value`]: captured values reduced to a representation and a type tag
//! - [`frame`]: one captured frame with its bindings and source position
//! - [`store`]: the ordered, validated collection of frames
//!
//! # File format
//!
//! A dump is JSON, either a bare array of frames or an object wrapping them:
//!
//! ```text
//! { "message": "Traceback ...", "frames": [ { "globals": {..}, "locals": {..}, "line": 42, "file": "app.py" }, .. ] }
//! ```
//!
//! Source files are never touched while loading; they are read lazily for display.

pub mod frame;
pub mod store;
pub mod value;

pub use frame::{Bindings, FrameRecord};
pub use store::FrameStore;
pub use value::Value;

use crate::error::DumpError;
use serde::Deserialize;
use serde_json::Value as Json;
use std::fs;
use std::path::Path;
use tracing::info;

/// Accepted top-level layouts
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum RawDump {
    Frames(Vec<Json>),
    Wrapped {
        #[serde(default)]
        message: Option<String>,
        frames: Vec<Json>,
    },
}

/// Read and validate the dump at `path`
pub fn load(path: &Path) -> Result<FrameStore, DumpError> {
    let text = fs::read_to_string(path).map_err(|source| DumpError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    let json: Json = serde_json::from_str(&text).map_err(|source| DumpError::Decode {
        path: path.to_path_buf(),
        source,
    })?;

    let store = from_json(json)?;
    info!(
        path = %path.display(),
        frames = store.len(),
        "loaded dump"
    );
    Ok(store)
}

/// Validate an already decoded dump document
pub fn from_json(json: Json) -> Result<FrameStore, DumpError> {
    let raw = RawDump::deserialize(json).map_err(|_| {
        DumpError::Layout("expected an array of frames or an object with a 'frames' array".into())
    })?;

    match raw {
        RawDump::Frames(entries) => FrameStore::from_entries(&entries),
        RawDump::Wrapped { message, frames } => {
            Ok(FrameStore::from_entries(&frames)?.with_message(message))
        }
    }
}
