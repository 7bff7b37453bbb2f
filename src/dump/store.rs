//! Ordered, read-only collection of captured frames

use super::frame::FrameRecord;
use crate::error::DumpError;
use serde_json::Value as Json;

/// All frames of a dump, in the order the capturing process wrote them
///
/// A store always holds at least one frame, and `frames()[i].index() == i`.
#[derive(Debug, Clone)]
pub struct FrameStore {
    frames: Vec<FrameRecord>,
    message: Option<String>,
}

impl FrameStore {
    /// Build a store from decoded per-frame entries
    pub fn from_entries(entries: &[Json]) -> Result<Self, DumpError> {
        if entries.is_empty() {
            return Err(DumpError::EmptyDump);
        }

        let frames = entries
            .iter()
            .enumerate()
            .map(|(index, entry)| {
                FrameRecord::from_json(index, entry)
                    .map_err(|defect| DumpError::MalformedFrame { index, defect })
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(FrameStore {
            frames,
            message: None,
        })
    }

    /// Build a store from already constructed records, re-assigning indices by position
    pub fn from_frames(frames: Vec<FrameRecord>) -> Result<Self, DumpError> {
        if frames.is_empty() {
            return Err(DumpError::EmptyDump);
        }

        let frames = frames
            .into_iter()
            .enumerate()
            .map(|(index, frame)| frame.reindexed(index))
            .collect();

        Ok(FrameStore {
            frames,
            message: None,
        })
    }

    /// Attach the message recorded alongside the frames
    pub fn with_message(mut self, message: Option<String>) -> Self {
        self.message = message;
        self
    }

    /// Get a frame by index
    pub fn get(&self, index: usize) -> Option<&FrameRecord> {
        self.frames.get(index)
    }

    pub fn frames(&self) -> &[FrameRecord] {
        &self.frames
    }

    /// Get the number of frames (never zero)
    pub fn len(&self) -> usize {
        self.frames.len()
    }

    /// Always false; kept for API symmetry with `len`
    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    /// Message recorded with the dump, e.g. the exception that triggered it
    pub fn message(&self) -> Option<&str> {
        self.message.as_deref()
    }

    /// Frames other than `frame` captured in the same file
    pub fn others_in_file<'a>(
        &'a self,
        frame: &'a FrameRecord,
    ) -> impl Iterator<Item = &'a FrameRecord> + 'a {
        self.frames
            .iter()
            .filter(move |other| other.index() != frame.index() && other.file() == frame.file())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::FrameDefect;
    use serde_json::json;

    fn entry(file: &str, line: usize) -> Json {
        json!({"globals": {}, "locals": {}, "line": line, "file": file})
    }

    #[test]
    fn test_empty_input_is_rejected() {
        assert!(matches!(
            FrameStore::from_entries(&[]),
            Err(DumpError::EmptyDump)
        ));
        assert!(matches!(
            FrameStore::from_frames(Vec::new()),
            Err(DumpError::EmptyDump)
        ));
    }

    #[test]
    fn test_missing_line_names_offending_index() {
        let entries = vec![
            entry("a.py", 1),
            entry("a.py", 2),
            json!({"globals": {}, "locals": {}, "file": "a.py"}),
        ];
        match FrameStore::from_entries(&entries) {
            Err(DumpError::MalformedFrame { index, defect }) => {
                assert_eq!(index, 2);
                assert_eq!(defect, FrameDefect::MissingField("line"));
            }
            other => panic!("Expected MalformedFrame, got {:?}", other),
        }
    }

    #[test]
    fn test_indices_follow_storage_order() {
        let store =
            FrameStore::from_entries(&[entry("a.py", 3), entry("b.py", 1), entry("a.py", 9)])
                .unwrap();
        assert_eq!(store.len(), 3);
        for (i, frame) in store.frames().iter().enumerate() {
            assert_eq!(frame.index(), i);
        }

        let first = store.get(0).unwrap();
        let others: Vec<usize> = store.others_in_file(first).map(|f| f.index()).collect();
        assert_eq!(others, vec![2]);
    }

    #[test]
    fn test_from_frames_reassigns_indices() {
        let store = FrameStore::from_frames(vec![
            FrameRecord::new(7, "x.py", 1),
            FrameRecord::new(7, "y.py", 2),
        ])
        .unwrap();
        assert_eq!(store.get(1).unwrap().index(), 1);
        assert_eq!(store.get(1).unwrap().file(), "y.py");
    }
}
