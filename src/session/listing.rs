//! Frame listing: one row per frame with its source line

use crate::dump::FrameStore;
use crate::source::{LineCache, SourceReader, SourceUnavailable};
use std::fmt;

/// Suffix appended to the row of the current frame
pub const CURRENT_SUFFIX: &str = " <==";

/// A single listing row
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FrameRow {
    pub index: usize,
    pub file: String,
    pub line: usize,
    /// Source text at `line`, leading whitespace removed
    pub text: Result<String, SourceUnavailable>,
    pub is_current: bool,
}

impl FrameRow {
    /// Source text, or the diagnostic shown in its place
    pub fn display_text(&self) -> String {
        match &self.text {
            Ok(text) => text.clone(),
            Err(reason) => reason.listing_text(),
        }
    }
}

impl fmt::Display for FrameRow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}. {}:{} {}{}",
            self.index,
            self.file,
            self.line,
            self.display_text(),
            if self.is_current { CURRENT_SUFFIX } else { "" }
        )
    }
}

/// All frames of a store, in order
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FrameListing {
    pub rows: Vec<FrameRow>,
}

impl FrameListing {
    /// Build the listing, reading each distinct file at most once
    pub fn build(store: &FrameStore, reader: &SourceReader, current: usize) -> Self {
        let mut cache = LineCache::new(*reader);
        let rows = store
            .frames()
            .iter()
            .map(|frame| FrameRow {
                index: frame.index(),
                file: frame.file().to_string(),
                line: frame.line(),
                text: cache
                    .line(frame.file(), frame.line())
                    .map(|text| text.trim_start().to_string()),
                is_current: frame.index() == current,
            })
            .collect();
        FrameListing { rows }
    }

    pub fn current(&self) -> Option<&FrameRow> {
        self.rows.iter().find(|row| row.is_current)
    }
}

impl fmt::Display for FrameListing {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Available frames")?;
        for row in &self.rows {
            writeln!(f, "  {}", row)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dump::FrameRecord;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_rows_show_source_and_mark_current() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "def main():").unwrap();
        writeln!(file, "    run()").unwrap();
        let path = file.path().to_str().unwrap().to_string();

        let store = FrameStore::from_frames(vec![
            FrameRecord::new(0, path.as_str(), 2),
            FrameRecord::new(0, path.as_str(), 1),
            FrameRecord::new(0, path.as_str(), 7),
            FrameRecord::new(0, "/no/such/file.py", 1),
        ])
        .unwrap();

        let listing = FrameListing::build(&store, &SourceReader::default(), 1);

        assert_eq!(listing.rows[0].to_string(), format!("0. {}:2 run()", path));
        assert_eq!(
            listing.rows[1].to_string(),
            format!("1. {}:1 def main(): <==", path)
        );
        assert_eq!(
            listing.rows[2].to_string(),
            format!("2. {}:7 # file too small to find line", path)
        );
        assert_eq!(
            listing.rows[3].to_string(),
            "3. /no/such/file.py:1 # unable to load sources: File not found"
        );
        assert_eq!(listing.current().map(|row| row.index), Some(1));
    }

    #[test]
    fn test_disabled_sources_listing() {
        let store = FrameStore::from_frames(vec![FrameRecord::new(0, "x.py", 4)]).unwrap();
        let listing = FrameListing::build(&store, &SourceReader::new(false), 0);
        let text = listing.to_string();

        assert!(text.starts_with("Available frames\n"));
        assert!(text.contains("  0. x.py:4 # sources disabled <=="));
    }
}
