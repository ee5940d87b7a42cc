use std::fmt;

use serde::Serialize;

/// Kind of a line-level edit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DiffOp {
    Equal,
    Insert,
    Delete,
}

/// A run of whole lines sharing one [`DiffOp`].
///
/// Each line keeps its trailing newline (the last line of a text may not
/// have one).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiffChunk {
    pub op: DiffOp,
    pub lines: Vec<String>,
}

impl DiffChunk {
    pub fn new(op: DiffOp, lines: Vec<String>) -> Self {
        Self { op, lines }
    }

    pub fn equal(lines: &[&str]) -> Self {
        Self::from_strs(DiffOp::Equal, lines)
    }

    pub fn insert(lines: &[&str]) -> Self {
        Self::from_strs(DiffOp::Insert, lines)
    }

    pub fn delete(lines: &[&str]) -> Self {
        Self::from_strs(DiffOp::Delete, lines)
    }

    fn from_strs(op: DiffOp, lines: &[&str]) -> Self {
        Self {
            op,
            lines: lines.iter().map(|l| (*l).to_string()).collect(),
        }
    }

    /// Length of the run in characters, newlines included.
    pub fn char_len(&self) -> usize {
        self.lines.iter().map(|l| l.chars().count()).sum()
    }

    /// The run's lines joined back into text.
    pub fn text(&self) -> String {
        self.lines.concat()
    }
}

/// Aggregate line counts for one format run.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ChangeSummary {
    pub modified: usize,
    pub inserted: usize,
    pub deleted: usize,
}

impl ChangeSummary {
    pub const fn new(modified: usize, inserted: usize, deleted: usize) -> Self {
        Self {
            modified,
            inserted,
            deleted,
        }
    }

    /// True when no line was touched.
    pub const fn is_empty(&self) -> bool {
        self.modified == 0 && self.inserted == 0 && self.deleted == 0
    }
}

impl fmt::Display for ChangeSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{} {} modified.", self.modified, lines_word(self.modified))?;
        writeln!(f, "{} {} inserted.", self.inserted, lines_word(self.inserted))?;
        write!(f, "{} {} deleted.", self.deleted, lines_word(self.deleted))
    }
}

const fn lines_word(count: usize) -> &'static str {
    if count == 1 { "line" } else { "lines" }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_summary_display_pluralizes_each_count() {
        let summary = ChangeSummary::new(1, 0, 2);
        assert_eq!(
            summary.to_string(),
            "1 line modified.\n0 lines inserted.\n2 lines deleted."
        );
    }

    #[test]
    fn test_chunk_char_len_counts_chars_not_bytes() {
        let chunk = DiffChunk::equal(&["héllo\n", "ü"]);
        assert_eq!(chunk.char_len(), 7);
        assert_eq!(chunk.text(), "héllo\nü");
    }

    #[test]
    fn test_default_summary_is_empty() {
        assert!(ChangeSummary::default().is_empty());
        assert!(!ChangeSummary::new(0, 1, 0).is_empty());
    }
}
