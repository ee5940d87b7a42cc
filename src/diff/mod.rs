//! Line diffs between two snapshots of a document and their summary.
//!
//! This module handles:
//! - Computing a line-granular diff with `similar`
//! - Semantic cleanup of the raw edit script
//! - Classifying the result into modified/inserted/deleted counts

mod classify;
mod lines;
mod types;

pub use classify::classify;
pub use lines::{cleanup_semantic, line_diff};
pub use types::{ChangeSummary, DiffChunk, DiffOp};

/// Diff two snapshots and summarize the lines changed.
pub fn summarize(before: &str, after: &str) -> ChangeSummary {
    classify(&line_diff(before, after))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_summarize_identical_text_is_empty() {
        assert!(summarize("# a\n\nb\n", "# a\n\nb\n").is_empty());
    }

    #[test]
    fn test_summarize_counts_rewritten_bullets_as_modified() {
        let before = "# List\n\n* one\n* two\n\ntail paragraph that stays\n";
        let after = "# List\n\n- one\n- two\n\ntail paragraph that stays\n";
        assert_eq!(summarize(before, after), ChangeSummary::new(1, 0, 0));
    }

    #[test]
    fn test_summarize_new_frontmatter_is_inserted() {
        let before = "body\n";
        let after = "---\ncreated: now\n---\nbody\n";
        assert_eq!(summarize(before, after), ChangeSummary::new(0, 1, 0));
    }

    #[test]
    fn test_summarize_dropped_tail_is_deleted() {
        let before = "keep this line\n\n\n";
        let after = "keep this line\n";
        assert_eq!(summarize(before, after), ChangeSummary::new(0, 0, 1));
    }
}
