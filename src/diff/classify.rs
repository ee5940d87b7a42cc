use super::types::{ChangeSummary, DiffChunk, DiffOp};

/// Collapse a line diff into modified/inserted/deleted counts.
///
/// A delete immediately followed by an insert is one modified change; the
/// pairing is greedy and left to right, so every chunk lands in at most one
/// bucket. Equal chunks are ignored.
pub fn classify(chunks: &[DiffChunk]) -> ChangeSummary {
    let mut summary = ChangeSummary::default();
    let last = chunks.len().saturating_sub(1);
    let mut i = 0;

    while i < chunks.len() {
        match chunks[i].op {
            DiffOp::Equal => {}
            DiffOp::Insert if i == 0 => summary.inserted += 1,
            DiffOp::Insert => {
                if chunks[i - 1].op != DiffOp::Delete {
                    summary.inserted += 1;
                }
            }
            DiffOp::Delete if i == last => summary.deleted += 1,
            DiffOp::Delete => {
                if chunks[i + 1].op == DiffOp::Insert {
                    summary.modified += 1;
                    i += 1;
                } else {
                    summary.deleted += 1;
                }
            }
        }
        i += 1;
    }

    summary
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diff::DiffOp::{Delete, Equal, Insert};

    fn seq(ops: &[DiffOp]) -> Vec<DiffChunk> {
        ops.iter()
            .map(|op| DiffChunk::new(*op, vec!["x\n".to_string()]))
            .collect()
    }

    #[test]
    fn test_empty_sequence_has_no_changes() {
        assert_eq!(classify(&[]), ChangeSummary::new(0, 0, 0));
    }

    #[test]
    fn test_all_equal_has_no_changes() {
        for len in 1..6 {
            assert_eq!(classify(&seq(&vec![Equal; len])), ChangeSummary::default());
        }
    }

    #[test]
    fn test_leading_insert_counts_as_inserted() {
        assert_eq!(classify(&seq(&[Insert])), ChangeSummary::new(0, 1, 0));
    }

    #[test]
    fn test_delete_then_insert_is_modified() {
        assert_eq!(classify(&seq(&[Delete, Insert])), ChangeSummary::new(1, 0, 0));
    }

    #[test]
    fn test_trailing_delete_counts_as_deleted() {
        assert_eq!(classify(&seq(&[Delete])), ChangeSummary::new(0, 0, 1));
    }

    #[test]
    fn test_pair_between_equalities_is_modified() {
        assert_eq!(
            classify(&seq(&[Equal, Delete, Insert, Equal])),
            ChangeSummary::new(1, 0, 0)
        );
    }

    #[test]
    fn test_insert_before_trailing_delete_counts_both() {
        assert_eq!(classify(&seq(&[Insert, Delete])), ChangeSummary::new(0, 1, 1));
    }

    #[test]
    fn test_delete_followed_by_equal_is_deleted() {
        assert_eq!(
            classify(&seq(&[Equal, Delete, Equal, Insert])),
            ChangeSummary::new(0, 1, 1)
        );
    }

    #[test]
    fn test_pairs_are_greedy_and_non_overlapping() {
        assert_eq!(
            classify(&seq(&[Delete, Insert, Delete, Insert, Insert])),
            ChangeSummary::new(2, 1, 0)
        );
    }

    mod property_tests {
        use super::*;
        use proptest::prelude::*;

        fn op() -> impl Strategy<Value = DiffOp> {
            prop_oneof![Just(Equal), Just(Insert), Just(Delete)]
        }

        proptest! {
            #[test]
            fn each_chunk_lands_in_at_most_one_bucket(ops in prop::collection::vec(op(), 0..64)) {
                let summary = classify(&seq(&ops));
                let n = ops.len();
                prop_assert!(summary.modified + summary.inserted + summary.deleted <= n);
                prop_assert!(summary.modified * 2 + summary.inserted + summary.deleted <= n);
            }

            #[test]
            fn equal_chunks_never_count(len in 0..64usize) {
                prop_assert!(classify(&seq(&vec![Equal; len])).is_empty());
            }

            #[test]
            fn edits_are_fully_accounted(ops in prop::collection::vec(op(), 0..64)) {
                let summary = classify(&seq(&ops));
                let edits = ops.iter().filter(|op| **op != Equal).count();
                prop_assert_eq!(summary.modified * 2 + summary.inserted + summary.deleted, edits);
            }
        }
    }
}
