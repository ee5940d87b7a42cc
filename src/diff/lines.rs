//! Line-granular diffing backed by `similar`.

use std::mem;
use std::time::Duration;

use similar::{Algorithm, ChangeTag, TextDiff};

use super::types::{DiffChunk, DiffOp};

/// Upper bound on the time spent searching for a minimal edit script.
/// Past the deadline the diff is still valid, just not minimal.
const DIFF_DEADLINE: Duration = Duration::from_secs(1);

/// Diff two texts line by line.
///
/// Lines are the indivisible unit. The raw edit script is grouped into runs,
/// merged, and then passed through a semantic cleanup that folds short
/// equalities sandwiched between larger edits into those edits.
pub fn line_diff(before: &str, after: &str) -> Vec<DiffChunk> {
    let diff = TextDiff::configure()
        .algorithm(Algorithm::Myers)
        .timeout(DIFF_DEADLINE)
        .diff_lines(before, after);

    let mut chunks: Vec<DiffChunk> = Vec::new();
    for change in diff.iter_all_changes() {
        let op = match change.tag() {
            ChangeTag::Equal => DiffOp::Equal,
            ChangeTag::Insert => DiffOp::Insert,
            ChangeTag::Delete => DiffOp::Delete,
        };
        let line = change.value().to_string();
        match chunks.last_mut() {
            Some(chunk) if chunk.op == op => chunk.lines.push(line),
            _ => chunks.push(DiffChunk::new(op, vec![line])),
        }
    }

    merge(&mut chunks);
    cleanup_semantic(&mut chunks);
    tracing::trace!(chunks = chunks.len(), "line diff computed");
    chunks
}

/// Absorb equalities that are no longer than the edits on either side,
/// then split out line overlaps between adjacent deletes and inserts.
pub fn cleanup_semantic(chunks: &mut Vec<DiffChunk>) {
    let mut changed = false;
    let mut equalities: Vec<usize> = Vec::new();
    let mut last_equality: Option<usize> = None;
    let (mut ins_before, mut del_before) = (0usize, 0usize);
    let (mut ins_after, mut del_after) = (0usize, 0usize);
    let mut pointer = 0;

    while pointer < chunks.len() {
        let len = chunks[pointer].char_len();
        let op = chunks[pointer].op;
        match op {
            DiffOp::Equal => {
                equalities.push(pointer);
                ins_before = ins_after;
                del_before = del_after;
                ins_after = 0;
                del_after = 0;
                last_equality = Some(len);
            }
            DiffOp::Insert | DiffOp::Delete => {
                if op == DiffOp::Insert {
                    ins_after += len;
                } else {
                    del_after += len;
                }
                let absorbable = last_equality.is_some_and(|eq| {
                    eq <= ins_before.max(del_before) && eq <= ins_after.max(del_after)
                });
                if let (true, Some(&at)) = (absorbable, equalities.last()) {
                    // The equality becomes a delete of the old lines followed
                    // by an insert of the same lines.
                    let lines = chunks[at].lines.clone();
                    chunks.insert(at, DiffChunk::new(DiffOp::Delete, lines));
                    chunks[at + 1].op = DiffOp::Insert;

                    equalities.pop();
                    equalities.pop();
                    ins_before = 0;
                    del_before = 0;
                    ins_after = 0;
                    del_after = 0;
                    last_equality = None;
                    changed = true;
                    // Rescan from the last equality still standing.
                    pointer = equalities.last().map_or(0, |p| p + 1);
                    continue;
                }
            }
        }
        pointer += 1;
    }

    if changed {
        merge(chunks);
    }
    split_overlaps(chunks);
}

/// Normalize a chunk list: one delete and one insert per edit region
/// (delete first), lines shared by the head or tail of both moved into the
/// neighbouring equalities, and adjacent equalities joined.
fn merge(chunks: &mut Vec<DiffChunk>) {
    let mut merged: Vec<DiffChunk> = Vec::with_capacity(chunks.len());
    let mut deleted: Vec<String> = Vec::new();
    let mut inserted: Vec<String> = Vec::new();

    for chunk in chunks.drain(..) {
        match chunk.op {
            DiffOp::Delete => deleted.extend(chunk.lines),
            DiffOp::Insert => inserted.extend(chunk.lines),
            DiffOp::Equal => {
                let mut lines = chunk.lines;
                flush_edits(&mut merged, &mut deleted, &mut inserted, &mut lines);
                push_equal(&mut merged, lines);
            }
        }
    }
    let mut tail = Vec::new();
    flush_edits(&mut merged, &mut deleted, &mut inserted, &mut tail);
    push_equal(&mut merged, tail);

    *chunks = merged;
}

fn flush_edits(
    merged: &mut Vec<DiffChunk>,
    deleted: &mut Vec<String>,
    inserted: &mut Vec<String>,
    next_equal: &mut Vec<String>,
) {
    if !deleted.is_empty() && !inserted.is_empty() {
        let prefix = common_prefix(deleted, inserted);
        if prefix > 0 {
            deleted.drain(..prefix);
            let head: Vec<String> = inserted.drain(..prefix).collect();
            push_equal(merged, head);
        }
        let suffix = common_suffix(deleted, inserted);
        if suffix > 0 {
            deleted.truncate(deleted.len() - suffix);
            let tail = inserted.split_off(inserted.len() - suffix);
            next_equal.splice(0..0, tail);
        }
    }
    if !deleted.is_empty() {
        merged.push(DiffChunk::new(DiffOp::Delete, mem::take(deleted)));
    }
    if !inserted.is_empty() {
        merged.push(DiffChunk::new(DiffOp::Insert, mem::take(inserted)));
    }
}

fn push_equal(merged: &mut Vec<DiffChunk>, lines: Vec<String>) {
    if lines.is_empty() {
        return;
    }
    match merged.last_mut() {
        Some(last) if last.op == DiffOp::Equal => last.lines.extend(lines),
        _ => merged.push(DiffChunk::new(DiffOp::Equal, lines)),
    }
}

/// Where a delete's trailing lines reappear at the head of the following
/// insert (or the reverse), and the overlap covers at least half of either
/// side, pull the overlap out as an equality.
fn split_overlaps(chunks: &mut Vec<DiffChunk>) {
    let mut pointer = 1;
    while pointer < chunks.len() {
        if chunks[pointer - 1].op == DiffOp::Delete && chunks[pointer].op == DiffOp::Insert {
            let deletion = chunks[pointer - 1].lines.clone();
            let insertion = chunks[pointer].lines.clone();
            let forward = common_overlap(&deletion, &insertion);
            let backward = common_overlap(&insertion, &deletion);

            if forward >= backward {
                let overlap = char_len(&insertion[..forward]);
                if forward > 0 && covers_half(overlap, &deletion, &insertion) {
                    let (head, rest) = insertion.split_at(forward);
                    chunks[pointer - 1].lines.truncate(deletion.len() - forward);
                    chunks[pointer].lines = rest.to_vec();
                    chunks.insert(pointer, DiffChunk::new(DiffOp::Equal, head.to_vec()));
                    pointer += 1;
                }
            } else {
                let overlap = char_len(&deletion[..backward]);
                if covers_half(overlap, &deletion, &insertion) {
                    let (head, rest) = deletion.split_at(backward);
                    chunks[pointer - 1] = DiffChunk::new(
                        DiffOp::Insert,
                        insertion[..insertion.len() - backward].to_vec(),
                    );
                    chunks[pointer] = DiffChunk::new(DiffOp::Delete, rest.to_vec());
                    chunks.insert(pointer, DiffChunk::new(DiffOp::Equal, head.to_vec()));
                    pointer += 1;
                }
            }
            pointer += 1;
        }
        pointer += 1;
    }
}

fn covers_half(overlap: usize, deletion: &[String], insertion: &[String]) -> bool {
    overlap * 2 >= char_len(deletion) || overlap * 2 >= char_len(insertion)
}

fn char_len(lines: &[String]) -> usize {
    lines.iter().map(|l| l.chars().count()).sum()
}

fn common_prefix(a: &[String], b: &[String]) -> usize {
    a.iter().zip(b).take_while(|(x, y)| x == y).count()
}

fn common_suffix(a: &[String], b: &[String]) -> usize {
    a.iter()
        .rev()
        .zip(b.iter().rev())
        .take_while(|(x, y)| x == y)
        .count()
}

/// Longest run of lines that ends `a` and starts `b`, strictly shorter than
/// both so neither side is emptied.
fn common_overlap(a: &[String], b: &[String]) -> usize {
    let max = a.len().min(b.len()).saturating_sub(1);
    (1..=max)
        .rev()
        .find(|&k| a[a.len() - k..] == b[..k])
        .unwrap_or(0)
}
