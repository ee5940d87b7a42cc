//! Frontmatter timestamp stamping.
//!
//! A frontmatter block is a `---` line at the very start of the document,
//! optional metadata lines, and a closing `---` line. Only lines inside the
//! block are inspected or rewritten.

mod timestamp;

use std::ops::Range;
use std::sync::LazyLock;

use regex::Regex;

pub use timestamp::TimestampFormat;

use crate::host::FileTimes;

const EMPTY_BLOCK: &str = "---\n---\n";
const OPENING: &str = "---\n";

static BLOCK: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\A---\n(?s:(?P<body>.*?\n)?)---(?:\n|\z)").expect("valid frontmatter pattern")
});
static CREATED_LINE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?m)^created[ \t]*:.*$").expect("valid created pattern"));
static MODIFIED_LINE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?m)^modified[ \t]*:.*$").expect("valid modified pattern"));

/// Returns true if `text` opens with a complete frontmatter block.
pub fn has_block(text: &str) -> bool {
    BLOCK.is_match(text)
}

/// Byte range of the block's metadata lines. The end is where the closing
/// delimiter starts.
fn body_range(text: &str) -> Option<Range<usize>> {
    let caps = BLOCK.captures(text)?;
    let end = caps.name("body").map_or(OPENING.len(), |m| m.end());
    Some(OPENING.len()..end)
}

/// Add `created:` (if missing) and set `modified:` in the document's
/// frontmatter, creating an empty block first when there is none.
///
/// An existing `created:` line is never touched. New lines go directly
/// above the closing delimiter, `created` before `modified`.
pub fn stamp(text: &str, times: &FileTimes, format: &TimestampFormat) -> String {
    let (mut doc, mut body) = match body_range(text) {
        Some(range) => (text.to_string(), range),
        None => (
            format!("{EMPTY_BLOCK}{text}"),
            OPENING.len()..OPENING.len(),
        ),
    };

    if !CREATED_LINE.is_match(&doc[body.clone()]) {
        let line = format!("created: {}\n", format.render(&times.created));
        doc.insert_str(body.end, &line);
        body.end += line.len();
    }

    let modified = format!("modified: {}", format.render(&times.modified));
    let existing = MODIFIED_LINE
        .find(&doc[body.clone()])
        .map(|m| body.start + m.start()..body.start + m.end());
    match existing {
        Some(range) => doc.replace_range(range, &modified),
        None => doc.insert_str(body.end, &format!("{modified}\n")),
    }

    tracing::debug!(
        created = %times.created,
        modified = %times.modified,
        "frontmatter stamped"
    );
    doc
}
