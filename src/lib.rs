// Only allow lints that are either transitive-dependency noise or
// genuinely opinionated style choices that don't indicate real issues.
#![allow(
    // Transitive dependency version mismatches we can't control
    clippy::multiple_crate_versions,
    // module_name_repetitions is pure style preference (e.g. diff::DiffOp)
    clippy::module_name_repetitions
)]

//! # notefmt
//!
//! Formats markdown notes in place, keeps `created:` / `modified:`
//! timestamps in their frontmatter, and reports how many lines changed.
//!
//! ## Pipeline
//!
//! For each document:
//! 1. Read the text from a [`host::Host`]
//! 2. Format it with a [`format::Formatter`] (comrak by default)
//! 3. Stamp the frontmatter from the host's file times
//! 4. Diff old against new by line and classify the edits
//! 5. Write the result back and notify the user
//!
//! ## Modules
//!
//! - [`app`]: The format command, reporting, and watch mode
//! - [`config`]: Saved default flags
//! - [`diff`]: Line diffs and change summaries
//! - [`format`]: Markdown formatting
//! - [`frontmatter`]: Timestamp stamping
//! - [`host`]: Where documents are read from and written to
//! - [`notice`]: User-facing notices
//! - [`watcher`]: File watching

pub mod app;
pub mod config;
pub mod diff;
pub mod error;
pub mod format;
pub mod frontmatter;
pub mod host;
pub mod notice;
pub mod perf;
pub mod watcher;

pub use error::{Error, Result};

/// Re-export commonly used types
pub mod prelude {
    pub use crate::app::{App, FormatSettings, Outcome, format_document};
    pub use crate::diff::{ChangeSummary, DiffChunk, DiffOp, classify, line_diff};
    pub use crate::format::{Formatter, MarkdownFormatter};
    pub use crate::host::{FileHost, Host, MemoryHost};
}
