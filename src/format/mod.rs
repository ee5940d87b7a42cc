//! Markdown formatting with comrak.
//!
//! The formatter is a collaborator: callers hold a [`Formatter`] and never
//! reach into comrak directly, so tests and alternative engines can stand in.

use comrak::{Arena, Options, format_commonmark, parse_document};

use crate::error::{Error, Result};

/// Turns raw document text into its canonical formatted form.
pub trait Formatter {
    /// Format `text`. Errors are returned to the caller unchanged.
    fn format(&self, text: &str) -> Result<String>;
}

/// Markdown dialect the parser accepts.
#[derive(clap::ValueEnum, Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum Grammar {
    /// Plain `CommonMark`.
    Commonmark,
    /// `CommonMark` plus GitHub extensions (tables, task lists, strikethrough,
    /// autolinks, footnotes).
    #[default]
    Gfm,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct FormatOptions {
    pub grammar: Grammar,
    /// Wrap prose at this column. Zero keeps line breaks as written.
    pub width: usize,
}

/// [`Formatter`] that round-trips markdown through comrak's AST.
#[derive(Debug, Clone, Default)]
pub struct MarkdownFormatter {
    options: FormatOptions,
}

impl MarkdownFormatter {
    pub const fn new(options: FormatOptions) -> Self {
        Self { options }
    }
}

impl Formatter for MarkdownFormatter {
    fn format(&self, text: &str) -> Result<String> {
        let arena = Arena::new();
        let options = create_options(&self.options);
        let root = parse_document(&arena, text, &options);

        let mut out = Vec::with_capacity(text.len());
        format_commonmark(root, &options, &mut out).map_err(Error::Render)?;
        Ok(String::from_utf8(out)?)
    }
}

fn create_options(config: &FormatOptions) -> Options {
    let mut options = Options::default();

    // Frontmatter is passed through verbatim instead of being read as a
    // thematic break plus a setext heading.
    options.extension.front_matter_delimiter = Some("---".to_string());

    if config.grammar == Grammar::Gfm {
        options.extension.strikethrough = true;
        options.extension.table = true;
        options.extension.autolink = true;
        options.extension.tasklist = true;
        options.extension.footnotes = true;
    }

    options.render.width = config.width;
    options
}

#[cfg(test)]
mod tests {
    use super::*;

    fn format(text: &str) -> String {
        MarkdownFormatter::default().format(text).unwrap()
    }

    #[test]
    fn test_star_bullets_become_dashes() {
        assert_eq!(format("* one\n* two\n"), "- one\n- two\n");
    }

    #[test]
    fn test_setext_heading_becomes_atx() {
        assert_eq!(format("Title\n=====\n"), "# Title\n");
    }

    #[test]
    fn test_frontmatter_is_preserved() {
        let out = format("---\ntitle: x\n---\n\n# Hi\n");
        assert!(out.starts_with("---\ntitle: x\n---\n"), "got: {out:?}");
        assert!(out.contains("# Hi\n"));
    }

    #[test]
    fn test_formatting_is_idempotent() {
        let once = format("Intro\n=====\n\n* a\n* b\n\nSome *text*  here.\n");
        assert_eq!(format(&once), once);
    }

    #[test]
    fn test_gfm_table_survives_formatting() {
        let out = format("| a | b |\n|---|---|\n| 1 | 2 |\n");
        assert!(out.contains("| a | b |"), "got: {out:?}");
    }

    #[test]
    fn test_commonmark_grammar_keeps_pipes_as_text() {
        let formatter = MarkdownFormatter::new(FormatOptions {
            grammar: Grammar::Commonmark,
            width: 0,
        });
        let out = formatter.format("| a | b |\n|---|---|\n").unwrap();
        assert!(!out.contains("| a | b |\n| --- | --- |"), "got: {out:?}");
    }
}
