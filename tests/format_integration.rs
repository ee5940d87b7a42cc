use chrono::{Local, TimeZone};

use notefmt::diff::ChangeSummary;
use notefmt::format::{FormatOptions, Grammar};
use notefmt::frontmatter::{TimestampFormat, has_block};
use notefmt::host::FileTimes;
use notefmt::prelude::*;

fn fixed_times() -> FileTimes {
    FileTimes {
        created: Local.with_ymd_and_hms(2024, 3, 1, 9, 0, 0).unwrap(),
        modified: Local.with_ymd_and_hms(2026, 10, 16, 15, 4, 5).unwrap(),
    }
}

fn settings() -> FormatSettings {
    FormatSettings {
        stamp: Some(TimestampFormat::Human),
        check: false,
    }
}

#[test]
fn test_fixture_is_formatted_and_stamped() {
    let source = include_str!("fixtures/note.md");
    let mut host = MemoryHost::new("note.md", source, fixed_times());
    let outcome = format_document(&mut host, &MarkdownFormatter::default(), &settings()).unwrap();

    let text = host.contents();
    assert!(outcome.written);
    assert!(has_block(text));
    assert!(text.starts_with(
        "---\ncreated: Friday, March 1st 2024, 9:00:00 am\nmodified: Friday, October 16th 2026, 3:04:05 pm\n---\n"
    ));
    assert!(text.contains("# Weekly review\n"));
    assert!(text.contains("## Notes\n"));
    assert!(text.contains("- shipped the importer\n"));
    assert!(outcome.summary.modified + outcome.summary.inserted + outcome.summary.deleted > 0);
}

#[test]
fn test_second_pass_is_a_no_op() {
    let source = include_str!("fixtures/note.md");
    let mut host = MemoryHost::new("note.md", source, fixed_times());
    let formatter = MarkdownFormatter::default();
    format_document(&mut host, &formatter, &settings()).unwrap();
    let first = host.contents().to_string();

    let outcome = format_document(&mut host, &formatter, &settings()).unwrap();
    assert!(!outcome.changed);
    assert_eq!(outcome.summary, ChangeSummary::default());
    assert_eq!(host.contents(), first);
    assert_eq!(host.writes(), 1);
}

#[test]
fn test_existing_frontmatter_keeps_created_and_updates_modified() {
    let source = "---\ntitle: Plan\ncreated: 2020-01-01\nmodified: 2020-01-02\n---\n\n* item\n";
    let mut host = MemoryHost::new("plan.md", source, fixed_times());
    let outcome = format_document(&mut host, &MarkdownFormatter::default(), &settings()).unwrap();

    let text = host.contents();
    assert!(text.starts_with(
        "---\ntitle: Plan\ncreated: 2020-01-01\nmodified: Friday, October 16th 2026, 3:04:05 pm\n---\n"
    ));
    assert!(text.ends_with("- item\n"));
    // The closing delimiter between the two edits is too short to stand on
    // its own, so both edits read as one modified region.
    assert_eq!(outcome.summary, ChangeSummary::new(1, 0, 0));
}

#[test]
fn test_file_documents_are_rewritten_on_disk() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("todo.md");
    std::fs::write(&path, "Todo\n====\n\n* a\n").unwrap();

    let mut host = FileHost::new(&path);
    let formatter = MarkdownFormatter::new(FormatOptions {
        grammar: Grammar::Commonmark,
        width: 0,
    });
    let no_stamp = FormatSettings {
        stamp: None,
        check: false,
    };
    let outcome = format_document(&mut host, &formatter, &no_stamp).unwrap();

    assert_eq!(std::fs::read_to_string(&path).unwrap(), "# Todo\n\n- a\n");
    assert_eq!(outcome.summary, ChangeSummary::new(1, 0, 0));
}
