use std::path::PathBuf;

use notefmt::config::{ConfigFlags, load_config_flags, parse_flag_tokens};
use notefmt::format::Grammar;

#[test]
fn test_config_file_parsing_ignores_comments_and_blank_lines() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join(".notefmtrc");
    let content = r#"
# comment
--quiet

--grammar commonmark
   
--time-format %Y-%m-%d %H:%M
--debug-log=events.log
"#;
    std::fs::write(&path, content).unwrap();

    let flags = load_config_flags(&path).unwrap();
    assert!(flags.quiet);
    assert_eq!(flags.grammar, Some(Grammar::Commonmark));
    assert_eq!(flags.time_format.as_deref(), Some("%Y-%m-%d %H:%M"));
    assert_eq!(flags.debug_log, Some(PathBuf::from("events.log")));
}

#[test]
fn test_cli_flags_override_file_flags() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join(".notefmtrc");
    std::fs::write(&path, "--no-timestamps\n--width 72\n--debug-log file.log\n").unwrap();

    let file_flags = load_config_flags(&path).unwrap();
    let cli_args = vec![
        "notefmt".to_string(),
        "--width".to_string(),
        "100".to_string(),
        "--json".to_string(),
        "note.md".to_string(),
    ];
    let cli_flags = parse_flag_tokens(&cli_args);

    let effective = file_flags.union(&cli_flags);
    assert!(effective.no_timestamps, "file flags should remain enabled");
    assert!(effective.json, "cli flags should be applied");
    assert_eq!(effective.width, Some(100), "cli should override width");
    assert_eq!(
        effective.debug_log,
        Some(PathBuf::from("file.log")),
        "file config should be preserved when CLI does not override"
    );
}

#[test]
fn test_missing_config_file_is_default() {
    let dir = tempfile::tempdir().unwrap();
    let flags = load_config_flags(&dir.path().join("absent")).unwrap();
    assert_eq!(flags, ConfigFlags::default());
}
