//! notefmt - format markdown notes and stamp their frontmatter.
//!
//! # Usage
//!
//! ```bash
//! notefmt notes/today.md
//! notefmt --check notes/*.md
//! notefmt --watch --time-format "%Y-%m-%d %H:%M" journal.md
//! ```

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Parser;

use notefmt::app::{App, RunStatus};
use notefmt::config::{
    ConfigFlags, clear_config_flags, global_config_path, load_config_flags, local_override_path,
    parse_flag_tokens, save_config_flags,
};
use notefmt::format::{FormatOptions, Grammar};
use notefmt::frontmatter::TimestampFormat;
use notefmt::perf;

/// Format markdown notes, stamp frontmatter timestamps, and summarize the
/// lines changed
#[derive(Parser, Debug)]
#[command(name = "notefmt", version, about, long_about = None)]
struct Cli {
    /// Markdown files to format
    #[arg(value_name = "FILE", required_unless_present_any = ["save", "clear"])]
    files: Vec<PathBuf>,

    /// Keep running and reformat files when they change
    #[arg(short, long, conflicts_with = "check")]
    watch: bool,

    /// Report what would change without writing; exit 1 if anything would
    #[arg(long)]
    check: bool,

    /// Leave frontmatter timestamps alone
    #[arg(long)]
    no_timestamps: bool,

    /// Print one JSON report per file instead of notices
    #[arg(long)]
    json: bool,

    /// Suppress notices
    #[arg(short, long)]
    quiet: bool,

    /// Markdown grammar to parse
    #[arg(long, value_enum)]
    grammar: Option<Grammar>,

    /// Wrap prose at this column (0 keeps line breaks as written)
    #[arg(long, value_name = "COLUMNS")]
    width: Option<usize>,

    /// strftime pattern for created/modified values
    #[arg(long, value_name = "PATTERN")]
    time_format: Option<String>,

    /// Print stage timings to stderr
    #[arg(long)]
    perf: bool,

    /// Write pipeline and watcher events to a file
    #[arg(long, value_name = "PATH")]
    debug_log: Option<PathBuf>,

    /// Save current command-line flags as defaults
    #[arg(long)]
    save: bool,

    /// Clear saved defaults
    #[arg(long)]
    clear: bool,
}

fn main() -> Result<ExitCode> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::WARN.into()),
        )
        .init();

    let raw_args = std::env::args().collect::<Vec<_>>();
    let cli = Cli::parse();
    let global_path = global_config_path();
    let local_path = local_override_path();
    let cli_flags = parse_flag_tokens(&raw_args);

    if cli.clear {
        clear_config_flags(&global_path)?;
    }
    if cli.save {
        save_config_flags(&global_path, &cli_flags)?;
    }
    if cli.files.is_empty() {
        return Ok(ExitCode::SUCCESS);
    }

    let file_flags = if cli.clear {
        ConfigFlags::default()
    } else {
        let global_flags = load_config_flags(&global_path)?;
        let local_flags = load_config_flags(&local_path)?;
        global_flags.union(&local_flags)
    };
    let effective = file_flags.union(&cli_flags);
    if effective.watch && effective.check {
        anyhow::bail!("--watch and --check cannot be combined (check your saved defaults)");
    }

    perf::set_enabled(effective.perf);
    let debug_log_path = effective
        .debug_log
        .clone()
        .or_else(|| std::env::var_os("NOTEFMT_DEBUG_LOG").map(PathBuf::from));
    if let Err(err) = perf::set_event_log_path(debug_log_path.as_deref()) {
        tracing::warn!(
            path = %debug_log_path
                .as_ref()
                .map_or_else(|| "<unset>".to_string(), |p| p.display().to_string()),
            %err,
            "failed to open debug log"
        );
    }

    let timestamps = if effective.no_timestamps {
        None
    } else {
        match effective.time_format.as_deref() {
            Some(pattern) => Some(TimestampFormat::pattern(pattern).context("Bad --time-format")?),
            None => Some(TimestampFormat::Human),
        }
    };

    for file in &cli.files {
        if !file.exists() {
            anyhow::bail!("File not found: {}", file.display());
        }
    }

    let app = App::new(cli.files)
        .with_watch(effective.watch)
        .with_check(effective.check)
        .with_timestamps(timestamps)
        .with_format_options(FormatOptions {
            grammar: effective.grammar.unwrap_or_default(),
            width: effective.width.unwrap_or(0),
        })
        .with_json(effective.json)
        .with_quiet(effective.quiet);

    match app.run()? {
        RunStatus::Clean => Ok(ExitCode::SUCCESS),
        RunStatus::WouldChange => Ok(ExitCode::from(1)),
    }
}
