//! The format command: drives documents through the pipeline and reports.

mod command;
mod watch;

use std::io::Write;
use std::path::PathBuf;

use anyhow::{Context, Result};

pub use command::{FormatSettings, Outcome, format_document};

use crate::format::{FormatOptions, MarkdownFormatter};
use crate::frontmatter::TimestampFormat;
use crate::host::{FileHost, Host};
use crate::notice::{ConsoleNotifier, Notifier, summary_notice};

/// Overall result of a run, used for the process exit status.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunStatus {
    /// Every document is formatted (or was just written).
    Clean,
    /// Check mode found documents that would change.
    WouldChange,
}

impl RunStatus {
    /// `WouldChange` when checking and at least one document differs from
    /// its formatted form.
    pub fn from_outcomes(outcomes: &[Outcome], check: bool) -> Self {
        if check && outcomes.iter().any(|o| o.changed) {
            Self::WouldChange
        } else {
            Self::Clean
        }
    }
}

/// Formats a set of markdown files.
pub struct App {
    files: Vec<PathBuf>,
    formatter: MarkdownFormatter,
    settings: FormatSettings,
    watch: bool,
    json: bool,
    quiet: bool,
}

impl App {
    pub fn new(files: Vec<PathBuf>) -> Self {
        Self {
            files,
            formatter: MarkdownFormatter::default(),
            settings: FormatSettings::default(),
            watch: false,
            json: false,
            quiet: false,
        }
    }

    #[must_use]
    pub fn with_watch(mut self, watch: bool) -> Self {
        self.watch = watch;
        self
    }

    #[must_use]
    pub fn with_check(mut self, check: bool) -> Self {
        self.settings.check = check;
        self
    }

    /// Stamp frontmatter in the given format, or leave it alone with `None`.
    #[must_use]
    pub fn with_timestamps(mut self, format: Option<TimestampFormat>) -> Self {
        self.settings.stamp = format;
        self
    }

    #[must_use]
    pub fn with_format_options(mut self, options: FormatOptions) -> Self {
        self.formatter = MarkdownFormatter::new(options);
        self
    }

    /// Print one JSON object per document on stdout instead of notices.
    #[must_use]
    pub fn with_json(mut self, json: bool) -> Self {
        self.json = json;
        self
    }

    #[must_use]
    pub fn with_quiet(mut self, quiet: bool) -> Self {
        self.quiet = quiet;
        self
    }

    /// Format every file once, then keep watching if enabled.
    ///
    /// # Errors
    /// Returns an error if a document cannot be read, formatted, or written,
    /// or if watching cannot start.
    pub fn run(&self) -> Result<RunStatus> {
        let mut notifier = ConsoleNotifier::new(self.quiet || self.json);
        let mut stdout = std::io::stdout().lock();

        let outcomes = self.run_once(&mut notifier, &mut stdout)?;
        let status = RunStatus::from_outcomes(&outcomes, self.settings.check);

        if self.watch {
            let written = self
                .files
                .iter()
                .zip(&outcomes)
                .filter(|(_, outcome)| outcome.written)
                .map(|(path, outcome)| (path.clone(), outcome.text.clone()))
                .collect::<Vec<_>>();
            self.watch_files(&written, &mut notifier, &mut stdout)?;
        }
        Ok(status)
    }

    /// Format every file once, reporting each through `notifier` (or as
    /// JSON on `out`).
    ///
    /// # Errors
    /// Stops at the first document that fails.
    pub fn run_once(
        &self,
        notifier: &mut dyn Notifier,
        out: &mut dyn Write,
    ) -> Result<Vec<Outcome>> {
        self.files
            .iter()
            .map(|path| {
                let mut host = FileHost::new(path);
                self.format_one(&mut host, notifier, out)
            })
            .collect()
    }

    fn format_one(
        &self,
        host: &mut dyn Host,
        notifier: &mut dyn Notifier,
        out: &mut dyn Write,
    ) -> Result<Outcome> {
        let outcome = format_document(host, &self.formatter, &self.settings)
            .with_context(|| format!("Failed to format {}", host.name()))?;
        self.report(&outcome, notifier, out)?;
        Ok(outcome)
    }

    fn report(
        &self,
        outcome: &Outcome,
        notifier: &mut dyn Notifier,
        out: &mut dyn Write,
    ) -> Result<()> {
        if self.json {
            let line = serde_json::to_string(outcome).context("Failed to encode report")?;
            writeln!(out, "{line}").context("Failed to write report")?;
            return Ok(());
        }
        let name = if self.settings.check && outcome.changed {
            format!("{} (would change)", outcome.name)
        } else {
            outcome.name.clone()
        };
        notifier.notify(&summary_notice(&name, &outcome.summary));
        Ok(())
    }
}
