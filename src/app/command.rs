use serde::Serialize;

use crate::diff::{self, ChangeSummary};
use crate::error::Result;
use crate::format::Formatter;
use crate::frontmatter::{self, TimestampFormat};
use crate::host::Host;
use crate::perf;

/// Per-run behaviour of [`format_document`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormatSettings {
    /// Timestamp style for frontmatter stamping; `None` leaves frontmatter
    /// alone.
    pub stamp: Option<TimestampFormat>,
    /// Compute the result without writing it back.
    pub check: bool,
}

impl Default for FormatSettings {
    fn default() -> Self {
        Self {
            stamp: Some(TimestampFormat::Human),
            check: false,
        }
    }
}

/// What happened to one document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Outcome {
    #[serde(rename = "path")]
    pub name: String,
    /// The final text differs from the original.
    pub changed: bool,
    /// The final text was written back to the host.
    pub written: bool,
    pub summary: ChangeSummary,
    #[serde(skip)]
    pub text: String,
}

/// Format one document in place.
///
/// Text the formatter leaves untouched is reported (with an all-zero
/// summary) and neither stamped nor written. Otherwise the frontmatter is
/// stamped with the host's timestamps, the change is summarized against
/// the original text, and the result is written back unless checking.
///
/// # Errors
/// Returns the host's or the formatter's error unchanged.
pub fn format_document(
    host: &mut dyn Host,
    formatter: &dyn Formatter,
    settings: &FormatSettings,
) -> Result<Outcome> {
    let _scope = perf::scope("format_document");
    let name = host.name();
    let current = host.text()?;
    let formatted = formatter.format(&current)?;

    if formatted == current {
        tracing::debug!(%name, "already formatted");
        return Ok(Outcome {
            name,
            changed: false,
            written: false,
            summary: diff::summarize(&current, &formatted),
            text: formatted,
        });
    }

    let text = match &settings.stamp {
        Some(format) => frontmatter::stamp(&formatted, &host.times()?, format),
        None => formatted,
    };

    let summary = diff::summarize(&current, &text);
    let changed = text != current;
    let written = changed && !settings.check;
    if written {
        host.set_text(&text)?;
    }

    tracing::debug!(
        %name,
        modified = summary.modified,
        inserted = summary.inserted,
        deleted = summary.deleted,
        written,
        "document formatted"
    );
    perf::log_event(
        "format.done",
        format!("name={name} changed={changed} written={written} {summary:?}"),
    );

    Ok(Outcome {
        name,
        changed,
        written,
        summary,
        text,
    })
}
