use std::io::Write;
use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result};

use super::App;
use crate::host::{FileHost, Host};
use crate::notice::Notifier;
use crate::watcher::DocumentWatcher;

const DEBOUNCE: Duration = Duration::from_millis(200);
const POLL_INTERVAL: Duration = Duration::from_millis(100);

struct WatchedDocument {
    host: FileHost,
    watcher: DocumentWatcher,
}

impl App {
    /// Reformat documents whenever they change on disk. Never returns
    /// unless a watcher cannot be set up.
    ///
    /// `written` seeds the self-write filter with texts the initial pass
    /// wrote.
    pub(super) fn watch_files(
        &self,
        written: &[(PathBuf, String)],
        notifier: &mut dyn Notifier,
        out: &mut dyn Write,
    ) -> Result<()> {
        let mut documents = self
            .files
            .iter()
            .map(|path| {
                let mut watcher = DocumentWatcher::new(path, DEBOUNCE)
                    .with_context(|| format!("Failed to watch {}", path.display()))?;
                if let Some((_, text)) = written.iter().find(|(p, _)| p == path) {
                    watcher.record_write(text.clone());
                }
                Ok(WatchedDocument {
                    host: FileHost::new(path),
                    watcher,
                })
            })
            .collect::<Result<Vec<_>>>()?;

        tracing::info!(files = documents.len(), "watching for changes");
        loop {
            for document in &mut documents {
                if document.watcher.take_change_ready() {
                    self.refresh(document, notifier, out);
                }
            }
            std::thread::sleep(POLL_INTERVAL);
        }
    }

    fn refresh(
        &self,
        document: &mut WatchedDocument,
        notifier: &mut dyn Notifier,
        out: &mut dyn Write,
    ) {
        let name = document.host.name();
        match document.host.text() {
            Ok(current) if document.watcher.is_own_write(&current) => {
                crate::perf::log_event("watch.own_write", format!("name={name}"));
                return;
            }
            Ok(_) => {}
            Err(err) => {
                notifier.notify(&format!("{name}: reload failed: {err}"));
                return;
            }
        }

        match self.format_one(&mut document.host, notifier, out) {
            Ok(outcome) if outcome.written => document.watcher.record_write(outcome.text),
            Ok(_) => {}
            Err(err) => {
                tracing::warn!(%name, error = %err, "reformat failed");
                notifier.notify(&format!("{name}: format failed: {err:#}"));
            }
        }
    }
}
