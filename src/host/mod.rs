//! Document hosts: where text is read from and written back to.
//!
//! The formatting pipeline only sees the [`Host`] trait. [`FileHost`] backs
//! it with a markdown file on disk; [`MemoryHost`] with an in-memory buffer.

use std::fs;
use std::path::PathBuf;

use chrono::{DateTime, Local};

use crate::error::{Error, Result};

/// Creation and modification times of a document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FileTimes {
    pub created: DateTime<Local>,
    pub modified: DateTime<Local>,
}

/// Access to a document's full text and its timestamps.
pub trait Host {
    /// Display name for notices and reports.
    fn name(&self) -> String;

    /// # Errors
    /// Returns an error if the text cannot be read.
    fn text(&self) -> Result<String>;

    /// Replace the full text.
    ///
    /// # Errors
    /// Returns an error if the text cannot be written.
    fn set_text(&mut self, text: &str) -> Result<()>;

    /// # Errors
    /// Returns an error if the timestamps are unavailable.
    fn times(&self) -> Result<FileTimes>;
}

/// A markdown file on disk.
#[derive(Debug, Clone)]
pub struct FileHost {
    path: PathBuf,
}

impl FileHost {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl Host for FileHost {
    fn name(&self) -> String {
        self.path.display().to_string()
    }

    fn text(&self) -> Result<String> {
        fs::read_to_string(&self.path).map_err(|source| Error::Read {
            path: self.path.clone(),
            source,
        })
    }

    fn set_text(&mut self, text: &str) -> Result<()> {
        fs::write(&self.path, text).map_err(|source| Error::Write {
            path: self.path.clone(),
            source,
        })
    }

    fn times(&self) -> Result<FileTimes> {
        let metadata_error = |source| Error::Metadata {
            path: self.path.clone(),
            source,
        };
        let metadata = fs::metadata(&self.path).map_err(metadata_error)?;
        let modified = metadata.modified().map_err(metadata_error)?;
        // Not every filesystem records a birth time.
        let created = metadata.created().unwrap_or_else(|err| {
            tracing::warn!(
                path = %self.path.display(),
                %err,
                "creation time unavailable, using modification time"
            );
            modified
        });
        Ok(FileTimes {
            created: DateTime::from(created),
            modified: DateTime::from(modified),
        })
    }
}

/// An in-memory document with fixed timestamps.
#[derive(Debug, Clone)]
pub struct MemoryHost {
    name: String,
    text: String,
    times: FileTimes,
    writes: usize,
}

impl MemoryHost {
    pub fn new(name: impl Into<String>, text: impl Into<String>, times: FileTimes) -> Self {
        Self {
            name: name.into(),
            text: text.into(),
            times,
            writes: 0,
        }
    }

    /// A document created and last modified now.
    pub fn now(name: impl Into<String>, text: impl Into<String>) -> Self {
        let now = Local::now();
        Self::new(
            name,
            text,
            FileTimes {
                created: now,
                modified: now,
            },
        )
    }

    /// The current buffer contents.
    pub fn contents(&self) -> &str {
        &self.text
    }

    /// Number of times [`Host::set_text`] has been called.
    pub const fn writes(&self) -> usize {
        self.writes
    }
}

impl Host for MemoryHost {
    fn name(&self) -> String {
        self.name.clone()
    }

    fn text(&self) -> Result<String> {
        Ok(self.text.clone())
    }

    fn set_text(&mut self, text: &str) -> Result<()> {
        text.clone_into(&mut self.text);
        self.writes += 1;
        Ok(())
    }

    fn times(&self) -> Result<FileTimes> {
        Ok(self.times)
    }
}
