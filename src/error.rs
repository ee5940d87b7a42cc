use std::path::PathBuf;

/// Errors raised by the formatter, host, and timestamp collaborators.
///
/// The binary converts these to `anyhow::Error` at the boundary.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The markdown renderer failed while writing its output.
    #[error("failed to render markdown: {0}")]
    Render(#[source] std::io::Error),

    /// The markdown renderer produced bytes that are not UTF-8.
    #[error("formatter produced invalid UTF-8: {0}")]
    InvalidUtf8(#[from] std::string::FromUtf8Error),

    #[error("failed to read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to write {}: {source}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// File timestamps could not be read.
    #[error("no file times available for {}: {source}", path.display())]
    Metadata {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A custom timestamp pattern has an unknown or malformed specifier.
    #[error("invalid time format {0:?}")]
    TimeFormat(String),
}

pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_read_error_names_the_path() {
        let err = Error::Read {
            path: PathBuf::from("notes/today.md"),
            source: std::io::Error::new(std::io::ErrorKind::NotFound, "gone"),
        };
        let text = err.to_string();
        assert!(text.contains("notes/today.md"));
        assert!(text.contains("gone"));
    }

    #[test]
    fn test_utf8_error_converts() {
        let bad = String::from_utf8(vec![0xff, 0xfe]).unwrap_err();
        let err: Error = bad.into();
        assert!(matches!(err, Error::InvalidUtf8(_)));
    }
}
