//! Error types for mdinfer.
//!
//! The inference engine itself never fails; these errors come from format
//! adapters and the file layer around them.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for mdinfer operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error types that can occur while reading or converting a source.
#[derive(Error, Debug)]
pub enum Error {
    /// I/O error when reading or writing files.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// The source format is recognized but has no converter.
    #[error("Unsupported format: {0}")]
    UnsupportedFormat(String),

    /// The path carries no extension to pick a converter by.
    #[error("Cannot determine format of {}: no file extension", .0.display())]
    NoExtension(PathBuf),

    /// An adapter failed on a specific source file.
    #[error("Failed to convert {}: {reason}", .path.display())]
    Source {
        /// The file that failed
        path: PathBuf,
        /// What went wrong
        reason: String,
    },

    /// Malformed delimited data.
    #[error("CSV error: {0}")]
    Csv(String),

    /// Encoding error.
    #[error("Encoding error: {0}")]
    Encoding(String),

    /// Error during rendering (Markdown, JSON).
    #[error("Rendering error: {0}")]
    Render(String),

    /// Generic error with message.
    #[error("{0}")]
    Other(String),
}

impl Error {
    /// Wrap an adapter failure so it names the source file.
    ///
    /// Errors that already name a file are returned unchanged.
    pub fn for_source(self, path: impl Into<PathBuf>) -> Self {
        match self {
            Error::Source { .. } | Error::NoExtension(_) => self,
            other => Error::Source {
                path: path.into(),
                reason: other.to_string(),
            },
        }
    }
}

impl From<csv::Error> for Error {
    fn from(err: csv::Error) -> Self {
        Error::Csv(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = Error::UnsupportedFormat("docx".to_string());
        assert_eq!(err.to_string(), "Unsupported format: docx");

        let err = Error::Source {
            path: PathBuf::from("data/broken.csv"),
            reason: "unequal rows".to_string(),
        };
        assert_eq!(err.to_string(), "Failed to convert data/broken.csv: unequal rows");
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = io::Error::new(io::ErrorKind::NotFound, "file not found");
        let err: Error = io_err.into();
        assert!(matches!(err, Error::Io(_)));
    }

    #[test]
    fn test_for_source_wraps_once() {
        let err = Error::Csv("bad quote".into()).for_source("a.csv");
        assert_eq!(err.to_string(), "Failed to convert a.csv: CSV error: bad quote");

        let again = err.for_source("other.csv");
        assert!(again.to_string().contains("a.csv"));
    }
}
