//! Error types for aferir.

use std::path::PathBuf;

/// Result type alias for aferir operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors raised while loading data or configuring an assessment.
///
/// The scoring core itself is total: every valid table produces a defined
/// report. Errors arise only in the loading and configuration glue around
/// it (unreadable files, bad patterns, unknown profiles).
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum Error {
    /// I/O failure while reading or writing a dataset file.
    #[error("I/O error at {path:?}: {source}")]
    Io {
        /// The file involved, if known.
        path: Option<PathBuf>,
        /// The underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// Arrow failure while decoding record batches.
    #[error("Arrow error: {0}")]
    Arrow(#[from] arrow::error::ArrowError),

    /// Parquet failure while reading a file.
    #[error("Parquet error: {0}")]
    Parquet(#[from] parquet::errors::ParquetError),

    /// The format-validity pattern does not compile.
    #[error("invalid pattern '{pattern}': {source}")]
    InvalidPattern {
        /// The pattern as supplied, before anchoring.
        pattern: String,
        /// The underlying regex error.
        #[source]
        source: regex::Error,
    },

    /// Invalid assessment configuration (unknown profile, bad bounds).
    #[error("invalid configuration: {message}")]
    InvalidConfig {
        /// What was wrong with the configuration.
        message: String,
    },

    /// File extension with no registered loader.
    #[error("unsupported format: {format}")]
    UnsupportedFormat {
        /// The unrecognized format name or extension.
        format: String,
    },

    /// JSON failure while rendering a report.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl Error {
    /// Create an I/O error with a path context.
    pub fn io(source: std::io::Error, path: impl Into<PathBuf>) -> Self {
        Self::Io {
            path: Some(path.into()),
            source,
        }
    }

    /// Create an invalid configuration error.
    pub fn invalid_config(message: impl Into<String>) -> Self {
        Self::InvalidConfig {
            message: message.into(),
        }
    }

    /// Create an unsupported format error.
    pub fn unsupported_format(format: impl Into<String>) -> Self {
        Self::UnsupportedFormat {
            format: format.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_io_error_carries_path() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "no such file");
        let err = Error::io(io_err, "/data/suppliers.csv");
        assert!(err.to_string().contains("/data/suppliers.csv"));
        assert!(err.to_string().contains("no such file"));
    }

    #[test]
    fn test_invalid_config() {
        let err = Error::invalid_config("unknown profile 'bogus'");
        assert!(err.to_string().contains("unknown profile 'bogus'"));
    }

    #[test]
    fn test_unsupported_format() {
        let err = Error::unsupported_format("xlsx");
        assert_eq!(err.to_string(), "unsupported format: xlsx");
    }

    #[test]
    fn test_invalid_pattern_names_the_pattern() {
        let source = regex::Regex::new("(").unwrap_err();
        let err = Error::InvalidPattern {
            pattern: "(".to_string(),
            source,
        };
        assert!(err.to_string().contains("invalid pattern '('"));
    }
}
