//! Error types for the load pipeline.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that stop a load run.
#[derive(Debug, Error)]
pub enum EtlError {
    /// A source file or directory could not be read.
    #[error("I/O error at {}: {source}", path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    /// Directory traversal failed.
    #[error("walk error: {0}")]
    Walk(#[from] walkdir::Error),

    /// A record is not valid JSON or lacks a required field.
    #[error("parse error in {} line {line}: {source}", path.display())]
    Parse {
        path: PathBuf,
        line: usize,
        source: serde_json::Error,
    },

    /// A record parsed but one of its fields cannot be coerced.
    #[error("invalid {field} in {} line {line}: {message}", path.display())]
    InvalidValue {
        path: PathBuf,
        line: usize,
        field: &'static str,
        message: String,
    },

    /// An error propagated from the core database layer.
    #[error("database error: {0}")]
    Database(#[from] sparkify_core::Error),
}

impl EtlError {
    /// Returns `true` when the source data, not the environment, is at fault.
    pub fn is_parse_error(&self) -> bool {
        matches!(self, Self::Parse { .. } | Self::InvalidValue { .. })
    }

    /// The source file the error refers to, if any.
    pub fn path(&self) -> Option<&std::path::Path> {
        match self {
            Self::Io { path, .. } | Self::Parse { path, .. } | Self::InvalidValue { path, .. } => {
                Some(path.as_path())
            }
            Self::Walk(err) => err.path(),
            Self::Database(_) => None,
        }
    }
}

/// Convenience alias for load results.
pub type EtlResult<T> = std::result::Result<T, EtlError>;
