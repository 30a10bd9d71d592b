//! Crate-level error type and `Result` alias for stable, structured error handling.
//! The first four variants are the per-file outcomes of a rewrite (missing file,
//! unreadable, unwritable, anything else); the rest cover argument validation,
//! manifest patterns and path safety.
use std::path::PathBuf;

use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    #[error("File '{}' does not exist.", .path.display())]
    NotFound { path: PathBuf },

    #[error("Cannot read file '{}'. Permission denied.", .path.display())]
    ReadDenied { path: PathBuf },

    #[error("Cannot write to file '{}'. Permission denied.", .path.display())]
    WriteDenied { path: PathBuf },

    #[error("An unexpected error occurred on '{}': {source}", .path.display())]
    Unexpected {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid argument: {arg}={value:?}")]
    InvalidArgument { arg: &'static str, value: String },

    #[error("Invalid pattern '{pattern}': {message}")]
    Pattern { pattern: String, message: String },

    #[error("Refusing path outside the project root: {}", .path.display())]
    UnsafePath { path: PathBuf },
}

impl Error {
    pub fn unexpected(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Error::Unexpected {
            path: path.into(),
            source,
        }
    }

    /// Path the error refers to, when it is a per-file error.
    pub fn path(&self) -> Option<&std::path::Path> {
        match self {
            Error::NotFound { path }
            | Error::ReadDenied { path }
            | Error::WriteDenied { path }
            | Error::Unexpected { path, .. }
            | Error::UnsafePath { path } => Some(path),
            _ => None,
        }
    }
}
