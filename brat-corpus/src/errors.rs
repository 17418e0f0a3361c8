//! Error types for corpus reading and writing.

use std::path::PathBuf;

use brat_standoff::BratError;
use thiserror::Error;

/// Errors raised while reading, writing or merging annotation files.
#[derive(Debug, Error)]
pub enum CorpusError {
    /// A file or directory could not be read or written.
    #[error("failed to access {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Reading from or writing to a caller-supplied stream failed.
    #[error("stream error: {0}")]
    Stream(#[from] std::io::Error),

    /// The corpus configuration file is not valid TOML for [`CorpusConfig`](crate::CorpusConfig).
    #[error("invalid config {}: {message}", .path.display())]
    Config { path: PathBuf, message: String },

    /// An annotation file did not parse.
    #[error("{}: {source}", .path.display())]
    Annotations {
        path: PathBuf,
        #[source]
        source: BratError,
    },

    /// Model or merge error not tied to a single file.
    #[error(transparent)]
    Brat(#[from] BratError),
}

impl CorpusError {
    pub(crate) fn io(path: impl Into<PathBuf>) -> impl FnOnce(std::io::Error) -> Self {
        let path = path.into();
        move |source| CorpusError::Io { path, source }
    }
}

/// Result type for corpus operations.
pub type CorpusResult<T> = Result<T, CorpusError>;
