//! Error types for the extractor module.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while expanding an archive.
#[derive(Debug, Error)]
pub enum ExtractorError {
    /// Archive file could not be opened.
    #[error("Failed to open archive: {path}")]
    OpenFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Archive data is corrupt or not a supported format.
    #[error("Corrupt or unsupported archive: {path}")]
    Corrupted { path: PathBuf },

    /// An entry name would resolve outside the target directory.
    #[error("Archive entry escapes the target directory: {entry}")]
    PathEscape { entry: String },

    /// Target directory does not exist.
    #[error("Extraction target does not exist: {path}")]
    TargetMissing { path: PathBuf },

    /// Target directory is not empty.
    #[error("Extraction target is not empty: {path}")]
    TargetNotEmpty { path: PathBuf },

    /// Failed to write an extracted entry.
    #[error("Failed to write extracted entry: {path}")]
    WriteFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Extraction task was aborted before completing.
    #[error("Extraction aborted: {0}")]
    Aborted(String),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
