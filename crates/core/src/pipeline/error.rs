//! Error types for the intake pipeline.

use std::path::PathBuf;
use thiserror::Error;

use crate::extractor::ExtractorError;
use crate::metadata::MetadataError;
use crate::validator::ValidatorError;

use super::types::Stage;

/// Per-archive failure. Scoped to one archive: caught at the per-archive
/// boundary, logged with the stage reached, never aborts the run.
#[derive(Debug, Error)]
pub enum IntakeError {
    /// Workspace directory could not be created.
    #[error("Failed to create workspace: {path}")]
    WorkspaceCreation {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Workspace listing failed during the file-type check.
    #[error("Failed to scan workspace: {path}")]
    WorkspaceScan {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Archive expansion failed.
    #[error(transparent)]
    Extraction(#[from] ExtractorError),

    /// An extracted file's extension is not on the allow-list. Fail-fast:
    /// raised for the first violation, not a collected report.
    #[error("Invalid file type '{extension}' found in extracted files: {path}")]
    InvalidFileType { path: PathBuf, extension: String },

    /// Metadata document missing, unreadable, or without a usable
    /// application number.
    #[error(transparent)]
    Metadata(#[from] MetadataError),

    /// Schema validation failed after the application number was parsed.
    #[error("Schema validation failed for application {application_number}: {source}")]
    SchemaValidation {
        application_number: u32,
        #[source]
        source: ValidatorError,
    },

    /// Rename of the workspace to the promoted record failed.
    #[error("Failed to promote workspace {workspace} to {destination}")]
    Promotion {
        workspace: PathBuf,
        destination: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl IntakeError {
    /// The last state-machine stage the archive reached before failing.
    pub fn stage(&self) -> Stage {
        match self {
            IntakeError::WorkspaceCreation { .. } | IntakeError::Extraction(_) => Stage::Discovered,
            IntakeError::WorkspaceScan { .. } | IntakeError::InvalidFileType { .. } => {
                Stage::Extracted
            }
            IntakeError::Metadata(_) => Stage::TypeValidated,
            IntakeError::SchemaValidation { .. } => Stage::MetadataParsed,
            IntakeError::Promotion { .. } => Stage::SchemaValidated,
        }
    }
}
