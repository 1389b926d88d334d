//! Error types for the validator module.

use std::path::PathBuf;
use thiserror::Error;

/// Errors raised by schema validation.
#[derive(Debug, Error)]
pub enum ValidatorError {
    /// The schema file could not be read.
    #[error("Failed to read schema: {path}")]
    SchemaRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The schema itself is not a valid XSD.
    #[error("Failed to parse schema: {path}")]
    SchemaParse { path: PathBuf },

    /// The document is not well-formed XML. Distinct from a schema finding.
    #[error("Document is not well-formed XML: {path}")]
    DocumentParse { path: PathBuf },

    /// libxml2 could not allocate a validation context.
    #[error("Failed to create validation context")]
    ContextCreation,

    /// First error-severity finding; aborts the remaining validation.
    #[error("Validation error: {message}")]
    Schema { message: String },

    /// libxml2 reported an internal failure.
    #[error("Validator internal error (code {code})")]
    Internal { code: i32 },

    /// Validation task was aborted before completing.
    #[error("Validation aborted: {0}")]
    Aborted(String),
}
