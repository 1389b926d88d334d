//! Metadata document lookup and application-number extraction.
//!
//! Every workspace must contain one metadata document at a fixed relative
//! path. The business identifier is a positive integer at
//! `party/applicationno`; it names the promoted record. Well-formedness of
//! the document is enforced by the schema validation stage, so the number is
//! pulled out with a plain scan here.

use regex_lite::Regex;
use std::path::{Path, PathBuf};
use std::sync::OnceLock;
use thiserror::Error;

/// Errors raised while resolving the metadata document.
#[derive(Debug, Error)]
pub enum MetadataError {
    /// The metadata document is absent from the workspace.
    #[error("Metadata document not found: expected {expected}")]
    Missing { expected: PathBuf },

    /// The application number is missing or not a positive integer.
    #[error("Invalid or missing application number in {path}: {reason}")]
    Malformed { path: PathBuf, reason: String },

    /// The document could not be read.
    #[error("Failed to read metadata document: {path}")]
    ReadFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

fn party_element_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"(?s)<party(?:\s[^>]*)?>(.*?)</party>").unwrap())
}

fn application_number_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"<applicationno(?:\s[^>]*)?>\s*([0-9]+)\s*</applicationno>").unwrap()
    })
}

/// Scope the scan to the `party` element; a stray `applicationno` elsewhere
/// in the document must not name the record.
fn find_application_number(content: &str) -> Option<&str> {
    let party = party_element_pattern().captures(content)?;
    let body = party.get(1)?;
    let number = application_number_pattern().captures(body.as_str())?;
    Some(number.get(1)?.as_str())
}

/// Resolve the metadata document inside a workspace.
///
/// `relative` comes from configuration (e.g. `party.xml`). Absence is a
/// distinct, reportable failure.
pub async fn locate(workspace: &Path, relative: &Path) -> Result<PathBuf, MetadataError> {
    let path = workspace.join(relative);
    if tokio::fs::try_exists(&path).await.unwrap_or(false) {
        Ok(path)
    } else {
        Err(MetadataError::Missing { expected: path })
    }
}

/// Extract the positive-integer application number from a metadata document.
pub async fn application_number(path: &Path) -> Result<u32, MetadataError> {
    let content = tokio::fs::read_to_string(path)
        .await
        .map_err(|e| MetadataError::ReadFailed {
            path: path.to_path_buf(),
            source: e,
        })?;

    let raw = find_application_number(&content).ok_or_else(|| MetadataError::Malformed {
        path: path.to_path_buf(),
        reason: "no party/applicationno element with an integer value".to_string(),
    })?;

    let number: u32 = raw.parse().map_err(|_| MetadataError::Malformed {
        path: path.to_path_buf(),
        reason: format!("applicationno '{raw}' is out of range"),
    })?;

    if number == 0 {
        return Err(MetadataError::Malformed {
            path: path.to_path_buf(),
            reason: "applicationno must be positive".to_string(),
        });
    }

    Ok(number)
}
