//! XSD implementation of the `SchemaValidator` trait.

use async_trait::async_trait;
use std::path::{Path, PathBuf};
use tracing::warn;

use super::error::ValidatorError;
use super::libxml2::{self, SchemaHandle};
use super::traits::SchemaValidator;
use super::types::Finding;

/// Validates documents against one XSD schema parsed at construction.
///
/// The parsed schema is shared; per-document validation runs on a blocking
/// task because libxml2 is synchronous CPU-bound work.
pub struct XsdValidator {
    schema: SchemaHandle,
    schema_path: PathBuf,
}

impl XsdValidator {
    /// Reads and parses the schema. A schema that cannot be read or parsed
    /// is a startup failure, not a per-archive failure.
    pub fn from_file(schema_path: &Path) -> Result<Self, ValidatorError> {
        let bytes = std::fs::read(schema_path).map_err(|e| ValidatorError::SchemaRead {
            path: schema_path.to_path_buf(),
            source: e,
        })?;
        let schema = libxml2::parse_schema(&bytes, schema_path)?;
        Ok(Self {
            schema,
            schema_path: schema_path.to_path_buf(),
        })
    }

    /// The schema this validator checks against.
    pub fn schema_path(&self) -> &Path {
        &self.schema_path
    }
}

#[async_trait]
impl SchemaValidator for XsdValidator {
    fn name(&self) -> &str {
        "xsd"
    }

    async fn validate(&self, document: &Path) -> Result<Vec<Finding>, ValidatorError> {
        let schema = self.schema.clone();
        let document = document.to_path_buf();

        let findings = tokio::task::spawn_blocking(move || {
            libxml2::validate_file(&schema, &document)
        })
        .await
        .map_err(|e| ValidatorError::Aborted(e.to_string()))??;

        // Warnings are reported as they occur and never block; the first
        // error aborts the rest of the scan.
        let mut warnings = Vec::new();
        for finding in findings {
            if finding.is_error() {
                return Err(ValidatorError::Schema {
                    message: finding.to_string(),
                });
            }
            warn!(finding = %finding, "schema validation warning");
            warnings.push(finding);
        }

        Ok(warnings)
    }
}
