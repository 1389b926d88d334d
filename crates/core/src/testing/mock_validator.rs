//! Mock schema validator for testing.

use async_trait::async_trait;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::validator::{Finding, SchemaValidator, Severity, ValidatorError};

/// Mock implementation of the SchemaValidator trait.
///
/// Passes every document by default. Configure warnings or an error to
/// exercise the pipeline's validation paths without a real schema.
///
/// # Example
///
/// ```rust,ignore
/// use dossier_core::testing::MockValidator;
///
/// let validator = MockValidator::new();
/// validator.set_error("missing element 'party'").await;
///
/// let result = validator.validate(Path::new("party.xml")).await;
/// assert!(result.is_err());
/// ```
#[derive(Debug, Clone)]
pub struct MockValidator {
    /// Documents validated so far.
    validated: Arc<RwLock<Vec<PathBuf>>>,
    /// Warnings to return on success.
    warnings: Arc<RwLock<Vec<Finding>>>,
    /// If set, every validation fails with this schema-error message.
    error_message: Arc<RwLock<Option<String>>>,
}

impl Default for MockValidator {
    fn default() -> Self {
        Self::new()
    }
}

impl MockValidator {
    /// Create a new mock validator that passes every document.
    pub fn new() -> Self {
        Self {
            validated: Arc::new(RwLock::new(Vec::new())),
            warnings: Arc::new(RwLock::new(Vec::new())),
            error_message: Arc::new(RwLock::new(None)),
        }
    }

    /// Get the documents validated so far.
    pub async fn validated(&self) -> Vec<PathBuf> {
        self.validated.read().await.clone()
    }

    /// Get the number of documents validated.
    pub async fn validated_count(&self) -> usize {
        self.validated.read().await.len()
    }

    /// Make every validation fail with the given schema-error message.
    pub async fn set_error(&self, message: impl Into<String>) {
        *self.error_message.write().await = Some(message.into());
    }

    /// Clear the configured error; validation passes again.
    pub async fn clear_error(&self) {
        *self.error_message.write().await = None;
    }

    /// Add a warning finding returned on every successful validation.
    pub async fn add_warning(&self, message: impl Into<String>) {
        self.warnings.write().await.push(Finding {
            severity: Severity::Warning,
            message: message.into(),
            line: None,
        });
    }
}

#[async_trait]
impl SchemaValidator for MockValidator {
    fn name(&self) -> &str {
        "mock"
    }

    async fn validate(&self, document: &Path) -> Result<Vec<Finding>, ValidatorError> {
        self.validated.write().await.push(document.to_path_buf());

        if let Some(message) = self.error_message.read().await.clone() {
            return Err(ValidatorError::Schema { message });
        }

        Ok(self.warnings.read().await.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_passes_by_default() {
        let validator = MockValidator::new();

        let findings = validator.validate(Path::new("party.xml")).await.unwrap();
        assert!(findings.is_empty());
        assert_eq!(validator.validated_count().await, 1);
    }

    #[tokio::test]
    async fn test_configured_error() {
        let validator = MockValidator::new();
        validator.set_error("missing element 'party'").await;

        let err = validator.validate(Path::new("party.xml")).await.unwrap_err();
        assert!(matches!(err, ValidatorError::Schema { .. }));
        assert!(err.to_string().contains("missing element"));

        // The failed document is still recorded.
        assert_eq!(validator.validated_count().await, 1);

        validator.clear_error().await;
        assert!(validator.validate(Path::new("party.xml")).await.is_ok());
    }

    #[tokio::test]
    async fn test_configured_warnings() {
        let validator = MockValidator::new();
        validator.add_warning("deprecated attribute").await;

        let findings = validator.validate(Path::new("party.xml")).await.unwrap();
        assert_eq!(findings.len(), 1);
        assert_eq!(findings[0].severity, Severity::Warning);
    }
}
