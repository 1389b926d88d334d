//! Trait definitions for the validator module.

use async_trait::async_trait;
use std::path::Path;

use super::error::ValidatorError;
use super::types::Finding;

/// A validator that checks one document against a fixed schema.
#[async_trait]
pub trait SchemaValidator: Send + Sync {
    /// Returns the name of this validator implementation.
    fn name(&self) -> &str;

    /// Validates `document` against the schema.
    ///
    /// On success, returns the warning findings observed (informational
    /// only). The first error-severity finding aborts validation and is
    /// returned as `ValidatorError::Schema` carrying that finding's message.
    async fn validate(&self, document: &Path) -> Result<Vec<Finding>, ValidatorError>;
}
