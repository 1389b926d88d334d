//! The intake pipeline implementation.

use std::collections::HashSet;
use std::path::Path;
use std::sync::Arc;
use tokio::task::JoinHandle;
use tracing::{debug, error, info, warn};
use uuid::Uuid;

use crate::config::IntakeConfig;
use crate::extractor::Extractor;
use crate::metadata;
use crate::notifier::{notify_and_wait, notify_detached, Notifier};
use crate::validator::{SchemaValidator, ValidatorError};

use super::error::IntakeError;
use super::scan;
use super::types::{PromotedRecord, RunReport};

/// Drives archives through extraction, validation, promotion and
/// notification, one at a time.
pub struct IntakePipeline<E: Extractor, V: SchemaValidator> {
    config: IntakeConfig,
    /// Allow-listed extensions, lowercased once at construction.
    allowed_extensions: HashSet<String>,
    extractor: Arc<E>,
    validator: Arc<V>,
    notifier: Arc<dyn Notifier>,
}

impl<E: Extractor, V: SchemaValidator> IntakePipeline<E, V> {
    /// Creates a new pipeline over the given collaborators.
    pub fn new(config: IntakeConfig, extractor: E, validator: V, notifier: Arc<dyn Notifier>) -> Self {
        let allowed_extensions = config
            .allowed_extensions
            .iter()
            .map(|e| e.to_ascii_lowercase())
            .collect();

        Self {
            config,
            allowed_extensions,
            extractor: Arc::new(extractor),
            validator: Arc::new(validator),
            notifier,
        }
    }

    /// One full pass over the source directory.
    ///
    /// Never propagates an error: per-archive failures are logged at the
    /// per-archive boundary and the pass continues with the next archive.
    pub async fn run(&self) -> RunReport {
        let mut report = RunReport::default();

        let archives = match scan::discover_archives(
            &self.config.source_dir,
            &self.config.archive_extension,
        )
        .await
        {
            Ok(archives) => archives,
            Err(e) => {
                error!(
                    source_dir = %self.config.source_dir.display(),
                    error = %e,
                    "failed to scan source directory"
                );
                return report;
            }
        };

        report.discovered = archives.len();
        info!(count = archives.len(), "discovered archives");

        let mut deliveries: Vec<JoinHandle<()>> = Vec::new();

        for archive in &archives {
            // Strictly sequential: each archive completes before the next starts.
            match self.process_archive(archive).await {
                Ok((record, delivery)) => {
                    info!(
                        archive = %archive.display(),
                        application = record.application_number,
                        record = %record.path.display(),
                        "archive promoted"
                    );
                    deliveries.push(delivery);
                    report.promoted += 1;
                }
                Err(e) => {
                    error!(
                        archive = %archive.display(),
                        stage = %e.stage(),
                        error = %e,
                        "archive intake failed"
                    );
                    report.failed += 1;
                }
            }
        }

        // Success notifications run detached from their archive, but every
        // attempt must complete before the pass returns; otherwise runtime
        // shutdown cancels pending deliveries. Outcomes were already logged
        // by the tasks themselves.
        for delivery in deliveries {
            let _ = delivery.await;
        }

        report
    }

    /// Processes one archive to completion, cleaning up the workspace and
    /// sending the schema-failure notification on error. On success the
    /// returned handle tracks the detached success notification.
    async fn process_archive(
        &self,
        archive: &Path,
    ) -> Result<(PromotedRecord, JoinHandle<()>), IntakeError> {
        let workspace = self.config.dest_dir.join(Uuid::new_v4().to_string());

        let result = self.drive(archive, &workspace).await;

        if let Err(ref e) = result {
            self.remove_workspace(&workspace).await;

            // Deliberate asymmetry: only schema-validation failures are
            // user-visible; all other failures are log-only.
            if let IntakeError::SchemaValidation {
                application_number,
                source: ValidatorError::Schema { message },
            } = e
            {
                let subject =
                    format!("Application # {application_number} - metadata validation error");
                let body = format!(
                    "Application # {application_number} - archive '{}' failed schema validation: {message}",
                    archive.display()
                );
                notify_and_wait(self.notifier.as_ref(), &subject, &body).await;
            }
        }

        result
    }

    /// Runs the state machine for one archive. Cleanup happens in the caller.
    async fn drive(
        &self,
        archive: &Path,
        workspace: &Path,
    ) -> Result<(PromotedRecord, JoinHandle<()>), IntakeError> {
        // Discovered -> Extracted
        tokio::fs::create_dir_all(workspace)
            .await
            .map_err(|e| IntakeError::WorkspaceCreation {
                path: workspace.to_path_buf(),
                source: e,
            })?;

        let extract_report = self.extractor.extract(archive, workspace).await?;
        info!(
            archive = %archive.display(),
            workspace = %workspace.display(),
            files = extract_report.files,
            bytes = extract_report.bytes,
            "extracted archive"
        );

        // Extracted -> TypeValidated
        self.check_file_types(workspace).await?;
        debug!(workspace = %workspace.display(), "all extracted files have allowed types");

        // TypeValidated -> MetadataParsed
        let metadata_path =
            metadata::locate(workspace, &self.config.metadata_filename).await?;
        let application_number = metadata::application_number(&metadata_path).await?;
        debug!(application = application_number, "parsed metadata document");

        // MetadataParsed -> SchemaValidated
        let warnings = self
            .validator
            .validate(&metadata_path)
            .await
            .map_err(|source| IntakeError::SchemaValidation {
                application_number,
                source,
            })?;
        if !warnings.is_empty() {
            debug!(
                application = application_number,
                warnings = warnings.len(),
                "metadata document validated with warnings"
            );
        }

        // SchemaValidated -> Promoted
        let record_name = format!("{application_number}-{}", Uuid::new_v4());
        let destination = self.config.dest_dir.join(&record_name);
        tokio::fs::rename(workspace, &destination)
            .await
            .map_err(|e| IntakeError::Promotion {
                workspace: workspace.to_path_buf(),
                destination: destination.clone(),
                source: e,
            })?;

        // Fire-and-forget success notification; the pipeline does not wait
        // for delivery.
        let subject = format!("Application # {application_number} - archive processed");
        let body = format!(
            "Application # {application_number} - archive '{}' processed and extracted to '{}'.",
            archive.display(),
            destination.display()
        );
        let delivery = notify_detached(Arc::clone(&self.notifier), subject, body);

        Ok((
            PromotedRecord {
                application_number,
                path: destination,
                archive: archive.to_path_buf(),
            },
            delivery,
        ))
    }

    /// Fail-fast allow-list check over every file in the workspace.
    async fn check_file_types(&self, workspace: &Path) -> Result<(), IntakeError> {
        let files = scan::collect_files(workspace).await.map_err(|e| {
            IntakeError::WorkspaceScan {
                path: workspace.to_path_buf(),
                source: e,
            }
        })?;

        for file in files {
            let extension = file
                .extension()
                .and_then(|e| e.to_str())
                .map(|e| e.to_ascii_lowercase())
                .unwrap_or_default();

            if !self.allowed_extensions.contains(&extension) {
                return Err(IntakeError::InvalidFileType {
                    path: file,
                    extension,
                });
            }
        }

        Ok(())
    }

    /// Best-effort recursive deletion of a failed workspace.
    async fn remove_workspace(&self, workspace: &Path) {
        if tokio::fs::try_exists(workspace).await.unwrap_or(false) {
            if let Err(e) = tokio::fs::remove_dir_all(workspace).await {
                warn!(
                    workspace = %workspace.display(),
                    error = %e,
                    "failed to remove workspace after failure"
                );
            }
        }
    }
}
