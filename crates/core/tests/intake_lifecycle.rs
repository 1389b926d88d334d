//! Intake lifecycle integration tests.
//!
//! These tests run the full pipeline over real ZIP archives on disk, with a
//! mock validator and notifier:
//! - Happy path: extraction, metadata parsing, promotion, success notification
//! - Fail-fast file-type checking
//! - Missing and malformed metadata
//! - Schema-failure notification asymmetry
//! - Workspace cleanup on failure
//! - Record naming uniqueness across repeated runs

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use tempfile::TempDir;

use dossier_core::{
    testing::{fixtures, MockNotifier, MockValidator},
    IntakeConfig, IntakePipeline, ZipExtractor,
};

/// Test helper wiring a pipeline over temp directories and mocks.
struct TestHarness {
    pipeline: IntakePipeline<ZipExtractor, MockValidator>,
    validator: MockValidator,
    notifier: Arc<MockNotifier>,
    source_dir: TempDir,
    dest_dir: TempDir,
}

impl TestHarness {
    fn new() -> Self {
        Self::with_allowed_extensions(vec!["xml".to_string(), "pdf".to_string()])
    }

    fn with_allowed_extensions(allowed_extensions: Vec<String>) -> Self {
        let source_dir = TempDir::new().expect("Failed to create source dir");
        let dest_dir = TempDir::new().expect("Failed to create dest dir");

        let config = IntakeConfig {
            source_dir: source_dir.path().to_path_buf(),
            dest_dir: dest_dir.path().to_path_buf(),
            archive_extension: "zip".to_string(),
            allowed_extensions,
            metadata_filename: PathBuf::from("party.xml"),
            schema_path: PathBuf::from("unused.xsd"),
        };

        let validator = MockValidator::new();
        let notifier = Arc::new(MockNotifier::new());

        let pipeline = IntakePipeline::new(
            config,
            ZipExtractor::new(),
            validator.clone(),
            notifier.clone(),
        );

        Self {
            pipeline,
            validator,
            notifier,
            source_dir,
            dest_dir,
        }
    }

    /// Drop a ZIP archive into the source directory.
    fn create_archive(&self, name: &str, entries: &[(&str, &[u8])]) -> PathBuf {
        let path = self.source_dir.path().join(name);
        fixtures::write_zip(&path, entries);
        path
    }

    /// Directories currently present under the destination root.
    fn record_dirs(&self) -> Vec<String> {
        let mut dirs: Vec<String> = std::fs::read_dir(self.dest_dir.path())
            .expect("Failed to read dest dir")
            .filter_map(|e| e.ok())
            .filter(|e| e.path().is_dir())
            .map(|e| e.file_name().to_string_lossy().to_string())
            .collect();
        dirs.sort();
        dirs
    }

}

fn party_entry(application_number: u32) -> Vec<u8> {
    fixtures::party_xml(application_number).into_bytes()
}

// =============================================================================
// Happy Path
// =============================================================================

#[tokio::test]
async fn test_single_archive_is_promoted() {
    let harness = TestHarness::new();
    harness.create_archive(
        "submission.zip",
        &[
            ("party.xml", party_entry(4021).as_slice()),
            ("attachments/statement.pdf", b"%PDF-1.4".as_slice()),
        ],
    );

    let report = harness.pipeline.run().await;

    assert_eq!(report.discovered, 1);
    assert_eq!(report.promoted, 1);
    assert_eq!(report.failed, 0);
    assert!(report.all_promoted());

    // Exactly one record directory named {application}-{uuid}.
    let dirs = harness.record_dirs();
    assert_eq!(dirs.len(), 1);
    assert!(dirs[0].starts_with("4021-"), "unexpected record name: {}", dirs[0]);

    // Extracted content survives promotion with internal paths intact.
    let record = harness.dest_dir.path().join(&dirs[0]);
    assert!(record.join("party.xml").is_file());
    assert!(record.join("attachments/statement.pdf").is_file());

    // The metadata document inside the workspace was what got validated.
    let validated = harness.validator.validated().await;
    assert_eq!(validated.len(), 1);
    assert_eq!(validated[0].file_name().unwrap(), "party.xml");
}

#[tokio::test]
async fn test_success_notification_carries_application_number() {
    let harness = TestHarness::new();
    harness.create_archive("submission.zip", &[("party.xml", party_entry(77).as_slice())]);

    let report = harness.pipeline.run().await;
    assert_eq!(report.promoted, 1);

    let sent = harness.notifier.sent().await;
    assert_eq!(sent.len(), 1);
    assert_eq!(sent[0].subject, "Application # 77 - archive processed");
}

#[tokio::test]
async fn test_slow_success_notification_completes_before_run_returns() {
    // A slow transport must not lose the last archive's notification to
    // runtime shutdown; the pass waits for every attempted delivery.
    let harness = TestHarness::new();
    harness
        .notifier
        .set_send_delay(Duration::from_millis(200))
        .await;
    harness.create_archive("submission.zip", &[("party.xml", party_entry(4021).as_slice())]);

    let report = harness.pipeline.run().await;
    assert_eq!(report.promoted, 1);

    let sent = harness.notifier.sent().await;
    assert_eq!(sent.len(), 1);
    assert_eq!(sent[0].subject, "Application # 4021 - archive processed");
}

#[tokio::test]
async fn test_archives_in_nested_directories_are_discovered() {
    let harness = TestHarness::new();
    let nested = harness.source_dir.path().join("incoming/2026");
    std::fs::create_dir_all(&nested).unwrap();
    fixtures::write_zip(
        &nested.join("deep.zip"),
        &[("party.xml", party_entry(9).as_slice())],
    );

    let report = harness.pipeline.run().await;
    assert_eq!(report.discovered, 1);
    assert_eq!(report.promoted, 1);
}

#[tokio::test]
async fn test_empty_source_directory_is_a_noop() {
    let harness = TestHarness::new();

    let report = harness.pipeline.run().await;

    assert_eq!(report.discovered, 0);
    assert_eq!(report.promoted, 0);
    assert_eq!(report.failed, 0);
    assert!(harness.record_dirs().is_empty());
    assert_eq!(harness.notifier.sent_count().await, 0);
}

// =============================================================================
// File-Type Validation
// =============================================================================

#[tokio::test]
async fn test_disallowed_extension_fails_the_archive() {
    let harness = TestHarness::new();
    harness.create_archive(
        "submission.zip",
        &[
            ("party.xml", party_entry(4021).as_slice()),
            ("payload.exe", b"MZ".as_slice()),
        ],
    );

    let report = harness.pipeline.run().await;

    assert_eq!(report.discovered, 1);
    assert_eq!(report.promoted, 0);
    assert_eq!(report.failed, 1);

    // Workspace removed, nothing promoted, validator never reached.
    assert!(harness.record_dirs().is_empty());
    assert_eq!(harness.validator.validated_count().await, 0);
    assert_eq!(harness.notifier.sent_count().await, 0);
}

#[tokio::test]
async fn test_extension_check_is_case_insensitive() {
    let harness = TestHarness::new();
    harness.create_archive(
        "submission.zip",
        &[
            ("party.xml", party_entry(12).as_slice()),
            ("SCAN.PDF", b"%PDF-1.4".as_slice()),
        ],
    );

    let report = harness.pipeline.run().await;
    assert_eq!(report.promoted, 1);
}

#[tokio::test]
async fn test_file_without_extension_is_rejected() {
    let harness = TestHarness::new();
    harness.create_archive(
        "submission.zip",
        &[
            ("party.xml", party_entry(12).as_slice()),
            ("README", b"no extension".as_slice()),
        ],
    );

    let report = harness.pipeline.run().await;
    assert_eq!(report.failed, 1);
    assert!(harness.record_dirs().is_empty());
}

// =============================================================================
// Metadata
// =============================================================================

#[tokio::test]
async fn test_missing_metadata_document_fails_the_archive() {
    let harness = TestHarness::new();
    harness.create_archive("submission.zip", &[("other.xml", b"<x/>".as_slice())]);

    let report = harness.pipeline.run().await;

    assert_eq!(report.failed, 1);
    assert!(harness.record_dirs().is_empty());
    assert_eq!(harness.notifier.sent_count().await, 0);
}

#[tokio::test]
async fn test_metadata_without_application_number_fails_the_archive() {
    let harness = TestHarness::new();
    harness.create_archive(
        "submission.zip",
        &[("party.xml", b"<party><name>acme</name></party>".as_slice())],
    );

    let report = harness.pipeline.run().await;

    assert_eq!(report.failed, 1);
    assert!(harness.record_dirs().is_empty());
    // Metadata failures are log-only, never notified.
    assert_eq!(harness.notifier.sent_count().await, 0);
}

// =============================================================================
// Schema Validation
// =============================================================================

#[tokio::test]
async fn test_schema_failure_notifies_and_cleans_up() {
    let harness = TestHarness::new();
    harness
        .validator
        .set_error("element 'applicationno': out of range")
        .await;
    harness.create_archive("submission.zip", &[("party.xml", party_entry(4021).as_slice())]);

    let report = harness.pipeline.run().await;

    assert_eq!(report.failed, 1);
    assert!(harness.record_dirs().is_empty());

    // Exactly one failure notification, awaited before the run returns,
    // carrying the application number and the validator's message.
    let sent = harness.notifier.sent().await;
    assert_eq!(sent.len(), 1);
    assert_eq!(sent[0].subject, "Application # 4021 - metadata validation error");
    assert!(sent[0].body.contains("out of range"), "body: {}", sent[0].body);
}

#[tokio::test]
async fn test_schema_warnings_do_not_fail_the_archive() {
    let harness = TestHarness::new();
    harness.validator.add_warning("deprecated attribute").await;
    harness.create_archive("submission.zip", &[("party.xml", party_entry(8).as_slice())]);

    let report = harness.pipeline.run().await;

    assert_eq!(report.promoted, 1);
    assert_eq!(report.failed, 0);
}

// =============================================================================
// Run Semantics
// =============================================================================

#[tokio::test]
async fn test_one_failure_does_not_stop_the_run() {
    let harness = TestHarness::new();
    harness.create_archive("good.zip", &[("party.xml", party_entry(1).as_slice())]);
    harness.create_archive(
        "bad.zip",
        &[
            ("party.xml", party_entry(2).as_slice()),
            ("virus.exe", b"MZ".as_slice()),
        ],
    );
    harness.create_archive("also-good.zip", &[("party.xml", party_entry(3).as_slice())]);

    let report = harness.pipeline.run().await;

    assert_eq!(report.discovered, 3);
    assert_eq!(report.promoted, 2);
    assert_eq!(report.failed, 1);
    assert_eq!(harness.record_dirs().len(), 2);
}

#[tokio::test]
async fn test_corrupt_archive_is_a_per_archive_failure() {
    let harness = TestHarness::new();
    std::fs::write(harness.source_dir.path().join("broken.zip"), b"not a zip").unwrap();
    harness.create_archive("good.zip", &[("party.xml", party_entry(5).as_slice())]);

    let report = harness.pipeline.run().await;

    assert_eq!(report.discovered, 2);
    assert_eq!(report.promoted, 1);
    assert_eq!(report.failed, 1);
    assert_eq!(harness.record_dirs().len(), 1);
}

#[tokio::test]
async fn test_repeated_runs_produce_distinct_records() {
    let harness = TestHarness::new();
    let archive = harness.create_archive("submission.zip", &[("party.xml", party_entry(4021).as_slice())]);

    let first = harness.pipeline.run().await;
    assert_eq!(first.promoted, 1);

    // The archive stays in place; a second run processes it again and the
    // UUID suffix keeps both records.
    assert!(archive.is_file());
    let second = harness.pipeline.run().await;
    assert_eq!(second.promoted, 1);

    let dirs = harness.record_dirs();
    assert_eq!(dirs.len(), 2);
    assert!(dirs.iter().all(|d| d.starts_with("4021-")));
    assert_ne!(dirs[0], dirs[1]);
}

#[tokio::test]
async fn test_promoted_records_are_not_rediscovered() {
    // Records live under dest_dir, outside the scanned source tree, so a
    // second run over an emptied source finds nothing.
    let harness = TestHarness::new();
    let archive = harness.create_archive("submission.zip", &[("party.xml", party_entry(6).as_slice())]);

    let report = harness.pipeline.run().await;
    assert_eq!(report.promoted, 1);

    std::fs::remove_file(&archive).unwrap();
    let report = harness.pipeline.run().await;
    assert_eq!(report.discovered, 0);
}

// =============================================================================
// Path Safety
// =============================================================================

#[tokio::test]
async fn test_zip_slip_entry_fails_extraction() {
    let harness = TestHarness::new();
    harness.create_archive(
        "hostile.zip",
        &[("../escape.xml", b"<x/>".as_slice())],
    );

    let report = harness.pipeline.run().await;

    assert_eq!(report.failed, 1);
    assert!(harness.record_dirs().is_empty());
    // The workspace lives directly under dest_dir; a traversal entry would
    // have landed next to it.
    assert!(!harness.dest_dir.path().join("escape.xml").exists());
}
