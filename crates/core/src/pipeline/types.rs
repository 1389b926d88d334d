//! Types for the intake pipeline.

use std::fmt;
use std::path::PathBuf;

/// States of the per-archive state machine. `Failed` is implicit: it is an
/// `IntakeError` carrying the last stage reached.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Discovered,
    Extracted,
    TypeValidated,
    MetadataParsed,
    SchemaValidated,
    Promoted,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Stage::Discovered => "discovered",
            Stage::Extracted => "extracted",
            Stage::TypeValidated => "type-validated",
            Stage::MetadataParsed => "metadata-parsed",
            Stage::SchemaValidated => "schema-validated",
            Stage::Promoted => "promoted",
        };
        f.write_str(label)
    }
}

/// The durable output artifact of one successfully processed archive.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PromotedRecord {
    /// Business identifier from the metadata document.
    pub application_number: u32,
    /// Final directory: `{dest_dir}/{application_number}-{uuid}`.
    pub path: PathBuf,
    /// The archive this record was produced from.
    pub archive: PathBuf,
}

/// Summary of one full pass over the source directory.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunReport {
    /// Archives discovered in the source directory.
    pub discovered: usize,
    /// Archives promoted to a record.
    pub promoted: usize,
    /// Archives that failed at some stage.
    pub failed: usize,
}

impl RunReport {
    pub fn all_promoted(&self) -> bool {
        self.failed == 0 && self.promoted == self.discovered
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stage_labels() {
        assert_eq!(Stage::Discovered.to_string(), "discovered");
        assert_eq!(Stage::SchemaValidated.to_string(), "schema-validated");
    }

    #[test]
    fn test_run_report_all_promoted() {
        let report = RunReport {
            discovered: 3,
            promoted: 3,
            failed: 0,
        };
        assert!(report.all_promoted());

        let report = RunReport {
            discovered: 3,
            promoted: 2,
            failed: 1,
        };
        assert!(!report.all_promoted());
    }
}
