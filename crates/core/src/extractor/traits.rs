//! Trait definitions for the extractor module.

use async_trait::async_trait;
use std::path::Path;

use super::error::ExtractorError;

/// Summary of a completed extraction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractReport {
    /// Number of file entries written.
    pub files: usize,
    /// Total uncompressed bytes written.
    pub bytes: u64,
}

/// An extractor that can expand one archive into a target directory.
#[async_trait]
pub trait Extractor: Send + Sync {
    /// Returns the name of this extractor implementation.
    fn name(&self) -> &str;

    /// Expands all entries of the archive at `archive` into `target`.
    ///
    /// `target` must already exist and be empty. The archive's internal
    /// relative paths are preserved; entries that would resolve outside
    /// `target` fail the whole extraction.
    async fn extract(&self, archive: &Path, target: &Path)
        -> Result<ExtractReport, ExtractorError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    struct NoopExtractor;

    #[async_trait]
    impl Extractor for NoopExtractor {
        fn name(&self) -> &str {
            "noop"
        }

        async fn extract(
            &self,
            _archive: &Path,
            _target: &Path,
        ) -> Result<ExtractReport, ExtractorError> {
            Ok(ExtractReport { files: 0, bytes: 0 })
        }
    }

    #[tokio::test]
    async fn test_trait_object_safety() {
        let extractor: Box<dyn Extractor> = Box::new(NoopExtractor);
        let report = extractor
            .extract(Path::new("a.zip"), Path::new("/tmp/out"))
            .await
            .unwrap();
        assert_eq!(report, ExtractReport { files: 0, bytes: 0 });
    }
}
