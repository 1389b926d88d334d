//! ZIP archive extractor.

use async_trait::async_trait;
use std::fs::File;
use std::io;
use std::path::{Path, PathBuf};

use super::error::ExtractorError;
use super::traits::{ExtractReport, Extractor};

/// ZIP implementation of the `Extractor` trait.
///
/// The zip crate is synchronous, so the entry walk runs on a blocking task.
pub struct ZipExtractor;

impl ZipExtractor {
    pub fn new() -> Self {
        Self
    }

    fn extract_sync(archive: &Path, target: &Path) -> Result<ExtractReport, ExtractorError> {
        if !target.is_dir() {
            return Err(ExtractorError::TargetMissing {
                path: target.to_path_buf(),
            });
        }
        if std::fs::read_dir(target)?.next().is_some() {
            return Err(ExtractorError::TargetNotEmpty {
                path: target.to_path_buf(),
            });
        }

        let file = File::open(archive).map_err(|e| ExtractorError::OpenFailed {
            path: archive.to_path_buf(),
            source: e,
        })?;
        let mut zip = zip::ZipArchive::new(file).map_err(|_| ExtractorError::Corrupted {
            path: archive.to_path_buf(),
        })?;

        let mut files = 0usize;
        let mut bytes = 0u64;

        for index in 0..zip.len() {
            let mut entry = zip.by_index(index).map_err(|_| ExtractorError::Corrupted {
                path: archive.to_path_buf(),
            })?;

            // enclosed_name rejects absolute paths and `..` traversal
            let relative: PathBuf = match entry.enclosed_name() {
                Some(p) => p,
                None => {
                    return Err(ExtractorError::PathEscape {
                        entry: entry.name().to_string(),
                    })
                }
            };
            let dest = target.join(&relative);

            if entry.is_dir() {
                std::fs::create_dir_all(&dest).map_err(|e| ExtractorError::WriteFailed {
                    path: dest.clone(),
                    source: e,
                })?;
                continue;
            }

            if let Some(parent) = dest.parent() {
                std::fs::create_dir_all(parent).map_err(|e| ExtractorError::WriteFailed {
                    path: parent.to_path_buf(),
                    source: e,
                })?;
            }

            let mut out = File::create(&dest).map_err(|e| ExtractorError::WriteFailed {
                path: dest.clone(),
                source: e,
            })?;
            let written =
                io::copy(&mut entry, &mut out).map_err(|e| ExtractorError::WriteFailed {
                    path: dest.clone(),
                    source: e,
                })?;

            files += 1;
            bytes += written;
        }

        Ok(ExtractReport { files, bytes })
    }
}

impl Default for ZipExtractor {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Extractor for ZipExtractor {
    fn name(&self) -> &str {
        "zip"
    }

    async fn extract(
        &self,
        archive: &Path,
        target: &Path,
    ) -> Result<ExtractReport, ExtractorError> {
        let archive = archive.to_path_buf();
        let target = target.to_path_buf();

        tokio::task::spawn_blocking(move || Self::extract_sync(&archive, &target))
            .await
            .map_err(|e| ExtractorError::Aborted(e.to_string()))?
    }
}
