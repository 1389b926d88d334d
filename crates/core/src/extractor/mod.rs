//! Archive extraction.
//!
//! Provides the `Extractor` trait and the ZIP implementation used by the
//! intake pipeline. Extraction expands an archive into an existing, empty
//! target directory, preserving the archive's internal relative paths and
//! refusing entries that would escape the target.

mod error;
mod traits;
mod zip;

pub use error::ExtractorError;
pub use traits::{ExtractReport, Extractor};
pub use zip::ZipExtractor;
