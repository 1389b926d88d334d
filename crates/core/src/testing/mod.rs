//! Testing utilities and mock implementations.
//!
//! Mock implementations of the pipeline's capability traits, plus fixtures
//! for building archives, so the intake lifecycle can be tested end to end
//! without an SMTP relay or a libxml2-visible schema.

mod mock_notifier;
mod mock_validator;

pub use mock_notifier::{MockNotifier, SentMessage};
pub use mock_validator::MockValidator;

/// Test fixtures and helper functions.
pub mod fixtures {
    use std::fs::File;
    use std::io::Write;
    use std::path::Path;
    use zip::write::SimpleFileOptions;

    /// Write a ZIP archive containing the given `(name, bytes)` entries.
    pub fn write_zip(path: &Path, entries: &[(&str, &[u8])]) {
        let file = File::create(path).expect("create zip file");
        let mut writer = zip::ZipWriter::new(file);
        for (name, data) in entries {
            writer
                .start_file(name.to_string(), SimpleFileOptions::default())
                .expect("start zip entry");
            writer.write_all(data).expect("write zip entry");
        }
        writer.finish().expect("finish zip");
    }

    /// A minimal metadata document carrying the given application number.
    pub fn party_xml(application_number: u32) -> String {
        format!(
            "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n<party><applicationno>{application_number}</applicationno></party>"
        )
    }
}
