pub mod config;
pub mod extractor;
pub mod metadata;
pub mod notifier;
pub mod pipeline;
pub mod testing;
pub mod validator;

pub use config::{
    load_config, load_config_from_str, validate_config, Config, ConfigError, IntakeConfig,
    NotifierConfig,
};
pub use extractor::{ExtractReport, Extractor, ExtractorError, ZipExtractor};
pub use notifier::{Notifier, NotifierError, SmtpNotifier};
pub use pipeline::{IntakeError, IntakePipeline, PromotedRecord, RunReport, Stage};
pub use validator::{Finding, SchemaValidator, Severity, ValidatorError, XsdValidator};
