use super::{types::Config, ConfigError};

/// Validate configuration
/// Currently validates:
/// - Allow-list is non-empty and entries carry no leading dot
/// - Archive extension carries no leading dot
/// - Metadata filename is relative
/// - Notifier port is not 0
pub fn validate_config(config: &Config) -> Result<(), ConfigError> {
    let intake = &config.intake;

    if intake.allowed_extensions.is_empty() {
        return Err(ConfigError::ValidationError(
            "intake.allowed_extensions cannot be empty".to_string(),
        ));
    }

    for ext in &intake.allowed_extensions {
        if ext.starts_with('.') || ext.is_empty() {
            return Err(ConfigError::ValidationError(format!(
                "intake.allowed_extensions entry '{}' must be a bare extension without a leading dot",
                ext
            )));
        }
    }

    if intake.archive_extension.starts_with('.') || intake.archive_extension.is_empty() {
        return Err(ConfigError::ValidationError(format!(
            "intake.archive_extension '{}' must be a bare extension without a leading dot",
            intake.archive_extension
        )));
    }

    if intake.metadata_filename.is_absolute() {
        return Err(ConfigError::ValidationError(format!(
            "intake.metadata_filename '{}' must be relative to the workspace root",
            intake.metadata_filename.display()
        )));
    }

    if config.notifier.port == 0 {
        return Err(ConfigError::ValidationError(
            "notifier.port cannot be 0".to_string(),
        ));
    }

    Ok(())
}
