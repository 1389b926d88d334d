use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Root configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Config {
    pub intake: IntakeConfig,
    pub notifier: NotifierConfig,
}

/// Intake pipeline configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct IntakeConfig {
    /// Directory scanned (recursively) for submitted archives
    pub source_dir: PathBuf,
    /// Directory receiving extraction workspaces and promoted records
    pub dest_dir: PathBuf,
    /// Archive file extension, without leading dot (default: "zip")
    #[serde(default = "default_archive_extension")]
    pub archive_extension: String,
    /// Allow-listed file extensions inside an archive, without leading dots
    pub allowed_extensions: Vec<String>,
    /// Metadata document path relative to the workspace root (e.g. "party.xml")
    pub metadata_filename: PathBuf,
    /// Path to the XSD schema the metadata document must conform to
    pub schema_path: PathBuf,
}

fn default_archive_extension() -> String {
    "zip".to_string()
}

/// Mail notification configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct NotifierConfig {
    /// SMTP relay host
    pub host: String,
    /// SMTP relay port (default: 587, STARTTLS)
    #[serde(default = "default_smtp_port")]
    pub port: u16,
    /// Sender account username
    pub username: String,
    /// Sender account password
    pub password: String,
    /// Sender address (defaults to the username when omitted)
    #[serde(default)]
    pub sender: Option<String>,
    /// Fixed recipient address
    pub recipient: String,
}

fn default_smtp_port() -> u16 {
    587
}

impl NotifierConfig {
    /// The address messages are sent from.
    pub fn sender_address(&self) -> &str {
        self.sender.as_deref().unwrap_or(&self.username)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn archive_extension_defaults_to_zip() {
        let toml = r#"
[intake]
source_dir = "/srv/drop"
dest_dir = "/srv/records"
allowed_extensions = ["xml", "pdf"]
metadata_filename = "party.xml"
schema_path = "/etc/dossier/party.xsd"

[notifier]
host = "smtp.example.com"
username = "intake@example.com"
password = "secret"
recipient = "ops@example.com"
"#;
        let config: Config = toml::from_str(toml).unwrap();
        assert_eq!(config.intake.archive_extension, "zip");
        assert_eq!(config.notifier.port, 587);
        assert_eq!(config.notifier.sender_address(), "intake@example.com");
    }

    #[test]
    fn explicit_sender_wins() {
        let toml = r#"
[intake]
source_dir = "/srv/drop"
dest_dir = "/srv/records"
allowed_extensions = ["xml"]
metadata_filename = "party.xml"
schema_path = "party.xsd"

[notifier]
host = "smtp.example.com"
port = 2525
username = "machine-account"
password = "secret"
sender = "noreply@example.com"
recipient = "ops@example.com"
"#;
        let config: Config = toml::from_str(toml).unwrap();
        assert_eq!(config.notifier.port, 2525);
        assert_eq!(config.notifier.sender_address(), "noreply@example.com");
    }
}
