//! Error types for the notifier module.

use thiserror::Error;

/// Errors that can occur while building or delivering a notification.
///
/// These never escape the dispatch helpers; they exist so transports stay
/// testable.
#[derive(Debug, Error)]
pub enum NotifierError {
    /// A configured mail address does not parse.
    #[error("Invalid mail address '{address}': {reason}")]
    InvalidAddress { address: String, reason: String },

    /// Transport could not be constructed.
    #[error("Failed to build mail transport: {0}")]
    Transport(String),

    /// Message assembly failed.
    #[error("Failed to build message: {0}")]
    Message(String),

    /// The transport refused or failed to deliver.
    #[error("Delivery failed: {0}")]
    Delivery(String),
}
