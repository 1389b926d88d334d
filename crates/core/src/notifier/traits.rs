//! Trait definitions for the notifier module.

use async_trait::async_trait;

use super::error::NotifierError;

/// A transport that can deliver one plain-text notification.
///
/// Implementations report delivery failures through the `Result`; the
/// dispatch helpers in this module are responsible for swallowing them.
#[async_trait]
pub trait Notifier: Send + Sync {
    /// Returns the name of this notifier implementation.
    fn name(&self) -> &str;

    /// Delivers one message and waits for the transport to accept it.
    async fn send(&self, subject: &str, body: &str) -> Result<(), NotifierError>;
}
