//! Dispatch helpers enforcing the best-effort notification contract.

use std::sync::Arc;
use tokio::task::JoinHandle;
use tracing::{debug, warn};

use super::traits::Notifier;

/// Fire-and-forget dispatch on a detached task.
///
/// The caller does not wait for delivery, so a failure can be logged after
/// the pipeline has already moved on to the next archive. That race is
/// benign: notification outcome never feeds back into processing. The
/// returned handle lets the caller await the attempt before shutting down;
/// dropping the runtime with the task still pending cancels the delivery.
pub fn notify_detached(
    notifier: Arc<dyn Notifier>,
    subject: String,
    body: String,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        match notifier.send(&subject, &body).await {
            Ok(()) => debug!(subject = %subject, "notification delivered"),
            Err(e) => warn!(subject = %subject, error = %e, "notification delivery failed"),
        }
    })
}

/// Awaited dispatch. Failures are logged and swallowed, same as the
/// detached variant.
pub async fn notify_and_wait(notifier: &dyn Notifier, subject: &str, body: &str) {
    match notifier.send(subject, body).await {
        Ok(()) => debug!(subject = %subject, "notification delivered"),
        Err(e) => warn!(subject = %subject, error = %e, "notification delivery failed"),
    }
}
