//! Mock notifier for testing.

use async_trait::async_trait;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::RwLock;

use crate::notifier::{Notifier, NotifierError};

/// A recorded notification for test assertions.
#[derive(Debug, Clone)]
pub struct SentMessage {
    /// The subject line the pipeline composed.
    pub subject: String,
    /// The message body.
    pub body: String,
}

/// Mock implementation of the Notifier trait.
///
/// Provides controllable behavior for testing:
/// - Track sent messages for assertions
/// - Simulate delivery failure
///
/// # Example
///
/// ```rust,ignore
/// use dossier_core::testing::MockNotifier;
///
/// let notifier = MockNotifier::new();
/// notifier.send("subject", "body").await?;
///
/// let sent = notifier.sent().await;
/// assert_eq!(sent.len(), 1);
/// assert_eq!(sent[0].subject, "subject");
/// ```
#[derive(Debug, Clone)]
pub struct MockNotifier {
    /// Recorded messages.
    sent: Arc<RwLock<Vec<SentMessage>>>,
    /// If set, the next send will fail with this error.
    next_error: Arc<RwLock<Option<NotifierError>>>,
    /// Simulated delivery duration in milliseconds.
    send_delay_ms: Arc<RwLock<u64>>,
}

impl Default for MockNotifier {
    fn default() -> Self {
        Self::new()
    }
}

impl MockNotifier {
    /// Create a new mock notifier.
    pub fn new() -> Self {
        Self {
            sent: Arc::new(RwLock::new(Vec::new())),
            next_error: Arc::new(RwLock::new(None)),
            send_delay_ms: Arc::new(RwLock::new(0)),
        }
    }

    /// Set a simulated delivery duration applied before a send is recorded.
    pub async fn set_send_delay(&self, delay: Duration) {
        *self.send_delay_ms.write().await = delay.as_millis() as u64;
    }

    /// Get all recorded messages.
    pub async fn sent(&self) -> Vec<SentMessage> {
        self.sent.read().await.clone()
    }

    /// Get the number of messages sent.
    pub async fn sent_count(&self) -> usize {
        self.sent.read().await.len()
    }

    /// Clear recorded messages.
    pub async fn clear_sent(&self) {
        self.sent.write().await.clear();
    }

    /// Configure the next send to fail with the given error.
    pub async fn set_next_error(&self, error: NotifierError) {
        *self.next_error.write().await = Some(error);
    }

    /// Take the next error if set.
    async fn take_error(&self) -> Option<NotifierError> {
        self.next_error.write().await.take()
    }
}

#[async_trait]
impl Notifier for MockNotifier {
    fn name(&self) -> &str {
        "mock"
    }

    async fn send(&self, subject: &str, body: &str) -> Result<(), NotifierError> {
        if let Some(err) = self.take_error().await {
            return Err(err);
        }

        let delay_ms = *self.send_delay_ms.read().await;
        if delay_ms > 0 {
            tokio::time::sleep(Duration::from_millis(delay_ms)).await;
        }

        self.sent.write().await.push(SentMessage {
            subject: subject.to_string(),
            body: body.to_string(),
        });

        Ok(())
    }
}
