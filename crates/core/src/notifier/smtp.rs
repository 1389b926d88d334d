//! SMTP notifier implementation.

use async_trait::async_trait;
use lettre::message::Mailbox;
use lettre::transport::smtp::authentication::Credentials;
use lettre::{AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor};

use crate::config::NotifierConfig;

use super::error::NotifierError;
use super::traits::Notifier;

/// Sends notifications through an SMTP relay (STARTTLS, authenticated).
pub struct SmtpNotifier {
    transport: AsyncSmtpTransport<Tokio1Executor>,
    sender: Mailbox,
    recipient: Mailbox,
}

fn parse_mailbox(address: &str) -> Result<Mailbox, NotifierError> {
    address.parse().map_err(|e| NotifierError::InvalidAddress {
        address: address.to_string(),
        reason: format!("{e}"),
    })
}

impl SmtpNotifier {
    /// Builds the transport from configuration. Address or relay problems
    /// are startup failures.
    pub fn new(config: &NotifierConfig) -> Result<Self, NotifierError> {
        let sender = parse_mailbox(config.sender_address())?;
        let recipient = parse_mailbox(&config.recipient)?;

        let transport = AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(&config.host)
            .map_err(|e| NotifierError::Transport(e.to_string()))?
            .port(config.port)
            .credentials(Credentials::new(
                config.username.clone(),
                config.password.clone(),
            ))
            .build();

        Ok(Self {
            transport,
            sender,
            recipient,
        })
    }
}

#[async_trait]
impl Notifier for SmtpNotifier {
    fn name(&self) -> &str {
        "smtp"
    }

    async fn send(&self, subject: &str, body: &str) -> Result<(), NotifierError> {
        let message = Message::builder()
            .from(self.sender.clone())
            .to(self.recipient.clone())
            .subject(subject)
            .body(body.to_string())
            .map_err(|e| NotifierError::Message(e.to_string()))?;

        self.transport
            .send(message)
            .await
            .map_err(|e| NotifierError::Delivery(e.to_string()))?;

        Ok(())
    }
}
