//! One-way notifications to a fixed recipient.
//!
//! The pipeline emits plain-text subject + body messages on promotion and on
//! schema-validation failure. Delivery is best-effort: failures are logged
//! and swallowed at the dispatch helpers, never influencing the pipeline's
//! own success/failure determination.

mod dispatch;
mod error;
mod smtp;
mod traits;

pub use dispatch::{notify_and_wait, notify_detached};
pub use error::NotifierError;
pub use smtp::SmtpNotifier;
pub use traits::Notifier;
