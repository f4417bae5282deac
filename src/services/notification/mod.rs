//! Notification delivery.
//!
//! The stream monitor hands every formatted notification to a [`NotificationSink`]. The
//! only production sink is [`EmailNotifier`], which delivers over SMTP.

use async_trait::async_trait;

mod email;
mod error;

pub use email::{EmailNotifier, SmtpClientError};
pub use error::NotificationError;

/// Interface for notification delivery
#[async_trait]
pub trait NotificationSink: Send + Sync {
	/// Delivers one notification to `recipient`
	///
	/// Failures are returned to the caller; sinks do not retry.
	async fn send(&self, subject: &str, body: &str, recipient: &str) -> Result<(), NotificationError>;
}
