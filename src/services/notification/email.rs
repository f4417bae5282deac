//! Email notification implementation.
//!
//! Sends plain-text notifications through any `lettre` transport. Production code uses a
//! blocking SMTP relay built from [`SmtpSettings`]; tests inject their own transport.

use async_trait::async_trait;
use email_address::EmailAddress;
use lettre::{
	message::{header::ContentType, Mailbox},
	transport::smtp::authentication::Credentials,
	Message, SmtpTransport, Transport,
};
use std::fmt::Display;
use thiserror::Error;

use crate::{
	models::SmtpSettings,
	services::notification::{NotificationError, NotificationSink},
};

#[derive(Debug, Error)]
pub enum SmtpClientError {
	#[error("Failed to create SMTP client: {0}")]
	BuildError(String),

	#[error("Invalid sender address: {0}")]
	InvalidSender(String),
}

/// Implementation of email notifications via a `lettre` transport
pub struct EmailNotifier<T: Transport> {
	/// Email sender, also used as reply-to
	sender: EmailAddress,
	/// Transport used for delivery
	transport: T,
}

impl<T> EmailNotifier<T>
where
	T: Transport + Send + Sync,
	T::Error: Display,
{
	/// Creates a notifier delivering through `transport`
	///
	/// # Arguments
	/// * `sender` - Address used in the `From` and `Reply-To` headers
	/// * `transport` - Transport used to deliver messages
	pub fn with_transport(sender: EmailAddress, transport: T) -> Self {
		Self { sender, transport }
	}

	/// Builds the message for one notification
	fn build_message(
		&self,
		subject: &str,
		body: &str,
		recipient: &str,
	) -> Result<Message, NotificationError> {
		let sender: Mailbox = self.sender.to_string().parse().map_err(|e| {
			NotificationError::internal_error(format!("Failed to parse email sender: {}", e))
		})?;
		let recipient: Mailbox = recipient.parse().map_err(|e| {
			NotificationError::internal_error(format!("Failed to parse email recipient: {}", e))
		})?;

		Message::builder()
			.from(sender.clone())
			.reply_to(sender)
			.to(recipient)
			.subject(subject)
			.header(ContentType::TEXT_PLAIN)
			.body(body.to_owned())
			.map_err(|e| NotificationError::internal_error(format!("Failed to build email: {}", e)))
	}
}

impl EmailNotifier<SmtpTransport> {
	/// Creates a notifier backed by an SMTP relay
	///
	/// # Arguments
	/// * `settings` - Validated SMTP settings
	///
	/// # Returns
	/// * `Result<Self, NotificationError>` - Notifier or a configuration error
	pub fn from_settings(settings: &SmtpSettings) -> Result<Self, NotificationError> {
		let sender = settings
			.user
			.parse::<EmailAddress>()
			.map_err(|e| SmtpClientError::InvalidSender(e.to_string()))
			.map_err(|e| NotificationError::config_error(e.to_string()))?;
		let transport = build_transport(settings)
			.map_err(|e| NotificationError::config_error(e.to_string()))?;

		Ok(Self::with_transport(sender, transport))
	}
}

/// Builds the SMTP relay described by `settings`
fn build_transport(settings: &SmtpSettings) -> Result<SmtpTransport, SmtpClientError> {
	let relay = match settings.starttls {
		true => SmtpTransport::starttls_relay(&settings.host),
		false => SmtpTransport::relay(&settings.host),
	};
	let relay = relay
		.map_err(|e| SmtpClientError::BuildError(e.to_string()))?
		.port(settings.port);
	let relay = if settings.auth {
		relay.credentials(Credentials::new(
			settings.user.clone(),
			settings.password.to_string(),
		))
	} else {
		relay
	};

	Ok(relay.build())
}

#[async_trait]
impl<T> NotificationSink for EmailNotifier<T>
where
	T: Transport + Send + Sync,
	T::Error: Display,
{
	/// Sends one plain-text email
	///
	/// # Arguments
	/// * `subject` - Email subject
	/// * `body` - Plain-text body
	/// * `recipient` - Destination address
	///
	/// # Returns
	/// * `Result<(), NotificationError>` - Success or error
	async fn send(&self, subject: &str, body: &str, recipient: &str) -> Result<(), NotificationError> {
		let email = self.build_message(subject, body, recipient)?;

		self.transport
			.send(&email)
			.map_err(|e| NotificationError::network_error(e.to_string()))?;

		tracing::debug!(recipient = %recipient, subject = %subject, "Email sent");
		Ok(())
	}
}
