//! Integration tests for the e-mail notification sink.

use email_address::EmailAddress;
use lettre::{address::Envelope, Message, Transport};
use mockall::mock;
use zeroize::Zeroizing;

use stellar_notifier::{
	models::SmtpSettings,
	services::notification::{EmailNotifier, NotificationError, NotificationSink},
};

use crate::integration::mocks::RECIPIENT;

mock! {
	pub SmtpTransport {}

	impl Transport for SmtpTransport {
		type Ok = String;
		type Error = String;

		fn send_raw(&self, envelope: &Envelope, email: &[u8]) -> Result<String, String>;

		fn send(&self, message: &Message) -> Result<String, String>;
	}
}

fn sender() -> EmailAddress {
	EmailAddress::new_unchecked("notifier@example.com")
}

#[tokio::test]
async fn test_email_notification_success() {
	let mut transport = MockSmtpTransport::new();
	transport
		.expect_send()
		.withf(|message| {
			let formatted = String::from_utf8_lossy(&message.formatted()).to_string();
			formatted.contains("Subject: Stellar payment operation.")
				&& formatted.contains("To: owner@example.com")
				&& formatted.contains("Received payment of 1.0000000 lumens")
		})
		.times(1)
		.returning(|_| Ok("250 OK".to_string()));

	let notifier = EmailNotifier::with_transport(sender(), transport);

	let result = notifier
		.send(
			"Stellar payment operation.",
			"Received payment of 1.0000000 lumens",
			RECIPIENT,
		)
		.await;
	assert!(result.is_ok());
}

#[tokio::test]
async fn test_email_notification_failure() {
	let mut transport = MockSmtpTransport::new();
	transport
		.expect_send()
		.times(1)
		.returning(|_| Err("451 Temporary local problem".to_string()));

	let notifier = EmailNotifier::with_transport(sender(), transport);

	let result = notifier.send("Subject", "Body", RECIPIENT).await;
	assert!(matches!(result, Err(NotificationError::NetworkError(_))));
}

#[tokio::test]
async fn test_invalid_recipient_is_not_sent() {
	let mut transport = MockSmtpTransport::new();
	transport.expect_send().never();

	let notifier = EmailNotifier::with_transport(sender(), transport);

	let result = notifier.send("Subject", "Body", "not an address").await;
	assert!(matches!(result, Err(NotificationError::InternalError(_))));
}

#[tokio::test]
async fn test_unreachable_smtp_host_fails_delivery() {
	let settings = SmtpSettings {
		host: "dummy.smtp.host.invalid".to_string(),
		port: 2525,
		starttls: false,
		auth: false,
		user: "notifier@example.com".to_string(),
		password: Zeroizing::new(String::new()),
		recipient: RECIPIENT.to_string(),
	};

	let notifier = EmailNotifier::from_settings(&settings).unwrap();

	let result = notifier.send("Subject", "Body", RECIPIENT).await;
	assert!(matches!(result, Err(NotificationError::NetworkError(_))));
}
