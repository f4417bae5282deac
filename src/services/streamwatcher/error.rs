//! Stream watcher error types and handling.
//!
//! None of these errors stops the monitor loop: source failures are retried with backoff,
//! and the other kinds are logged before the cursor moves past the offending record.

use log::error;
use std::{error::Error, fmt};

/// Represents possible errors while watching an account's operation stream
#[derive(Debug)]
pub enum StreamWatcherError {
	/// The ledger source could not be reached or answered with an error
	SourceUnavailable(String),
	/// A record whose payload could not be decoded
	MalformedOperation(String),
	/// The notification sink rejected a notification
	DeliveryFailure(String),
	/// The cursor could not be loaded or persisted
	StorageError(String),
}

impl StreamWatcherError {
	fn format_message(&self) -> String {
		match self {
			Self::SourceUnavailable(msg) => format!("Source unavailable: {}", msg),
			Self::MalformedOperation(msg) => format!("Malformed operation: {}", msg),
			Self::DeliveryFailure(msg) => format!("Delivery failure: {}", msg),
			Self::StorageError(msg) => format!("Storage error: {}", msg),
		}
	}

	pub fn source_unavailable(msg: impl Into<String>) -> Self {
		let error = Self::SourceUnavailable(msg.into());
		error!("{}", error.format_message());
		error
	}

	pub fn malformed_operation(msg: impl Into<String>) -> Self {
		let error = Self::MalformedOperation(msg.into());
		error!("{}", error.format_message());
		error
	}

	pub fn delivery_failure(msg: impl Into<String>) -> Self {
		let error = Self::DeliveryFailure(msg.into());
		error!("{}", error.format_message());
		error
	}

	pub fn storage_error(msg: impl Into<String>) -> Self {
		let error = Self::StorageError(msg.into());
		error!("{}", error.format_message());
		error
	}
}

impl fmt::Display for StreamWatcherError {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "{}", self.format_message())
	}
}

impl Error for StreamWatcherError {}
