//! Ledger source error types and handling.
//!
//! Errors raised while talking to Horizon, split by how the caller should react:
//! connection problems and rate limits are transient, request and parse errors point at
//! a bad query or an unexpected response shape.

use log::error;

/// Represents possible errors while reading the ledger source
#[derive(Debug)]
pub enum LedgerSourceError {
	/// Network failures and server side (5xx) errors
	ConnectionError(String),

	/// Rejected requests (non-2xx responses other than 429 and 5xx)
	RequestError(String),

	/// The server asked the client to slow down (HTTP 429)
	RateLimited(String),

	/// The response body could not be decoded
	ParseError(String),
}

impl LedgerSourceError {
	/// Formats the error message based on the error type
	fn format_message(&self) -> String {
		match self {
			Self::ConnectionError(msg) => format!("Connection error: {}", msg),
			Self::RequestError(msg) => format!("Request error: {}", msg),
			Self::RateLimited(msg) => format!("Rate limited: {}", msg),
			Self::ParseError(msg) => format!("Parse error: {}", msg),
		}
	}

	/// Creates a new connection error with logging
	pub fn connection_error(msg: impl Into<String>) -> Self {
		let error = Self::ConnectionError(msg.into());
		error!("{}", error.format_message());
		error
	}

	/// Creates a new request error with logging
	pub fn request_error(msg: impl Into<String>) -> Self {
		let error = Self::RequestError(msg.into());
		error!("{}", error.format_message());
		error
	}

	/// Creates a new rate limit error with logging
	pub fn rate_limited(msg: impl Into<String>) -> Self {
		let error = Self::RateLimited(msg.into());
		error!("{}", error.format_message());
		error
	}

	/// Creates a new parse error with logging
	pub fn parse_error(msg: impl Into<String>) -> Self {
		let error = Self::ParseError(msg.into());
		error!("{}", error.format_message());
		error
	}
}

impl std::fmt::Display for LedgerSourceError {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		write!(f, "{}", self.format_message())
	}
}

impl std::error::Error for LedgerSourceError {}

impl From<reqwest_middleware::Error> for LedgerSourceError {
	fn from(err: reqwest_middleware::Error) -> Self {
		Self::connection_error(err.to_string())
	}
}
