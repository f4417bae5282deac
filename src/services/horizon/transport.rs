//! Horizon REST transport.
//!
//! A thin layer over the retrying HTTP client: it joins resource paths onto the configured
//! base URL, performs GET requests and maps HTTP failures onto [`LedgerSourceError`].

use async_trait::async_trait;
use reqwest::StatusCode;
use reqwest_middleware::ClientWithMiddleware;
use serde_json::Value;
use url::Url;

use crate::{
	services::horizon::error::LedgerSourceError,
	utils::{create_retryable_http_client, HttpRetryConfig},
};

/// Interface for sending read requests to a Horizon server
#[async_trait]
pub trait HorizonTransport: Send + Sync {
	/// Base URL requests are resolved against
	fn base_url(&self) -> String;

	/// Performs a GET request on `path` with the given query parameters
	///
	/// # Arguments
	/// * `path` - Resource path relative to the base URL (e.g. `accounts/G.../operations`)
	/// * `query` - Query parameters in request order
	///
	/// # Returns
	/// * `Result<Value, LedgerSourceError>` - Decoded JSON body or error
	async fn get(
		&self,
		path: &str,
		query: Vec<(String, String)>,
	) -> Result<Value, LedgerSourceError>;
}

/// HTTP transport for Horizon's REST API
#[derive(Clone)]
pub struct HorizonHttpTransport {
	client: ClientWithMiddleware,
	base_url: Url,
}

impl HorizonHttpTransport {
	/// Creates a transport for the Horizon server at `base_url`
	///
	/// # Arguments
	/// * `base_url` - Server root, for example `https://horizon.stellar.org`
	/// * `retry_config` - Retry policy for transient failures
	pub fn new(base_url: &str, retry_config: &HttpRetryConfig) -> Result<Self, LedgerSourceError> {
		let mut base_url = Url::parse(base_url).map_err(|e| {
			LedgerSourceError::request_error(format!("Invalid Horizon URL {}: {}", base_url, e))
		})?;
		// Url::join replaces the last segment unless the path ends with a slash
		if !base_url.path().ends_with('/') {
			let path = format!("{}/", base_url.path());
			base_url.set_path(&path);
		}

		let client = create_retryable_http_client(retry_config).map_err(|e| {
			LedgerSourceError::connection_error(format!("Failed to build HTTP client: {}", e))
		})?;

		Ok(Self { client, base_url })
	}

	fn resolve(&self, path: &str) -> Result<Url, LedgerSourceError> {
		self.base_url
			.join(path.trim_start_matches('/'))
			.map_err(|e| LedgerSourceError::request_error(format!("Invalid path {}: {}", path, e)))
	}
}

#[async_trait]
impl HorizonTransport for HorizonHttpTransport {
	fn base_url(&self) -> String {
		self.base_url.to_string()
	}

	async fn get(
		&self,
		path: &str,
		query: Vec<(String, String)>,
	) -> Result<Value, LedgerSourceError> {
		let url = self.resolve(path)?;
		tracing::debug!(url = %url, ?query, "Sending Horizon request");

		let response = self
			.client
			.get(url.clone())
			.header(reqwest::header::ACCEPT, "application/hal+json, application/json")
			.query(&query)
			.send()
			.await?;

		let status = response.status();
		if !status.is_success() {
			let body = response.text().await.unwrap_or_default();
			let message = format!("{} returned {}: {}", url, status, body);
			return Err(match status {
				StatusCode::TOO_MANY_REQUESTS => LedgerSourceError::rate_limited(message),
				status if status.is_server_error() => LedgerSourceError::connection_error(message),
				_ => LedgerSourceError::request_error(message),
			});
		}

		let body = response.text().await.map_err(|e| {
			LedgerSourceError::connection_error(format!("Failed to read response body: {}", e))
		})?;

		serde_json::from_str(&body).map_err(|e| {
			LedgerSourceError::parse_error(format!("Invalid JSON from {}: {}", url, e))
		})
	}
}
