//! Horizon ledger source.
//!
//! Reads an account's operation feed and its claimable balances from Horizon's REST API.

use async_trait::async_trait;
use serde_json::Value;
use tracing::instrument;

use crate::{
	models::{ClaimableBalance, Cursor, Operation, OperationRecord},
	services::horizon::{
		error::LedgerSourceError,
		transport::{HorizonHttpTransport, HorizonTransport},
	},
	utils::{HttpRetryConfig, CLAIMABLE_BALANCE_LIMIT},
};

/// Source of ledger data for a watched account
#[async_trait]
pub trait LedgerSource: Send + Sync {
	/// Fetches the operations strictly after `cursor`, oldest first
	///
	/// # Arguments
	/// * `account_id` - Account whose operations are read
	/// * `cursor` - Resume point; `None` starts from the beginning of the account's history
	/// * `limit` - Maximum number of records to return
	///
	/// # Returns
	/// * `Result<Vec<OperationRecord>, LedgerSourceError>` - Records in ascending cursor order
	async fn fetch_operations(
		&self,
		account_id: &str,
		cursor: Option<Cursor>,
		limit: u32,
	) -> Result<Vec<OperationRecord>, LedgerSourceError>;

	/// Fetches the claimable balances claimable by `account_id`, newest first
	async fn fetch_claimable_balances(
		&self,
		account_id: &str,
	) -> Result<Vec<ClaimableBalance>, LedgerSourceError>;
}

/// Client for a Horizon server
#[derive(Clone)]
pub struct HorizonClient<T: HorizonTransport> {
	transport: T,
}

impl<T: HorizonTransport> HorizonClient<T> {
	/// Creates a new Horizon client with a specific transport
	pub fn new_with_transport(transport: T) -> Self {
		Self { transport }
	}

	/// Extracts `_embedded.records` from a Horizon collection page
	fn records(page: Value) -> Result<Vec<Value>, LedgerSourceError> {
		match page {
			Value::Object(mut object) => object
				.remove("_embedded")
				.and_then(|mut embedded| embedded.get_mut("records").map(Value::take))
				.and_then(|records| match records {
					Value::Array(records) => Some(records),
					_ => None,
				})
				.ok_or_else(|| {
					LedgerSourceError::parse_error("collection page without _embedded.records")
				}),
			_ => Err(LedgerSourceError::parse_error(
				"collection page is not a JSON object",
			)),
		}
	}
}

impl HorizonClient<HorizonHttpTransport> {
	/// Creates a client for the Horizon server at `base_url`
	///
	/// # Arguments
	/// * `base_url` - Server root, for example `https://horizon.stellar.org`
	///
	/// # Returns
	/// * `Result<Self, LedgerSourceError>` - New client or configuration error
	pub fn new(base_url: &str) -> Result<Self, LedgerSourceError> {
		let transport = HorizonHttpTransport::new(base_url, &HttpRetryConfig::default())?;
		Ok(Self::new_with_transport(transport))
	}
}

#[async_trait]
impl<T: HorizonTransport> LedgerSource for HorizonClient<T> {
	#[instrument(skip(self))]
	async fn fetch_operations(
		&self,
		account_id: &str,
		cursor: Option<Cursor>,
		limit: u32,
	) -> Result<Vec<OperationRecord>, LedgerSourceError> {
		let mut query = vec![
			("order".to_string(), "asc".to_string()),
			("limit".to_string(), limit.to_string()),
			("join".to_string(), "transactions".to_string()),
		];
		if let Some(cursor) = cursor {
			query.push(("cursor".to_string(), cursor.to_string()));
		}

		let page = self
			.transport
			.get(&format!("accounts/{}/operations", account_id), query)
			.await?;

		let mut records = Vec::new();
		for raw in Self::records(page)? {
			match Operation::from_json(raw) {
				Ok(operation) => records.push(OperationRecord::from(operation)),
				Err(error) => match error.paging_token {
					Some(paging_token) => records.push(OperationRecord::Malformed {
						paging_token,
						id: error.id,
						kind: error.kind,
						reason: error.reason,
					}),
					None => tracing::warn!(
						reason = %error.reason,
						"Dropping feed entry without a paging token"
					),
				},
			}
		}

		Ok(records)
	}

	#[instrument(skip(self))]
	async fn fetch_claimable_balances(
		&self,
		account_id: &str,
	) -> Result<Vec<ClaimableBalance>, LedgerSourceError> {
		let query = vec![
			("claimant".to_string(), account_id.to_string()),
			("order".to_string(), "desc".to_string()),
			("limit".to_string(), CLAIMABLE_BALANCE_LIMIT.to_string()),
		];

		let page = self.transport.get("claimable_balances", query).await?;

		Ok(Self::records(page)?
			.into_iter()
			.filter_map(|raw| match serde_json::from_value::<ClaimableBalance>(raw) {
				Ok(balance) => Some(balance),
				Err(e) => {
					tracing::warn!(error = %e, "Skipping undecodable claimable balance");
					None
				}
			})
			.collect())
	}
}
