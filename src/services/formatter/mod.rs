//! Operation formatting.
//!
//! Turns a ledger operation into a `(subject, body)` notification. Dispatch is a single
//! exhaustive match over [`OperationBody`], one handler per kind, grouped by family:
//!
//! - `payments`: payments, path payments, account creation and merges, clawbacks
//! - `trust`: trust line changes and authorisation
//! - `offers`: DEX offers
//! - `account`: account options, sequence bumps and data entries
//! - `sponsorship`: reserve sponsorship
//! - `claimable`: claimable balances
//! - `liquidity`: liquidity pool deposits and withdrawals
//! - `contract`: smart contract operations
//!
//! Absent optional fields render as `null`; formatting never fails.

mod account;
mod asset;
mod claimable;
mod contract;
mod liquidity;
mod offers;
mod payments;
mod sponsorship;
mod trust;

use std::{collections::HashSet, fmt::Display};

use crate::models::{Notification, Operation, OperationBody};

pub use asset::{asset_code, asset_name, NATIVE_ASSET_CODE, NATIVE_ASSET_NAME, UNKNOWN_ASSET};

/// Marker rendered in place of absent fields
pub const NULL_FIELD: &str = "null";

/// Subject of notifications for operation kinds without a dedicated rule
pub const UNKNOWN_OPERATION_SUBJECT: &str = "Stellar Unknown operation type.";

/// Formats ledger operations into notifications
#[derive(Debug, Clone, Default)]
pub struct OperationFormatter {
	/// Asset codes whose payments produce no notification
	excluded_tokens: HashSet<String>,
}

impl OperationFormatter {
	/// Creates a formatter that suppresses payments in the given asset codes
	pub fn new<I, S>(excluded_tokens: I) -> Self
	where
		I: IntoIterator<Item = S>,
		S: Into<String>,
	{
		Self {
			excluded_tokens: excluded_tokens.into_iter().map(Into::into).collect(),
		}
	}

	/// Returns true when `operation` must not produce a notification
	pub fn is_suppressed(&self, operation: &Operation) -> bool {
		match &operation.body {
			OperationBody::Payment(payment) => self
				.excluded_tokens
				.contains(&asset_code(&payment.asset())),
			_ => false,
		}
	}

	/// Renders `operation` as seen by `watched_account`
	///
	/// # Arguments
	/// * `operation` - Operation to describe
	/// * `watched_account` - Account the notification is written for
	///
	/// # Returns
	/// * `Notification` - Subject and body describing the operation
	pub fn format(&self, operation: &Operation, watched_account: &str) -> Notification {
		match &operation.body {
			OperationBody::CreateAccount(body) => payments::create_account(body),
			OperationBody::Payment(body) => payments::payment(operation, body, watched_account),
			OperationBody::PathPaymentStrictReceive(body)
			| OperationBody::PathPaymentStrictSend(body) => payments::path_payment(body),
			OperationBody::ManageSellOffer(body) => offers::manage_sell_offer(body),
			OperationBody::CreatePassiveSellOffer(body) => offers::create_passive_sell_offer(body),
			OperationBody::ManageBuyOffer(body) => offers::manage_buy_offer(body),
			OperationBody::SetOptions(body) => account::set_options(body),
			OperationBody::ChangeTrust(body) => trust::change_trust(body),
			OperationBody::AllowTrust(body) => trust::allow_trust(body),
			OperationBody::SetTrustLineFlags(body) => trust::set_trust_line_flags(body),
			OperationBody::AccountMerge(body) => payments::account_merge(body),
			OperationBody::ManageData(body) => account::manage_data(body),
			OperationBody::BumpSequence(body) => account::bump_sequence(body),
			OperationBody::CreateClaimableBalance(body) => {
				claimable::create_claimable_balance(body)
			}
			OperationBody::ClaimClaimableBalance(body) => claimable::claim_claimable_balance(body),
			OperationBody::ClawbackClaimableBalance(body) => {
				claimable::clawback_claimable_balance(body)
			}
			OperationBody::Clawback(body) => payments::clawback(body),
			OperationBody::BeginSponsoringFutureReserves(body) => {
				sponsorship::begin_sponsoring(body)
			}
			OperationBody::EndSponsoringFutureReserves(body) => sponsorship::end_sponsoring(body),
			OperationBody::RevokeSponsorship(body) => sponsorship::revoke_sponsorship(body),
			OperationBody::LiquidityPoolDeposit(body) => liquidity::deposit(body),
			OperationBody::LiquidityPoolWithdraw(body) => liquidity::withdraw(body),
			OperationBody::InvokeHostFunction(body) => contract::invoke_host_function(body),
			OperationBody::ExtendFootprintTtl(body) => contract::extend_footprint_ttl(body),
			OperationBody::RestoreFootprint => contract::restore_footprint(),
			OperationBody::Inflation | OperationBody::Unknown => unknown(operation),
		}
	}
}

/// Fallback rule for kinds without a dedicated description
fn unknown(operation: &Operation) -> Notification {
	Notification::new(
		UNKNOWN_OPERATION_SUBJECT,
		format!(
			"Operation Received - Type: {}, Id: {}, SourceAccount: {}",
			operation.kind,
			operation.id,
			text(&operation.source_account)
		),
	)
}

/// Optional text field, or the null marker
fn text(value: &Option<String>) -> &str {
	value.as_deref().unwrap_or(NULL_FIELD)
}

/// Optional displayable field, or the null marker
fn value<T: Display>(value: &Option<T>) -> String {
	match value {
		Some(value) => value.to_string(),
		None => NULL_FIELD.to_string(),
	}
}

/// Bracketed, comma separated list
fn list<I>(items: I) -> String
where
	I: IntoIterator,
	I::Item: Display,
{
	let items: Vec<String> = items.into_iter().map(|item| item.to_string()).collect();
	format!("[{}]", items.join(", "))
}
