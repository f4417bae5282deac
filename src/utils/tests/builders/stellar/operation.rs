//! Test helper utilities for Stellar operations
//!
//! - `OperationBuilder`: Builder for creating test Operation instances

use chrono::{DateTime, Utc};

use crate::models::{Memo, Operation, OperationBody, Payment, TEXT_MEMO_TYPE};

/// Horizon `type` name matching a body variant
fn default_kind(body: &OperationBody) -> &'static str {
	match body {
		OperationBody::CreateAccount(_) => "create_account",
		OperationBody::Payment(_) => "payment",
		OperationBody::PathPaymentStrictReceive(_) => "path_payment_strict_receive",
		OperationBody::PathPaymentStrictSend(_) => "path_payment_strict_send",
		OperationBody::ManageSellOffer(_) => "manage_sell_offer",
		OperationBody::CreatePassiveSellOffer(_) => "create_passive_sell_offer",
		OperationBody::SetOptions(_) => "set_options",
		OperationBody::ChangeTrust(_) => "change_trust",
		OperationBody::AllowTrust(_) => "allow_trust",
		OperationBody::AccountMerge(_) => "account_merge",
		OperationBody::Inflation => "inflation",
		OperationBody::ManageData(_) => "manage_data",
		OperationBody::BumpSequence(_) => "bump_sequence",
		OperationBody::ManageBuyOffer(_) => "manage_buy_offer",
		OperationBody::CreateClaimableBalance(_) => "create_claimable_balance",
		OperationBody::ClaimClaimableBalance(_) => "claim_claimable_balance",
		OperationBody::BeginSponsoringFutureReserves(_) => "begin_sponsoring_future_reserves",
		OperationBody::EndSponsoringFutureReserves(_) => "end_sponsoring_future_reserves",
		OperationBody::RevokeSponsorship(_) => "revoke_sponsorship",
		OperationBody::Clawback(_) => "clawback",
		OperationBody::ClawbackClaimableBalance(_) => "clawback_claimable_balance",
		OperationBody::SetTrustLineFlags(_) => "set_trust_line_flags",
		OperationBody::LiquidityPoolDeposit(_) => "liquidity_pool_deposit",
		OperationBody::LiquidityPoolWithdraw(_) => "liquidity_pool_withdraw",
		OperationBody::InvokeHostFunction(_) => "invoke_host_function",
		OperationBody::ExtendFootprintTtl(_) => "extend_footprint_ttl",
		OperationBody::RestoreFootprint => "restore_footprint",
		OperationBody::Unknown => "unknown",
	}
}

/// Builder for creating test Operation instances
///
/// Unless set explicitly, the `kind` follows the body variant and the paging token
/// follows the id.
pub struct OperationBuilder {
	id: String,
	paging_token: Option<String>,
	source_account: Option<String>,
	kind: Option<String>,
	created_at: Option<DateTime<Utc>>,
	transaction_hash: Option<String>,
	memo: Option<Memo>,
	body: OperationBody,
}

impl Default for OperationBuilder {
	fn default() -> Self {
		Self {
			id: "12884905985".to_string(),
			paging_token: None,
			source_account: None,
			kind: None,
			created_at: None,
			transaction_hash: None,
			memo: None,
			body: OperationBody::Payment(Payment {
				asset_type: Some("native".to_string()),
				amount: Some("1.0000000".to_string()),
				..Default::default()
			}),
		}
	}
}

impl OperationBuilder {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn id(mut self, id: &str) -> Self {
		self.id = id.to_string();
		self
	}

	pub fn paging_token(mut self, paging_token: &str) -> Self {
		self.paging_token = Some(paging_token.to_string());
		self
	}

	/// Sets both the id and the paging token, as Horizon does for operations
	pub fn token(self, token: &str) -> Self {
		self.id(token).paging_token(token)
	}

	pub fn source_account(mut self, source_account: &str) -> Self {
		self.source_account = Some(source_account.to_string());
		self
	}

	pub fn kind(mut self, kind: &str) -> Self {
		self.kind = Some(kind.to_string());
		self
	}

	pub fn created_at(mut self, created_at: DateTime<Utc>) -> Self {
		self.created_at = Some(created_at);
		self
	}

	pub fn transaction_hash(mut self, transaction_hash: &str) -> Self {
		self.transaction_hash = Some(transaction_hash.to_string());
		self
	}

	pub fn memo(mut self, memo: Memo) -> Self {
		self.memo = Some(memo);
		self
	}

	pub fn text_memo(self, text: &str) -> Self {
		self.memo(Memo {
			memo_type: TEXT_MEMO_TYPE.to_string(),
			memo: Some(text.to_string()),
		})
	}

	pub fn body(mut self, body: OperationBody) -> Self {
		self.body = body;
		self
	}

	pub fn build(self) -> Operation {
		Operation {
			paging_token: self.paging_token.unwrap_or_else(|| self.id.clone()),
			id: self.id,
			source_account: self.source_account,
			kind: self
				.kind
				.unwrap_or_else(|| default_kind(&self.body).to_string()),
			created_at: self.created_at,
			transaction_hash: self.transaction_hash,
			memo: self.memo,
			body: self.body,
		}
	}
}
