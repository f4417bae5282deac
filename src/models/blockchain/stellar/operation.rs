//! Stellar operation records.
//!
//! Note: The field names follow Horizon's operation resources:
//! <https://developers.stellar.org/docs/data/apis/horizon/api-reference/resources/operations>
//!
//! Every operation shares a common header (id, paging token, source account, type, creation
//! time and the joined transaction's memo) and carries a kind-specific body. Body fields are
//! all optional so that partially populated records still decode; only type mismatches make
//! a body undecodable.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer};
use serde_json::Value;
use std::fmt;

use super::{asset::AssetRef, claimable_balance::Claimant};

/// Horizon memo type carrying free text
pub const TEXT_MEMO_TYPE: &str = "text";

/// Deserializes a field Horizon reports either as a JSON string or as a JSON number
fn string_or_number<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
	D: Deserializer<'de>,
{
	Ok(match Option::<Value>::deserialize(deserializer)? {
		Some(Value::String(text)) => Some(text),
		Some(Value::Number(number)) => Some(number.to_string()),
		Some(Value::Bool(flag)) => Some(flag.to_string()),
		_ => None,
	})
}

/// Memo attached to the transaction containing an operation
#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize)]
pub struct Memo {
	/// Horizon memo type (`none`, `text`, `id`, `hash`, `return`)
	#[serde(default)]
	pub memo_type: String,
	/// Memo value as reported by Horizon
	#[serde(default)]
	pub memo: Option<String>,
}

impl Memo {
	/// Returns the memo text when this is a text memo
	pub fn text(&self) -> Option<&str> {
		if self.memo_type == TEXT_MEMO_TYPE {
			self.memo.as_deref()
		} else {
			None
		}
	}
}

/// An asset together with an amount, as used by liquidity pool operations
#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
#[serde(default)]
pub struct AssetAmount {
	pub asset: AssetRef,
	pub amount: String,
}

#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
#[serde(default)]
pub struct CreateAccount {
	pub funder: Option<String>,
	pub account: Option<String>,
	pub starting_balance: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
#[serde(default)]
pub struct Payment {
	pub asset_type: Option<String>,
	pub asset_code: Option<String>,
	pub asset_issuer: Option<String>,
	pub from: Option<String>,
	pub to: Option<String>,
	pub amount: Option<String>,
}

impl Payment {
	pub fn asset(&self) -> AssetRef {
		AssetRef::from_parts(
			self.asset_type.as_deref(),
			self.asset_code.as_deref(),
			self.asset_issuer.as_deref(),
		)
	}
}

/// Shared body of both path payment kinds (strict receive and strict send)
#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
#[serde(default)]
pub struct PathPayment {
	pub asset_type: Option<String>,
	pub asset_code: Option<String>,
	pub asset_issuer: Option<String>,
	pub source_asset_type: Option<String>,
	pub source_asset_code: Option<String>,
	pub source_asset_issuer: Option<String>,
	pub from: Option<String>,
	pub to: Option<String>,
	pub amount: Option<String>,
	pub source_amount: Option<String>,
	pub source_max: Option<String>,
	pub destination_min: Option<String>,
	pub path: Vec<AssetRef>,
}

impl PathPayment {
	/// Asset received by the destination
	pub fn asset(&self) -> AssetRef {
		AssetRef::from_parts(
			self.asset_type.as_deref(),
			self.asset_code.as_deref(),
			self.asset_issuer.as_deref(),
		)
	}

	/// Asset debited from the sender
	pub fn source_asset(&self) -> AssetRef {
		AssetRef::from_parts(
			self.source_asset_type.as_deref(),
			self.source_asset_code.as_deref(),
			self.source_asset_issuer.as_deref(),
		)
	}
}

/// Shared body of manage sell / manage buy / create passive sell offer operations
#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
#[serde(default)]
pub struct Offer {
	#[serde(deserialize_with = "string_or_number")]
	pub offer_id: Option<String>,
	pub amount: Option<String>,
	pub price: Option<String>,
	pub buying_asset_type: Option<String>,
	pub buying_asset_code: Option<String>,
	pub buying_asset_issuer: Option<String>,
	pub selling_asset_type: Option<String>,
	pub selling_asset_code: Option<String>,
	pub selling_asset_issuer: Option<String>,
}

impl Offer {
	pub fn buying_asset(&self) -> AssetRef {
		AssetRef::from_parts(
			self.buying_asset_type.as_deref(),
			self.buying_asset_code.as_deref(),
			self.buying_asset_issuer.as_deref(),
		)
	}

	pub fn selling_asset(&self) -> AssetRef {
		AssetRef::from_parts(
			self.selling_asset_type.as_deref(),
			self.selling_asset_code.as_deref(),
			self.selling_asset_issuer.as_deref(),
		)
	}
}

#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
#[serde(default)]
pub struct SetOptions {
	pub clear_flags: Option<Vec<u32>>,
	pub set_flags: Option<Vec<u32>>,
	pub high_threshold: Option<u32>,
	pub med_threshold: Option<u32>,
	pub low_threshold: Option<u32>,
	pub master_key_weight: Option<u32>,
	pub home_domain: Option<String>,
	pub inflation_dest: Option<String>,
	pub signer_key: Option<String>,
	pub signer_weight: Option<u32>,
}

#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
#[serde(default)]
pub struct ChangeTrust {
	pub asset_type: Option<String>,
	pub asset_code: Option<String>,
	pub asset_issuer: Option<String>,
	pub liquidity_pool_id: Option<String>,
	pub trustor: Option<String>,
	pub trustee: Option<String>,
	pub limit: Option<String>,
}

impl ChangeTrust {
	pub fn asset(&self) -> AssetRef {
		AssetRef::from_parts(
			self.asset_type.as_deref(),
			self.asset_code.as_deref(),
			self.asset_issuer.as_deref(),
		)
	}
}

#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
#[serde(default)]
pub struct AllowTrust {
	pub asset_type: Option<String>,
	pub asset_code: Option<String>,
	pub asset_issuer: Option<String>,
	pub trustor: Option<String>,
	pub trustee: Option<String>,
	pub authorize: Option<bool>,
}

impl AllowTrust {
	pub fn asset(&self) -> AssetRef {
		AssetRef::from_parts(
			self.asset_type.as_deref(),
			self.asset_code.as_deref(),
			self.asset_issuer.as_deref(),
		)
	}
}

#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
#[serde(default)]
pub struct SetTrustLineFlags {
	pub asset_type: Option<String>,
	pub asset_code: Option<String>,
	pub asset_issuer: Option<String>,
	pub trustor: Option<String>,
	pub set_flags_s: Vec<String>,
	pub clear_flags_s: Vec<String>,
}

impl SetTrustLineFlags {
	pub fn asset(&self) -> AssetRef {
		AssetRef::from_parts(
			self.asset_type.as_deref(),
			self.asset_code.as_deref(),
			self.asset_issuer.as_deref(),
		)
	}
}

#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
#[serde(default)]
pub struct AccountMerge {
	pub account: Option<String>,
	pub into: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
#[serde(default)]
pub struct ManageData {
	pub name: Option<String>,
	/// Base64 value as reported by Horizon, kept opaque
	pub value: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
#[serde(default)]
pub struct BumpSequence {
	#[serde(deserialize_with = "string_or_number")]
	pub bump_to: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
#[serde(default)]
pub struct CreateClaimableBalance {
	pub asset: Option<AssetRef>,
	pub amount: Option<String>,
	pub claimants: Vec<Claimant>,
}

#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
#[serde(default)]
pub struct ClaimClaimableBalance {
	pub balance_id: Option<String>,
	pub claimant: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
#[serde(default)]
pub struct ClawbackClaimableBalance {
	pub balance_id: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
#[serde(default)]
pub struct Clawback {
	pub asset_type: Option<String>,
	pub asset_code: Option<String>,
	pub asset_issuer: Option<String>,
	pub from: Option<String>,
	pub amount: Option<String>,
}

impl Clawback {
	pub fn asset(&self) -> AssetRef {
		AssetRef::from_parts(
			self.asset_type.as_deref(),
			self.asset_code.as_deref(),
			self.asset_issuer.as_deref(),
		)
	}
}

#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
#[serde(default)]
pub struct BeginSponsoringFutureReserves {
	pub sponsored_id: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
#[serde(default)]
pub struct EndSponsoringFutureReserves {
	pub begin_sponsor: Option<String>,
}

/// Revoked sponsorship; exactly one of the sub-targets is normally populated
#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
#[serde(default)]
pub struct RevokeSponsorship {
	pub account_id: Option<String>,
	pub claimable_balance_id: Option<String>,
	pub data_account_id: Option<String>,
	pub data_name: Option<String>,
	#[serde(deserialize_with = "string_or_number")]
	pub offer_id: Option<String>,
	pub trustline_account_id: Option<String>,
	pub trustline_asset: Option<String>,
	pub trustline_liquidity_pool_id: Option<String>,
	pub signer_account_id: Option<String>,
	pub signer_key: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
#[serde(default)]
pub struct LiquidityPoolDeposit {
	pub liquidity_pool_id: Option<String>,
	pub reserves_max: Vec<AssetAmount>,
	pub min_price: Option<String>,
	pub max_price: Option<String>,
	pub reserves_deposited: Vec<AssetAmount>,
	pub shares_received: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
#[serde(default)]
pub struct LiquidityPoolWithdraw {
	pub liquidity_pool_id: Option<String>,
	pub reserves_min: Vec<AssetAmount>,
	pub shares: Option<String>,
	pub reserves_received: Vec<AssetAmount>,
}

/// Parameter of a host function invocation, kept as Horizon's XDR-encoded value
#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
#[serde(default)]
pub struct HostFunctionParameter {
	#[serde(rename = "type")]
	pub kind: String,
	pub value: String,
}

/// Asset movement caused by a contract invocation
#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
#[serde(default)]
pub struct AssetBalanceChange {
	pub asset_type: Option<String>,
	pub asset_code: Option<String>,
	pub asset_issuer: Option<String>,
	#[serde(rename = "type")]
	pub kind: Option<String>,
	pub from: Option<String>,
	pub to: Option<String>,
	pub amount: Option<String>,
}

impl AssetBalanceChange {
	pub fn asset(&self) -> AssetRef {
		AssetRef::from_parts(
			self.asset_type.as_deref(),
			self.asset_code.as_deref(),
			self.asset_issuer.as_deref(),
		)
	}
}

#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
#[serde(default)]
pub struct InvokeHostFunction {
	pub function: Option<String>,
	pub parameters: Vec<HostFunctionParameter>,
	pub address: Option<String>,
	pub salt: Option<String>,
	pub asset_balance_changes: Vec<AssetBalanceChange>,
}

#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
#[serde(default)]
pub struct ExtendFootprintTtl {
	#[serde(deserialize_with = "string_or_number")]
	pub extend_to: Option<String>,
}

/// Kind-specific payload of an operation
#[derive(Debug, Clone, PartialEq)]
pub enum OperationBody {
	CreateAccount(CreateAccount),
	Payment(Payment),
	PathPaymentStrictReceive(PathPayment),
	PathPaymentStrictSend(PathPayment),
	ManageSellOffer(Offer),
	CreatePassiveSellOffer(Offer),
	SetOptions(SetOptions),
	ChangeTrust(ChangeTrust),
	AllowTrust(AllowTrust),
	AccountMerge(AccountMerge),
	Inflation,
	ManageData(ManageData),
	BumpSequence(BumpSequence),
	ManageBuyOffer(Offer),
	CreateClaimableBalance(CreateClaimableBalance),
	ClaimClaimableBalance(ClaimClaimableBalance),
	BeginSponsoringFutureReserves(BeginSponsoringFutureReserves),
	EndSponsoringFutureReserves(EndSponsoringFutureReserves),
	RevokeSponsorship(RevokeSponsorship),
	Clawback(Clawback),
	ClawbackClaimableBalance(ClawbackClaimableBalance),
	SetTrustLineFlags(SetTrustLineFlags),
	LiquidityPoolDeposit(LiquidityPoolDeposit),
	LiquidityPoolWithdraw(LiquidityPoolWithdraw),
	InvokeHostFunction(InvokeHostFunction),
	ExtendFootprintTtl(ExtendFootprintTtl),
	RestoreFootprint,
	/// A kind this crate does not know about
	Unknown,
}

impl OperationBody {
	/// Decodes the body of an operation of the given Horizon `type`.
	///
	/// Unknown kinds decode to [`OperationBody::Unknown`]; legacy kind names
	/// (`path_payment`, `manage_offer`, `create_passive_offer`) map to their current kinds.
	pub fn decode(kind: &str, value: Value) -> Result<Self, serde_json::Error> {
		use serde_json::from_value;

		Ok(match kind {
			"create_account" => Self::CreateAccount(from_value(value)?),
			"payment" => Self::Payment(from_value(value)?),
			"path_payment_strict_receive" | "path_payment" => {
				Self::PathPaymentStrictReceive(from_value(value)?)
			}
			"path_payment_strict_send" => Self::PathPaymentStrictSend(from_value(value)?),
			"manage_sell_offer" | "manage_offer" => Self::ManageSellOffer(from_value(value)?),
			"create_passive_sell_offer" | "create_passive_offer" => {
				Self::CreatePassiveSellOffer(from_value(value)?)
			}
			"set_options" => Self::SetOptions(from_value(value)?),
			"change_trust" => Self::ChangeTrust(from_value(value)?),
			"allow_trust" => Self::AllowTrust(from_value(value)?),
			"account_merge" => Self::AccountMerge(from_value(value)?),
			"inflation" => Self::Inflation,
			"manage_data" => Self::ManageData(from_value(value)?),
			"bump_sequence" => Self::BumpSequence(from_value(value)?),
			"manage_buy_offer" => Self::ManageBuyOffer(from_value(value)?),
			"create_claimable_balance" => Self::CreateClaimableBalance(from_value(value)?),
			"claim_claimable_balance" => Self::ClaimClaimableBalance(from_value(value)?),
			"begin_sponsoring_future_reserves" => {
				Self::BeginSponsoringFutureReserves(from_value(value)?)
			}
			"end_sponsoring_future_reserves" => {
				Self::EndSponsoringFutureReserves(from_value(value)?)
			}
			"revoke_sponsorship" => Self::RevokeSponsorship(from_value(value)?),
			"clawback" => Self::Clawback(from_value(value)?),
			"clawback_claimable_balance" => Self::ClawbackClaimableBalance(from_value(value)?),
			"set_trust_line_flags" => Self::SetTrustLineFlags(from_value(value)?),
			"liquidity_pool_deposit" => Self::LiquidityPoolDeposit(from_value(value)?),
			"liquidity_pool_withdraw" => Self::LiquidityPoolWithdraw(from_value(value)?),
			"invoke_host_function" => Self::InvokeHostFunction(from_value(value)?),
			"extend_footprint_ttl" => Self::ExtendFootprintTtl(from_value(value)?),
			"restore_footprint" => Self::RestoreFootprint,
			_ => Self::Unknown,
		})
	}
}

/// A ledger operation affecting the watched account
#[derive(Debug, Clone, PartialEq)]
pub struct Operation {
	/// Operation id
	pub id: String,
	/// Resumption marker of this operation in the account's feed
	pub paging_token: String,
	/// Account that sourced the operation
	pub source_account: Option<String>,
	/// Horizon `type` name, kept verbatim
	pub kind: String,
	/// Close time of the containing ledger
	pub created_at: Option<DateTime<Utc>>,
	/// Hash of the containing transaction
	pub transaction_hash: Option<String>,
	/// Memo of the containing transaction, when the transaction was joined
	pub memo: Option<Memo>,
	/// Kind-specific payload
	pub body: OperationBody,
}

/// Reason an operation record could not be decoded
#[derive(Debug, Clone, PartialEq)]
pub struct OperationDecodeError {
	/// Paging token, when the header carried one
	pub paging_token: Option<String>,
	/// Operation id, when the header carried one
	pub id: Option<String>,
	/// Horizon `type`, when the header carried one
	pub kind: Option<String>,
	/// Decoder message
	pub reason: String,
}

impl fmt::Display for OperationDecodeError {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(
			f,
			"cannot decode operation {} ({}): {}",
			self.id.as_deref().unwrap_or("<no id>"),
			self.kind.as_deref().unwrap_or("<no type>"),
			self.reason
		)
	}
}

impl std::error::Error for OperationDecodeError {}

#[derive(Deserialize)]
struct OperationHeader {
	id: String,
	paging_token: String,
	#[serde(default)]
	source_account: Option<String>,
	#[serde(rename = "type")]
	kind: String,
	#[serde(default)]
	created_at: Option<DateTime<Utc>>,
	#[serde(default)]
	transaction_hash: Option<String>,
	#[serde(default)]
	transaction: Option<Memo>,
}

impl Operation {
	/// Decodes one record of Horizon's operations collection.
	pub fn from_json(value: Value) -> Result<Self, OperationDecodeError> {
		let text_field = |name: &str| value.get(name).and_then(Value::as_str).map(String::from);
		let paging_token = text_field("paging_token");
		let id = text_field("id");
		let kind = text_field("type");

		let header: OperationHeader =
			serde_json::from_value(value.clone()).map_err(|e| OperationDecodeError {
				paging_token: paging_token.clone(),
				id: id.clone(),
				kind: kind.clone(),
				reason: e.to_string(),
			})?;

		let body =
			OperationBody::decode(&header.kind, value).map_err(|e| OperationDecodeError {
				paging_token,
				id,
				kind,
				reason: e.to_string(),
			})?;

		Ok(Self {
			id: header.id,
			paging_token: header.paging_token,
			source_account: header.source_account,
			kind: header.kind,
			created_at: header.created_at,
			transaction_hash: header.transaction_hash,
			memo: header.transaction,
			body,
		})
	}

	/// Text of the transaction memo, when the memo is a text memo
	pub fn memo_text(&self) -> Option<&str> {
		self.memo.as_ref().and_then(Memo::text)
	}
}
