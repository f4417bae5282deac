//! Stellar ledger data model.
//!
//! Types decoded from Horizon resources: operations, assets, claim predicates and
//! claimable balances.

mod asset;
mod claimable_balance;
mod operation;
mod predicate;

pub use asset::{AssetRef, NATIVE_ASSET_TYPE};
pub use claimable_balance::{ClaimableBalance, Claimant};
pub use operation::{
	AccountMerge, AllowTrust, AssetAmount, AssetBalanceChange, BeginSponsoringFutureReserves,
	BumpSequence, ChangeTrust, ClaimClaimableBalance, Clawback, ClawbackClaimableBalance,
	CreateAccount, CreateClaimableBalance, EndSponsoringFutureReserves, ExtendFootprintTtl,
	HostFunctionParameter, InvokeHostFunction, LiquidityPoolDeposit, LiquidityPoolWithdraw,
	ManageData, Memo, Offer, Operation, OperationBody, OperationDecodeError, PathPayment,
	Payment, RevokeSponsorship, SetOptions, SetTrustLineFlags, TEXT_MEMO_TYPE,
};
pub use predicate::Predicate;

/// What the ledger source hands the monitor for each entry of the operations feed
#[derive(Debug, Clone, PartialEq)]
pub enum OperationRecord {
	/// A fully decoded operation
	Decoded(Box<Operation>),
	/// An entry whose header carried a paging token but whose payload could not be decoded
	Malformed {
		paging_token: String,
		id: Option<String>,
		kind: Option<String>,
		reason: String,
	},
}

impl OperationRecord {
	/// Paging token of the record, used to advance the cursor
	pub fn paging_token(&self) -> &str {
		match self {
			Self::Decoded(operation) => &operation.paging_token,
			Self::Malformed { paging_token, .. } => paging_token,
		}
	}
}

impl From<Operation> for OperationRecord {
	fn from(operation: Operation) -> Self {
		Self::Decoded(Box::new(operation))
	}
}
