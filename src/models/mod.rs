//! Domain models and data structures for the account notifier.
//!
//! This module contains all the core data structures used throughout the application:
//!
//! - `blockchain`: Stellar ledger records (operations, assets, predicates, claimable balances)
//! - `config`: Settings loading and validation
//! - `core`: Core domain models (Cursor, Notification)

mod blockchain;
mod config;
mod core;

// Re-export ledger types
pub use blockchain::stellar::{
	AccountMerge, AllowTrust, AssetAmount, AssetBalanceChange, AssetRef,
	BeginSponsoringFutureReserves, BumpSequence, ChangeTrust, ClaimClaimableBalance,
	ClaimableBalance, Claimant, Clawback, ClawbackClaimableBalance, CreateAccount,
	CreateClaimableBalance, EndSponsoringFutureReserves, ExtendFootprintTtl,
	HostFunctionParameter, InvokeHostFunction, LiquidityPoolDeposit, LiquidityPoolWithdraw,
	ManageData, Memo, Offer, Operation, OperationBody, OperationDecodeError, OperationRecord,
	PathPayment, Payment, Predicate, RevokeSponsorship, SetOptions, SetTrustLineFlags,
	NATIVE_ASSET_TYPE, TEXT_MEMO_TYPE,
};

// Re-export core types
pub use core::{Cursor, Notification};

// Re-export config types
pub use config::{keys, split_list, ConfigError, SettingsLoader, SmtpSettings, WatchSettings};
