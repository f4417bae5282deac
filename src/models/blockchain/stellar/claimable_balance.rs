//! Claimable balance records as returned by Horizon's `/claimable_balances` endpoint.

use chrono::{DateTime, Utc};
use serde::Deserialize;

use super::{asset::AssetRef, predicate::Predicate};

/// A claimant entitled to a claimable balance under a predicate
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Claimant {
	/// Account that may claim the balance
	pub destination: String,
	/// Condition under which the claim is allowed
	pub predicate: Predicate,
}

/// An escrow-like ledger entry awaiting a claim
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ClaimableBalance {
	/// Balance id (hex encoded)
	#[serde(default)]
	pub id: String,
	/// Asset held by the balance
	pub asset: AssetRef,
	/// Amount held, as the decimal string reported by Horizon
	pub amount: String,
	/// Sponsoring account, if any
	#[serde(default)]
	pub sponsor: Option<String>,
	/// Time of the last modification of the entry
	#[serde(default)]
	pub last_modified_time: Option<DateTime<Utc>>,
	/// Claimants in ledger order
	#[serde(default)]
	pub claimants: Vec<Claimant>,
	/// Paging token of the record
	#[serde(default)]
	pub paging_token: Option<String>,
}
