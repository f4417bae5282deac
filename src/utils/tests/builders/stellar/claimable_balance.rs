//! Test helper utilities for claimable balances
//!
//! - `ClaimableBalanceBuilder`: Builder for creating test ClaimableBalance instances

use crate::models::{AssetRef, ClaimableBalance, Claimant, Predicate};

/// Builder for creating test ClaimableBalance instances
pub struct ClaimableBalanceBuilder {
	id: String,
	asset: AssetRef,
	amount: String,
	claimants: Vec<Claimant>,
}

impl Default for ClaimableBalanceBuilder {
	fn default() -> Self {
		Self {
			id: "00000000929b20b72e5890ab51c24f1cc46fa01c4f318d8d33367d24dd614cfdf5491072"
				.to_string(),
			asset: AssetRef::Native,
			amount: "10.0000000".to_string(),
			claimants: Vec::new(),
		}
	}
}

impl ClaimableBalanceBuilder {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn id(mut self, id: &str) -> Self {
		self.id = id.to_string();
		self
	}

	pub fn asset(mut self, asset: AssetRef) -> Self {
		self.asset = asset;
		self
	}

	pub fn issued(self, code: &str, issuer: &str) -> Self {
		self.asset(AssetRef::Issued {
			code: code.to_string(),
			issuer: issuer.to_string(),
		})
	}

	pub fn amount(mut self, amount: &str) -> Self {
		self.amount = amount.to_string();
		self
	}

	pub fn claimant(mut self, destination: &str, predicate: Predicate) -> Self {
		self.claimants.push(Claimant {
			destination: destination.to_string(),
			predicate,
		});
		self
	}

	pub fn build(self) -> ClaimableBalance {
		ClaimableBalance {
			id: self.id,
			asset: self.asset,
			amount: self.amount,
			sponsor: None,
			last_modified_time: None,
			claimants: self.claimants,
			paging_token: None,
		}
	}
}
