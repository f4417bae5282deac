//! Claimable balance operations.

use super::{asset_name, list, text, UNKNOWN_ASSET};
use crate::{
	models::{
		ClaimClaimableBalance, ClawbackClaimableBalance, CreateClaimableBalance, Notification,
	},
	services::filter::render,
};

pub(super) fn create_claimable_balance(create: &CreateClaimableBalance) -> Notification {
	let asset = create
		.asset
		.as_ref()
		.map(asset_name)
		.unwrap_or_else(|| UNKNOWN_ASSET.to_string());
	let claimants = create
		.claimants
		.iter()
		.map(|claimant| format!("{} ({})", claimant.destination, render(&claimant.predicate)));

	Notification::new(
		"Create Claimable Balance Operation",
		format!(
			"Create Claimable Balance Operation. Asset: {}, Amount: {}, Claimants: {}",
			asset,
			text(&create.amount),
			list(claimants)
		),
	)
}

pub(super) fn claim_claimable_balance(claim: &ClaimClaimableBalance) -> Notification {
	Notification::new(
		"Claim Claimable Balance Operation",
		format!(
			"Claim Claimable Balance Operation. Balance Id: {}, Claimant: {}",
			text(&claim.balance_id),
			text(&claim.claimant)
		),
	)
}

pub(super) fn clawback_claimable_balance(clawback: &ClawbackClaimableBalance) -> Notification {
	Notification::new(
		"Clawback Claimable Balance Operation",
		format!(
			"Clawback Claimable Balance Operation. Balance Id: {}",
			text(&clawback.balance_id)
		),
	)
}
