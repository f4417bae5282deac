//! Trust line operations.

use super::{asset_name, list, text, value};
use crate::models::{AllowTrust, ChangeTrust, Notification, SetTrustLineFlags};

pub(super) fn change_trust(change: &ChangeTrust) -> Notification {
	// Liquidity pool share trust lines carry a pool id instead of an asset code
	let asset = change
		.asset_code
		.as_ref()
		.or(change.liquidity_pool_id.as_ref())
		.cloned();

	Notification::new(
		"Stellar change trust",
		format!(
			"Changed trust, from {}, to {} on {} with limit {}",
			text(&change.trustor),
			text(&change.trustee),
			text(&asset),
			text(&change.limit)
		),
	)
}

pub(super) fn allow_trust(allow: &AllowTrust) -> Notification {
	Notification::new(
		"Stellar allow trust",
		format!(
			"Allow trust. Asset: {}, Trustor: {}, Trustee: {}, Authorize: {}",
			asset_name(&allow.asset()),
			text(&allow.trustor),
			text(&allow.trustee),
			value(&allow.authorize)
		),
	)
}

pub(super) fn set_trust_line_flags(flags: &SetTrustLineFlags) -> Notification {
	Notification::new(
		"Stellar Set Trust Line Flags",
		format!(
			"Set Trust Line Flags. Asset: {}, Trustor: {}, Set Flags: {}, Clear Flags: {}",
			asset_name(&flags.asset()),
			text(&flags.trustor),
			list(&flags.set_flags_s),
			list(&flags.clear_flags_s)
		),
	)
}
