//! Reserve sponsorship operations.

use super::text;
use crate::models::{
	BeginSponsoringFutureReserves, EndSponsoringFutureReserves, Notification, RevokeSponsorship,
};

pub(super) fn begin_sponsoring(begin: &BeginSponsoringFutureReserves) -> Notification {
	Notification::new(
		"Begin Sponsoring Future Reserves Operation",
		format!(
			"Begin Sponsoring Future Reserves Operation. Sponsored Id: {}",
			text(&begin.sponsored_id)
		),
	)
}

pub(super) fn end_sponsoring(end: &EndSponsoringFutureReserves) -> Notification {
	Notification::new(
		"End Sponsoring Future Reserves Operation",
		format!(
			"End Sponsoring Future Reserves Operation. Begin Sponsor: {}",
			text(&end.begin_sponsor)
		),
	)
}

pub(super) fn revoke_sponsorship(revoke: &RevokeSponsorship) -> Notification {
	Notification::new(
		"Stellar Revoke Sponsorship",
		format!(
			"Revoke Sponsorship. Account Id: {}, Claimable Balance Id: {}, Data Account Id: {}, \
			 Data Name: {}, Offer Id: {}, Trustline Account Id: {}, Trustline Asset: {}, \
			 Trustline Liquidity Pool Id: {}, Signer Account Id: {}, Signer Key: {}",
			text(&revoke.account_id),
			text(&revoke.claimable_balance_id),
			text(&revoke.data_account_id),
			text(&revoke.data_name),
			text(&revoke.offer_id),
			text(&revoke.trustline_account_id),
			text(&revoke.trustline_asset),
			text(&revoke.trustline_liquidity_pool_id),
			text(&revoke.signer_account_id),
			text(&revoke.signer_key)
		),
	)
}
