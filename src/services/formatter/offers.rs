//! DEX offer operations.

use super::{asset_name, text};
use crate::models::{Notification, Offer};

pub(super) fn manage_sell_offer(offer: &Offer) -> Notification {
	Notification::new(
		"Stellar manage sell offer operation.",
		format!(
			"Managed sell offer buy {} {} at {} using {} with id {}",
			text(&offer.amount),
			asset_name(&offer.buying_asset()),
			text(&offer.price),
			asset_name(&offer.selling_asset()),
			text(&offer.offer_id)
		),
	)
}

pub(super) fn create_passive_sell_offer(offer: &Offer) -> Notification {
	Notification::new(
		"Stellar passive sell offer created.",
		format!(
			"Created passive sell offer buy {} {} at {} using {} with id {}",
			text(&offer.amount),
			asset_name(&offer.buying_asset()),
			text(&offer.price),
			asset_name(&offer.selling_asset()),
			text(&offer.offer_id)
		),
	)
}

pub(super) fn manage_buy_offer(offer: &Offer) -> Notification {
	Notification::new(
		"Manage Buy Offer Operation",
		format!(
			"Buy offer operation. offerId: {}, Buying Asset: {}, Amount: {}, Selling Asset: {}, Price: {}",
			text(&offer.offer_id),
			asset_name(&offer.buying_asset()),
			text(&offer.amount),
			asset_name(&offer.selling_asset()),
			text(&offer.price)
		),
	)
}
