//! Value transfer operations.

use super::{asset_name, text, NULL_FIELD};
use crate::models::{
	AccountMerge, Clawback, CreateAccount, Notification, Operation, PathPayment, Payment,
};

/// Ledger close time in the layout of the legacy notifications
const DATE_FORMAT: &str = "%a %b %d %H:%M:%S UTC %Y";

pub(super) fn payment(operation: &Operation, payment: &Payment, watched_account: &str) -> Notification {
	let direction = if payment.to.as_deref() == Some(watched_account) {
		"Received"
	} else {
		"Sent"
	};
	let date = operation
		.created_at
		.map(|created_at| created_at.format(DATE_FORMAT).to_string())
		.unwrap_or_else(|| NULL_FIELD.to_string());

	Notification::new(
		"Stellar payment operation.",
		format!(
			"{} payment of {} {} from {} to {} on {}.\n Memo: {}",
			direction,
			text(&payment.amount),
			asset_name(&payment.asset()),
			text(&payment.from),
			text(&payment.to),
			date,
			operation.memo_text().unwrap_or_default()
		),
	)
}

pub(super) fn path_payment(payment: &PathPayment) -> Notification {
	Notification::new(
		"Stellar Path Payment operation",
		format!(
			"Created path payment of {} {}, from {} to {}. Source: {} {}, Path: {}",
			text(&payment.amount),
			asset_name(&payment.asset()),
			text(&payment.from),
			text(&payment.to),
			text(&payment.source_amount),
			asset_name(&payment.source_asset()),
			payment.path.iter().map(asset_name).collect::<Vec<_>>().join(", ")
		),
	)
}

pub(super) fn create_account(create: &CreateAccount) -> Notification {
	Notification::new(
		"Stellar account created",
		format!(
			"Account {} created by funder {} with balance {}",
			text(&create.account),
			text(&create.funder),
			text(&create.starting_balance)
		),
	)
}

pub(super) fn account_merge(merge: &AccountMerge) -> Notification {
	Notification::new(
		"Stellar merge account.",
		format!(
			"Account {} merged into {}.",
			text(&merge.account),
			text(&merge.into)
		),
	)
}

pub(super) fn clawback(clawback: &Clawback) -> Notification {
	Notification::new(
		"Clawback Operation",
		format!(
			"Clawback Operation. Asset: {}, Amount: {}, From: {}",
			asset_name(&clawback.asset()),
			text(&clawback.amount),
			text(&clawback.from)
		),
	)
}
