//! Selection of currently claimable balances.

use chrono::{DateTime, Utc};

use crate::{
	models::{ClaimableBalance, Claimant, Predicate},
	services::{
		filter::predicate::{evaluate, render},
		formatter::asset_code,
	},
};

/// How a claimant's destination is compared with the watched account
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ClaimantMatching {
	/// ASCII case-insensitive comparison, as the legacy report did
	#[default]
	LegacyCaseInsensitive,
	/// Byte-for-byte comparison
	Exact,
}

impl ClaimantMatching {
	fn matches(self, destination: &str, account: &str) -> bool {
		match self {
			Self::LegacyCaseInsensitive => destination.eq_ignore_ascii_case(account),
			Self::Exact => destination == account,
		}
	}
}

/// A balance the watched account can claim, with the claimant entry that allows it
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ClaimableMatch<'a> {
	pub balance: &'a ClaimableBalance,
	pub claimant: &'a Claimant,
}

impl ClaimableMatch<'_> {
	/// Predicate that was satisfied
	pub fn predicate(&self) -> &Predicate {
		&self.claimant.predicate
	}
}

/// Selects the balances `account` can claim at `as_of`
///
/// # Arguments
/// * `balances` - Candidate balances, in source order
/// * `account` - Watched account id
/// * `as_of` - Instant the predicates are evaluated at
/// * `blocked_asset_codes` - Asset codes that are never reported
/// * `matching` - Destination comparison mode
///
/// # Returns
/// * `Vec<ClaimableMatch>` - One entry per satisfied claimant, preserving source order
pub fn filter<'a>(
	balances: &'a [ClaimableBalance],
	account: &str,
	as_of: DateTime<Utc>,
	blocked_asset_codes: &[String],
	matching: ClaimantMatching,
) -> Vec<ClaimableMatch<'a>> {
	balances
		.iter()
		.filter(|balance| {
			let code = asset_code(&balance.asset);
			!blocked_asset_codes.iter().any(|blocked| *blocked == code)
		})
		.flat_map(|balance| {
			balance
				.claimants
				.iter()
				.filter(move |claimant| matching.matches(&claimant.destination, account))
				.filter(move |claimant| evaluate(&claimant.predicate, as_of))
				.map(move |claimant| ClaimableMatch { balance, claimant })
		})
		.collect()
}

/// Renders a report line: `Claimable Balance <amount> <code> <predicate>`
pub fn render_report_line(claimable: &ClaimableMatch<'_>) -> String {
	format!(
		"Claimable Balance {} {} {}",
		claimable.balance.amount,
		asset_code(&claimable.balance.asset),
		render(claimable.predicate())
	)
}
