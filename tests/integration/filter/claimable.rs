//! Integration tests for the claimable balance filter.

use chrono::{Duration, TimeZone, Utc};

use stellar_notifier::{
	models::{AssetRef, Predicate},
	services::filter::{filter, render_report_line, ClaimantMatching},
	utils::tests::builders::stellar::claimable_balance::ClaimableBalanceBuilder,
};

use crate::integration::mocks::{ISSUER, OTHER_ACCOUNT, WATCHED_ACCOUNT};

#[test]
fn test_report_keeps_source_order() {
	let now = Utc.with_ymd_and_hms(2024, 6, 1, 0, 0, 0).unwrap();
	let balances = vec![
		ClaimableBalanceBuilder::new()
			.id("newest")
			.issued("AQUA", ISSUER)
			.amount("100.0000000")
			.claimant(
				WATCHED_ACCOUNT,
				Predicate::Not(Box::new(Predicate::AbsoluteBefore(
					now - Duration::days(30),
				))),
			)
			.build(),
		ClaimableBalanceBuilder::new()
			.id("expired")
			.claimant(
				WATCHED_ACCOUNT,
				Predicate::AbsoluteBefore(now - Duration::seconds(1)),
			)
			.build(),
		ClaimableBalanceBuilder::new()
			.id("oldest")
			.amount("1.5000000")
			.claimant(OTHER_ACCOUNT, Predicate::Unconditional)
			.claimant(
				WATCHED_ACCOUNT,
				Predicate::Or(vec![
					Predicate::AbsoluteBefore(now + Duration::days(1)),
					Predicate::RelativeBefore(0),
				]),
			)
			.build(),
	];

	let matches = filter(&balances, WATCHED_ACCOUNT, now, &[], ClaimantMatching::default());
	let ids: Vec<&str> = matches.iter().map(|m| m.balance.id.as_str()).collect();
	assert_eq!(ids, vec!["newest", "oldest"]);

	let lines: Vec<String> = matches.iter().map(render_report_line).collect();
	assert_eq!(
		lines,
		vec![
			"Claimable Balance 100.0000000 AQUA not Before 2024-05-02T00:00:00Z".to_string(),
			"Claimable Balance 1.5000000 XLM Before 2024-06-02T00:00:00Z or Before 0 seconds \
			 since close"
				.to_string(),
		]
	);
}

#[test]
fn test_claimant_matching_modes() {
	let balances = vec![ClaimableBalanceBuilder::new()
		.claimant(&WATCHED_ACCOUNT.to_lowercase(), Predicate::Unconditional)
		.build()];

	let legacy = filter(
		&balances,
		WATCHED_ACCOUNT,
		Utc::now(),
		&[],
		ClaimantMatching::LegacyCaseInsensitive,
	);
	let exact = filter(&balances, WATCHED_ACCOUNT, Utc::now(), &[], ClaimantMatching::Exact);

	assert_eq!(legacy.len(), 1);
	assert!(exact.is_empty());
}

#[test]
fn test_block_list_matches_asset_code() {
	let balances = vec![
		ClaimableBalanceBuilder::new()
			.issued("TRUTHSOCIAL", ISSUER)
			.claimant(WATCHED_ACCOUNT, Predicate::Unconditional)
			.build(),
		ClaimableBalanceBuilder::new()
			.asset(AssetRef::Native)
			.claimant(WATCHED_ACCOUNT, Predicate::Unconditional)
			.build(),
	];
	let blocked = vec!["TRUTHSOCIAL".to_string(), "XLM".to_string()];

	let matches = filter(
		&balances,
		WATCHED_ACCOUNT,
		Utc::now(),
		&blocked,
		ClaimantMatching::default(),
	);
	assert!(matches.is_empty());
}

#[test]
fn test_unsupported_predicate_is_never_claimable() {
	let balances = vec![ClaimableBalanceBuilder::new()
		.claimant(WATCHED_ACCOUNT, Predicate::Unsupported)
		.build()];

	let matches = filter(
		&balances,
		WATCHED_ACCOUNT,
		Utc::now(),
		&[],
		ClaimantMatching::default(),
	);
	assert!(matches.is_empty());
}
