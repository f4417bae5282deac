use chrono::{DateTime, TimeZone, Utc};
use proptest::prelude::*;

use stellar_notifier::models::{AssetRef, Predicate};

/// Valid account ids used as claimants, payers and payees
pub const ACCOUNTS: [&str; 4] = [
	"GBIA4FH6TV64KSPDAJCNUQSM7PFL4ILGUVJDPCLUOPJ7ONMKBBVUQHRO",
	"GAAZI4TCR3TY5OJHCTJC2A4QSY6CJWJH5IAJTGKIN2ER7LBNVKOCCWN7",
	"GA5ZSEJYB37JRC5AVCIA5MOP4RHTM335X2KGX3IHOJAPP5RE34K4KZVN",
	"GBHNGLLIE3KWGKCHIKMHJ5HVZHYIK7WTBE4QF5PLAKL4CJGSEU7HZIW5",
];

const MIN_TIMESTAMP: i64 = 1_420_070_400; // 2015-01-01
const MAX_TIMESTAMP: i64 = 2_524_608_000; // 2050-01-01
const MAX_CHILDREN: usize = 4;

pub fn account_strategy() -> impl Strategy<Value = String> {
	prop::sample::select(ACCOUNTS.to_vec()).prop_map(String::from)
}

pub fn instant_strategy() -> impl Strategy<Value = DateTime<Utc>> {
	(MIN_TIMESTAMP..MAX_TIMESTAMP).prop_map(|seconds| {
		Utc.timestamp_opt(seconds, 0)
			.single()
			.unwrap_or_else(Utc::now)
	})
}

pub fn asset_code_strategy() -> impl Strategy<Value = String> {
	"[A-Z0-9]{1,12}".prop_map(|code| code.to_string())
}

pub fn asset_strategy() -> impl Strategy<Value = AssetRef> {
	prop_oneof![
		Just(AssetRef::Native),
		(asset_code_strategy(), account_strategy())
			.prop_map(|(code, issuer)| AssetRef::Issued { code, issuer }),
	]
}

pub fn amount_strategy() -> impl Strategy<Value = String> {
	(0u64..1_000_000_000, 0u32..10_000_000)
		.prop_map(|(whole, fraction)| format!("{}.{:07}", whole, fraction))
}

/// Arbitrary predicate trees, including unsupported leaves
pub fn predicate_strategy() -> impl Strategy<Value = Predicate> {
	let leaf = prop_oneof![
		Just(Predicate::Unconditional),
		Just(Predicate::Unsupported),
		instant_strategy().prop_map(Predicate::AbsoluteBefore),
		(-3_600i64..86_400).prop_map(Predicate::RelativeBefore),
	];

	leaf.prop_recursive(4, 32, MAX_CHILDREN as u32, |inner| {
		prop_oneof![
			prop::collection::vec(inner.clone(), 0..MAX_CHILDREN).prop_map(Predicate::And),
			prop::collection::vec(inner.clone(), 0..MAX_CHILDREN).prop_map(Predicate::Or),
			inner.prop_map(|p| Predicate::Not(Box::new(p))),
		]
	})
}
