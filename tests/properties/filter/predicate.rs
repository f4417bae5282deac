//! Property-based tests for claim predicate evaluation and rendering.

use chrono::Duration;
use proptest::{prelude::*, test_runner::Config};

use stellar_notifier::{
	models::Predicate,
	services::filter::{evaluate, render},
};

use crate::properties::strategies::{instant_strategy, predicate_strategy};

proptest! {
	#![proptest_config(Config {
		failure_persistence: None,
		..Config::default()
	})]

	#[test]
	fn prop_not_inverts(predicate in predicate_strategy(), now in instant_strategy()) {
		let negated = Predicate::Not(Box::new(predicate.clone()));
		prop_assert_eq!(evaluate(&negated, now), !evaluate(&predicate, now));
	}

	#[test]
	fn prop_singleton_compounds_are_transparent(
		predicate in predicate_strategy(),
		now in instant_strategy()
	) {
		let expected = evaluate(&predicate, now);
		prop_assert_eq!(evaluate(&Predicate::And(vec![predicate.clone()]), now), expected);
		prop_assert_eq!(evaluate(&Predicate::Or(vec![predicate]), now), expected);
	}

	#[test]
	fn prop_empty_compounds(now in instant_strategy()) {
		prop_assert!(evaluate(&Predicate::And(vec![]), now));
		prop_assert!(!evaluate(&Predicate::Or(vec![]), now));
	}

	#[test]
	fn prop_and_or_agree_with_children(
		children in prop::collection::vec(predicate_strategy(), 0..5),
		now in instant_strategy()
	) {
		let values: Vec<bool> = children.iter().map(|child| evaluate(child, now)).collect();
		prop_assert_eq!(
			evaluate(&Predicate::And(children.clone()), now),
			values.iter().all(|value| *value)
		);
		prop_assert_eq!(
			evaluate(&Predicate::Or(children), now),
			values.iter().any(|value| *value)
		);
	}

	#[test]
	fn prop_absolute_before_deadline(deadline in instant_strategy(), offset in 1i64..10_000_000) {
		let predicate = Predicate::AbsoluteBefore(deadline);
		prop_assert!(evaluate(&predicate, deadline - Duration::seconds(offset)));
		prop_assert!(!evaluate(&predicate, deadline));
		prop_assert!(!evaluate(&predicate, deadline + Duration::seconds(offset)));
	}

	#[test]
	fn prop_unsupported_never_holds(now in instant_strategy()) {
		prop_assert!(!evaluate(&Predicate::Unsupported, now));
		prop_assert!(evaluate(&Predicate::Not(Box::new(Predicate::Unsupported)), now));
	}

	#[test]
	fn prop_render_is_total(predicate in predicate_strategy()) {
		let rendered = render(&predicate);
		let negated = render(&Predicate::Not(Box::new(predicate)));
		prop_assert!(negated.starts_with("not "));
		prop_assert!(negated.ends_with(&rendered) || negated.ends_with(')'));
	}
}
