//! Claim predicate evaluation.
//!
//! Both functions are pure and total: every predicate, including [`Predicate::Unsupported`],
//! evaluates and renders without failing.

use chrono::{DateTime, SecondsFormat, Utc};

use crate::models::Predicate;

/// Decides whether `predicate` is satisfied at instant `now`
///
/// # Arguments
/// * `predicate` - Predicate tree to evaluate
/// * `now` - Reference instant
///
/// # Returns
/// * `bool` - True when a claim at `now` would be allowed
///
/// `RelativeBefore` has no ledger close time to compare against, so it holds whenever its
/// window is positive. Unsupported shapes never hold.
pub fn evaluate(predicate: &Predicate, now: DateTime<Utc>) -> bool {
	match predicate {
		Predicate::Unconditional => true,
		Predicate::And(children) => children.iter().all(|child| evaluate(child, now)),
		Predicate::Or(children) => children.iter().any(|child| evaluate(child, now)),
		Predicate::Not(inner) => !evaluate(inner, now),
		Predicate::AbsoluteBefore(deadline) => now < *deadline,
		Predicate::RelativeBefore(seconds) => *seconds > 0,
		Predicate::Unsupported => false,
	}
}

/// Renders `predicate` as human-readable text
///
/// Compound children of a compound predicate or of a negation are parenthesised, so the
/// text reads back unambiguously:
///
/// ```text
/// Unconditional and not Unconditional
/// not (Before 2021-09-10T00:00:00Z or Before 3600 seconds since close)
/// ```
pub fn render(predicate: &Predicate) -> String {
	match predicate {
		Predicate::Unconditional => "Unconditional".to_string(),
		Predicate::And(children) => join(children, " and "),
		Predicate::Or(children) => join(children, " or "),
		Predicate::Not(inner) => format!("not {}", render_nested(inner)),
		Predicate::AbsoluteBefore(deadline) => {
			format!("Before {}", deadline.to_rfc3339_opts(SecondsFormat::Secs, true))
		}
		Predicate::RelativeBefore(seconds) => format!("Before {} seconds since close", seconds),
		Predicate::Unsupported => "Unknown".to_string(),
	}
}

fn join(children: &[Predicate], separator: &str) -> String {
	children
		.iter()
		.map(render_nested)
		.collect::<Vec<_>>()
		.join(separator)
}

fn render_nested(predicate: &Predicate) -> String {
	match predicate {
		Predicate::And(_) | Predicate::Or(_) => format!("({})", render(predicate)),
		_ => render(predicate),
	}
}
