//! Claim predicates attached to claimable balance claimants.
//!
//! Horizon encodes predicates as nested JSON objects, for example:
//!
//! ```json
//! { "and": [ { "not": { "abs_before": "2024-01-01T00:00:00Z" } }, { "unconditional": true } ] }
//! ```
//!
//! Decoding is total: shapes this crate does not understand become
//! [`Predicate::Unsupported`], which always evaluates to false.

use chrono::{DateTime, TimeZone, Utc};
use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// Boolean condition gating whether a claimant may claim a balance
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Predicate {
	/// Always claimable
	Unconditional,
	/// Every child must hold
	And(Vec<Predicate>),
	/// At least one child must hold
	Or(Vec<Predicate>),
	/// Negation of the inner predicate
	Not(Box<Predicate>),
	/// Claimable strictly before the given instant
	AbsoluteBefore(DateTime<Utc>),
	/// Claimable before this many seconds have passed since the balance's ledger closed
	RelativeBefore(i64),
	/// A shape that could not be decoded
	Unsupported,
}

impl Predicate {
	/// Decodes a Horizon predicate object.
	pub fn from_json(value: &Value) -> Self {
		let Some(object) = value.as_object() else {
			return Self::Unsupported;
		};

		if object
			.get("unconditional")
			.and_then(Value::as_bool)
			.unwrap_or(false)
		{
			return Self::Unconditional;
		}

		if let Some(children) = object.get("and") {
			return match children.as_array() {
				Some(children) => Self::And(children.iter().map(Self::from_json).collect()),
				None => Self::Unsupported,
			};
		}

		if let Some(children) = object.get("or") {
			return match children.as_array() {
				Some(children) => Self::Or(children.iter().map(Self::from_json).collect()),
				None => Self::Unsupported,
			};
		}

		if let Some(inner) = object.get("not") {
			return Self::Not(Box::new(Self::from_json(inner)));
		}

		if object.contains_key("abs_before") || object.contains_key("abs_before_epoch") {
			return parse_abs_before(object.get("abs_before_epoch"), object.get("abs_before"))
				.map(Self::AbsoluteBefore)
				.unwrap_or(Self::Unsupported);
		}

		if let Some(seconds) = object.get("rel_before") {
			return parse_integer(seconds)
				.map(Self::RelativeBefore)
				.unwrap_or(Self::Unsupported);
		}

		Self::Unsupported
	}
}

fn parse_integer(value: &Value) -> Option<i64> {
	match value {
		Value::Number(number) => number.as_i64(),
		Value::String(text) => text.trim().parse().ok(),
		_ => None,
	}
}

fn parse_abs_before(epoch: Option<&Value>, text: Option<&Value>) -> Option<DateTime<Utc>> {
	if let Some(instant) = epoch
		.and_then(parse_integer)
		.and_then(|seconds| Utc.timestamp_opt(seconds, 0).single())
	{
		return Some(instant);
	}

	text.and_then(Value::as_str)
		.and_then(|text| DateTime::parse_from_rfc3339(text).ok())
		.map(|instant| instant.with_timezone(&Utc))
}

impl<'de> Deserialize<'de> for Predicate {
	fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
	where
		D: Deserializer<'de>,
	{
		let value = Value::deserialize(deserializer)?;
		Ok(Self::from_json(&value))
	}
}
