//! Resumption marker into an account's operation feed.

use serde::{Deserialize, Serialize};
use std::{
	cmp::Ordering,
	fmt,
	hash::{Hash, Hasher},
};

/// Opaque, source-defined token identifying the last fully processed operation.
///
/// Horizon paging tokens are decimal integers, so all-digit tokens are compared
/// numerically and leading zeros carry no meaning. Tokens are ordered by length first
/// and then by their bytes. Equality and hashing follow the same ordering key.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(transparent)]
pub struct Cursor(String);

impl Cursor {
	pub fn new(token: impl Into<String>) -> Self {
		Self(token.into())
	}

	pub fn as_str(&self) -> &str {
		&self.0
	}

	/// Returns true when `token` lies strictly after this cursor
	pub fn is_before(&self, token: &str) -> bool {
		compare_tokens(&self.0, token) == Ordering::Less
	}
}

fn is_decimal(token: &str) -> bool {
	!token.is_empty() && token.bytes().all(|b| b.is_ascii_digit())
}

/// Ordering key of a token: decimal tokens lose their leading zeros
fn normalized(token: &str) -> &str {
	if !is_decimal(token) {
		return token;
	}
	match token.trim_start_matches('0') {
		"" => "0",
		digits => digits,
	}
}

fn compare_tokens(left: &str, right: &str) -> Ordering {
	let (left, right) = (normalized(left), normalized(right));

	left.len()
		.cmp(&right.len())
		.then_with(|| left.as_bytes().cmp(right.as_bytes()))
}

impl PartialEq for Cursor {
	fn eq(&self, other: &Self) -> bool {
		self.cmp(other) == Ordering::Equal
	}
}

impl Eq for Cursor {}

impl Hash for Cursor {
	fn hash<H: Hasher>(&self, state: &mut H) {
		normalized(&self.0).hash(state);
	}
}

impl PartialOrd for Cursor {
	fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
		Some(self.cmp(other))
	}
}

impl Ord for Cursor {
	fn cmp(&self, other: &Self) -> Ordering {
		compare_tokens(&self.0, &other.0)
	}
}

impl fmt::Display for Cursor {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(&self.0)
	}
}

impl From<&str> for Cursor {
	fn from(token: &str) -> Self {
		Self::new(token)
	}
}
