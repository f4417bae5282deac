use serde::{Deserialize, Serialize};

/// A rendered notification ready to be handed to a sink
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct Notification {
	/// Subject line
	pub subject: String,
	/// Message body
	pub body: String,
}

impl Notification {
	pub fn new(subject: impl Into<String>, body: impl Into<String>) -> Self {
		Self {
			subject: subject.into(),
			body: body.into(),
		}
	}
}
