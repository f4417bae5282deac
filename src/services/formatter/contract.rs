//! Smart contract operations.
//!
//! Contract arguments stay XDR-encoded; the notification only lists them.

use super::{asset_name, list, text};
use crate::models::{ExtendFootprintTtl, InvokeHostFunction, Notification};

pub(super) fn invoke_host_function(invoke: &InvokeHostFunction) -> Notification {
	let parameters = invoke
		.parameters
		.iter()
		.map(|parameter| format!("{} {}", parameter.kind, parameter.value));
	let changes = invoke.asset_balance_changes.iter().map(|change| {
		format!(
			"{} {} {} from {} to {}",
			text(&change.kind),
			text(&change.amount),
			asset_name(&change.asset()),
			text(&change.from),
			text(&change.to)
		)
	});

	Notification::new(
		"Stellar Invoke Host Function",
		format!(
			"Invoked Host Function {} with parameters {}, address {}, salt {}, asset balance changes {}",
			text(&invoke.function),
			list(parameters),
			text(&invoke.address),
			text(&invoke.salt),
			list(changes)
		),
	)
}

pub(super) fn extend_footprint_ttl(extend: &ExtendFootprintTtl) -> Notification {
	Notification::new(
		"Stellar Extend Footprint TTL",
		format!("Extended Footprint TTL to {}", text(&extend.extend_to)),
	)
}

pub(super) fn restore_footprint() -> Notification {
	Notification::new("Stellar Restore Footprint", "Restored Footprint")
}
