//! Account configuration operations.

use super::{text, value, NULL_FIELD};
use crate::models::{BumpSequence, ManageData, Notification, SetOptions};

/// Comma separated flag values, or the null marker when the field is absent
fn flags(flags: &Option<Vec<u32>>) -> String {
	match flags {
		Some(flags) => flags
			.iter()
			.map(u32::to_string)
			.collect::<Vec<_>>()
			.join(","),
		None => NULL_FIELD.to_string(),
	}
}

pub(super) fn set_options(options: &SetOptions) -> Notification {
	Notification::new(
		"Stellar Set Options operation",
		format!(
			"Set options. clearFlags: {}, highThreshold: {}, homeDomain: {}, inflationDestination: {}, \
			 lowThreshold: {}, masterKeyWeight: {}, medThreshold: {}, setFlags: {}, signer: {}, \
			 signerWeight: {}.",
			flags(&options.clear_flags),
			value(&options.high_threshold),
			text(&options.home_domain),
			text(&options.inflation_dest),
			value(&options.low_threshold),
			value(&options.master_key_weight),
			value(&options.med_threshold),
			flags(&options.set_flags),
			text(&options.signer_key),
			value(&options.signer_weight)
		),
	)
}

pub(super) fn manage_data(data: &ManageData) -> Notification {
	Notification::new(
		"Stellar Data Operation",
		format!("Data Operation {} -> {}", text(&data.name), text(&data.value)),
	)
}

pub(super) fn bump_sequence(bump: &BumpSequence) -> Notification {
	Notification::new(
		"Stellar Bump Sequence",
		format!("Bumped Sequence to {}", text(&bump.bump_to)),
	)
}
