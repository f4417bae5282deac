//! Notifier settings.
//!
//! Settings are read key by key from a lookup function (normally the configuration store,
//! which itself falls back to environment variables) and validated before any service is
//! started. A missing or invalid setting is fatal at startup.

mod error;
mod settings;

pub use error::ConfigError;
pub use settings::{keys, split_list, SmtpSettings, WatchSettings};

/// Common interface for loading a settings group from a key-value lookup
pub trait SettingsLoader: Sized {
	/// Reads every setting of the group through `lookup` and validates the result
	fn load<F>(lookup: F) -> Result<Self, ConfigError>
	where
		F: Fn(&str) -> Option<String>;

	/// Checks the loaded values
	fn validate(&self) -> Result<(), ConfigError>;

	/// Reads a required key, treating blank values as absent
	fn required<F>(lookup: &F, key: &str) -> Result<String, ConfigError>
	where
		F: Fn(&str) -> Option<String>,
	{
		lookup(key)
			.map(|value| value.trim().to_string())
			.filter(|value| !value.is_empty())
			.ok_or_else(|| ConfigError::missing_setting(key))
	}

	/// Reads an optional key, treating blank values as absent
	fn optional<F>(lookup: &F, key: &str) -> Option<String>
	where
		F: Fn(&str) -> Option<String>,
	{
		lookup(key)
			.map(|value| value.trim().to_string())
			.filter(|value| !value.is_empty())
	}
}
