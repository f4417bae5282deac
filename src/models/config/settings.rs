//! Settings groups for the account watcher and the SMTP sink.

use email_address::EmailAddress;
use std::{fmt, time::Duration};
use zeroize::Zeroizing;

use super::{ConfigError, SettingsLoader};

/// Keys understood by the configuration store
pub mod keys {
	pub const ACCOUNT_ID: &str = "AccountId";
	pub const LAST_PAGING_TOKEN: &str = "lastPagingToken";
	pub const SMTP_AUTH: &str = "mail.smtp.auth";
	pub const SMTP_STARTTLS: &str = "mail.smtp.starttls.enable";
	pub const SMTP_HOST: &str = "mail.smtp.host";
	pub const SMTP_PORT: &str = "mail.smtp.port";
	pub const MAIL_USER: &str = "mail.user";
	pub const MAIL_PASSWORD: &str = "mail.password";
	pub const MAIL_RECIPIENT: &str = "mail.recipient";
	pub const EXCLUDED_TOKENS: &str = "ExcludedTokens";
	pub const CLAIMABLE_BLOCK_LIST: &str = "ClaimableBlockList";
	pub const HORIZON_URL: &str = "horizon.url";
	pub const POLL_INTERVAL_SECONDS: &str = "poll.interval.seconds";
}

pub const DEFAULT_HORIZON_URL: &str = "https://horizon.stellar.org";
pub const DEFAULT_POLL_INTERVAL_SECONDS: u64 = 5;
pub const DEFAULT_CLAIMABLE_BLOCK_LIST: &str = "trumpcoin,TRUTHSOCIAL";
pub const DEFAULT_SMTP_PORT: u16 = 587;

/// Splits a comma separated setting into its trimmed, non-empty entries
pub fn split_list(value: &str) -> Vec<String> {
	value
		.split(',')
		.map(str::trim)
		.filter(|entry| !entry.is_empty())
		.map(String::from)
		.collect()
}

fn parse_flag(key: &str, value: Option<String>, default: bool) -> Result<bool, ConfigError> {
	match value.as_deref().map(str::to_ascii_lowercase).as_deref() {
		None => Ok(default),
		Some("true") => Ok(true),
		Some("false") => Ok(false),
		Some(other) => Err(ConfigError::validation_error(format!(
			"{} must be true or false, got {}",
			key, other
		))),
	}
}

/// Settings of the watched account and its data source
#[derive(Debug, Clone, PartialEq)]
pub struct WatchSettings {
	/// Account whose operations are watched
	pub account_id: String,
	/// Base URL of the Horizon server
	pub horizon_url: String,
	/// Delay between polls once the feed is drained
	pub poll_interval: Duration,
	/// Asset codes whose payments never produce a notification
	pub excluded_tokens: Vec<String>,
	/// Asset codes left out of the claimable balance report
	pub claimable_block_list: Vec<String>,
}

impl SettingsLoader for WatchSettings {
	fn load<F>(lookup: F) -> Result<Self, ConfigError>
	where
		F: Fn(&str) -> Option<String>,
	{
		let account_id = Self::required(&lookup, keys::ACCOUNT_ID)?;
		let horizon_url = Self::optional(&lookup, keys::HORIZON_URL)
			.unwrap_or_else(|| DEFAULT_HORIZON_URL.to_string());

		let poll_interval = match Self::optional(&lookup, keys::POLL_INTERVAL_SECONDS) {
			Some(value) => value.parse::<u64>().map_err(|_| {
				ConfigError::validation_error(format!(
					"{} must be a whole number of seconds, got {}",
					keys::POLL_INTERVAL_SECONDS,
					value
				))
			})?,
			None => DEFAULT_POLL_INTERVAL_SECONDS,
		};

		let excluded_tokens = Self::optional(&lookup, keys::EXCLUDED_TOKENS)
			.map(|value| split_list(&value))
			.unwrap_or_default();
		let claimable_block_list = split_list(
			&Self::optional(&lookup, keys::CLAIMABLE_BLOCK_LIST)
				.unwrap_or_else(|| DEFAULT_CLAIMABLE_BLOCK_LIST.to_string()),
		);

		let settings = Self {
			account_id,
			horizon_url,
			poll_interval: Duration::from_secs(poll_interval),
			excluded_tokens,
			claimable_block_list,
		};
		settings.validate()?;
		Ok(settings)
	}

	fn validate(&self) -> Result<(), ConfigError> {
		if stellar_strkey::ed25519::PublicKey::from_string(&self.account_id).is_err() {
			return Err(ConfigError::validation_error(format!(
				"{} is not a valid account id: {}",
				keys::ACCOUNT_ID,
				self.account_id
			)));
		}

		match url::Url::parse(&self.horizon_url) {
			Ok(url) if matches!(url.scheme(), "http" | "https") => {}
			_ => {
				return Err(ConfigError::validation_error(format!(
					"{} must be an http(s) URL, got {}",
					keys::HORIZON_URL,
					self.horizon_url
				)))
			}
		}

		if self.poll_interval.is_zero() {
			return Err(ConfigError::validation_error(format!(
				"{} must be greater than zero",
				keys::POLL_INTERVAL_SECONDS
			)));
		}

		Ok(())
	}
}

/// Settings of the SMTP notification sink
#[derive(Clone)]
pub struct SmtpSettings {
	pub host: String,
	pub port: u16,
	/// Upgrade the connection with STARTTLS instead of connecting over implicit TLS
	pub starttls: bool,
	/// Authenticate with `user` / `password`
	pub auth: bool,
	/// Login user, also used as the sender address
	pub user: String,
	pub password: Zeroizing<String>,
	pub recipient: String,
}

impl fmt::Debug for SmtpSettings {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("SmtpSettings")
			.field("host", &self.host)
			.field("port", &self.port)
			.field("starttls", &self.starttls)
			.field("auth", &self.auth)
			.field("user", &self.user)
			.field("password", &"**********")
			.field("recipient", &self.recipient)
			.finish()
	}
}

impl SettingsLoader for SmtpSettings {
	fn load<F>(lookup: F) -> Result<Self, ConfigError>
	where
		F: Fn(&str) -> Option<String>,
	{
		let host = Self::required(&lookup, keys::SMTP_HOST)?;
		let port = match Self::optional(&lookup, keys::SMTP_PORT) {
			Some(value) => value.parse::<u16>().map_err(|_| {
				ConfigError::validation_error(format!(
					"{} must be a port number, got {}",
					keys::SMTP_PORT,
					value
				))
			})?,
			None => DEFAULT_SMTP_PORT,
		};
		let starttls = parse_flag(
			keys::SMTP_STARTTLS,
			Self::optional(&lookup, keys::SMTP_STARTTLS),
			true,
		)?;
		let auth = parse_flag(
			keys::SMTP_AUTH,
			Self::optional(&lookup, keys::SMTP_AUTH),
			true,
		)?;
		let user = Self::required(&lookup, keys::MAIL_USER)?;
		let password = if auth {
			Zeroizing::new(Self::required(&lookup, keys::MAIL_PASSWORD)?)
		} else {
			Zeroizing::new(lookup(keys::MAIL_PASSWORD).unwrap_or_default())
		};
		let recipient = Self::required(&lookup, keys::MAIL_RECIPIENT)?;

		let settings = Self {
			host,
			port,
			starttls,
			auth,
			user,
			password,
			recipient,
		};
		settings.validate()?;
		Ok(settings)
	}

	fn validate(&self) -> Result<(), ConfigError> {
		if self.port == 0 {
			return Err(ConfigError::validation_error(format!(
				"{} must be greater than zero",
				keys::SMTP_PORT
			)));
		}

		for (key, address) in [
			(keys::MAIL_USER, &self.user),
			(keys::MAIL_RECIPIENT, &self.recipient),
		] {
			if !EmailAddress::is_valid(address) {
				return Err(ConfigError::validation_error(format!(
					"{} is not a valid e-mail address: {}",
					key, address
				)));
			}
		}

		Ok(())
	}
}
