//! Bootstrap module for reading settings and wiring services.
//!
//! Settings are read from the configuration store (which falls back to environment
//! variables) and validated before anything starts. A missing or invalid setting is fatal.
//!
//! # Services
//! - `HorizonClient`: Ledger data source
//! - `EmailNotifier`: Notification sink
//! - `StreamMonitor`: The polling loop, with its cursor kept in the configuration store
//!
//! # Helpers
//! - `claimable_report`: Builds the lines of the claimable balance report
//! - `spawn_config_change_logger`: Logs every change applied to the configuration store

use chrono::{DateTime, Utc};
use std::{error::Error, path::Path, sync::Arc};
use tokio::{
	sync::broadcast::error::RecvError,
	task::JoinHandle,
};

use crate::{
	models::{keys, ConfigError, SettingsLoader, SmtpSettings, WatchSettings},
	repositories::{ConfigChange, ConfigStore, FileConfigStore},
	services::{
		filter::{filter, render_report_line, ClaimantMatching},
		formatter::OperationFormatter,
		horizon::{HorizonClient, LedgerSource, LedgerSourceError},
		notification::{EmailNotifier, NotificationSink},
		streamwatcher::{ConfigCursorStorage, StreamMonitor, StreamMonitorConfig},
	},
};

/// Type alias for handling ServiceResult
pub type Result<T> = std::result::Result<T, Box<dyn Error + Send + Sync>>;

/// Placeholder logged instead of secret values
const MASKED_VALUE: &str = "********";

/// Opens the configuration store at `path`
///
/// # Arguments
/// * `path` - Location of the JSON configuration file
///
/// # Returns
/// * `Result<Arc<FileConfigStore>, ConfigError>` - The store, or a file error when it
///   exists but cannot be read
pub async fn load_config_store(
	path: impl AsRef<Path>,
) -> std::result::Result<Arc<FileConfigStore>, ConfigError> {
	FileConfigStore::load(path)
		.await
		.map(Arc::new)
		.map_err(|e| ConfigError::file_error(e.to_string()))
}

/// Reads and validates one settings group from `store`
pub fn load_settings<S: SettingsLoader>(
	store: &dyn ConfigStore,
) -> std::result::Result<S, ConfigError> {
	S::load(|key| store.get(key))
}

/// Creates the production services and the stream monitor wired to them
///
/// # Arguments
/// * `store` - Configuration store, also holding the cursor
/// * `watch` - Validated watch settings
/// * `smtp` - Validated SMTP settings
///
/// # Returns
/// * `Result<StreamMonitor>` - The monitor, ready to run
pub fn initialize_services(
	store: Arc<dyn ConfigStore>,
	watch: &WatchSettings,
	smtp: &SmtpSettings,
) -> Result<StreamMonitor> {
	let source = Arc::new(HorizonClient::new(&watch.horizon_url)?);
	let sink = Arc::new(EmailNotifier::from_settings(smtp)?);

	Ok(create_stream_monitor(
		store,
		watch,
		&smtp.recipient,
		source,
		sink,
	))
}

/// Creates a stream monitor over the given source and sink
pub fn create_stream_monitor(
	store: Arc<dyn ConfigStore>,
	watch: &WatchSettings,
	recipient: &str,
	source: Arc<dyn LedgerSource>,
	sink: Arc<dyn NotificationSink>,
) -> StreamMonitor {
	StreamMonitor::new(
		watch.account_id.clone(),
		recipient,
		StreamMonitorConfig::from_settings(watch),
		source,
		OperationFormatter::new(watch.excluded_tokens.iter().cloned()),
		sink,
		Arc::new(ConfigCursorStorage::new(store)),
	)
}

/// Builds the claimable balance report of the watched account
///
/// # Arguments
/// * `source` - Ledger data source
/// * `watch` - Watch settings (account and block list)
/// * `as_of` - Instant the claim predicates are evaluated at
///
/// # Returns
/// * `Result<Vec<String>, LedgerSourceError>` - One line per claimable balance, newest first
pub async fn claimable_report(
	source: &dyn LedgerSource,
	watch: &WatchSettings,
	as_of: DateTime<Utc>,
) -> std::result::Result<Vec<String>, LedgerSourceError> {
	let balances = source.fetch_claimable_balances(&watch.account_id).await?;

	Ok(filter(
		&balances,
		&watch.account_id,
		as_of,
		&watch.claimable_block_list,
		ClaimantMatching::default(),
	)
	.iter()
	.map(render_report_line)
	.collect())
}

/// Logs every change applied to `store` until the store is dropped
pub fn spawn_config_change_logger(store: &dyn ConfigStore) -> JoinHandle<()> {
	let mut changes = store.subscribe();
	tokio::spawn(async move {
		loop {
			match changes.recv().await {
				Ok(change) => log_config_change(&change),
				Err(RecvError::Lagged(skipped)) => {
					tracing::warn!(skipped, "Configuration change log fell behind");
				}
				Err(RecvError::Closed) => break,
			}
		}
	})
}

/// Value as it may appear in logs
fn loggable_value<'a>(key: &str, value: Option<&'a str>) -> &'a str {
	match value {
		Some(_) if key == keys::MAIL_PASSWORD => MASKED_VALUE,
		Some(value) => value,
		None => "<unset>",
	}
}

fn log_config_change(change: &ConfigChange) {
	let old_value = loggable_value(&change.key, change.old_value.as_deref());
	let new_value = loggable_value(&change.key, change.new_value.as_deref());

	if change.key == keys::LAST_PAGING_TOKEN {
		tracing::debug!(old = old_value, new = new_value, "Cursor persisted");
	} else {
		tracing::info!(
			key = %change.key,
			old = old_value,
			new = new_value,
			"Configuration changed"
		);
	}
}
