//! Stream monitor service.
//!
//! Polls the watched account's operation feed, turns every new operation into a
//! notification and persists the cursor after each record:
//!
//! ```text
//! Idle -> Polling -> Processing -> Idle
//!   \________\___________\________-> Stopped
//! ```
//!
//! Records are handled one at a time and in feed order: format, deliver, persist. A record
//! is never revisited once the cursor has moved past it, whether or not its delivery
//! succeeded.

use backon::{BackoffBuilder, ExponentialBackoff, ExponentialBuilder};
use std::{sync::Arc, time::Duration};
use tokio::sync::watch;

use crate::{
	models::{Cursor, Operation, OperationRecord, WatchSettings},
	services::{
		formatter::OperationFormatter,
		horizon::LedgerSource,
		notification::NotificationSink,
		streamwatcher::{error::StreamWatcherError, storage::CursorStorage},
	},
	utils::{
		metrics::{
			CURSOR_PERSIST_FAILURES, MALFORMED_OPERATIONS, NOTIFICATIONS_FAILED,
			NOTIFICATIONS_SENT, NOTIFICATIONS_SUPPRESSED, OPERATIONS_PROCESSED, SOURCE_FAILURES,
		},
		HORIZON_PAGE_LIMIT,
	},
};

/// Lifecycle state of a stream monitor
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MonitorState {
	/// Waiting for the next poll
	Idle,
	/// Fetching a page from the ledger source
	Polling,
	/// Handling the records of a fetched page
	Processing,
	/// Shut down; terminal
	Stopped,
}

/// Tuning of the polling loop
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StreamMonitorConfig {
	/// Maximum number of records requested per poll
	pub page_limit: u32,
	/// Pause after a short page
	pub poll_interval: Duration,
	/// First delay after a source failure
	pub min_backoff: Duration,
	/// Upper bound of the delay between retries
	pub max_backoff: Duration,
}

impl Default for StreamMonitorConfig {
	fn default() -> Self {
		Self {
			page_limit: HORIZON_PAGE_LIMIT,
			poll_interval: Duration::from_secs(5),
			min_backoff: Duration::from_secs(1),
			max_backoff: Duration::from_secs(60),
		}
	}
}

impl StreamMonitorConfig {
	pub fn from_settings(settings: &WatchSettings) -> Self {
		Self {
			poll_interval: settings.poll_interval,
			..Self::default()
		}
	}

	fn backoff(&self) -> ExponentialBackoff {
		ExponentialBuilder::default()
			.with_min_delay(self.min_backoff)
			.with_max_delay(self.max_backoff)
			.with_factor(2.0)
			.without_max_times()
			.build()
	}
}

/// The watched account and how far its feed has been processed
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WatchedAccountState {
	account_id: String,
	cursor: Option<Cursor>,
}

impl WatchedAccountState {
	pub fn new(account_id: impl Into<String>) -> Self {
		Self {
			account_id: account_id.into(),
			cursor: None,
		}
	}

	pub fn account_id(&self) -> &str {
		&self.account_id
	}

	pub fn cursor(&self) -> Option<&Cursor> {
		self.cursor.as_ref()
	}

	/// True when `paging_token` has not been processed yet
	fn is_new(&self, paging_token: &str) -> bool {
		self.cursor
			.as_ref()
			.is_none_or(|cursor| cursor.is_before(paging_token))
	}
}

/// Result of one Polling -> Processing cycle
enum PollOutcome {
	/// A page was processed; carries the number of records fetched
	Page(usize),
	/// Shutdown was requested during the cycle
	Stopped,
}

/// Polls one account's operation feed and notifies about every new operation
pub struct StreamMonitor {
	state: WatchedAccountState,
	config: StreamMonitorConfig,
	recipient: String,
	source: Arc<dyn LedgerSource>,
	formatter: OperationFormatter,
	sink: Arc<dyn NotificationSink>,
	storage: Arc<dyn CursorStorage>,
	state_tx: watch::Sender<MonitorState>,
	resumed: bool,
}

impl StreamMonitor {
	/// Creates a monitor for `account_id`
	///
	/// # Arguments
	/// * `account_id` - Watched account
	/// * `recipient` - Address every notification is sent to
	/// * `config` - Loop tuning
	/// * `source` - Ledger data source
	/// * `formatter` - Operation formatter
	/// * `sink` - Notification sink
	/// * `storage` - Cursor storage
	pub fn new(
		account_id: impl Into<String>,
		recipient: impl Into<String>,
		config: StreamMonitorConfig,
		source: Arc<dyn LedgerSource>,
		formatter: OperationFormatter,
		sink: Arc<dyn NotificationSink>,
		storage: Arc<dyn CursorStorage>,
	) -> Self {
		let (state_tx, _) = watch::channel(MonitorState::Idle);
		Self {
			state: WatchedAccountState::new(account_id),
			config,
			recipient: recipient.into(),
			source,
			formatter,
			sink,
			storage,
			state_tx,
			resumed: false,
		}
	}

	/// Watched account and current cursor
	pub fn state(&self) -> &WatchedAccountState {
		&self.state
	}

	/// Cursor of the last processed record
	pub fn cursor(&self) -> Option<&Cursor> {
		self.state.cursor()
	}

	/// Subscribes to lifecycle state changes
	pub fn subscribe_state(&self) -> watch::Receiver<MonitorState> {
		self.state_tx.subscribe()
	}

	/// Loads the persisted cursor; the next poll starts right after it
	///
	/// # Returns
	/// * `Result<Option<&Cursor>, StreamWatcherError>` - The loaded cursor, `None` when
	///   the feed will be read from the beginning
	pub async fn resume(&mut self) -> Result<Option<&Cursor>, StreamWatcherError> {
		self.state.cursor = self.storage.load_cursor().await?;
		self.resumed = true;

		match &self.state.cursor {
			Some(cursor) => tracing::info!(
				account = %self.state.account_id,
				cursor = %cursor,
				"Resuming operation stream"
			),
			None => tracing::info!(
				account = %self.state.account_id,
				"No stored cursor, reading operation stream from the beginning"
			),
		}
		Ok(self.state.cursor.as_ref())
	}

	/// Runs a single Polling -> Processing cycle
	///
	/// # Returns
	/// * `Result<usize, StreamWatcherError>` - Number of records fetched, or the source
	///   failure
	pub async fn poll_once(&mut self) -> Result<usize, StreamWatcherError> {
		match self.poll(None).await? {
			PollOutcome::Page(fetched) => Ok(fetched),
			PollOutcome::Stopped => Ok(0),
		}
	}

	/// Runs the polling loop until `shutdown` turns true
	///
	/// Source failures are retried with exponential backoff and never end the loop. Only a
	/// failure to load the stored cursor at startup is returned.
	pub async fn run(&mut self, shutdown: watch::Receiver<bool>) -> Result<(), StreamWatcherError> {
		if !self.resumed {
			if let Err(error) = self.resume().await {
				self.set_state(MonitorState::Stopped);
				return Err(error);
			}
		}

		let mut backoff = self.config.backoff();
		loop {
			if *shutdown.borrow() {
				break;
			}

			let pause = match self.poll(Some(&shutdown)).await {
				Ok(PollOutcome::Stopped) => break,
				Ok(PollOutcome::Page(fetched)) => {
					backoff = self.config.backoff();
					if fetched >= self.config.page_limit as usize {
						continue;
					}
					self.config.poll_interval
				}
				Err(error) => {
					SOURCE_FAILURES.inc();
					let delay = backoff.next().unwrap_or(self.config.max_backoff);
					tracing::warn!(
						account = %self.state.account_id,
						retry_in = ?delay,
						error = %error,
						"Ledger source unavailable, backing off"
					);
					delay
				}
			};

			self.set_state(MonitorState::Idle);
			let mut stop = shutdown.clone();
			tokio::select! {
				_ = tokio::time::sleep(pause) => {}
				_ = shutdown_requested(&mut stop) => break,
			}
		}

		self.set_state(MonitorState::Stopped);
		tracing::info!(account = %self.state.account_id, "Stream monitor stopped");
		Ok(())
	}

	async fn poll(
		&mut self,
		shutdown: Option<&watch::Receiver<bool>>,
	) -> Result<PollOutcome, StreamWatcherError> {
		self.set_state(MonitorState::Polling);

		let source = Arc::clone(&self.source);
		let account_id = self.state.account_id.clone();
		let fetch =
			source.fetch_operations(&account_id, self.state.cursor.clone(), self.config.page_limit);

		let result = match shutdown {
			Some(shutdown) => {
				let mut stop = shutdown.clone();
				tokio::select! {
					result = fetch => result,
					_ = shutdown_requested(&mut stop) => return Ok(PollOutcome::Stopped),
				}
			}
			None => fetch.await,
		};

		let records = match result {
			Ok(records) => records,
			Err(e) => {
				self.set_state(MonitorState::Idle);
				return Err(StreamWatcherError::source_unavailable(e.to_string()));
			}
		};

		let fetched = records.len();
		tracing::debug!(account = %account_id, fetched, "Fetched operations page");

		self.set_state(MonitorState::Processing);
		for record in records {
			if shutdown.is_some_and(|shutdown| *shutdown.borrow()) {
				return Ok(PollOutcome::Stopped);
			}
			self.process(record).await;
		}

		self.set_state(MonitorState::Idle);
		Ok(PollOutcome::Page(fetched))
	}

	/// Handles one record and moves the cursor past it
	async fn process(&mut self, record: OperationRecord) {
		let paging_token = record.paging_token().to_string();
		if !self.state.is_new(&paging_token) {
			tracing::debug!(paging_token = %paging_token, "Skipping replayed operation");
			return;
		}

		match record {
			OperationRecord::Decoded(operation) => self.deliver(&operation).await,
			OperationRecord::Malformed {
				id, kind, reason, ..
			} => {
				MALFORMED_OPERATIONS.inc();
				StreamWatcherError::malformed_operation(format!(
					"operation {} ({}) at {}: {}",
					id.as_deref().unwrap_or("<no id>"),
					kind.as_deref().unwrap_or("<no type>"),
					paging_token,
					reason
				));
			}
		}

		self.advance(Cursor::new(paging_token)).await;
	}

	async fn deliver(&self, operation: &Operation) {
		OPERATIONS_PROCESSED
			.with_label_values(&[operation.kind.as_str()])
			.inc();

		if self.formatter.is_suppressed(operation) {
			NOTIFICATIONS_SUPPRESSED.inc();
			tracing::info!(
				id = %operation.id,
				kind = %operation.kind,
				"Operation in an excluded token, not notifying"
			);
			return;
		}

		let notification = self.formatter.format(operation, &self.state.account_id);
		match self
			.sink
			.send(&notification.subject, &notification.body, &self.recipient)
			.await
		{
			Ok(()) => {
				NOTIFICATIONS_SENT.inc();
				tracing::info!(
					id = %operation.id,
					kind = %operation.kind,
					subject = %notification.subject,
					"Notification sent"
				);
			}
			Err(e) => {
				NOTIFICATIONS_FAILED.inc();
				StreamWatcherError::delivery_failure(format!(
					"operation {} ({}): {}",
					operation.id, operation.kind, e
				));
			}
		}
	}

	async fn advance(&mut self, cursor: Cursor) {
		if let Err(error) = self.storage.save_cursor(&cursor).await {
			CURSOR_PERSIST_FAILURES.inc();
			tracing::warn!(cursor = %cursor, error = %error, "Cursor kept in memory only");
		}
		self.state.cursor = Some(cursor);
	}

	fn set_state(&self, state: MonitorState) {
		self.state_tx.send_replace(state);
	}
}

/// Completes once `shutdown` turns true; never completes if the sender is gone
async fn shutdown_requested(shutdown: &mut watch::Receiver<bool>) {
	if shutdown.wait_for(|stop| *stop).await.is_err() {
		std::future::pending::<()>().await;
	}
}
