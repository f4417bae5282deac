use async_trait::async_trait;
use mockall::mock;

use stellar_notifier::{
	models::{ClaimableBalance, Cursor, OperationRecord},
	services::{
		horizon::{LedgerSource, LedgerSourceError},
		notification::{NotificationError, NotificationSink},
		streamwatcher::{CursorStorage, StreamWatcherError},
	},
};

mock! {
	pub LedgerSource {}

	#[async_trait]
	impl LedgerSource for LedgerSource {
		async fn fetch_operations(
			&self,
			account_id: &str,
			cursor: Option<Cursor>,
			limit: u32,
		) -> Result<Vec<OperationRecord>, LedgerSourceError>;

		async fn fetch_claimable_balances(
			&self,
			account_id: &str,
		) -> Result<Vec<ClaimableBalance>, LedgerSourceError>;
	}
}

mock! {
	pub NotificationSink {}

	#[async_trait]
	impl NotificationSink for NotificationSink {
		async fn send(&self, subject: &str, body: &str, recipient: &str) -> Result<(), NotificationError>;
	}
}

mock! {
	pub CursorStorage {}

	#[async_trait]
	impl CursorStorage for CursorStorage {
		async fn load_cursor(&self) -> Result<Option<Cursor>, StreamWatcherError>;
		async fn save_cursor(&self, cursor: &Cursor) -> Result<(), StreamWatcherError>;
	}
}
