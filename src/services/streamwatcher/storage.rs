//! Cursor persistence for the stream monitor.

use async_trait::async_trait;
use std::sync::Arc;

use crate::{
	models::{keys, Cursor},
	repositories::ConfigStore,
	services::streamwatcher::error::StreamWatcherError,
};

/// Interface for storing the stream cursor
#[async_trait]
pub trait CursorStorage: Send + Sync {
	/// Loads the last persisted cursor, if any
	async fn load_cursor(&self) -> Result<Option<Cursor>, StreamWatcherError>;

	/// Persists `cursor` as the last fully processed position
	async fn save_cursor(&self, cursor: &Cursor) -> Result<(), StreamWatcherError>;
}

/// Cursor storage backed by a key of the configuration store
pub struct ConfigCursorStorage {
	store: Arc<dyn ConfigStore>,
	key: String,
}

impl ConfigCursorStorage {
	/// Stores the cursor under the default `lastPagingToken` key
	pub fn new(store: Arc<dyn ConfigStore>) -> Self {
		Self::with_key(store, keys::LAST_PAGING_TOKEN)
	}

	/// Stores the cursor under `key`, for running several monitors on one store
	pub fn with_key(store: Arc<dyn ConfigStore>, key: impl Into<String>) -> Self {
		Self {
			store,
			key: key.into(),
		}
	}
}

#[async_trait]
impl CursorStorage for ConfigCursorStorage {
	async fn load_cursor(&self) -> Result<Option<Cursor>, StreamWatcherError> {
		Ok(self
			.store
			.get(&self.key)
			.map(|token| token.trim().to_string())
			.filter(|token| !token.is_empty())
			.map(Cursor::new))
	}

	async fn save_cursor(&self, cursor: &Cursor) -> Result<(), StreamWatcherError> {
		self.store
			.set(&self.key, cursor.as_str())
			.await
			.map_err(|e| {
				StreamWatcherError::storage_error(format!(
					"Failed to persist cursor {}: {}",
					cursor, e
				))
			})
	}
}
