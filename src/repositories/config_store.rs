//! File backed configuration store.
//!
//! Settings and the stream cursor live in one flat JSON object, for example:
//!
//! ```json
//! {
//!   "AccountId": "GBIA4FH6TV64KSPDAJCNUQSM7PFL4ILGUVJDPCLUOPJ7ONMKBBVUQHRO",
//!   "lastPagingToken": "12884905985",
//!   "mail.smtp.host": "smtp.example.com"
//! }
//! ```
//!
//! Values absent from the file are looked up in the process environment under the same key.

use async_trait::async_trait;
use serde_json::{Map, Value};
use std::{
	collections::BTreeMap,
	path::{Path, PathBuf},
	sync::{PoisonError, RwLock},
};
use tokio::sync::{broadcast, Mutex};

use crate::repositories::error::RepositoryError;

const CHANGE_CHANNEL_CAPACITY: usize = 64;

/// A change applied to the store
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigChange {
	pub key: String,
	/// Value stored before the change, if any
	pub old_value: Option<String>,
	/// Value stored after the change; `None` when the key was removed
	pub new_value: Option<String>,
}

/// Interface for key-value configuration stores
///
/// Reads are synchronous and never fail; writes are persisted before they are announced
/// to subscribers.
#[async_trait]
pub trait ConfigStore: Send + Sync {
	/// Returns the value stored under `key`, falling back to the environment
	fn get(&self, key: &str) -> Option<String>;

	/// Stores `value` under `key` and persists the store
	async fn set(&self, key: &str, value: &str) -> Result<(), RepositoryError>;

	/// Removes `key` from the store and persists the store
	async fn remove(&self, key: &str) -> Result<(), RepositoryError>;

	/// Keys currently held by the store (environment fallbacks excluded)
	fn keys(&self) -> Vec<String>;

	/// Subscribes to changes applied after this call
	fn subscribe(&self) -> broadcast::Receiver<ConfigChange>;
}

/// Configuration store persisted as a JSON object on disk
pub struct FileConfigStore {
	path: PathBuf,
	values: RwLock<BTreeMap<String, String>>,
	/// Serialises writers so the file always reflects the latest applied change
	write_lock: Mutex<()>,
	changes: broadcast::Sender<ConfigChange>,
}

impl FileConfigStore {
	/// Loads the store from `path`
	///
	/// A missing file yields an empty store; the file is created on the first write.
	///
	/// # Arguments
	/// * `path` - Location of the JSON file
	///
	/// # Returns
	/// * `Result<Self, RepositoryError>` - The loaded store or a load error
	pub async fn load(path: impl AsRef<Path>) -> Result<Self, RepositoryError> {
		let path = path.as_ref().to_path_buf();
		let values = if tokio::fs::try_exists(&path).await.unwrap_or(false) {
			let content = tokio::fs::read_to_string(&path).await.map_err(|e| {
				RepositoryError::load_error(format!("cannot read {}: {}", path.display(), e))
			})?;
			Self::parse(&content).map_err(|e| {
				RepositoryError::load_error(format!("cannot parse {}: {}", path.display(), e))
			})?
		} else {
			BTreeMap::new()
		};

		tracing::info!(
			path = %path.display(),
			values = values.len(),
			"Loaded configuration store"
		);

		let (changes, _) = broadcast::channel(CHANGE_CHANNEL_CAPACITY);
		Ok(Self {
			path,
			values: RwLock::new(values),
			write_lock: Mutex::new(()),
			changes,
		})
	}

	/// Location of the backing file
	pub fn path(&self) -> &Path {
		&self.path
	}

	fn parse(content: &str) -> Result<BTreeMap<String, String>, String> {
		if content.trim().is_empty() {
			return Ok(BTreeMap::new());
		}

		let object: Map<String, Value> =
			serde_json::from_str(content).map_err(|e| e.to_string())?;

		object
			.into_iter()
			.filter(|(_, value)| !value.is_null())
			.map(|(key, value)| match value {
				Value::String(text) => Ok((key, text)),
				Value::Number(number) => Ok((key, number.to_string())),
				Value::Bool(flag) => Ok((key, flag.to_string())),
				_ => Err(format!("value of {} must be a string, number or boolean", key)),
			})
			.collect()
	}

	/// Writes `values` to a sibling temporary file and renames it over the store file
	async fn persist(&self, values: &BTreeMap<String, String>) -> Result<(), RepositoryError> {
		let content = serde_json::to_string_pretty(values)
			.map_err(|e| RepositoryError::internal_error(e.to_string()))?;

		if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
			tokio::fs::create_dir_all(parent).await?;
		}

		let mut temp_name = self
			.path
			.file_name()
			.map(|name| name.to_os_string())
			.unwrap_or_default();
		temp_name.push(".tmp");
		let temp_path = self.path.with_file_name(temp_name);

		tokio::fs::write(&temp_path, content).await?;
		tokio::fs::rename(&temp_path, &self.path).await?;
		Ok(())
	}

	/// Persists the change first; memory is only updated once the file holds it
	async fn apply(&self, key: &str, value: Option<&str>) -> Result<(), RepositoryError> {
		let _guard = self.write_lock.lock().await;

		let mut next = self.values.read().unwrap_or_else(PoisonError::into_inner).clone();
		let old_value = match value {
			Some(value) => next.insert(key.to_string(), value.to_string()),
			None => next.remove(key),
		};

		if old_value.as_deref() == value {
			return Ok(());
		}

		self.persist(&next).await?;
		*self.values.write().unwrap_or_else(PoisonError::into_inner) = next;

		// No subscribers is not an error
		let _ = self.changes.send(ConfigChange {
			key: key.to_string(),
			old_value,
			new_value: value.map(String::from),
		});
		Ok(())
	}
}

#[async_trait]
impl ConfigStore for FileConfigStore {
	fn get(&self, key: &str) -> Option<String> {
		let stored = self
			.values
			.read()
			.unwrap_or_else(PoisonError::into_inner)
			.get(key)
			.cloned();
		stored.or_else(|| std::env::var(key).ok())
	}

	async fn set(&self, key: &str, value: &str) -> Result<(), RepositoryError> {
		self.apply(key, Some(value)).await
	}

	async fn remove(&self, key: &str) -> Result<(), RepositoryError> {
		self.apply(key, None).await
	}

	fn keys(&self) -> Vec<String> {
		self.values
			.read()
			.unwrap_or_else(PoisonError::into_inner)
			.keys()
			.cloned()
			.collect()
	}

	fn subscribe(&self) -> broadcast::Receiver<ConfigChange> {
		self.changes.subscribe()
	}
}
