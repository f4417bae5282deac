//! Integration tests for the file backed configuration store.

use std::fs;
use tempfile::TempDir;

use stellar_notifier::repositories::{
	ConfigChange, ConfigStore, FileConfigStore, RepositoryError,
};

fn write_config(dir: &TempDir, content: &str) -> std::path::PathBuf {
	let path = dir.path().join("notifier.json");
	fs::write(&path, content).unwrap();
	path
}

#[tokio::test]
async fn test_load_existing_file() {
	let dir = TempDir::new().unwrap();
	let path = write_config(
		&dir,
		r#"{"AccountId": "GBIA4FH6TV64KSPDAJCNUQSM7PFL4ILGUVJDPCLUOPJ7ONMKBBVUQHRO", "mail.smtp.port": 465}"#,
	);

	let store = FileConfigStore::load(&path).await.unwrap();

	assert_eq!(
		store.get("AccountId").as_deref(),
		Some("GBIA4FH6TV64KSPDAJCNUQSM7PFL4ILGUVJDPCLUOPJ7ONMKBBVUQHRO")
	);
	assert_eq!(store.get("mail.smtp.port").as_deref(), Some("465"));
	assert_eq!(store.keys(), vec!["AccountId", "mail.smtp.port"]);
	assert_eq!(store.path(), path.as_path());
}

#[tokio::test]
async fn test_missing_file_is_an_empty_store() {
	let dir = TempDir::new().unwrap();
	let path = dir.path().join("absent").join("notifier.json");

	let store = FileConfigStore::load(&path).await.unwrap();
	assert!(store.keys().is_empty());

	// The first write creates the file and its directory
	store.set("lastPagingToken", "1").await.unwrap();
	assert!(path.exists());
}

#[tokio::test]
async fn test_invalid_content_fails_to_load() {
	let dir = TempDir::new().unwrap();
	let path = write_config(&dir, "AccountId = GABC");

	let result = FileConfigStore::load(&path).await;
	assert!(matches!(result, Err(RepositoryError::LoadError(_))));
}

#[tokio::test]
async fn test_set_survives_reload() {
	let dir = TempDir::new().unwrap();
	let path = write_config(&dir, r#"{"mail.smtp.host": "smtp.example.com"}"#);

	let store = FileConfigStore::load(&path).await.unwrap();
	store.set("lastPagingToken", "12884905985").await.unwrap();

	let reloaded = FileConfigStore::load(&path).await.unwrap();
	assert_eq!(reloaded.get("lastPagingToken").as_deref(), Some("12884905985"));
	assert_eq!(reloaded.get("mail.smtp.host").as_deref(), Some("smtp.example.com"));

	let leftovers: Vec<_> = fs::read_dir(dir.path())
		.unwrap()
		.filter_map(Result::ok)
		.filter(|entry| entry.file_name().to_string_lossy().ends_with(".tmp"))
		.collect();
	assert!(leftovers.is_empty());
}

#[tokio::test]
async fn test_remove_survives_reload() {
	let dir = TempDir::new().unwrap();
	let path = write_config(&dir, r#"{"lastPagingToken": "5", "ExcludedTokens": "SPAM"}"#);

	let store = FileConfigStore::load(&path).await.unwrap();
	store.remove("lastPagingToken").await.unwrap();

	let reloaded = FileConfigStore::load(&path).await.unwrap();
	assert_eq!(reloaded.keys(), vec!["ExcludedTokens"]);
}

#[tokio::test]
async fn test_changes_are_broadcast() {
	let dir = TempDir::new().unwrap();
	let path = write_config(&dir, r#"{"lastPagingToken": "5"}"#);

	let store = FileConfigStore::load(&path).await.unwrap();
	let mut changes = store.subscribe();

	store.set("lastPagingToken", "6").await.unwrap();
	store.set("lastPagingToken", "6").await.unwrap();
	store.remove("lastPagingToken").await.unwrap();

	assert_eq!(
		changes.recv().await.unwrap(),
		ConfigChange {
			key: "lastPagingToken".to_string(),
			old_value: Some("5".to_string()),
			new_value: Some("6".to_string()),
		}
	);
	// The unchanged write is not announced
	assert_eq!(
		changes.recv().await.unwrap(),
		ConfigChange {
			key: "lastPagingToken".to_string(),
			old_value: Some("6".to_string()),
			new_value: None,
		}
	);
	assert!(changes.try_recv().is_err());
}

#[tokio::test]
async fn test_failed_write_is_not_applied() {
	let dir = TempDir::new().unwrap();
	let blocker = dir.path().join("blocker");
	fs::write(&blocker, "").unwrap();
	let path = blocker.join("notifier.json");

	let store = FileConfigStore::load(&path).await.unwrap();
	let mut changes = store.subscribe();

	let result = store.set("lastPagingToken", "42").await;
	assert!(matches!(result, Err(RepositoryError::PersistError(_))));
	assert_eq!(store.get("lastPagingToken"), None);
	assert!(store.keys().is_empty());

	// Retrying the same value must hit the disk again rather than report success
	let retry = store.set("lastPagingToken", "42").await;
	assert!(matches!(retry, Err(RepositoryError::PersistError(_))));
	assert!(!path.exists());
	assert!(changes.try_recv().is_err());
}

#[tokio::test]
async fn test_failed_write_keeps_previous_value() {
	let dir = TempDir::new().unwrap();
	let path = write_config(&dir, r#"{"lastPagingToken": "41", "AccountId": "GABC"}"#);
	let store = FileConfigStore::load(&path).await.unwrap();

	// A directory in place of the temporary file makes every write fail
	let temp_path = dir.path().join("notifier.json.tmp");
	fs::create_dir(&temp_path).unwrap();

	assert!(store.set("lastPagingToken", "42").await.is_err());
	assert!(store.remove("AccountId").await.is_err());
	assert_eq!(store.get("lastPagingToken").as_deref(), Some("41"));
	assert_eq!(store.get("AccountId").as_deref(), Some("GABC"));

	fs::remove_dir(&temp_path).unwrap();
	store.set("lastPagingToken", "42").await.unwrap();

	let reloaded = FileConfigStore::load(&path).await.unwrap();
	assert_eq!(reloaded.get("lastPagingToken").as_deref(), Some("42"));
	assert_eq!(reloaded.get("AccountId").as_deref(), Some("GABC"));
}

#[tokio::test]
async fn test_environment_fallback() {
	let dir = TempDir::new().unwrap();
	let path = write_config(&dir, r#"{"STELLAR_NOTIFIER_TEST_STORED": "from file"}"#);

	std::env::set_var("STELLAR_NOTIFIER_TEST_STORED", "from env");
	std::env::set_var("STELLAR_NOTIFIER_TEST_ENV_ONLY", "from env");

	let store = FileConfigStore::load(&path).await.unwrap();

	assert_eq!(
		store.get("STELLAR_NOTIFIER_TEST_STORED").as_deref(),
		Some("from file")
	);
	assert_eq!(
		store.get("STELLAR_NOTIFIER_TEST_ENV_ONLY").as_deref(),
		Some("from env")
	);
	assert!(!store
		.keys()
		.contains(&"STELLAR_NOTIFIER_TEST_ENV_ONLY".to_string()));
	assert_eq!(store.get("STELLAR_NOTIFIER_TEST_UNSET"), None);

	std::env::remove_var("STELLAR_NOTIFIER_TEST_STORED");
	std::env::remove_var("STELLAR_NOTIFIER_TEST_ENV_ONLY");
}
