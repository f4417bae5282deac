//! Integration tests for settings loading and service wiring.

use chrono::{Duration, Utc};
use std::{fs, sync::Arc, time::Duration as StdDuration};
use tempfile::TempDir;

use stellar_notifier::{
	bootstrap::{
		claimable_report, create_stream_monitor, load_config_store, load_settings,
		spawn_config_change_logger,
	},
	models::{ConfigError, Predicate, SmtpSettings, WatchSettings},
	repositories::ConfigStore,
	services::horizon::{LedgerSource, LedgerSourceError},
	utils::tests::builders::stellar::{
		claimable_balance::ClaimableBalanceBuilder, operation::OperationBuilder,
	},
};

use crate::integration::mocks::{
	MockLedgerSource, MockNotificationSink, ISSUER, OTHER_ACCOUNT, RECIPIENT, WATCHED_ACCOUNT,
};

fn write_config(dir: &TempDir, content: serde_json::Value) -> std::path::PathBuf {
	let path = dir.path().join("notifier.json");
	fs::write(&path, content.to_string()).unwrap();
	path
}

fn watch_settings() -> WatchSettings {
	WatchSettings {
		account_id: WATCHED_ACCOUNT.to_string(),
		horizon_url: "https://horizon.stellar.org".to_string(),
		poll_interval: StdDuration::from_secs(5),
		excluded_tokens: vec![],
		claimable_block_list: vec!["trumpcoin".to_string(), "TRUTHSOCIAL".to_string()],
	}
}

#[tokio::test]
async fn test_load_settings_from_file() {
	let dir = TempDir::new().unwrap();
	let path = write_config(
		&dir,
		serde_json::json!({
			"AccountId": WATCHED_ACCOUNT,
			"ExcludedTokens": "SPAM, JUNK",
			"poll.interval.seconds": 30,
			"mail.smtp.host": "smtp.example.com",
			"mail.smtp.port": 465,
			"mail.smtp.auth": true,
			"mail.smtp.starttls.enable": false,
			"mail.user": "notifier@example.com",
			"mail.password": "secret",
			"mail.recipient": RECIPIENT
		}),
	);

	let store = load_config_store(&path).await.unwrap();
	let watch: WatchSettings = load_settings(&*store).unwrap();
	let smtp: SmtpSettings = load_settings(&*store).unwrap();

	assert_eq!(watch.account_id, WATCHED_ACCOUNT);
	assert_eq!(watch.excluded_tokens, vec!["SPAM", "JUNK"]);
	assert_eq!(watch.poll_interval, StdDuration::from_secs(30));
	assert_eq!(watch.claimable_block_list, vec!["trumpcoin", "TRUTHSOCIAL"]);
	assert_eq!(smtp.port, 465);
	assert!(smtp.auth);
	assert!(!smtp.starttls);
	assert_eq!(smtp.recipient, RECIPIENT);
	assert!(!format!("{:?}", smtp).contains("secret"));
}

#[tokio::test]
async fn test_missing_account_id_is_fatal() {
	let dir = TempDir::new().unwrap();
	let path = write_config(&dir, serde_json::json!({ "ExcludedTokens": "SPAM" }));

	let store = load_config_store(&path).await.unwrap();
	let result = load_settings::<WatchSettings>(&*store);

	assert!(matches!(result, Err(ConfigError::MissingSetting(_))));
}

#[tokio::test]
async fn test_invalid_account_id_is_fatal() {
	let dir = TempDir::new().unwrap();
	let path = write_config(&dir, serde_json::json!({ "AccountId": "GNOTANACCOUNT" }));

	let store = load_config_store(&path).await.unwrap();
	let result = load_settings::<WatchSettings>(&*store);

	assert!(matches!(result, Err(ConfigError::ValidationError(_))));
}

#[tokio::test]
async fn test_unreadable_store_is_a_file_error() {
	let dir = TempDir::new().unwrap();
	let path = dir.path().join("notifier.json");
	fs::write(&path, "[\"not\", \"an\", \"object\"]").unwrap();

	let result = load_config_store(&path).await;
	assert!(matches!(result, Err(ConfigError::FileError(_))));
}

#[tokio::test]
async fn test_stream_monitor_persists_cursor_in_store() {
	let dir = TempDir::new().unwrap();
	let path = write_config(&dir, serde_json::json!({ "AccountId": WATCHED_ACCOUNT }));
	let store = load_config_store(&path).await.unwrap();
	let watch: WatchSettings = load_settings(&*store).unwrap();

	let mut source = MockLedgerSource::new();
	source
		.expect_fetch_operations()
		.times(1)
		.returning(|_, _, _| {
			Ok(vec![OperationBuilder::new()
				.token("12884905985")
				.source_account(OTHER_ACCOUNT)
				.build()
				.into()])
		});
	let mut sink = MockNotificationSink::new();
	sink.expect_send()
		.withf(|_, _, recipient| recipient == RECIPIENT)
		.times(1)
		.returning(|_, _, _| Ok(()));

	let mut monitor = create_stream_monitor(
		store.clone(),
		&watch,
		RECIPIENT,
		Arc::new(source),
		Arc::new(sink),
	);
	monitor.resume().await.unwrap();
	monitor.poll_once().await.unwrap();

	assert_eq!(store.get("lastPagingToken").as_deref(), Some("12884905985"));
	let on_disk = fs::read_to_string(&path).unwrap();
	assert!(on_disk.contains("12884905985"));
}

#[tokio::test]
async fn test_claimable_report() {
	let now = Utc::now();
	let mut source = MockLedgerSource::new();
	source
		.expect_fetch_claimable_balances()
		.withf(|account| account == WATCHED_ACCOUNT)
		.times(1)
		.returning(move |_| {
			Ok(vec![
				ClaimableBalanceBuilder::new()
					.issued("USDC", ISSUER)
					.amount("25.0000000")
					.claimant(WATCHED_ACCOUNT, Predicate::Unconditional)
					.build(),
				ClaimableBalanceBuilder::new()
					.issued("trumpcoin", ISSUER)
					.claimant(WATCHED_ACCOUNT, Predicate::Unconditional)
					.build(),
				ClaimableBalanceBuilder::new()
					.amount("3.0000000")
					.claimant(
						WATCHED_ACCOUNT,
						Predicate::AbsoluteBefore(now - Duration::days(1)),
					)
					.build(),
				ClaimableBalanceBuilder::new()
					.claimant(OTHER_ACCOUNT, Predicate::Unconditional)
					.build(),
			])
		});

	let lines = claimable_report(&source as &dyn LedgerSource, &watch_settings(), now)
		.await
		.unwrap();

	assert_eq!(lines, vec!["Claimable Balance 25.0000000 USDC Unconditional"]);
}

#[tokio::test]
async fn test_claimable_report_propagates_source_error() {
	let mut source = MockLedgerSource::new();
	source
		.expect_fetch_claimable_balances()
		.returning(|_| Err(LedgerSourceError::connection_error("timeout")));

	let result = claimable_report(&source, &watch_settings(), Utc::now()).await;
	assert!(matches!(result, Err(LedgerSourceError::ConnectionError(_))));
}

#[tokio::test]
async fn test_config_change_logger_stops_with_store() {
	let dir = TempDir::new().unwrap();
	let path = write_config(&dir, serde_json::json!({ "AccountId": WATCHED_ACCOUNT }));
	let store = load_config_store(&path).await.unwrap();

	let handle = spawn_config_change_logger(&*store);
	store.set("mail.password", "hunter2").await.unwrap();
	store.set("lastPagingToken", "1").await.unwrap();
	drop(store);

	tokio::time::timeout(StdDuration::from_secs(5), handle)
		.await
		.unwrap()
		.unwrap();
}
