//! Stellar account notifier entry point.
//!
//! Watches one account's operation feed on Horizon and e-mails a description of every new
//! operation. The position in the feed is persisted after each operation, so a restart
//! resumes exactly where the previous run stopped.
//!
//! # Flow
//! 1. Loads `.env`, applies CLI overrides and sets up logging
//! 2. Opens the configuration store and validates the settings
//! 3. Either prints the claimable balance report (`--claimable`) and exits, or
//! 4. Runs the stream monitor until Ctrl+C

use stellar_notifier::{
	bootstrap::{
		claimable_report, initialize_services, load_config_store, load_settings,
		spawn_config_change_logger,
	},
	models::{SmtpSettings, WatchSettings},
	repositories::ConfigStore,
	services::horizon::HorizonClient,
	utils::{
		constants::{
			CONFIG_PATH_ENV, DEFAULT_CONFIG_PATH, DEFAULT_METRICS_ADDRESS, MAX_LOOKAHEAD_DAYS,
		},
		logging::{setup_logging, LoggingConfig},
		metrics::server::create_metrics_server,
	},
};

use clap::{value_parser, Arg, ArgMatches, Command};
use dotenvy::dotenv;
use std::{
	env::{set_var, var},
	sync::Arc,
};
use tokio::sync::watch;
use tracing::{error, info};

fn cli() -> Command {
	Command::new("stellar-notifier")
		.version(env!("CARGO_PKG_VERSION"))
		.about(
			"Watches a Stellar account and sends an e-mail notification for every operation \
			 affecting it.",
		)
		.arg(
			Arg::new("config")
				.long("config")
				.help("Path to the JSON configuration store (default: config/notifier.json)")
				.value_name("PATH"),
		)
		.arg(
			Arg::new("log-file")
				.long("log-file")
				.help("Write logs to file instead of stdout")
				.action(clap::ArgAction::SetTrue),
		)
		.arg(
			Arg::new("log-level")
				.long("log-level")
				.help("Set log level (trace, debug, info, warn, error)")
				.value_name("LEVEL"),
		)
		.arg(
			Arg::new("log-path")
				.long("log-path")
				.help("Path to store log files (default: logs/)")
				.value_name("PATH"),
		)
		.arg(
			Arg::new("metrics-address")
				.long("metrics-address")
				.help("Address to start the metrics server on (default: 127.0.0.1:8081)")
				.value_name("HOST:PORT"),
		)
		.arg(
			Arg::new("metrics")
				.long("metrics")
				.help("Enable metrics server")
				.action(clap::ArgAction::SetTrue),
		)
		.arg(
			Arg::new("claimable")
				.long("claimable")
				.help("Print the balances the account can claim, then exit")
				.action(clap::ArgAction::SetTrue),
		)
		.arg(
			Arg::new("lookahead-days")
				.long("lookahead-days")
				.help("Evaluate claim conditions this many days from now (default: 0)")
				.value_name("DAYS")
				.value_parser(value_parser!(u32).range(0..=MAX_LOOKAHEAD_DAYS))
				.default_value("0"),
		)
}

/// Copies logging flags into the environment unless the variables are already set
fn apply_logging_overrides(matches: &ArgMatches) {
	if matches.get_flag("log-file") && var("LOG_MODE").is_err() {
		set_var("LOG_MODE", "file");
	}

	if let Some(level) = matches.get_one::<String>("log-level") {
		if var("LOG_LEVEL").is_err() {
			set_var("LOG_LEVEL", level);
		}
	}

	if let Some(path) = matches.get_one::<String>("log-path") {
		if var("LOG_DATA_DIR").is_err() {
			set_var("LOG_DATA_DIR", path);
		}
	}
}

/// Prints the claimable balance report and returns
async fn run_claimable_report(settings: &WatchSettings, lookahead_days: u32) -> anyhow::Result<()> {
	let source = HorizonClient::new(&settings.horizon_url)?;
	let as_of = chrono::Duration::try_days(i64::from(lookahead_days))
		.and_then(|lookahead| chrono::Utc::now().checked_add_signed(lookahead))
		.ok_or_else(|| anyhow::anyhow!("lookahead of {} days is out of range", lookahead_days))?;

	info!(account = %settings.account_id, as_of = %as_of, "Fetching claimable balances");
	let lines = claimable_report(&source, settings, as_of).await?;

	if lines.is_empty() {
		info!("No claimable balances found");
	}
	for line in lines {
		info!("{}", line);
	}
	Ok(())
}

/// Main entry point for the account notifier.
///
/// # Errors
/// Returns an error if the settings are missing or invalid, or if the services cannot be
/// created.
#[tokio::main]
async fn main() -> anyhow::Result<()> {
	let matches = cli().get_matches();

	// Load environment variables from .env file
	dotenv().ok();
	apply_logging_overrides(&matches);

	let _log_guard = setup_logging(&LoggingConfig::from_env())
		.map_err(|e| anyhow::anyhow!("Failed to setup logging: {}", e))?;

	let config_path = matches
		.get_one::<String>("config")
		.cloned()
		.or_else(|| var(CONFIG_PATH_ENV).ok())
		.unwrap_or_else(|| DEFAULT_CONFIG_PATH.to_string());

	let store = load_config_store(&config_path).await?;
	let watch_settings: WatchSettings = load_settings(&*store)?;
	info!(config = %config_path, settings = ?watch_settings, "Watch settings loaded");

	if matches.get_flag("claimable") {
		let lookahead_days = matches.get_one::<u32>("lookahead-days").copied().unwrap_or(0);
		return run_claimable_report(&watch_settings, lookahead_days).await;
	}

	let smtp: SmtpSettings = load_settings(&*store)?;
	info!(settings = ?smtp, "SMTP settings loaded");

	let store: Arc<dyn ConfigStore> = store;
	let mut monitor = initialize_services(store.clone(), &watch_settings, &smtp)
		.map_err(|e| anyhow::anyhow!("Failed to initialize services: {}", e))?;
	let _config_logger = spawn_config_change_logger(&*store);

	let metrics_enabled =
		matches.get_flag("metrics") || var("METRICS_ENABLED").map(|v| v == "true").unwrap_or(false);
	let metrics_address = matches
		.get_one::<String>("metrics-address")
		.cloned()
		.unwrap_or_else(|| DEFAULT_METRICS_ADDRESS.to_string());

	let metrics_server = if metrics_enabled {
		info!("Metrics server enabled, starting on {}", metrics_address);
		match create_metrics_server(metrics_address) {
			Ok(server) => Some(server),
			Err(e) => {
				error!("Failed to create metrics server: {}", e);
				None
			}
		}
	} else {
		info!("Metrics server disabled. Use --metrics flag or METRICS_ENABLED=true to enable");
		None
	};

	let (shutdown_tx, shutdown_rx) = watch::channel(false);
	let mut monitor_handle = tokio::spawn(async move { monitor.run(shutdown_rx).await });

	info!("Service started. Press Ctrl+C to shutdown");

	let ctrl_c = tokio::signal::ctrl_c();
	let metrics_future = async {
		match metrics_server {
			Some(server) => server.await,
			None => std::future::pending().await,
		}
	};

	tokio::select! {
		result = ctrl_c => {
			if let Err(e) = result {
				error!("Error waiting for Ctrl+C: {}", e);
			}
			info!("Shutdown signal received, stopping services...");
		}
		result = metrics_future => {
			if let Err(e) = result {
				error!("Metrics server error: {}", e);
			}
			info!("Metrics server stopped, shutting down services...");
		}
		result = &mut monitor_handle => {
			return match result {
				Ok(Ok(())) => Ok(()),
				Ok(Err(e)) => Err(anyhow::anyhow!("Stream monitor failed: {}", e)),
				Err(e) => Err(anyhow::anyhow!("Stream monitor task failed: {}", e)),
			};
		}
	}

	let _ = shutdown_tx.send(true);
	match monitor_handle.await {
		Ok(Ok(())) => {}
		Ok(Err(e)) => error!("Stream monitor failed: {}", e),
		Err(e) => error!("Stream monitor task failed: {}", e),
	}

	info!("Shutdown complete");
	Ok(())
}
