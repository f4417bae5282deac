//! Logging utilities for the application
//!
//! Logging is configured through environment variables, which the CLI may override:
//!
//! - `LOG_MODE`: `stdout` (default) or `file`
//! - `LOG_LEVEL`: default filter when `RUST_LOG` is not set (default `info`)
//! - `LOG_DATA_DIR`: directory of the daily rolling log file in file mode (default `logs/`)
//!
//! Records emitted through the `log` macros (error constructors) are bridged into `tracing`.
use std::path::PathBuf;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{filter::EnvFilter, fmt, prelude::*};

use crate::utils::constants::{DEFAULT_LOG_DIR, DEFAULT_LOG_LEVEL, LOG_FILE_PREFIX};

/// Where log records are written
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LogMode {
	Stdout,
	File,
}

/// Logging setup derived from the environment
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoggingConfig {
	pub mode: LogMode,
	/// Filter used when `RUST_LOG` is not set
	pub level: String,
	/// Directory of the rolling log file
	pub directory: PathBuf,
}

impl LoggingConfig {
	/// Reads `LOG_MODE`, `LOG_LEVEL` and `LOG_DATA_DIR`
	pub fn from_env() -> Self {
		let mode = match std::env::var("LOG_MODE") {
			Ok(mode) if mode.eq_ignore_ascii_case("file") => LogMode::File,
			_ => LogMode::Stdout,
		};

		Self {
			mode,
			level: std::env::var("LOG_LEVEL").unwrap_or_else(|_| DEFAULT_LOG_LEVEL.to_string()),
			directory: std::env::var("LOG_DATA_DIR")
				.map(PathBuf::from)
				.unwrap_or_else(|_| PathBuf::from(DEFAULT_LOG_DIR)),
		}
	}

	fn filter(&self) -> EnvFilter {
		EnvFilter::try_from_default_env()
			.or_else(|_| EnvFilter::try_new(&self.level))
			.unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_LEVEL))
	}
}

/// Setup logging for the application
///
/// In file mode the returned guard must be kept alive for the lifetime of the process,
/// dropping it flushes and stops the background writer.
pub fn setup_logging(
	config: &LoggingConfig,
) -> Result<Option<WorkerGuard>, Box<dyn std::error::Error + Send + Sync + 'static>> {
	match config.mode {
		LogMode::Stdout => {
			setup_logging_with_writer(config.filter(), std::io::stdout, true)?;
			Ok(None)
		}
		LogMode::File => {
			std::fs::create_dir_all(&config.directory)?;
			let appender = tracing_appender::rolling::daily(&config.directory, LOG_FILE_PREFIX);
			let (writer, guard) = tracing_appender::non_blocking(appender);
			setup_logging_with_writer(config.filter(), writer, false)?;
			Ok(Some(guard))
		}
	}
}

/// Setup logging for the application with a custom writer
pub fn setup_logging_with_writer<W>(
	filter: EnvFilter,
	writer: W,
	ansi: bool,
) -> Result<(), Box<dyn std::error::Error + Send + Sync + 'static>>
where
	W: for<'writer> tracing_subscriber::fmt::MakeWriter<'writer> + Send + Sync + 'static,
{
	tracing_subscriber::registry()
		.with(filter)
		.with(
			fmt::layer()
				.with_writer(writer)
				.with_ansi(ansi)
				.event_format(
					fmt::format()
						.with_level(true)
						.with_target(true)
						.with_thread_ids(false)
						.with_thread_names(false)
						.with_ansi(ansi)
						.compact(),
				),
		)
		.try_init()?;
	Ok(())
}
