//! Metrics module for the application.
//!
//! - This module contains the global Prometheus registry.
//! - Defines the counters of the operation pipeline.

pub mod server;
use lazy_static::lazy_static;
use prometheus::{Encoder, IntCounter, IntCounterVec, Opts, Registry, TextEncoder};

lazy_static! {
	// Global Prometheus registry.
	pub static ref REGISTRY: Registry = Registry::new();

	// Operations processed by the stream monitor, labelled by Horizon operation type.
	pub static ref OPERATIONS_PROCESSED: IntCounterVec = {
		let counter = IntCounterVec::new(
			Opts::new("operations_processed_total", "Operations processed by the stream monitor"),
			&["kind"]
		).unwrap();
		REGISTRY.register(Box::new(counter.clone())).unwrap();
		counter
	};

	// Notifications handed to the sink successfully.
	pub static ref NOTIFICATIONS_SENT: IntCounter = {
		let counter = IntCounter::new("notifications_sent_total", "Notifications delivered to the sink").unwrap();
		REGISTRY.register(Box::new(counter.clone())).unwrap();
		counter
	};

	// Notifications the sink rejected.
	pub static ref NOTIFICATIONS_FAILED: IntCounter = {
		let counter = IntCounter::new("notifications_failed_total", "Notifications the sink failed to deliver").unwrap();
		REGISTRY.register(Box::new(counter.clone())).unwrap();
		counter
	};

	// Operations suppressed by the excluded token list.
	pub static ref NOTIFICATIONS_SUPPRESSED: IntCounter = {
		let counter = IntCounter::new("notifications_suppressed_total", "Operations that produced no notification").unwrap();
		REGISTRY.register(Box::new(counter.clone())).unwrap();
		counter
	};

	// Feed entries that could not be decoded.
	pub static ref MALFORMED_OPERATIONS: IntCounter = {
		let counter = IntCounter::new("malformed_operations_total", "Operations skipped because they could not be decoded").unwrap();
		REGISTRY.register(Box::new(counter.clone())).unwrap();
		counter
	};

	// Failed polls of the ledger source.
	pub static ref SOURCE_FAILURES: IntCounter = {
		let counter = IntCounter::new("source_failures_total", "Failed polls of the ledger source").unwrap();
		REGISTRY.register(Box::new(counter.clone())).unwrap();
		counter
	};

	// Failed cursor writes.
	pub static ref CURSOR_PERSIST_FAILURES: IntCounter = {
		let counter = IntCounter::new("cursor_persist_failures_total", "Cursor writes that failed").unwrap();
		REGISTRY.register(Box::new(counter.clone())).unwrap();
		counter
	};
}

/// Gather all metrics and encode into the provided format.
pub fn gather_metrics() -> Result<Vec<u8>, Box<dyn std::error::Error>> {
	let encoder = TextEncoder::new();
	let metric_families = REGISTRY.gather();
	let mut buffer = Vec::new();
	encoder.encode(&metric_families, &mut buffer)?;
	Ok(buffer)
}

/// Forces registration of every metric so the first scrape lists them all.
pub fn init_metrics() {
	lazy_static::initialize(&OPERATIONS_PROCESSED);
	lazy_static::initialize(&NOTIFICATIONS_SENT);
	lazy_static::initialize(&NOTIFICATIONS_FAILED);
	lazy_static::initialize(&NOTIFICATIONS_SUPPRESSED);
	lazy_static::initialize(&MALFORMED_OPERATIONS);
	lazy_static::initialize(&SOURCE_FAILURES);
	lazy_static::initialize(&CURSOR_PERSIST_FAILURES);
}
