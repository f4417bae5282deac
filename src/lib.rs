//! Stellar account notifier library.
//!
//! Watches a single account's operation feed on the Stellar network and turns every
//! operation into an e-mail notification. The crate is organised as:
//!
//! - `bootstrap`: Settings loading and service wiring
//! - `models`: Ledger operations, assets, predicates, notifications and settings
//! - `repositories`: The key-value configuration / cursor store
//! - `services`: Horizon data source, formatter, filters, notification sink and the
//!   stream monitor
//! - `utils`: Logging, HTTP, metrics and test helpers

pub mod bootstrap;
pub mod models;
pub mod repositories;
pub mod services;
pub mod utils;
