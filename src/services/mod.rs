//! Core services implementing the notifier's business logic.
//!
//! This module contains the main service implementations:
//! - `filter`: Claim predicate evaluation and claimable balance selection
//! - `formatter`: Operation to notification formatting
//! - `horizon`: Ledger data source over the Horizon REST API
//! - `notification`: Notification delivery (e-mail)
//! - `streamwatcher`: The resumable operation stream monitor

pub mod filter;
pub mod formatter;
pub mod horizon;
pub mod notification;
pub mod streamwatcher;
