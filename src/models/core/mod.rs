//! Core domain models for the account notifier.
//!
//! This module contains the fundamental data structures that represent:
//! - Cursors: Resumption markers into an account's operation feed
//! - Notifications: Rendered messages ready for delivery

mod cursor;
mod notification;

pub use cursor::Cursor;
pub use notification::Notification;
