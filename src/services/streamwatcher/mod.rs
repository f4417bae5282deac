//! Account operation stream monitoring.
//!
//! - `service`: The [`StreamMonitor`] polling loop
//! - `storage`: Cursor persistence
//! - `error`: Error taxonomy of the loop

mod error;
mod service;
mod storage;

pub use error::StreamWatcherError;
pub use service::{MonitorState, StreamMonitor, StreamMonitorConfig, WatchedAccountState};
pub use storage::{ConfigCursorStorage, CursorStorage};
