//! Configuration and cursor store.
//!
//! The store is a flat key-value map persisted as a JSON object. Reads fall back to the
//! environment; writes are persisted atomically and announced to subscribers.

mod config_store;
mod error;

pub use config_store::{ConfigChange, ConfigStore, FileConfigStore};
pub use error::RepositoryError;
