//! Horizon ledger source.
//!
//! - `client`: The [`LedgerSource`] interface and its Horizon implementation
//! - `transport`: HTTP transport with retries
//! - `error`: Error taxonomy of the source

mod client;
mod error;
mod transport;

pub use client::{HorizonClient, LedgerSource};
pub use error::LedgerSourceError;
pub use transport::{HorizonHttpTransport, HorizonTransport};
