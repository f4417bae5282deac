//! Blockchain-specific model implementations.
//!
//! Only the Stellar ledger is supported. The submodule holds the records decoded
//! from Horizon: operations, assets, claim predicates and claimable balances.

pub mod stellar;
