//! Claim predicate evaluation and claimable balance filtering.
//!
//! Implements the pure selection logic used by the claimable balance report:
//! - Recursive evaluation and rendering of claim predicates
//! - Selection of the balances the watched account can currently claim

mod claimable;
mod predicate;

pub use claimable::{filter, render_report_line, ClaimableMatch, ClaimantMatching};
pub use predicate::{evaluate, render};
