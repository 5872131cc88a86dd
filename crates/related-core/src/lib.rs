//! # related-core
//!
//! Core logic for git-find-related: listing the commits of a feature branch,
//! replaying them pairwise inside a throwaway branch, and scoring how much the
//! later commit of each pair overlaps the earlier one.

pub mod commits;
pub mod config;
mod error;
pub mod interrupt;
pub mod oracle;
pub mod sandbox;
pub mod scorer;

#[cfg(test)]
mod test_mocks;
#[cfg(test)]
mod test_support;

pub use commits::list_commits;
pub use config::{Config, GeneralConfig};
pub use error::{Error, Result};
pub use interrupt::Interrupt;
pub use sandbox::{ExperimentOutcome, Sandbox, with_sandbox};
pub use scorer::{PairReport, ScoredPair, Verdict, score_pairs};
