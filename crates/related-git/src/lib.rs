//! # related-git
//!
//! Git backend for git-find-related, built on git2-rs with a few operations
//! delegated to the `git` executable. Provides ref and history queries,
//! cherry-picks with a distinguishable conflict outcome, and the shortstat
//! summaries the relatedness score is computed from.

mod command;
mod commit;
mod error;
mod repository;
pub mod shortstat;
mod traits;


pub use commit::{Commit, ReplayOutcome};
pub use error::{Error, Result};
pub use git2::Oid;
pub use repository::Repository;
pub use shortstat::ShortStat;
pub use traits::{GitOps, SandboxOps};
