//! Trait abstractions for git operations.
//!
//! The capability set is split by mutability. [`GitOps`] only reads and takes
//! `&self`; [`SandboxOps`] changes refs or the working copy and takes
//! `&mut self`. Whoever holds the exclusive borrow is the only mutator, which
//! is how the sandbox in `related-core` keeps the working copy to itself.

use git2::Oid;

use crate::{Commit, ReplayOutcome, Result};

/// Read-only repository operations.
#[allow(clippy::missing_errors_doc)]
pub trait GitOps {
    // === Refs ===

    /// Get the current branch name.
    ///
    /// Returns an error if HEAD is detached.
    fn current_branch(&self) -> Result<String>;

    /// Check if a local branch exists.
    fn branch_exists(&self, name: &str) -> bool;

    /// Resolve a revision expression (branch, remote branch, SHA) to a commit.
    fn resolve_commit(&self, rev: &str) -> Result<Oid>;

    // === History ===

    /// Find the merge base of two commits.
    fn merge_base(&self, one: Oid, two: Oid) -> Result<Oid>;

    /// Commits reachable from `to` but not from `from`, oldest first.
    fn commits_between(&self, from: Oid, to: Oid) -> Result<Vec<Oid>>;

    /// Read the facts of a single commit.
    fn commit(&self, oid: Oid) -> Result<Commit>;

    // === Measurements ===

    /// Raw `git diff --shortstat <base>..HEAD` output.
    fn diff_shortstat(&self, base: Oid) -> Result<String>;

    /// Raw `git show --shortstat --format= <commit>` output.
    fn show_shortstat(&self, commit: Oid) -> Result<String>;

    /// Human-readable working copy status, for error reports.
    fn status_report(&self) -> Result<String>;
}

/// Operations that move refs or touch the working copy.
#[allow(clippy::missing_errors_doc)]
pub trait SandboxOps: GitOps {
    /// Create (or force-repoint) a local branch at `target`.
    fn create_branch_at(&mut self, name: &str, target: Oid) -> Result<()>;

    /// Checkout a local branch without touching untracked or ignored files.
    ///
    /// Fails with `CheckoutWouldOverwrite` instead of clobbering them.
    fn checkout(&mut self, branch: &str) -> Result<()>;

    /// Checkout a local branch, discarding changes to tracked files.
    fn force_checkout(&mut self, branch: &str) -> Result<()>;

    /// Point a branch at `target`; hard-resets the working copy if it is current.
    fn reset_branch(&mut self, branch: &str, target: Oid) -> Result<()>;

    /// Hard-reset the working copy to HEAD and drop any in-progress operation.
    fn discard_changes(&mut self) -> Result<()>;

    /// Delete a local branch. Fails if the branch is checked out.
    fn delete_branch(&mut self, name: &str) -> Result<()>;

    /// Cherry-pick `commit` onto HEAD, keeping it even if it becomes empty.
    fn cherry_pick(&mut self, commit: Oid) -> Result<ReplayOutcome>;
}
