//! Scoped temporary-branch isolation for destructive experiments.
//!
//! A [`Sandbox`] creates a throwaway branch, checks it out, and hands out the
//! only mutable path to the repository while it lives. Leaving the scope by
//! any route (return, `?`, panic) restores the working copy:
//!
//! 1. discard uncommitted and half-applied state,
//! 2. check out the branch that was active before,
//! 3. delete the throwaway branch.
//!
//! The order is fixed; git refuses to delete the checked-out branch.

use related_git::{GitOps, Oid, ReplayOutcome, SandboxOps};

use crate::error::{Error, Result};
use crate::oracle;

/// Result of replaying a commit inside a sandbox.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExperimentOutcome {
    /// Replay succeeded; changed lines relative to the measurement base.
    Applied(usize),
    /// Replay conflicted; nothing can be said about this pair.
    Conflict,
}

/// Guard owning the repository for the duration of an experiment.
#[derive(Debug)]
pub struct Sandbox<'r, R: SandboxOps> {
    repo: &'r mut R,
    name: String,
    start: Oid,
    previous: String,
    restored: bool,
}

impl<'r, R: SandboxOps> Sandbox<'r, R> {
    /// Create `name` at `start` and check it out.
    ///
    /// A leftover branch with the same name is repointed.
    ///
    /// # Errors
    /// Returns `TempBranchCollision` if `name` is the active branch, or the
    /// git error if the branch cannot be created or checked out (in which
    /// case the branch is removed again).
    pub fn open(repo: &'r mut R, name: &str, start: Oid) -> Result<Self> {
        let previous = repo.current_branch()?;
        if previous == name {
            return Err(Error::TempBranchCollision(name.into()));
        }

        repo.create_branch_at(name, start)?;
        let mut sandbox = Self {
            repo,
            name: name.into(),
            start,
            previous,
            restored: false,
        };
        sandbox.repo.checkout(name)?;

        tracing::debug!(branch = name, %start, "sandbox opened");
        Ok(sandbox)
    }

    /// Read-only view of the repository.
    #[must_use]
    pub fn repo(&self) -> &R {
        self.repo
    }

    /// Commit the sandbox was opened at.
    #[must_use]
    pub const fn start(&self) -> Oid {
        self.start
    }

    /// Branch that will be checked out again on exit.
    #[must_use]
    pub fn previous_branch(&self) -> &str {
        &self.previous
    }

    /// Force the temporary branch and working copy to `to`.
    ///
    /// # Errors
    /// Returns error if the reset fails.
    pub fn rewind(&mut self, to: Oid) -> Result<()> {
        self.repo.reset_branch(&self.name, to)?;
        Ok(())
    }

    /// Cherry-pick `commit` onto the sandbox and measure the result against
    /// `measure_base`.
    ///
    /// A conflict is returned as [`ExperimentOutcome::Conflict`], leaving the
    /// half-applied state for the next [`rewind`](Self::rewind) or for exit.
    ///
    /// # Errors
    /// Returns error if the cherry-pick fails for another reason or the
    /// result cannot be measured.
    pub fn replay(&mut self, commit: Oid, measure_base: Oid) -> Result<ExperimentOutcome> {
        match self.repo.cherry_pick(commit)? {
            ReplayOutcome::Conflict => Ok(ExperimentOutcome::Conflict),
            ReplayOutcome::Applied => {
                let lines = oracle::changed_lines_since(&*self.repo, measure_base)?;
                Ok(ExperimentOutcome::Applied(lines.unwrap_or(0)))
            }
        }
    }

    /// Restore the repository and report any failure.
    ///
    /// # Errors
    /// Returns the first error hit while restoring.
    pub fn close(mut self) -> Result<()> {
        self.restore()
    }

    fn restore(&mut self) -> Result<()> {
        if self.restored {
            return Ok(());
        }
        self.restored = true;

        // The checkout below is forced, so it still cleans up if this fails.
        let discarded = self.repo.discard_changes();
        self.repo.force_checkout(&self.previous)?;
        self.repo.delete_branch(&self.name)?;

        tracing::debug!(branch = %self.name, previous = %self.previous, "sandbox closed");
        Ok(discarded?)
    }
}

impl<R: SandboxOps> Drop for Sandbox<'_, R> {
    fn drop(&mut self) {
        if let Err(e) = self.restore() {
            tracing::warn!(
                error = %e,
                branch = %self.name,
                previous = %self.previous,
                "failed to restore repository after experiment"
            );
        }
    }
}

/// Run `body` inside a sandbox at `start`, restoring the repository afterwards.
///
/// If `body` fails, the repository status at that moment is captured into
/// [`Error::Experiment`] before restoration runs.
///
/// # Errors
/// Returns the error from opening the sandbox, from `body` (wrapped), or from
/// restoring after a successful `body`.
pub fn with_sandbox<'r, R, T, F>(repo: &'r mut R, name: &str, start: Oid, body: F) -> Result<T>
where
    R: SandboxOps,
    F: FnOnce(&mut Sandbox<'r, R>) -> Result<T>,
{
    let mut sandbox = Sandbox::open(repo, name, start)?;

    match body(&mut sandbox) {
        Ok(value) => {
            sandbox.close()?;
            Ok(value)
        }
        Err(error) => {
            let status = sandbox.repo().status_report().ok();
            tracing::error!(%error, %start, "experiment failed, restoring repository");
            if let Err(restore_error) = sandbox.close() {
                tracing::warn!(error = %restore_error, "restoration after failure also failed");
            }
            Err(Error::Experiment {
                commit: start,
                status,
                source: Box::new(error),
            })
        }
    }
}
