//! Repository wrapper providing high-level git operations.

use std::path::Path;

use git2::{BranchType, ErrorCode, Oid, RepositoryState, Sort, StatusOptions};

use crate::commit::{Commit, ReplayOutcome};
use crate::error::{Error, Result};
use crate::traits::{GitOps, SandboxOps};

/// High-level wrapper around a git repository.
///
/// Reading goes through [`GitOps`]; anything that moves a ref or rewrites the
/// working copy goes through [`SandboxOps`] and needs `&mut self`.
pub struct Repository {
    inner: git2::Repository,
}

impl Repository {
    /// Open a repository at the given path.
    ///
    /// # Errors
    /// Returns error if no repository found at path or any parent.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let inner = git2::Repository::discover(path)?;
        Ok(Self { inner })
    }

    /// Open the repository containing the current directory.
    ///
    /// # Errors
    /// Returns error if not inside a git repository.
    pub fn open_current() -> Result<Self> {
        Self::open(".")
    }

    /// Get the path to the repository root (workdir).
    #[must_use]
    pub fn workdir(&self) -> Option<&Path> {
        self.inner.workdir()
    }

    /// Get the path to the .git directory.
    #[must_use]
    pub fn git_dir(&self) -> &Path {
        self.inner.path()
    }

    /// Get the current repository state.
    #[must_use]
    pub fn state(&self) -> RepositoryState {
        self.inner.state()
    }

    /// Check if a cherry-pick is stopped half-way.
    #[must_use]
    pub fn is_cherry_picking(&self) -> bool {
        matches!(
            self.state(),
            RepositoryState::CherryPick | RepositoryState::CherryPickSequence
        )
    }

    // === Working directory state ===

    /// Check if tracked files are unmodified. Untracked files are ignored,
    /// since a hard reset leaves them alone.
    ///
    /// # Errors
    /// Returns error if status check fails.
    pub fn is_clean(&self) -> Result<bool> {
        let mut opts = StatusOptions::new();
        opts.include_untracked(false).include_ignored(false);
        let statuses = self.inner.statuses(Some(&mut opts))?;
        Ok(statuses.is_empty())
    }

    /// Ensure tracked files are unmodified, returning error if not.
    ///
    /// # Errors
    /// Returns `DirtyWorkingDirectory` if there are uncommitted changes.
    pub fn require_clean(&self) -> Result<()> {
        if self.is_clean()? {
            Ok(())
        } else {
            Err(Error::DirtyWorkingDirectory)
        }
    }

    /// Check whether the index holds unresolved conflict entries.
    pub(crate) fn index_has_conflicts(&self) -> Result<bool> {
        let mut index = self.inner.index()?;
        index.read(true)?;
        Ok(index.has_conflicts())
    }

    /// Check out `branch_name` with the given strategy and point HEAD at it.
    fn checkout_with(
        &self,
        branch_name: &str,
        opts: &mut git2::build::CheckoutBuilder<'_>,
    ) -> Result<()> {
        let branch = self
            .inner
            .find_branch(branch_name, BranchType::Local)
            .map_err(|_| Error::BranchNotFound(branch_name.into()))?;

        let object = branch.get().peel(git2::ObjectType::Commit)?;
        self.inner.checkout_tree(&object, Some(opts))?;
        self.inner.set_head(&format!("refs/heads/{branch_name}"))?;

        tracing::debug!(branch = branch_name, "checked out");
        Ok(())
    }

    // === Low-level access ===

    /// Get a reference to the underlying git2 repository.
    ///
    /// Use sparingly - prefer the trait methods.
    #[must_use]
    pub fn inner(&self) -> &git2::Repository {
        &self.inner
    }
}

impl GitOps for Repository {
    fn current_branch(&self) -> Result<String> {
        let head = self.inner.head()?;
        if !head.is_branch() {
            return Err(Error::DetachedHead);
        }

        head.shorthand()
            .map(String::from)
            .ok_or(Error::DetachedHead)
    }

    fn branch_exists(&self, name: &str) -> bool {
        self.inner.find_branch(name, BranchType::Local).is_ok()
    }

    fn resolve_commit(&self, rev: &str) -> Result<Oid> {
        let object = self
            .inner
            .revparse_single(rev)
            .map_err(|_| Error::RefNotFound(rev.into()))?;
        Ok(object.peel_to_commit()?.id())
    }

    fn merge_base(&self, one: Oid, two: Oid) -> Result<Oid> {
        self.inner.merge_base(one, two).map_err(|e| {
            if e.code() == ErrorCode::NotFound {
                Error::NoMergeBase(one.to_string(), two.to_string())
            } else {
                e.into()
            }
        })
    }

    fn commits_between(&self, from: Oid, to: Oid) -> Result<Vec<Oid>> {
        let mut revwalk = self.inner.revwalk()?;
        revwalk.set_sorting(Sort::TOPOLOGICAL | Sort::REVERSE)?;
        revwalk.push(to)?;
        revwalk.hide(from)?;

        Ok(revwalk.collect::<std::result::Result<Vec<_>, _>>()?)
    }

    fn commit(&self, oid: Oid) -> Result<Commit> {
        let commit = self.inner.find_commit(oid)?;
        Ok(Commit::from_git2(&commit))
    }

    fn diff_shortstat(&self, base: Oid) -> Result<String> {
        self.git_stdout(&["diff", "--shortstat", &format!("{base}..HEAD")])
    }

    fn show_shortstat(&self, commit: Oid) -> Result<String> {
        self.git_stdout(&["show", "--shortstat", "--format=", &commit.to_string()])
    }

    fn status_report(&self) -> Result<String> {
        self.git_stdout(&["status"])
    }
}

impl SandboxOps for Repository {
    fn create_branch_at(&mut self, name: &str, target: Oid) -> Result<()> {
        let commit = self.inner.find_commit(target)?;
        self.inner.branch(name, &commit, true)?;
        tracing::debug!(branch = name, %target, "created branch");
        Ok(())
    }

    fn checkout(&mut self, branch_name: &str) -> Result<()> {
        let mut opts = git2::build::CheckoutBuilder::new();
        opts.safe().overwrite_ignored(false);

        self.checkout_with(branch_name, &mut opts).map_err(|e| match e {
            Error::Git2(inner) if inner.code() == ErrorCode::Conflict => {
                Error::CheckoutWouldOverwrite(branch_name.into())
            }
            other => other,
        })
    }

    fn force_checkout(&mut self, branch_name: &str) -> Result<()> {
        let mut opts = git2::build::CheckoutBuilder::new();
        opts.force();
        self.checkout_with(branch_name, &mut opts)
    }

    fn reset_branch(&mut self, branch_name: &str, target: Oid) -> Result<()> {
        let commit = self.inner.find_commit(target)?;
        let reference_name = format!("refs/heads/{branch_name}");
        let short = target.to_string();

        self.inner.reference(
            &reference_name,
            target,
            true, // force
            &format!("find-related: reset to {}", short.get(..8).unwrap_or(&short)),
        )?;

        // If this is the current branch, also update working directory
        if self.current_branch().ok().as_deref() == Some(branch_name) {
            self.inner
                .reset(commit.as_object(), git2::ResetType::Hard, None)?;
            self.inner.cleanup_state()?;
        }

        Ok(())
    }

    fn discard_changes(&mut self) -> Result<()> {
        let head = self.inner.head()?.peel_to_commit()?;
        self.inner
            .reset(head.as_object(), git2::ResetType::Hard, None)?;
        self.inner.cleanup_state()?;
        Ok(())
    }

    fn delete_branch(&mut self, name: &str) -> Result<()> {
        if self.current_branch().ok().as_deref() == Some(name) {
            return Err(Error::DeleteCheckedOutBranch(name.into()));
        }

        let mut branch = self
            .inner
            .find_branch(name, BranchType::Local)
            .map_err(|_| Error::BranchNotFound(name.into()))?;
        branch.delete()?;

        tracing::debug!(branch = name, "deleted branch");
        Ok(())
    }

    fn cherry_pick(&mut self, commit: Oid) -> Result<ReplayOutcome> {
        let sha = commit.to_string();
        let args = ["cherry-pick", "--keep-redundant-commits", sha.as_str()];
        let output = self.run_git(&args)?;

        if output.status.success() {
            return Ok(ReplayOutcome::Applied);
        }

        // A conflict leaves the cherry-pick in progress; anything else is a
        // genuine failure.
        if self.is_cherry_picking() || self.index_has_conflicts()? {
            tracing::debug!(%commit, "cherry-pick stopped with conflicts");
            return Ok(ReplayOutcome::Conflict);
        }

        Err(Error::CommandFailed {
            command: args.join(" "),
            stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
        })
    }
}

impl std::fmt::Debug for Repository {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Repository")
            .field("path", &self.git_dir())
            .finish()
    }
}
