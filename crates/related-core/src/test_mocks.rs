//! In-memory backend for exercising the sandbox and scorer without git.
//!
//! Diff sizes are looked up from tables the test fills in, and any backend
//! call can be made to fail to check that restoration still happens.

use std::collections::{BTreeMap, HashMap, HashSet};

use related_git::{
    Commit, Error as GitError, GitOps, Oid, ReplayOutcome, Result as GitResult, SandboxOps,
};

use crate::interrupt::Interrupt;

/// A backend call that can be made to fail.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FailPoint {
    CherryPick(Oid),
    DiffShortstat,
    ShowShortstat,
    Checkout(String),
    Discard,
}

/// Mock implementation of `GitOps` + `SandboxOps`.
#[derive(Debug, Default)]
pub struct MockRepo {
    pub current: Option<String>,
    pub branches: BTreeMap<String, Oid>,
    pub commits: HashMap<Oid, Commit>,
    /// Uncommitted state left behind, e.g. by a conflicted pick.
    pub dirty: bool,
    /// Synthetic commit created by a pick -> (onto, picked).
    pub picks: HashMap<Oid, (Oid, Oid)>,
    /// (base, head) -> changed lines.
    pub diff_sizes: HashMap<(Oid, Oid), usize>,
    /// (base, onto, picked) -> changed lines after picking `picked` onto `onto`.
    pub pick_sizes: HashMap<(Oid, Oid, Oid), usize>,
    /// commit -> changed lines relative to its own parent.
    pub own_sizes: HashMap<Oid, usize>,
    /// (onto, picked) pairs that conflict.
    pub conflicts: HashSet<(Oid, Oid)>,
    pub fail_on: Option<FailPoint>,
    /// Raised when the injected failure fires.
    pub interrupt_on_fail: Option<Interrupt>,
    /// Print this instead of a shortstat line.
    pub garbage_output: Option<String>,
    /// Mutating calls, in order.
    pub log: Vec<String>,
    next_synthetic: u64,
}

pub fn oid(n: u64) -> Oid {
    #[allow(clippy::unwrap_used)]
    Oid::from_str(&format!("{n:040x}")).unwrap()
}

impl MockRepo {
    /// `main` at a base commit and `feature` (checked out) with `n` linear
    /// commits on top. Returns the feature commits oldest first.
    pub fn linear(n: u64) -> (Self, Vec<Commit>) {
        let base = oid(1);
        let mut mock = Self::default();
        mock.commits.insert(
            base,
            Commit {
                id: base,
                summary: "base".into(),
                parents: vec![],
            },
        );

        let mut parent = base;
        let mut commits = Vec::new();
        for i in 0..n {
            let id = oid(100 + i);
            let commit = Commit {
                id,
                summary: format!("commit {i}"),
                parents: vec![parent],
            };
            mock.commits.insert(id, commit.clone());
            commits.push(commit);
            parent = id;
        }

        mock.branches.insert("main".into(), base);
        mock.branches.insert("feature".into(), parent);
        mock.current = Some("feature".into());
        (mock, commits)
    }

    /// Make the injected failure also raise `interrupt`, the way Ctrl-C
    /// kills a git child.
    pub fn interrupt_on_failure(mut self, interrupt: &Interrupt) -> Self {
        self.interrupt_on_fail = Some(interrupt.clone());
        self
    }

    pub fn fail_on(mut self, point: FailPoint) -> Self {
        self.fail_on = Some(point);
        self
    }

    fn head(&self) -> GitResult<Oid> {
        let branch = self.current.as_ref().ok_or(GitError::DetachedHead)?;
        self.branches
            .get(branch)
            .copied()
            .ok_or_else(|| GitError::BranchNotFound(branch.clone()))
    }

    fn check_fail(&self, point: &FailPoint) -> GitResult<()> {
        if self.fail_on.as_ref() == Some(point) {
            if let Some(interrupt) = &self.interrupt_on_fail {
                interrupt.trigger();
            }
            return Err(GitError::CommandFailed {
                command: format!("{point:?}"),
                stderr: "injected failure".into(),
            });
        }
        Ok(())
    }

    fn render(&self, lines: usize) -> String {
        if let Some(garbage) = &self.garbage_output {
            return garbage.clone();
        }
        if lines == 0 {
            String::new()
        } else {
            format!(" 1 file changed, {lines} insertions(+)\n")
        }
    }
}

impl GitOps for MockRepo {
    fn current_branch(&self) -> GitResult<String> {
        self.current.clone().ok_or(GitError::DetachedHead)
    }

    fn branch_exists(&self, name: &str) -> bool {
        self.branches.contains_key(name)
    }

    fn resolve_commit(&self, rev: &str) -> GitResult<Oid> {
        if rev == "HEAD" {
            return self.head();
        }
        self.branches
            .get(rev)
            .copied()
            .ok_or_else(|| GitError::RefNotFound(rev.into()))
    }

    fn merge_base(&self, one: Oid, _two: Oid) -> GitResult<Oid> {
        Ok(one)
    }

    fn commits_between(&self, from: Oid, to: Oid) -> GitResult<Vec<Oid>> {
        let mut chain = Vec::new();
        let mut cursor = to;
        while cursor != from {
            chain.push(cursor);
            match self.commits.get(&cursor).and_then(|c| c.parents.first()) {
                Some(parent) => cursor = *parent,
                None => break,
            }
        }
        chain.reverse();
        Ok(chain)
    }

    fn commit(&self, oid: Oid) -> GitResult<Commit> {
        self.commits
            .get(&oid)
            .cloned()
            .ok_or_else(|| GitError::RefNotFound(oid.to_string()))
    }

    fn diff_shortstat(&self, base: Oid) -> GitResult<String> {
        self.check_fail(&FailPoint::DiffShortstat)?;
        let head = self.head()?;
        let lines = match self.picks.get(&head) {
            Some(&(onto, picked)) => self.pick_sizes.get(&(base, onto, picked)),
            None => self.diff_sizes.get(&(base, head)),
        };
        Ok(self.render(lines.copied().unwrap_or(0)))
    }

    fn show_shortstat(&self, commit: Oid) -> GitResult<String> {
        self.check_fail(&FailPoint::ShowShortstat)?;
        Ok(self.render(self.own_sizes.get(&commit).copied().unwrap_or(0)))
    }

    fn status_report(&self) -> GitResult<String> {
        Ok(format!(
            "On branch {}{}",
            self.current.as_deref().unwrap_or("(detached)"),
            if self.dirty { "\nYou are currently cherry-picking." } else { "" }
        ))
    }
}

impl SandboxOps for MockRepo {
    fn create_branch_at(&mut self, name: &str, target: Oid) -> GitResult<()> {
        self.log.push(format!("create {name}"));
        self.branches.insert(name.into(), target);
        Ok(())
    }

    fn checkout(&mut self, branch: &str) -> GitResult<()> {
        self.log.push(format!("checkout {branch}"));
        self.check_fail(&FailPoint::Checkout(branch.into()))?;
        if !self.branches.contains_key(branch) {
            return Err(GitError::BranchNotFound(branch.into()));
        }
        self.current = Some(branch.into());
        self.dirty = false;
        Ok(())
    }

    fn force_checkout(&mut self, branch: &str) -> GitResult<()> {
        self.log.push(format!("force-checkout {branch}"));
        self.check_fail(&FailPoint::Checkout(branch.into()))?;
        if !self.branches.contains_key(branch) {
            return Err(GitError::BranchNotFound(branch.into()));
        }
        self.current = Some(branch.into());
        self.dirty = false;
        Ok(())
    }

    fn reset_branch(&mut self, branch: &str, target: Oid) -> GitResult<()> {
        self.log.push(format!("reset {branch}"));
        self.branches.insert(branch.into(), target);
        if self.current.as_deref() == Some(branch) {
            self.dirty = false;
        }
        Ok(())
    }

    fn discard_changes(&mut self) -> GitResult<()> {
        self.log.push("discard".into());
        self.check_fail(&FailPoint::Discard)?;
        self.dirty = false;
        Ok(())
    }

    fn delete_branch(&mut self, name: &str) -> GitResult<()> {
        self.log.push(format!("delete {name}"));
        if self.current.as_deref() == Some(name) {
            return Err(GitError::DeleteCheckedOutBranch(name.into()));
        }
        self.branches
            .remove(name)
            .map(|_| ())
            .ok_or_else(|| GitError::BranchNotFound(name.into()))
    }

    fn cherry_pick(&mut self, commit: Oid) -> GitResult<ReplayOutcome> {
        self.log.push(format!("pick {commit}"));
        self.check_fail(&FailPoint::CherryPick(commit))?;

        let onto = self.head()?;
        if self.conflicts.contains(&(onto, commit)) {
            self.dirty = true;
            return Ok(ReplayOutcome::Conflict);
        }

        self.next_synthetic += 1;
        let synthetic = oid(0xf000_0000 + self.next_synthetic);
        self.picks.insert(synthetic, (onto, commit));
        let branch = self.current.clone().ok_or(GitError::DetachedHead)?;
        self.branches.insert(branch, synthetic);
        Ok(ReplayOutcome::Applied)
    }
}
