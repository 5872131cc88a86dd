//! Commit facts as read from the repository.

use std::fmt;

use git2::Oid;

/// An immutable commit: identity, summary and parents.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Commit {
    /// Commit SHA.
    pub id: Oid,
    /// First line of the commit message.
    pub summary: String,
    /// Parent SHAs, in order.
    pub parents: Vec<Oid>,
}

impl Commit {
    /// Build a commit from a git2 commit object.
    #[must_use]
    pub fn from_git2(commit: &git2::Commit<'_>) -> Self {
        let summary = commit
            .message()
            .unwrap_or("")
            .lines()
            .next()
            .unwrap_or("")
            .to_string();

        Self {
            id: commit.id(),
            summary,
            parents: commit.parent_ids().collect(),
        }
    }

    /// The first eight hex digits of the SHA.
    #[must_use]
    pub fn short_id(&self) -> String {
        let id = self.id.to_string();
        id.get(..8).unwrap_or(&id).to_owned()
    }
}

impl fmt::Display for Commit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.short_id(), self.summary)
    }
}

/// Outcome of replaying a commit onto HEAD.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReplayOutcome {
    /// The commit was applied and committed.
    Applied,
    /// The replay stopped with conflicts; the working copy needs discarding.
    Conflict,
}
