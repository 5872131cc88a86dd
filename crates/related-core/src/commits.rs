//! The commits a feature branch adds on top of its upstream.

use related_git::{Commit, GitOps};

use crate::error::{Error, Result};

/// List the commits on `feature_branch` that are not on `upstream`, oldest
/// first.
///
/// Applying the returned commits in order onto the merge base reproduces the
/// tip of `feature_branch`. Nothing is modified.
///
/// # Errors
/// Returns `RefResolution` if either ref cannot be resolved or the two share
/// no history; other git failures are passed through.
pub fn list_commits<G: GitOps>(repo: &G, upstream: &str, feature_branch: &str) -> Result<Vec<Commit>> {
    let upstream_oid = resolve(repo, upstream)?;
    let feature_oid = resolve(repo, feature_branch)?;

    let base = repo
        .merge_base(upstream_oid, feature_oid)
        .map_err(|source| Error::RefResolution {
            what: format!("merge base of {upstream} and {feature_branch}"),
            source,
        })?;
    tracing::debug!(%base, upstream, feature_branch, "found merge base");

    repo.commits_between(base, feature_oid)?
        .into_iter()
        .map(|oid| Ok(repo.commit(oid)?))
        .collect()
}

fn resolve<G: GitOps>(repo: &G, rev: &str) -> Result<related_git::Oid> {
    repo.resolve_commit(rev).map_err(|source| Error::RefResolution {
        what: rev.to_string(),
        source,
    })
}
