//! Upstream discovery from the remote's default branch.

use anyhow::{Context, Result};
use related_git::Repository;
use thiserror::Error;

/// `ls-remote --symref` output that does not name a HEAD branch.
#[derive(Debug, Error, PartialEq, Eq)]
#[error("cannot determine the default branch of remote '{remote}' - pass --upstream")]
pub struct SymrefError {
    pub remote: String,
}

/// The remote-tracking ref for `remote`'s default branch, e.g. `origin/main`.
///
/// # Errors
/// Returns error if `git ls-remote` fails or its output has no HEAD symref.
pub fn discover(repo: &Repository, remote: &str) -> Result<String> {
    let output = repo
        .remote_head_symref(remote)
        .with_context(|| format!("Failed to query remote '{remote}'"))?;
    Ok(parse_symref(&output, remote)?)
}

/// Parse `git ls-remote --symref <remote> HEAD` output.
///
/// Only the `ref: refs/heads/<name>\tHEAD` line is considered.
///
/// # Errors
/// Returns `SymrefError` if no such line exists.
pub fn parse_symref(output: &str, remote: &str) -> Result<String, SymrefError> {
    output
        .lines()
        .filter_map(|line| line.strip_prefix("ref: "))
        .filter_map(|rest| rest.split_once('\t'))
        .find(|(_, name)| name.trim() == "HEAD")
        .and_then(|(target, _)| target.strip_prefix("refs/heads/"))
        .filter(|branch| !branch.is_empty())
        .map(|branch| format!("{remote}/{branch}"))
        .ok_or_else(|| SymrefError {
            remote: remote.into(),
        })
}
