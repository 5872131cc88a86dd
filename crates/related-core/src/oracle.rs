//! Diff sizes as reported by git's shortstat summaries.

use related_git::{GitOps, Oid, shortstat};

use crate::error::Result;

/// Inserted plus deleted lines between `base` and the current HEAD.
///
/// Returns `None` when git reports no difference at all; git prints nothing
/// rather than a zero summary in that case.
///
/// # Errors
/// Returns error if git fails or prints something that is not a shortstat line.
pub fn changed_lines_since<G: GitOps + ?Sized>(repo: &G, base: Oid) -> Result<Option<usize>> {
    measure(&repo.diff_shortstat(base)?)
}

/// Inserted plus deleted lines `commit` introduces relative to its own parent.
///
/// Independent of whatever is checked out.
///
/// # Errors
/// Returns error if git fails or prints something that is not a shortstat line.
pub fn own_size<G: GitOps + ?Sized>(repo: &G, commit: Oid) -> Result<usize> {
    Ok(measure(&repo.show_shortstat(commit)?)?.unwrap_or(0))
}

fn measure(output: &str) -> Result<Option<usize>> {
    let line = output.trim();
    if line.is_empty() {
        return Ok(None);
    }
    Ok(Some(shortstat::parse(line)?.total()))
}
