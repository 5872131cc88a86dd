//! Pairwise relatedness scoring.
//!
//! For every commit `ci` on the branch, a sandbox is opened at `ci` and each
//! later commit `cj` is cherry-picked onto it in turn. If the combined diff
//! (relative to `ci`'s parent) grows by less than `cj`'s own diff, some of
//! `cj`'s lines were already written or overwritten by `ci`, and the pair is a
//! squash candidate:
//!
//! ```text
//! relative_diff  = lines(ci + cj) - lines(ci)
//! adjusted_score = relative_diff - lines(cj)
//! ```
//!
//! A negative `adjusted_score` is the only signal; more negative means more
//! overlap.

use related_git::{Commit, GitOps, Oid, SandboxOps};

use crate::config::DEFAULT_TEMP_BRANCH;
use crate::error::{Error, Result};
use crate::interrupt::Interrupt;
use crate::oracle;
use crate::sandbox::{ExperimentOutcome, Sandbox, with_sandbox};

/// A pair of commits whose combined diff is smaller than the sum of its parts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScoredPair {
    /// The earlier commit.
    pub first: Commit,
    /// The later commit, replayed onto `first`.
    pub second: Commit,
    /// How much `second` grew the diff when replayed onto `first`.
    pub relative_diff: i64,
    /// `relative_diff` minus the standalone size of `second`. Always negative.
    pub adjusted_score: i64,
}

/// What a single trial found out about a pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    /// The later commit does not apply onto the earlier one.
    Conflict,
    /// No overlap detected.
    Unrelated { relative_diff: i64, adjusted_score: i64 },
    /// Overlap detected; the pair is reported.
    Related { relative_diff: i64, adjusted_score: i64 },
}

impl Verdict {
    /// Apply the decision rule to measured line counts.
    #[must_use]
    pub fn judge(baseline: usize, combined: usize, standalone: usize) -> Self {
        let relative_diff = signed(combined) - signed(baseline);
        let adjusted_score = relative_diff - signed(standalone);

        if adjusted_score >= 0 {
            Self::Unrelated {
                relative_diff,
                adjusted_score,
            }
        } else {
            Self::Related {
                relative_diff,
                adjusted_score,
            }
        }
    }
}

/// Progress notification for one evaluated pair.
#[derive(Debug, Clone, Copy)]
pub struct PairReport<'a> {
    pub first: &'a Commit,
    pub second: &'a Commit,
    pub verdict: Verdict,
}

/// Fail if the experiment branch name would clobber a branch the user owns.
///
/// The active branch is never usable. Any other existing branch is only
/// reused when it carries the default name, i.e. a leftover of a killed run.
///
/// # Errors
/// Returns `TempBranchCollision` or `TempBranchExists` on a clash, or the git
/// error if HEAD is detached.
pub fn check_temp_branch<G: GitOps>(repo: &G, temp_branch: &str) -> Result<()> {
    if repo.current_branch()? == temp_branch {
        return Err(Error::TempBranchCollision(temp_branch.into()));
    }
    if temp_branch != DEFAULT_TEMP_BRANCH && repo.branch_exists(temp_branch) {
        return Err(Error::TempBranchExists(temp_branch.into()));
    }
    Ok(())
}

/// Score every ordered pair `(ci, cj)`, `i < j`, of `commits`.
///
/// `commits` must be oldest first and linear. `on_pair` is called once per
/// evaluated pair, in evaluation order. Returns the related pairs in
/// evaluation order.
///
/// # Errors
/// Anything other than a replay conflict aborts the scan after the sandbox
/// has restored the repository: a temporary branch collision, a merge
/// commit, a git or shortstat parse failure, or an interrupt.
pub fn score_pairs<R, F>(
    repo: &mut R,
    commits: &[Commit],
    temp_branch: &str,
    interrupt: &Interrupt,
    mut on_pair: F,
) -> Result<Vec<ScoredPair>>
where
    R: SandboxOps,
    F: FnMut(&PairReport<'_>),
{
    check_temp_branch(&*repo, temp_branch)?;
    let parents = commits
        .iter()
        .map(single_parent)
        .collect::<Result<Vec<_>>>()?;

    let mut results = Vec::new();
    for (i, (first, &parent)) in commits.iter().zip(&parents).enumerate() {
        interrupt.check()?;
        let later = &commits[i + 1..];

        let scanned = with_sandbox(repo, temp_branch, first.id, |sandbox| {
            let Some(baseline) = oracle::changed_lines_since(sandbox.repo(), parent)? else {
                tracing::debug!(commit = %first.id, "commit changes nothing, skipping");
                return Ok(Vec::new());
            };

            let mut found = Vec::new();
            for second in later {
                interrupt.check()?;
                let verdict = trial(sandbox, second, parent, baseline, interrupt)?;
                on_pair(&PairReport {
                    first,
                    second,
                    verdict,
                });

                if let Verdict::Related {
                    relative_diff,
                    adjusted_score,
                } = verdict
                {
                    found.push(ScoredPair {
                        first: first.clone(),
                        second: second.clone(),
                        relative_diff,
                        adjusted_score,
                    });
                }
            }
            Ok(found)
        });

        results.extend(scanned.map_err(|e| interrupted_or(e, interrupt))?);
    }

    Ok(results)
}

/// Replay `second` onto the sandbox start and judge the outcome.
fn trial<R: SandboxOps>(
    sandbox: &mut Sandbox<'_, R>,
    second: &Commit,
    parent: Oid,
    baseline: usize,
    interrupt: &Interrupt,
) -> Result<Verdict> {
    let start = sandbox.start();
    sandbox.rewind(start)?;

    let outcome = sandbox.replay(second.id, parent);
    // Ctrl-C also hits the git child; report the interrupt, not its failure.
    interrupt.check()?;

    let combined = match outcome? {
        ExperimentOutcome::Conflict => {
            tracing::debug!(commit = %second.id, "replay conflicted");
            return Ok(Verdict::Conflict);
        }
        ExperimentOutcome::Applied(lines) => lines,
    };
    let standalone = oracle::own_size(sandbox.repo(), second.id)?;

    Ok(Verdict::judge(baseline, combined, standalone))
}

/// Ctrl-C kills whichever git child is running, so any failure seen after the
/// flag was raised is reported as the interrupt.
fn interrupted_or(error: Error, interrupt: &Interrupt) -> Error {
    if interrupt.is_triggered() && !error.is_interrupted() {
        tracing::debug!(%error, "failure after interrupt");
        return Error::Interrupted;
    }
    error
}

fn single_parent(commit: &Commit) -> Result<Oid> {
    match commit.parents.as_slice() {
        [parent] => Ok(*parent),
        _ => Err(Error::MergeCommit(commit.id)),
    }
}

fn signed(lines: usize) -> i64 {
    i64::try_from(lines).unwrap_or(i64::MAX)
}
