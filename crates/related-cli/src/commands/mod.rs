//! Command-line interface definition.

use clap::Parser;

pub mod scan;

/// Find commits on the current branch that are worth squashing together.
///
/// Every later commit is cherry-picked onto every earlier one on a temporary
/// branch. When the combined diff grows by less than the later commit's own
/// diff, the two commits touch the same lines and the pair is reported.
#[derive(Debug, Parser)]
#[command(name = "git-find-related", version, about, long_about)]
pub struct Cli {
    /// Remote whose default branch is the upstream [default: origin].
    #[arg(long, value_name = "NAME")]
    pub remote: Option<String>,

    /// Compare against this ref instead of the remote's default branch.
    #[arg(long, value_name = "REF")]
    pub upstream: Option<String>,

    /// Name of the throwaway branch experiments run on
    /// [default: tmp-find-related-commits].
    #[arg(long, value_name = "NAME")]
    pub temp_branch: Option<String>,

    /// Only print the results.
    #[arg(short, long, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Log every git invocation to stderr.
    #[arg(short, long)]
    pub verbose: bool,
}
