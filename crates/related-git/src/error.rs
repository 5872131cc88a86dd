//! Error types for related-git.

/// Result type alias using [`Error`].
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur during git operations.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Not inside a git repository, or the repository has no working tree.
    #[error("not a git repository")]
    NotARepository,

    /// Branch not found.
    #[error("branch not found: {0}")]
    BranchNotFound(String),

    /// Reference (or revision expression) not found.
    #[error("reference not found: {0}")]
    RefNotFound(String),

    /// The two commits share no history.
    #[error("no common ancestor between {0} and {1}")]
    NoMergeBase(String, String),

    /// HEAD is detached (not on a branch).
    #[error("HEAD is detached - checkout a branch first")]
    DetachedHead,

    /// Tracked files have uncommitted changes.
    #[error("working directory has uncommitted changes")]
    DirtyWorkingDirectory,

    /// A checkout would overwrite files git does not track.
    #[error(
        "checking out '{0}' would overwrite untracked or ignored files - move them out of the way and retry"
    )]
    CheckoutWouldOverwrite(String),

    /// Refused to delete the branch HEAD currently points at.
    #[error("cannot delete branch '{0}' while it is checked out")]
    DeleteCheckedOutBranch(String),

    /// A shortstat summary line did not match the expected grammar.
    #[error("cannot parse git --shortstat output {0:?}")]
    ShortstatParse(String),

    /// A `git` subprocess failed for a reason other than a replay conflict.
    #[error("`git {command}` failed: {stderr}")]
    CommandFailed {
        /// The git subcommand and arguments.
        command: String,
        /// Captured standard error (trimmed).
        stderr: String,
    },

    /// The `git` executable could not be spawned.
    #[error("failed to run git: {0}")]
    Spawn(#[from] std::io::Error),

    /// Underlying git2 error.
    #[error("git error: {0}")]
    Git2(#[from] git2::Error),
}
