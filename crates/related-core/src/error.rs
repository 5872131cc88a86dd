//! Error types for related-core.

use std::path::PathBuf;

use related_git::Oid;

/// Result type alias using [`Error`].
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in related-core operations.
///
/// Replay conflicts are not errors; they are an ordinary outcome of an
/// experiment. Every variant here aborts the scan.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The temporary branch name is the branch the user is on.
    #[error(
        "temporary branch '{0}' is the currently checked out branch - switch to your feature branch or pick another --temp-branch"
    )]
    TempBranchCollision(String),

    /// A custom temporary branch name belongs to an existing branch.
    #[error(
        "branch '{0}' already exists and would be overwritten - pick an unused --temp-branch name"
    )]
    TempBranchExists(String),

    /// Invalid configuration value.
    #[error("invalid configuration: {0}")]
    Config(String),

    /// Upstream or merge-base discovery failed.
    #[error("cannot resolve {what}: {source}")]
    RefResolution {
        /// What was being resolved.
        what: String,
        /// Underlying git error.
        #[source]
        source: related_git::Error,
    },

    /// A commit in the scanned range has more than one parent (or none).
    #[error("commit {0} does not have exactly one parent - only linear history is supported")]
    MergeCommit(Oid),

    /// A failure inside a sandboxed experiment, with the status at that moment.
    #[error("experiment on {commit} failed: {source}")]
    Experiment {
        /// Commit the sandbox was opened at.
        commit: Oid,
        /// `git status` captured before the sandbox was restored.
        status: Option<String>,
        /// The failure itself.
        #[source]
        source: Box<Error>,
    },

    /// The user pressed Ctrl-C.
    #[error("interrupted")]
    Interrupted,

    /// Config file parsing error.
    #[error("failed to parse {file}: {message}")]
    ConfigParse { file: PathBuf, message: String },

    /// IO error.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// Git operation error.
    #[error("git error: {0}")]
    Git(#[from] related_git::Error),
}

impl Error {
    /// Whether this error (or the one it wraps) is a user interrupt.
    #[must_use]
    pub fn is_interrupted(&self) -> bool {
        match self {
            Self::Interrupted => true,
            Self::Experiment { source, .. } => source.is_interrupted(),
            _ => false,
        }
    }

    /// The repository status captured when the error happened, if any.
    #[must_use]
    pub fn captured_status(&self) -> Option<&str> {
        match self {
            Self::Experiment { status, .. } => status.as_deref(),
            _ => None,
        }
    }
}
