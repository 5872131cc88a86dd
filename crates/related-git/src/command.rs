//! Operations delegated to the `git` executable.
//!
//! Shortstat summaries, cherry-picks and `ls-remote` are taken from git itself
//! so the numbers match what a user sees on the command line.

use std::process::{Command, Output};

use crate::Repository;
use crate::error::{Error, Result};

impl Repository {
    /// Run `git <args>` in the working directory and return its raw output.
    ///
    /// # Errors
    /// Returns error if there is no working directory or git cannot be spawned.
    pub(crate) fn run_git(&self, args: &[&str]) -> Result<Output> {
        let workdir = self.workdir().ok_or(Error::NotARepository)?;

        tracing::debug!(args = ?args, "running git");
        let output = Command::new("git")
            .args(args)
            .current_dir(workdir)
            .output()?;

        Ok(output)
    }

    /// Run `git <args>` and return stdout, failing on a non-zero exit.
    ///
    /// # Errors
    /// Returns `CommandFailed` with git's stderr if the command fails.
    pub(crate) fn git_stdout(&self, args: &[&str]) -> Result<String> {
        let output = self.run_git(args)?;

        if !output.status.success() {
            return Err(Error::CommandFailed {
                command: args.join(" "),
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }

        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }

    /// Raw `git ls-remote --symref <remote> HEAD` output.
    ///
    /// # Errors
    /// Returns error if the remote cannot be queried.
    pub fn remote_head_symref(&self, remote: &str) -> Result<String> {
        self.git_stdout(&["ls-remote", "--symref", remote, "HEAD"])
    }
}
