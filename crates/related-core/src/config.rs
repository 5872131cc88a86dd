//! Configuration loaded from `.git/find-related.toml`.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Name of the config file inside the git directory.
pub const CONFIG_FILE: &str = "find-related.toml";

/// Default name of the branch experiments run on.
pub const DEFAULT_TEMP_BRANCH: &str = "tmp-find-related-commits";

/// Tool configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// General settings.
    #[serde(default)]
    pub general: GeneralConfig,
}

impl Config {
    /// Path of the config file for a repository's git directory.
    #[must_use]
    pub fn path_in(git_dir: &Path) -> PathBuf {
        git_dir.join(CONFIG_FILE)
    }

    /// Load config from a TOML file, falling back to defaults if it is missing.
    ///
    /// # Errors
    /// Returns error if file can't be read or parsed.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path)?;
        toml::from_str(&content).map_err(|e| Error::ConfigParse {
            file: path.to_path_buf(),
            message: e.to_string(),
        })
    }

    /// Reject values that cannot work.
    ///
    /// # Errors
    /// Returns `Config` if the remote or temporary branch name is empty.
    pub fn validate(&self) -> Result<()> {
        if self.general.remote.trim().is_empty() {
            return Err(Error::Config("remote name is empty".into()));
        }
        if self.general.temp_branch.trim().is_empty() {
            return Err(Error::Config("temporary branch name is empty".into()));
        }
        if self.general.upstream.as_deref().is_some_and(|u| u.trim().is_empty()) {
            return Err(Error::Config("upstream is empty".into()));
        }
        Ok(())
    }
}

/// General settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeneralConfig {
    /// Remote whose default branch is the upstream.
    #[serde(default = "default_remote")]
    pub remote: String,

    /// Branch name reserved for experiments.
    #[serde(default = "default_temp_branch")]
    pub temp_branch: String,

    /// Upstream ref to compare against; skips remote HEAD discovery.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub upstream: Option<String>,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            remote: default_remote(),
            temp_branch: default_temp_branch(),
            upstream: None,
        }
    }
}

fn default_remote() -> String {
    "origin".into()
}

fn default_temp_branch() -> String {
    DEFAULT_TEMP_BRANCH.into()
}
