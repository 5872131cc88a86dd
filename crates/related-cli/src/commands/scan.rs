//! The scan: list the branch's commits, score every pair, print the report.

use anyhow::{Context, Result, bail};
use related_core::scorer::check_temp_branch;
use related_core::{Config, Interrupt, list_commits, score_pairs};
use related_git::{GitOps, Repository};

use crate::commands::Cli;
use crate::output;
use crate::report;
use crate::upstream;

/// Run the scan in the current directory.
pub fn run(cli: &Cli, interrupt: &Interrupt) -> Result<()> {
    let mut repo = Repository::open_current().context("Not inside a git repository")?;
    let config = load_config(&repo, cli)?;

    let branch = match repo.current_branch() {
        Ok(branch) => branch,
        Err(related_git::Error::DetachedHead) => {
            output::error_detached_head();
            bail!("");
        }
        Err(e) => return Err(e.into()),
    };

    repo.require_clean()
        .context("Commit or stash your changes before scanning")?;
    check_temp_branch(&repo, &config.general.temp_branch)?;

    let upstream = match &config.general.upstream {
        Some(upstream) => upstream.clone(),
        None => upstream::discover(&repo, &config.general.remote)?,
    };
    tracing::debug!(%upstream, %branch, "scanning");

    let commits = list_commits(&repo, &upstream, &branch)?;
    if commits.is_empty() {
        output::info(&format!("No commits on '{branch}' that are not on '{upstream}'"));
    }

    output::detail("All commits:");
    for commit in &commits {
        output::detail(&format!("  {commit}"));
    }
    output::detail("Iterate...");

    interrupt.check()?;
    let mut pairs = score_pairs(
        &mut repo,
        &commits,
        &config.general.temp_branch,
        interrupt,
        |pair| output::detail(&report::progress_line(pair)),
    )?;

    output::detail("Done. Results:");
    report::sort_pairs(&mut pairs);
    for pair in &pairs {
        output::essential(&report::result_line(pair));
    }
    output::essential(&report::summary(pairs.len()));

    Ok(())
}

/// Config file values, overridden by command-line flags.
fn load_config(repo: &Repository, cli: &Cli) -> Result<Config> {
    let mut config = Config::load(Config::path_in(repo.git_dir()))?;

    if let Some(remote) = &cli.remote {
        config.general.remote.clone_from(remote);
    }
    if let Some(upstream) = &cli.upstream {
        config.general.upstream = Some(upstream.clone());
    }
    if let Some(temp_branch) = &cli.temp_branch {
        config.general.temp_branch.clone_from(temp_branch);
    }

    config.validate()?;
    Ok(config)
}
