//! git-find-related - find commits worth squashing together.

use clap::Parser;
use related_git::{GitOps, Repository};
use tracing_subscriber::EnvFilter;
use tracing_subscriber::filter::LevelFilter;

mod commands;
mod output;
mod report;
mod signal;
mod upstream;

use commands::Cli;
use related_core::Interrupt;

/// Environment variable holding a tracing filter directive.
const LOG_ENV: &str = "RELATED_LOG";

/// Exit status after Ctrl-C, as a shell would report it.
const EXIT_INTERRUPTED: i32 = 130;

fn main() {
    let cli = Cli::parse();
    output::set_quiet(cli.quiet);
    install_tracing(cli.verbose);

    let interrupt = Interrupt::new();
    signal::install(&interrupt);

    if let Err(e) = commands::scan::run(&cli, &interrupt) {
        std::process::exit(report_failure(&e, &interrupt));
    }
}

fn install_tracing(verbose: bool) {
    let default = if verbose {
        LevelFilter::DEBUG
    } else {
        LevelFilter::WARN
    };
    let filter = EnvFilter::builder()
        .with_default_directive(default.into())
        .with_env_var(LOG_ENV)
        .from_env_lossy();

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

/// Print the error with the repository status and pick the exit code.
fn report_failure(e: &anyhow::Error, interrupt: &Interrupt) -> i32 {
    let core = e.downcast_ref::<related_core::Error>();

    // Ctrl-C also kills git children outside the scan, e.g. `ls-remote`.
    if interrupt.is_triggered() || core.is_some_and(related_core::Error::is_interrupted) {
        output::error("Interrupted");
        return EXIT_INTERRUPTED;
    }

    let message = format!("{e:#}");
    if !message.is_empty() {
        output::error(&message);
    }

    let status = core
        .and_then(related_core::Error::captured_status)
        .map(str::to_owned)
        .or_else(|| {
            Repository::open_current()
                .and_then(|repo| repo.status_report())
                .ok()
        });
    if let Some(status) = status {
        output::status_block(&status);
    }

    1
}
