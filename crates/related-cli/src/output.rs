//! Terminal output formatting utilities.

use std::sync::atomic::{AtomicBool, Ordering};

use colored::Colorize;

static QUIET_MODE: AtomicBool = AtomicBool::new(false);

/// Set quiet mode globally. Call once at startup.
pub fn set_quiet(quiet: bool) {
    QUIET_MODE.store(quiet, Ordering::Relaxed);
}

fn is_quiet() -> bool {
    QUIET_MODE.load(Ordering::Relaxed)
}

/// Print an error message (always prints to stderr).
pub fn error(msg: &str) {
    eprintln!("{} {}", "✗".red(), msg);
}

/// Print the detached HEAD error message with guidance (always to stderr).
pub fn error_detached_head() {
    error("Cannot scan in detached HEAD state.");
    eprintln!();
    eprintln!("The checked out branch is the one that gets scanned. To fix this:");
    eprintln!("  1. Return to your feature branch: git checkout <branch-name>");
    eprintln!("  2. Or create one here: git checkout -b <branch-name>");
}

/// Print an info message (suppressed in quiet mode).
pub fn info(msg: &str) {
    if !is_quiet() {
        println!("{} {}", "→".blue(), msg);
    }
}

/// Print a detail line without prefix (suppressed in quiet mode).
///
/// Use for the commit list and per-pair progress lines.
pub fn detail(msg: &str) {
    if !is_quiet() {
        println!("{msg}");
    }
}

/// Print essential machine-readable output (always prints).
///
/// Use for result lines that should be available for piping.
pub fn essential(msg: &str) {
    println!("{msg}");
}

/// Print a block of `git status` output, indented, to stderr.
pub fn status_block(status: &str) {
    eprintln!();
    eprintln!("{}", "Repository status:".dimmed());
    for line in status.lines() {
        eprintln!("  {line}");
    }
}
