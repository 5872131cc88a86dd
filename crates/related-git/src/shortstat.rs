//! Parser for git's `--shortstat` summary line.
//!
//! Git prints one line of the form
//!
//! ```text
//!  <N> file(s) changed[, <X> insertion(s)(+)][, <Y> deletion(s)(-)]
//! ```
//!
//! for both `git diff --shortstat` and `git show --shortstat`. Either optional
//! clause is omitted when its count is zero, and the nouns are singular or
//! plural depending on the count. This module knows nothing about how the line
//! was obtained.

use crate::error::{Error, Result};

/// Counts reported by a shortstat line.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ShortStat {
    /// Number of files touched. Not used for scoring.
    pub files_changed: usize,
    /// Inserted lines.
    pub insertions: usize,
    /// Deleted lines.
    pub deletions: usize,
}

impl ShortStat {
    /// Inserted plus deleted lines.
    #[must_use]
    pub const fn total(&self) -> usize {
        self.insertions + self.deletions
    }
}

/// Parse a single shortstat summary line.
///
/// Leading and trailing whitespace is ignored.
///
/// # Errors
/// Returns [`Error::ShortstatParse`] if the line does not match the grammar.
pub fn parse(line: &str) -> Result<ShortStat> {
    let err = || Error::ShortstatParse(line.to_string());

    let mut clauses = line.trim().split(", ");
    let files_changed = clauses
        .next()
        .and_then(|clause| parse_clause(clause, "file", " changed"))
        .ok_or_else(err)?;

    let mut stat = ShortStat {
        files_changed,
        ..ShortStat::default()
    };

    let mut next = clauses.next();
    if let Some(insertions) = next.and_then(|clause| parse_clause(clause, "insertion", "(+)")) {
        stat.insertions = insertions;
        next = clauses.next();
    }
    if let Some(clause) = next {
        stat.deletions = parse_clause(clause, "deletion", "(-)").ok_or_else(err)?;
        next = clauses.next();
    }

    if next.is_some() {
        return Err(err());
    }
    Ok(stat)
}

/// Parse `"<count> <noun>[s]<suffix>"` and return the count.
fn parse_clause(clause: &str, noun: &str, suffix: &str) -> Option<usize> {
    let (count, rest) = clause.split_once(' ')?;
    if count.is_empty() || !count.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }

    let rest = rest.strip_prefix(noun)?;
    let rest = rest.strip_prefix('s').unwrap_or(rest);
    if rest != suffix {
        return None;
    }

    count.parse().ok()
}
