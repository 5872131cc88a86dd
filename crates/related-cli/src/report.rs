//! Rendering of scan progress and results.

use related_core::{PairReport, ScoredPair, Verdict};

/// Progress line for one evaluated pair.
///
/// The four-column marker holds the relative diff for a related pair, `!`
/// for a conflict and nothing otherwise.
#[must_use]
pub fn progress_line(report: &PairReport<'_>) -> String {
    let marker = match report.verdict {
        Verdict::Related { relative_diff, .. } => relative_diff.to_string(),
        Verdict::Conflict => "!".to_string(),
        Verdict::Unrelated { .. } => String::new(),
    };
    format!("{marker:>4} {} -- {}", report.first, report.second)
}

/// Order pairs by adjusted score, strongest overlap first.
///
/// Ties keep scan order.
pub fn sort_pairs(pairs: &mut [ScoredPair]) {
    pairs.sort_by_key(|pair| pair.adjusted_score);
}

/// Result line for one related pair.
#[must_use]
pub fn result_line(pair: &ScoredPair) -> String {
    format!(
        "*** {} {} commits: {} -- {}",
        pair.adjusted_score, pair.relative_diff, pair.first, pair.second
    )
}

/// Closing count line.
#[must_use]
pub fn summary(count: usize) -> String {
    format!("{count} candidate pair(s)")
}
