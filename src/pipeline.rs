//! The batch pipeline: Fetching → Aggregating → Matching.
//!
//! Each phase runs exactly once per batch. All keywords share the single
//! fetch/aggregate pass; re-fetching per keyword would multiply network cost
//! by the keyword count for the same answer.

use crate::feed::{self, FeedSource, FetchOptions, FetchOutcome};
use crate::search::{self, MatchReport};

/// Everything a batch produced: per-source outcomes (for diagnostics) and
/// one match report per keyword, in keyword order.
#[derive(Debug)]
pub struct BatchReport {
    pub outcomes: Vec<FetchOutcome>,
    pub reports: Vec<MatchReport>,
}

impl BatchReport {
    /// Number of sources whose fetch or parse failed.
    pub fn failed_sources(&self) -> usize {
        self.outcomes
            .iter()
            .filter(|outcome| outcome.result.is_err())
            .count()
    }

    /// Total entries in the aggregate.
    pub fn total_entries(&self) -> usize {
        self.outcomes
            .iter()
            .map(|outcome| outcome.entries().len())
            .sum()
    }
}

/// Runs one batch end to end.
///
/// A batch with zero reachable sources is a valid outcome, not an error:
/// the aggregate is empty and every keyword reports no results.
pub async fn run_batch(
    client: &reqwest::Client,
    sources: &[FeedSource],
    keywords: &[String],
    options: &FetchOptions,
) -> BatchReport {
    let outcomes = feed::fetch_all(client, sources, options).await;

    let entries = feed::aggregate(&outcomes);
    tracing::info!(
        sources = sources.len(),
        failed = outcomes.iter().filter(|o| o.result.is_err()).count(),
        entries = entries.len(),
        "Aggregated feed entries"
    );

    let reports = search::search_all(&entries, keywords);

    BatchReport { outcomes, reports }
}
