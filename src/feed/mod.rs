//! Feed fetching and parsing.
//!
//! This module covers the network-facing half of a batch:
//!
//! - **Fetching**: one HTTP retrieval per configured source, all sources
//!   concurrently, with per-source timeout and failure isolation
//! - **Parsing**: RSS/Atom bytes into structured [`Entry`] values
//! - **Aggregation**: flattening per-source entry lists into one ordered
//!   sequence
//!
//! The submodules:
//!
//! - [`parser`] - Low-level feed parsing using the `feed-rs` crate
//! - [`fetcher`] - Concurrent HTTP retrieval with order-preserving fan-in

pub mod fetcher;
pub mod parser;

pub use fetcher::{build_client, fetch_all, fetch_source, FetchError, FetchOptions, FetchOutcome};
pub use parser::parse_entries;

use serde::Serialize;
use std::fmt;

/// Sentinel for feed fields that are absent from the source document.
pub const MISSING_FIELD: &str = "N/A";

/// One configured feed URL.
///
/// Sources are supplied at batch start and never change during a batch.
/// Their order in the source list defines aggregation order; duplicate URLs
/// are legal and fetched independently.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FeedSource(String);

impl FeedSource {
    pub fn new(url: impl Into<String>) -> Self {
        Self(url.into())
    }

    pub fn url(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for FeedSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for FeedSource {
    fn from(url: &str) -> Self {
        Self::new(url)
    }
}

/// One syndication item, immutable once parsed.
///
/// `title`, `link` and `published` fall back to [`MISSING_FIELD`] when the
/// source document omits them; `summary` falls back to the empty string.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Entry {
    pub title: String,
    pub link: String,
    pub summary: String,
    pub published: String,
}

/// Concatenates per-source entry lists into one combined sequence.
///
/// Pure function: entries appear in source order, then within-source order.
/// Failed sources contribute nothing. No filtering, deduplication, or
/// reordering — the result depends only on the source list and each source's
/// payload, never on fetch timing.
pub fn aggregate(outcomes: &[FetchOutcome]) -> Vec<Entry> {
    outcomes
        .iter()
        .flat_map(|outcome| outcome.entries().iter().cloned())
        .collect()
}
