//! Feed list loading.
//!
//! The feed list is a plain-text file: one URL per line, blank lines
//! ignored, no comment syntax, no escaping. Order is meaningful (it defines
//! aggregation order) and duplicate URLs are kept.

use crate::feed::FeedSource;
use anyhow::{Context, Result};
use std::path::Path;
use url::Url;

/// Reads the feed list file once, at batch start.
pub fn load_sources(path: &Path) -> Result<Vec<FeedSource>> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read feed list '{}'", path.display()))?;

    let sources = parse_source_list(&content);
    tracing::info!(path = %path.display(), sources = sources.len(), "Loaded feed list");
    Ok(sources)
}

/// Parses feed list content into an ordered source list.
///
/// Lines that do not parse as URLs are kept — the fetch phase will surface
/// the failure in that source's slot, preserving positional alignment — but
/// are flagged at load time so the diagnostic points at the file.
pub fn parse_source_list(content: &str) -> Vec<FeedSource> {
    content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(|line| {
            if let Err(e) = Url::parse(line) {
                tracing::warn!(line = %line, error = %e, "Feed list line is not a valid URL");
            }
            FeedSource::new(line)
        })
        .collect()
}
