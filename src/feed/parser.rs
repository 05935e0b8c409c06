use crate::feed::{Entry, MISSING_FIELD};
use feed_rs::parser;

/// Decodes raw feed bytes into an ordered list of entries.
///
/// Adapter over `feed-rs`: handles RSS and Atom alike, preserving the
/// document's entry order. Missing fields fall back to the defaults on
/// [`Entry`]. Malformed payloads return the underlying parse error — callers
/// degrade that to an empty contribution for the source rather than failing
/// the batch.
pub fn parse_entries(bytes: &[u8]) -> Result<Vec<Entry>, parser::ParseFeedError> {
    let feed = parser::parse(bytes)?;

    let entries: Vec<Entry> = feed
        .entries
        .into_iter()
        .map(|entry| {
            let title = entry
                .title
                .map(|t| t.content)
                .unwrap_or_else(|| MISSING_FIELD.to_string());
            let link = entry
                .links
                .first()
                .map(|l| l.href.clone())
                .unwrap_or_else(|| MISSING_FIELD.to_string());
            let summary = entry
                .summary
                .map(|s| s.content)
                .or_else(|| entry.content.and_then(|c| c.body))
                .unwrap_or_default();
            let published = entry
                .published
                .or(entry.updated)
                .map(|dt| dt.to_rfc3339())
                .unwrap_or_else(|| MISSING_FIELD.to_string());

            Entry {
                title,
                link,
                summary,
                published,
            }
        })
        .collect();

    Ok(entries)
}
