//! Keyword matching over the aggregated entry list.
//!
//! Pure, single-threaded scans: no I/O, no suspension. Each keyword is
//! processed independently against the same aggregate — the fetch phase runs
//! once per batch, never once per keyword.

use crate::feed::Entry;
use serde::Serialize;

/// The entries matching one keyword, in aggregate order.
///
/// An empty `matches` list is an explicit "no results" state — the report is
/// always present for its keyword, never omitted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MatchReport {
    pub keyword: String,
    pub matches: Vec<Entry>,
}

impl MatchReport {
    pub fn is_empty(&self) -> bool {
        self.matches.is_empty()
    }
}

/// Scans the aggregate once for one keyword.
///
/// An entry matches when the lowercased keyword occurs as a substring of the
/// lowercased `title` or the lowercased `summary`. Plain substring test —
/// no tokenization, no fuzzing. Matches keep their aggregate order.
pub fn match_keyword(entries: &[Entry], keyword: &str) -> MatchReport {
    let needle = keyword.to_lowercase();
    let matches: Vec<Entry> = entries
        .iter()
        .filter(|entry| {
            entry.title.to_lowercase().contains(&needle)
                || entry.summary.to_lowercase().contains(&needle)
        })
        .cloned()
        .collect();

    MatchReport {
        keyword: keyword.to_string(),
        matches,
    }
}

/// Produces one report per keyword, preserving keyword order.
pub fn search_all(entries: &[Entry], keywords: &[String]) -> Vec<MatchReport> {
    keywords
        .iter()
        .map(|keyword| {
            let report = match_keyword(entries, keyword);
            tracing::debug!(
                keyword = %keyword,
                matches = report.matches.len(),
                "Keyword scan complete"
            );
            report
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::feed::MISSING_FIELD;
    use pretty_assertions::assert_eq;
    use proptest::prelude::*;

    fn entry(title: &str, summary: &str) -> Entry {
        Entry {
            title: title.to_string(),
            link: "https://example.com/item".to_string(),
            summary: summary.to_string(),
            published: MISSING_FIELD.to_string(),
        }
    }

    #[test]
    fn test_match_is_case_insensitive_on_title() {
        let entries = vec![entry("rust news today", "")];
        let report = match_keyword(&entries, "Rust");
        assert_eq!(report.matches.len(), 1);
        assert_eq!(report.matches[0].title, "rust news today");
    }

    #[test]
    fn test_match_checks_summary_too() {
        let entries = vec![entry("unrelated", "all about RUST tooling")];
        let report = match_keyword(&entries, "rust");
        assert_eq!(report.matches.len(), 1);
    }

    #[test]
    fn test_no_match_yields_explicit_empty_report() {
        let entries = vec![entry("cooking", "recipes")];
        let report = match_keyword(&entries, "rust");
        assert_eq!(report.keyword, "rust");
        assert!(report.is_empty());
    }

    #[test]
    fn test_substring_not_tokenized() {
        let entries = vec![entry("untrustworthy sources", "")];
        let report = match_keyword(&entries, "rust");
        assert_eq!(report.matches.len(), 1);
    }

    #[test]
    fn test_matches_keep_aggregate_order() {
        let entries = vec![
            entry("go generics", ""),
            entry("cooking", ""),
            entry("going places", ""),
        ];
        let report = match_keyword(&entries, "go");
        let titles: Vec<String> = report.matches.into_iter().map(|e| e.title).collect();
        assert_eq!(titles, vec!["go generics", "going places"]);
    }

    #[test]
    fn test_search_all_preserves_keyword_order_and_reports_every_keyword() {
        let entries = vec![entry("go generics", "")];
        let keywords = vec!["zig".to_string(), "go".to_string(), "rust".to_string()];

        let reports = search_all(&entries, &keywords);
        assert_eq!(reports.len(), 3);
        assert_eq!(reports[0].keyword, "zig");
        assert!(reports[0].is_empty());
        assert_eq!(reports[1].keyword, "go");
        assert_eq!(reports[1].matches.len(), 1);
        assert_eq!(reports[2].keyword, "rust");
        assert!(reports[2].is_empty());
    }

    #[test]
    fn test_empty_aggregate_yields_no_results_for_every_keyword() {
        let keywords = vec!["go".to_string(), "rust".to_string()];
        let reports = search_all(&[], &keywords);
        assert_eq!(reports.len(), 2);
        assert!(reports.iter().all(MatchReport::is_empty));
    }

    proptest! {
        // Upper/lower casing of an ASCII keyword never changes the match set
        #[test]
        fn prop_ascii_case_variants_match_identically(
            keyword in "[a-z]{1,8}",
            titles in prop::collection::vec("[a-zA-Z ]{0,20}", 0..10),
        ) {
            let entries: Vec<Entry> = titles.iter().map(|t| entry(t, "")).collect();
            let lower = match_keyword(&entries, &keyword);
            let upper = match_keyword(&entries, &keyword.to_uppercase());
            prop_assert_eq!(lower.matches, upper.matches);
        }

        // Matched entries are always a subsequence of the aggregate
        #[test]
        fn prop_matches_are_ordered_subsequence(
            keyword in "[a-z]{1,4}",
            titles in prop::collection::vec("[a-z ]{0,12}", 0..10),
        ) {
            let entries: Vec<Entry> = titles.iter().map(|t| entry(t, "")).collect();
            let report = match_keyword(&entries, &keyword);

            let mut cursor = 0;
            for matched in &report.matches {
                let found = entries[cursor..]
                    .iter()
                    .position(|e| e == matched)
                    .map(|offset| cursor + offset);
                prop_assert!(found.is_some());
                cursor = found.unwrap() + 1;
            }
        }
    }
}
