use crate::feed::parser::parse_entries;
use crate::feed::{Entry, FeedSource};
use futures::stream::{self, StreamExt};
use reqwest::header::{self, HeaderMap, HeaderValue};
use std::time::Duration;
use thiserror::Error;

/// Errors that can occur while retrieving one source.
///
/// Every variant is source-local: it fails that source's slot in the batch
/// and is surfaced as a diagnostic, never as a batch-level error.
#[derive(Debug, Error)]
pub enum FetchError {
    /// Network-level error (DNS, connection, TLS, reset, body read)
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),
    /// HTTP response with a non-2xx status code
    #[error("HTTP error: status {0}")]
    Status(u16),
    /// Retrieval exceeded the per-source deadline
    #[error("request timed out after {0:?}")]
    Timeout(Duration),
    /// Payload could not be parsed as RSS or Atom
    #[error("parse error: {0}")]
    Parse(String),
}

/// Knobs for one batch of fetches.
#[derive(Debug, Clone)]
pub struct FetchOptions {
    /// Deadline for one complete retrieval (request plus body).
    pub timeout: Duration,
    /// Upper bound on in-flight fetches; 0 runs one task per source.
    pub max_concurrent: usize,
}

impl Default for FetchOptions {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(10),
            max_concurrent: 0,
        }
    }
}

/// Result of fetching and parsing a single source.
///
/// Outcomes are correlated by source position: `fetch_all` returns exactly
/// one outcome per input source, in input order.
#[derive(Debug)]
pub struct FetchOutcome {
    /// The source this outcome belongs to
    pub source: FeedSource,
    /// Parsed entries, or the failure that emptied this source's contribution
    pub result: Result<Vec<Entry>, FetchError>,
}

impl FetchOutcome {
    /// The source's contribution to the aggregate. A failed source
    /// contributes an empty slice, never an absent one.
    pub fn entries(&self) -> &[Entry] {
        match &self.result {
            Ok(entries) => entries,
            Err(_) => &[],
        }
    }
}

/// Builds the HTTP client shared by all fetch tasks in a batch.
pub fn build_client(user_agent: &str) -> reqwest::Result<reqwest::Client> {
    let mut headers = HeaderMap::new();
    headers.insert(
        header::ACCEPT,
        HeaderValue::from_static(
            "application/rss+xml, application/atom+xml, application/xml, text/xml, */*;q=0.9",
        ),
    );

    reqwest::Client::builder()
        .user_agent(user_agent.to_owned())
        .default_headers(headers)
        .redirect(reqwest::redirect::Policy::default())
        .build()
}

/// Retrieves the raw body of one feed URL.
///
/// A single GET per source per batch — no retries. The deadline covers the
/// whole retrieval, including reading the body.
///
/// # Errors
///
/// - [`FetchError::Timeout`] - the deadline elapsed
/// - [`FetchError::Transport`] - DNS, connection, TLS, or body-read failure
/// - [`FetchError::Status`] - non-2xx response
pub async fn fetch_source(
    client: &reqwest::Client,
    url: &str,
    timeout: Duration,
) -> Result<Vec<u8>, FetchError> {
    let retrieval = async {
        let response = client.get(url).send().await.map_err(FetchError::Transport)?;

        if !response.status().is_success() {
            return Err(FetchError::Status(response.status().as_u16()));
        }

        let bytes = response.bytes().await.map_err(FetchError::Transport)?;
        Ok(bytes.to_vec())
    };

    tokio::time::timeout(timeout, retrieval)
        .await
        .map_err(|_| FetchError::Timeout(timeout))?
}

/// Fetches and parses every source concurrently, returning outcomes aligned
/// to input order.
///
/// Fan-out: one task per source (bounded by `options.max_concurrent` when
/// non-zero). Fan-in: waits for every task to resolve — success or failure —
/// then places each outcome into the slot reserved for its source position.
/// Completion order never leaks into the output: a slow source delays only
/// itself, and overall latency is bounded by the slowest fetch, not the sum.
///
/// There is no batch-level cancellation and no batch-level error; a source
/// that fails logs a diagnostic and fills its slot with the failure.
pub async fn fetch_all(
    client: &reqwest::Client,
    sources: &[FeedSource],
    options: &FetchOptions,
) -> Vec<FetchOutcome> {
    if sources.is_empty() {
        return Vec::new();
    }

    let limit = if options.max_concurrent == 0 {
        sources.len()
    } else {
        options.max_concurrent
    };

    let mut slots: Vec<Option<FetchOutcome>> = Vec::with_capacity(sources.len());
    slots.resize_with(sources.len(), || None);

    let mut completed = stream::iter(sources.iter().cloned().enumerate())
        .map(|(index, source)| {
            let client = client.clone();
            let timeout = options.timeout;

            async move {
                tracing::debug!(source = %source, "Fetching feed");
                let result = fetch_and_parse(&client, &source, timeout).await;

                match &result {
                    Ok(entries) => {
                        tracing::debug!(source = %source, entries = entries.len(), "Feed fetched");
                    }
                    Err(e) => {
                        tracing::warn!(source = %source, error = %e, "Feed fetch failed");
                    }
                }

                (index, FetchOutcome { source, result })
            }
        })
        .buffer_unordered(limit);

    // Tasks finish in arbitrary order; each outcome lands in the slot
    // reserved for its source position.
    while let Some((index, outcome)) = completed.next().await {
        slots[index] = Some(outcome);
    }

    slots
        .into_iter()
        .map(|slot| slot.expect("every source task resolves into its slot"))
        .collect()
}

async fn fetch_and_parse(
    client: &reqwest::Client,
    source: &FeedSource,
    timeout: Duration,
) -> Result<Vec<Entry>, FetchError> {
    let bytes = fetch_source(client, source.url(), timeout).await?;
    parse_entries(&bytes).map_err(|e| FetchError::Parse(e.to_string()))
}
