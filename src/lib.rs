//! Batch keyword search across RSS/Atom feeds.
//!
//! One invocation runs one batch: fetch every configured feed concurrently,
//! flatten the results into a single ordered aggregate, then scan that
//! aggregate once per keyword. Per-source failures (timeouts, transport
//! errors, bad statuses, malformed payloads) degrade to an empty contribution
//! for that source and never abort the batch.

pub mod config;
pub mod feed;
pub mod pipeline;
pub mod report;
pub mod search;
pub mod sources;
