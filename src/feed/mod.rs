//! Product feed export
//!
//! Companion pipeline to the crawl: fetches a Google-Shopping-style product
//! feed, cleans the free-text fields, buckets records by the gender field
//! through the ordered category rules, and writes one CSV per non-empty
//! bucket. Shares the fetcher and nothing else with the crawl pipeline.

mod categories;
mod clean;
mod export;
mod parser;

pub use categories::CategoryRules;
pub use clean::{clean_description, decode_entities};
pub use export::write_bucket_csv;
pub use parser::{parse_feed, FeedItem};

use crate::config::Config;
use crate::crawler::{build_http_client, fetch_url, FetchResult};
use crate::GleanerError;
use std::path::PathBuf;
use std::time::Duration;
use thiserror::Error;

/// Feed export errors
#[derive(Debug, Error)]
pub enum FeedError {
    #[error("feed export requested but no [feed] table in config")]
    NotConfigured,

    #[error("feed unavailable: {url}: {reason}")]
    Unavailable { url: String, reason: String },

    #[error("feed parse error: {message}")]
    Parse { message: String },

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Summary of a feed export run
#[derive(Debug)]
pub struct FeedReport {
    /// Items present in the feed
    pub total_items: usize,

    /// Items dropped for missing title or link
    pub skipped: usize,

    /// Per-bucket record counts, in rule order (empty buckets included)
    pub buckets: Vec<(String, usize)>,

    /// CSV files written (non-empty buckets only)
    pub files: Vec<PathBuf>,
}

/// Fetches the configured product feed and writes per-category CSV files
pub async fn run_feed_export(config: &Config) -> Result<FeedReport, GleanerError> {
    let feed_config = config.feed.as_ref().ok_or(FeedError::NotConfigured)?;

    let client = build_http_client(&config.crawler.user_agent)?;
    let timeout = Duration::from_secs(config.crawler.fetch_timeout_secs);

    tracing::info!("Fetching product feed: {}", feed_config.url);
    let body = match fetch_url(&client, &feed_config.url, timeout).await {
        FetchResult::Success { body, .. } => body,
        failed => {
            return Err(FeedError::Unavailable {
                url: feed_config.url.clone(),
                reason: failed
                    .failure_reason()
                    .unwrap_or_else(|| "unknown".to_string()),
            }
            .into())
        }
    };

    let raw_items = parse_feed(&body).map_err(|message| FeedError::Parse { message })?;
    let total_items = raw_items.len();
    tracing::info!("Feed contains {} items", total_items);

    let rules = CategoryRules::from_config(feed_config);

    // Buckets seeded in rule order so output is deterministic
    let mut buckets: Vec<(String, Vec<FeedItem>)> = rules
        .bucket_names()
        .into_iter()
        .map(|name| (name.to_string(), Vec::new()))
        .collect();

    let mut skipped = 0;
    for raw in raw_items {
        let item = FeedItem {
            gender: decode_entities(&raw.gender).to_lowercase(),
            title: decode_entities(&raw.title),
            link: decode_entities(&raw.link),
            price: decode_entities(&raw.price),
            description: clean_description(&raw.description),
        };

        if item.title.is_empty() || item.link.is_empty() {
            skipped += 1;
            continue;
        }

        let bucket = rules.bucket_for(&item.gender);
        if let Some((_, rows)) = buckets.iter_mut().find(|(name, _)| name == bucket) {
            rows.push(item);
        }
    }

    let output_dir = PathBuf::from(&feed_config.output_dir);
    let mut files = Vec::new();
    for (name, rows) in &buckets {
        if rows.is_empty() {
            continue;
        }
        let path = write_bucket_csv(&output_dir, &feed_config.file_prefix, name, rows)?;
        tracing::info!("Wrote {} records to {}", rows.len(), path.display());
        files.push(path);
    }

    Ok(FeedReport {
        total_items,
        skipped,
        buckets: buckets
            .into_iter()
            .map(|(name, rows)| (name, rows.len()))
            .collect(),
        files,
    })
}
