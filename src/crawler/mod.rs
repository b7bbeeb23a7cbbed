//! Crawler module: sitemap resolution, page fetching, content extraction,
//! and crawl coordination
//!
//! The pipeline is: resolver -> list of URLs -> coordinator deduplicates ->
//! fetcher -> raw HTML -> extractor -> (title, body) -> writer. Per-URL
//! failures are isolated; only sitemap-level failures end a run early.

mod coordinator;
mod extractor;
mod fetcher;
mod sitemap;

pub use coordinator::{run_crawl, Coordinator};
pub use extractor::{extract, ExtractedContent, UNTITLED};
pub use fetcher::{build_http_client, fetch_url, FetchResult};
pub use sitemap::{resolve, SitemapError};

use crate::config::Config;
use crate::output::CrawlRun;
use crate::GleanerError;

/// Runs a complete crawl operation
///
/// This is the main entry point for starting a crawl. It will:
/// 1. Resolve the sitemap into a deduplicated URL list
/// 2. Dispatch fetch+extract+write units across the worker pool
/// 3. Aggregate per-URL outcomes into the run summary
///
/// # Arguments
///
/// * `config` - The crawler configuration
///
/// # Returns
///
/// * `Ok(CrawlRun)` - Final counters, produced for every outcome
/// * `Err(GleanerError)` - Setup failure (client build, artifact creation)
pub async fn crawl(config: Config) -> Result<CrawlRun, GleanerError> {
    run_crawl(config).await
}
