//! Crawl coordinator - main crawl orchestration logic
//!
//! Owns the visited set, drives the sitemap resolver, dispatches
//! fetch+extract+write units of work across a bounded worker pool (or
//! sequentially, per configuration), and aggregates per-URL outcomes into
//! the final run summary. A single URL's failure never aborts the run; only
//! sitemap-level failures end it early, and those still produce a summary
//! rather than an error.

use crate::config::Config;
use crate::crawler::extractor::extract;
use crate::crawler::fetcher::{build_http_client, fetch_url, FetchResult};
use crate::crawler::sitemap::{resolve, SitemapError};
use crate::output::{ArtifactWriter, CrawlRun, RunOutcome};
use crate::GleanerError;
use reqwest::Client;
use std::collections::HashSet;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};
use tokio::sync::Semaphore;
use tokio::task::JoinSet;

/// Outcome of a single unit of work
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum UnitOutcome {
    /// Fetched, extracted, and written to the artifact
    Written,

    /// The page fetch failed (timeout, network, non-2xx)
    FetchFailed,

    /// The content region was missing or empty
    ExtractionAbsent,

    /// Extraction succeeded but the artifact write failed
    WriteFailed,

    /// Cancelled before the fetch started; not counted as processed
    Skipped,
}

/// Main crawler coordinator structure
pub struct Coordinator {
    config: Arc<Config>,
    client: Client,
    visited: Arc<Mutex<HashSet<String>>>,
    cancelled: Arc<AtomicBool>,
}

impl Coordinator {
    /// Creates a new coordinator instance
    pub fn new(config: Config) -> Result<Self, GleanerError> {
        let client = build_http_client(&config.crawler.user_agent)?;

        Ok(Self {
            config: Arc::new(config),
            client,
            visited: Arc::new(Mutex::new(HashSet::new())),
            cancelled: Arc::new(AtomicBool::new(false)),
        })
    }

    /// Returns a handle that stops new dispatch when set
    ///
    /// In-flight fetches finish or hit their timeout; the run then surfaces
    /// a partial summary with the `Cancelled` outcome.
    pub fn cancel_handle(&self) -> Arc<AtomicBool> {
        Arc::clone(&self.cancelled)
    }

    /// Runs the crawl to completion and returns the run summary
    ///
    /// Sitemap-level failures (unreachable, malformed, empty) end the run
    /// immediately with zero totals and a distinguishing outcome; they are
    /// logged, not raised.
    pub async fn run(&self) -> Result<CrawlRun, GleanerError> {
        let start = Instant::now();
        let timeout = Duration::from_secs(self.config.crawler.fetch_timeout_secs);

        let urls = {
            let seen = self.visited.lock().unwrap().clone();
            match resolve(&self.client, &self.config.crawler.sitemap_url, timeout, &seen).await {
                Ok(urls) => urls,
                Err(e @ SitemapError::Unavailable { .. }) => {
                    tracing::error!("{}", e);
                    let mut run = CrawlRun::aborted(RunOutcome::SitemapUnavailable);
                    run.elapsed = start.elapsed();
                    return Ok(run);
                }
                Err(e @ SitemapError::Parse { .. }) => {
                    tracing::error!("{}", e);
                    let mut run = CrawlRun::aborted(RunOutcome::SitemapParseFailed);
                    run.elapsed = start.elapsed();
                    return Ok(run);
                }
            }
        };

        if urls.is_empty() {
            tracing::warn!("Sitemap listed no URLs, nothing to crawl");
            let mut run = CrawlRun::aborted(RunOutcome::NoUrls);
            run.elapsed = start.elapsed();
            return Ok(run);
        }

        let writer = Arc::new(Mutex::new(ArtifactWriter::create(&self.config.output)?));
        let mut run = CrawlRun::new(urls.len() as u64);

        tracing::info!(
            "Dispatching {} URLs ({} mode, {} workers)",
            urls.len(),
            if self.config.crawler.sequential {
                "sequential"
            } else {
                "concurrent"
            },
            self.config.crawler.max_workers
        );

        if self.config.crawler.sequential {
            self.run_sequential(&urls, &writer, &mut run).await;
        } else {
            self.run_concurrent(urls, &writer, &mut run).await;
        }

        if self.cancelled.load(Ordering::SeqCst) {
            run.outcome = RunOutcome::Cancelled;
        }

        run.elapsed = start.elapsed();
        tracing::info!(
            "Crawl finished: {}/{} processed, {} successful in {:.2}s",
            run.processed,
            run.total,
            run.successful,
            run.elapsed.as_secs_f64()
        );

        Ok(run)
    }

    /// Processes URLs one at a time, in sitemap order
    async fn run_sequential(
        &self,
        urls: &[String],
        writer: &Arc<Mutex<ArtifactWriter>>,
        run: &mut CrawlRun,
    ) {
        for url in urls {
            if self.cancelled.load(Ordering::SeqCst) {
                tracing::info!("Cancellation requested, stopping dispatch");
                break;
            }

            if !self.claim(url) {
                continue;
            }

            let outcome = process_url(
                &self.client,
                &self.config,
                writer,
                url,
                self.cancelled.clone(),
            )
            .await;
            apply_outcome(run, outcome, url);
        }
    }

    /// Processes URLs through a bounded worker pool
    ///
    /// Records land in the artifact in completion order, not sitemap order;
    /// sequential mode is the strict-order alternative.
    async fn run_concurrent(
        &self,
        urls: Vec<String>,
        writer: &Arc<Mutex<ArtifactWriter>>,
        run: &mut CrawlRun,
    ) {
        let semaphore = Arc::new(Semaphore::new(self.config.crawler.max_workers as usize));
        let mut tasks: JoinSet<(String, UnitOutcome)> = JoinSet::new();

        for url in urls {
            if !self.claim(&url) {
                continue;
            }

            let semaphore = Arc::clone(&semaphore);
            let client = self.client.clone();
            let config = Arc::clone(&self.config);
            let writer = Arc::clone(writer);
            let cancelled = Arc::clone(&self.cancelled);

            tasks.spawn(async move {
                let _permit = match semaphore.acquire_owned().await {
                    Ok(permit) => permit,
                    Err(_) => return (url, UnitOutcome::Skipped),
                };

                let outcome =
                    process_url(&client, &config, &writer, &url, cancelled).await;
                (url, outcome)
            });
        }

        while let Some(joined) = tasks.join_next().await {
            match joined {
                Ok((url, outcome)) => apply_outcome(run, outcome, &url),
                Err(e) => {
                    tracing::error!("Worker task failed: {}", e);
                    run.record_processed(false);
                }
            }
        }
    }

    /// Atomically claims a URL for dispatch
    ///
    /// Check-and-mark happens under a single lock, so two workers can never
    /// claim the same URL.
    fn claim(&self, url: &str) -> bool {
        self.visited.lock().unwrap().insert(url.to_string())
    }
}

/// Executes one unit of work: delay, fetch, extract, write
async fn process_url(
    client: &Client,
    config: &Config,
    writer: &Arc<Mutex<ArtifactWriter>>,
    url: &str,
    cancelled: Arc<AtomicBool>,
) -> UnitOutcome {
    if cancelled.load(Ordering::SeqCst) {
        return UnitOutcome::Skipped;
    }

    // Courtesy delay toward the remote server, not a correctness mechanism
    let delay = config.crawler.request_delay_ms;
    if delay > 0 {
        tokio::time::sleep(Duration::from_millis(delay)).await;
    }

    let timeout = Duration::from_secs(config.crawler.fetch_timeout_secs);
    tracing::debug!("Fetching {}", url);

    let fetched = fetch_url(client, url, timeout).await;
    let body = match fetched {
        FetchResult::Success { body, .. } => body,
        failed => {
            tracing::warn!(
                "Fetch failed for {}: {}",
                url,
                failed.failure_reason().unwrap_or_default()
            );
            return UnitOutcome::FetchFailed;
        }
    };

    let Some(content) = extract(&body, url, &config.extractor) else {
        tracing::warn!("No content extracted from {}", url);
        return UnitOutcome::ExtractionAbsent;
    };

    let write_result = {
        let mut writer = writer.lock().unwrap();
        writer.append(&content)
    };

    match write_result {
        Ok(()) => {
            tracing::debug!("Wrote record for {}", url);
            UnitOutcome::Written
        }
        Err(e) => {
            tracing::error!("Failed to write record for {}: {}", url, e);
            UnitOutcome::WriteFailed
        }
    }
}

/// Folds a unit outcome into the run counters and logs progress
fn apply_outcome(run: &mut CrawlRun, outcome: UnitOutcome, url: &str) {
    match outcome {
        UnitOutcome::Written => run.record_processed(true),
        UnitOutcome::FetchFailed | UnitOutcome::ExtractionAbsent => run.record_processed(false),
        UnitOutcome::WriteFailed => {
            run.record_processed(false);
            run.record_write_failure();
        }
        UnitOutcome::Skipped => {
            tracing::debug!("Skipped {} (cancelled before dispatch)", url);
            return;
        }
    }

    tracing::info!(
        "Progress: {:.1}% ({}/{}) - {}",
        run.progress_percent(),
        run.processed,
        run.total,
        url
    );
}

/// Runs a complete crawl with a fresh coordinator
pub async fn run_crawl(config: Config) -> Result<CrawlRun, GleanerError> {
    let coordinator = Coordinator::new(config)?;
    coordinator.run().await
}
