//! Crawl run counters and the final summary report

use std::time::Duration;

/// How a crawl run ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunOutcome {
    /// Every discovered URL was dispatched and completed
    Completed,

    /// The sitemap parsed but listed no URLs
    NoUrls,

    /// The sitemap itself could not be fetched
    SitemapUnavailable,

    /// The sitemap document was malformed
    SitemapParseFailed,

    /// Cancellation stopped dispatch before all URLs completed
    Cancelled,
}

impl RunOutcome {
    fn describe(&self) -> &'static str {
        match self {
            RunOutcome::Completed => "completed",
            RunOutcome::NoUrls => "no URLs in sitemap",
            RunOutcome::SitemapUnavailable => "sitemap unavailable",
            RunOutcome::SitemapParseFailed => "sitemap parse failed",
            RunOutcome::Cancelled => "cancelled",
        }
    }
}

/// Aggregate counters for a crawl run
///
/// Counters grow monotonically while the run progresses and always satisfy
/// `successful <= processed <= total`.
#[derive(Debug, Clone)]
pub struct CrawlRun {
    /// URLs discovered in the sitemap
    pub total: u64,

    /// URLs whose unit of work completed (success or failure)
    pub processed: u64,

    /// URLs that produced a written record
    pub successful: u64,

    /// Records lost to artifact write errors
    pub write_failures: u64,

    /// How the run ended
    pub outcome: RunOutcome,

    /// Wall-clock duration of the run
    pub elapsed: Duration,
}

impl CrawlRun {
    /// Creates counters for a run over `total` discovered URLs
    pub fn new(total: u64) -> Self {
        Self {
            total,
            processed: 0,
            successful: 0,
            write_failures: 0,
            outcome: RunOutcome::Completed,
            elapsed: Duration::ZERO,
        }
    }

    /// Creates the summary for a run that never dispatched anything
    pub fn aborted(outcome: RunOutcome) -> Self {
        Self {
            total: 0,
            processed: 0,
            successful: 0,
            write_failures: 0,
            outcome,
            elapsed: Duration::ZERO,
        }
    }

    /// Records a completed unit of work
    pub fn record_processed(&mut self, successful: bool) {
        self.processed += 1;
        if successful {
            self.successful += 1;
        }
    }

    /// Records a record lost to an artifact write error
    pub fn record_write_failure(&mut self) {
        self.write_failures += 1;
    }

    /// Success ratio over discovered URLs; `None` when nothing was discovered
    pub fn success_rate(&self) -> Option<f64> {
        if self.total == 0 {
            None
        } else {
            Some(self.successful as f64 / self.total as f64 * 100.0)
        }
    }

    /// Percentage of discovered URLs processed so far
    pub fn progress_percent(&self) -> f64 {
        if self.total == 0 {
            100.0
        } else {
            self.processed as f64 / self.total as f64 * 100.0
        }
    }
}

/// Prints the human-readable final report for a run
///
/// Printed for every outcome, including aborted runs.
pub fn print_summary(run: &CrawlRun) {
    println!("{}", "=".repeat(50));
    println!("CRAWL SUMMARY");
    println!("  Outcome:        {}", run.outcome.describe());
    println!("  Total URLs:     {}", run.total);
    println!("  Processed:      {}", run.processed);
    println!("  Successful:     {}", run.successful);
    if run.write_failures > 0 {
        println!("  Write failures: {}", run.write_failures);
    }
    match run.success_rate() {
        Some(rate) => println!("  Success rate:   {:.2}%", rate),
        None => println!("  Success rate:   n/a (no URLs discovered)"),
    }
    println!("  Elapsed:        {:.2}s", run.elapsed.as_secs_f64());
    println!("{}", "=".repeat(50));
}
