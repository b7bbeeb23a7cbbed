//! Gleaner main entry point
//!
//! Command-line interface for the sitemap content harvester and the
//! companion product feed exporter.

use anyhow::Result;
use clap::Parser;
use gleaner::config::load_config;
use gleaner::crawler::Coordinator;
use gleaner::feed::run_feed_export;
use gleaner::output::print_summary;
use std::path::PathBuf;
use std::sync::atomic::Ordering;
use tracing_subscriber::EnvFilter;

/// Gleaner: a sitemap-driven content harvester
///
/// Gleaner fetches an XML sitemap, retrieves every page it references,
/// extracts the configured content region, and aggregates the cleaned text
/// into a single artifact. With --feed it instead partitions a product feed
/// into per-category CSV files.
#[derive(Parser, Debug)]
#[command(name = "gleaner")]
#[command(version)]
#[command(about = "A sitemap-driven content harvester", long_about = None)]
struct Cli {
    /// Path to TOML configuration file
    #[arg(value_name = "CONFIG")]
    config: PathBuf,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,

    /// Validate config and show what would be crawled without crawling
    #[arg(long, conflicts_with = "feed")]
    dry_run: bool,

    /// Run the product feed export instead of the crawl
    #[arg(long)]
    feed: bool,

    /// Append to an existing artifact instead of truncating it
    #[arg(long)]
    append: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    setup_logging(cli.verbose, cli.quiet);

    tracing::info!("Loading configuration from: {}", cli.config.display());
    let mut config = match load_config(&cli.config) {
        Ok(config) => config,
        Err(e) => {
            tracing::error!("Failed to load configuration: {}", e);
            return Err(e.into());
        }
    };

    if cli.append {
        config.output.append = true;
    }

    if cli.dry_run {
        handle_dry_run(&config);
        Ok(())
    } else if cli.feed {
        handle_feed(&config).await
    } else {
        handle_crawl(config).await
    }
}

/// Sets up the logging/tracing subscriber based on verbosity level
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("gleaner=info,warn"),
            1 => EnvFilter::new("gleaner=debug,info"),
            2 => EnvFilter::new("gleaner=trace,debug"),
            _ => EnvFilter::new("trace"),
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .init();
}

/// Handles the --dry-run mode: validates config and shows what would run
fn handle_dry_run(config: &gleaner::config::Config) {
    println!("=== Gleaner Dry Run ===\n");

    println!("Crawler:");
    println!("  Sitemap URL: {}", config.crawler.sitemap_url);
    println!("  Max workers: {}", config.crawler.max_workers);
    println!("  Request delay: {}ms", config.crawler.request_delay_ms);
    println!("  Fetch timeout: {}s", config.crawler.fetch_timeout_secs);
    println!(
        "  Dispatch: {}",
        if config.crawler.sequential {
            "sequential (sitemap order)"
        } else {
            "concurrent (completion order)"
        }
    );

    println!("\nExtractor:");
    println!("  Content class: {}", config.extractor.content_class);
    if let Some(fallback) = &config.extractor.fallback_class {
        println!("  Fallback class: {}", fallback);
    }
    println!("  Title heading: {}", config.extractor.title_heading);
    println!("  Body tags: {}", config.extractor.body_tags.join(", "));

    println!("\nOutput:");
    println!("  Artifact: {}", config.output.artifact_path);
    println!(
        "  Record rule: {} x '{}'",
        config.output.rule_width, config.output.rule_char
    );
    println!("  Append mode: {}", config.output.append);

    match &config.feed {
        Some(feed) => {
            println!("\nFeed export:");
            println!("  URL: {}", feed.url);
            println!("  Output dir: {}", feed.output_dir);
            println!("  Categories ({}):", feed.categories.len());
            for rule in &feed.categories {
                println!("    - {} [{}]", rule.name, rule.keywords.join(", "));
            }
            println!("  Default category: {}", feed.default_category);
        }
        None => println!("\nFeed export: not configured"),
    }

    println!("\n✓ Configuration is valid");
}

/// Handles the main crawl operation
async fn handle_crawl(config: gleaner::config::Config) -> Result<()> {
    let coordinator = Coordinator::new(config)?;

    // Ctrl-C stops new dispatch; in-flight fetches finish or time out
    let cancel = coordinator.cancel_handle();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            tracing::warn!("Interrupt received, finishing in-flight work");
            cancel.store(true, Ordering::SeqCst);
        }
    });

    let run = coordinator.run().await?;
    print_summary(&run);

    Ok(())
}

/// Handles the --feed mode: product feed to per-category CSV files
async fn handle_feed(config: &gleaner::config::Config) -> Result<()> {
    let report = run_feed_export(config).await?;

    println!("=== Feed Export Summary ===");
    println!("  Items in feed: {}", report.total_items);
    println!("  Skipped (missing title/link): {}", report.skipped);
    for (bucket, count) in &report.buckets {
        println!("  {}: {}", bucket, count);
    }
    for file in &report.files {
        println!("  Wrote: {}", file.display());
    }

    Ok(())
}
