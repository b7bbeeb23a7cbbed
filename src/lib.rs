//! Gleaner: a sitemap-driven content harvester
//!
//! This crate fetches an XML sitemap, crawls every page it references with a
//! bounded worker pool, extracts a configured content region from each page,
//! and aggregates the cleaned text into a single artifact. A companion feed
//! exporter partitions a Google-Shopping-style product feed into per-category
//! CSV files.

pub mod config;
pub mod crawler;
pub mod feed;
pub mod output;

use thiserror::Error;

/// Main error type for gleaner operations
#[derive(Debug, Error)]
pub enum GleanerError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Sitemap error: {0}")]
    Sitemap(#[from] crawler::SitemapError),

    #[error("Feed error: {0}")]
    Feed(#[from] feed::FeedError),

    #[error("HTTP client error: {0}")]
    Reqwest(#[from] reqwest::Error),

    #[error("URL parse error: {0}")]
    UrlParse(#[from] url::ParseError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Configuration-specific errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Invalid URL in config: {0}")]
    InvalidUrl(String),
}

/// Result type alias for gleaner operations
pub type Result<T> = std::result::Result<T, GleanerError>;

/// Result type alias for configuration operations
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

// Re-export commonly used types
pub use config::Config;
pub use crawler::{ExtractedContent, FetchResult};
pub use output::{CrawlRun, RunOutcome};
