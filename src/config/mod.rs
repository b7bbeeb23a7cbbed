//! Configuration module for gleaner
//!
//! This module handles loading, parsing, and validating TOML configuration files.
//!
//! # Example
//!
//! ```no_run
//! use gleaner::config::load_config;
//! use std::path::Path;
//!
//! let config = load_config(Path::new("config.toml")).unwrap();
//! println!("Crawling sitemap: {}", config.crawler.sitemap_url);
//! ```

mod parser;
mod types;
mod validation;

// Re-export types
pub use types::{
    CategoryRule, Config, CrawlerConfig, ExtractorConfig, FeedConfig, OutputConfig,
};

// Re-export parser functions
pub use parser::load_config;
