use crate::config::types::{Config, CrawlerConfig, ExtractorConfig, FeedConfig, OutputConfig};
use crate::ConfigError;
use url::Url;

/// Validates the entire configuration
pub fn validate(config: &Config) -> Result<(), ConfigError> {
    validate_crawler_config(&config.crawler)?;
    validate_extractor_config(&config.extractor)?;
    validate_output_config(&config.output)?;
    if let Some(feed) = &config.feed {
        validate_feed_config(feed)?;
    }
    Ok(())
}

/// Validates crawler configuration
fn validate_crawler_config(config: &CrawlerConfig) -> Result<(), ConfigError> {
    validate_http_url(&config.sitemap_url, "sitemap-url")?;

    if config.max_workers < 1 || config.max_workers > 100 {
        return Err(ConfigError::Validation(format!(
            "max-workers must be between 1 and 100, got {}",
            config.max_workers
        )));
    }

    if config.fetch_timeout_secs < 1 {
        return Err(ConfigError::Validation(format!(
            "fetch-timeout-secs must be >= 1, got {}",
            config.fetch_timeout_secs
        )));
    }

    if config.user_agent.trim().is_empty() {
        return Err(ConfigError::Validation(
            "user-agent cannot be empty".to_string(),
        ));
    }

    Ok(())
}

/// Validates extractor configuration
fn validate_extractor_config(config: &ExtractorConfig) -> Result<(), ConfigError> {
    if config.content_class.trim().is_empty() {
        return Err(ConfigError::Validation(
            "content-class cannot be empty".to_string(),
        ));
    }

    validate_css_class(&config.content_class, "content-class")?;
    if let Some(fallback) = &config.fallback_class {
        validate_css_class(fallback, "fallback-class")?;
    }

    if config.title_heading.trim().is_empty() {
        return Err(ConfigError::Validation(
            "title-heading cannot be empty".to_string(),
        ));
    }

    if config.body_tags.is_empty() {
        return Err(ConfigError::Validation(
            "body-tags must list at least one tag".to_string(),
        ));
    }

    for tag in &config.body_tags {
        if tag.is_empty() || !tag.chars().all(|c| c.is_ascii_alphanumeric()) {
            return Err(ConfigError::Validation(format!(
                "body-tags entries must be plain tag names, got '{}'",
                tag
            )));
        }
    }

    Ok(())
}

/// Validates output configuration
fn validate_output_config(config: &OutputConfig) -> Result<(), ConfigError> {
    if config.artifact_path.is_empty() {
        return Err(ConfigError::Validation(
            "artifact-path cannot be empty".to_string(),
        ));
    }

    if config.rule_width < 10 {
        return Err(ConfigError::Validation(format!(
            "rule-width must be >= 10, got {}",
            config.rule_width
        )));
    }

    Ok(())
}

/// Validates feed export configuration
fn validate_feed_config(config: &FeedConfig) -> Result<(), ConfigError> {
    validate_http_url(&config.url, "feed url")?;

    if config.output_dir.is_empty() {
        return Err(ConfigError::Validation(
            "feed output-dir cannot be empty".to_string(),
        ));
    }

    if config.default_category.trim().is_empty() {
        return Err(ConfigError::Validation(
            "default-category cannot be empty".to_string(),
        ));
    }

    for rule in &config.categories {
        if rule.name.trim().is_empty() {
            return Err(ConfigError::Validation(
                "category rules must have a name".to_string(),
            ));
        }
        if rule.keywords.is_empty() || rule.keywords.iter().any(|k| k.trim().is_empty()) {
            return Err(ConfigError::Validation(format!(
                "category '{}' must have at least one non-empty keyword",
                rule.name
            )));
        }
    }

    Ok(())
}

/// Validates that a URL parses and uses an http(s) scheme
fn validate_http_url(raw: &str, field: &str) -> Result<(), ConfigError> {
    let url = Url::parse(raw)
        .map_err(|e| ConfigError::InvalidUrl(format!("Invalid {}: '{}': {}", field, raw, e)))?;

    if url.scheme() != "http" && url.scheme() != "https" {
        return Err(ConfigError::Validation(format!(
            "{} must use http or https, got '{}'",
            field, raw
        )));
    }

    Ok(())
}

/// Validates that a class name is usable inside a CSS class selector
fn validate_css_class(class: &str, field: &str) -> Result<(), ConfigError> {
    let ok = class
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_');
    if !ok {
        return Err(ConfigError::Validation(format!(
            "{} must contain only alphanumerics, hyphens and underscores, got '{}'",
            field, class
        )));
    }
    Ok(())
}
