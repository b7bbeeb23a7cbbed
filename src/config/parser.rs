use crate::config::types::Config;
use crate::config::validation::validate;
use crate::ConfigError;
use std::path::Path;

/// Loads and parses a configuration file from the given path
///
/// # Arguments
///
/// * `path` - Path to the TOML configuration file
///
/// # Returns
///
/// * `Ok(Config)` - Successfully loaded and validated configuration
/// * `Err(ConfigError)` - Failed to load, parse, or validate the configuration
pub fn load_config(path: &Path) -> Result<Config, ConfigError> {
    let content = std::fs::read_to_string(path)?;

    let config: Config = toml::from_str(&content)?;

    validate(&config)?;

    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn create_temp_config(content: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file.flush().unwrap();
        file
    }

    const MINIMAL_CONFIG: &str = r#"
[crawler]
sitemap-url = "https://example.com/post-sitemap.xml"

[extractor]
content-class = "blog-single-content"

[output]
artifact-path = "./site_content.txt"
"#;

    #[test]
    fn test_load_minimal_config_applies_defaults() {
        let file = create_temp_config(MINIMAL_CONFIG);
        let config = load_config(file.path()).unwrap();

        assert_eq!(config.crawler.max_workers, 3);
        assert_eq!(config.crawler.request_delay_ms, 1000);
        assert_eq!(config.crawler.fetch_timeout_secs, 30);
        assert!(!config.crawler.sequential);
        assert!(config.crawler.user_agent.starts_with("Mozilla/5.0"));
        assert_eq!(config.extractor.title_heading, "h2");
        assert_eq!(config.extractor.body_tags, vec!["p", "h2"]);
        assert_eq!(config.extractor.heading_marker, "###");
        assert_eq!(config.output.rule_char, '-');
        assert_eq!(config.output.rule_width, 100);
        assert!(!config.output.append);
        assert!(config.feed.is_none());
    }

    #[test]
    fn test_load_full_config() {
        let config_content = r#"
[crawler]
sitemap-url = "https://example.com/post-sitemap.xml"
max-workers = 5
request-delay-ms = 250
fetch-timeout-secs = 10
sequential = true

[extractor]
content-class = "article-body"
fallback-class = "content"
title-heading = "h1"
body-tags = ["p", "h2", "h3"]
heading-marker = "=="

[output]
artifact-path = "./content.txt"
rule-char = "="
rule-width = 80
append = true

[feed]
url = "https://example.com/feed.xml"
output-dir = "./feed_out"
file-prefix = "items"
default-category = "other"

[[feed.category]]
name = "men"
keywords = ["men", "male"]

[[feed.category]]
name = "women"
keywords = ["women"]
"#;

        let file = create_temp_config(config_content);
        let config = load_config(file.path()).unwrap();

        assert_eq!(config.crawler.max_workers, 5);
        assert!(config.crawler.sequential);
        assert_eq!(config.extractor.fallback_class.as_deref(), Some("content"));
        assert_eq!(config.output.rule_char, '=');
        assert_eq!(config.output.rule_width, 80);

        let feed = config.feed.unwrap();
        assert_eq!(feed.file_prefix, "items");
        assert_eq!(feed.default_category, "other");
        assert_eq!(feed.categories.len(), 2);
        assert_eq!(feed.categories[0].name, "men");
    }

    #[test]
    fn test_load_config_with_invalid_path() {
        let result = load_config(Path::new("/nonexistent/config.toml"));
        assert!(result.is_err());
    }

    #[test]
    fn test_load_config_with_invalid_toml() {
        let file = create_temp_config("this is not valid TOML {{{");
        let result = load_config(file.path());
        assert!(matches!(result, Err(ConfigError::Parse(_))));
    }

    #[test]
    fn test_load_config_with_validation_error() {
        let config_content = r#"
[crawler]
sitemap-url = "https://example.com/sitemap.xml"
max-workers = 0

[extractor]
content-class = "blog-single-content"

[output]
artifact-path = "./out.txt"
"#;
        let file = create_temp_config(config_content);
        let result = load_config(file.path());
        assert!(matches!(result, Err(ConfigError::Validation(_))));
    }
}
