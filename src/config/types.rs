use serde::Deserialize;

/// Main configuration structure for gleaner
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub crawler: CrawlerConfig,
    pub extractor: ExtractorConfig,
    pub output: OutputConfig,
    pub feed: Option<FeedConfig>,
}

/// Crawler behavior configuration
#[derive(Debug, Clone, Deserialize)]
pub struct CrawlerConfig {
    /// URL of the XML sitemap to crawl
    #[serde(rename = "sitemap-url")]
    pub sitemap_url: String,

    /// Size of the fetch worker pool
    #[serde(rename = "max-workers", default = "default_max_workers")]
    pub max_workers: u32,

    /// Fixed delay before each page fetch (milliseconds)
    #[serde(rename = "request-delay-ms", default = "default_request_delay_ms")]
    pub request_delay_ms: u64,

    /// Per-request timeout (seconds)
    #[serde(rename = "fetch-timeout-secs", default = "default_fetch_timeout_secs")]
    pub fetch_timeout_secs: u64,

    /// Process URLs one at a time in sitemap order instead of concurrently
    #[serde(default)]
    pub sequential: bool,

    /// User-Agent header sent with every request. Servers commonly reject
    /// default client identities, so this defaults to a browser string.
    #[serde(rename = "user-agent", default = "default_user_agent")]
    pub user_agent: String,
}

/// Content extraction configuration
#[derive(Debug, Clone, Deserialize)]
pub struct ExtractorConfig {
    /// CSS class of the element holding the page's primary content
    #[serde(rename = "content-class")]
    pub content_class: String,

    /// Secondary class to try when the primary container is absent
    #[serde(rename = "fallback-class")]
    pub fallback_class: Option<String>,

    /// Heading tag whose first occurrence inside the container becomes the title
    #[serde(rename = "title-heading", default = "default_title_heading")]
    pub title_heading: String,

    /// Child tags collected into the body, in document order
    #[serde(rename = "body-tags", default = "default_body_tags")]
    pub body_tags: Vec<String>,

    /// Marker wrapped around heading text in the flattened body
    #[serde(rename = "heading-marker", default = "default_heading_marker")]
    pub heading_marker: String,
}

/// Output artifact configuration
#[derive(Debug, Clone, Deserialize)]
pub struct OutputConfig {
    /// Path of the aggregated text artifact
    #[serde(rename = "artifact-path")]
    pub artifact_path: String,

    /// Character used for record rule lines
    #[serde(rename = "rule-char", default = "default_rule_char")]
    pub rule_char: char,

    /// Width of record rule lines
    #[serde(rename = "rule-width", default = "default_rule_width")]
    pub rule_width: usize,

    /// Append to an existing artifact instead of truncating at run start
    #[serde(default)]
    pub append: bool,
}

/// Product feed export configuration
#[derive(Debug, Clone, Deserialize)]
pub struct FeedConfig {
    /// URL of the product feed XML document
    pub url: String,

    /// Directory receiving the per-category CSV files
    #[serde(rename = "output-dir")]
    pub output_dir: String,

    /// Filename prefix for the CSV files
    #[serde(rename = "file-prefix", default = "default_file_prefix")]
    pub file_prefix: String,

    /// Bucket receiving records no category rule matched
    #[serde(rename = "default-category", default = "default_category_name")]
    pub default_category: String,

    /// Ordered category rules, evaluated top-to-bottom, first match wins
    #[serde(rename = "category", default)]
    pub categories: Vec<CategoryRule>,
}

/// A single category bucketing rule
#[derive(Debug, Clone, Deserialize)]
pub struct CategoryRule {
    /// Bucket name (used in the output filename)
    pub name: String,

    /// Keywords matched case-insensitively against the gender field
    pub keywords: Vec<String>,
}

fn default_max_workers() -> u32 {
    3
}

fn default_request_delay_ms() -> u64 {
    1000
}

fn default_fetch_timeout_secs() -> u64 {
    30
}

fn default_user_agent() -> String {
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 \
     (KHTML, like Gecko) Chrome/91.0.4472.124 Safari/537.36"
        .to_string()
}

fn default_title_heading() -> String {
    "h2".to_string()
}

fn default_body_tags() -> Vec<String> {
    vec!["p".to_string(), "h2".to_string()]
}

fn default_heading_marker() -> String {
    "###".to_string()
}

fn default_rule_char() -> char {
    '-'
}

fn default_rule_width() -> usize {
    100
}

fn default_file_prefix() -> String {
    "products".to_string()
}

fn default_category_name() -> String {
    "unspecified".to_string()
}
