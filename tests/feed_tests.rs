//! Integration tests for the product feed export

use gleaner::config::{CategoryRule, Config, CrawlerConfig, ExtractorConfig, FeedConfig, OutputConfig};
use gleaner::feed::run_feed_export;
use tempfile::TempDir;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn feed_config(feed_url: &str, output_dir: &str) -> Config {
    Config {
        crawler: CrawlerConfig {
            sitemap_url: "https://example.com/sitemap.xml".to_string(),
            max_workers: 3,
            request_delay_ms: 0,
            fetch_timeout_secs: 5,
            sequential: false,
            user_agent: "TestAgent/1.0".to_string(),
        },
        extractor: ExtractorConfig {
            content_class: "blog-single-content".to_string(),
            fallback_class: None,
            title_heading: "h2".to_string(),
            body_tags: vec!["p".to_string(), "h2".to_string()],
            heading_marker: "###".to_string(),
        },
        output: OutputConfig {
            artifact_path: "./unused.txt".to_string(),
            rule_char: '-',
            rule_width: 40,
            append: false,
        },
        feed: Some(FeedConfig {
            url: feed_url.to_string(),
            output_dir: output_dir.to_string(),
            file_prefix: "products".to_string(),
            default_category: "unspecified".to_string(),
            categories: vec![
                CategoryRule {
                    name: "women".to_string(),
                    keywords: vec!["kadın".to_string(), "women".to_string()],
                },
                CategoryRule {
                    name: "men".to_string(),
                    keywords: vec!["erkek".to_string(), "men".to_string()],
                },
            ],
        }),
    }
}

const FEED_XML: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<rss version="2.0" xmlns:g="http://base.google.com/ns/1.0">
  <channel>
    <item>
      <g:gender>Erkek</g:gender>
      <g:title>Wool Coat</g:title>
      <g:link>https://example.com/p/1</g:link>
      <g:price>100 TRY</g:price>
      <g:description><![CDATA[<p>Warm</p><ul><li>Wool</li><li>Dry clean</li></ul>]]></g:description>
    </item>
    <item>
      <g:gender>Kadın</g:gender>
      <g:title>Silk Scarf</g:title>
      <g:link>https://example.com/p/2</g:link>
      <g:price>50 TRY</g:price>
      <g:description>Light &amp; soft</g:description>
    </item>
    <item>
      <g:gender>çocuk</g:gender>
      <g:title>Tiny Hat</g:title>
      <g:link>https://example.com/p/3</g:link>
      <g:price>10 TRY</g:price>
      <g:description>Small</g:description>
    </item>
    <item>
      <g:gender>erkek</g:gender>
      <g:title></g:title>
      <g:link>https://example.com/p/4</g:link>
      <g:price>1 TRY</g:price>
      <g:description>No title, must be skipped</g:description>
    </item>
  </channel>
</rss>"#;

#[tokio::test]
async fn test_feed_export_buckets_and_files() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/feed.xml"))
        .respond_with(ResponseTemplate::new(200).set_body_string(FEED_XML))
        .mount(&server)
        .await;

    let dir = TempDir::new().unwrap();
    let out = dir.path().join("feed_out");
    let config = feed_config(
        &format!("{}/feed.xml", server.uri()),
        &out.to_string_lossy(),
    );

    let report = run_feed_export(&config).await.unwrap();

    assert_eq!(report.total_items, 4);
    assert_eq!(report.skipped, 1);
    assert_eq!(
        report.buckets,
        vec![
            ("women".to_string(), 1),
            ("men".to_string(), 1),
            ("unspecified".to_string(), 1),
        ]
    );
    assert_eq!(report.files.len(), 3);

    let men = std::fs::read(out.join("products_men.csv")).unwrap();
    assert_eq!(&men[..3], b"\xEF\xBB\xBF");
    let men = String::from_utf8(men[3..].to_vec()).unwrap();
    assert!(men.starts_with("Gender,Title,Link,Price,Description"));
    assert!(men.contains("erkek,Wool Coat,https://example.com/p/1,100 TRY,"));
    // Description cleaned: tags stripped, list items dash-separated
    assert!(men.contains("Warm Wool - Dry clean"));

    let unspecified = std::fs::read_to_string(out.join("products_unspecified.csv")).unwrap();
    assert!(unspecified.contains("Tiny Hat"));
}

#[tokio::test]
async fn test_empty_buckets_produce_no_file() {
    let server = MockServer::start().await;
    let only_men = r#"<rss xmlns:g="http://base.google.com/ns/1.0"><channel>
      <item>
        <g:gender>erkek</g:gender>
        <g:title>Coat</g:title>
        <g:link>https://example.com/p/1</g:link>
        <g:price>1 TRY</g:price>
        <g:description>x</g:description>
      </item>
    </channel></rss>"#;
    Mock::given(method("GET"))
        .and(path("/feed.xml"))
        .respond_with(ResponseTemplate::new(200).set_body_string(only_men))
        .mount(&server)
        .await;

    let dir = TempDir::new().unwrap();
    let out = dir.path().join("feed_out");
    let config = feed_config(
        &format!("{}/feed.xml", server.uri()),
        &out.to_string_lossy(),
    );

    let report = run_feed_export(&config).await.unwrap();
    assert_eq!(report.files.len(), 1);
    assert!(out.join("products_men.csv").exists());
    assert!(!out.join("products_women.csv").exists());
    assert!(!out.join("products_unspecified.csv").exists());
}

#[tokio::test]
async fn test_unavailable_feed_is_an_error() {
    let dir = TempDir::new().unwrap();
    let config = feed_config(
        "http://127.0.0.1:1/feed.xml",
        &dir.path().join("out").to_string_lossy(),
    );

    let result = run_feed_export(&config).await;
    assert!(result.is_err());
}

#[tokio::test]
async fn test_feed_not_configured_is_an_error() {
    let dir = TempDir::new().unwrap();
    let mut config = feed_config(
        "http://127.0.0.1:1/feed.xml",
        &dir.path().join("out").to_string_lossy(),
    );
    config.feed = None;

    let result = run_feed_export(&config).await;
    assert!(result.is_err());
}
