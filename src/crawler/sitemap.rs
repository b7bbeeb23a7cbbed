//! Sitemap resolver
//!
//! Fetches a sitemap document and yields the page URLs it references, in
//! document order. `loc` elements are matched by local name, so sitemaps
//! with or without the standard namespace declaration parse identically
//! (local-name matching was chosen over textual namespace stripping; the
//! event reader makes it the cheaper of the two).

use crate::crawler::fetcher::{fetch_url, FetchResult};
use quick_xml::events::Event;
use quick_xml::Reader;
use reqwest::Client;
use std::collections::HashSet;
use std::time::Duration;
use thiserror::Error;

/// Run-fatal sitemap failures
#[derive(Debug, Error)]
pub enum SitemapError {
    #[error("sitemap unavailable: {url}: {reason}")]
    Unavailable { url: String, reason: String },

    #[error("sitemap parse error: {url}: {message}")]
    Parse { url: String, message: String },
}

/// Fetches and parses a sitemap, returning page URLs in document order
///
/// Entries already present in `seen` are excluded, as are repeats within the
/// document itself (first occurrence wins). This dedup is advisory; the
/// coordinator remains the authority for avoiding duplicate dispatch.
///
/// # Arguments
///
/// * `client` - The HTTP client to use
/// * `sitemap_url` - The sitemap document URL
/// * `timeout` - Per-request timeout
/// * `seen` - URLs to exclude from the returned sequence
///
/// # Returns
///
/// * `Ok(urls)` - Parsed page URLs (possibly empty for a genuinely empty sitemap)
/// * `Err(SitemapError)` - Fetch or parse failure
pub async fn resolve(
    client: &Client,
    sitemap_url: &str,
    timeout: Duration,
    seen: &HashSet<String>,
) -> Result<Vec<String>, SitemapError> {
    tracing::info!("Resolving sitemap: {}", sitemap_url);

    let body = match fetch_url(client, sitemap_url, timeout).await {
        FetchResult::Success { body, .. } => body,
        failed => {
            return Err(SitemapError::Unavailable {
                url: sitemap_url.to_string(),
                reason: failed
                    .failure_reason()
                    .unwrap_or_else(|| "unknown".to_string()),
            })
        }
    };

    let locs = parse_sitemap(&body).map_err(|message| SitemapError::Parse {
        url: sitemap_url.to_string(),
        message,
    })?;

    let mut returned = HashSet::new();
    let urls: Vec<String> = locs
        .into_iter()
        .filter(|url| !seen.contains(url) && returned.insert(url.clone()))
        .collect();

    tracing::info!("Sitemap yielded {} unique URLs", urls.len());
    Ok(urls)
}

/// Parses sitemap XML, returning the text of every `loc` element in order
///
/// Returns `Err` with a message when the reader hits malformed XML or when
/// the document has no `urlset` root at all. A well-formed urlset with zero
/// entries parses to an empty list.
fn parse_sitemap(xml: &str) -> Result<Vec<String>, String> {
    let mut reader = Reader::from_str(xml);
    reader.trim_text(true);

    let mut locs = Vec::new();
    let mut in_loc = false;
    let mut saw_urlset = false;

    loop {
        match reader.read_event() {
            Ok(Event::Start(e)) => match e.local_name().as_ref() {
                b"urlset" | b"sitemapindex" => saw_urlset = true,
                b"loc" => in_loc = true,
                _ => {}
            },
            Ok(Event::End(e)) => {
                if e.local_name().as_ref() == b"loc" {
                    in_loc = false;
                }
            }
            Ok(Event::Text(t)) => {
                if in_loc {
                    let text = t.unescape().map_err(|e| e.to_string())?;
                    let text = text.trim();
                    if !text.is_empty() {
                        locs.push(text.to_string());
                    }
                }
            }
            Ok(Event::CData(t)) => {
                if in_loc {
                    let text = String::from_utf8_lossy(&t);
                    let text = text.trim();
                    if !text.is_empty() {
                        locs.push(text.to_string());
                    }
                }
            }
            Ok(Event::Eof) => break,
            Ok(_) => {}
            Err(e) => return Err(e.to_string()),
        }
    }

    if !saw_urlset {
        return Err("document has no urlset root".to_string());
    }

    Ok(locs)
}
