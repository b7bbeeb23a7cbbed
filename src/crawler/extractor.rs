//! Content extraction from fetched HTML
//!
//! Locates the configured content container in a page and flattens its
//! paragraph and heading children into a (title, body) pair. Extraction is
//! pure: no network I/O, and no error ever escapes — anything that prevents
//! extraction degrades to `None`, which the coordinator records as an
//! unsuccessful page.

use crate::config::ExtractorConfig;
use scraper::{ElementRef, Html, Selector};

/// A successfully extracted page
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractedContent {
    /// Page title; never empty (placeholder when the container has no heading)
    pub title: String,

    /// Flattened body text; never empty
    pub body: String,

    /// The page URL this content came from
    pub source_url: String,
}

/// Placeholder used when the container has no title heading
pub const UNTITLED: &str = "(no title)";

/// Extracts the content region from a page
///
/// Returns `None` when the container is missing, when the flattened body is
/// empty after filtering, or when a configured selector cannot be parsed.
///
/// # Arguments
///
/// * `html` - The raw page HTML
/// * `source_url` - The URL the HTML came from (carried into the result)
/// * `config` - Extraction selectors and formatting
pub fn extract(html: &str, source_url: &str, config: &ExtractorConfig) -> Option<ExtractedContent> {
    let document = Html::parse_document(html);

    let container = find_container(&document, config)?;

    let title = extract_title(container, config);
    let body = extract_body(container, config);

    if body.is_empty() {
        tracing::warn!("Content region is empty after filtering: {}", source_url);
        return None;
    }

    Some(ExtractedContent {
        title,
        body,
        source_url: source_url.to_string(),
    })
}

/// Finds the content container, trying the primary class then the fallback
fn find_container<'a>(document: &'a Html, config: &ExtractorConfig) -> Option<ElementRef<'a>> {
    if let Some(element) = select_first(document, &config.content_class) {
        return Some(element);
    }

    if let Some(fallback) = &config.fallback_class {
        if let Some(element) = select_first(document, fallback) {
            return Some(element);
        }
    }

    None
}

fn select_first<'a>(document: &'a Html, class: &str) -> Option<ElementRef<'a>> {
    let selector = Selector::parse(&format!(".{}", class)).ok()?;
    document.select(&selector).next()
}

/// Extracts the title from the first configured heading inside the container
fn extract_title(container: ElementRef<'_>, config: &ExtractorConfig) -> String {
    let Ok(selector) = Selector::parse(&config.title_heading) else {
        return UNTITLED.to_string();
    };

    container
        .select(&selector)
        .map(|element| collect_text(element))
        .find(|text| !text.is_empty())
        .unwrap_or_else(|| UNTITLED.to_string())
}

/// Flattens the container's paragraph and heading descendants into the body
///
/// Headings are wrapped with the configured marker so section boundaries stay
/// visible in the flattened text; empty fragments are skipped; fragments are
/// joined with a blank line.
fn extract_body(container: ElementRef<'_>, config: &ExtractorConfig) -> String {
    let Ok(selector) = Selector::parse(&config.body_tags.join(", ")) else {
        return String::new();
    };

    let marker = &config.heading_marker;
    let mut fragments = Vec::new();

    for element in container.select(&selector) {
        let text = collect_text(element);
        if text.is_empty() {
            continue;
        }

        if is_heading_tag(element.value().name()) {
            fragments.push(format!("{} {} {}", marker, text, marker));
        } else {
            fragments.push(text);
        }
    }

    fragments.join("\n\n")
}

fn collect_text(element: ElementRef<'_>) -> String {
    element.text().collect::<String>().trim().to_string()
}

fn is_heading_tag(name: &str) -> bool {
    match name.strip_prefix('h') {
        Some(rest) => !rest.is_empty() && rest.chars().all(|c| c.is_ascii_digit()),
        None => false,
    }
}
