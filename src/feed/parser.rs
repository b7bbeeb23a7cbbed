//! Product feed XML parsing
//!
//! Parses Google-Shopping-style feeds with a namespace-aware reader. Item
//! fields live in the `http://base.google.com/ns/1.0` namespace; the plain
//! RSS `<title>`/`<link>` siblings inside an item are ignored so the two
//! never collide.

use quick_xml::events::Event;
use quick_xml::name::{Namespace, ResolveResult};
use quick_xml::NsReader;

const GOOGLE_NS: &[u8] = b"http://base.google.com/ns/1.0";

/// A raw product record as it appears in the feed (uncleaned)
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FeedItem {
    pub gender: String,
    pub title: String,
    pub link: String,
    pub price: String,
    pub description: String,
}

#[derive(Debug, Clone, Copy)]
enum Field {
    Gender,
    Title,
    Link,
    Price,
    Description,
}

impl Field {
    fn from_local_name(name: &[u8]) -> Option<Self> {
        match name {
            b"gender" => Some(Field::Gender),
            b"title" => Some(Field::Title),
            b"link" => Some(Field::Link),
            b"price" => Some(Field::Price),
            b"description" => Some(Field::Description),
            _ => None,
        }
    }
}

/// Parses feed XML into raw product records
///
/// Items missing both structure and namespace are simply skipped; a reader
/// error aborts the parse.
pub fn parse_feed(xml: &str) -> Result<Vec<FeedItem>, String> {
    let mut reader = NsReader::from_str(xml);
    reader.trim_text(true);

    let mut items = Vec::new();
    let mut current: Option<FeedItem> = None;
    let mut field: Option<Field> = None;

    loop {
        match reader.read_resolved_event() {
            Ok((resolve, Event::Start(e))) => {
                let local = e.local_name();
                if local.as_ref() == b"item" {
                    current = Some(FeedItem::default());
                    field = None;
                } else if current.is_some() {
                    field = match resolve {
                        ResolveResult::Bound(ns) if ns == Namespace(GOOGLE_NS) => {
                            Field::from_local_name(local.as_ref())
                        }
                        _ => None,
                    };
                }
            }
            Ok((_, Event::End(e))) => {
                if e.local_name().as_ref() == b"item" {
                    if let Some(item) = current.take() {
                        items.push(item);
                    }
                } else {
                    field = None;
                }
            }
            Ok((_, Event::Text(t))) => {
                if let (Some(item), Some(field)) = (current.as_mut(), field) {
                    let text = t.unescape().map_err(|e| e.to_string())?;
                    push_text(item, field, &text);
                }
            }
            Ok((_, Event::CData(t))) => {
                if let (Some(item), Some(field)) = (current.as_mut(), field) {
                    let text = String::from_utf8_lossy(&t);
                    push_text(item, field, &text);
                }
            }
            Ok((_, Event::Eof)) => break,
            Ok(_) => {}
            Err(e) => return Err(e.to_string()),
        }
    }

    Ok(items)
}

fn push_text(item: &mut FeedItem, field: Field, text: &str) {
    let target = match field {
        Field::Gender => &mut item.gender,
        Field::Title => &mut item.title,
        Field::Link => &mut item.link,
        Field::Price => &mut item.price,
        Field::Description => &mut item.description,
    };
    target.push_str(text);
}

#[cfg(test)]
mod tests {
    use super::*;

    const FEED: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<rss version="2.0" xmlns:g="http://base.google.com/ns/1.0">
  <channel>
    <item>
      <title>RSS title, not the product title</title>
      <g:gender>erkek</g:gender>
      <g:title>Wool Coat</g:title>
      <g:link>https://example.com/p/1</g:link>
      <g:price>100 TRY</g:price>
      <g:description><![CDATA[<p>Warm</p><ul><li>Wool</li></ul>]]></g:description>
    </item>
    <item>
      <g:gender>women</g:gender>
      <g:title>Silk Scarf</g:title>
      <g:link>https://example.com/p/2</g:link>
      <g:price>50 TRY</g:price>
      <g:description>Light &amp; soft</g:description>
    </item>
  </channel>
</rss>"#;

    #[test]
    fn test_parses_namespaced_fields() {
        let items = parse_feed(FEED).unwrap();
        assert_eq!(items.len(), 2);

        assert_eq!(items[0].gender, "erkek");
        assert_eq!(items[0].title, "Wool Coat");
        assert_eq!(items[0].link, "https://example.com/p/1");
        assert_eq!(items[0].price, "100 TRY");
        assert_eq!(items[0].description, "<p>Warm</p><ul><li>Wool</li></ul>");

        assert_eq!(items[1].description, "Light & soft");
    }

    #[test]
    fn test_ignores_plain_rss_title() {
        let items = parse_feed(FEED).unwrap();
        assert_eq!(items[0].title, "Wool Coat");
    }

    #[test]
    fn test_empty_channel() {
        let items = parse_feed(r#"<rss xmlns:g="http://base.google.com/ns/1.0"><channel></channel></rss>"#)
            .unwrap();
        assert!(items.is_empty());
    }

    #[test]
    fn test_item_with_missing_fields_defaults_empty() {
        let xml = r#"<rss xmlns:g="http://base.google.com/ns/1.0"><channel>
          <item><g:title>Lonely</g:title></item>
        </channel></rss>"#;
        let items = parse_feed(xml).unwrap();
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].title, "Lonely");
        assert!(items[0].link.is_empty());
    }

    #[test]
    fn test_mismatched_tags_fail() {
        let result = parse_feed("<rss><channel><item></channel></rss>");
        assert!(result.is_err());
    }
}
