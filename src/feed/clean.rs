//! Text cleanup for feed fields
//!
//! The upstream feed double-encodes Turkish characters with entity names the
//! standard table resolves differently (or not at all), so those are fixed up
//! before the general entity decode. Descriptions additionally carry a small,
//! fixed set of inline tags that get stripped.

/// Entity names the feed uses for Turkish characters. `&yacute;`/`&sect;`
/// would otherwise decode to the wrong glyph; `&gbreve;` is not a standard
/// entity at all.
const LEGACY_ENTITIES: &[(&str, &str)] = &[
    ("&yacute;", "ı"),
    ("&Yacute;", "İ"),
    ("&sect;", "ş"),
    ("&Sect;", "Ş"),
    ("&gbreve;", "ğ"),
    ("&Gbreve;", "Ğ"),
];

/// Decodes HTML entities, applying the feed's legacy fixups first
pub fn decode_entities(text: &str) -> String {
    let mut text = text.to_string();
    for (entity, replacement) in LEGACY_ENTITIES {
        text = text.replace(entity, replacement);
    }
    html_escape::decode_html_entities(&text).trim().to_string()
}

/// Cleans a product description: decodes entities, strips the feed's inline
/// tag set, and normalizes the `-`-separated list items
pub fn clean_description(desc: &str) -> String {
    let desc = decode_entities(desc);

    let desc = desc
        .replace("<ul>", "")
        .replace("</ul>", "")
        .replace("<li>", "")
        .replace("</li>", "-")
        .replace("<br />", " ")
        .replace("<p>", "")
        .replace("</p>", " ")
        .replace("<strong>", "")
        .replace("</strong>", "")
        .replace("<span>", "")
        .replace("</span>", "");

    desc.split('-')
        .map(str::trim)
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>()
        .join(" - ")
}
