//! Source metadata extraction from the document `<head>`.
//!
//! The canonical link wins for both `url` and `canonical`; `og:url` is the
//! fallback. Meta description falls back to `og:description`. Absent values
//! stay empty strings.

use crate::block::Source;
use crate::dom::{self, Document};

/// Extract page metadata from the full (unpruned) document.
#[must_use]
pub fn extract_source(doc: &Document) -> Source {
    let mut source = Source::default();

    if let Some(title) = doc.select("title").nodes().first() {
        source.title = dom::collapsed_text(title);
    }

    for link in doc.select("link").nodes() {
        let rel = dom::attr(link, "rel").unwrap_or_default();
        let is_canonical = rel
            .split_whitespace()
            .any(|token| token.eq_ignore_ascii_case("canonical"));
        if is_canonical {
            if let Some(href) = dom::attr(link, "href") {
                if !href.is_empty() {
                    source.canonical = href.clone();
                    source.url = href;
                    break;
                }
            }
        }
    }

    if source.url.is_empty() {
        if let Some(url) = meta_content(doc, "property", "og:url") {
            source.url = url.clone();
            source.canonical = url;
        }
    }

    if let Some(description) = meta_content(doc, "name", "description") {
        source.meta_description = description;
    } else if let Some(description) = meta_content(doc, "property", "og:description") {
        source.meta_description = description;
    }

    source
}

/// First non-empty `content` of a `<meta>` whose `attr_name` equals `value`.
fn meta_content(doc: &Document, attr_name: &str, value: &str) -> Option<String> {
    for meta in doc.select("meta").nodes() {
        let matches = dom::attr(meta, attr_name)
            .is_some_and(|v| v.eq_ignore_ascii_case(value));
        if matches {
            if let Some(content) = dom::attr(meta, "content") {
                if !content.is_empty() {
                    return Some(content);
                }
            }
        }
    }
    None
}
