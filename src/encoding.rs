//! Character encoding handling for the bytes entry points.
//!
//! Pages still ship in windows-1252 and friends often enough that assuming
//! UTF-8 mangles them. Rather than special-casing the two `<meta>` charset
//! spellings, every meta tag in the leading window is scanned for a
//! `charset=` token and the first label `encoding_rs` recognizes wins; a
//! BOM, when present, overrides the declaration during decode. Invalid
//! sequences are replaced, never fatal.

use std::borrow::Cow;
use std::sync::LazyLock;

use encoding_rs::{Encoding, UTF_8};
use regex::Regex;

#[allow(clippy::expect_used)]
static META_TAG: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)<meta[^>]*>").expect("META_TAG regex"));

/// `charset=label` inside a meta tag, covering both `<meta charset=...>`
/// and `<meta http-equiv=... content="...; charset=...">`.
#[allow(clippy::expect_used)]
static CHARSET_TOKEN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?i)charset\s*=\s*["']?([^"'\s;>]+)"#).expect("CHARSET_TOKEN regex")
});

/// Leading bytes scanned for meta tags; declarations past this point are
/// ignored, matching how browsers pre-scan.
const HEAD_WINDOW: usize = 2048;

/// Detect the document encoding from meta declarations, defaulting to
/// UTF-8 when nothing usable is declared.
#[must_use]
pub fn detect_encoding(html: &[u8]) -> &'static Encoding {
    let head: Cow<str> = String::from_utf8_lossy(&html[..html.len().min(HEAD_WINDOW)]);

    META_TAG
        .find_iter(&head)
        .filter_map(|tag| {
            let label = CHARSET_TOKEN.captures(tag.as_str())?.get(1)?;
            Encoding::for_label(label.as_str().trim().as_bytes())
        })
        .next()
        .unwrap_or(UTF_8)
}

/// Decode HTML bytes to a UTF-8 string. A BOM takes precedence over the
/// declared encoding; invalid sequences become replacement characters.
#[must_use]
pub fn transcode_to_utf8(html: &[u8]) -> String {
    let (text, _, _) = detect_encoding(html).decode(html);
    text.into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_to_utf8() {
        assert_eq!(detect_encoding(b"<html><body>x</body></html>"), UTF_8);
    }

    #[test]
    fn reads_meta_charset() {
        let html = br#"<html><head><meta charset="windows-1252"></head></html>"#;
        assert_eq!(detect_encoding(html).name(), "windows-1252");
    }

    #[test]
    fn reads_http_equiv_charset() {
        let html =
            br#"<meta http-equiv="Content-Type" content="text/html; charset=ISO-8859-1">"#;
        // WHATWG maps ISO-8859-1 onto windows-1252.
        assert_eq!(detect_encoding(html).name(), "windows-1252");
    }

    #[test]
    fn unquoted_charset_attribute_works() {
        let html = b"<meta charset=utf-8>";
        assert_eq!(detect_encoding(html), UTF_8);
    }

    #[test]
    fn unknown_label_falls_through_to_later_declarations() {
        let html = br#"<meta charset="no-such-charset"><meta charset="windows-1252">"#;
        assert_eq!(detect_encoding(html).name(), "windows-1252");
    }

    #[test]
    fn declarations_outside_the_window_are_ignored() {
        let mut html = Vec::new();
        html.extend_from_slice(b"<html><head>");
        html.resize(4096, b' ');
        html.extend_from_slice(b"<meta charset=\"windows-1252\"></head></html>");
        assert_eq!(detect_encoding(&html), UTF_8);
    }

    #[test]
    fn transcodes_legacy_bytes() {
        let html = b"<html><head><meta charset=\"ISO-8859-1\"></head><body>Caf\xE9</body></html>";
        assert!(transcode_to_utf8(html).contains("Caf\u{e9}"));
    }

    #[test]
    fn invalid_utf8_does_not_panic() {
        let html = b"<html><body>ok \xFF\xFE bytes</body></html>";
        let text = transcode_to_utf8(html);
        assert!(text.contains("ok"));
        assert!(text.contains("bytes"));
    }

    #[test]
    fn bom_overrides_declaration() {
        // UTF-8 BOM with a bogus legacy declaration still decodes as UTF-8.
        let mut html = Vec::from(&b"\xEF\xBB\xBF"[..]);
        html.extend_from_slice(b"<meta charset=\"windows-1252\"><body>caf\xC3\xA9</body>");
        assert!(transcode_to_utf8(&html).contains("caf\u{e9}"));
    }
}
