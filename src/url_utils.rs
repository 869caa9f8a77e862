//! URL utilities for CTA href resolution.

use url::Url;

/// Resolve a possibly-relative href against the page's canonical URL.
///
/// Absolute `http(s)` hrefs pass through. Scheme-carrying hrefs (`tel:`,
/// `mailto:`) survive the join unchanged. Without a usable canonical base
/// the href is returned as-is.
#[must_use]
pub fn resolve_href(href: &str, canonical: &str) -> String {
    if href.starts_with('/') || !href.starts_with("http") {
        if canonical.is_empty() {
            return href.to_string();
        }
        if let Ok(base) = Url::parse(canonical) {
            if let Ok(resolved) = base.join(href) {
                return resolved.to_string();
            }
        }
    }
    href.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn relative_path_resolves_against_canonical() {
        assert_eq!(
            resolve_href("/contact", "https://example.com/page/"),
            "https://example.com/contact"
        );
        assert_eq!(
            resolve_href("sibling", "https://example.com/dir/page"),
            "https://example.com/dir/sibling"
        );
    }

    #[test]
    fn absolute_href_passes_through() {
        assert_eq!(
            resolve_href("https://other.com/x", "https://example.com/"),
            "https://other.com/x"
        );
    }

    #[test]
    fn tel_and_mailto_survive() {
        assert_eq!(
            resolve_href("tel:+15551234567", "https://example.com/"),
            "tel:+15551234567"
        );
        assert_eq!(
            resolve_href("mailto:hi@example.com", "https://example.com/"),
            "mailto:hi@example.com"
        );
    }

    #[test]
    fn missing_canonical_keeps_href() {
        assert_eq!(resolve_href("/contact", ""), "/contact");
    }
}
