//! Compiled regex patterns and class-pattern inventories.
//!
//! All patterns are compiled once at startup using `LazyLock` for efficiency.
//! Patterns are organized by their purpose in the extraction pipeline.

#![allow(clippy::expect_used)]

use std::sync::LazyLock;

use regex::Regex;

// =============================================================================
// Visibility Patterns
// =============================================================================

/// Class substrings that mark true screen-reader-only content.
///
/// CAUTION: the generic `hidden` substring matches broader class names than
/// intended (e.g. `overflow-hidden`). Kept for parity with real-world CMS
/// output where those classes overwhelmingly mark invisible nodes; breakpoint
/// classes (`elementor-hidden-*`) are excluded separately before this list is
/// consulted.
pub const HIDDEN_CLASS_PATTERNS: &[&str] = &[
    "sr-only",
    "screen-reader-text",
    "visually-hidden",
    "hidden",
    "elementor-screen-only",
    "visuallyhidden",
    "sr-only-text",
    "a11y-hidden",
    "skip-link",
    "screen-reader",
];

/// Elementor breakpoint-specific hidden classes share this prefix. They are
/// viewport-specific, not globally hidden, and are only treated as hidden
/// when `drop_breakpoint_hidden` is enabled.
pub const BREAKPOINT_HIDDEN_PREFIX: &str = "elementor-hidden-";

// =============================================================================
// CTA / Navigation Patterns
// =============================================================================

/// Button-like class substrings for strict CTA detection.
pub const BUTTON_CLASS_PATTERNS: &[&str] = &[
    "button",
    "btn",
    "elementor-button",
    "wp-block-button__link",
    "wp-element-button",
    "cta",
    "call-to-action",
];

/// Navigation-related class substrings that disqualify a link as a CTA.
pub const NAV_CLASS_PATTERNS: &[&str] = &[
    "nav",
    "navigation",
    "menu",
    "link-list",
    "location",
    "city",
    "blog-link",
];

/// Link texts that read as navigation rather than calls to action.
pub static NAV_LINK_TEXT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(read more|read full|\d{1,2}[/-]\d{1,2}[/-]\d{2,4}|page \d+|next|previous|prev)")
        .expect("NAV_LINK_TEXT regex")
});

/// `City, ST` / `City, State` link texts (location navigation).
/// ASCII-only by design; CMS location widgets emit ASCII city names.
pub static LOCATION_LINK_TEXT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[A-Z][a-z]+(?: [A-Z][a-z]+)?,\s*(?:[A-Z]{2}|[A-Z][a-z]+)$")
        .expect("LOCATION_LINK_TEXT regex")
});

/// API endpoints that must never surface as CTAs (review widgets etc.).
pub static API_ENDPOINT_HREF: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"trustindex\.io/api/|/api/|api\.").expect("API_ENDPOINT_HREF regex")
});

/// Contact-routing hrefs allowed as CTAs even inside a form.
pub const CONTACT_HREF_PATTERNS: &[&str] = &["/contact", "/quote", "tel:", "mailto:"];

/// Sentence-ending punctuation in the middle of a text (full-sentence link).
pub static INTERNAL_SENTENCE_PUNCT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[.!?].+[.!?]").expect("INTERNAL_SENTENCE_PUNCT regex"));

// =============================================================================
// Paragraph Filtering Patterns
// =============================================================================

/// Texts that look like image alt text or accessibility helper text.
pub static ALT_TEXT_LIKE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)^(image of|picture of|photo of|illustration of|graphic showing|icon for|logo for|trusted.*in.*area$|click to|link to)",
    )
    .expect("ALT_TEXT_LIKE regex")
});

/// Any sentence punctuation at all.
pub static SENTENCE_PUNCT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[.!?]").expect("SENTENCE_PUNCT regex"));

/// Punctuation followed by more text, i.e. not merely trailing.
pub static INTERNAL_PUNCT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[.!?].").expect("INTERNAL_PUNCT regex"));

/// At least one ASCII letter.
pub static HAS_LETTERS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[a-zA-Z]").expect("HAS_LETTERS regex"));

/// At least one digit.
pub static HAS_DIGITS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\d").expect("HAS_DIGITS regex"));

// =============================================================================
// Counter Widget Patterns
// =============================================================================

/// Value token at the start of a text: digits with separators, optional `+`.
pub static COUNTER_VALUE_PREFIX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[\d,.]+\s*\+?").expect("COUNTER_VALUE_PREFIX regex"));

/// A whole text that is nothing but a value token.
pub static COUNTER_VALUE_EXACT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[\d,.]+\s*\+?$").expect("COUNTER_VALUE_EXACT regex"));

/// `<value> <label>` in a single text run.
pub static COUNTER_VALUE_LABEL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^([\d,.]+\s*\+?)\s+(.+)$").expect("COUNTER_VALUE_LABEL regex"));

/// Dedicated counter value classes (Elementor and friends).
pub static COUNTER_NUMBER_CLASS: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)counter-number|elementor-counter-number").expect("COUNTER_NUMBER_CLASS regex")
});

/// Dedicated counter label classes.
pub static COUNTER_TITLE_CLASS: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)counter-title|elementor-counter-title").expect("COUNTER_TITLE_CLASS regex")
});

/// Generic numeric value classes.
pub static GENERIC_NUMBER_CLASS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)number|count|value|stat").expect("GENERIC_NUMBER_CLASS regex"));

/// Generic label classes.
pub static GENERIC_TITLE_CLASS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)title|label|name|text").expect("GENERIC_TITLE_CLASS regex"));

// =============================================================================
// Icon Removal Patterns
// =============================================================================

/// Elementor list item icon wrapper.
pub static ICON_LIST_ICON_CLASS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)elementor-icon-list-icon").expect("ICON_LIST_ICON_CLASS regex"));

/// Bare `elementor-icon` class token (not `elementor-icon-wrapper` etc.).
pub static ELEMENTOR_ICON_CLASS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)elementor-icon$").expect("ELEMENTOR_ICON_CLASS regex"));

// =============================================================================
// Blog Detection Patterns
// =============================================================================

/// Blog-post URL shapes: `/YYYY/MM/DD/`, `/blog/`, `/posts/`.
pub static BLOG_POST_URL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"/\d{4}/\d{2}/\d{2}/|/blog/|/posts/").expect("BLOG_POST_URL regex")
});

/// Month-name dates as they appear in feed cards.
pub static MONTH_NAME_DATE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)\b(January|February|March|April|May|June|July|August|September|October|November|December)\s+\d{1,2},?\s+\d{4}\b",
    )
    .expect("MONTH_NAME_DATE regex")
});

/// Numeric dates (`2024-06-03`, `2024/6/3`).
pub static NUMERIC_DATE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\d{4}[/-]\d{1,2}[/-]\d{1,2}").expect("NUMERIC_DATE regex"));

/// Year path segment in post permalinks (`/2024/`).
pub static YEAR_PATH_SEGMENT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"/\d{4}/").expect("YEAR_PATH_SEGMENT regex"));

/// Href substrings that mark links into a blog/news archive.
pub const BLOG_LINK_PATTERNS: &[&str] = &["/blog/", "/post/", "/article/", "/news/"];

/// Keywords in section headings that mark a blog feed.
pub const BLOG_HEADING_KEYWORDS: &[&str] =
    &["blog", "latest posts", "news", "recent posts", "articles"];

// =============================================================================
// Composite / FAQ Patterns
// =============================================================================

/// Question-shaped titles: question word, trailing `?`, or an FAQ label.
pub static FAQ_QUESTION: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(what|who|where|when|why|how|can|do|does|is|are|will|would)\s+|\?$|^faq")
        .expect("FAQ_QUESTION regex")
});

/// Card/grid title classes for shape-based card detection.
pub static CARD_TITLE_CLASS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)title|card-title|heading").expect("CARD_TITLE_CLASS regex"));

/// Slider/carousel vocabulary that disqualifies grid detection.
pub const SLIDER_CLASS_PATTERNS: &[&str] =
    &["swiper", "carousel", "marquee", "ticker", "loop", "slider"];

/// Grid container class hints.
pub const GRID_CLASS_PATTERNS: &[&str] = &[
    "carousel",
    "swiper",
    "grid",
    "cards",
    "elementor-carousel",
    "elementor-widget-n-carousel",
];

/// Elementor text-editor widget classes that hold paragraph text on a div.
pub const TEXT_EDITOR_CLASS_PATTERNS: &[&str] =
    &["text-editor", "elementor-text-editor", "elementor-widget-text-editor"];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn nav_link_text_matches_pagination() {
        assert!(NAV_LINK_TEXT.is_match("read more about us"));
        assert!(NAV_LINK_TEXT.is_match("page 3"));
        assert!(NAV_LINK_TEXT.is_match("next"));
        assert!(!NAV_LINK_TEXT.is_match("get a free quote"));
    }

    #[test]
    fn location_link_text_matches_city_state() {
        assert!(LOCATION_LINK_TEXT.is_match("Dallas, TX"));
        assert!(LOCATION_LINK_TEXT.is_match("Fort Worth, Texas"));
        assert!(!LOCATION_LINK_TEXT.is_match("contact us today"));
    }

    #[test]
    fn counter_value_shapes() {
        assert!(COUNTER_VALUE_EXACT.is_match("1,500 +"));
        assert!(COUNTER_VALUE_EXACT.is_match("99.9"));
        assert!(!COUNTER_VALUE_EXACT.is_match("99% uptime"));
        let caps = COUNTER_VALUE_LABEL.captures("500+ Happy Clients").unwrap();
        assert_eq!(caps.get(1).map(|m| m.as_str().trim()), Some("500+"));
        assert_eq!(caps.get(2).map(|m| m.as_str()), Some("Happy Clients"));
    }

    #[test]
    fn alt_text_like_matches_helper_text() {
        assert!(ALT_TEXT_LIKE.is_match("Image of a technician"));
        assert!(ALT_TEXT_LIKE.is_match("click to enlarge"));
        assert!(!ALT_TEXT_LIKE.is_match("Our service covers the whole metro."));
    }

    #[test]
    fn faq_question_shapes() {
        assert!(FAQ_QUESTION.is_match("what areas do you serve"));
        assert!(FAQ_QUESTION.is_match("service pricing?"));
        assert!(FAQ_QUESTION.is_match("faq"));
        assert!(!FAQ_QUESTION.is_match("our guarantee"));
    }

    #[test]
    fn blog_post_url_shapes() {
        assert!(BLOG_POST_URL.is_match("https://x.com/2024/06/03/title/"));
        assert!(BLOG_POST_URL.is_match("https://x.com/blog/my-post"));
        assert!(!BLOG_POST_URL.is_match("https://x.com/services/"));
    }

    #[test]
    fn elementor_icon_matches_token_end_only() {
        assert!(ELEMENTOR_ICON_CLASS.is_match("elementor-icon"));
        assert!(!ELEMENTOR_ICON_CLASS.is_match("elementor-icon-wrapper"));
    }
}
