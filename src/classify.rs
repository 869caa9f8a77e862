//! Classification predicates: navigation links, button-like CTAs, nav
//! containers, blog-post pages and blog-feed sections, FAQ-shaped titles.
//!
//! These are heuristics over real-world CMS markup; each one fails closed
//! (returns false) rather than guessing on odd input.

use std::collections::HashSet;

use crate::config::ExtractorConfig;
use crate::dom::{self, NodeRef, Selection};
use crate::patterns::{
    API_ENDPOINT_HREF, BLOG_HEADING_KEYWORDS, BLOG_LINK_PATTERNS, BLOG_POST_URL,
    BUTTON_CLASS_PATTERNS, CONTACT_HREF_PATTERNS, FAQ_QUESTION, INTERNAL_SENTENCE_PUNCT,
    LOCATION_LINK_TEXT, MONTH_NAME_DATE, NAV_CLASS_PATTERNS, NAV_LINK_TEXT, NUMERIC_DATE,
    YEAR_PATH_SEGMENT,
};
use crate::visibility::{is_visually_hidden, visible_text};

/// `<nav>` or `role="navigation"`.
#[must_use]
pub fn is_nav_container(node: &NodeRef) -> bool {
    dom::tag_name(node) == "nav" || dom::role(node) == "navigation"
}

/// Whether the page URL identifies a blog post (`/YYYY/MM/DD/`, `/blog/`,
/// `/posts/`). The URL is the best signal; content heuristics are too noisy.
#[must_use]
pub fn is_blog_post_url(url: &str) -> bool {
    BLOG_POST_URL.is_match(&url.to_lowercase())
}

/// Question-shaped accordion titles become FAQs.
#[must_use]
pub fn looks_like_faq_question(text: &str) -> bool {
    FAQ_QUESTION.is_match(&text.to_lowercase())
}

/// Check if a link is a navigation link (not a CTA).
#[must_use]
pub fn is_navigation_link(node: &NodeRef, config: &ExtractorConfig) -> bool {
    if dom::tag_name(node) != "a" {
        return false;
    }

    // The nearest list ancestor decides: links in a ul/ol are navigation
    // unless the list is a button group.
    for ancestor in dom::element_ancestors(node) {
        let name = dom::tag_name(&ancestor);
        if name == "ul" || name == "ol" {
            let ancestor_class = dom::class_lower(&ancestor);
            return !(ancestor_class.contains("button") || ancestor_class.contains("btn-group"));
        }
    }

    let text = visible_text(node, config);
    if NAV_LINK_TEXT.is_match(&text.to_lowercase()) {
        return true;
    }

    if LOCATION_LINK_TEXT.is_match(&text) {
        return true;
    }

    // Many similar-shaped sibling links read as a navigation cluster.
    if let Some(parent) = node.parent() {
        let anchor_siblings: Vec<NodeRef> = dom::element_children(&parent)
            .into_iter()
            .filter(|sibling| dom::tag_name(sibling) == "a")
            .collect();
        if anchor_siblings.len() > 3 {
            let text_len = text.chars().count();
            let mut similar = 0;
            for sibling in &anchor_siblings {
                let sibling_text = visible_text(sibling, config);
                if LOCATION_LINK_TEXT.is_match(&sibling_text) {
                    similar += 1;
                } else {
                    let sibling_len = sibling_text.chars().count();
                    if sibling_len > 0 && sibling_len.abs_diff(text_len) < 5 {
                        similar += 1;
                    }
                }
            }
            if similar >= 3 {
                return true;
            }
        }
    }

    let class = dom::class_lower(node);
    NAV_CLASS_PATTERNS
        .iter()
        .any(|pattern| class.contains(pattern))
}

/// Strict CTA detection: `<button>` (except submit/reset), `role="button"`,
/// or an `<a>` with explicit button styling or action attributes.
#[must_use]
pub fn is_button_like(node: &NodeRef, config: &ExtractorConfig) -> bool {
    if !node.is_element() {
        return false;
    }
    if is_visually_hidden(node, config) {
        return false;
    }

    let tag = dom::tag_name(node);
    let href_lower = dom::attr(node, "href").map(|h| h.to_lowercase());

    let inside_form = dom::element_ancestors(node)
        .iter()
        .any(|ancestor| dom::tag_name(ancestor) == "form");
    if inside_form {
        match (tag.as_str(), &href_lower) {
            // Contact/quote routing links stay CTAs even near a form.
            ("a", Some(href)) => {
                let routes_to_contact = CONTACT_HREF_PATTERNS
                    .iter()
                    .any(|pattern| href.contains(pattern));
                if !routes_to_contact {
                    return false;
                }
            }
            ("button", _) => {
                let button_type = dom::attr(node, "type").unwrap_or_default().to_lowercase();
                if button_type == "submit" || button_type == "reset" {
                    return false;
                }
            }
            _ => return false,
        }
    }

    // Review-widget API endpoints are never CTAs, role="button" or not.
    if tag == "a" {
        if let Some(href) = &href_lower {
            if API_ENDPOINT_HREF.is_match(href) {
                return false;
            }
        }
    }

    if tag == "button" {
        let button_type = dom::attr(node, "type").unwrap_or_default().to_lowercase();
        return !(button_type == "submit" || button_type == "reset");
    }

    if dom::role(node) == "button" {
        return true;
    }

    if tag == "a" {
        if is_navigation_link(node, config) {
            return false;
        }

        let text = visible_text(node, config);
        if text.chars().count() > 60 {
            return false;
        }
        if INTERNAL_SENTENCE_PUNCT.is_match(&text) {
            return false;
        }

        // A link wrapping paragraphs or headings is a card, not a button.
        let wraps_blocks = Selection::from(node.clone())
            .select("p, h1, h2, h3, h4, h5, h6")
            .length()
            > 0;
        if wraps_blocks {
            return false;
        }

        let class = dom::class_lower(node);
        let has_button_class = BUTTON_CLASS_PATTERNS
            .iter()
            .any(|pattern| class.contains(pattern));
        let has_action_attr =
            dom::attr(node, "data-action").is_some() || dom::attr(node, "data-cta").is_some();
        return has_button_class || has_action_attr;
    }

    false
}

/// Detect blog feed sections: containers that enumerate post cards. Needs
/// two independent indicators so a single stray date or heading keyword
/// does not drop real content.
#[must_use]
pub fn is_blog_feed_section(node: &NodeRef, config: &ExtractorConfig) -> bool {
    let tag = dom::tag_name(node);
    if tag != "div" && tag != "section" && tag != "article" {
        return false;
    }

    let mut indicators = 0;

    // Indicator 1: a heading with blog-feed keywords.
    let headings = Selection::from(node.clone()).select("h1, h2, h3, h4, h5, h6");
    for heading in headings.nodes() {
        let text = visible_text(heading, config).to_lowercase();
        if BLOG_HEADING_KEYWORDS
            .iter()
            .any(|keyword| text.contains(keyword))
        {
            indicators += 1;
            break;
        }
    }

    // Indicator 2: repeated date-like strings across the first children.
    let children = dom::element_children(node);
    let mut date_count = 0;
    for child in children.iter().take(10) {
        let text = visible_text(child, config);
        if MONTH_NAME_DATE.is_match(&text) || NUMERIC_DATE.is_match(&text) {
            date_count += 1;
        }
    }
    if date_count >= 2 {
        indicators += 1;
    }

    // Indicator 3: links into blog/news archive URL shapes.
    let links = Selection::from(node.clone()).select("a");
    let mut blog_link_count = 0;
    for link in links.nodes().iter().take(10) {
        let href = dom::attr(link, "href").unwrap_or_default().to_lowercase();
        let is_archive_link = BLOG_LINK_PATTERNS
            .iter()
            .any(|pattern| href.contains(pattern))
            || YEAR_PATH_SEGMENT.is_match(&href);
        if is_archive_link {
            blog_link_count += 1;
        }
    }
    if blog_link_count >= 2 {
        indicators += 1;
    }

    // Indicator 4: a feed/grid of structurally identical cards.
    if children.len() >= 3 {
        let first_five: Vec<&NodeRef> = children.iter().take(5).collect();
        let tags: HashSet<String> = first_five.iter().map(|c| dom::tag_name(c)).collect();
        if tags.len() == 1 {
            let class_shapes: HashSet<Vec<String>> = first_five
                .iter()
                .map(|c| {
                    let mut tokens = dom::class_tokens(c);
                    tokens.sort();
                    tokens
                })
                .collect();
            if class_shapes.len() <= 2 {
                indicators += 1;
            }
        }
    }

    indicators >= 2
}
