//! Visibility predicates and visible-text collection.
//!
//! "Hidden" means globally invisible: `aria-hidden` on a non-content node,
//! inline `display:none`/`visibility:hidden`, or a screen-reader-only class.
//! Breakpoint classes (`elementor-hidden-mobile` and friends) are viewport
//! choices, not global signals - an element carrying one skips every
//! class-based check (its own and its ancestors') unless
//! `drop_breakpoint_hidden` is set.

use crate::config::ExtractorConfig;
use crate::dom::{self, NodeRef, Selection};
use crate::patterns::{BREAKPOINT_HIDDEN_PREFIX, HIDDEN_CLASS_PATTERNS};

/// Check whether an element is visually hidden, consulting ancestors.
#[must_use]
pub fn is_visually_hidden(node: &NodeRef, config: &ExtractorConfig) -> bool {
    if !node.is_element() {
        return false;
    }

    if is_non_content_aria_hidden(node) {
        return true;
    }

    if let Some(style) = dom::attr(node, "style") {
        if style_hidden(&style) {
            return true;
        }
    }

    let class = dom::class_lower(node);
    if has_breakpoint_class(&class) {
        if config.drop_breakpoint_hidden {
            return true;
        }
        // Keep breakpoint-hidden content: only ancestor aria-hidden applies.
        return dom::element_ancestors(node)
            .iter()
            .any(is_non_content_aria_hidden);
    }

    if class_hidden(&class) {
        return true;
    }

    for ancestor in dom::element_ancestors(node) {
        let ancestor_class = dom::class_lower(&ancestor);
        if has_breakpoint_class(&ancestor_class) {
            if config.drop_breakpoint_hidden {
                return true;
            }
            if is_non_content_aria_hidden(&ancestor) {
                return true;
            }
            continue;
        }
        if class_hidden(&ancestor_class) {
            return true;
        }
        if is_non_content_aria_hidden(&ancestor) {
            return true;
        }
    }

    false
}

/// Hidden signals on the node itself, no ancestor walk. Used while
/// traversing top-down, where ancestor state is already accounted for.
#[must_use]
pub fn hidden_by_local_signals(node: &NodeRef, config: &ExtractorConfig) -> bool {
    if is_non_content_aria_hidden(node) {
        return true;
    }
    if let Some(style) = dom::attr(node, "style") {
        if style_hidden(&style) {
            return true;
        }
    }
    let class = dom::class_lower(node);
    if has_breakpoint_class(&class) {
        return config.drop_breakpoint_hidden;
    }
    class_hidden(&class)
}

/// Visible subtree text: descendant traversal that skips hidden subtrees,
/// joins text nodes with single spaces, and collapses whitespace runs.
/// Returns an empty string when the element itself is hidden.
#[must_use]
pub fn visible_text(node: &NodeRef, config: &ExtractorConfig) -> String {
    if !node.is_element() {
        return String::new();
    }
    if is_visually_hidden(node, config) {
        return String::new();
    }
    let mut parts: Vec<String> = Vec::new();
    collect_visible_text(node, config, &mut parts);
    dom::collapse_whitespace(&parts.join(" "))
}

fn collect_visible_text(node: &NodeRef, config: &ExtractorConfig, parts: &mut Vec<String>) {
    for child in node.children_it(false) {
        if child.is_text() {
            let text = child.text();
            let trimmed = text.trim();
            if !trimmed.is_empty() {
                parts.push(trimmed.to_string());
            }
        } else if child.is_element() {
            if hidden_by_local_signals(&child, config) {
                continue;
            }
            collect_visible_text(&child, config, parts);
        }
    }
}

/// `aria-hidden="true"` counts as hidden only for non-content nodes:
/// nothing block-level inside and fewer than 10 chars of text.
fn is_non_content_aria_hidden(node: &NodeRef) -> bool {
    if dom::attr(node, "aria-hidden").as_deref() != Some("true") {
        return false;
    }
    let has_content_tags = Selection::from(node.clone())
        .select("h1, h2, h3, h4, h5, h6, p, li, table")
        .length()
        > 0;
    if has_content_tags {
        return false;
    }
    dom::text_content(node).trim().chars().count() < 10
}

fn style_hidden(style: &str) -> bool {
    let style = style.to_lowercase();
    style.contains("display:none")
        || style.contains("display: none")
        || style.contains("visibility:hidden")
        || style.contains("visibility: hidden")
}

fn has_breakpoint_class(class_lower: &str) -> bool {
    class_lower.contains(BREAKPOINT_HIDDEN_PREFIX)
}

fn class_hidden(class_lower: &str) -> bool {
    HIDDEN_CLASS_PATTERNS
        .iter()
        .any(|pattern| class_lower.contains(pattern))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dom::Document;

    fn first<'a>(doc: &'a Document, sel: &str) -> NodeRef<'a> {
        doc.select(sel).nodes().first().cloned().unwrap()
    }

    #[test]
    fn inline_display_none_is_hidden() {
        let doc = Document::from(r#"<div style="display:none">x</div>"#);
        assert!(is_visually_hidden(
            &first(&doc, "div"),
            &ExtractorConfig::default()
        ));
    }

    #[test]
    fn sr_only_class_is_hidden() {
        let doc = Document::from(r#"<span class="sr-only">skip</span>"#);
        assert!(is_visually_hidden(
            &first(&doc, "span"),
            &ExtractorConfig::default()
        ));
    }

    #[test]
    fn hidden_class_inherited_from_ancestor() {
        let doc = Document::from(r#"<div class="screen-reader-text"><p>x</p></div>"#);
        assert!(is_visually_hidden(
            &first(&doc, "p"),
            &ExtractorConfig::default()
        ));
    }

    #[test]
    fn breakpoint_class_is_kept_by_default() {
        let doc =
            Document::from(r#"<div class="elementor-hidden-mobile"><p>mobile text</p></div>"#);
        let config = ExtractorConfig::default();
        assert!(!is_visually_hidden(&first(&doc, "div"), &config));
        assert!(!is_visually_hidden(&first(&doc, "p"), &config));
    }

    #[test]
    fn breakpoint_class_drops_when_configured() {
        let doc =
            Document::from(r#"<div class="elementor-hidden-desktop"><p>x</p></div>"#);
        let config = ExtractorConfig {
            drop_breakpoint_hidden: true,
            ..ExtractorConfig::default()
        };
        assert!(is_visually_hidden(&first(&doc, "div"), &config));
        assert!(is_visually_hidden(&first(&doc, "p"), &config));
    }

    #[test]
    fn aria_hidden_with_content_tags_is_not_hidden() {
        let doc = Document::from(
            r#"<div aria-hidden="true"><p>Real content paragraph that matters.</p></div>"#,
        );
        assert!(!is_visually_hidden(
            &first(&doc, "div"),
            &ExtractorConfig::default()
        ));
    }

    #[test]
    fn aria_hidden_decoration_is_hidden() {
        let doc = Document::from(r#"<span aria-hidden="true">→</span>"#);
        assert!(is_visually_hidden(
            &first(&doc, "span"),
            &ExtractorConfig::default()
        ));
    }

    #[test]
    fn visible_text_skips_hidden_subtrees() {
        let doc = Document::from(
            r#"<div>Shown <span class="sr-only">hidden helper</span> text</div>"#,
        );
        let text = visible_text(&first(&doc, "div"), &ExtractorConfig::default());
        assert_eq!(text, "Shown text");
    }

    #[test]
    fn visible_text_collapses_whitespace() {
        let doc = Document::from("<div>  a\n   b  <b> c </b></div>");
        let text = visible_text(&first(&doc, "div"), &ExtractorConfig::default());
        assert_eq!(text, "a b c");
    }
}
