//! Tree pruning.
//!
//! One sweep removes script/style/media/form tags, chrome subtrees and
//! hidden subtrees. A second, surgical pass removes icon nodes only -
//! `<svg>`, icon-classed `<i>`, Elementor icon wrappers - so their parent
//! containers and the text around them survive.

use std::collections::HashSet;

use crate::config::ExtractorConfig;
use crate::dom::{self, NodeId, NodeRef};
use crate::patterns::{ELEMENTOR_ICON_CLASS, ICON_LIST_ICON_CLASS};
use crate::visibility::is_visually_hidden;

const TAGS_TO_REMOVE: &[&str] = &[
    "script", "style", "noscript", "meta", "link", "img", "picture", "source", "form", "input",
    "textarea", "select", "label", "option",
];

const CHROME_TAGS: &[&str] = &["header", "nav", "footer", "aside"];
const CHROME_ROLES: &[&str] = &["banner", "navigation", "contentinfo", "complementary"];

/// Prune unwanted subtrees under `root`, then surgically remove icons.
pub fn prune_tree(root: &NodeRef, config: &ExtractorConfig) {
    prune_subtrees(root, config);
    remove_icons_surgically(root);
}

fn prune_subtrees(root: &NodeRef, config: &ExtractorConfig) {
    // Iterative sweep; removal decisions are per-node, and removed subtrees
    // are never descended into.
    let mut stack: Vec<NodeRef> = vec![root.clone()];
    while let Some(elem) = stack.pop() {
        for child in dom::element_children(&elem) {
            if should_remove(&child, config) {
                dom::remove(&child);
            } else {
                stack.push(child);
            }
        }
    }
}

fn should_remove(node: &NodeRef, config: &ExtractorConfig) -> bool {
    let tag = dom::tag_name(node);
    if TAGS_TO_REMOVE.contains(&tag.as_str()) {
        return true;
    }
    if CHROME_TAGS.contains(&tag.as_str()) {
        return true;
    }
    if CHROME_ROLES.contains(&dom::role(node).as_str()) {
        return true;
    }
    is_visually_hidden(node, config)
}

/// Remove icon nodes only, preserving parent containers and their text.
fn remove_icons_surgically(root: &NodeRef) {
    let mut to_remove: Vec<NodeRef> = Vec::new();
    let mut seen: HashSet<NodeId> = HashSet::new();

    for node in root.descendants() {
        if !node.is_element() {
            continue;
        }
        let tag = dom::tag_name(&node);

        // SVGs are decorative here.
        if tag == "svg" {
            if seen.insert(node.id) {
                to_remove.push(node);
            }
            continue;
        }

        // <i> is an icon when classed as one or when it holds no real text.
        if tag == "i" {
            let class = dom::class_lower(&node);
            let text_len = dom::collapsed_text(&node).chars().count();
            if class.contains("icon") || class.contains("fa-") || text_len < 3 {
                if seen.insert(node.id) {
                    to_remove.push(node);
                }
                continue;
            }
        }

        // Elementor icon wrappers, but only when they are just an icon:
        // an inner SVG or next to no text.
        let is_icon_wrapper = dom::class_tokens(&node).iter().any(|token| {
            ICON_LIST_ICON_CLASS.is_match(token) || ELEMENTOR_ICON_CLASS.is_match(token)
        });
        if is_icon_wrapper {
            let has_svg = dom::has_descendant(&node, |d| dom::tag_name(d) == "svg");
            let text_len = dom::collapsed_text(&node).chars().count();
            if (has_svg || text_len < 10) && seen.insert(node.id) {
                to_remove.push(node);
            }
        }
    }

    for node in to_remove {
        dom::remove(&node);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dom::Document;

    fn prune(html: &str) -> Document {
        let doc = Document::from(html);
        let root = doc.select("body").nodes().first().cloned().unwrap();
        prune_tree(&root, &ExtractorConfig::default());
        doc
    }

    #[test]
    fn scripts_and_forms_are_removed() {
        let doc = prune(
            r#"<body><script>var x;</script><form><input></form><p>kept</p></body>"#,
        );
        assert!(doc.select("script").is_empty());
        assert!(doc.select("form").is_empty());
        assert_eq!(doc.select("p").text().to_string(), "kept");
    }

    #[test]
    fn chrome_subtrees_are_removed() {
        let doc = prune(
            r#"<body><header>H</header><nav>N</nav><main><p>M</p></main><footer>F</footer><div role="complementary">C</div></body>"#,
        );
        assert!(doc.select("header").is_empty());
        assert!(doc.select("nav").is_empty());
        assert!(doc.select("footer").is_empty());
        assert!(doc.select(r#"[role="complementary"]"#).is_empty());
        assert_eq!(doc.select("p").text().to_string(), "M");
    }

    #[test]
    fn hidden_subtrees_are_removed() {
        let doc = prune(
            r#"<body><div class="sr-only">invisible</div><div style="display:none">also</div><p>kept</p></body>"#,
        );
        assert!(!doc.select("body").text().contains("invisible"));
        assert!(!doc.select("body").text().contains("also"));
        assert!(doc.select("body").text().contains("kept"));
    }

    #[test]
    fn icons_are_removed_but_parents_survive() {
        let doc = prune(
            r#"<body><ul>
                <li><span class="elementor-icon-list-icon"><svg viewBox="0 0 10 10"></svg></span><span class="elementor-icon-list-text">Termite control</span></li>
                <li><i class="fa-solid fa-check"></i> Rodent removal</li>
            </ul></body>"#,
        );
        let text = doc.select("ul").text().to_string();
        assert!(text.contains("Termite control"));
        assert!(text.contains("Rodent removal"));
        assert!(doc.select("svg").is_empty());
        assert!(doc.select("i").is_empty());
    }

    #[test]
    fn meaningful_i_element_survives() {
        let doc = prune("<body><p>This is <i>emphasized text</i> inline.</p></body>");
        assert!(doc.select("body").text().contains("emphasized text"));
    }

    #[test]
    fn breakpoint_hidden_kept_by_default() {
        let doc = prune(
            r#"<body><div class="elementor-hidden-mobile"><p>tablet copy</p></div></body>"#,
        );
        assert!(doc.select("body").text().contains("tablet copy"));
    }
}
