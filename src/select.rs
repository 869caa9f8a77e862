//! Main-content selection.
//!
//! Semantic tags win: the first `<main>` or `[role="main"]` is the content
//! root. Otherwise every non-chrome `main|article|section|div` under
//! `<body>` is scored by text density (visible text length over serialized
//! length, with a 1.2 boost for generic containers) and the best candidate
//! wins. If the page's H1 lives outside the winner, the winner is widened
//! to the nearest non-chrome ancestor containing it. `<body>` is the last
//! resort.

use log::debug;

use crate::config::ExtractorConfig;
use crate::dom::{self, Document, NodeRef};
use crate::visibility::visible_text;

const CHROME_TAGS: &[&str] = &["header", "nav", "footer", "aside"];
const CHROME_ROLES: &[&str] = &["banner", "navigation", "contentinfo", "complementary"];
const CANDIDATE_TAGS: &[&str] = &["main", "article", "section", "div"];

/// Locate the element whose subtree should be extracted.
#[must_use]
pub fn find_main_content<'a>(
    doc: &'a Document,
    config: &ExtractorConfig,
) -> Option<NodeRef<'a>> {
    if let Some(main) = doc.select("main").nodes().first() {
        return Some(main.clone());
    }
    if let Some(main) = doc.select(r#"[role="main"]"#).nodes().first() {
        return Some(main.clone());
    }

    let body = doc.select("body").nodes().first().cloned()?;

    let mut best: Option<(f64, NodeRef)> = None;
    for node in body.descendants() {
        if !node.is_element() {
            continue;
        }
        let tag = dom::tag_name(&node);
        if !CANDIDATE_TAGS.contains(&tag.as_str()) {
            continue;
        }
        if inside_chrome(&node) {
            continue;
        }
        let score = text_density_score(&node, &tag, config);
        if score <= 0.0 {
            continue;
        }
        // Strictly-greater keeps the earliest candidate on ties, preserving
        // document order.
        match &best {
            Some((best_score, _)) if score <= *best_score => {}
            _ => best = Some((score, node)),
        }
    }

    let Some((score, mut candidate)) = best else {
        return Some(body);
    };
    debug!(
        "main content candidate <{}> scored {score:.4}",
        dom::tag_name(&candidate)
    );

    // Widen to cover the page's H1 when the best candidate missed it.
    if let Some(h1) = first_eligible_h1(doc) {
        let covers_h1 = candidate.id == h1.id || dom::is_descendant_of(&h1, &candidate);
        if !covers_h1 {
            let mut node = Some(candidate.clone());
            while let Some(current) = node {
                if dom::tag_name(&current) == "body" || !current.is_element() {
                    break;
                }
                if dom::is_descendant_of(&h1, &current) && !is_chrome(&current)
                    && !inside_chrome(&current)
                {
                    candidate = current;
                    break;
                }
                node = current.parent();
            }
        }
    }

    Some(candidate)
}

fn is_chrome(node: &NodeRef) -> bool {
    CHROME_TAGS.contains(&dom::tag_name(node).as_str())
        || CHROME_ROLES.contains(&dom::role(node).as_str())
}

fn inside_chrome(node: &NodeRef) -> bool {
    dom::element_ancestors(node).iter().any(is_chrome)
}

fn first_eligible_h1<'a>(doc: &'a Document) -> Option<NodeRef<'a>> {
    doc.select("h1")
        .nodes()
        .iter()
        .find(|h1| !is_chrome(h1) && !inside_chrome(h1))
        .cloned()
}

fn text_density_score(node: &NodeRef, tag: &str, config: &ExtractorConfig) -> f64 {
    if is_chrome(node) {
        return 0.0;
    }
    let text_length = visible_text(node, config).trim().chars().count();
    if text_length == 0 {
        return 0.0;
    }
    let html_length = dom::outer_html(node).len();
    if html_length == 0 {
        return 0.0;
    }
    let mut density = text_length as f64 / html_length as f64;
    if matches!(tag, "article" | "section" | "div") {
        density *= 1.2;
    }
    density
}
