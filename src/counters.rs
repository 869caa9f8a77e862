//! Counter widget detection and rewriting.
//!
//! Stat strips ("500+ Clients / 10 Years / 99% Uptime") carry their meaning
//! in layout, not markup. This pass finds containers of repeated
//! number+label pairs and replaces them in place with a semantic `<table>`
//! so the block walker emits them as tabular data. Five patterns are tried
//! per child, from dedicated counter classes down to loose sibling pairing.

use std::collections::HashSet;

use log::debug;

use crate::config::ExtractorConfig;
use crate::dom::{self, NodeRef};
use crate::patterns::{
    COUNTER_NUMBER_CLASS, COUNTER_TITLE_CLASS, COUNTER_VALUE_EXACT, COUNTER_VALUE_LABEL,
    COUNTER_VALUE_PREFIX, GENERIC_NUMBER_CLASS, GENERIC_TITLE_CLASS,
};
use crate::visibility::{is_visually_hidden, visible_text};

/// Containers larger than this are skipped unless an Elementor counter
/// widget child marks them explicitly.
const MAX_CONTAINER_HTML_LEN: usize = 1000;

/// Scan the main-content subtree and rewrite qualifying counter containers
/// into `<table>` nodes in place.
pub fn rewrite_counters(root: &NodeRef, config: &ExtractorConfig) {
    let candidates: Vec<NodeRef> = root
        .descendants()
        .into_iter()
        .filter(|node| {
            node.is_element()
                && matches!(dom::tag_name(node).as_str(), "div" | "section" | "article")
        })
        .collect();

    let mut rewritten = 0usize;
    for container in candidates {
        if container.id == root.id {
            continue;
        }
        // A previous rewrite may have detached this candidate.
        if !dom::is_attached_under(&container, root) {
            continue;
        }
        if let Some(items) = collect_counter_items(&container, config) {
            let table_html = build_table_html(&items);
            dom::replace_with_html(&container, &table_html);
            rewritten += 1;
        }
    }
    if rewritten > 0 {
        debug!("rewrote {rewritten} counter container(s) to tables");
    }
}

/// Gather (value, label) pairs from a container, or None when it does not
/// qualify as a counter widget.
fn collect_counter_items(
    container: &NodeRef,
    config: &ExtractorConfig,
) -> Option<Vec<(String, String)>> {
    let children = dom::element_children(container);
    if children.len() < 3 || children.len() > 20 {
        return None;
    }

    if dom::outer_html(container).len() > MAX_CONTAINER_HTML_LEN {
        let has_elementor_counter = children
            .iter()
            .any(|child| dom::class_lower(child).contains("elementor-widget-counter"));
        if !has_elementor_counter {
            return None;
        }
    }

    let mut items: Vec<(String, String)> = Vec::new();
    for child in &children {
        if is_visually_hidden(child, config) {
            continue;
        }
        if let Some(pair) = counter_pair_for_child(child, config) {
            items.push(pair);
        }
    }

    if items.len() < 3 {
        return None;
    }

    // Rating widgets repeat one value ("5.0") under rating labels; those are
    // reviews, not stats.
    let has_rating = items
        .iter()
        .any(|(_, label)| label.to_lowercase().contains("rating"));
    if has_rating {
        let unique_values: HashSet<&String> = items.iter().map(|(value, _)| value).collect();
        if unique_values.len() == 1 {
            return None;
        }
    }

    Some(items)
}

fn counter_pair_for_child(
    child: &NodeRef,
    config: &ExtractorConfig,
) -> Option<(String, String)> {
    // Pattern 1: dedicated counter classes (Elementor counter widget).
    if let Some(pair) =
        pair_from_classes(child, config, &COUNTER_NUMBER_CLASS, &COUNTER_TITLE_CLASS)
    {
        return Some(pair);
    }

    // Pattern 2: generic number/label classes.
    if let Some(pair) =
        pair_from_classes(child, config, &GENERIC_NUMBER_CLASS, &GENERIC_TITLE_CLASS)
    {
        return Some(pair);
    }

    // Pattern 3: "<value> <label>" in one text run.
    let child_text = visible_text(child, config);
    if !child_text.is_empty() {
        if let Some(caps) = COUNTER_VALUE_LABEL.captures(&child_text) {
            let value = caps.get(1).map(|m| m.as_str().trim().to_string());
            let label = caps.get(2).map(|m| m.as_str().trim().to_string());
            if let (Some(value), Some(label)) = (value, label) {
                if label.chars().count() < 40 {
                    return Some((value, label));
                }
            }
        }
    }

    // Pattern 4: a pure-numeric descendant paired with a nearby label.
    for descendant in dom::element_descendants(child) {
        if is_visually_hidden(&descendant, config) {
            continue;
        }
        let descendant_text = visible_text(&descendant, config);
        if descendant_text.is_empty() || !COUNTER_VALUE_EXACT.is_match(&descendant_text) {
            continue;
        }
        // Following siblings first, then the parent's other children.
        for sibling in dom::next_element_siblings(&descendant) {
            if is_visually_hidden(&sibling, config) {
                continue;
            }
            if let Some(label) = label_candidate(&sibling, config) {
                return Some((descendant_text, label));
            }
        }
        if let Some(parent) = descendant.parent() {
            for sibling in dom::element_children(&parent) {
                if sibling.id == descendant.id || is_visually_hidden(&sibling, config) {
                    continue;
                }
                if let Some(label) = label_candidate(&sibling, config) {
                    return Some((descendant_text, label));
                }
            }
        }
    }

    // Pattern 5: the child is a label; a sibling carries the number.
    if !child_text.is_empty()
        && child_text.chars().count() < 40
        && !COUNTER_VALUE_PREFIX.is_match(&child_text)
    {
        for sibling in dom::prev_element_siblings(child) {
            if is_visually_hidden(&sibling, config) {
                continue;
            }
            let sibling_text = visible_text(&sibling, config);
            if COUNTER_VALUE_EXACT.is_match(&sibling_text) {
                return Some((sibling_text, child_text));
            }
        }
        for sibling in dom::next_element_siblings(child) {
            if is_visually_hidden(&sibling, config) {
                continue;
            }
            let sibling_text = visible_text(&sibling, config);
            if COUNTER_VALUE_EXACT.is_match(&sibling_text) {
                return Some((sibling_text, child_text));
            }
        }
    }

    None
}

/// Non-numeric text under 40 chars qualifies as a label.
fn label_candidate(node: &NodeRef, config: &ExtractorConfig) -> Option<String> {
    let text = visible_text(node, config);
    if !text.is_empty() && text.chars().count() < 40 && !COUNTER_VALUE_PREFIX.is_match(&text) {
        Some(text)
    } else {
        None
    }
}

/// First descendants whose class matches the value/label regexes, validated
/// as a (value, label) pair.
fn pair_from_classes(
    child: &NodeRef,
    config: &ExtractorConfig,
    number_class: &regex::Regex,
    title_class: &regex::Regex,
) -> Option<(String, String)> {
    let number_elem = dom::find_descendant(child, |d| {
        dom::class_tokens(d).iter().any(|t| number_class.is_match(t))
    })?;
    let title_elem = dom::find_descendant(child, |d| {
        dom::class_tokens(d).iter().any(|t| title_class.is_match(t))
    })?;

    let value = visible_text(&number_elem, config);
    let label = visible_text(&title_elem, config);
    if !value.is_empty()
        && !label.is_empty()
        && COUNTER_VALUE_PREFIX.is_match(&value)
        && label.chars().count() < 40
    {
        Some((value, label))
    } else {
        None
    }
}

fn build_table_html(items: &[(String, String)]) -> String {
    let mut html = String::from("<table><tbody>");
    for (value, label) in items {
        html.push_str("<tr><td>");
        html.push_str(&html_escape::encode_text(value));
        html.push_str("</td><td>");
        html.push_str(&html_escape::encode_text(label));
        html.push_str("</td></tr>");
    }
    html.push_str("</tbody></table>");
    html
}
