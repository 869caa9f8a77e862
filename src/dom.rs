//! DOM operations adapter.
//!
//! Thin helpers over the `dom_query` tree, giving the extraction passes a
//! consistent vocabulary for tag names, attributes, siblings and containment
//! checks without repeating `Selection`/`NodeRef` conversion boilerplate.

// Re-export core types for internal use
pub use dom_query::{Document, NodeId, NodeRef, Selection};

pub use tendril::StrTendril;

/// Get tag name (lowercase) of a node, empty string for non-elements.
#[must_use]
pub fn tag_name(node: &NodeRef) -> String {
    node.node_name()
        .map(|t| t.to_lowercase())
        .unwrap_or_default()
}

/// Get an attribute value as an owned string.
#[must_use]
pub fn attr(node: &NodeRef, name: &str) -> Option<String> {
    node.attrs()
        .iter()
        .find(|a| &*a.name.local == name)
        .map(|a| a.value.to_string())
}

/// Get the class attribute, lowercased, or an empty string.
#[must_use]
pub fn class_lower(node: &NodeRef) -> String {
    attr(node, "class")
        .map(|v| v.to_lowercase())
        .unwrap_or_default()
}

/// Iterate the class attribute's whitespace-separated tokens, lowercased.
#[must_use]
pub fn class_tokens(node: &NodeRef) -> Vec<String> {
    class_lower(node)
        .split_whitespace()
        .map(str::to_string)
        .collect()
}

/// Get the `role` attribute, or an empty string.
#[must_use]
pub fn role(node: &NodeRef) -> String {
    attr(node, "role").unwrap_or_default()
}

/// Direct element children in document order.
#[must_use]
pub fn element_children<'a>(node: &NodeRef<'a>) -> Vec<NodeRef<'a>> {
    node.children_it(false).filter(NodeRef::is_element).collect()
}

/// Element ancestors from the parent upward (the document root is excluded).
#[must_use]
pub fn element_ancestors<'a>(node: &NodeRef<'a>) -> Vec<NodeRef<'a>> {
    node.ancestors(None)
        .into_iter()
        .filter(NodeRef::is_element)
        .collect()
}

/// Following element siblings in document order.
#[must_use]
pub fn next_element_siblings<'a>(node: &NodeRef<'a>) -> Vec<NodeRef<'a>> {
    let mut out = Vec::new();
    let mut sibling = node.next_sibling();
    while let Some(s) = sibling {
        if s.is_element() {
            out.push(s.clone());
        }
        sibling = s.next_sibling();
    }
    out
}

/// Preceding element siblings, nearest first.
#[must_use]
pub fn prev_element_siblings<'a>(node: &NodeRef<'a>) -> Vec<NodeRef<'a>> {
    let mut out = Vec::new();
    let mut sibling = node.prev_sibling();
    while let Some(s) = sibling {
        if s.is_element() {
            out.push(s.clone());
        }
        sibling = s.prev_sibling();
    }
    out
}

/// Count of preceding element siblings (the node's position among elements).
#[must_use]
pub fn prev_element_sibling_count(node: &NodeRef) -> usize {
    prev_element_siblings(node).len()
}

/// Element descendants of `node` in document order, excluding `node` itself.
#[must_use]
pub fn element_descendants<'a>(node: &NodeRef<'a>) -> Vec<NodeRef<'a>> {
    node.descendants()
        .into_iter()
        .filter(NodeRef::is_element)
        .collect()
}

/// Whether `node` is a descendant of `ancestor`.
#[must_use]
pub fn is_descendant_of(node: &NodeRef, ancestor: &NodeRef) -> bool {
    node.ancestors(None)
        .into_iter()
        .any(|a| a.id == ancestor.id)
}

/// Whether the node is still attached under `root` (replaced/removed subtrees
/// stay addressable in the arena but lose their path to the root).
#[must_use]
pub fn is_attached_under(node: &NodeRef, root: &NodeRef) -> bool {
    node.id == root.id || is_descendant_of(node, root)
}

/// Subtree text content of an element as a `StrTendril` (no visibility
/// filtering; see `visibility::visible_text` for the filtered variant).
#[must_use]
pub fn text_content(node: &NodeRef) -> StrTendril {
    Selection::from(node.clone()).text()
}

/// Subtree text with whitespace runs collapsed to single spaces and trimmed.
#[must_use]
pub fn collapsed_text(node: &NodeRef) -> String {
    collapse_whitespace(&text_content(node))
}

/// Collapse whitespace runs to single spaces and trim the ends.
#[must_use]
pub fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Serialized outer HTML of a node.
#[must_use]
pub fn outer_html(node: &NodeRef) -> String {
    Selection::from(node.clone()).html().to_string()
}

/// Remove a node (and its subtree) from the tree.
pub fn remove(node: &NodeRef) {
    Selection::from(node.clone()).remove();
}

/// Replace a node in place with parsed HTML.
pub fn replace_with_html(node: &NodeRef, html: &str) {
    Selection::from(node.clone()).replace_with_html(html);
}

/// First descendant element (document order) satisfying the predicate.
#[must_use]
pub fn find_descendant<'a, F>(node: &NodeRef<'a>, pred: F) -> Option<NodeRef<'a>>
where
    F: Fn(&NodeRef<'a>) -> bool,
{
    node.descendants()
        .into_iter()
        .find(|d| d.is_element() && pred(d))
}

/// Whether any descendant element satisfies the predicate.
#[must_use]
pub fn has_descendant<F>(node: &NodeRef, pred: F) -> bool
where
    F: Fn(&NodeRef) -> bool,
{
    find_descendant(node, pred).is_some()
}
