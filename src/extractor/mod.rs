//! Recursive block extraction.
//!
//! The walker descends the pruned main-content tree in reading order,
//! emitting typed blocks. Interactive composites (tabsets, accordions,
//! disclosures, pseudo-tabsets) are recognized before plain containers so
//! their panels are consumed exactly once; block containers (headings,
//! paragraphs, lists, tables) emit and swallow their subtree; everything
//! else recurses child by child.

mod cards;
mod composites;

use std::collections::{HashMap, HashSet};

use crate::block::{Block, BlockMeta, MetaRole};
use crate::classify::{is_blog_feed_section, is_button_like, is_nav_container};
use crate::config::ExtractorConfig;
use crate::dom::{self, NodeId, NodeRef};
use crate::patterns::{
    ALT_TEXT_LIKE, HAS_DIGITS, SENTENCE_PUNCT, TEXT_EDITOR_CLASS_PATTERNS,
};
use crate::url_utils::resolve_href;
use crate::visibility::{is_visually_hidden, visible_text};

/// Depth guard for pathological nesting; the walk stops descending past it.
const MAX_WALK_DEPTH: usize = 100;

/// Tags whose direct text nodes may become paragraphs.
const TEXT_CONTAINER_TAGS: &[&str] = &[
    "p", "li", "td", "th", "h1", "h2", "h3", "h4", "h5", "h6", "summary",
];

/// Per-branch traversal state, passed by value into each recursion.
#[derive(Debug, Clone, Copy, Default)]
pub(crate) struct WalkContext {
    pub in_tab_panel: bool,
    pub in_nav: bool,
    pub depth: usize,
}

/// One extraction pass over a cloned main-content tree.
pub(crate) struct Walker<'a> {
    root: NodeRef<'a>,
    /// `id -> element` lookup scoped to the main-content subtree.
    id_index: HashMap<String, NodeRef<'a>>,
    /// Panels already emitted inside a tabset; the top-level walk skips them.
    consumed_panels: HashSet<NodeId>,
    config: &'a ExtractorConfig,
    canonical: &'a str,
    skip_blog_feeds: bool,
}

impl<'a> Walker<'a> {
    pub(crate) fn new(
        root: NodeRef<'a>,
        config: &'a ExtractorConfig,
        canonical: &'a str,
        skip_blog_feeds: bool,
    ) -> Self {
        let id_index = build_id_index(&root);
        Self {
            root,
            id_index,
            consumed_panels: HashSet::new(),
            config,
            canonical,
            skip_blog_feeds,
        }
    }

    /// Run the walk from the content root and return the block sequence.
    pub(crate) fn extract(&mut self) -> Vec<Block> {
        let mut blocks = Vec::new();
        let root = self.root.clone();
        self.walk(&root, &mut blocks, WalkContext::default());
        blocks
    }

    pub(crate) fn walk(
        &mut self,
        elem: &NodeRef<'a>,
        blocks: &mut Vec<Block>,
        context: WalkContext,
    ) {
        if context.depth > MAX_WALK_DEPTH || !elem.is_element() {
            return;
        }

        if self.consumed_panels.contains(&elem.id) || self.inside_consumed_panel(elem) {
            return;
        }

        if is_visually_hidden(elem, self.config) {
            return;
        }

        if self.skip_blog_feeds && is_blog_feed_section(elem, self.config) {
            return;
        }

        // Interactive composites come first; their extraction consumes
        // panels that must not re-surface in the plain walk.
        if let Some((container, anchors)) = self.detect_pseudo_tabset(elem) {
            // Emit only at the container itself, preserving reading order;
            // deeper detections re-fire when the walk reaches the container.
            if container.id == elem.id {
                if let Some(tabset) = self.extract_pseudo_tabset(&anchors, context) {
                    blocks.push(tabset);
                    for child in dom::element_children(elem) {
                        if child.id == container.id || dom::is_descendant_of(&child, &container)
                        {
                            continue;
                        }
                        self.walk(&child, blocks, descend(context));
                    }
                    return;
                }
            }
        }

        if dom::role(elem) == "tablist" {
            if let Some(tabset) = self.extract_aria_tabset(elem, context) {
                blocks.push(tabset);
                return;
            }
        }

        if dom::tag_name(elem) == "details" {
            if let Some(block) = self.extract_details(elem, context) {
                blocks.push(block);
                return;
            }
        }

        let is_disclosure = dom::attr(elem, "aria-expanded").is_some()
            || (dom::attr(elem, "aria-controls").is_some() && dom::role(elem) != "tab");
        if is_disclosure {
            if let Some(block) = self.extract_disclosure(elem, context) {
                blocks.push(block);
                return;
            }
        }

        if dom::role(elem) == "tabpanel" && self.inside_tablist(elem) {
            return;
        }

        self.extract_from_element(elem, blocks, context);
    }

    fn extract_from_element(
        &mut self,
        elem: &NodeRef<'a>,
        blocks: &mut Vec<Block>,
        context: WalkContext,
    ) {
        let tag = dom::tag_name(elem);

        // Block containers emit once and swallow their subtree.
        if let Some(level) = heading_level(&tag) {
            if let Some(block) = self.heading_block(elem, level) {
                blocks.push(block);
            }
            return;
        }

        if dom::role(elem) == "heading" {
            if let Some(block) = self.role_heading_block(elem) {
                blocks.push(block);
            }
            return;
        }

        if tag == "p" {
            let text = visible_text(elem, self.config);
            if let Some(block) = create_paragraph(&text, None) {
                blocks.push(block);
            }
            return;
        }

        // Elementor text-editor widgets store paragraph text on a div.
        let class = dom::class_lower(elem);
        if TEXT_EDITOR_CLASS_PATTERNS
            .iter()
            .any(|pattern| class.contains(pattern))
        {
            let text = visible_text(elem, self.config);
            if !text.is_empty() {
                if let Some(block) = create_paragraph(&text, None) {
                    blocks.push(block);
                }
            }
            return;
        }

        if tag == "ul" || tag == "ol" {
            if let Some(block) = self.list_block(elem, &tag) {
                blocks.push(block);
            }
            return;
        }

        if tag == "table" {
            if let Some(block) = self.table_block(elem) {
                blocks.push(block);
            }
            return;
        }

        if tag == "details" {
            if let Some(block) = self.extract_details(elem, context) {
                blocks.push(block);
            }
            return;
        }

        if dom::role(elem) == "tablist" {
            if let Some(block) = self.extract_aria_tabset(elem, context) {
                blocks.push(block);
            }
            return;
        }

        if let Some(card_blocks) = self.detect_card_grid(elem, context) {
            blocks.extend(card_blocks);
            return;
        }

        // Generic container: iterate children in order.
        for child in elem.children_it(false) {
            if child.is_text() {
                let raw = child.text();
                let text = raw.trim();
                if text.chars().count() > 10 && TEXT_CONTAINER_TAGS.contains(&tag.as_str()) {
                    if let Some(block) = create_paragraph(text, None) {
                        blocks.push(block);
                    }
                }
            } else if child.is_element() {
                if is_visually_hidden(&child, self.config) {
                    continue;
                }
                if is_button_like(&child, self.config) {
                    if let Some(cta) = self.extract_cta(&child) {
                        blocks.push(cta);
                        continue;
                    }
                }
                let child_context = self.child_context(context, &child);
                self.walk(&child, blocks, child_context);
            }
        }
    }

    fn child_context(&self, context: WalkContext, child: &NodeRef<'a>) -> WalkContext {
        WalkContext {
            in_tab_panel: context.in_tab_panel,
            in_nav: context.in_nav || is_nav_container(child),
            depth: context.depth + 1,
        }
    }

    fn heading_block(&self, elem: &NodeRef<'a>, level: u8) -> Option<Block> {
        let text = visible_text(elem, self.config);
        if text.is_empty() {
            return None;
        }
        Some(Block::Heading { level, text })
    }

    fn role_heading_block(&self, elem: &NodeRef<'a>) -> Option<Block> {
        let text = visible_text(elem, self.config);
        if text.is_empty() {
            return None;
        }
        let level = dom::attr(elem, "aria-level")
            .and_then(|v| v.trim().parse::<i64>().ok())
            .unwrap_or(2)
            .clamp(1, 6);
        let level = u8::try_from(level).unwrap_or(2);
        Some(Block::Heading { level, text })
    }

    fn list_block(&self, elem: &NodeRef<'a>, tag: &str) -> Option<Block> {
        let mut items: Vec<String> = Vec::new();

        // Elementor icon lists keep their text in a dedicated span; prefer
        // it so leftover icon glyph text never leaks into items.
        if tag == "ul" && dom::class_lower(elem).contains("elementor-icon-list-items") {
            for li in direct_li_children(elem) {
                let text_elem = dom::find_descendant(&li, |d| {
                    dom::class_lower(d).contains("elementor-icon-list-text")
                });
                let text = match text_elem {
                    Some(text_elem) => visible_text(&text_elem, self.config),
                    None => visible_text(&li, self.config),
                };
                if !text.is_empty() {
                    items.push(text);
                }
            }
        }

        if items.is_empty() {
            for li in direct_li_children(elem) {
                let text = visible_text(&li, self.config);
                if !text.is_empty() {
                    items.push(text);
                }
            }
        }

        if items.len() < 2 {
            return None;
        }

        Some(Block::List {
            ordered: tag == "ol",
            items,
        })
    }

    fn table_block(&self, elem: &NodeRef<'a>) -> Option<Block> {
        let mut rows: Vec<Vec<String>> = Vec::new();
        for tr in dom::Selection::from(elem.clone()).select("tr").nodes() {
            let cells = dom::Selection::from(tr.clone()).select("td, th");
            let row: Vec<String> = cells
                .nodes()
                .iter()
                .map(|cell| visible_text(cell, self.config))
                .collect();
            if !row.is_empty() {
                rows.push(row);
            }
        }
        if rows.is_empty() {
            return None;
        }
        Some(Block::Table { rows })
    }

    fn extract_cta(&self, elem: &NodeRef<'a>) -> Option<Block> {
        let text = visible_text(elem, self.config);
        if text.is_empty() {
            return None;
        }

        if dom::tag_name(elem) == "a" {
            if let Some(href) = dom::attr(elem, "href").filter(|h| !h.is_empty()) {
                if href == "#" || href.starts_with("javascript:") {
                    return None;
                }
                // In-page fragment: keep and mark as a router control.
                if href.starts_with('#') {
                    return Some(Block::Cta {
                        text,
                        href: Some(href),
                        meta: Some(BlockMeta {
                            role: MetaRole::Router,
                        }),
                    });
                }
                return Some(Block::Cta {
                    text,
                    href: Some(resolve_href(&href, self.canonical)),
                    meta: None,
                });
            }
        }

        Some(Block::Cta {
            text,
            href: None,
            meta: None,
        })
    }

    fn inside_consumed_panel(&self, elem: &NodeRef<'a>) -> bool {
        elem.ancestors(None)
            .into_iter()
            .any(|ancestor| self.consumed_panels.contains(&ancestor.id))
    }

    fn inside_tablist(&self, elem: &NodeRef<'a>) -> bool {
        dom::element_ancestors(elem)
            .iter()
            .any(|ancestor| dom::role(ancestor) == "tablist")
    }

    fn mark_panel_consumed(&mut self, panel: &NodeRef<'a>) {
        self.consumed_panels.insert(panel.id);
    }

    /// Panel content is extracted with an isolated consumed-set so panels
    /// may hold their own composites.
    fn extract_panel_blocks(&mut self, panel: &NodeRef<'a>, context: WalkContext) -> Vec<Block> {
        let saved = std::mem::take(&mut self.consumed_panels);
        let mut blocks = Vec::new();
        let panel_context = WalkContext {
            in_tab_panel: true,
            in_nav: false,
            depth: context.depth + 1,
        };
        self.walk(panel, &mut blocks, panel_context);
        self.consumed_panels = saved;
        blocks
    }
}

/// Fresh flags, one level deeper. Composite extraction resets the flag
/// state but keeps the depth guard effective across nested composites.
pub(crate) fn descend(context: WalkContext) -> WalkContext {
    WalkContext {
        in_tab_panel: false,
        in_nav: false,
        depth: context.depth + 1,
    }
}

fn build_id_index<'a>(root: &NodeRef<'a>) -> HashMap<String, NodeRef<'a>> {
    let mut index = HashMap::new();
    if let Some(id) = dom::attr(root, "id") {
        index.insert(id, root.clone());
    }
    for node in root.descendants() {
        if !node.is_element() {
            continue;
        }
        if let Some(id) = dom::attr(&node, "id") {
            index.insert(id, node);
        }
    }
    index
}

fn heading_level(tag: &str) -> Option<u8> {
    match tag {
        "h1" => Some(1),
        "h2" => Some(2),
        "h3" => Some(3),
        "h4" => Some(4),
        "h5" => Some(5),
        "h6" => Some(6),
        _ => None,
    }
}

fn direct_li_children<'a>(elem: &NodeRef<'a>) -> Vec<NodeRef<'a>> {
    dom::element_children(elem)
        .into_iter()
        .filter(|child| dom::tag_name(child) == "li")
        .collect()
}

/// Build a paragraph block, filtering alt-text-like and label-like strings.
pub(crate) fn create_paragraph(text: &str, meta: Option<BlockMeta>) -> Option<Block> {
    let text = dom::collapse_whitespace(text);
    if text.chars().count() < 3 {
        return None;
    }

    if ALT_TEXT_LIKE.is_match(&text) {
        return None;
    }

    // Unpunctuated short strings without digits are labels, not prose.
    if text.chars().count() < 15 && !SENTENCE_PUNCT.is_match(&text) && !HAS_DIGITS.is_match(&text)
    {
        return None;
    }

    Some(Block::Paragraph { text, meta })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn create_paragraph_rejects_tiny_text() {
        assert!(create_paragraph("ab", None).is_none());
        assert!(create_paragraph("  ", None).is_none());
    }

    #[test]
    fn create_paragraph_rejects_alt_text() {
        assert!(create_paragraph("Image of a technician at work", None).is_none());
        assert!(create_paragraph("Click to expand the gallery", None).is_none());
    }

    #[test]
    fn create_paragraph_rejects_short_labels() {
        assert!(create_paragraph("Our Services", None).is_none());
        // Digits rescue short strings (prices, stats).
        assert!(create_paragraph("From $99", None).is_some());
        // Punctuation rescues short strings.
        assert!(create_paragraph("We can help.", None).is_some());
    }

    #[test]
    fn create_paragraph_collapses_whitespace() {
        let block = create_paragraph("Hello   big\n world.", None).unwrap();
        assert_eq!(
            block,
            Block::paragraph("Hello big world.")
        );
    }

    #[test]
    fn heading_level_parses_heading_tags_only() {
        assert_eq!(heading_level("h1"), Some(1));
        assert_eq!(heading_level("h6"), Some(6));
        assert_eq!(heading_level("p"), None);
        assert_eq!(heading_level("h7"), None);
    }
}
