//! Interactive composite extraction: `<details>`, ARIA disclosures, ARIA
//! tabsets, and pseudo-tabsets synthesized from in-page anchor clusters.
//!
//! Panel lookups go through the main-content ID index only; targets outside
//! the content subtree are ignored. When a disclosure's panel cannot be
//! located at all, the answer degrades to a fallback paragraph instead of
//! dropping the title.

use crate::block::{Block, Tab};
use crate::classify::looks_like_faq_question;
use crate::dom::{self, NodeId, NodeRef, Selection};
use crate::extractor::{create_paragraph, descend, WalkContext, Walker};
use crate::visibility::visible_text;

/// Emitted when a disclosure control points nowhere we can see.
const MISSING_PANEL_TEXT: &str = "Insufficient evidence: answer container not found in DOM";

/// Tags that may host an anchor-cluster tab navigation.
const PSEUDO_TAB_CONTAINER_TAGS: &[&str] =
    &["div", "section", "article", "nav", "ul", "ol", "p"];

/// How far up the LCA walk may go when grouping anchor clusters.
const MAX_CONTAINER_WALK: usize = 5;

/// An anchor participating in a pseudo-tabset: its node, visible text, and
/// the fragment target id.
#[derive(Clone)]
pub(crate) struct PseudoAnchor<'a> {
    node: NodeRef<'a>,
    text: String,
    target: String,
}

impl<'a> Walker<'a> {
    /// Extract `<details>` as an accordion, or an FAQ when the summary is
    /// question-shaped.
    pub(crate) fn extract_details(
        &mut self,
        elem: &NodeRef<'a>,
        context: WalkContext,
    ) -> Option<Block> {
        let summary = dom::find_descendant(elem, |d| dom::tag_name(d) == "summary")?;
        let title = visible_text(&summary, self.config);
        if title.is_empty() {
            return None;
        }

        let mut content: Vec<Block> = Vec::new();
        for child in elem.children_it(false) {
            if child.is_element() {
                if dom::tag_name(&child) == "summary" {
                    continue;
                }
                let before = content.len();
                self.walk(&child, &mut content, descend(context));
                if content.len() == before {
                    // The walk found no block shape; keep the raw text.
                    let text = visible_text(&child, self.config);
                    if !text.is_empty() {
                        if let Some(block) = create_paragraph(&text, None) {
                            content.push(block);
                        }
                    }
                }
            } else if child.is_text() {
                let raw = child.text();
                let text = raw.trim();
                if text.chars().count() > 10 {
                    if let Some(block) = create_paragraph(text, None) {
                        content.push(block);
                    }
                }
            }
        }

        Some(finish_accordion_or_faq(title, content))
    }

    /// Extract a disclosure control (`aria-expanded` / `aria-controls`).
    pub(crate) fn extract_disclosure(
        &mut self,
        elem: &NodeRef<'a>,
        context: WalkContext,
    ) -> Option<Block> {
        let title = visible_text(elem, self.config);
        if title.is_empty() {
            return None;
        }

        let mut content: Vec<Block> = Vec::new();

        if let Some(controls_id) = dom::attr(elem, "aria-controls") {
            if let Some(target) = self.id_index.get(&controls_id).cloned() {
                self.walk(&target, &mut content, descend(context));
            }
        }

        // Elementor accordion: the content div lives beside the title
        // inside the item wrapper.
        if content.is_empty() {
            if let Some(parent) = elem.parent() {
                let panel = dom::find_descendant(&parent, |d| {
                    dom::class_lower(d).contains("elementor-accordion-content")
                });
                if let Some(panel) = panel {
                    self.walk(&panel, &mut content, descend(context));
                }
            }
        }

        // Generic accordion DOM: the next sibling that looks like a panel.
        if content.is_empty() {
            for sibling in dom::next_element_siblings(elem) {
                let class = dom::class_lower(&sibling);
                let is_panel = dom::role(&sibling) == "region"
                    || class.contains("panel")
                    || class.contains("content")
                    || class.contains("answer")
                    || matches!(
                        dom::tag_name(&sibling).as_str(),
                        "div" | "section" | "article"
                    );
                if is_panel {
                    self.walk(&sibling, &mut content, descend(context));
                    break;
                }
            }
        }

        Some(finish_accordion_or_faq(title, content))
    }

    /// Extract an ARIA tabset (`role="tablist"`). Requires at least two
    /// titled tabs; consumed panels never re-surface at top level.
    pub(crate) fn extract_aria_tabset(
        &mut self,
        elem: &NodeRef<'a>,
        context: WalkContext,
    ) -> Option<Block> {
        let mut tab_nodes: Vec<NodeRef<'a>> = Selection::from(elem.clone())
            .select(r#"[role="tab"]"#)
            .nodes()
            .to_vec();
        if tab_nodes.is_empty() {
            tab_nodes = dom::element_children(elem)
                .into_iter()
                .filter(|child| dom::class_lower(child).contains("tab"))
                .collect();
        }
        if tab_nodes.is_empty() {
            return None;
        }

        let all_panels: Vec<NodeRef<'a>> = Selection::from(self.root.clone())
            .select(r#"[role="tabpanel"]"#)
            .nodes()
            .to_vec();

        let mut tabs: Vec<Tab> = Vec::new();
        let mut consumed: Vec<NodeRef<'a>> = Vec::new();

        for tab_node in tab_nodes {
            let title = visible_text(&tab_node, self.config);
            if title.is_empty() {
                continue;
            }

            let mut content: Vec<Block> = Vec::new();

            let panel_id = dom::attr(&tab_node, "aria-controls")
                .or_else(|| dom::attr(&tab_node, "data-target"))
                .or_else(|| dom::attr(&tab_node, "data-tab"))
                .map(|raw| raw.trim_start_matches('#').to_string());
            if let Some(panel_id) = panel_id {
                if let Some(panel) = self.id_index.get(&panel_id).cloned() {
                    content = self.extract_panel_blocks(&panel, context);
                    if !content.is_empty() {
                        consumed.push(panel);
                    }
                }
            }

            if content.is_empty() {
                if let Some(tab_id) = dom::attr(&tab_node, "id") {
                    for panel in &all_panels {
                        if dom::attr(panel, "aria-labelledby").as_deref() == Some(tab_id.as_str()) {
                            content = self.extract_panel_blocks(panel, context);
                            if !content.is_empty() {
                                consumed.push(panel.clone());
                            }
                            break;
                        }
                    }
                }
            }

            if content.is_empty() {
                for sibling in dom::next_element_siblings(&tab_node) {
                    if dom::role(&sibling) == "tabpanel" {
                        content = self.extract_panel_blocks(&sibling, context);
                        if !content.is_empty() {
                            consumed.push(sibling);
                        }
                        break;
                    }
                }
            }

            tabs.push(Tab {
                title,
                content_blocks: content,
            });
        }

        if tabs.len() < 2 {
            return None;
        }
        for panel in consumed {
            self.mark_panel_consumed(&panel);
        }
        Some(Block::Tabset { tabs })
    }

    /// Detect an anchor-cluster pseudo-tabset under `elem`: 2-8 fragment
    /// links whose targets exist in the main-content index, grouped under a
    /// common parent. Returns the cluster container and the anchors in DOM
    /// order.
    pub(crate) fn detect_pseudo_tabset(
        &self,
        elem: &NodeRef<'a>,
    ) -> Option<(NodeRef<'a>, Vec<PseudoAnchor<'a>>)> {
        let tag = dom::tag_name(elem);
        if !PSEUDO_TAB_CONTAINER_TAGS.contains(&tag.as_str()) {
            return None;
        }

        let mut anchors: Vec<PseudoAnchor<'a>> = Vec::new();
        for child in dom::element_children(elem) {
            if dom::tag_name(&child) == "a" {
                if let Some(anchor) = self.pseudo_anchor(&child) {
                    anchors.push(anchor);
                }
            }
        }

        // Sparse direct children: widen to all descendants.
        if anchors.len() < 2 {
            for node in elem.descendants() {
                if !node.is_element()
                    || dom::tag_name(&node) != "a"
                    || dom::attr(&node, "href").is_none()
                {
                    continue;
                }
                if anchors.iter().any(|a| a.node.id == node.id) {
                    continue;
                }
                if let Some(anchor) = self.pseudo_anchor(&node) {
                    anchors.push(anchor);
                }
            }
        }

        if anchors.len() < 2 || anchors.len() > 8 {
            return None;
        }

        let unique_targets: std::collections::HashSet<&str> =
            anchors.iter().map(|a| a.target.as_str()).collect();
        if unique_targets.len() < 2 {
            return None;
        }

        // Cluster by immediate parent, falling back to grandparent.
        let mut group = largest_group_by(&anchors, |anchor| {
            anchor.node.parent().map(|p| p.id)
        });
        if group.len() < 2 {
            group = largest_group_by(&anchors, |anchor| {
                anchor.node.parent().and_then(|p| p.parent()).map(|g| g.id)
            });
            if group.len() < 2 {
                return None;
            }
        }

        // Lowest common ancestor, walking up a bounded number of levels.
        let mut container: Option<NodeRef<'a>> = group[0].node.parent();
        let mut level = 0;
        loop {
            let Some(candidate) = container.clone() else {
                break;
            };
            if !candidate.is_element() {
                container = None;
                break;
            }
            if level >= MAX_CONTAINER_WALK {
                break;
            }
            let all_contained = group
                .iter()
                .all(|anchor| dom::is_descendant_of(&anchor.node, &candidate));
            if all_contained {
                break;
            }
            container = candidate.parent();
            level += 1;
        }
        let container = container.unwrap_or_else(|| elem.clone());

        // DOM order by position among element siblings.
        let mut ordered: Vec<PseudoAnchor<'a>> = group;
        ordered.sort_by_key(|anchor| dom::prev_element_sibling_count(&anchor.node));

        Some((container, ordered))
    }

    fn pseudo_anchor(&self, node: &NodeRef<'a>) -> Option<PseudoAnchor<'a>> {
        let href = dom::attr(node, "href")?;
        if !href.starts_with('#') {
            return None;
        }
        let target = href.trim_start_matches('#').to_string();
        if !self.id_index.contains_key(&target) {
            return None;
        }
        let text = visible_text(node, self.config);
        if text.is_empty() {
            return None;
        }
        Some(PseudoAnchor {
            node: node.clone(),
            text,
            target,
        })
    }

    /// Build the tabset from a detected anchor cluster, consuming panels.
    pub(crate) fn extract_pseudo_tabset(
        &mut self,
        anchors: &[PseudoAnchor<'a>],
        context: WalkContext,
    ) -> Option<Block> {
        let mut tabs: Vec<Tab> = Vec::new();

        for anchor in anchors {
            let Some(panel) = self.id_index.get(&anchor.target).cloned() else {
                // Target vanished during pruning; keep the tab shell.
                tabs.push(Tab {
                    title: anchor.text.clone(),
                    content_blocks: Vec::new(),
                });
                continue;
            };

            let blocks = self.extract_panel_blocks(&panel, context);
            // Panels often repeat the anchor text as their own title.
            let content: Vec<Block> = blocks
                .into_iter()
                .filter(|block| block.own_text() != Some(anchor.text.as_str()))
                .collect();

            self.mark_panel_consumed(&panel);
            tabs.push(Tab {
                title: anchor.text.clone(),
                content_blocks: content,
            });
        }

        if tabs.len() < 2 {
            return None;
        }
        Some(Block::Tabset { tabs })
    }
}

/// Classify a titled content run as FAQ or accordion, with the fallback
/// paragraph when no content was found.
fn finish_accordion_or_faq(title: String, mut content: Vec<Block>) -> Block {
    if content.is_empty() {
        content.push(Block::paragraph(MISSING_PANEL_TEXT));
    }
    let is_faq = title.trim_end().ends_with('?') || looks_like_faq_question(&title);
    if is_faq {
        Block::Faq {
            question: title,
            answer_blocks: content,
        }
    } else {
        Block::Accordion {
            title,
            content_blocks: content,
        }
    }
}

/// Largest cluster of anchors sharing a grouping key, first-seen order on
/// ties.
fn largest_group_by<'a, F>(anchors: &[PseudoAnchor<'a>], key_fn: F) -> Vec<PseudoAnchor<'a>>
where
    F: Fn(&PseudoAnchor<'a>) -> Option<NodeId>,
{
    let mut groups: Vec<(NodeId, Vec<PseudoAnchor<'a>>)> = Vec::new();
    for anchor in anchors {
        let Some(key) = key_fn(anchor) else { continue };
        if let Some((_, members)) = groups.iter_mut().find(|(k, _)| *k == key) {
            members.push(anchor.clone());
        } else {
            groups.push((key, vec![anchor.clone()]));
        }
    }
    let mut best: Vec<PseudoAnchor<'a>> = Vec::new();
    for (_, members) in groups {
        if members.len() > best.len() {
            best = members;
        }
    }
    best
}
