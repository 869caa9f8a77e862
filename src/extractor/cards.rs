//! Shape-based card-grid detection.
//!
//! Service/feature grids repeat a titled card six or more times with the
//! same structural shape. Each card becomes a heading plus its description
//! paragraph; when most cards have no description the grid collapses to a
//! single list of titles. Sliders, nav clusters, tab panels and anything
//! holding a form are out of bounds.

use std::collections::{HashMap, HashSet};

use crate::block::Block;
use crate::dom::{self, NodeRef, Selection};
use crate::extractor::{create_paragraph, WalkContext, Walker};
use crate::patterns::{CARD_TITLE_CLASS, GRID_CLASS_PATTERNS, SLIDER_CLASS_PATTERNS};
use crate::visibility::{is_visually_hidden, visible_text};

/// Minimum number of structurally consistent titled cards.
const MIN_CARDS: usize = 6;

/// Share of cards that must carry a description to keep heading+paragraph
/// pairs; below this the grid falls back to a title list.
const MIN_DESCRIBED_RATIO: f64 = 0.6;

impl<'a> Walker<'a> {
    /// Detect a card grid under `elem` and emit its blocks, or None when
    /// the shape requirements are not met.
    pub(crate) fn detect_card_grid(
        &mut self,
        elem: &NodeRef<'a>,
        context: WalkContext,
    ) -> Option<Vec<Block>> {
        if context.in_tab_panel || context.in_nav {
            return None;
        }
        if dom::has_descendant(elem, |d| dom::tag_name(d) == "form") {
            return None;
        }

        let class = dom::class_lower(elem);
        if SLIDER_CLASS_PATTERNS
            .iter()
            .any(|pattern| class.contains(pattern))
        {
            return None;
        }

        // A tab nav cluster can look like a grid of short cards.
        if self.detect_pseudo_tabset(elem).is_some() {
            return None;
        }

        if !is_likely_grid_container(elem, &class) {
            return None;
        }

        let mut card_candidates: Vec<NodeRef<'a>> = Vec::new();
        for child in dom::element_children(elem) {
            if is_visually_hidden(&child, self.config) {
                continue;
            }
            if let Some(title_elem) = find_title_element(&child) {
                if !dom::collapsed_text(&title_elem).is_empty() {
                    card_candidates.push(child);
                }
            }
        }

        if card_candidates.len() < MIN_CARDS {
            return None;
        }

        // The cards must share a structural shape.
        let mut structure_counts: HashMap<(String, String), usize> = HashMap::new();
        for card in &card_candidates {
            let class_key = dom::class_tokens(card)
                .into_iter()
                .take(2)
                .collect::<Vec<_>>()
                .join(" ");
            *structure_counts
                .entry((dom::tag_name(card), class_key))
                .or_insert(0) += 1;
        }
        if structure_counts.values().copied().max().unwrap_or(0) < MIN_CARDS {
            return None;
        }

        // Titles must be unique across the leading cards; repetition means
        // a widget, not a grid.
        let mut leading_titles: Vec<String> = Vec::new();
        for card in card_candidates.iter().take(8) {
            if let Some(title_elem) = find_title_element(card) {
                let title = dom::collapsed_text(&title_elem).to_lowercase();
                if !title.is_empty() {
                    leading_titles.push(title);
                }
            }
        }
        let unique: HashSet<&String> = leading_titles.iter().collect();
        if unique.len() != leading_titles.len() {
            return None;
        }

        let mut extracted: Vec<Block> = Vec::new();
        let mut described = 0usize;

        for card in &card_candidates {
            let Some(title_elem) = find_title_element(card) else {
                continue;
            };
            let heading_text = dom::collapsed_text(&title_elem);
            if heading_text.chars().count() < 3 {
                continue;
            }

            extracted.push(Block::Heading {
                level: title_level(&title_elem),
                text: heading_text,
            });

            if let Some(description) = find_description(card, self) {
                let text = visible_text(&description, self.config);
                if text.chars().count() >= 20 {
                    described += 1;
                    if let Some(block) = create_paragraph(&text, None) {
                        extracted.push(block);
                    }
                }
            }
        }

        // Mostly bare titles: emit one list instead of heading noise.
        if (described as f64) < (card_candidates.len() as f64) * MIN_DESCRIBED_RATIO {
            let mut unique_titles: Vec<String> = Vec::new();
            for card in &card_candidates {
                if let Some(title_elem) = find_title_element(card) {
                    let title = dom::collapsed_text(&title_elem);
                    if !title.is_empty() && !unique_titles.contains(&title) {
                        unique_titles.push(title);
                    }
                }
            }
            if unique_titles.len() >= MIN_CARDS {
                return Some(vec![Block::List {
                    ordered: false,
                    items: unique_titles,
                }]);
            }
            return None;
        }

        Some(extracted)
    }
}

/// Grid containers announce themselves by class, or by carrying six or
/// more distinct H4 titles.
fn is_likely_grid_container(elem: &NodeRef, class_lower: &str) -> bool {
    if GRID_CLASS_PATTERNS
        .iter()
        .any(|pattern| class_lower.contains(pattern))
    {
        return true;
    }
    let titles: HashSet<String> = Selection::from(elem.clone())
        .select("h4")
        .nodes()
        .iter()
        .map(dom::collapsed_text)
        .filter(|t| !t.is_empty())
        .collect();
    titles.len() >= MIN_CARDS
}

/// The card's title: a heading tag, then `role="heading"`, then a
/// title-classed element.
fn find_title_element<'a>(card: &NodeRef<'a>) -> Option<NodeRef<'a>> {
    dom::find_descendant(card, |d| {
        matches!(dom::tag_name(d).as_str(), "h2" | "h3" | "h4")
    })
    .or_else(|| dom::find_descendant(card, |d| dom::role(d) == "heading"))
    .or_else(|| {
        dom::find_descendant(card, |d| {
            dom::class_tokens(d)
                .iter()
                .any(|token| CARD_TITLE_CLASS.is_match(token))
        })
    })
}

fn title_level(title_elem: &NodeRef) -> u8 {
    match dom::tag_name(title_elem).as_str() {
        "h2" => 2,
        "h3" => 3,
        "h4" => 4,
        _ => dom::attr(title_elem, "aria-level")
            .and_then(|v| v.trim().parse::<u8>().ok())
            .unwrap_or(4),
    }
}

/// A card's description: its first paragraph, else a text-bearing div
/// without direct block children.
fn find_description<'a>(card: &NodeRef<'a>, walker: &Walker<'a>) -> Option<NodeRef<'a>> {
    if let Some(p) = dom::find_descendant(card, |d| dom::tag_name(d) == "p") {
        return Some(p);
    }
    for div in dom::element_descendants(card) {
        if dom::tag_name(&div) != "div" {
            continue;
        }
        let text = visible_text(&div, walker.config);
        if text.chars().count() <= 30 {
            continue;
        }
        let has_direct_blocks = dom::element_children(&div).iter().any(|child| {
            matches!(
                dom::tag_name(child).as_str(),
                "h2" | "h3" | "h4" | "ul" | "ol"
            )
        });
        if !has_direct_blocks {
            return Some(div);
        }
    }
    None
}
