//! Post-extraction passes over the block sequence.
//!
//! Order matters and mirrors the pipeline: eyebrow annotation, H5/H6
//! eyebrow normalization, blog-feed removal on non-blog pages, the
//! H2-scoped H4 grid fallback, sliding-window deduplication, then H1
//! validation. Each pass rebuilds the sequence; blocks are never mutated
//! in place.

use log::warn;
use xxhash_rust::xxh3::xxh3_64;

use crate::block::{Block, BlockMeta, MetaRole, Tab, Validation, ValidationStatus};
use crate::config::EyebrowMode;
use crate::patterns::{HAS_LETTERS, INTERNAL_PUNCT, SENTENCE_PUNCT};

/// Nearby-duplicate window size.
const DEDUPE_WINDOW: usize = 30;

/// Eyebrow texts stay under this length.
const EYEBROW_MAX_LEN: usize = 40;

// =============================================================================
// Eyebrow handling
// =============================================================================

/// Annotate (or drop) eyebrow paragraphs, coercing label-like H5/H6
/// headings into paragraphs along the way.
#[must_use]
pub fn annotate_eyebrows(blocks: Vec<Block>, mode: EyebrowMode) -> Vec<Block> {
    if mode == EyebrowMode::Keep {
        return blocks;
    }

    let mut result = Vec::with_capacity(blocks.len());
    for (i, block) in blocks.iter().enumerate() {
        let next_block = blocks.get(i + 1);

        // H5/H6 headings that read as labels become eyebrow paragraphs,
        // unless a paragraph follows (then they are real sub-headings).
        let mut candidate = block.clone();
        let mut is_h5_h6_eyebrow = false;
        if let Block::Heading { level, text } = block {
            if *level >= 5 {
                let next_is_paragraph =
                    matches!(next_block, Some(Block::Paragraph { .. }));
                if is_eyebrow_text(text) && !next_is_paragraph {
                    is_h5_h6_eyebrow = true;
                    candidate = Block::paragraph(text.clone());
                }
            }
        }

        let is_eyebrow =
            is_h5_h6_eyebrow || is_eyebrow_paragraph(&candidate, next_block, i, &blocks);

        if is_eyebrow {
            match mode {
                EyebrowMode::Drop => {}
                _ => {
                    if let Block::Paragraph { text, .. } = candidate {
                        result.push(Block::Paragraph {
                            text,
                            meta: Some(BlockMeta {
                                role: MetaRole::Eyebrow,
                            }),
                        });
                    }
                }
            }
        } else {
            result.push(block.clone());
        }
    }
    result
}

/// Second pass: any remaining H5/H6 that directly precedes an H2/H3 is an
/// eyebrow too, even when the first pass let it through.
#[must_use]
pub fn normalize_h5_h6_eyebrows(blocks: Vec<Block>, mode: EyebrowMode) -> Vec<Block> {
    if mode == EyebrowMode::Keep {
        return blocks;
    }

    let mut result = Vec::with_capacity(blocks.len());
    for (i, block) in blocks.iter().enumerate() {
        if let Block::Heading { level, text } = block {
            if *level >= 5 {
                let next_is_section_heading = matches!(
                    blocks.get(i + 1),
                    Some(Block::Heading { level, .. }) if (2..=3).contains(level)
                );
                if is_eyebrow_text(text) && next_is_section_heading {
                    if mode == EyebrowMode::Annotate {
                        result.push(Block::Paragraph {
                            text: text.clone(),
                            meta: Some(BlockMeta {
                                role: MetaRole::Eyebrow,
                            }),
                        });
                    }
                    continue;
                }
            }
        }
        result.push(block.clone());
    }
    result
}

/// Short label shape: under 40 chars, has letters, punctuation at most
/// trailing.
fn is_eyebrow_text(text: &str) -> bool {
    let text = text.trim();
    text.chars().count() < EYEBROW_MAX_LEN
        && !INTERNAL_PUNCT.is_match(text)
        && HAS_LETTERS.is_match(text)
}

fn is_eyebrow_paragraph(
    block: &Block,
    next_block: Option<&Block>,
    index: usize,
    all_blocks: &[Block],
) -> bool {
    let Block::Paragraph { text, .. } = block else {
        return false;
    };
    let text = text.trim();

    if text.chars().count() >= EYEBROW_MAX_LEN {
        return false;
    }
    if SENTENCE_PUNCT.is_match(text) {
        return false;
    }
    if !HAS_LETTERS.is_match(text) {
        return false;
    }

    // A list/table/faq/accordion immediately before suggests this text
    // belongs to that structure, not to the next heading.
    for j in index.saturating_sub(10)..index {
        let nearby = matches!(
            all_blocks[j],
            Block::List { .. } | Block::Table { .. } | Block::Faq { .. } | Block::Accordion { .. }
        );
        if nearby && index - j <= 2 {
            return false;
        }
    }

    matches!(next_block, Some(Block::Heading { level, .. }) if (2..=3).contains(level))
}

// =============================================================================
// Blog feed removal
// =============================================================================

/// On non-blog pages, drop runs that start at an H2 mentioning blog/posts
/// and extend until the next unrelated H2.
#[must_use]
pub fn remove_blog_feed_sections(blocks: Vec<Block>, is_blog_post: bool) -> Vec<Block> {
    if is_blog_post {
        return blocks;
    }

    let is_feed_heading = |block: &Block| -> bool {
        if let Block::Heading { level: 2, text } = block {
            let text = text.to_lowercase();
            text.contains("blog") || text.contains("posts")
        } else {
            false
        }
    };

    let mut result = Vec::with_capacity(blocks.len());
    let mut i = 0;
    while i < blocks.len() {
        if is_feed_heading(&blocks[i]) {
            i += 1;
            while i < blocks.len() {
                if matches!(blocks[i], Block::Heading { level: 2, .. })
                    && !is_feed_heading(&blocks[i])
                {
                    break;
                }
                i += 1;
            }
            continue;
        }
        result.push(blocks[i].clone());
        i += 1;
    }
    result
}

// =============================================================================
// H2-scoped grid fallback
// =============================================================================

/// Within each H2-bounded section, collapse six-plus unique H4 headings
/// (and their description paragraphs) into a single list at the first H4
/// position.
#[must_use]
pub fn section_scoped_grid_fallback(blocks: Vec<Block>) -> Vec<Block> {
    if blocks.is_empty() {
        return blocks;
    }

    let mut result = Vec::with_capacity(blocks.len());
    let mut i = 0;
    while i < blocks.len() {
        let block = &blocks[i];

        if matches!(block, Block::Heading { level: 2, .. }) {
            let section_end = blocks[i + 1..]
                .iter()
                .position(|b| matches!(b, Block::Heading { level: 2, .. }))
                .map_or(blocks.len(), |offset| i + 1 + offset);
            let section = &blocks[i + 1..section_end];

            let mut h4_indices: Vec<usize> = Vec::new();
            let mut h4_titles: Vec<String> = Vec::new();
            let mut seen_titles: std::collections::HashSet<String> =
                std::collections::HashSet::new();
            for (idx, section_block) in section.iter().enumerate() {
                if matches!(
                    section_block,
                    Block::Tabset { .. } | Block::Accordion { .. } | Block::Faq { .. }
                ) {
                    continue;
                }
                if let Block::Heading { level: 4, text } = section_block {
                    let key = text.trim().to_lowercase();
                    if !text.trim().is_empty() && seen_titles.insert(key) {
                        h4_indices.push(idx);
                        h4_titles.push(text.trim().to_string());
                    }
                }
            }

            if h4_titles.len() >= 6 {
                // Drop each H4 plus the first paragraph shortly after it.
                let mut skip: std::collections::HashSet<usize> =
                    std::collections::HashSet::new();
                for &idx in &h4_indices {
                    skip.insert(idx);
                    for k in idx + 1..(idx + 4).min(section.len()) {
                        if matches!(section[k], Block::Paragraph { .. }) {
                            skip.insert(k);
                            break;
                        }
                    }
                }

                result.push(block.clone());
                let first_h4 = h4_indices.first().copied();
                let mut inserted = false;
                for (idx, section_block) in section.iter().enumerate() {
                    if Some(idx) == first_h4 && !inserted {
                        result.push(Block::List {
                            ordered: false,
                            items: h4_titles.clone(),
                        });
                        inserted = true;
                    }
                    if skip.contains(&idx) {
                        continue;
                    }
                    result.push(section_block.clone());
                }
                if !inserted {
                    result.push(Block::List {
                        ordered: false,
                        items: h4_titles.clone(),
                    });
                }

                i = section_end;
                continue;
            }
        }

        result.push(block.clone());
        i += 1;
    }
    result
}

// =============================================================================
// Deduplication
// =============================================================================

/// Remove nearby duplicates with a sliding window of normalized keys.
/// Tabset contents are deduplicated recursively first; keyless blocks are
/// always kept.
#[must_use]
pub fn deduplicate_blocks(blocks: Vec<Block>) -> Vec<Block> {
    if blocks.is_empty() {
        return blocks;
    }

    let blocks: Vec<Block> = blocks
        .into_iter()
        .map(|block| match block {
            Block::Tabset { tabs } => Block::Tabset {
                tabs: tabs
                    .into_iter()
                    .map(|tab| Tab {
                        title: tab.title,
                        content_blocks: deduplicate_blocks(tab.content_blocks),
                    })
                    .collect(),
            },
            other => other,
        })
        .collect();

    let mut window: Vec<String> = Vec::new();
    let mut result = Vec::with_capacity(blocks.len());
    for block in blocks {
        let key = dedupe_key(&block);
        if key.is_empty() {
            result.push(block);
            continue;
        }
        if window.contains(&key) {
            continue;
        }
        result.push(block);
        window.push(key);
        if window.len() > DEDUPE_WINDOW {
            window.remove(0);
        }
    }
    result
}

/// Normalized fingerprint per variant; composites hash their recursive
/// text content so same-title items with different bodies survive.
#[must_use]
pub fn dedupe_key(block: &Block) -> String {
    match block {
        Block::Heading { level, text } => {
            format!("heading:{level}:{}", text.to_lowercase().trim())
        }
        Block::Paragraph { text, .. } => {
            format!("paragraph:{}", text.to_lowercase().trim())
        }
        Block::List { ordered, items } => {
            let items = items
                .iter()
                .map(|item| item.to_lowercase().trim().to_string())
                .collect::<Vec<_>>()
                .join("|");
            format!("list:{ordered}:{items}")
        }
        Block::Cta { text, href, .. } => {
            let href = href.as_deref().unwrap_or_default().to_lowercase();
            format!("cta:{}:{}", text.to_lowercase().trim(), href.trim())
        }
        Block::Table { rows } => {
            let cells = rows
                .iter()
                .map(|row| {
                    row.iter()
                        .map(|cell| cell.to_lowercase().trim().to_string())
                        .collect::<Vec<_>>()
                        .join("|")
                })
                .collect::<Vec<_>>()
                .join("|");
            format!("table:{cells}")
        }
        Block::Faq {
            question,
            answer_blocks,
        } => {
            format!(
                "faq:{}:{}",
                question.to_lowercase().trim(),
                content_hash(answer_blocks)
            )
        }
        Block::Accordion {
            title,
            content_blocks,
        } => {
            format!(
                "accordion:{}:{}",
                title.to_lowercase().trim(),
                content_hash(content_blocks)
            )
        }
        Block::Tabset { tabs } => {
            let titles = tabs
                .iter()
                .map(|tab| tab.title.to_lowercase().trim().to_string())
                .collect::<Vec<_>>()
                .join("|");
            format!("tabset:{titles}")
        }
    }
}

/// 8-hex-char digest of a composite's recursive text content.
fn content_hash(blocks: &[Block]) -> String {
    let text = flatten_text(blocks).to_lowercase();
    let digest = format!("{:016x}", xxh3_64(text.as_bytes()));
    digest[..8].to_string()
}

fn flatten_text(blocks: &[Block]) -> String {
    let mut parts: Vec<String> = Vec::new();
    for block in blocks {
        match block {
            Block::Paragraph { text, .. } | Block::Heading { text, .. } => {
                parts.push(text.clone());
            }
            Block::List { items, .. } => parts.extend(items.iter().cloned()),
            Block::Table { rows } => {
                for row in rows {
                    parts.extend(row.iter().cloned());
                }
            }
            _ => {}
        }
    }
    parts.join("|")
}

// =============================================================================
// Validation
// =============================================================================

/// Enforce the single-H1 rule: keep the first, drop the rest, and report.
#[must_use]
pub fn validate_h1(blocks: Vec<Block>) -> (Vec<Block>, Validation) {
    let is_h1 = |block: &Block| matches!(block, Block::Heading { level: 1, .. });
    let h1_count = blocks.iter().filter(|b| is_h1(b)).count();

    if h1_count == 0 {
        warn!("no H1 found in extracted blocks");
        return (
            blocks,
            Validation {
                status: ValidationStatus::Warn,
                h1_count: 0,
                messages: vec!["No H1 found in extracted blocks.".to_string()],
            },
        );
    }

    if h1_count > 1 {
        warn!("multiple H1 headings found ({h1_count}), keeping the first");
        let mut h1_seen = false;
        let filtered: Vec<Block> = blocks
            .into_iter()
            .filter(|block| {
                if is_h1(block) {
                    if h1_seen {
                        return false;
                    }
                    h1_seen = true;
                }
                true
            })
            .collect();
        let kept = filtered.iter().filter(|b| is_h1(b)).count();
        return (
            filtered,
            Validation {
                status: ValidationStatus::Warn,
                h1_count: kept,
                messages: vec![format!(
                    "Multiple H1 headings found ({h1_count}). Kept the first."
                )],
            },
        );
    }

    (
        blocks,
        Validation {
            status: ValidationStatus::Pass,
            h1_count: 1,
            messages: vec![],
        },
    )
}
