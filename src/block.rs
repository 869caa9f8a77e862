//! Output document model.
//!
//! A `SemanticDocument` is what one extraction pass produces: page metadata,
//! an ordered sequence of semantic `Block`s in reading order, and a
//! validation summary. Blocks are a tagged enum serialized with a `type`
//! discriminant; field declaration order fixes the JSON key order, which
//! keeps repeated runs byte-identical.

use serde::Serialize;

/// The extracted document: metadata, blocks in reading order, validation.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SemanticDocument {
    pub source: Source,
    pub blocks: Vec<Block>,
    pub validation: Validation,
}

/// Page-level metadata pulled from `<head>`. Fields are empty when absent.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Source {
    pub url: String,
    pub title: String,
    pub canonical: String,
    pub meta_description: String,
}

/// Validation summary for the extracted block sequence.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Validation {
    pub status: ValidationStatus,
    pub h1_count: usize,
    pub messages: Vec<String>,
}

/// Whether validation passed cleanly or recorded warnings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ValidationStatus {
    Pass,
    Warn,
}

/// One semantic content block.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Block {
    Heading {
        level: u8,
        text: String,
    },
    Paragraph {
        text: String,
        #[serde(skip_serializing_if = "Option::is_none")]
        meta: Option<BlockMeta>,
    },
    List {
        ordered: bool,
        items: Vec<String>,
    },
    Table {
        rows: Vec<Vec<String>>,
    },
    Cta {
        text: String,
        #[serde(skip_serializing_if = "Option::is_none")]
        href: Option<String>,
        #[serde(skip_serializing_if = "Option::is_none")]
        meta: Option<BlockMeta>,
    },
    Accordion {
        title: String,
        content_blocks: Vec<Block>,
    },
    Faq {
        question: String,
        answer_blocks: Vec<Block>,
    },
    Tabset {
        tabs: Vec<Tab>,
    },
}

/// One tab of a tabset.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Tab {
    pub title: String,
    pub content_blocks: Vec<Block>,
}

/// Optional block annotation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct BlockMeta {
    pub role: MetaRole,
}

/// The recognized annotation roles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum MetaRole {
    /// A short kicker label that precedes a heading.
    Eyebrow,
    /// A fragment link that routes within the page.
    Router,
}

impl Block {
    /// The flat text carried directly by this block, if the variant has one.
    /// Used to filter panel-title echoes out of pseudo-tabset content.
    #[must_use]
    pub fn own_text(&self) -> Option<&str> {
        match self {
            Block::Heading { text, .. } | Block::Paragraph { text, .. } | Block::Cta { text, .. } => {
                Some(text)
            }
            _ => None,
        }
    }

    /// Convenience constructor for a plain paragraph.
    #[must_use]
    pub fn paragraph(text: impl Into<String>) -> Self {
        Block::Paragraph {
            text: text.into(),
            meta: None,
        }
    }

    /// Convenience constructor for a heading.
    #[must_use]
    pub fn heading(level: u8, text: impl Into<String>) -> Self {
        Block::Heading {
            level,
            text: text.into(),
        }
    }
}
