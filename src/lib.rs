//! # semblocks
//!
//! HTML to semantic block JSON extraction.
//!
//! This library turns a rendered HTML document into a structured,
//! reading-order sequence of semantic content blocks (headings, paragraphs,
//! lists, tables, CTAs, accordions, FAQs, tabsets), stripped of chrome,
//! decoration, and page-wide UI. It feeds SEO and LLM-ingestion pipelines:
//! output is deterministic, language-neutral, and robust across real-world
//! CMS markup, Elementor and WordPress block-editor dialects included.
//!
//! ## Quick Start
//!
//! ```rust
//! use semblocks::extract;
//!
//! let html = r#"<html><body><main>
//!     <h1>Hi</h1><p>Hello world.</p>
//! </main></body></html>"#;
//!
//! let document = extract(html);
//! assert_eq!(document.blocks.len(), 2);
//! assert_eq!(document.validation.h1_count, 1);
//! ```
//!
//! ## Pipeline
//!
//! Extraction is a pure function of the input plus configuration:
//! main-content selection, chrome/decoration pruning, counter-widget
//! rewriting, a recursive block walk that recognizes interactive
//! composites, then post-processing (eyebrows, blog-feed removal,
//! grid fallback, dedupe) and H1 validation. Malformed input never
//! errors; degraded inputs degrade to empty blocks with a warning.

mod classify;
mod config;
mod counters;
mod error;
mod extractor;
mod metadata;
mod postprocess;
mod prune;
mod select;
mod url_utils;

/// Output document model (blocks, source metadata, validation).
pub mod block;

/// DOM helpers over the `dom_query` tree.
pub mod dom;

/// Charset detection and transcoding to UTF-8.
pub mod encoding;

/// Regex patterns and class-pattern inventories.
pub mod patterns;

/// Visibility predicates and visible-text collection.
pub mod visibility;

// Public API - re-exports
pub use block::{
    Block, BlockMeta, MetaRole, SemanticDocument, Source, Tab, Validation, ValidationStatus,
};
pub use config::{ExtractorConfig, EyebrowMode};
pub use error::{Error, Result};

use dom::Document;
use extractor::Walker;

/// Extract semantic blocks from an HTML document using default settings.
///
/// Always returns a document: malformed HTML parses leniently, and inputs
/// with no usable content yield empty blocks plus a validation warning.
#[must_use]
pub fn extract(html: &str) -> SemanticDocument {
    extract_with_config(html, &ExtractorConfig::default())
}

/// Extract semantic blocks with custom configuration.
#[must_use]
pub fn extract_with_config(html: &str, config: &ExtractorConfig) -> SemanticDocument {
    let doc = Document::from(html);
    let source = metadata::extract_source(&doc);

    let Some(main) = select::find_main_content(&doc, config) else {
        return SemanticDocument {
            source,
            blocks: Vec::new(),
            validation: Validation {
                status: ValidationStatus::Warn,
                h1_count: 0,
                messages: vec!["No H1 found in extracted blocks.".to_string()],
            },
        };
    };

    // Work on a re-parsed clone of the main-content subtree so pruning and
    // counter rewriting never touch the caller-visible document.
    let main_tag = dom::tag_name(&main);
    let content_doc = Document::from(dom::outer_html(&main));
    let root = content_doc
        .select(&main_tag)
        .nodes()
        .first()
        .cloned()
        .or_else(|| content_doc.select("body").nodes().first().cloned());
    let Some(root) = root else {
        return SemanticDocument {
            source,
            blocks: Vec::new(),
            validation: Validation {
                status: ValidationStatus::Warn,
                h1_count: 0,
                messages: vec!["No H1 found in extracted blocks.".to_string()],
            },
        };
    };

    prune::prune_tree(&root, config);
    counters::rewrite_counters(&root, config);

    let is_blog_post = classify::is_blog_post_url(&source.url);
    let skip_blog_feeds = config.drop_blog_feeds_on_non_blog_pages && !is_blog_post;

    let mut walker = Walker::new(root, config, &source.canonical, skip_blog_feeds);
    let blocks = walker.extract();

    let blocks = postprocess::annotate_eyebrows(blocks, config.eyebrow_mode);
    let blocks = postprocess::normalize_h5_h6_eyebrows(blocks, config.eyebrow_mode);
    let blocks = postprocess::remove_blog_feed_sections(blocks, is_blog_post);
    let blocks = postprocess::section_scoped_grid_fallback(blocks);
    let blocks = postprocess::deduplicate_blocks(blocks);
    let (blocks, validation) = postprocess::validate_h1(blocks);

    SemanticDocument {
        source,
        blocks,
        validation,
    }
}

/// Extract from raw bytes with automatic charset detection.
///
/// Charset is sniffed from `<meta charset>` / `http-equiv` declarations;
/// invalid sequences are replaced rather than failing.
#[must_use]
pub fn extract_bytes(html: &[u8]) -> SemanticDocument {
    extract_bytes_with_config(html, &ExtractorConfig::default())
}

/// Extract from raw bytes with custom configuration.
#[must_use]
pub fn extract_bytes_with_config(html: &[u8], config: &ExtractorConfig) -> SemanticDocument {
    let html = encoding::transcode_to_utf8(html);
    extract_with_config(&html, config)
}
