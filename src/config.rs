//! Configuration options for block extraction.
//!
//! The `ExtractorConfig` struct controls extraction behavior. It derives
//! `Deserialize` so a partial JSON config file works; unknown keys are
//! ignored and missing keys fall back to the defaults.

use serde::Deserialize;

/// How eyebrow micro-labels (short kickers above a heading) are handled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EyebrowMode {
    /// Keep the paragraph and annotate it with `meta.role = "eyebrow"`.
    #[default]
    Annotate,
    /// Remove eyebrow paragraphs from the output.
    Drop,
    /// Keep eyebrow paragraphs as regular paragraphs, no annotation.
    Keep,
}

/// Configuration options for block extraction.
///
/// All fields are public for easy configuration. Use `Default::default()`
/// for standard settings.
///
/// # Example
///
/// ```rust
/// use semblocks::{EyebrowMode, ExtractorConfig};
///
/// // Use defaults
/// let config = ExtractorConfig::default();
///
/// // Customize specific fields
/// let config = ExtractorConfig {
///     eyebrow_mode: EyebrowMode::Drop,
///     ..ExtractorConfig::default()
/// };
/// ```
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ExtractorConfig {
    /// Controls eyebrow paragraph handling.
    ///
    /// Default: `EyebrowMode::Annotate`
    pub eyebrow_mode: EyebrowMode,

    /// Remove blog-feed sections when the page itself is not a blog post.
    ///
    /// Default: `true`
    pub drop_blog_feeds_on_non_blog_pages: bool,

    /// Reserved for stricter SEO validation; no current effect.
    ///
    /// Default: `false`
    pub strict_seo_mode: bool,

    /// Treat breakpoint-hidden classes (`elementor-hidden-mobile` etc.) as
    /// hidden. The default keeps that content: it is viewport-specific, not
    /// globally invisible, and SEO documents want it.
    ///
    /// Default: `false`
    pub drop_breakpoint_hidden: bool,
}

impl Default for ExtractorConfig {
    fn default() -> Self {
        Self {
            eyebrow_mode: EyebrowMode::Annotate,
            drop_blog_feeds_on_non_blog_pages: true,
            strict_seo_mode: false,
            drop_breakpoint_hidden: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config() {
        let config = ExtractorConfig::default();
        assert_eq!(config.eyebrow_mode, EyebrowMode::Annotate);
        assert!(config.drop_blog_feeds_on_non_blog_pages);
        assert!(!config.strict_seo_mode);
        assert!(!config.drop_breakpoint_hidden);
    }

    #[test]
    fn partial_json_config_keeps_defaults() {
        let config: ExtractorConfig =
            serde_json::from_str(r#"{"eyebrow_mode": "drop"}"#).unwrap();
        assert_eq!(config.eyebrow_mode, EyebrowMode::Drop);
        assert!(config.drop_blog_feeds_on_non_blog_pages);
        assert!(!config.drop_breakpoint_hidden);
    }

    #[test]
    fn unknown_keys_are_ignored() {
        let config: ExtractorConfig =
            serde_json::from_str(r#"{"future_option": 1, "drop_breakpoint_hidden": true}"#)
                .unwrap();
        assert!(config.drop_breakpoint_hidden);
    }

    #[test]
    fn eyebrow_mode_parses_all_variants() {
        for (raw, expected) in [
            ("\"annotate\"", EyebrowMode::Annotate),
            ("\"drop\"", EyebrowMode::Drop),
            ("\"keep\"", EyebrowMode::Keep),
        ] {
            let mode: EyebrowMode = serde_json::from_str(raw).unwrap();
            assert_eq!(mode, expected);
        }
    }
}
