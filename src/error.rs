//! Error types for semblocks.
//!
//! Extraction itself never fails: malformed HTML parses leniently and every
//! internal failure degrades to an empty result. Errors exist only at the
//! boundaries - reading input, parsing a config file, writing output.

/// Error type for boundary operations (CLI, config loading).
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// File input/output failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Config file was present but not valid JSON for `ExtractorConfig`.
    #[error("invalid config: {0}")]
    Config(serde_json::Error),

    /// Output document failed to serialize.
    #[error("JSON serialization failed: {0}")]
    Serialize(serde_json::Error),
}

/// Result type alias for boundary operations.
pub type Result<T> = std::result::Result<T, Error>;
