//! Error types for fallible parsing.
//!
//! Numeric degeneracies in the similarity engines never error — they fall
//! back to the documented zero/sentinel values. Errors exist only where
//! textual input can be malformed: chunked-sentence markup and rule
//! condition strings.

use thiserror::Error;

/// Failure to parse the external chunker's bracketed markup.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    /// A `[TAG ...` group was opened but never closed.
    #[error("unclosed chunk bracket starting at offset {offset}")]
    UnclosedChunk { offset: usize },

    /// A bracket group contained a tag but no tokens.
    #[error("empty chunk `[{tag}]` at offset {offset}")]
    EmptyChunk { tag: String, offset: usize },

    /// A bracket group opened without a tag (`[ ...`).
    #[error("chunk without a tag at offset {offset}")]
    MissingChunkTag { offset: usize },
}

/// Failure to parse an ILP-style rule condition string.
///
/// A rule either compiles in full or is rejected with one of these
/// variants; no partially-built rule is ever returned.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RuleParseError {
    /// The rule string did not end with the terminal `.`.
    #[error("rule string does not end with `.`")]
    MissingTerminator,

    /// The rule string contained no conditions at all.
    #[error("rule string contains no conditions")]
    Empty,

    /// A single condition literal did not match any known form.
    #[error("condition {index} is malformed: `{text}`")]
    BadCondition { index: usize, text: String },

    /// A positional condition used position 0 or a sign the region
    /// does not allow (only `center:x` positions may be negative).
    #[error("condition {index} has invalid position {position} for region `{region}`")]
    BadPosition {
        index: usize,
        region: String,
        position: i32,
    },

    /// A multi-chunk tag (`np-vp` or `np*vp`) appeared outside the
    /// center region, where only single chunk tags are meaningful.
    #[error("condition {index} uses a multi-chunk tag `{tag}` outside the center region")]
    MultiChunkOutsideCenter { index: usize, tag: String },
}
