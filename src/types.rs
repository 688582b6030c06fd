//! Core data types: tokens and chunk marks.
//!
//! A [`Token`] pairs an immutable surface string with three mutable integer
//! codes (lexical, POS, chunk), each [`UNCODED`] until a codification pass
//! assigns it. A [`ChunkMark`] records one contiguous chunk span over a
//! sentence's token vector.

use serde::{Deserialize, Serialize};

/// Sentinel for a code that has not been assigned.
pub const UNCODED: i32 = -1;

/// POS tag assigned to tokens whose `token/TAG` pair could not be parsed.
pub const UNDEF_TAG: &str = "UNDEF";

/// One token of a chunked sentence.
///
/// The surface string is fixed at construction; the three codes are filled
/// in by explicit codification passes (lexicon, tag-set lookup, alignment
/// back-fill) and stay [`UNCODED`] until then.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Token {
    /// Surface form as produced by the tokenizer.
    pub surface: String,
    /// POS tag string from the external tagger, if any.
    pub pos_tag: Option<String>,
    /// Vocabulary index assigned by a [`Lexicon`](crate::Lexicon).
    pub lex_code: i32,
    /// POS tag-set code.
    pub pos_code: i32,
    /// Chunk tag-set code.
    pub chunk_code: i32,
}

impl Token {
    /// Create a token with an explicit POS tag and no codes assigned.
    pub fn new(surface: impl Into<String>, pos_tag: impl Into<String>) -> Self {
        Self {
            surface: surface.into(),
            pos_tag: Some(pos_tag.into()),
            lex_code: UNCODED,
            pos_code: UNCODED,
            chunk_code: UNCODED,
        }
    }

    /// Parse a `token/TAG` pair as emitted by the external tagger.
    ///
    /// The split is on the *last* slash so fraction-like surfaces
    /// (`3/4/CD`) keep their slashes. A pair with no slash at all is
    /// recoverable: the whole string becomes the surface, the POS tag is
    /// set to [`UNDEF_TAG`], and a warning is logged.
    pub fn from_pair(pair: &str) -> Self {
        match pair.rsplit_once('/') {
            Some((surface, tag)) if !surface.is_empty() => Self::new(surface, tag),
            _ => {
                crate::input_warn!(pair, "token without a /TAG separator");
                Self::new(pair, UNDEF_TAG)
            }
        }
    }

    /// Gap placeholder used inside alignments, rendered as an underscore
    /// run sized to the token it is aligned against.
    pub fn gap(width: usize) -> Self {
        Self {
            surface: "_".repeat(width.max(1)),
            pos_tag: None,
            lex_code: UNCODED,
            pos_code: UNCODED,
            chunk_code: UNCODED,
        }
    }

    /// Whether this token is a gap placeholder.
    pub fn is_gap(&self) -> bool {
        !self.surface.is_empty() && self.surface.chars().all(|c| c == '_')
    }

    /// Whether the surface looks like a real word: first character
    /// alphabetic, last character alphanumeric. Excludes gap placeholders
    /// and pure punctuation.
    pub fn is_true_word(&self) -> bool {
        let mut chars = self.surface.chars();
        let first = match chars.next() {
            Some(c) => c,
            None => return false,
        };
        let last = self.surface.chars().next_back().unwrap_or(first);
        first.is_alphabetic() && last.is_alphanumeric()
    }

    /// Render the token back into `surface/TAG` form.
    pub fn to_pair(&self) -> String {
        match &self.pos_tag {
            Some(tag) => format!("{}/{}", self.surface, tag),
            None => self.surface.clone(),
        }
    }
}

/// One chunk span over a sentence: inclusive `[start, end]` token indices
/// plus the chunk tag (`None` for implicit singleton chunks).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChunkMark {
    pub start: usize,
    pub end: usize,
    pub tag: Option<String>,
}

impl ChunkMark {
    pub fn new(start: usize, end: usize, tag: Option<String>) -> Self {
        Self { start, end, tag }
    }

    /// Number of tokens covered by this mark.
    pub fn len(&self) -> usize {
        self.end - self.start + 1
    }

    pub fn is_empty(&self) -> bool {
        false // marks always cover at least one token
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_pair_splits_on_last_slash() {
        let t = Token::from_pair("3/4/CD");
        assert_eq!(t.surface, "3/4");
        assert_eq!(t.pos_tag.as_deref(), Some("CD"));
    }

    #[test]
    fn test_from_pair_malformed_gets_undef_tag() {
        let t = Token::from_pair("dog");
        assert_eq!(t.surface, "dog");
        assert_eq!(t.pos_tag.as_deref(), Some(UNDEF_TAG));
        assert_eq!(t.pos_code, UNCODED);
        assert_eq!(t.chunk_code, UNCODED);
    }

    #[test]
    fn test_gap_token() {
        let g = Token::gap(3);
        assert_eq!(g.surface, "___");
        assert!(g.is_gap());
        assert!(!g.is_true_word());
    }

    #[test]
    fn test_gap_width_zero_still_renders() {
        assert_eq!(Token::gap(0).surface, "_");
    }

    #[test]
    fn test_true_word_classification() {
        assert!(Token::from_pair("dog/NN").is_true_word());
        assert!(Token::from_pair("B2/NN").is_true_word());
        assert!(!Token::from_pair("./.").is_true_word());
        assert!(!Token::from_pair(",/,").is_true_word());
        assert!(!Token::from_pair("'s/POS").is_true_word());
    }

    #[test]
    fn test_to_pair_round_trip() {
        let t = Token::from_pair("ran/VBD");
        assert_eq!(t.to_pair(), "ran/VBD");
    }

    #[test]
    fn test_chunk_mark_len() {
        assert_eq!(ChunkMark::new(2, 4, Some("NP".into())).len(), 3);
        assert_eq!(ChunkMark::new(1, 1, None).len(), 1);
    }
}
