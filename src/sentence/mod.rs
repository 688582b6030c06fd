//! Chunked-sentence representation.
//!
//! A [`ChunkedSentence`] is the typed form of one line of external-chunker
//! output: an ordered token vector plus chunk marks that tile it exactly.
//! [`Chunk`] is a read-only view over one mark.

mod parser;

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::types::{ChunkMark, Token};

/// An ordered token sequence partitioned into shallow chunks.
///
/// Invariant: the chunk marks are contiguous, non-overlapping, and cover
/// every token index exactly once. [`ChunkedSentence::parse`] establishes
/// the invariant; the mutating accessors cannot break it (marks are not
/// publicly mutable).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChunkedSentence {
    tokens: Vec<Token>,
    marks: Vec<ChunkMark>,
}

/// Read-only view of one chunk: its tag plus the covered token slice.
#[derive(Debug, Clone, Copy)]
pub struct Chunk<'a> {
    pub tag: Option<&'a str>,
    pub tokens: &'a [Token],
}

impl ChunkedSentence {
    /// Build directly from tokens and marks. Callers are responsible for
    /// the tiling invariant; prefer [`ChunkedSentence::parse`].
    pub fn from_parts(tokens: Vec<Token>, marks: Vec<ChunkMark>) -> Self {
        Self { tokens, marks }
    }

    pub fn tokens(&self) -> &[Token] {
        &self.tokens
    }

    pub fn tokens_mut(&mut self) -> &mut [Token] {
        &mut self.tokens
    }

    pub fn marks(&self) -> &[ChunkMark] {
        &self.marks
    }

    /// Number of tokens.
    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    /// Number of chunks.
    pub fn num_chunks(&self) -> usize {
        self.marks.len()
    }

    /// Token at `index`, or `None` out of range.
    pub fn token(&self, index: usize) -> Option<&Token> {
        self.tokens.get(index)
    }

    /// Chunk view at `index`, or `None` out of range.
    pub fn chunk(&self, index: usize) -> Option<Chunk<'_>> {
        let mark = self.marks.get(index)?;
        let tokens = self.tokens.get(mark.start..=mark.end)?;
        Some(Chunk {
            tag: mark.tag.as_deref(),
            tokens,
        })
    }

    /// Iterate over all chunk views in order.
    pub fn chunks(&self) -> impl Iterator<Item = Chunk<'_>> {
        (0..self.marks.len()).filter_map(|i| self.chunk(i))
    }

    /// Index of the chunk containing token `index`, or `None`.
    pub fn chunk_of_token(&self, index: usize) -> Option<usize> {
        self.marks
            .iter()
            .position(|m| m.start <= index && index <= m.end)
    }

    /// Canonical (regex-matchable) string form: each chunk rendered as
    /// `tag:<w1/T1 w2/T2>:tag` with a lowercased tag, space-joined.
    /// Untagged chunks (punctuation, the `end/end` sentinel) render
    /// their `w/T` pairs bare.
    pub fn canonical(&self) -> String {
        self.chunks()
            .map(|c| c.canonical())
            .collect::<Vec<_>>()
            .join(" ")
    }
}

impl<'a> Chunk<'a> {
    /// Number of tokens in the chunk.
    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    /// Effective tag for rendering: the chunk tag, or `PUNCT` when the
    /// tag is undefined.
    fn display_tag(&self) -> &str {
        self.tag.unwrap_or("PUNCT")
    }

    /// Canonical `tag:<...>:tag` form (lowercased tag). Untagged chunks
    /// render their tokens bare, so singleton material outside any
    /// chunk (punctuation, sentinels such as `end/end`) stays matchable
    /// by positional rule fragments.
    pub fn canonical(&self) -> String {
        let body = self
            .tokens
            .iter()
            .map(Token::to_pair)
            .collect::<Vec<_>>()
            .join(" ");
        match self.tag {
            Some(tag) => {
                let tag = tag.to_lowercase();
                format!("{tag}:<{body}>:{tag}")
            }
            None => body,
        }
    }
}

impl fmt::Display for Chunk<'_> {
    /// Bracketed form `[NP w1/T1 w2/T2]`; singleton undefined-tag chunks
    /// render as `[PUNCT tok/POS]`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let body = self
            .tokens
            .iter()
            .map(Token::to_pair)
            .collect::<Vec<_>>()
            .join(" ");
        write!(f, "[{} {}]", self.display_tag(), body)
    }
}

impl fmt::Display for ChunkedSentence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let parts: Vec<String> = self.chunks().map(|c| c.to_string()).collect();
        write!(f, "{}", parts.join(" "))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_chunk_views() {
        let s = ChunkedSentence::parse("[NP the/DT dog/NN] ran/VBD").unwrap();
        assert_eq!(s.len(), 3);
        assert_eq!(s.num_chunks(), 2);

        let np = s.chunk(0).unwrap();
        assert_eq!(np.tag, Some("NP"));
        assert_eq!(np.len(), 2);
        assert_eq!(np.tokens[1].surface, "dog");

        let singleton = s.chunk(1).unwrap();
        assert_eq!(singleton.tag, None);
        assert_eq!(singleton.tokens[0].surface, "ran");
    }

    #[test]
    fn test_out_of_range_is_none() {
        let s = ChunkedSentence::parse("ran/VBD").unwrap();
        assert!(s.chunk(1).is_none());
        assert!(s.token(5).is_none());
        assert_eq!(s.chunk_of_token(5), None);
    }

    #[test]
    fn test_chunk_of_token() {
        let s = ChunkedSentence::parse("[NP the/DT dog/NN] [VP ran/VBD]").unwrap();
        assert_eq!(s.chunk_of_token(0), Some(0));
        assert_eq!(s.chunk_of_token(1), Some(0));
        assert_eq!(s.chunk_of_token(2), Some(1));
    }

    #[test]
    fn test_display_form() {
        let s = ChunkedSentence::parse("[NP the/DT dog/NN] ./.").unwrap();
        assert_eq!(s.to_string(), "[NP the/DT dog/NN] [PUNCT ./.]");
    }

    #[test]
    fn test_canonical_form() {
        let s = ChunkedSentence::parse("[NP the/DT dog/NN] [VP ran/VBD]").unwrap();
        assert_eq!(
            s.canonical(),
            "np:<the/DT dog/NN>:np vp:<ran/VBD>:vp"
        );
    }

    #[test]
    fn test_canonical_end_sentinel_passes_through() {
        let s = ChunkedSentence::parse("[VP ran/VBD] end/end").unwrap();
        assert_eq!(s.canonical(), "vp:<ran/VBD>:vp end/end");
    }

    #[test]
    fn test_serde_round_trip() {
        let s = ChunkedSentence::parse("[NP the/DT dog/NN] ran/VBD").unwrap();
        let json = serde_json::to_string(&s).unwrap();
        let back: ChunkedSentence = serde_json::from_str(&json).unwrap();
        assert_eq!(s, back);
    }
}
