//! Parser for the external chunker's bracketed notation.
//!
//! Input lines look like `[NP the/DT dog/NN] ran/VBD ./.` — bracket groups
//! are multi-token chunks; bare `token/TAG` pairs outside brackets become
//! implicit singleton chunks with an undefined chunk tag.

use crate::error::ParseError;
use crate::types::{ChunkMark, Token};

use super::ChunkedSentence;

impl ChunkedSentence {
    /// Parse one chunked line into tokens and chunk marks.
    ///
    /// Malformed `token/TAG` pairs are recoverable (see
    /// [`Token::from_pair`]); structural problems with the bracket groups
    /// are not and produce a [`ParseError`].
    pub fn parse(line: &str) -> Result<Self, ParseError> {
        let mut tokens: Vec<Token> = Vec::new();
        let mut marks: Vec<ChunkMark> = Vec::new();

        let mut rest = line;
        let mut offset = 0;

        while let Some(stripped) = eat_spaces(rest, &mut offset) {
            rest = stripped;
            if let Some(body) = rest.strip_prefix('[') {
                let open_offset = offset;
                let close = body
                    .find(']')
                    .ok_or(ParseError::UnclosedChunk { offset: open_offset })?;
                let group = &body[..close];
                parse_group(group, open_offset, &mut tokens, &mut marks)?;
                offset += 1 + close + 1;
                rest = &body[close + 1..];
            } else {
                let end = rest.find(char::is_whitespace).unwrap_or(rest.len());
                let pair = &rest[..end];
                let start = tokens.len();
                tokens.push(Token::from_pair(pair));
                marks.push(ChunkMark::new(start, start, None));
                offset += end;
                rest = &rest[end..];
            }
        }

        Ok(Self { tokens, marks })
    }
}

/// Parse the inside of one `[TAG tok/T ...]` group.
fn parse_group(
    group: &str,
    offset: usize,
    tokens: &mut Vec<Token>,
    marks: &mut Vec<ChunkMark>,
) -> Result<(), ParseError> {
    let mut parts = group.split_whitespace();
    let tag = parts
        .next()
        .ok_or(ParseError::MissingChunkTag { offset })?;
    if tag.contains('/') {
        // First item is a token, not a tag: the group opened without one.
        return Err(ParseError::MissingChunkTag { offset });
    }

    let start = tokens.len();
    for pair in parts {
        tokens.push(Token::from_pair(pair));
    }
    if tokens.len() == start {
        return Err(ParseError::EmptyChunk {
            tag: tag.to_string(),
            offset,
        });
    }
    marks.push(ChunkMark::new(start, tokens.len() - 1, Some(tag.to_string())));
    Ok(())
}

/// Strip leading whitespace, tracking the byte offset; `None` at end.
fn eat_spaces<'a>(s: &'a str, offset: &mut usize) -> Option<&'a str> {
    let trimmed = s.trim_start();
    *offset += s.len() - trimmed.len();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed)
    }
}
