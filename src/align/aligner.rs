//! Alignment construction and code enrichment.
//!
//! The aligner never mutates its input sentences: codes are filled into
//! the alignment's own tokens, and callers opt in to writing them back
//! with [`Alignment::apply_codes`].

use serde::{Deserialize, Serialize};

use crate::lexicon::Lexicon;
use crate::sentence::ChunkedSentence;
use crate::tagset::TagSet;
use crate::types::{Token, UNCODED};

use super::global::global_align;
use super::segment::{segment_runs, SegRun};

/// One aligned position: the token (gap placeholder or an enriched copy
/// of a source token) plus the index it came from in its source sentence.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AlignedToken {
    pub token: Token,
    /// Index in the originating sentence; `None` for gaps.
    pub source: Option<usize>,
}

impl AlignedToken {
    fn gap(width: usize) -> Self {
        Self {
            token: Token::gap(width),
            source: None,
        }
    }
}

/// Two equal-length rows of aligned tokens; position `k` of `wa` pairs
/// with position `k` of `wb`, gaps rendered as underscore runs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Alignment {
    pub wa: Vec<AlignedToken>,
    pub wb: Vec<AlignedToken>,
}

impl Alignment {
    /// Alignment length (both rows, by invariant).
    pub fn len(&self) -> usize {
        self.wa.len()
    }

    pub fn is_empty(&self) -> bool {
        self.wa.is_empty()
    }

    /// Partition into signed agreement/disagreement runs.
    pub fn segment_runs(&self) -> Vec<SegRun> {
        segment_runs(self)
    }

    /// Space-joined surface row for the first sentence.
    pub fn wa_line(&self) -> String {
        row_line(&self.wa)
    }

    /// Space-joined surface row for the second sentence.
    pub fn wb_line(&self) -> String {
        row_line(&self.wb)
    }

    /// Write the alignment's lexical/POS/chunk codes back into the source
    /// sentences. Opt-in mutation; positions whose source token is gone
    /// (out of range) are skipped.
    pub fn apply_codes(&self, a: &mut ChunkedSentence, b: &mut ChunkedSentence) {
        apply_row(&self.wa, a);
        apply_row(&self.wb, b);
    }
}

fn row_line(row: &[AlignedToken]) -> String {
    row.iter()
        .map(|t| t.token.surface.as_str())
        .collect::<Vec<_>>()
        .join(" ")
}

fn apply_row(row: &[AlignedToken], sentence: &mut ChunkedSentence) {
    for at in row {
        if let Some(idx) = at.source {
            if let Some(token) = sentence.tokens_mut().get_mut(idx) {
                token.lex_code = at.token.lex_code;
                token.pos_code = at.token.pos_code;
                token.chunk_code = at.token.chunk_code;
            }
        }
    }
}

/// Builds code-enriched alignments between chunked sentences.
#[derive(Debug, Clone)]
pub struct Aligner {
    pos_tags: TagSet,
    chunk_tags: TagSet,
}

impl Default for Aligner {
    fn default() -> Self {
        Self::new()
    }
}

impl Aligner {
    /// Aligner with the built-in Penn POS and shallow-chunk tag sets.
    pub fn new() -> Self {
        Self {
            pos_tags: TagSet::penn_pos(),
            chunk_tags: TagSet::chunk_tags(),
        }
    }

    /// Aligner with custom tag sets.
    pub fn with_tag_sets(pos_tags: TagSet, chunk_tags: TagSet) -> Self {
        Self {
            pos_tags,
            chunk_tags,
        }
    }

    /// Globally align two sentences and enrich every non-gap position
    /// with lexical (via `lexicon`, adding words on the fly), POS, and
    /// chunk codes. The input sentences are not mutated.
    pub fn align(
        &self,
        a: &ChunkedSentence,
        b: &ChunkedSentence,
        lexicon: &mut Lexicon,
    ) -> Alignment {
        let pairs = global_align(a.tokens(), b.tokens());
        let mut wa = Vec::with_capacity(pairs.len());
        let mut wb = Vec::with_capacity(pairs.len());

        for (ia, ib) in pairs {
            match (ia, ib) {
                (Some(i), Some(j)) => {
                    wa.push(self.enrich(a, i, lexicon));
                    wb.push(self.enrich(b, j, lexicon));
                }
                (Some(i), None) => {
                    let at = self.enrich(a, i, lexicon);
                    wb.push(AlignedToken::gap(at.token.surface.chars().count()));
                    wa.push(at);
                }
                (None, Some(j)) => {
                    let bt = self.enrich(b, j, lexicon);
                    wa.push(AlignedToken::gap(bt.token.surface.chars().count()));
                    wb.push(bt);
                }
                (None, None) => {}
            }
        }
        Alignment { wa, wb }
    }

    /// Copy token `idx` of `sentence` with all three codes filled in.
    fn enrich(
        &self,
        sentence: &ChunkedSentence,
        idx: usize,
        lexicon: &mut Lexicon,
    ) -> AlignedToken {
        let mut token = match sentence.token(idx) {
            Some(t) => t.clone(),
            None => return AlignedToken::gap(1),
        };
        token.lex_code = lexicon.add(&token.surface);
        token.pos_code = token
            .pos_tag
            .as_deref()
            .map_or(UNCODED, |t| self.pos_tags.code(t));
        token.chunk_code = sentence
            .chunk_of_token(idx)
            .and_then(|ci| sentence.marks().get(ci))
            .and_then(|m| m.tag.as_deref())
            .map_or(UNCODED, |t| self.chunk_tags.code(t));
        AlignedToken {
            token,
            source: Some(idx),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sentences() -> (ChunkedSentence, ChunkedSentence) {
        (
            ChunkedSentence::parse("[NP the/DT cat/NN] [VP sat/VBD]").unwrap(),
            ChunkedSentence::parse("[NP the/DT black/JJ cat/NN] [VP sat/VBD]").unwrap(),
        )
    }

    #[test]
    fn test_rows_have_equal_length() {
        let (a, b) = sentences();
        let mut lex = Lexicon::new();
        let al = Aligner::new().align(&a, &b, &mut lex);
        assert_eq!(al.wa.len(), al.wb.len());
        assert_eq!(al.len(), 4);
    }

    #[test]
    fn test_gap_rendered_as_underscore_run() {
        let (a, b) = sentences();
        let mut lex = Lexicon::new();
        let al = Aligner::new().align(&a, &b, &mut lex);
        // "black" is unmatched; the a row carries a 5-wide gap.
        let gap = al.wa.iter().find(|t| t.token.is_gap()).unwrap();
        assert_eq!(gap.token.surface, "_____");
        assert_eq!(gap.source, None);
        assert!(al.wa_line().contains("_____"));
        assert!(al.wb_line().contains("black"));
    }

    #[test]
    fn test_codes_enriched_on_non_gap_positions() {
        let (a, b) = sentences();
        let mut lex = Lexicon::new();
        let al = Aligner::new().align(&a, &b, &mut lex);
        for at in al.wa.iter().chain(al.wb.iter()) {
            if at.source.is_some() {
                assert_ne!(at.token.lex_code, UNCODED);
                assert_ne!(at.token.pos_code, UNCODED);
                assert_ne!(at.token.chunk_code, UNCODED);
            } else {
                assert_eq!(at.token.lex_code, UNCODED);
            }
        }
    }

    #[test]
    fn test_align_does_not_mutate_inputs() {
        let (a, b) = sentences();
        let (a0, b0) = (a.clone(), b.clone());
        let mut lex = Lexicon::new();
        let _ = Aligner::new().align(&a, &b, &mut lex);
        assert_eq!(a, a0);
        assert_eq!(b, b0);
    }

    #[test]
    fn test_apply_codes_is_opt_in() {
        let (mut a, mut b) = sentences();
        let mut lex = Lexicon::new();
        let al = Aligner::new().align(&a, &b, &mut lex);
        assert!(a.tokens().iter().all(|t| t.lex_code == UNCODED));
        al.apply_codes(&mut a, &mut b);
        assert!(a.tokens().iter().all(|t| t.lex_code != UNCODED));
        assert!(b.tokens().iter().all(|t| t.lex_code != UNCODED));
        // Shared lexicon: "the" codes identically on both sides.
        assert_eq!(a.tokens()[0].lex_code, b.tokens()[0].lex_code);
    }

    #[test]
    fn test_matching_positions_share_lex_codes() {
        let (a, b) = sentences();
        let mut lex = Lexicon::new();
        let al = Aligner::new().align(&a, &b, &mut lex);
        for k in 0..al.len() {
            let (ta, tb) = (&al.wa[k].token, &al.wb[k].token);
            if ta.surface.eq_ignore_ascii_case(&tb.surface) {
                assert_eq!(ta.lex_code, tb.lex_code);
            }
        }
    }
}
