//! Paraphrase-bubble extraction.
//!
//! A bubble is one interior disagreement run of an alignment (the
//! "kernel") together with its flanking agreement context. The plain
//! extractor scores `left + middle + right` against a caller threshold;
//! the boundary-aware variant recognizes depressions touching a real
//! sentence edge and doubles the present flank's value instead of
//! penalizing the missing one.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::types::Token;

use super::aligner::{AlignedToken, Alignment};
use super::segment::SegRun;

/// Typed sentence-boundary markers.
///
/// The upstream sentence pairer injects explicit begin/end sentinel
/// tokens; matching them here is a configuration concern, not a magic
/// string convention baked into the extractor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BoundaryMarkers {
    /// Sentinel token marking the absolute sentence start.
    pub begin_token: String,
    /// Sentinel tokens marking the sentence end.
    pub end_tokens: Vec<String>,
    /// Characters that close a sentence when they end the last token.
    pub end_punctuation: Vec<char>,
}

impl Default for BoundaryMarkers {
    fn default() -> Self {
        Self {
            begin_token: "XBEGIN".to_string(),
            end_tokens: vec!["XEND".to_string()],
            end_punctuation: vec!['.', '!', '?'],
        }
    }
}

impl BoundaryMarkers {
    /// Whether `surface` is the begin sentinel.
    pub fn is_begin(&self, surface: &str) -> bool {
        surface == self.begin_token
    }

    /// Whether `surface` closes a sentence: an end sentinel, or a token
    /// whose final character is end punctuation.
    pub fn is_end(&self, surface: &str) -> bool {
        if self.end_tokens.iter().any(|t| t == surface) {
            return true;
        }
        surface
            .chars()
            .next_back()
            .is_some_and(|c| self.end_punctuation.contains(&c))
    }
}

/// One extracted bubble: reliable context on both sides of a pair of
/// kernel rows (equal length, possibly containing gap placeholders).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Bubble {
    /// Left-context tokens, in sentence order.
    pub left: Vec<Token>,
    /// Kernel row from the first sentence.
    pub kernel_a: Vec<Token>,
    /// Kernel row from the second sentence.
    pub kernel_b: Vec<Token>,
    /// Right-context tokens, in sentence order.
    pub right: Vec<Token>,
    /// Combined run value that admitted the bubble.
    pub score: f64,
}

impl fmt::Display for Bubble {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let join = |ts: &[Token]| {
            ts.iter()
                .map(|t| t.surface.as_str())
                .collect::<Vec<_>>()
                .join(" ")
        };
        write!(
            f,
            "{} [ {} | {} ] {}",
            join(&self.left),
            join(&self.kernel_a),
            join(&self.kernel_b),
            join(&self.right)
        )
    }
}

/// Extracts bubbles from alignments. Pure function of the alignment and
/// thresholds: extracting twice yields identical results.
#[derive(Debug, Clone, Default)]
pub struct BubbleExtractor {
    markers: BoundaryMarkers,
}

impl BubbleExtractor {
    pub fn new() -> Self {
        Self::default()
    }

    /// Use custom boundary markers for the boundary-aware variant.
    pub fn with_markers(mut self, markers: BoundaryMarkers) -> Self {
        self.markers = markers;
        self
    }

    /// Extract every interior depression whose combined value
    /// `left + middle + right` reaches `min_value` (conventionally 0).
    pub fn extract(&self, alignment: &Alignment, min_value: f64) -> Vec<Bubble> {
        let runs = alignment.segment_runs();
        let mut bubbles = Vec::new();
        if runs.len() < 3 {
            return bubbles;
        }

        for i in 1..runs.len() - 1 {
            let (left, mid, right) = (runs[i - 1], runs[i], runs[i + 1]);
            if mid.value >= 0.0 || left.value == 0.0 || right.value == 0.0 {
                continue;
            }
            let total = mid.value + left.value + right.value;
            if total < min_value {
                continue;
            }
            if let Some(bubble) = self.build(alignment, left, mid, right, total) {
                bubbles.push(bubble);
            }
        }
        bubbles
    }

    /// Boundary-aware extraction: skips the outermost runs entirely, and
    /// for depressions touching a true sentence edge substitutes the
    /// missing flank's value with double the present one, accepting at
    /// `total >= 0` regardless of `min_value`.
    pub fn extract_with_boundaries(
        &self,
        alignment: &Alignment,
        min_value: f64,
    ) -> Vec<Bubble> {
        let runs = alignment.segment_runs();
        let mut bubbles = Vec::new();
        if runs.len() < 4 {
            return bubbles;
        }

        for i in 1..runs.len() - 1 {
            let (left, mid, right) = (runs[i - 1], runs[i], runs[i + 1]);
            if mid.value >= 0.0 {
                continue;
            }

            let at_left_edge = left.a == 0 && self.markers.is_begin(surface_at(alignment, left.a));
            let last = alignment.len() - 1;
            let at_right_edge =
                right.b == last && self.markers.is_end(surface_at(alignment, right.b));

            let lv = if at_left_edge { 2.0 * right.value } else { left.value };
            let rv = if at_right_edge { 2.0 * left.value } else { right.value };
            let threshold = if at_left_edge || at_right_edge {
                0.0
            } else {
                min_value
            };

            let total = mid.value + lv + rv;
            if total < threshold {
                continue;
            }
            if let Some(bubble) = self.build(alignment, left, mid, right, total) {
                bubbles.push(bubble);
            }
        }
        bubbles
    }

    /// Assemble a bubble, or `None` when neither kernel row contains a
    /// true word.
    fn build(
        &self,
        alignment: &Alignment,
        left: SegRun,
        mid: SegRun,
        right: SegRun,
        score: f64,
    ) -> Option<Bubble> {
        let kernel_a: Vec<Token> = alignment.wa[mid.a..=mid.b]
            .iter()
            .map(|t| t.token.clone())
            .collect();
        let kernel_b: Vec<Token> = alignment.wb[mid.a..=mid.b]
            .iter()
            .map(|t| t.token.clone())
            .collect();

        let words_a = kernel_a.iter().filter(|t| t.is_true_word()).count();
        let words_b = kernel_b.iter().filter(|t| t.is_true_word()).count();
        if words_a == 0 && words_b == 0 {
            return None;
        }

        let left_len = if left.value == 0.0 { 0 } else { left.len() };
        let right_len = if right.value == 0.0 { 0 } else { right.len() };

        Some(Bubble {
            left: context_tokens(alignment, mid.a - left_len, mid.a),
            kernel_a,
            kernel_b,
            right: context_tokens(alignment, mid.b + 1, mid.b + 1 + right_len),
            score,
        })
    }
}

/// Surface at an alignment position, preferring the non-gap side.
fn surface_at(alignment: &Alignment, pos: usize) -> &str {
    let pick = |row: &[AlignedToken]| row.get(pos).filter(|t| !t.token.is_gap()).is_some();
    if pick(&alignment.wa) {
        &alignment.wa[pos].token.surface
    } else {
        &alignment.wb[pos].token.surface
    }
}

/// Context tokens over `[from, to)`, one per position, preferring the
/// non-gap side of each.
fn context_tokens(alignment: &Alignment, from: usize, to: usize) -> Vec<Token> {
    (from..to.min(alignment.len()))
        .map(|k| {
            if alignment.wa[k].token.is_gap() {
                alignment.wb[k].token.clone()
            } else {
                alignment.wa[k].token.clone()
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lexicon::Lexicon;
    use crate::sentence::ChunkedSentence;
    use crate::Aligner;

    fn align(a: &str, b: &str) -> Alignment {
        let a = ChunkedSentence::parse(a).unwrap();
        let b = ChunkedSentence::parse(b).unwrap();
        let mut lex = Lexicon::new();
        Aligner::new().align(&a, &b, &mut lex)
    }

    /// +1 context, a two-gap depression, +2 context.
    fn depressed() -> Alignment {
        align(
            "a/DT d/NN e/NN f/NN",
            "a/DT x/NN y/NN d/NN e/NN f/NN",
        )
    }

    #[test]
    fn test_extracts_interior_depression() {
        let bubbles = BubbleExtractor::new().extract(&depressed(), 0.0);
        assert_eq!(bubbles.len(), 1);
        let b = &bubbles[0];
        assert_eq!(b.kernel_a.len(), b.kernel_b.len());
        // Kernel catches the gap run plus the swallowed `d` match.
        assert!(b.kernel_b.iter().any(|t| t.surface == "x"));
        assert!(b.kernel_a.iter().any(|t| t.is_gap()));
        assert_eq!(b.left.len(), 1);
        assert_eq!(b.left[0].surface, "a");
        assert_eq!(b.right.len(), 2);
        assert!((b.score - 2.0).abs() < 1e-9);
    }

    #[test]
    fn test_threshold_filters_weak_bubbles() {
        let bubbles = BubbleExtractor::new().extract(&depressed(), 2.5);
        assert!(bubbles.is_empty());
    }

    #[test]
    fn test_no_bubbles_for_identical_sentences() {
        let al = align("[NP the/DT cat/NN]", "[NP the/DT cat/NN]");
        assert!(BubbleExtractor::new().extract(&al, 0.0).is_empty());
    }

    #[test]
    fn test_extraction_is_idempotent() {
        let al = depressed();
        let ex = BubbleExtractor::new();
        assert_eq!(ex.extract(&al, 0.0), ex.extract(&al, 0.0));
    }

    #[test]
    fn test_punctuation_only_kernel_discarded() {
        // The depression holds only a comma against a gap: no true word
        // on either side, so no bubble.
        let al = align("a/DT d/NN e/NN f/NN", "a/DT ,/, d/NN e/NN f/NN");
        let bubbles = BubbleExtractor::new().extract(&al, -10.0);
        assert!(bubbles.iter().all(|b| {
            b.kernel_a.iter().chain(b.kernel_b.iter()).any(Token::is_true_word)
        }));
    }

    #[test]
    fn test_boundary_variant_skips_outermost_runs() {
        let al = depressed();
        // Only 3 runs: the depression is flanked by the first and last
        // run, which the boundary variant refuses to touch.
        assert_eq!(al.segment_runs().len(), 3);
        let bubbles = BubbleExtractor::new().extract_with_boundaries(&al, 0.0);
        assert!(bubbles.is_empty());
    }

    #[test]
    fn test_boundary_variant_doubles_present_flank() {
        // Runs: [XBEGIN]+1 | gaps x,y (swallowing e) -1 | f g h +1 |
        // trailing gap depression -2. The first depression's left flank
        // starts at position 0 and holds the begin sentinel.
        let al = align(
            "XBEGIN/NN e/NN f/NN g/NN h/NN",
            "XBEGIN/NN x/NN y/NN e/NN f/NN g/NN h/NN z/NN q/NN t/NN u/NN",
        );
        let runs = al.segment_runs();
        assert_eq!(runs.len(), 4);
        assert_eq!(runs[0], SegRun { a: 0, b: 0, value: 1.0 });
        assert!(runs[1].value < 0.0);

        let bubbles = BubbleExtractor::new().extract_with_boundaries(&al, 100.0);
        // min_value is unreachable, but the left-edge rule accepts at
        // total >= 0 with the doubled right flank.
        assert_eq!(bubbles.len(), 1);
        assert!(bubbles[0].kernel_b.iter().any(|t| t.surface == "x"));
    }

    #[test]
    fn test_boundary_variant_accepts_right_edge_depression() {
        // Runs: [extra]-1 | e f (swallowing x) +1 | y -1 | h XEND +2.
        // The depression's right flank is the final run and ends in the
        // XEND sentinel, so it is replaced by double the left flank and
        // the bubble is accepted at total >= 0 (-1 + 1 + 2*1 = 2).
        let al = align(
            "extra/NN e/NN f/NN h/NN XEND/NN",
            "e/NN f/NN x/NN y/NN h/NN XEND/NN",
        );
        let runs = al.segment_runs();
        assert_eq!(runs.len(), 4);
        assert!(runs[2].value < 0.0);
        assert_eq!(runs[3], SegRun { a: 5, b: 6, value: 2.0 });

        let bubbles = BubbleExtractor::new().extract_with_boundaries(&al, 100.0);
        assert_eq!(bubbles.len(), 1);
        assert!(bubbles[0].kernel_b.iter().any(|t| t.surface == "y"));
    }

    #[test]
    fn test_boundary_markers_recognition() {
        let m = BoundaryMarkers::default();
        assert!(m.is_begin("XBEGIN"));
        assert!(!m.is_begin("the"));
        assert!(m.is_end("XEND"));
        assert!(m.is_end("."));
        assert!(m.is_end("end!"));
        assert!(!m.is_end("end"));
    }

    #[test]
    fn test_custom_markers() {
        let m = BoundaryMarkers {
            begin_token: "<s>".into(),
            end_tokens: vec!["</s>".into()],
            end_punctuation: vec![],
        };
        assert!(m.is_begin("<s>"));
        assert!(m.is_end("</s>"));
        assert!(!m.is_end("."));
        let _ex = BubbleExtractor::new().with_markers(m);
    }
}
