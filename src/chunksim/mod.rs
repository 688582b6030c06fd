//! Chunk-to-chunk connection strength.
//!
//! Scores how strongly two phrasal chunks are connected: a word-by-word
//! connection-probability matrix (gated by POS-prefix agreement) is fed
//! through the greedy [`best_assignment`](crate::assign::best_assignment)
//! and averaged.

use crate::assign::{best_assignment, sort_candidates, Candidate};
use crate::sentence::Chunk;
use crate::wordsim::connection_probability;

/// Connection strength between two chunks, in `[0, 1]`.
///
/// Fails closed (0) when exactly one chunk's tag is undefined; two
/// undefined tags are allowed through (both sides are implicit singleton
/// chunks and still comparable). Word pairs whose POS tags differ in
/// their first two characters contribute a zero cell.
pub fn connection(a: &Chunk<'_>, b: &Chunk<'_>) -> f64 {
    if a.tag.is_none() != b.tag.is_none() {
        return 0.0;
    }
    let m = a.len();
    let n = b.len();
    if m == 0 || n == 0 {
        return 0.0;
    }

    let mut candidates = Vec::with_capacity(m * n);
    for (i, wa) in a.tokens.iter().enumerate() {
        for (j, wb) in b.tokens.iter().enumerate() {
            let value = if pos_prefix(wa.pos_tag.as_deref()) == pos_prefix(wb.pos_tag.as_deref()) {
                connection_probability(Some(&wa.surface), Some(&wb.surface))
            } else {
                0.0
            };
            candidates.push(Candidate::new(i, j, value));
        }
    }
    sort_candidates(&mut candidates);

    let accepted = best_assignment(&candidates, m, n);
    if accepted.is_empty() {
        return 0.0;
    }
    accepted.iter().map(|c| c.value).sum::<f64>() / accepted.len() as f64
}

/// First two characters of a POS tag (the coarse category), or empty.
fn pos_prefix(tag: Option<&str>) -> String {
    tag.unwrap_or("").chars().take(2).collect()
}
