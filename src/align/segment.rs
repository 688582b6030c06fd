//! Signed segment partition of an alignment.
//!
//! Each aligned position contributes a signed term: −1.0 when either side
//! is uncoded (gaps included), +1.0 when the lexical codes agree, 0.1 when
//! both are coded but differ. Positions fold into maximal runs under a
//! sign-persistence test on the running sum: a run extends while adding
//! the next term keeps the sum's sign (product of old and new sum stays
//! positive). A 0.1 term therefore extends a deep negative run but flips
//! a shallow one, and a single match can be swallowed by a strong
//! depression.

use serde::{Deserialize, Serialize};

use crate::types::UNCODED;

use super::aligner::{AlignedToken, Alignment};

/// One maximal signed run `[a, b]` over the alignment, with its
/// accumulated value (positive: agreement; negative: disagreement).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SegRun {
    pub a: usize,
    pub b: usize,
    pub value: f64,
}

impl SegRun {
    /// Number of positions covered.
    pub fn len(&self) -> usize {
        self.b - self.a + 1
    }

    pub fn is_empty(&self) -> bool {
        false // runs always cover at least one position
    }
}

/// Signed comparison of one aligned position.
fn link_value(x: &AlignedToken, y: &AlignedToken) -> f64 {
    if x.token.lex_code == UNCODED || y.token.lex_code == UNCODED {
        -1.0
    } else if x.token.lex_code == y.token.lex_code {
        1.0
    } else {
        0.1
    }
}

/// Partition `alignment` into contiguous, exhaustive, alternating-sign
/// runs. Empty alignments produce no runs.
pub(crate) fn segment_runs(alignment: &Alignment) -> Vec<SegRun> {
    let len = alignment.len();
    let mut runs = Vec::new();
    if len == 0 {
        return runs;
    }

    let mut start = 0;
    let mut sum = link_value(&alignment.wa[0], &alignment.wb[0]);
    for i in 1..len {
        let term = link_value(&alignment.wa[i], &alignment.wb[i]);
        let next = sum + term;
        if sum * next > 0.0 {
            sum = next;
        } else {
            runs.push(SegRun {
                a: start,
                b: i - 1,
                value: sum,
            });
            start = i;
            sum = term;
        }
    }
    runs.push(SegRun {
        a: start,
        b: len - 1,
        value: sum,
    });
    runs
}
