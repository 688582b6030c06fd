//! Global (Needleman-Wunsch) token alignment.
//!
//! Scores +2 for a case-insensitive surface match, −1 for a mismatch, −1
//! per gap. Traceback prefers diagonal, then a gap in `b`, then a gap in
//! `a`, which makes the result deterministic for tied cells.

use crate::types::Token;

const MATCH: i64 = 2;
const MISMATCH: i64 = -1;
const GAP: i64 = -1;

/// Align two token sequences globally, returning index pairs where `None`
/// on one side marks a gap.
pub(crate) fn global_align(a: &[Token], b: &[Token]) -> Vec<(Option<usize>, Option<usize>)> {
    let (m, n) = (a.len(), b.len());
    let mut score = vec![vec![0i64; n + 1]; m + 1];
    for (i, row) in score.iter_mut().enumerate() {
        row[0] = GAP * i as i64;
    }
    for j in 0..=n {
        score[0][j] = GAP * j as i64;
    }
    for i in 1..=m {
        for j in 1..=n {
            let diag = score[i - 1][j - 1] + pair_score(&a[i - 1], &b[j - 1]);
            let up = score[i - 1][j] + GAP;
            let left = score[i][j - 1] + GAP;
            score[i][j] = diag.max(up).max(left);
        }
    }

    let mut pairs = Vec::with_capacity(m.max(n));
    let (mut i, mut j) = (m, n);
    while i > 0 || j > 0 {
        if i > 0
            && j > 0
            && score[i][j] == score[i - 1][j - 1] + pair_score(&a[i - 1], &b[j - 1])
        {
            pairs.push((Some(i - 1), Some(j - 1)));
            i -= 1;
            j -= 1;
        } else if i > 0 && score[i][j] == score[i - 1][j] + GAP {
            pairs.push((Some(i - 1), None));
            i -= 1;
        } else {
            pairs.push((None, Some(j - 1)));
            j -= 1;
        }
    }
    pairs.reverse();
    pairs
}

fn pair_score(a: &Token, b: &Token) -> i64 {
    if a.surface.eq_ignore_ascii_case(&b.surface) {
        MATCH
    } else {
        MISMATCH
    }
}
