//! Pairwise lexical distance between word strings.
//!
//! Three primitives feed the chunk and alignment engines: character-level
//! Levenshtein distance, the best single contiguous match over all offset
//! pairs (not the classic LCS), and a connection-probability transform of
//! the two.

/// Cap used by [`cost_align`] when one side is absent: effectively
/// "infinite" cost, `MAX_WORD_LEN / EPS`, but usable in comparisons.
pub const NULL_ALIGN_COST: f64 = MAX_WORD_LEN / EPS;

const MAX_WORD_LEN: f64 = 40.0;
const EPS: f64 = 1e-3;

/// Character-level Levenshtein distance, two-row dynamic programming.
pub fn edit_distance(a: &str, b: &str) -> usize {
    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();
    if a.is_empty() {
        return b.len();
    }
    if b.is_empty() {
        return a.len();
    }

    let mut prev: Vec<usize> = (0..=b.len()).collect();
    let mut curr = vec![0; b.len() + 1];

    for i in 1..=a.len() {
        curr[0] = i;
        for j in 1..=b.len() {
            curr[j] = if a[i - 1] == b[j - 1] {
                prev[j - 1]
            } else {
                1 + prev[j].min(curr[j - 1]).min(prev[j - 1])
            };
        }
        std::mem::swap(&mut prev, &mut curr);
    }
    prev[b.len()]
}

/// Length of the longest exactly-matching contiguous run starting at any
/// offset pair, in characters. Brute-force over all start offsets.
pub fn longest_common_run_len(a: &str, b: &str) -> usize {
    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();
    let mut best = 0;
    for i in 0..a.len() {
        for j in 0..b.len() {
            let mut k = 0;
            while i + k < a.len() && j + k < b.len() && a[i + k] == b[j + k] {
                k += 1;
            }
            best = best.max(k);
        }
    }
    best
}

/// [`longest_common_run_len`] normalized by `max(|a|, |b|)`.
///
/// Empty inputs normalize to 0.
pub fn longest_common_run(a: &str, b: &str) -> f64 {
    let denom = a.chars().count().max(b.chars().count());
    if denom == 0 {
        return 0.0;
    }
    longest_common_run_len(a, b) as f64 / denom as f64
}

/// Connection probability between two words, in `[0, 1]`.
///
/// `1 − (2/π)·atan(0.25·ed / (0.001 + lcr))`; an absent argument means no
/// connectivity (0). Identical words score exactly 1.
pub fn connection_probability(a: Option<&str>, b: Option<&str>) -> f64 {
    let (a, b) = match (a, b) {
        (Some(a), Some(b)) => (a, b),
        _ => return 0.0,
    };
    let ed = edit_distance(a, b) as f64;
    let lcr = longest_common_run(a, b);
    1.0 - (2.0 / std::f64::consts::PI) * (0.25 * ed / (EPS + lcr)).atan()
}

/// Alignment cost between two words: `ed / (0.01 + lcr)`.
///
/// An absent argument costs [`NULL_ALIGN_COST`].
pub fn cost_align(a: Option<&str>, b: Option<&str>) -> f64 {
    let (a, b) = match (a, b) {
        (Some(a), Some(b)) => (a, b),
        _ => return NULL_ALIGN_COST,
    };
    edit_distance(a, b) as f64 / (0.01 + longest_common_run(a, b))
}
