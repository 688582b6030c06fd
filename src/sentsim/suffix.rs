//! Suffix-array n-gram overlap.
//!
//! Concatenates the two code sequences around a sentinel, builds a suffix
//! array plus LCP array over the combined sequence, and counts the
//! distinct n-grams whose occurrences span both sides (document frequency
//! ≥ 2 across the pair). The metric is the best per-length shared ratio.
//!
//! Comparison-sort construction is quadratic in the worst case, which is
//! fine at sentence scale; this module is the crate's n-gram counting
//! structure, not a corpus index.

/// Best per-length shared-n-gram ratio over `n = 1..=max_n`.
///
/// For each length, the shared count is divided by the smaller side's
/// maximum possible n-gram count (plus epsilon); the result is the
/// maximum over lengths. Empty input on either side scores 0.
pub fn suffix_overlap(a: &[i32], b: &[i32], max_n: usize) -> f64 {
    if a.is_empty() || b.is_empty() || max_n == 0 {
        return 0.0;
    }

    // Sentinel below every possible widened code, so it never matches.
    let mut seq: Vec<i64> = Vec::with_capacity(a.len() + b.len() + 1);
    seq.extend(a.iter().map(|&c| i64::from(c)));
    seq.push(i64::MIN);
    seq.extend(b.iter().map(|&c| i64::from(c)));
    let split = a.len();

    let sa = suffix_array(&seq);
    let lcp = lcp_array(&seq, &sa);

    let mut best = 0.0_f64;
    for n in 1..=max_n {
        let shared = shared_ngrams(&seq, &sa, &lcp, split, n);
        let max_a = (a.len() + 1).saturating_sub(n);
        let max_b = (b.len() + 1).saturating_sub(n);
        let ratio = shared as f64 / (max_a.min(max_b) as f64 + 1e-4);
        best = best.max(ratio);
    }
    best
}

/// Suffix array by comparison sort over suffix slices.
fn suffix_array(seq: &[i64]) -> Vec<usize> {
    let mut sa: Vec<usize> = (0..seq.len()).collect();
    sa.sort_by(|&i, &j| seq[i..].cmp(&seq[j..]));
    sa
}

/// `lcp[k]` = longest common prefix of the suffixes at `sa[k-1]` and
/// `sa[k]`; `lcp[0]` = 0. Direct adjacent comparison.
fn lcp_array(seq: &[i64], sa: &[usize]) -> Vec<usize> {
    let mut lcp = vec![0; sa.len()];
    for k in 1..sa.len() {
        let (i, j) = (sa[k - 1], sa[k]);
        let mut l = 0;
        while i + l < seq.len() && j + l < seq.len() && seq[i + l] == seq[j + l] {
            l += 1;
        }
        lcp[k] = l;
    }
    lcp
}

/// Which side a window of length `n` starting at `pos` belongs to:
/// `Some(true)` for the A side, `Some(false)` for B, `None` if it would
/// cross the sentinel or run past the end.
fn window_side(pos: usize, n: usize, split: usize, total: usize) -> Option<bool> {
    if pos + n > total {
        return None;
    }
    if pos < split {
        (pos + n <= split).then_some(true)
    } else if pos == split {
        None
    } else {
        Some(false)
    }
}

/// Count distinct n-grams occurring on both sides of the split.
///
/// Suffixes sharing a prefix of at least `n` form contiguous groups in
/// the suffix array (chained through the LCP array); a group contributes
/// one shared n-gram iff it contains a valid window from each side.
fn shared_ngrams(seq: &[i64], sa: &[usize], lcp: &[usize], split: usize, n: usize) -> usize {
    let total = seq.len();
    let mut count = 0;
    let mut has_a = false;
    let mut has_b = false;

    for k in 0..sa.len() {
        if k > 0 && lcp[k] < n {
            if has_a && has_b {
                count += 1;
            }
            has_a = false;
            has_b = false;
        }
        match window_side(sa[k], n, split, total) {
            Some(true) => has_a = true,
            Some(false) => has_b = true,
            None => {}
        }
    }
    if has_a && has_b {
        count += 1;
    }
    count
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_identical_sequences_near_one() {
        let s = [0, 1, 2, 3];
        let v = suffix_overlap(&s, &s, 4);
        assert!(v > 0.999 && v <= 1.0);
    }

    #[test]
    fn test_disjoint_sequences_zero() {
        assert_eq!(suffix_overlap(&[0, 1, 2], &[3, 4, 5], 4), 0.0);
    }

    #[test]
    fn test_empty_side_zero() {
        assert_eq!(suffix_overlap(&[], &[0, 1], 4), 0.0);
        assert_eq!(suffix_overlap(&[0, 1], &[], 4), 0.0);
    }

    #[test]
    fn test_shared_ngram_counting() {
        // Shared unigrams {1, 2}; shared bigram (1,2).
        let a = [0, 1, 2];
        let b = [1, 2, 9];
        let seq: Vec<i64> = vec![0, 1, 2, i64::MIN, 1, 2, 9];
        let sa = suffix_array(&seq);
        let lcp = lcp_array(&seq, &sa);
        assert_eq!(shared_ngrams(&seq, &sa, &lcp, a.len(), 1), 2);
        assert_eq!(shared_ngrams(&seq, &sa, &lcp, a.len(), 2), 1);
        assert_eq!(shared_ngrams(&seq, &sa, &lcp, a.len(), 3), 0);
        // Best ratio comes from unigrams: 2 of 3 possible.
        let v = suffix_overlap(&a, &b, 4);
        assert!((v - 2.0 / (3.0 + 1e-4)).abs() < 1e-12);
    }

    #[test]
    fn test_windows_never_cross_sentinel() {
        // The bigram (2, 1) only exists across the sentinel boundary;
        // it must not count.
        let a = [1, 2];
        let b = [1, 9];
        let seq: Vec<i64> = vec![1, 2, i64::MIN, 1, 9];
        let sa = suffix_array(&seq);
        let lcp = lcp_array(&seq, &sa);
        assert_eq!(shared_ngrams(&seq, &sa, &lcp, 2, 2), 0);
    }

    #[test]
    fn test_repeated_grams_count_once() {
        // "1 1 1" vs "1 1": the unigram 1 is one distinct shared gram.
        let seq: Vec<i64> = vec![1, 1, 1, i64::MIN, 1, 1];
        let sa = suffix_array(&seq);
        let lcp = lcp_array(&seq, &sa);
        assert_eq!(shared_ngrams(&seq, &sa, &lcp, 3, 1), 1);
        assert_eq!(shared_ngrams(&seq, &sa, &lcp, 3, 2), 1);
    }
}
