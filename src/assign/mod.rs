//! Greedy best-assignment matching.
//!
//! Given scored candidate pairs between two sequences, select a one-to-one
//! partial assignment by a single greedy scan of the value-sorted list.
//! The greedy behavior is deliberate and load-bearing: downstream chunk and
//! sentence scores are calibrated against it, so it must not be replaced
//! with optimal bipartite matching. Ties are broken by input order (the
//! sort is stable).

use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

/// One scored pairing between element `i` of the first sequence and
/// element `j` of the second.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Candidate {
    pub i: usize,
    pub j: usize,
    pub value: f64,
}

impl Candidate {
    pub fn new(i: usize, j: usize, value: f64) -> Self {
        Self { i, j, value }
    }
}

/// Stable-sort candidates descending by value, in place.
///
/// NaN values compare as equal so they keep their input position rather
/// than poisoning the order.
pub fn sort_candidates(candidates: &mut [Candidate]) {
    candidates.sort_by(|a, b| {
        b.value
            .partial_cmp(&a.value)
            .unwrap_or(Ordering::Equal)
    });
}

/// Greedily select up to `min(m, n)` non-conflicting pairs from a
/// candidate list already sorted descending by value.
///
/// A pair is accepted iff neither its `i` nor its `j` has been used by an
/// earlier acceptance. Candidates with out-of-range indices are skipped.
/// `m == 0` or `n == 0` yields an empty result.
pub fn best_assignment(candidates: &[Candidate], m: usize, n: usize) -> Vec<Candidate> {
    if m == 0 || n == 0 {
        return Vec::new();
    }
    let k = m.min(n);
    let mut used_i = vec![false; m];
    let mut used_j = vec![false; n];
    let mut accepted = Vec::with_capacity(k);

    for &cand in candidates {
        if accepted.len() == k {
            break;
        }
        if cand.i >= m || cand.j >= n {
            continue;
        }
        if !used_i[cand.i] && !used_j[cand.j] {
            used_i[cand.i] = true;
            used_j[cand.j] = true;
            accepted.push(cand);
        }
    }
    accepted
}
