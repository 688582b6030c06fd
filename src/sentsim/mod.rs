//! Whole-sentence similarity metrics.
//!
//! Every metric operates on lexically codified sentences (see
//! [`Lexicon::ensure_codified`](crate::Lexicon::ensure_codified)) and is
//! also exposed as a free function over raw `&[i32]` code slices so it can
//! be tested without the external tagger. No single metric dominates for
//! asymmetric paraphrase pairs, so callers pick one at runtime via
//! [`Metric`].
//!
//! A quirk worth knowing: the `sumo` metric scores *identical* sentences
//! as `0.0` (zero surprise), not `1.0`.

pub mod suffix;

use rayon::prelude::*;
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use crate::lexicon::Lexicon;
use crate::sentence::ChunkedSentence;
use crate::types::{Token, UNCODED};

/// Epsilon added to n-gram denominators to avoid division by zero.
const NGRAM_EPS: f64 = 1e-4;

// ─── Exclusive link counting ────────────────────────────────────────────────

/// Number of exclusive one-to-one lexical-code matches, scanning `a`
/// left-to-right and consuming each matched position of `b` so it cannot
/// match again. Greedy, not optimal assignment. Uncoded tokens never match.
pub fn exclusive_links(a: &[i32], b: &[i32]) -> usize {
    let mut used = vec![false; b.len()];
    let mut links = 0;
    for &ca in a {
        if ca == UNCODED {
            continue;
        }
        if let Some(j) = b
            .iter()
            .enumerate()
            .position(|(j, &cb)| !used[j] && cb == ca)
        {
            used[j] = true;
            links += 1;
        }
    }
    links
}

// ─── Sumo family ────────────────────────────────────────────────────────────

/// The "sumo" asymmetric link-counting metric.
///
/// With `pm = NL/max(n,m)` and `pn = NL/min(n,m)`, the score is
/// `−0.5·log2(pm) − 0.5·log2(pn)`; values above 1 are folded back into
/// `[0, 1)` via `exp(−3x)`. No links (or an empty side) scores 0.
///
/// The combination is symmetric in `pm`/`pn`, so the max/min naming swap
/// between the original call sites does not change the result.
pub fn sumo(a: &[i32], b: &[i32]) -> f64 {
    let (n, m) = (a.len(), b.len());
    if n == 0 || m == 0 {
        return 0.0;
    }
    let nl = exclusive_links(a, b) as f64;
    if nl == 0.0 {
        return 0.0;
    }
    let pm = nl / n.max(m) as f64;
    let pn = nl / n.min(m) as f64;
    fold_sumo(-0.5 * pm.log2() - 0.5 * pn.log2())
}

/// Sumo with character-length weighting: each link contributes the matched
/// word's character length, and the denominators are the sentences' total
/// character lengths. Input items are `(lex_code, char_len)` pairs.
pub fn sumo_weighted(a: &[(i32, usize)], b: &[(i32, usize)]) -> f64 {
    let ta: usize = a.iter().map(|&(_, l)| l).sum();
    let tb: usize = b.iter().map(|&(_, l)| l).sum();
    if ta == 0 || tb == 0 {
        return 0.0;
    }

    let mut used = vec![false; b.len()];
    let mut nl = 0usize;
    for &(ca, len) in a {
        if ca == UNCODED {
            continue;
        }
        if let Some(j) = b
            .iter()
            .enumerate()
            .position(|(j, &(cb, _))| !used[j] && cb == ca)
        {
            used[j] = true;
            nl += len;
        }
    }
    if nl == 0 {
        return 0.0;
    }
    let pm = nl as f64 / ta.max(tb) as f64;
    let pn = nl as f64 / ta.min(tb) as f64;
    fold_sumo(-0.5 * pm.log2() - 0.5 * pn.log2())
}

/// Fold large surprise values back into `[0, 1)`.
fn fold_sumo(x: f64) -> f64 {
    if x > 1.0 {
        (-3.0 * x).exp()
    } else {
        x
    }
}

// ─── N-gram overlap ─────────────────────────────────────────────────────────

/// Count matching `n`-grams between `a` and `b`; each match consumes one
/// occurrence on the `b` side.
fn ngram_matches(a: &[i32], b: &[i32], n: usize) -> usize {
    if n == 0 || a.len() < n || b.len() < n {
        return 0;
    }
    let mut counts: FxHashMap<&[i32], usize> = FxHashMap::default();
    for gram in b.windows(n) {
        *counts.entry(gram).or_insert(0) += 1;
    }
    let mut matches = 0;
    for gram in a.windows(n) {
        if let Some(c) = counts.get_mut(gram) {
            if *c > 0 {
                *c -= 1;
                matches += 1;
            }
        }
    }
    matches
}

/// Per-length match precision: matches over the smaller side's maximum
/// possible `n`-gram count (plus epsilon).
fn ngram_precision(a: &[i32], b: &[i32], n: usize) -> f64 {
    let max_a = (a.len() + 1).saturating_sub(n);
    let max_b = (b.len() + 1).saturating_sub(n);
    ngram_matches(a, b, n) as f64 / (max_a.min(max_b) as f64 + NGRAM_EPS)
}

/// Uniform average of per-length n-gram precisions for `n = 1..=max_n`.
pub fn ngram_overlap(a: &[i32], b: &[i32], max_n: usize) -> f64 {
    if a.is_empty() || b.is_empty() || max_n == 0 {
        return 0.0;
    }
    (1..=max_n).map(|n| ngram_precision(a, b, n)).sum::<f64>() / max_n as f64
}

/// BLEU-style combination: geometric mean of the per-length precisions
/// (skipping lengths with zero matches, still dividing by `max_n`), times
/// the brevity factor `exp(1 − min(n,m)/max(n,m))`.
pub fn bleu(a: &[i32], b: &[i32], max_n: usize) -> f64 {
    if a.is_empty() || b.is_empty() || max_n == 0 {
        return 0.0;
    }
    let mut log_sum = 0.0;
    let mut any = false;
    for n in 1..=max_n {
        if ngram_matches(a, b, n) > 0 {
            log_sum += ngram_precision(a, b, n).ln();
            any = true;
        }
    }
    if !any {
        return 0.0;
    }
    let gm = (log_sum / max_n as f64).exp();
    let (la, lb) = (a.len() as f64, b.len() as f64);
    gm * (1.0 - la.min(lb) / la.max(lb)).exp()
}

// ─── Edit-distance similarity ───────────────────────────────────────────────

/// Word-level Levenshtein distance with a caller-supplied equality test.
fn levenshtein_by<T>(a: &[T], b: &[T], eq: impl Fn(&T, &T) -> bool) -> usize {
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
            curr[j] = if eq(&a[i - 1], &b[j - 1]) {
                prev[j - 1]
            } else {
                1 + prev[j].min(curr[j - 1]).min(prev[j - 1])
            };
        }
        std::mem::swap(&mut prev, &mut curr);
    }
    prev[b.len()]
}

/// `1 − levenshtein(a,b)/max(|a|,|b|)` over raw code slices (codes
/// compared for equality, [`UNCODED`] matching nothing but itself).
pub fn edit_similarity_codes(a: &[i32], b: &[i32]) -> f64 {
    if a.is_empty() && b.is_empty() {
        return 0.0;
    }
    let d = levenshtein_by(a, b, |x, y| x == y);
    1.0 - d as f64 / a.len().max(b.len()) as f64
}

/// Token-level edit similarity: tokens compare by lexical code when both
/// are coded, falling back to surface equality otherwise.
pub fn edit_similarity(a: &[Token], b: &[Token]) -> f64 {
    if a.is_empty() && b.is_empty() {
        return 0.0;
    }
    let d = levenshtein_by(a, b, |x, y| {
        if x.lex_code != UNCODED && y.lex_code != UNCODED {
            x.lex_code == y.lex_code
        } else {
            x.surface == y.surface
        }
    });
    1.0 - d as f64 / a.len().max(b.len()) as f64
}

// ─── Shaped precision·recall metrics ────────────────────────────────────────

/// Match rate against the shorter sentence ("precision") and the longer
/// one ("recall"); `None` when either side is empty.
fn precision_recall(a: &[i32], b: &[i32]) -> Option<(f64, f64)> {
    let (n, m) = (a.len(), b.len());
    if n == 0 || m == 0 {
        return None;
    }
    let nl = exclusive_links(a, b) as f64;
    Some((nl / n.min(m) as f64, nl / n.max(m) as f64))
}

fn shaped(a: &[i32], b: &[i32], f: impl Fn(f64) -> f64) -> f64 {
    match precision_recall(a, b) {
        Some((p, r)) => f(p * r),
        None => 0.0,
    }
}

/// Binary entropy of `p·r`.
pub fn entropy(a: &[i32], b: &[i32]) -> f64 {
    shaped(a, b, |x| {
        if x <= 0.0 || x >= 1.0 {
            0.0
        } else {
            -(x * x.log2() + (1.0 - x) * (1.0 - x).log2())
        }
    })
}

/// Parameters for the Gaussian bump metric.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GaussianParams {
    /// Location of the bump's peak in `p·r` space.
    pub center: f64,
    /// Variance (sigma squared) controlling the bump width.
    pub variance: f64,
}

impl Default for GaussianParams {
    fn default() -> Self {
        Self {
            center: 1.0,
            variance: 0.2,
        }
    }
}

/// Gaussian bump `exp(−(x − c)² / 2σ²)` over `x = p·r`.
pub fn gaussian(a: &[i32], b: &[i32], params: GaussianParams) -> f64 {
    shaped(a, b, |x| {
        let d = x - params.center;
        (-(d * d) / (2.0 * params.variance)).exp()
    })
}

/// Parabola `4x − 4x²` over `x = p·r`.
pub fn parabolic(a: &[i32], b: &[i32]) -> f64 {
    shaped(a, b, |x| 4.0 * x - 4.0 * x * x)
}

/// Triangular function `1 − |2x − 1|` over `x = p·r`.
pub fn linear(a: &[i32], b: &[i32]) -> f64 {
    shaped(a, b, |x| 1.0 - (2.0 * x - 1.0).abs())
}

/// `sin(πx)` over `x = p·r`.
pub fn trig(a: &[i32], b: &[i32]) -> f64 {
    shaped(a, b, |x| (std::f64::consts::PI * x).sin())
}

// ─── Metric selection & scorer ──────────────────────────────────────────────

/// Runtime-selectable sentence metric.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Metric {
    Sumo,
    SumoWeighted,
    NgramOverlap,
    Bleu,
    SuffixOverlap,
    EditSimilarity,
    Entropy,
    Gaussian,
    Parabolic,
    Linear,
    Trig,
}

impl Metric {
    /// Name used in serialized form and diagnostics.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Sumo => "sumo",
            Self::SumoWeighted => "sumo_weighted",
            Self::NgramOverlap => "ngram_overlap",
            Self::Bleu => "bleu",
            Self::SuffixOverlap => "suffix_overlap",
            Self::EditSimilarity => "edit_similarity",
            Self::Entropy => "entropy",
            Self::Gaussian => "gaussian",
            Self::Parabolic => "parabolic",
            Self::Linear => "linear",
            Self::Trig => "trig",
        }
    }
}

/// Dispatches a [`Metric`] over codified sentence pairs.
#[derive(Debug, Clone)]
pub struct SentenceScorer {
    /// Maximum n-gram length for the overlap/BLEU/suffix metrics.
    max_n: usize,
    gaussian: GaussianParams,
}

impl Default for SentenceScorer {
    fn default() -> Self {
        Self {
            max_n: 4,
            gaussian: GaussianParams::default(),
        }
    }
}

impl SentenceScorer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the maximum n-gram length (default 4).
    pub fn with_max_n(mut self, max_n: usize) -> Self {
        self.max_n = max_n;
        self
    }

    /// Set the Gaussian bump parameters.
    pub fn with_gaussian(mut self, params: GaussianParams) -> Self {
        self.gaussian = params;
        self
    }

    /// Score two *already codified* sentences with the chosen metric.
    ///
    /// Codification against a shared lexicon is the caller's explicit
    /// precondition; use [`SentenceScorer::score_with`] to do both.
    pub fn score(&self, metric: Metric, a: &ChunkedSentence, b: &ChunkedSentence) -> f64 {
        let ca = codes(a);
        let cb = codes(b);
        match metric {
            Metric::Sumo => sumo(&ca, &cb),
            Metric::SumoWeighted => {
                sumo_weighted(&weighted_codes(a), &weighted_codes(b))
            }
            Metric::NgramOverlap => ngram_overlap(&ca, &cb, self.max_n),
            Metric::Bleu => bleu(&ca, &cb, self.max_n),
            Metric::SuffixOverlap => suffix::suffix_overlap(&ca, &cb, self.max_n),
            Metric::EditSimilarity => edit_similarity(a.tokens(), b.tokens()),
            Metric::Entropy => entropy(&ca, &cb),
            Metric::Gaussian => gaussian(&ca, &cb, self.gaussian),
            Metric::Parabolic => parabolic(&ca, &cb),
            Metric::Linear => linear(&ca, &cb),
            Metric::Trig => trig(&ca, &cb),
        }
    }

    /// Ensure both sentences are codified against `lexicon`, then score.
    pub fn score_with(
        &self,
        metric: Metric,
        lexicon: &mut Lexicon,
        a: &mut ChunkedSentence,
        b: &mut ChunkedSentence,
    ) -> f64 {
        lexicon.ensure_codified(a, b);
        self.score(metric, a, b)
    }
}

fn codes(s: &ChunkedSentence) -> Vec<i32> {
    s.tokens().iter().map(|t| t.lex_code).collect()
}

fn weighted_codes(s: &ChunkedSentence) -> Vec<(i32, usize)> {
    s.tokens()
        .iter()
        .map(|t| (t.lex_code, t.surface.chars().count()))
        .collect()
}

/// Score many codified pairs in parallel. Each pair is independent, so
/// this is a plain data-parallel map.
pub fn par_score_pairs(
    scorer: &SentenceScorer,
    metric: Metric,
    pairs: &[(ChunkedSentence, ChunkedSentence)],
) -> Vec<f64> {
    pairs
        .par_iter()
        .map(|(a, b)| scorer.score(metric, a, b))
        .collect()
}
