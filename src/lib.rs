//! parasim — sentence-level text comparison toolkit.
//!
//! The crate wraps the output of an external POS tagger / shallow chunker
//! (consumed as bracketed `[NP the/DT dog/NN]` lines) in a typed
//! [`ChunkedSentence`] representation and builds three independent engines
//! on top of it:
//!
//! - **Similarity**: word-level distances ([`wordsim`]), chunk connection
//!   strength ([`chunksim`]), and a family of whole-sentence metrics
//!   ([`sentsim`]) selectable at runtime via [`Metric`].
//! - **Alignment**: global token alignment between two sentences
//!   ([`Aligner`]), signed segment partitioning, and paraphrase-bubble
//!   extraction of divergent regions ([`BubbleExtractor`]).
//! - **Rules**: compilation of ILP-style sentence-transformation rules into
//!   positional regex patterns over left/middle/right context ([`Rule`]).
//!
//! # Quick start
//!
//! ```
//! use parasim::{ChunkedSentence, Lexicon, Metric, SentenceScorer};
//!
//! let mut a = ChunkedSentence::parse("[NP the/DT cat/NN] [VP sat/VBD]").unwrap();
//! let mut b = ChunkedSentence::parse("[NP the/DT cat/NN] [VP slept/VBD]").unwrap();
//!
//! let mut lexicon = Lexicon::new();
//! lexicon.ensure_codified(&mut a, &mut b);
//!
//! let scorer = SentenceScorer::default();
//! let sim = scorer.score(Metric::EditSimilarity, &a, &b);
//! assert!(sim > 0.5);
//! ```
//!
//! # Logging
//!
//! Recoverable-input warnings (e.g., malformed `token/TAG` pairs) are
//! emitted through `tracing` when the `tracing` feature is enabled; with
//! the feature off they compile to nothing.

// ---------------------------------------------------------------------------
// Conditional tracing support
// ---------------------------------------------------------------------------

/// Emit a `tracing` warning for a recoverable input problem (when the
/// `tracing` feature is enabled). When disabled, this is a no-op and the
/// compiler eliminates it.
macro_rules! input_warn {
    ($($arg:tt)*) => {
        #[cfg(feature = "tracing")]
        tracing::warn!($($arg)*);
    };
}

pub(crate) use input_warn;

pub mod align;
pub mod assign;
pub mod chunksim;
pub mod error;
pub mod lexicon;
pub mod rules;
pub mod sentence;
pub mod sentsim;
pub mod tagset;
pub mod types;
pub mod wordsim;

pub use align::{
    Alignment, Aligner, BoundaryMarkers, Bubble, BubbleExtractor, SegRun,
};
pub use error::{ParseError, RuleParseError};
pub use lexicon::Lexicon;
pub use rules::Rule;
pub use sentence::{Chunk, ChunkedSentence};
pub use sentsim::{GaussianParams, Metric, SentenceScorer};
pub use tagset::TagSet;
pub use types::{ChunkMark, Token, UNCODED};
