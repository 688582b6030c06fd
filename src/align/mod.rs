//! Sentence alignment and paraphrase-bubble extraction.
//!
//! [`Aligner`] produces a token-level [`Alignment`] between two chunked
//! sentences (global alignment with gap placeholders, enriched with
//! lexical/POS/chunk codes). [`Alignment::segment_runs`] partitions the
//! alignment into signed agreement/disagreement runs, and
//! [`BubbleExtractor`] turns interior disagreement runs into bounded
//! paraphrase bubbles.

mod aligner;
mod bubble;
mod global;
mod segment;

pub use aligner::{AlignedToken, Aligner, Alignment};
pub use bubble::{BoundaryMarkers, Bubble, BubbleExtractor};
pub use segment::SegRun;
