//! ILP-style rule compilation.
//!
//! A sentence-reduction rule arrives as a conjunctive condition string
//! such as
//!
//! ```text
//! dim:2--->1, chunk(A,left,np), inx(A,center:x,1,great), chunk(A,right,np).
//! ```
//!
//! [`Rule::parse`] turns it into a totally-ordered condition list and
//! compiles three positional regex fragments (left/middle/right context)
//! that match against the canonical chunked-sentence string form
//! (see [`ChunkedSentence::canonical`](crate::ChunkedSentence::canonical)).

mod compiler;
mod condition;

pub use compiler::Rule;
pub use condition::{ChunkSpec, Condition, Region};
