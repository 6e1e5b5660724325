//! Vector infrastructure components
//!
//! Text chunking, the exact L2 vector store and the persistent index
//! that pairs stored vectors with their chunk metadata.

pub mod chunker;
pub mod flat_l2;
pub mod vector_index;

pub use chunker::{Chunker, TextSpan};
pub use flat_l2::{FlatL2Store, Neighbor, NO_MATCH};
pub use vector_index::{IndexState, VectorIndex};
