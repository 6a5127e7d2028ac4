//! Core voxel data structures.
//! Contains blocks, face masks, and the chunk itself.

pub mod block;
pub mod chunk;

// Re-export commonly used types
pub use block::{Block, BlockType, Face, FaceMask};
pub use chunk::Chunk;
