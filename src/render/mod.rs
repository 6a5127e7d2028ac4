//! Geometry output.
//! Builds the vertex buffers a renderer would upload, one mesh per chunk.

pub mod mesh;

// Re-export commonly used types
pub use mesh::{ChunkMesh, MeshBuilder};
