// Core module with voxel types
pub mod core;

// Render module with mesh building
pub mod render;

// World module with generation, loading, and streaming
pub mod world;

// Utility modules
pub mod utils;

// Other modules
pub mod constants;
pub mod noise;

// Re-exports
pub use constants::*;
pub use crate::core::{Block, BlockType, Chunk, Face, FaceMask};
pub use render::{ChunkMesh, MeshBuilder};
pub use utils::{LoaderSettings, Settings, StreamingSettings, TerrainSettings};
pub use world::{
    ChunkGenerator, ChunkLoader, CreationAnchor, EvictionRule, TickReport, World, center_for,
    chunk_coord,
};
