//! World generation and streaming.
//! Contains terrain generation, the chunk worker pool, and chunk residency.

pub mod generator;
pub mod loader;
pub mod streaming;

// Re-export commonly used types
pub use generator::ChunkGenerator;
pub use loader::ChunkLoader;
pub use streaming::{CreationAnchor, EvictionRule, TickReport, World, center_for, chunk_coord};
