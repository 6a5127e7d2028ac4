//! Shared utilities.
//! Contains the settings layer.

pub mod settings;

// Re-export commonly used types
pub use settings::{LoaderSettings, Settings, StreamingSettings, TerrainSettings};
