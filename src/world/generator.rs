//! Chunk generation from layered simplex noise.
//!
//! Generation is pure and deterministic: the same chunk coordinates always
//! produce the same blocks and the same mesh, so it can run on background
//! threads without coordination.

use crate::constants::*;
use crate::core::block::BlockType;
use crate::core::chunk::Chunk;
use crate::noise;
use crate::utils::settings::TerrainSettings;

/// Builds fully meshed chunks from terrain noise. Cheap to clone, one per
/// worker thread.
#[derive(Clone, Debug)]
pub struct ChunkGenerator {
    settings: TerrainSettings,
}

impl ChunkGenerator {
    pub fn new(settings: TerrainSettings) -> Self {
        ChunkGenerator { settings }
    }

    pub fn settings(&self) -> &TerrainSettings {
        &self.settings
    }

    /// Terrain column at world `(x, z)`: fill height and material.
    ///
    /// Two noise layers combine per column: a shape layer picks the spot in
    /// the height band, a rougher relief layer decides how wide that band
    /// is. Columns below the sand threshold flatten to beach height.
    pub fn column(&self, wx: i32, wz: i32) -> (i32, BlockType) {
        let s = &self.settings;
        let x = wx as f64 * s.frequency;
        let z = wz as f64 * s.frequency;
        let shape = noise::fractal2(x, z, s.shape_octaves, s.shape_persistence, s.lacunarity);
        let relief = noise::fractal2(x, z, s.relief_octaves, s.relief_persistence, s.lacunarity);
        let height = shape * (relief * s.relief_scale + s.relief_base);
        if height < s.sand_height as f64 {
            (s.sand_height - 1, BlockType::Sand)
        } else {
            (height as i32, BlockType::Dirt)
        }
    }

    /// Generate the chunk at `(p, q)`, exposure-culled and meshed.
    pub fn generate_chunk(&self, p: i32, q: i32) -> Chunk {
        let mut chunk = Chunk::new(p, q);
        let base_x = p * CHUNK_SIZE;
        let base_z = q * CHUNK_SIZE;

        for lx in 0..CHUNK_SIZE {
            for lz in 0..CHUNK_SIZE {
                let (height, material) = self.column(base_x + lx, base_z + lz);
                for y in 0..height {
                    chunk.set_block(lx, y, lz, material);
                }
            }
        }

        chunk.compute_exposed_faces();
        chunk.build_mesh();
        chunk
    }
}

impl Default for ChunkGenerator {
    fn default() -> Self {
        ChunkGenerator::new(TerrainSettings::default())
    }
}
