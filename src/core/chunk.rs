use crate::constants::*;
use crate::core::block::{Block, BlockType, Face, FaceMask};
use crate::render::mesh::{ChunkMesh, MeshBuilder};

/// One 16x256x16 column of voxels at chunk coordinates `(p, q)` on the
/// X/Z plane.
#[derive(Clone, Debug)]
pub struct Chunk {
    p: i32,
    q: i32,
    blocks: Vec<Block>,
    mesh: ChunkMesh,
    faces: u32,
}

impl Chunk {
    pub fn new(p: i32, q: i32) -> Self {
        Chunk {
            p,
            q,
            blocks: vec![Block::default(); CHUNK_VOLUME],
            mesh: ChunkMesh::default(),
            faces: 0,
        }
    }

    pub fn p(&self) -> i32 {
        self.p
    }

    pub fn q(&self) -> i32 {
        self.q
    }

    pub fn coords(&self) -> (i32, i32) {
        (self.p, self.q)
    }

    fn index(x: i32, y: i32, z: i32) -> usize {
        ((x * WORLD_HEIGHT + y) * CHUNK_SIZE + z) as usize
    }

    fn in_bounds(x: i32, y: i32, z: i32) -> bool {
        x >= 0 && x < CHUNK_SIZE && y >= 0 && y < WORLD_HEIGHT && z >= 0 && z < CHUNK_SIZE
    }

    /// Material at local `(x, y, z)`, or `None` outside this chunk.
    pub fn get_block(&self, x: i32, y: i32, z: i32) -> Option<BlockType> {
        if Self::in_bounds(x, y, z) {
            Some(self.blocks[Self::index(x, y, z)].kind)
        } else {
            None
        }
    }

    pub fn set_block(&mut self, x: i32, y: i32, z: i32, kind: BlockType) {
        if Self::in_bounds(x, y, z) {
            self.blocks[Self::index(x, y, z)] = Block::new(kind);
        }
    }

    pub fn face_mask(&self, x: i32, y: i32, z: i32) -> Option<FaceMask> {
        if Self::in_bounds(x, y, z) {
            Some(self.blocks[Self::index(x, y, z)].faces)
        } else {
            None
        }
    }

    pub fn solid_count(&self) -> usize {
        self.blocks.iter().filter(|b| b.is_solid()).count()
    }

    /// Marks every solid voxel face whose neighbor is empty or outside the
    /// chunk. Neighbor chunks are not consulted, so all six chunk bounds
    /// count as exposed. Returns the total number of exposed faces.
    pub fn compute_exposed_faces(&mut self) -> u32 {
        let mut total = 0;
        for x in 0..CHUNK_SIZE {
            for y in 0..WORLD_HEIGHT {
                for z in 0..CHUNK_SIZE {
                    let idx = Self::index(x, y, z);
                    if self.blocks[idx].kind.is_empty() {
                        self.blocks[idx].faces = FaceMask::NONE;
                        continue;
                    }
                    let mut mask = FaceMask::NONE;
                    for face in Face::ALL {
                        let (dx, dy, dz) = face.offset();
                        let neighbor = self.get_block(x + dx, y + dy, z + dz);
                        if neighbor.is_none_or(|kind| kind.is_empty()) {
                            mask.set(face);
                        }
                    }
                    self.blocks[idx].faces = mask;
                    total += mask.count();
                }
            }
        }
        self.faces = total;
        total
    }

    /// Emits one quad per exposed face at world coordinates. Call after
    /// `compute_exposed_faces`.
    pub fn build_mesh(&mut self) {
        let mut builder = MeshBuilder::with_face_capacity(self.faces as usize);
        let base_x = self.p * CHUNK_SIZE;
        let base_z = self.q * CHUNK_SIZE;
        for x in 0..CHUNK_SIZE {
            for y in 0..WORLD_HEIGHT {
                for z in 0..CHUNK_SIZE {
                    let block = self.blocks[Self::index(x, y, z)];
                    if block.faces.is_empty() {
                        continue;
                    }
                    let wx = (base_x + x) as f32;
                    let wy = y as f32;
                    let wz = (base_z + z) as f32;
                    for face in block.faces.iter() {
                        builder.add_face(face, block.kind, wx, wy, wz);
                    }
                }
            }
        }
        self.mesh = builder.finish();
    }

    pub fn faces(&self) -> u32 {
        self.faces
    }

    pub fn mesh(&self) -> &ChunkMesh {
        &self.mesh
    }

    pub fn vertex_count(&self) -> u32 {
        self.mesh.vertex_count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn holds_a_full_column_of_voxels() {
        let chunk = Chunk::new(0, 0);
        assert_eq!(CHUNK_VOLUME, 65_536);
        assert_eq!(chunk.solid_count(), 0);
        assert_eq!(chunk.get_block(0, 0, 0), Some(BlockType::Empty));
    }

    #[test]
    fn get_block_is_none_outside_the_chunk() {
        let chunk = Chunk::new(0, 0);
        assert_eq!(chunk.get_block(-1, 0, 0), None);
        assert_eq!(chunk.get_block(CHUNK_SIZE, 0, 0), None);
        assert_eq!(chunk.get_block(0, -1, 0), None);
        assert_eq!(chunk.get_block(0, WORLD_HEIGHT, 0), None);
        assert_eq!(chunk.get_block(0, 0, -1), None);
        assert_eq!(chunk.get_block(0, 0, CHUNK_SIZE), None);
    }

    #[test]
    fn set_block_outside_the_chunk_is_ignored() {
        let mut chunk = Chunk::new(0, 0);
        chunk.set_block(-1, 0, 0, BlockType::Stone);
        chunk.set_block(0, WORLD_HEIGHT, 0, BlockType::Stone);
        assert_eq!(chunk.solid_count(), 0);
    }

    #[test]
    fn lone_voxel_exposes_all_six_faces() {
        let mut chunk = Chunk::new(0, 0);
        chunk.set_block(8, 100, 8, BlockType::Dirt);
        assert_eq!(chunk.compute_exposed_faces(), 6);
        let mask = chunk.face_mask(8, 100, 8).unwrap();
        for face in Face::ALL {
            assert!(mask.contains(face));
        }
    }

    #[test]
    fn solid_neighbor_covers_the_shared_face() {
        let mut chunk = Chunk::new(0, 0);
        chunk.set_block(8, 100, 8, BlockType::Dirt);
        chunk.set_block(8, 101, 8, BlockType::Dirt);
        assert_eq!(chunk.compute_exposed_faces(), 10);

        let lower = chunk.face_mask(8, 100, 8).unwrap();
        assert!(!lower.contains(Face::Top));
        assert!(lower.contains(Face::Bottom));

        let upper = chunk.face_mask(8, 101, 8).unwrap();
        assert!(!upper.contains(Face::Bottom));
        assert!(upper.contains(Face::Top));
    }

    #[test]
    fn chunk_bounds_count_as_exposed() {
        let mut chunk = Chunk::new(0, 0);
        chunk.set_block(0, 0, 0, BlockType::Stone);
        chunk.set_block(1, 0, 0, BlockType::Stone);
        chunk.compute_exposed_faces();

        let corner = chunk.face_mask(0, 0, 0).unwrap();
        assert!(corner.contains(Face::Left));
        assert!(corner.contains(Face::Back));
        assert!(corner.contains(Face::Bottom));
        assert!(!corner.contains(Face::Right));
    }

    #[test]
    fn buried_voxel_exposes_nothing() {
        let mut chunk = Chunk::new(0, 0);
        for x in 7..=9 {
            for y in 99..=101 {
                for z in 7..=9 {
                    chunk.set_block(x, y, z, BlockType::Stone);
                }
            }
        }
        chunk.compute_exposed_faces();
        let center = chunk.face_mask(8, 100, 8).unwrap();
        assert!(center.is_empty());
        // 3x3x3 cube: only the 54 outer faces remain
        assert_eq!(chunk.faces(), 54);
    }

    #[test]
    fn face_total_equals_the_sum_of_voxel_masks() {
        let mut chunk = Chunk::new(0, 0);
        for x in 0..CHUNK_SIZE {
            for z in 0..CHUNK_SIZE {
                for y in 0..8 + (x * z) % 5 {
                    chunk.set_block(x, y, z, BlockType::Dirt);
                }
            }
        }
        let total = chunk.compute_exposed_faces();

        let mut summed = 0;
        for x in 0..CHUNK_SIZE {
            for y in 0..WORLD_HEIGHT {
                for z in 0..CHUNK_SIZE {
                    summed += chunk.face_mask(x, y, z).unwrap().count();
                }
            }
        }
        assert_eq!(total, summed);
        assert_eq!(chunk.faces(), summed);
    }

    #[test]
    fn exposure_pass_is_idempotent() {
        let mut chunk = Chunk::new(0, 0);
        chunk.set_block(3, 50, 3, BlockType::Sand);
        chunk.set_block(3, 51, 3, BlockType::Sand);
        let first = chunk.compute_exposed_faces();
        let second = chunk.compute_exposed_faces();
        assert_eq!(first, second);
    }

    #[test]
    fn mesh_buffers_match_the_face_count() {
        let mut chunk = Chunk::new(0, 0);
        chunk.set_block(5, 20, 5, BlockType::Dirt);
        chunk.set_block(5, 21, 5, BlockType::Brick);
        let faces = chunk.compute_exposed_faces();
        chunk.build_mesh();

        assert_eq!(chunk.mesh().faces(), faces);
        assert_eq!(chunk.mesh().positions().len(), faces as usize * 18);
        assert_eq!(chunk.mesh().uvs().len(), faces as usize * 12);
        assert_eq!(chunk.vertex_count(), faces * 6);
    }

    #[test]
    fn mesh_positions_are_offset_by_chunk_coordinates() {
        let mut near = Chunk::new(0, 0);
        near.set_block(0, 10, 0, BlockType::Stone);
        near.compute_exposed_faces();
        near.build_mesh();

        let mut far = Chunk::new(2, -1);
        far.set_block(0, 10, 0, BlockType::Stone);
        far.compute_exposed_faces();
        far.build_mesh();

        for (a, b) in near
            .mesh()
            .positions()
            .chunks_exact(3)
            .zip(far.mesh().positions().chunks_exact(3))
        {
            assert_eq!(b[0], a[0] + 32.0);
            assert_eq!(b[1], a[1]);
            assert_eq!(b[2], a[2] - 16.0);
        }
    }

    #[test]
    fn identical_chunks_mesh_identically() {
        let build = || {
            let mut chunk = Chunk::new(4, -7);
            for x in 0..CHUNK_SIZE {
                for z in 0..CHUNK_SIZE {
                    let height = 10 + (x + z) % 3;
                    for y in 0..height {
                        chunk.set_block(x, y, z, BlockType::Dirt);
                    }
                }
            }
            chunk.compute_exposed_faces();
            chunk.build_mesh();
            chunk
        };
        let a = build();
        let b = build();
        assert_eq!(a.faces(), b.faces());
        assert_eq!(a.mesh(), b.mesh());
    }
}
