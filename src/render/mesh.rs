use crate::constants::{
    ATLAS_COLUMN_WIDTH, ATLAS_ROW_HEIGHT, POSITION_COMPONENTS, UV_COMPONENTS, VERTS_PER_FACE,
};
use crate::core::block::{BlockType, Face};

const W: f32 = ATLAS_COLUMN_WIDTH;
const H: f32 = ATLAS_ROW_HEIGHT;

// Unit-cube face geometry, two triangles per face, wound counter-clockwise
// seen from outside the cube. Indexed by `Face`.
const FACE_POSITIONS: [[[f32; 3]; VERTS_PER_FACE]; 6] = [
    // Bottom (-Y)
    [
        [0.0, 0.0, 0.0],
        [1.0, 0.0, 0.0],
        [0.0, 0.0, 1.0],
        [1.0, 0.0, 0.0],
        [1.0, 0.0, 1.0],
        [0.0, 0.0, 1.0],
    ],
    // Top (+Y)
    [
        [0.0, 1.0, 0.0],
        [0.0, 1.0, 1.0],
        [1.0, 1.0, 0.0],
        [1.0, 1.0, 0.0],
        [0.0, 1.0, 1.0],
        [1.0, 1.0, 1.0],
    ],
    // Front (+Z)
    [
        [0.0, 0.0, 1.0],
        [1.0, 0.0, 1.0],
        [0.0, 1.0, 1.0],
        [1.0, 0.0, 1.0],
        [1.0, 1.0, 1.0],
        [0.0, 1.0, 1.0],
    ],
    // Back (-Z)
    [
        [0.0, 0.0, 0.0],
        [0.0, 1.0, 0.0],
        [1.0, 0.0, 0.0],
        [1.0, 0.0, 0.0],
        [0.0, 1.0, 0.0],
        [1.0, 1.0, 0.0],
    ],
    // Left (-X)
    [
        [0.0, 0.0, 1.0],
        [0.0, 1.0, 0.0],
        [0.0, 0.0, 0.0],
        [0.0, 0.0, 1.0],
        [0.0, 1.0, 1.0],
        [0.0, 1.0, 0.0],
    ],
    // Right (+X)
    [
        [1.0, 0.0, 1.0],
        [1.0, 0.0, 0.0],
        [1.0, 1.0, 0.0],
        [1.0, 0.0, 1.0],
        [1.0, 1.0, 0.0],
        [1.0, 1.0, 1.0],
    ],
];

// Atlas coordinates for the first material column. Tops sample the top row,
// bottoms the bottom row, the four sides the middle row. Materials shift
// these right by whole columns.
const FACE_UVS: [[[f32; 2]; VERTS_PER_FACE]; 6] = [
    // Bottom
    [
        [0.0, 2.0 * H],
        [W, 2.0 * H],
        [0.0, 1.0],
        [W, 2.0 * H],
        [W, 1.0],
        [0.0, 1.0],
    ],
    // Top
    [[0.0, 0.0], [0.0, H], [W, 0.0], [W, 0.0], [0.0, H], [W, H]],
    // Front
    [
        [0.0, 2.0 * H],
        [W, 2.0 * H],
        [0.0, H],
        [W, 2.0 * H],
        [W, H],
        [0.0, H],
    ],
    // Back
    [
        [0.0, 2.0 * H],
        [0.0, H],
        [W, 2.0 * H],
        [W, 2.0 * H],
        [0.0, H],
        [W, H],
    ],
    // Left
    [
        [W, 2.0 * H],
        [0.0, H],
        [0.0, 2.0 * H],
        [W, 2.0 * H],
        [W, H],
        [0.0, H],
    ],
    // Right
    [
        [0.0, 2.0 * H],
        [W, 2.0 * H],
        [W, H],
        [0.0, 2.0 * H],
        [W, H],
        [0.0, H],
    ],
];

/// Accumulates face quads into flat position/UV buffers.
#[derive(Debug, Default)]
pub struct MeshBuilder {
    positions: Vec<f32>,
    uvs: Vec<f32>,
    faces: u32,
}

impl MeshBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pre-sizes the buffers for a known face count.
    pub fn with_face_capacity(faces: usize) -> Self {
        MeshBuilder {
            positions: Vec::with_capacity(faces * VERTS_PER_FACE * POSITION_COMPONENTS),
            uvs: Vec::with_capacity(faces * VERTS_PER_FACE * UV_COMPONENTS),
            faces: 0,
        }
    }

    /// Appends one face of a voxel whose minimum corner sits at world
    /// `(wx, wy, wz)`. Empty voxels have no atlas column and are skipped.
    pub fn add_face(&mut self, face: Face, kind: BlockType, wx: f32, wy: f32, wz: f32) {
        let Some(u_offset) = kind.atlas_u_offset() else {
            return;
        };
        let positions = &FACE_POSITIONS[face.index()];
        let uvs = &FACE_UVS[face.index()];
        for v in 0..VERTS_PER_FACE {
            self.positions.push(positions[v][0] + wx);
            self.positions.push(positions[v][1] + wy);
            self.positions.push(positions[v][2] + wz);
            self.uvs.push(uvs[v][0] + u_offset);
            self.uvs.push(uvs[v][1]);
        }
        self.faces += 1;
    }

    pub fn face_count(&self) -> u32 {
        self.faces
    }

    pub fn finish(self) -> ChunkMesh {
        ChunkMesh {
            positions: self.positions,
            uvs: self.uvs,
            faces: self.faces,
        }
    }
}

/// Finished geometry for one chunk: interleaved-by-attribute vertex data,
/// six vertices per exposed face, no index buffer.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ChunkMesh {
    positions: Vec<f32>,
    uvs: Vec<f32>,
    faces: u32,
}

impl ChunkMesh {
    pub fn faces(&self) -> u32 {
        self.faces
    }

    /// Number of vertices to draw, six per face.
    pub fn vertex_count(&self) -> u32 {
        self.faces * VERTS_PER_FACE as u32
    }

    pub fn triangle_count(&self) -> u32 {
        self.faces * 2
    }

    pub fn is_empty(&self) -> bool {
        self.faces == 0
    }

    pub fn positions(&self) -> &[f32] {
        &self.positions
    }

    pub fn uvs(&self) -> &[f32] {
        &self.uvs
    }

    /// Position buffer as raw bytes, ready for upload.
    pub fn position_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.positions)
    }

    /// UV buffer as raw bytes, ready for upload.
    pub fn uv_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.uvs)
    }
}
