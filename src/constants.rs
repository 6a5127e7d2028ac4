// World constants
pub const WORLD_HEIGHT: i32 = 256;
pub const CHUNK_SIZE: i32 = 16;
pub const CHUNK_VOLUME: usize = (CHUNK_SIZE * WORLD_HEIGHT * CHUNK_SIZE) as usize;

// Streaming constants
pub const RENDER_RADIUS: i32 = 8;
pub const DELETE_RADIUS: i32 = 12;

// Terrain constants
pub const TERRAIN_FREQUENCY: f64 = 0.01;
pub const SHAPE_OCTAVES: u32 = 4;
pub const SHAPE_PERSISTENCE: f64 = 0.5;
pub const RELIEF_OCTAVES: u32 = 2;
pub const RELIEF_PERSISTENCE: f64 = 0.9;
pub const TERRAIN_LACUNARITY: f64 = 2.0;
pub const RELIEF_SCALE: f64 = 32.0;
pub const RELIEF_BASE: f64 = 16.0;
pub const SAND_HEIGHT: i32 = 12;

// Texture atlas: 8 material columns x 3 face rows
pub const ATLAS_COLUMNS: u32 = 8;
pub const ATLAS_ROWS: u32 = 3;
pub const ATLAS_COLUMN_WIDTH: f32 = 1.0 / ATLAS_COLUMNS as f32;
pub const ATLAS_ROW_HEIGHT: f32 = 1.0 / ATLAS_ROWS as f32;

// Mesh layout: two unindexed triangles per exposed face
pub const VERTS_PER_FACE: usize = 6;
pub const POSITION_COMPONENTS: usize = 3;
pub const UV_COMPONENTS: usize = 2;

// Background generation
pub const LOADER_REQUEST_QUEUE: usize = 256;
pub const LOADER_RESULT_QUEUE: usize = 64;
pub const MAX_CHUNKS_PER_TICK: usize = 4;
