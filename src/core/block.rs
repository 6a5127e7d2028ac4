use serde::{Deserialize, Serialize};

use crate::constants::ATLAS_COLUMN_WIDTH;

#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Default, Serialize, Deserialize)]
pub enum BlockType {
    #[default]
    Empty,
    Dirt,
    Sand,
    Stone,
    Brick,
}

impl BlockType {
    pub fn is_empty(self) -> bool {
        self == BlockType::Empty
    }

    pub fn is_solid(self) -> bool {
        !self.is_empty()
    }

    /// Column of this material in the texture atlas. `None` for `Empty`,
    /// which never reaches the mesher.
    pub fn atlas_column(self) -> Option<u32> {
        match self {
            BlockType::Empty => None,
            BlockType::Dirt => Some(0),
            BlockType::Sand => Some(1),
            BlockType::Stone => Some(2),
            BlockType::Brick => Some(3),
        }
    }

    /// Horizontal offset into the atlas for this material's column.
    pub fn atlas_u_offset(self) -> Option<f32> {
        self.atlas_column().map(|c| c as f32 * ATLAS_COLUMN_WIDTH)
    }
}

// Neighbor directions in mesher order: -Y, +Y, +Z, -Z, -X, +X.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
#[repr(u8)]
pub enum Face {
    Bottom = 0,
    Top = 1,
    Front = 2,
    Back = 3,
    Left = 4,
    Right = 5,
}

impl Face {
    pub const ALL: [Face; 6] = [
        Face::Bottom,
        Face::Top,
        Face::Front,
        Face::Back,
        Face::Left,
        Face::Right,
    ];

    pub fn index(self) -> usize {
        self as usize
    }

    pub fn offset(self) -> (i32, i32, i32) {
        match self {
            Face::Bottom => (0, -1, 0),
            Face::Top => (0, 1, 0),
            Face::Front => (0, 0, 1),
            Face::Back => (0, 0, -1),
            Face::Left => (-1, 0, 0),
            Face::Right => (1, 0, 0),
        }
    }
}

/// Which of a voxel's six faces are exposed, one bit per `Face`.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Default)]
pub struct FaceMask(u8);

impl FaceMask {
    pub const NONE: FaceMask = FaceMask(0);

    pub fn set(&mut self, face: Face) {
        self.0 |= 1 << face.index();
    }

    pub fn clear(&mut self, face: Face) {
        self.0 &= !(1 << face.index());
    }

    pub fn contains(self, face: Face) -> bool {
        self.0 & (1 << face.index()) != 0
    }

    pub fn count(self) -> u32 {
        self.0.count_ones()
    }

    pub fn is_empty(self) -> bool {
        self.0 == 0
    }

    pub fn iter(self) -> impl Iterator<Item = Face> {
        Face::ALL.into_iter().filter(move |f| self.contains(*f))
    }
}

#[derive(Clone, Copy, PartialEq, Eq, Debug, Default)]
pub struct Block {
    pub kind: BlockType,
    pub faces: FaceMask,
}

impl Block {
    pub fn new(kind: BlockType) -> Self {
        Block {
            kind,
            faces: FaceMask::NONE,
        }
    }

    pub fn is_solid(&self) -> bool {
        self.kind.is_solid()
    }
}
