use crate::types::{Block, FaceRole};

/// Cells per axis in the square texture atlas.
pub const ATLAS_DIM: u32 = 16;

/// Column/row of a cell in the atlas grid.
pub type AtlasCell = (u32, u32);

/// Maps a block face to its atlas cell. Unknown block bytes fall back to the
/// debug checker cell so they stay visible instead of vanishing.
#[inline]
pub fn atlas_cell(block: Block, role: FaceRole) -> AtlasCell {
    match block {
        Block::GRASS => match role {
            FaceRole::Top => (1, 0),
            FaceRole::Bottom => (3, 0),
            FaceRole::Side => (2, 0),
        },
        Block::DIRT => (3, 0),
        Block::STONE => (0, 0),
        Block::SAND => (2, 1),
        Block::SNOW => match role {
            FaceRole::Top => (2, 4),
            FaceRole::Bottom => (3, 0),
            FaceRole::Side => (4, 4),
        },
        Block::ICE => (3, 4),
        Block::WATER => (13, 12),
        _ => (12, 1),
    }
}
