//! Halo-padded dense chunk storage and synchronous terrain fill.
#![forbid(unsafe_code)]

use strata_blocks::Block;
use strata_world::{ChunkCoord, World};

/// One chunk's voxel data: `width x width` interior columns and `height`
/// layers, padded by a one-cell horizontal halo on every side. The halo is
/// filled with the same terrain rule as the interior, so face-visibility
/// checks at chunk boundaries never consult a neighbor chunk.
///
/// Block data is immutable after construction; only the derived mesh is
/// ever rebuilt.
#[derive(Clone, Debug)]
pub struct VoxelGrid {
    pub coord: ChunkCoord,
    pub width: usize,
    pub height: usize,
    blocks: Vec<Block>,
}

impl VoxelGrid {
    /// Horizontal extent of the padded array (`width + 2`).
    #[inline]
    pub fn padded(&self) -> usize {
        self.width + 2
    }

    /// Linear index into the padded array. `x` and `y` are padded-space
    /// (0 and `width + 1` address the halo), `z` is the layer.
    #[inline]
    pub fn idx(&self, x: usize, y: usize, z: usize) -> usize {
        let p = self.padded();
        (z * p + y) * p + x
    }

    /// Block at padded-space coordinates. Out-of-range coordinates panic,
    /// same as any slice index.
    #[inline]
    pub fn block_at(&self, x: usize, y: usize, z: usize) -> Block {
        self.blocks[self.idx(x, y, z)]
    }

    /// Signed-coordinate variant used by the mesher: anything outside the
    /// vertical span reads as air, so the world's floor and ceiling faces
    /// are emitted. Horizontal coordinates must stay inside the padded
    /// array; the halo guarantees the mesher never steps past it.
    #[inline]
    pub fn block_at_open(&self, x: i32, y: i32, z: i32) -> Block {
        if z < 0 || z >= self.height as i32 {
            return Block::AIR;
        }
        self.block_at(x as usize, y as usize, z as usize)
    }

    #[inline]
    pub fn has_non_air(&self) -> bool {
        self.blocks.iter().any(|b| !b.is_air())
    }

    /// Builds a grid from a prefilled padded block vector, resizing with
    /// air if the length does not match. Test and tooling entry point.
    pub fn from_blocks(coord: ChunkCoord, width: usize, height: usize, blocks: Vec<Block>) -> Self {
        let padded = width + 2;
        let expect = padded * padded * height;
        let mut b = blocks;
        if b.len() != expect {
            b.resize(expect, Block::AIR);
        }
        Self {
            coord,
            width,
            height,
            blocks: b,
        }
    }

    /// Synchronously synthesizes the chunk at `coord`: every interior and
    /// halo column is planned once and written bottom-up. Halo columns use
    /// the neighboring chunks' global coordinates, which keeps them
    /// bit-identical to what those chunks generate for themselves.
    pub fn generate(world: &World, coord: ChunkCoord) -> Self {
        let width = world.chunk_width();
        let height = world.chunk_height();
        let padded = width + 2;
        let mut blocks = vec![Block::AIR; padded * padded * height];

        let synth = world.make_synthesizer();
        let sea = world.sea_level();
        let base_x = coord.cx * width as i32;
        let base_y = coord.cy * width as i32;

        for ly in 0..padded {
            let wy = base_y + ly as i32 - 1;
            for lx in 0..padded {
                let wx = base_x + lx as i32 - 1;
                let plan = synth.column_plan(wx, wy);
                let top = plan.fill_top(sea).min(height as i32 - 1);
                for z in 0..=top {
                    let block = synth.block_for(&plan, z);
                    blocks[(z as usize * padded + ly) * padded + lx] = block;
                }
            }
        }

        Self {
            coord,
            width,
            height,
            blocks,
        }
    }
}
