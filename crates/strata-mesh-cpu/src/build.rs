use log::debug;

use strata_blocks::{ATLAS_DIM, Block, atlas_cell};
use strata_chunk::VoxelGrid;
use strata_geom::{Vec2, Vec3};

use crate::buffer::{GeometryBuffer, Vertex};
use crate::face::Face;

/// Walks a halo-padded grid and emits one quad per visible face of every
/// non-air interior voxel. A face is visible iff the adjacent cell is air;
/// the halo stands in for neighbor chunks, and the span outside the
/// vertical extent reads as air. The finished buffer is translated once by
/// the chunk's world origin.
pub fn build_chunk_mesh(grid: &VoxelGrid) -> GeometryBuffer {
    let w = grid.width;
    let mut out = GeometryBuffer::default();
    // Rough floor: one top face per interior column.
    out.reserve_quads(w * w);

    for z in 0..grid.height as i32 {
        for y in 1..=w as i32 {
            for x in 1..=w as i32 {
                let block = grid.block_at_open(x, y, z);
                if block.is_air() {
                    continue;
                }
                // Local voxel min corner; padded x/y 1.. maps to local 0..
                let origin = Vec3::new((x - 1) as f32, (y - 1) as f32, z as f32);
                for face in Face::ALL {
                    let (dx, dy, dz) = face.delta();
                    if grid.block_at_open(x + dx, y + dy, z + dz).is_air() {
                        emit_face(&mut out, block, face, origin);
                    }
                }
            }
        }
    }

    out.translate(Vec3::new(
        (grid.coord.cx * w as i32) as f32,
        (grid.coord.cy * w as i32) as f32,
        0.0,
    ));
    debug!(
        "meshed chunk ({},{}) -> {} quads",
        grid.coord.cx,
        grid.coord.cy,
        out.len() / 6
    );
    out
}

/// Emits the unit-square quad for one voxel face. Corners run
/// counter-clockwise seen from outside, matching the `b`-`d` diagonal
/// decomposition in `GeometryBuffer::push_quad`.
fn emit_face(out: &mut GeometryBuffer, block: Block, face: Face, origin: Vec3) {
    let (x0, y0, z0) = (origin.x, origin.y, origin.z);
    let (x1, y1, z1) = (x0 + 1.0, y0 + 1.0, z0 + 1.0);

    let corners = match face {
        Face::PosZ => [
            Vec3::new(x0, y0, z1),
            Vec3::new(x1, y0, z1),
            Vec3::new(x1, y1, z1),
            Vec3::new(x0, y1, z1),
        ],
        Face::NegZ => [
            Vec3::new(x0, y0, z0),
            Vec3::new(x0, y1, z0),
            Vec3::new(x1, y1, z0),
            Vec3::new(x1, y0, z0),
        ],
        Face::PosX => [
            Vec3::new(x1, y0, z0),
            Vec3::new(x1, y1, z0),
            Vec3::new(x1, y1, z1),
            Vec3::new(x1, y0, z1),
        ],
        Face::NegX => [
            Vec3::new(x0, y0, z0),
            Vec3::new(x0, y0, z1),
            Vec3::new(x0, y1, z1),
            Vec3::new(x0, y1, z0),
        ],
        Face::PosY => [
            Vec3::new(x1, y1, z0),
            Vec3::new(x0, y1, z0),
            Vec3::new(x0, y1, z1),
            Vec3::new(x1, y1, z1),
        ],
        Face::NegY => [
            Vec3::new(x0, y0, z0),
            Vec3::new(x1, y0, z0),
            Vec3::new(x1, y0, z1),
            Vec3::new(x0, y0, z1),
        ],
    };

    let (ci, cj) = atlas_cell(block, face.role());
    let n = ATLAS_DIM as f32;
    let (u0, u1) = (ci as f32 / n, (ci + 1) as f32 / n);
    let (v0, v1) = (cj as f32 / n, (cj + 1) as f32 / n);
    let uvs = [
        Vec2::new(u0, v1),
        Vec2::new(u1, v1),
        Vec2::new(u1, v0),
        Vec2::new(u0, v0),
    ];

    let normal = face.normal();
    let mut quad = [Vertex::default(); 4];
    for (i, (&p, &uv)) in corners.iter().zip(uvs.iter()).enumerate() {
        quad[i] = Vertex {
            position: p,
            uv,
            normal,
        };
    }
    out.push_quad(quad[0], quad[1], quad[2], quad[3]);
}
