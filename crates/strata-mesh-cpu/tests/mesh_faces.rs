use proptest::prelude::*;
use strata_blocks::Block;
use strata_chunk::VoxelGrid;
use strata_geom::Vec3;
use strata_mesh_cpu::build_chunk_mesh;
use strata_world::ChunkCoord;

fn empty_grid(width: usize, height: usize) -> Vec<Block> {
    let padded = width + 2;
    vec![Block::AIR; padded * padded * height]
}

fn set(blocks: &mut [Block], width: usize, x: usize, y: usize, z: usize, b: Block) {
    let padded = width + 2;
    blocks[(z * padded + y) * padded + x] = b;
}

#[test]
fn isolated_voxel_emits_six_quads() {
    let (w, h) = (4, 8);
    let coord = ChunkCoord::new(0, 0);
    let mut blocks = empty_grid(w, h);
    set(&mut blocks, w, 2, 2, 3, Block::STONE);
    let grid = VoxelGrid::from_blocks(coord, w, h, blocks);

    let mesh = build_chunk_mesh(&grid);
    assert_eq!(mesh.len(), 36, "6 faces, 2 triangles each, 3 vertices per triangle");
    assert_eq!(mesh.triangle_count(), 12);
}

proptest! {
    // Any single voxel surrounded by air meshes to a full cube, wherever
    // it sits in the interior, including the open top and bottom layers.
    #[test]
    fn any_isolated_voxel_meshes_to_a_cube(x in 1usize..=4, y in 1usize..=4, z in 0usize..8) {
        let (w, h) = (4, 8);
        let coord = ChunkCoord::new(0, 0);
        let mut blocks = empty_grid(w, h);
        set(&mut blocks, w, x, y, z, Block::STONE);
        let grid = VoxelGrid::from_blocks(coord, w, h, blocks);
        let mesh = build_chunk_mesh(&grid);
        prop_assert_eq!(mesh.len(), 36);
    }
}

#[test]
fn buried_voxel_emits_nothing() {
    let (w, h) = (4, 8);
    let coord = ChunkCoord::new(0, 0);
    let mut blocks = empty_grid(w, h);
    // Solid 3x3x3 including halo cells around the center voxel, so every
    // neighbor of (2,2,3) is non-air.
    for z in 2..5 {
        for y in 1..4 {
            for x in 1..4 {
                set(&mut blocks, w, x, y, z, Block::STONE);
            }
        }
    }
    let grid = VoxelGrid::from_blocks(coord, w, h, blocks);
    let mesh = build_chunk_mesh(&grid);

    // The center voxel contributes no faces; count faces touching it.
    let center_min = Vec3::new(1.0, 1.0, 3.0);
    let center_max = Vec3::new(2.0, 2.0, 4.0);
    let center_faces = mesh
        .vertices()
        .chunks(3)
        .filter(|tri| {
            tri.iter().all(|v| {
                v.position.x >= center_min.x
                    && v.position.x <= center_max.x
                    && v.position.y >= center_min.y
                    && v.position.y <= center_max.y
                    && v.position.z >= center_min.z
                    && v.position.z <= center_max.z
            })
        })
        .count();
    assert_eq!(center_faces, 0, "fully buried voxel must not emit faces");
}

#[test]
fn halo_occludes_boundary_faces() {
    let (w, h) = (4, 8);
    let coord = ChunkCoord::new(0, 0);
    let mut blocks = empty_grid(w, h);
    // Interior voxel on the -x boundary plus a halo neighbor beside it.
    set(&mut blocks, w, 1, 2, 3, Block::STONE);
    set(&mut blocks, w, 0, 2, 3, Block::STONE);
    let grid = VoxelGrid::from_blocks(coord, w, h, blocks);

    let mesh = build_chunk_mesh(&grid);
    // 5 visible faces: the -x face is culled by the halo block, which is
    // itself outside the interior and never meshed.
    assert_eq!(mesh.len(), 5 * 6);
}

#[test]
fn normals_point_away_from_the_cube() {
    let (w, h) = (4, 8);
    let coord = ChunkCoord::new(0, 0);
    let mut blocks = empty_grid(w, h);
    set(&mut blocks, w, 2, 2, 3, Block::STONE);
    let grid = VoxelGrid::from_blocks(coord, w, h, blocks);
    let mesh = build_chunk_mesh(&grid);

    let center = Vec3::new(1.5, 1.5, 3.5);
    for tri in mesh.vertices().chunks(3) {
        let centroid = Vec3::new(
            (tri[0].position.x + tri[1].position.x + tri[2].position.x) / 3.0,
            (tri[0].position.y + tri[1].position.y + tri[2].position.y) / 3.0,
            (tri[0].position.z + tri[1].position.z + tri[2].position.z) / 3.0,
        );
        let outward = centroid - center;
        assert!(
            outward.dot(tri[0].normal) > 0.0,
            "normal {:?} does not face outward at {:?}",
            tri[0].normal,
            centroid
        );
        // Winding agrees with the stored normal.
        let e1 = tri[1].position - tri[0].position;
        let e2 = tri[2].position - tri[0].position;
        assert!(e1.cross(e2).dot(tri[0].normal) > 0.0, "winding flipped");
    }
}

#[test]
fn mesh_is_translated_to_world_space() {
    let (w, h) = (4, 8);
    let coord = ChunkCoord::new(3, -2);
    let mut blocks = empty_grid(w, h);
    set(&mut blocks, w, 1, 1, 0, Block::GRASS);
    let grid = VoxelGrid::from_blocks(coord, w, h, blocks);
    let mesh = build_chunk_mesh(&grid);

    assert!(!mesh.is_empty());
    for v in mesh.vertices() {
        assert!(v.position.x >= 12.0 && v.position.x <= 13.0);
        assert!(v.position.y >= -8.0 && v.position.y <= -7.0);
        assert!(v.position.z >= 0.0 && v.position.z <= 1.0);
    }
}

#[test]
fn uvs_stay_inside_one_atlas_cell() {
    let (w, h) = (4, 8);
    let coord = ChunkCoord::new(0, 0);
    let mut blocks = empty_grid(w, h);
    set(&mut blocks, w, 2, 2, 3, Block::GRASS);
    let grid = VoxelGrid::from_blocks(coord, w, h, blocks);
    let mesh = build_chunk_mesh(&grid);

    let cell = 1.0 / 16.0;
    for quad in mesh.vertices().chunks(6) {
        let us: Vec<f32> = quad.iter().map(|v| v.uv.x).collect();
        let vs: Vec<f32> = quad.iter().map(|v| v.uv.y).collect();
        let du = us.iter().cloned().fold(f32::MIN, f32::max)
            - us.iter().cloned().fold(f32::MAX, f32::min);
        let dv = vs.iter().cloned().fold(f32::MIN, f32::max)
            - vs.iter().cloned().fold(f32::MAX, f32::min);
        assert!((du - cell).abs() < 1e-6, "quad spans {du} in u, expected one cell");
        assert!((dv - cell).abs() < 1e-6, "quad spans {dv} in v, expected one cell");
    }
}
