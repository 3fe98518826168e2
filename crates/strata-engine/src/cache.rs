use std::sync::Arc;
use std::time::Instant;

use hashbrown::HashMap;
use log::debug;

use strata_chunk::VoxelGrid;
use strata_world::{ChunkCoord, World};

/// Mesh lifecycle for one chunk. Transitions happen only on the primary
/// thread; workers produce result values and never touch this state.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MeshState {
    /// Needs a rebuild, nothing scheduled.
    Dirty,
    /// A build is in flight; do not reschedule.
    Building,
    /// Current buffer (if any) reflects the latest revision.
    Clean,
}

/// Cache slot for one chunk: the immutable voxel snapshot plus the
/// derived, rebuildable mesh state.
pub struct ChunkEntry<B> {
    pub voxels: Arc<VoxelGrid>,
    pub state: MeshState,
    /// Bumped by `invalidate`; builds carry the rev they were cut from so
    /// stale results can be rejected.
    pub rev: u64,
    pub built_rev: u64,
    pub buffer: Option<B>,
    /// Set when the first build lands; drives renderer fade-in.
    pub loaded_at: Option<Instant>,
}

/// Lazily-populated map of chunk coordinate to chunk. Never evicts: a
/// generated chunk lives for the process lifetime, which bounds memory by
/// visited area rather than render distance.
pub struct ChunkCache<B> {
    world: Arc<World>,
    entries: HashMap<ChunkCoord, ChunkEntry<B>>,
}

impl<B> ChunkCache<B> {
    pub fn new(world: Arc<World>) -> Self {
        Self {
            world,
            entries: HashMap::new(),
        }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Pure lookup, no side effect.
    #[inline]
    pub fn is_generated(&self, coord: ChunkCoord) -> bool {
        self.entries.contains_key(&coord)
    }

    #[inline]
    pub fn get(&self, coord: ChunkCoord) -> Option<&ChunkEntry<B>> {
        self.entries.get(&coord)
    }

    #[inline]
    pub fn get_mut(&mut self, coord: ChunkCoord) -> Option<&mut ChunkEntry<B>> {
        self.entries.get_mut(&coord)
    }

    /// Must-already-exist accessor. Requesting an ungenerated chunk is a
    /// contract violation, not a recoverable condition.
    pub fn chunk(&self, coord: ChunkCoord) -> &ChunkEntry<B> {
        match self.entries.get(&coord) {
            Some(entry) => entry,
            None => panic!(
                "chunk ({}, {}) has not been generated yet",
                coord.cx, coord.cy
            ),
        }
    }

    /// Returns the chunk at `coord`, synthesizing terrain inline on first
    /// access. Generation is synchronous on the calling thread; only the
    /// mesh is built asynchronously.
    pub fn get_or_generate(&mut self, coord: ChunkCoord) -> &mut ChunkEntry<B> {
        let world = &self.world;
        self.entries.entry(coord).or_insert_with(|| {
            let t0 = Instant::now();
            let voxels = VoxelGrid::generate(world, coord);
            debug!(
                "generated chunk ({}, {}) in {}ms",
                coord.cx,
                coord.cy,
                t0.elapsed().as_millis()
            );
            ChunkEntry {
                voxels: Arc::new(voxels),
                state: MeshState::Dirty,
                rev: 1,
                built_rev: 0,
                buffer: None,
                loaded_at: None,
            }
        })
    }

    /// Explicitly dirties a chunk so the next frame rebuilds its mesh.
    /// The block data itself is immutable; this exists for callers that
    /// invalidate derived state (and for the contract tests).
    pub fn invalidate(&mut self, coord: ChunkCoord) {
        if let Some(entry) = self.entries.get_mut(&coord) {
            entry.rev += 1;
            entry.state = MeshState::Dirty;
        }
    }

    /// Chunks whose builds are currently in flight.
    pub fn building_count(&self) -> usize {
        self.entries
            .values()
            .filter(|e| e.state == MeshState::Building)
            .count()
    }
}

/// All coordinates within `radius` chunks of `center` by Euclidean
/// distance. Row-major bounding-box iteration filtered by the disk
/// predicate: deterministic order, no duplicates.
pub fn coords_within(center: ChunkCoord, radius: i32) -> Vec<ChunkCoord> {
    let r = radius.max(0);
    let r2 = i64::from(r) * i64::from(r);
    let mut out = Vec::new();
    for dy in -r..=r {
        for dx in -r..=r {
            let coord = center.offset(dx, dy);
            if coord.distance_sq(center) <= r2 {
                out.push(coord);
            }
        }
    }
    out
}
