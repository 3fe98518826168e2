use std::sync::Arc;
use std::time::{Duration, Instant};

use log::debug;

use strata_geom::Vec3;
use strata_runtime::{BuildJob, Runtime};
use strata_world::{ChunkCoord, World};

use crate::cache::{ChunkCache, MeshState, coords_within};
use crate::gpu::GpuDevice;

/// The externally-integrated viewpoint: world position plus heading. The
/// engine only reads the position for chunk selection; heading is carried
/// for renderers that want it.
#[derive(Clone, Copy, Debug, Default)]
pub struct Observer {
    pub position: Vec3,
    pub yaw: f32,
}

/// One ready chunk for the external renderer: a world-space buffer and
/// the time since the chunk's first completed build.
pub struct DrawCall<'a, B> {
    pub coord: ChunkCoord,
    pub buffer: &'a B,
    pub age: Duration,
}

// Stable build identity over (coord, rev); FNV-1a 64-bit.
fn job_hash(coord: ChunkCoord, rev: u64) -> u64 {
    let mut h: u64 = 0xcbf29ce484222325;
    let mut write = |v: u64| {
        h ^= v;
        h = h.wrapping_mul(0x100000001b3);
    };
    write(coord.cx as u32 as u64);
    write(coord.cy as u32 as u64);
    write(rev);
    h
}

/// Per-frame streaming controller. One primary thread calls `frame`;
/// mesh builds run on the runtime's workers and are only ever observed
/// through the non-blocking drain.
pub struct Engine<D: GpuDevice> {
    world: Arc<World>,
    cache: ChunkCache<D::Buffer>,
    runtime: Runtime,
    device: D,
    radius: i32,
}

impl<D: GpuDevice> Engine<D> {
    pub fn new(world: Arc<World>, device: D) -> Self {
        let radius = world.render_distance();
        let runtime = Runtime::new(world.params().workers);
        let cache = ChunkCache::new(Arc::clone(&world));
        Self {
            world,
            cache,
            runtime,
            device,
            radius,
        }
    }

    #[inline]
    pub fn cache(&self) -> &ChunkCache<D::Buffer> {
        &self.cache
    }

    #[inline]
    pub fn device(&self) -> &D {
        &self.device
    }

    #[inline]
    pub fn render_distance(&self) -> i32 {
        self.radius
    }

    #[inline]
    pub fn jobs_submitted(&self) -> u64 {
        self.runtime.jobs_submitted()
    }

    /// Marks a chunk's mesh stale; the next frame that sees it in range
    /// schedules a rebuild.
    pub fn invalidate(&mut self, coord: ChunkCoord) {
        self.cache.invalidate(coord);
    }

    /// True while any visited chunk still has a build in flight.
    pub fn has_pending_builds(&self) -> bool {
        self.cache.building_count() > 0
    }

    /// Runs one frame: materialize chunks in range, advance dirty chunks
    /// into the pipeline, collect finished builds, and return the draw
    /// set. Chunks without a completed build contribute nothing this
    /// frame; nothing outside render distance is touched.
    pub fn frame(&mut self, observer: &Observer) -> Vec<DrawCall<'_, D::Buffer>> {
        let center = ChunkCoord::of_world(
            observer.position.x,
            observer.position.y,
            self.world.chunk_width(),
        );
        let visible = coords_within(center, self.radius);

        for &coord in &visible {
            self.advance_chunk(coord);
        }
        self.collect_results();

        let cache = &self.cache;
        visible
            .iter()
            .filter_map(|&coord| {
                let entry = cache.get(coord)?;
                if entry.state != MeshState::Clean {
                    return None;
                }
                let buffer = entry.buffer.as_ref()?;
                let age = entry
                    .loaded_at
                    .map(|t| t.elapsed())
                    .unwrap_or(Duration::ZERO);
                Some(DrawCall { coord, buffer, age })
            })
            .collect()
    }

    /// Callback form of `frame`: hands the draw set to the external
    /// renderer once per frame.
    pub fn render<F>(&mut self, observer: &Observer, draw: F)
    where
        F: FnOnce(&[DrawCall<'_, D::Buffer>]),
    {
        let draws = self.frame(observer);
        draw(&draws);
    }

    /// Dirty -> Building transition for one in-range chunk. Idempotent: a
    /// chunk already Building or Clean is left alone.
    fn advance_chunk(&mut self, coord: ChunkCoord) {
        let entry = self.cache.get_or_generate(coord);
        if entry.state != MeshState::Dirty {
            return;
        }
        if !entry.voxels.has_non_air() {
            // Nothing to mesh; an all-air chunk is Clean with no buffer.
            entry.buffer = None;
            entry.state = MeshState::Clean;
            entry.built_rev = entry.rev;
            entry.loaded_at.get_or_insert_with(Instant::now);
            return;
        }
        let rev = entry.rev;
        let job = BuildJob {
            coord,
            rev,
            job_id: job_hash(coord, rev),
            voxels: Arc::clone(&entry.voxels),
        };
        entry.state = MeshState::Building;
        self.runtime.submit_build_job(job);
    }

    /// Building -> Clean transitions observed by polling. Stale results
    /// (a rev bumped while the build was in flight) re-mark the chunk
    /// Dirty instead of publishing an outdated buffer.
    fn collect_results(&mut self) {
        for out in self.runtime.drain_worker_results() {
            let Some(entry) = self.cache.get_mut(out.coord) else {
                continue;
            };
            if out.rev != entry.rev {
                entry.state = MeshState::Dirty;
                continue;
            }
            if out.mesh.is_empty() {
                entry.buffer = None;
            } else {
                let mut buffer = self.device.allocate(out.mesh.len());
                self.device.upload(&mut buffer, out.mesh.vertices());
                entry.buffer = Some(buffer);
            }
            entry.state = MeshState::Clean;
            entry.built_rev = out.rev;
            entry.loaded_at.get_or_insert_with(Instant::now);
            debug!(
                "chunk ({}, {}) meshed: {} vertices in {}ms",
                out.coord.cx,
                out.coord.cy,
                out.mesh.len(),
                out.t_mesh_ms
            );
        }
    }
}
