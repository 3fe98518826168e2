//! Mesh-build job queue and worker orchestration.
#![forbid(unsafe_code)]

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, AtomicUsize, Ordering};
use std::thread;
use std::time::Instant;

use crossbeam_channel::{Receiver, Sender, unbounded};
use log::trace;
use rayon::{ThreadPool, ThreadPoolBuilder};

use strata_chunk::VoxelGrid;
use strata_mesh_cpu::{GeometryBuffer, build_chunk_mesh};
use strata_world::ChunkCoord;

/// One scheduled mesh build. The voxel snapshot is immutable and shared,
/// so the job carries everything the worker needs; workers never touch
/// chunk state.
#[derive(Clone, Debug)]
pub struct BuildJob {
    pub coord: ChunkCoord,
    pub rev: u64,
    pub job_id: u64,
    pub voxels: Arc<VoxelGrid>,
}

/// Finished build, handed back to the primary thread for upload.
pub struct JobOut {
    pub coord: ChunkCoord,
    pub rev: u64,
    pub job_id: u64,
    pub mesh: GeometryBuffer,
    pub t_mesh_ms: u32,
}

fn process_build_job(job: BuildJob, tx: &Sender<JobOut>) {
    let BuildJob {
        coord,
        rev,
        job_id,
        voxels,
    } = job;
    let t0 = Instant::now();
    let mesh = build_chunk_mesh(&voxels);
    let t_mesh_ms = t0.elapsed().as_millis().min(u128::from(u32::MAX)) as u32;
    trace!(
        "build job {job_id:#018x} for ({},{}) rev {rev} done in {t_mesh_ms}ms",
        coord.cx, coord.cy
    );
    let _ = tx.send(JobOut {
        coord,
        rev,
        job_id,
        mesh,
        t_mesh_ms,
    });
}

/// Asynchronous mesh pipeline: a pool of named workers pulling jobs from
/// an unbounded channel. Submission and result collection never block the
/// calling thread.
pub struct Runtime {
    job_tx: Sender<BuildJob>,
    res_rx: Receiver<JobOut>,
    _pool: Arc<ThreadPool>,
    queued: Arc<AtomicUsize>,
    inflight: Arc<AtomicUsize>,
    submitted: AtomicU64,
    pub workers: usize,
}

impl Runtime {
    pub fn new(workers: Option<usize>) -> Self {
        let (job_tx, job_rx) = unbounded::<BuildJob>();
        let (res_tx, res_rx) = unbounded::<JobOut>();

        let workers = workers.unwrap_or_else(|| {
            thread::available_parallelism()
                .map(|n| n.get().saturating_sub(1).max(1))
                .unwrap_or(4)
        });

        let queued = Arc::new(AtomicUsize::new(0));
        let inflight = Arc::new(AtomicUsize::new(0));

        let pool = Arc::new(
            ThreadPoolBuilder::new()
                .num_threads(workers)
                .thread_name(|i| format!("strata-mesh-{i}"))
                .build()
                .expect("mesh worker pool"),
        );
        for _ in 0..workers {
            let rx = job_rx.clone();
            let tx = res_tx.clone();
            let queued = queued.clone();
            let inflight = inflight.clone();
            pool.spawn(move || {
                while let Ok(job) = rx.recv() {
                    queued.fetch_sub(1, Ordering::Relaxed);
                    inflight.fetch_add(1, Ordering::Relaxed);
                    process_build_job(job, &tx);
                    inflight.fetch_sub(1, Ordering::Relaxed);
                }
            });
        }

        Self {
            job_tx,
            res_rx,
            _pool: pool,
            queued,
            inflight,
            submitted: AtomicU64::new(0),
            workers,
        }
    }

    /// Enqueues a build. Never blocks; jobs always run to completion once
    /// accepted.
    pub fn submit_build_job(&self, job: BuildJob) {
        self.queued.fetch_add(1, Ordering::Relaxed);
        self.submitted.fetch_add(1, Ordering::Relaxed);
        if self.job_tx.send(job).is_err() {
            self.queued.fetch_sub(1, Ordering::Relaxed);
        }
    }

    /// Non-blocking drain of every finished build.
    pub fn drain_worker_results(&self) -> Vec<JobOut> {
        self.res_rx.try_iter().collect()
    }

    /// Builds accepted over the runtime's lifetime.
    pub fn jobs_submitted(&self) -> u64 {
        self.submitted.load(Ordering::Relaxed)
    }

    /// (queued, in-flight) job counts for debug overlays and logs.
    pub fn queue_debug_counts(&self) -> (usize, usize) {
        (
            self.queued.load(Ordering::Relaxed),
            self.inflight.load(Ordering::Relaxed),
        )
    }
}
