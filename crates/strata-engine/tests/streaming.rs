use std::sync::Arc;
use std::thread;
use std::time::Duration;

use strata_engine::{ChunkCache, Engine, HeadlessDevice, Observer, coords_within};
use strata_geom::Vec3;
use strata_world::{ChunkCoord, World, WorldParams};

fn test_params() -> WorldParams {
    let mut p = WorldParams::default();
    p.chunk_width = 8;
    p.chunk_height = 64;
    p.render_distance = 2;
    p.workers = Some(2);
    p
}

fn observer_at(x: f32, y: f32) -> Observer {
    Observer {
        position: Vec3::new(x, y, 80.0),
        yaw: 0.0,
    }
}

/// Pump frames until no build is in flight, with a hard cap so a wedged
/// pipeline fails the test instead of hanging it.
fn settle(engine: &mut Engine<HeadlessDevice>, observer: &Observer) {
    for _ in 0..1000 {
        engine.frame(observer);
        if !engine.has_pending_builds() {
            return;
        }
        thread::sleep(Duration::from_millis(2));
    }
    panic!("mesh builds did not settle");
}

#[test]
fn disk_selection_is_exact() {
    let center = ChunkCoord::new(3, -1);
    let got = coords_within(center, 2);
    assert_eq!(got.len(), 13, "radius 2 disk holds 13 integer coords");

    let mut expected = Vec::new();
    for dy in -2..=2 {
        for dx in -2..=2i32 {
            if dx * dx + dy * dy <= 4 {
                expected.push(center.offset(dx, dy));
            }
        }
    }
    assert_eq!(got, expected, "row-major order with the disk filter");

    let mut dedup = got.clone();
    dedup.sort_by_key(|c| (c.cx, c.cy));
    dedup.dedup();
    assert_eq!(dedup.len(), got.len(), "no duplicate coordinates");
}

#[test]
fn streams_every_chunk_in_range() {
    let world = Arc::new(World::new(4242, test_params()));
    let mut engine = Engine::new(Arc::clone(&world), HeadlessDevice::default());
    let observer = observer_at(4.0, 4.0);

    engine.frame(&observer);
    // All 13 chunks of the radius-2 disk materialize on the first frame.
    assert_eq!(engine.cache().len(), 13);
    for coord in coords_within(ChunkCoord::new(0, 0), 2) {
        assert!(engine.cache().is_generated(coord));
    }

    settle(&mut engine, &observer);
    // Default terrain always has exposed surface, so every chunk draws.
    let mut drawn = 0usize;
    engine.render(&observer, |draws| {
        drawn = draws.len();
        for d in draws {
            assert!(!d.buffer.is_empty());
            assert!(d.buffer.len() <= d.buffer.capacity());
            assert!(d.buffer.len() % 3 == 0, "buffer is a whole triangle list");
        }
    });
    assert_eq!(drawn, 13);
}

#[test]
fn settled_chunks_are_not_rescheduled() {
    let world = Arc::new(World::new(7, test_params()));
    let mut engine = Engine::new(Arc::clone(&world), HeadlessDevice::default());
    let observer = observer_at(4.0, 4.0);

    settle(&mut engine, &observer);
    let submitted = engine.jobs_submitted();
    let allocations = engine.device().allocations();

    for _ in 0..10 {
        engine.frame(&observer);
    }
    assert_eq!(engine.jobs_submitted(), submitted, "Clean chunks stay off the queue");
    assert_eq!(
        engine.device().allocations(),
        allocations,
        "no GPU buffer is reallocated without a rebuild"
    );
}

#[test]
fn invalidate_triggers_exactly_one_rebuild() {
    let world = Arc::new(World::new(99, test_params()));
    let mut engine = Engine::new(Arc::clone(&world), HeadlessDevice::default());
    let observer = observer_at(4.0, 4.0);

    settle(&mut engine, &observer);
    let submitted = engine.jobs_submitted();

    engine.invalidate(ChunkCoord::new(0, 0));
    settle(&mut engine, &observer);
    assert_eq!(engine.jobs_submitted(), submitted + 1);

    let draws = engine.frame(&observer);
    assert_eq!(draws.len(), 13, "rebuilt chunk rejoined the draw set");
}

#[test]
fn chunks_outside_render_distance_are_untouched() {
    let world = Arc::new(World::new(11, test_params()));
    let mut engine = Engine::new(Arc::clone(&world), HeadlessDevice::default());
    let observer = observer_at(4.0, 4.0);

    settle(&mut engine, &observer);
    assert_eq!(engine.cache().len(), 13);
    assert!(!engine.cache().is_generated(ChunkCoord::new(3, 0)));

    // Moving the observer east by one chunk pulls in a new column and
    // leaves the now-out-of-range chunks cached but untouched.
    let moved = observer_at(12.0, 4.0);
    settle(&mut engine, &moved);
    assert!(engine.cache().is_generated(ChunkCoord::new(3, 0)));
    assert!(engine.cache().is_generated(ChunkCoord::new(-2, 0)), "no eviction");
}

#[test]
fn first_build_stamps_the_load_time() {
    let world = Arc::new(World::new(5, test_params()));
    let mut engine = Engine::new(Arc::clone(&world), HeadlessDevice::default());
    let observer = observer_at(4.0, 4.0);

    settle(&mut engine, &observer);
    let draws = engine.frame(&observer);
    assert!(draws.iter().all(|d| d.age > Duration::ZERO));
}

#[test]
#[should_panic(expected = "has not been generated")]
fn must_exist_accessor_panics_on_missing_chunk() {
    let world = Arc::new(World::new(1, test_params()));
    let cache: ChunkCache<()> = ChunkCache::new(world);
    let _ = cache.chunk(ChunkCoord::new(40, 40));
}
