use std::error::Error;
use std::path::PathBuf;
use std::sync::Arc;

use clap::Parser;
use log::info;

use strata_engine::{Engine, HeadlessDevice, Observer};
use strata_geom::Vec3;
use strata_world::{World, WorldParams, load_params_from_path};

/// Headless streaming demo: walk an observer across the world and report
/// what the engine would hand the renderer each frame.
#[derive(Parser, Debug)]
#[command(name = "strata", about = "chunk streaming and meshing demo")]
struct Args {
    /// World seed.
    #[arg(long, default_value_t = 1337)]
    seed: i32,
    /// Optional TOML world config; defaults are used when omitted.
    #[arg(long)]
    config: Option<PathBuf>,
    /// Render distance override in chunks.
    #[arg(long)]
    radius: Option<i32>,
    /// Frames to simulate.
    #[arg(long, default_value_t = 240)]
    frames: u32,
    /// Observer speed in blocks per frame along +x.
    #[arg(long, default_value_t = 0.8)]
    speed: f32,
}

fn main() -> Result<(), Box<dyn Error>> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let args = Args::parse();

    let mut params = match args.config.as_deref() {
        Some(path) => load_params_from_path(path)?,
        None => WorldParams::default(),
    };
    if let Some(radius) = args.radius {
        params.render_distance = radius;
    }

    let sea = params.sea_level as f32;
    let world = Arc::new(World::new(args.seed, params));
    info!(
        "world seed {} | chunk {}x{}x{} | render distance {}",
        world.seed,
        world.chunk_width(),
        world.chunk_width(),
        world.chunk_height(),
        world.render_distance()
    );

    let mut engine = Engine::new(Arc::clone(&world), HeadlessDevice::default());
    let mut observer = Observer {
        position: Vec3::new(0.0, 0.0, sea + 24.0),
        yaw: 90.0,
    };

    for frame in 0..args.frames {
        let mut drawn = 0usize;
        let mut vertices = 0usize;
        engine.render(&observer, |draws| {
            drawn = draws.len();
            vertices = draws.iter().map(|d| d.buffer.len()).sum();
        });
        if frame % 60 == 0 {
            info!(
                "frame {frame:4} | chunks cached {:4} | drawn {drawn:3} | vertices {vertices:8}",
                engine.cache().len()
            );
        }
        observer.position += Vec3::new(args.speed, 0.0, 0.0);
    }

    // Let in-flight builds land so the final report reflects a quiet pipeline.
    while engine.has_pending_builds() {
        engine.frame(&observer);
        std::thread::sleep(std::time::Duration::from_millis(2));
    }

    let draws = engine.frame(&observer);
    let vertices: usize = draws.iter().map(|d| d.buffer.len()).sum();
    let drawn = draws.len();
    drop(draws);
    info!(
        "done: {} chunks generated, {} GPU buffers allocated, {} chunks drawn at rest ({} vertices)",
        engine.cache().len(),
        engine.device().allocations(),
        drawn,
        vertices
    );
    Ok(())
}
