//! Headless driver: streams a noise-generated world around a viewer flying
//! along +X, persisting chunks under a world directory.
#![forbid(unsafe_code)]

mod headless;
mod worldgen;

use std::error::Error;
use std::path::PathBuf;

use clap::Parser;
use strata_geom::Vec3;
use strata_runtime::{StreamSettings, Streamer, TickReport};

use headless::HeadlessBackend;
use worldgen::NoiseTerrain;

#[derive(Parser, Debug)]
#[command(name = "strata", about = "Stream a voxel world around a moving viewer")]
struct Args {
    /// World directory holding settings.bin and the chunk files
    #[arg(long, default_value = "worlds/default")]
    world: PathBuf,

    /// TOML stream settings, used when the world has no settings.bin yet
    #[arg(long)]
    config: Option<PathBuf>,

    /// Keep everything in memory
    #[arg(long)]
    no_disk: bool,

    #[arg(long, default_value_t = 1337)]
    seed: i32,

    /// Frames to simulate
    #[arg(long, default_value_t = 600)]
    frames: u32,

    #[arg(long, default_value_t = 16)]
    frame_ms: u32,

    /// Viewer speed in voxels per second
    #[arg(long, default_value_t = 32.0)]
    speed: f32,

    /// Debug-level logging unless RUST_LOG says otherwise
    #[arg(short, long)]
    verbose: bool,
}

fn init_logging(verbose: bool) {
    let level = if verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();
}

fn accumulate(total: &mut TickReport, r: &TickReport) {
    total.loaded += r.loaded;
    total.generated += r.generated;
    total.unloaded += r.unloaded;
    total.stored += r.stored;
    total.remeshed += r.remeshed;
    total.lod_changes += r.lod_changes;
}

fn main() -> Result<(), Box<dyn Error>> {
    let args = Args::parse();
    init_logging(args.verbose);

    let fallback = match &args.config {
        Some(path) => StreamSettings::from_path(path)?,
        None => StreamSettings::default(),
    };
    let terrain = NoiseTerrain::new(args.seed);
    let backend = HeadlessBackend::default();
    let mut streamer = if args.no_disk {
        Streamer::new(fallback, terrain, backend.clone())
    } else {
        Streamer::open(&args.world, fallback, terrain, backend.clone())?
    };
    log::info!("stream settings: {:?}", streamer.settings());

    let heading = Vec3::new(1.0, 0.0, 0.0);
    let step = args.speed * args.frame_ms as f32 / 1000.0;
    let mut viewer = Vec3::new(8.0, 96.0, 8.0);
    let mut total = TickReport::default();
    let mut drawn = 0usize;
    for _ in 0..args.frames {
        viewer += heading * step;
        let report = streamer.tick(viewer, args.frame_ms);
        accumulate(&mut total, &report);
        drawn += streamer.draw(viewer, Some(heading));
    }

    let stored = streamer.shutdown()?;
    let stats = backend.stats();
    log::info!(
        "done: loaded={} generated={} unloaded={} stored={} (+{} at shutdown) remeshed={} lod_changes={}",
        total.loaded,
        total.generated,
        total.unloaded,
        total.stored,
        stored,
        total.remeshed,
        total.lod_changes
    );
    log::info!(
        "meshes: created={} released={} live={} draws={} vertices={} indices={} mesh_draw_calls={}",
        stats.created.get(),
        stats.released.get(),
        stats.live(),
        stats.draws.get(),
        stats.vertices.get(),
        stats.indices.get(),
        drawn
    );
    Ok(())
}
