//! Headless streaming demo.
//!
//! Flies a viewer in a straight line over procedural terrain and logs what
//! the world does each tick: chunks created, chunks evicted, and how much
//! geometry the visible window carries.

use std::path::PathBuf;
use std::time::Instant;

use clap::Parser;
use glam::Vec3;

use voxcraft::{
    ChunkGenerator, ChunkLoader, CreationAnchor, EvictionRule, Settings, TickReport, World,
};

/// Voxel terrain streaming demo
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Streaming passes to run
    #[arg(long, default_value_t = 120)]
    ticks: u32,

    /// Viewer speed in world units per tick
    #[arg(long, default_value_t = 4.0)]
    speed: f32,

    /// Flight heading in degrees on the X/Z plane (0 flies toward +X)
    #[arg(long, default_value_t = 45.0)]
    heading: f32,

    /// Generate chunks on the main thread instead of worker threads
    #[arg(long, default_value_t = false)]
    sync: bool,

    /// Worker threads for chunk generation (0 = one per CPU)
    #[arg(long)]
    workers: Option<usize>,

    /// Chunk visibility radius
    #[arg(long)]
    render_radius: Option<i32>,

    /// Chunk eviction radius
    #[arg(long)]
    delete_radius: Option<i32>,

    /// Evict when either axis passes the delete radius
    #[arg(long, default_value_t = false)]
    evict_either_axis: bool,

    /// Center the creation window on the viewer
    #[arg(long, default_value_t = false)]
    follow_viewer: bool,

    /// Settings file (TOML)
    #[arg(long)]
    config: Option<PathBuf>,
}

pub fn run_demo() {
    let args = Args::parse();

    let mut settings = match &args.config {
        Some(path) => match Settings::load(path) {
            Ok(settings) => settings,
            Err(e) => {
                tracing::error!("Failed to load {}: {}", path.display(), e);
                return;
            }
        },
        None => Settings::default(),
    };
    apply_overrides(&mut settings, &args);

    let generator = ChunkGenerator::new(settings.terrain.clone());
    let mut world = World::new(settings.streaming);

    let heading = args.heading.to_radians();
    let step = Vec3::new(heading.cos(), 0.0, heading.sin()) * args.speed;
    let mut viewer = Vec3::new(0.0, 80.0, 0.0);

    tracing::info!(
        "Streaming for {} ticks at {} units/tick, render radius {}, delete radius {}",
        args.ticks,
        args.speed,
        settings.streaming.render_radius,
        settings.streaming.delete_radius
    );

    let started = Instant::now();
    let mut created_total = 0usize;
    let mut evicted_total = 0usize;

    if args.sync {
        for tick in 0..args.ticks {
            let report = world.update(viewer, &generator);
            log_tick(tick, &world, &report);
            created_total += report.created.len();
            evicted_total += report.evicted.len();
            viewer += step;
        }
    } else {
        let mut loader = if settings.loader.workers == 0 {
            ChunkLoader::new(generator.clone())
        } else {
            ChunkLoader::with_worker_count(settings.loader.workers, generator.clone())
        };
        tracing::info!("Generating on {} worker threads", loader.worker_count());

        for tick in 0..args.ticks {
            let report = stream_tick(
                &mut world,
                &mut loader,
                viewer,
                settings.loader.max_chunks_per_tick,
            );
            log_tick(tick, &world, &report);
            created_total += report.created.len();
            evicted_total += report.evicted.len();
            viewer += step;
        }
        loader.clear_pending();
    }

    tracing::info!(
        "Done in {:.2?}: {} chunks created, {} evicted, {} resident, {} visible faces",
        started.elapsed(),
        created_total,
        evicted_total,
        world.chunk_count(),
        world.visible_faces()
    );
}

/// One asynchronous streaming pass: recenter and evict, hand the missing
/// coordinates to the workers, then accept up to `max_chunks` finished
/// chunks.
fn stream_tick(
    world: &mut World,
    loader: &mut ChunkLoader,
    viewer: Vec3,
    max_chunks: usize,
) -> TickReport {
    let center = world.retarget(viewer);
    let evicted = world.evict_out_of_range();
    loader.request_batch(&world.missing_coords(), center);

    let mut created = Vec::new();
    for chunk in loader.poll_results(max_chunks) {
        let coords = chunk.coords();
        if world.publish(chunk) {
            created.push(coords);
        }
    }
    TickReport {
        center,
        created,
        evicted,
    }
}

fn log_tick(tick: u32, world: &World, report: &TickReport) {
    tracing::info!(
        "tick {:>4}: center ({}, {}), +{}/-{} chunks, {} resident, {} visible, {} faces",
        tick,
        report.center.0,
        report.center.1,
        report.created.len(),
        report.evicted.len(),
        world.chunk_count(),
        world.visible().count(),
        world.visible_faces()
    );
    for &(p, q) in &report.created {
        if let Some(chunk) = world.chunk(p, q) {
            tracing::debug!(
                "chunk ({}, {}): {} faces, {} B geometry",
                p,
                q,
                chunk.faces(),
                chunk.mesh().position_bytes().len() + chunk.mesh().uv_bytes().len()
            );
        }
    }
}

fn apply_overrides(settings: &mut Settings, args: &Args) {
    if let Some(radius) = args.render_radius {
        settings.streaming.render_radius = radius;
    }
    if let Some(radius) = args.delete_radius {
        settings.streaming.delete_radius = radius;
    }
    if args.evict_either_axis {
        settings.streaming.eviction = EvictionRule::EitherAxis;
    }
    if args.follow_viewer {
        settings.streaming.anchor = CreationAnchor::Viewer;
    }
    if let Some(workers) = args.workers {
        settings.loader.workers = workers;
    }
    settings.normalize();
}
