use std::hint::black_box;
use std::time::{Duration, Instant};

use cubescene_common::Ray;
use cubescene_kernel::{
    AnimationParams, BoundsPolicy, SceneAssets, SceneConfig, SimConfig, Simulation, animate,
    demo_world, pick, update_world_from_root, with_bounds,
};
use glam::Vec3;

fn scene(terrain_side: u32) -> SceneConfig {
    SceneConfig {
        terrain_rows: terrain_side,
        terrain_cols: terrain_side,
        ..SceneConfig::default()
    }
}

fn bench_pipeline(terrain_side: u32, iterations: usize) {
    let definition = demo_world(&SceneAssets::default(), &scene(terrain_side));
    let models = definition.len();

    let start = Instant::now();
    for i in 0..iterations {
        let params = AnimationParams {
            phase_seconds: i as f32 / 60.0,
            ..AnimationParams::default()
        };
        let animated = animate(black_box(&definition), &params);
        let placed = update_world_from_root(animated);
        black_box(with_bounds(placed, BoundsPolicy::ChildUnion));
    }
    let elapsed = start.elapsed();
    let per_iter = elapsed / iterations as u32;
    println!(
        "  animate+world+bounds ({models} models, {iterations} iters): {per_iter:?}/iter, total {elapsed:?}"
    );
}

fn bench_advance(terrain_side: u32, frames: usize) {
    let definition = demo_world(&SceneAssets::default(), &scene(terrain_side));
    let mut sim = Simulation::new(definition, SimConfig::default());
    // Irregular frame times around 60 Hz
    let frame_times = [12u64, 17, 21, 16, 9, 25];

    let start = Instant::now();
    let mut ticks = 0u64;
    for i in 0..frames {
        let frame = Duration::from_millis(frame_times[i % frame_times.len()]);
        ticks += u64::from(sim.advance(black_box(frame)));
    }
    let elapsed = start.elapsed();
    let per_frame = elapsed / frames as u32;
    println!(
        "  advance ({} models, {frames} frames, {ticks} ticks): {per_frame:?}/frame, total {elapsed:?}",
        sim.tree().len()
    );
}

fn bench_pick(terrain_side: u32, iterations: usize) {
    let definition = demo_world(&SceneAssets::default(), &scene(terrain_side));
    let sim = Simulation::new(definition, SimConfig::default());
    let rays: Vec<Ray> = (0..16)
        .filter_map(|i| {
            let x = i as f32 - 8.0;
            Ray::through(Vec3::new(0.0, 10.0, 15.0), Vec3::new(x, 0.0, 0.0)).ok()
        })
        .collect();

    let start = Instant::now();
    let mut hits = 0usize;
    for i in 0..iterations {
        hits += black_box(pick(sim.tree(), black_box(&rays[i % rays.len()]))).len();
    }
    let elapsed = start.elapsed();
    let per_iter = elapsed / iterations as u32;
    println!(
        "  pick ({} models, {iterations} iters, {hits} hits): {per_iter:?}/iter, total {elapsed:?}",
        sim.tree().len()
    );
}

fn main() {
    println!("=== Frame Pipeline Benchmarks ===\n");

    println!("Tick pipeline:");
    bench_pipeline(12, 1000);
    bench_pipeline(50, 100);
    bench_pipeline(100, 10);

    println!("\nFixed-step advance:");
    bench_advance(12, 1000);
    bench_advance(100, 50);

    println!("\nPicking:");
    bench_pick(12, 10000);
    bench_pick(100, 1000);

    println!("\n=== Done ===");
}
