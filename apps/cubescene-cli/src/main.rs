use std::path::PathBuf;
use std::time::Duration;

use anyhow::Context;
use clap::{Parser, Subcommand};
use cubescene_assets::AssetStore;
use cubescene_common::Hit;
use cubescene_input::{Action, InputState, Viewport};
use cubescene_kernel::{SceneAssets, SceneConfig, SimConfig, Simulation, demo_world, pick};
use cubescene_render::{BufferRenderer, DebugTextRenderer, RenderView, Renderer};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "cubescene-cli", about = "Headless driver for the cubescene engine")]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    /// Simulation config (JSON)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Scene layout config (JSON)
    #[arg(long, global = true)]
    scene_config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print crate versions and default scene stats
    Info,
    /// Advance the simulation and print the resulting state
    Simulate {
        /// Irregular frame times in milliseconds, e.g. `3,40,9`
        #[arg(long, value_delimiter = ',')]
        frames_ms: Vec<u64>,
        /// Number of uniform frames, used when no frame list is given
        #[arg(short, long, default_value = "60")]
        count: u32,
        /// Duration of each uniform frame in milliseconds
        #[arg(long, default_value = "16")]
        frame_ms: u64,
    },
    /// Cast a ray from a screen point through the default camera
    Pick {
        x: f32,
        y: f32,
        #[arg(long, default_value = "1280")]
        width: f32,
        #[arg(long, default_value = "720")]
        height: f32,
    },
    /// Print the scene hierarchy
    Dump {
        /// Deepest level to print (root is 0)
        #[arg(long)]
        max_depth: Option<usize>,
        /// Ticks to run before dumping
        #[arg(short, long, default_value = "0")]
        ticks: u32,
    },
}

fn load_simulation(cli: &Cli) -> anyhow::Result<Simulation> {
    let sim_config = match &cli.config {
        Some(path) => SimConfig::load(path)
            .with_context(|| format!("loading sim config {}", path.display()))?,
        None => SimConfig::default(),
    };
    let scene_config = match &cli.scene_config {
        Some(path) => SceneConfig::load(path)
            .with_context(|| format!("loading scene config {}", path.display()))?,
        None => SceneConfig::default(),
    };

    let store = AssetStore::with_defaults();
    let assets = SceneAssets::from_store(&store)?;
    tracing::debug!(assets = store.len(), "asset store ready");
    Ok(Simulation::new(demo_world(&assets, &scene_config), sim_config))
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(filter))
        .init();

    let mut sim = load_simulation(&cli)?;

    match cli.command {
        Commands::Info => {
            println!("cubescene-cli v{}", env!("CARGO_PKG_VERSION"));
            println!("common: {}", cubescene_common::crate_info());
            println!("tree: {}", cubescene_tree::crate_info());
            println!("assets: {}", cubescene_assets::crate_info());
            println!("kernel: {}", cubescene_kernel::crate_info());
            println!("render: {}", cubescene_render::crate_info());
            println!("input: {}", cubescene_input::crate_info());

            let tree = sim.tree();
            println!(
                "scene: models={}, renderable={}, depth={}, step={:?}",
                tree.len(),
                tree.value().cube_count,
                tree.depth(),
                sim.config().fixed_step
            );
        }
        Commands::Simulate {
            frames_ms,
            count,
            frame_ms,
        } => {
            let frames: Vec<Duration> = if frames_ms.is_empty() {
                vec![Duration::from_millis(frame_ms); count as usize]
            } else {
                frames_ms.into_iter().map(Duration::from_millis).collect()
            };

            let mut ticks = 0u64;
            for frame in &frames {
                ticks += u64::from(sim.advance(*frame));
            }
            let total: Duration = frames.iter().sum();
            println!(
                "Simulated {} frames ({total:?}): ticks={ticks}, tick={}, lag={:?}",
                frames.len(),
                sim.tick(),
                sim.lag()
            );
            println!("State hash: {:#018x}", sim.state_hash());

            let view = RenderView::from_input(sim.input(), 16.0 / 9.0);
            if let Some(frame) = BufferRenderer::new().render(sim.tree(), &view, sim.phase()) {
                println!(
                    "Buffers: models={}, vertices={}, position bytes={}, matrix bytes={}",
                    frame.buffers.model_count(),
                    frame.buffers.vertex_count(),
                    frame.buffers.position_bytes().len(),
                    frame.buffers.matrix_bytes().len()
                );
            }
        }
        Commands::Pick {
            x,
            y,
            width,
            height,
        } => {
            let viewport = Viewport::new(width, height)?;
            let view = RenderView {
                aspect: viewport.aspect(),
                ..RenderView::default()
            };
            let mut input = InputState::new(viewport, view.view_projection());
            let snapshot = input.apply(Action::PointerDown { x, y })?;
            sim.set_input(&snapshot);

            let Some(ray) = snapshot.pick_ray else {
                println!("No pick ray");
                return Ok(());
            };
            let o = ray.origin();
            let d = ray.direction();
            println!(
                "Ray: origin=({:.2}, {:.2}, {:.2}) direction=({:.3}, {:.3}, {:.3})",
                o.x, o.y, o.z, d.x, d.y, d.z
            );

            let mut hits = pick(sim.tree(), &ray);
            Hit::sort_by_distance(&mut hits);
            if hits.is_empty() {
                println!("No hits");
            }
            for hit in &hits {
                println!("  {:>8.3}  {}", hit.distance, hit.id);
            }
            if let Some(hit) = sim.pick_pending() {
                println!("Closest: {}", hit.id);
            }
        }
        Commands::Dump { max_depth, ticks } => {
            for _ in 0..ticks {
                sim.step();
            }
            let renderer = match max_depth {
                Some(depth) => DebugTextRenderer::with_max_depth(depth),
                None => DebugTextRenderer::new(),
            };
            let view = RenderView::from_input(sim.input(), 16.0 / 9.0);
            print!("{}", renderer.render(sim.tree(), &view, sim.phase()));
        }
    }

    Ok(())
}
