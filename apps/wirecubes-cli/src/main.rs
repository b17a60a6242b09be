use anyhow::Context;
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;
use wirecubes_common::GridCell;
use wirecubes_kernel::{ComposerConfig, Scene, SceneComposer, SceneSeed, SimplexField};
use wirecubes_render::{DebugTextRenderer, OrthoView, Renderer, SoftwareRenderer};
use wirecubes_tools::SceneInspector;

#[derive(Parser)]
#[command(name = "wirecubes-cli", about = "CLI tool for composing and rendering wirecube scenes")]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Args)]
struct SceneArgs {
    /// Master seed; a fresh one is drawn when omitted
    #[arg(short, long)]
    seed: Option<u64>,
    /// JSON file overriding composition constants
    #[arg(short, long)]
    config: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Print version and crate info
    Info,
    /// Compose a scene and print it as text
    Compose {
        #[command(flatten)]
        scene: SceneArgs,
        /// Also list every primitive's corners
        #[arg(long)]
        primitives: bool,
        /// Inspect a single cell, given as `i,j`
        #[arg(long, value_parser = parse_cell, allow_hyphen_values = true)]
        cell: Option<GridCell>,
    },
    /// Compose a scene and rasterize it to a PNG
    Render {
        #[command(flatten)]
        scene: SceneArgs,
        /// Square image size in pixels
        #[arg(long, default_value = "800")]
        size: u32,
        /// Output PNG path
        #[arg(short, long, default_value = "wirecubes.png")]
        out: PathBuf,
    },
}

fn parse_cell(s: &str) -> Result<GridCell, String> {
    let (i, j) = s
        .split_once(',')
        .ok_or_else(|| format!("expected `i,j`, got `{s}`"))?;
    let i = i.trim().parse().map_err(|e| format!("bad i: {e}"))?;
    let j = j.trim().parse().map_err(|e| format!("bad j: {e}"))?;
    Ok(GridCell::new(i, j))
}

fn compose(args: &SceneArgs) -> anyhow::Result<(SceneSeed, Scene)> {
    let config = match &args.config {
        Some(path) => ComposerConfig::from_json_file(path)
            .with_context(|| format!("loading config {}", path.display()))?,
        None => ComposerConfig::default(),
    };
    let seed = args.seed.map(SceneSeed).unwrap_or_else(SceneSeed::fresh);
    tracing::info!(%seed, "composing scene");

    let noise = SimplexField::new(seed.noise_seed());
    tracing::debug!(noise_seed = noise.seed(), "noise field seeded");
    let scene = SceneComposer::new(config).compose(&noise, &mut seed.random());
    Ok((seed, scene))
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(filter))
        .init();

    match cli.command {
        Commands::Info => {
            println!("wirecubes-cli v{}", env!("CARGO_PKG_VERSION"));
            println!("render: {}", wirecubes_render::crate_info());
            println!("tools: {}", wirecubes_tools::crate_info());
            let config = ComposerConfig::default();
            println!(
                "default grid: {0}x{0}, spacing {1}, base scale {2}",
                config.grid_width(),
                config.spacing,
                config.base_scale
            );
        }
        Commands::Compose {
            scene: args,
            primitives,
            cell,
        } => {
            let (seed, scene) = compose(&args)?;
            println!("seed: {seed}");
            match cell {
                Some(cell) => match SceneInspector::inspect_cell(&scene, cell) {
                    Some(info) => println!("{info}"),
                    None => anyhow::bail!("no cube at cell {cell}"),
                },
                None => {
                    let renderer = DebugTextRenderer {
                        verbose: primitives,
                    };
                    print!("{}", renderer.render(&scene, &OrthoView::default()));
                    println!("{}", SceneInspector::summary(&scene));
                }
            }
        }
        Commands::Render {
            scene: args,
            size,
            out,
        } => {
            let (seed, scene) = compose(&args)?;
            let frame = SoftwareRenderer::default().render(&scene, &OrthoView::square(size))?;
            let (width, height) = (frame.width(), frame.height());
            let image = image::RgbaImage::from_raw(width, height, frame.into_pixels())
                .context("frame buffer does not match its dimensions")?;
            image
                .save(&out)
                .with_context(|| format!("writing {}", out.display()))?;
            println!("seed {seed}: wrote {width}x{height} image to {}", out.display());
        }
    }

    Ok(())
}
