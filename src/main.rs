use anyhow::Context;
use clap::Parser;
use sdf_tracer::config::{Preset, RenderConfig};
use sdf_tracer::output;
use std::path::PathBuf;
use tracing::{info, Level};

/// Sphere traces a signed distance field scene into an image.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Built-in scene, used when no scene file is given.
    #[arg(short, long, value_enum, default_value_t = Preset::Reference)]
    preset: Preset,

    /// JSON scene file.
    #[arg(short = 'f', long)]
    scene: Option<PathBuf>,

    #[arg(long)]
    width: Option<usize>,

    #[arg(long)]
    height: Option<usize>,

    /// Jittered samples per pixel.
    #[arg(short, long)]
    samples: Option<u32>,

    #[arg(long)]
    seed: Option<u64>,

    /// `.ppm` is written as ASCII pixmap, anything else goes through `image`.
    #[arg(short, long, default_value = "out.ppm")]
    out: PathBuf,

    /// Start shadow rays exactly on the surface.
    #[arg(long, default_value_t = false)]
    no_shadow_bias: bool,

    /// Let back-facing lights contribute negative light.
    #[arg(long, default_value_t = false)]
    unclamped_lambert: bool,

    /// Repeat for more output: -v info, -vv debug, -vvv trace.
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn setup_logging(verbose: u8) {
    use tracing_subscriber::filter::LevelFilter;
    use tracing_subscriber::prelude::*;

    let level = match verbose {
        0 => Level::WARN,
        1 => Level::INFO,
        2 => Level::DEBUG,
        _ => Level::TRACE,
    };
    let filter = tracing_subscriber::EnvFilter::builder()
        .with_default_directive(LevelFilter::from_level(level).into())
        .from_env_lossy();
    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer())
        .init();
}

fn build_config(args: &Args) -> anyhow::Result<RenderConfig> {
    let mut config = match &args.scene {
        Some(path) => RenderConfig::from_file(path)
            .with_context(|| format!("loading scene {}", path.display()))?,
        None => RenderConfig::preset(args.preset),
    };
    if let Some(width) = args.width {
        config.width = width;
    }
    if let Some(height) = args.height {
        config.height = height;
    }
    if let Some(samples) = args.samples {
        config.settings.samples = samples;
    }
    if let Some(seed) = args.seed {
        config.settings.seed = seed;
    }
    if args.no_shadow_bias {
        config.settings.shading.shadow_bias = 0.;
    }
    if args.unclamped_lambert {
        config.settings.shading.clamp_lambert = false;
    }
    config.validate()?;
    Ok(config)
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    setup_logging(args.verbose);

    let config = build_config(&args)?;
    info!(
        width = config.width,
        height = config.height,
        lights = config.lights.len(),
        "starting image generation"
    );
    let framebuffer = config.render().context("rendering")?;

    output::save(&args.out, &framebuffer)
        .with_context(|| format!("writing {}", args.out.display()))?;
    Ok(())
}
