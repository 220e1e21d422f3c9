use anyhow::Context;
use clap::Parser;
use std::path::PathBuf;
use tracer::{CpuTracer, SceneConfig, ShadingMode, SurfaceKind};
use tracing::info;
use tracing_subscriber::EnvFilter;

/// Render a sphere-traced fireball to an image
#[derive(Parser, Debug)]
#[command(name = "kaboom", version, about)]
struct Args {
    /// Scene file (RON); fields left out keep their defaults
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Output image; `.ppm` is written directly, other extensions are encoded
    #[arg(short, long, default_value = "out.ppm")]
    output: PathBuf,

    /// Override the image width
    #[arg(long)]
    width: Option<u32>,

    /// Override the image height
    #[arg(long)]
    height: Option<u32>,

    /// Override the distance field
    #[arg(long, value_parser = parse_surface)]
    surface: Option<SurfaceKind>,

    /// Override the shading mode
    #[arg(long, value_parser = parse_shading)]
    shading: Option<ShadingMode>,

    /// Print the resolved scene as RON and exit
    #[arg(long)]
    dump_config: bool,
}

fn parse_surface(s: &str) -> Result<SurfaceKind, String> {
    match s {
        "sphere" => Ok(SurfaceKind::Sphere),
        "ripple" => Ok(SurfaceKind::Ripple),
        "fractal" => Ok(SurfaceKind::Fractal),
        other => Err(format!(
            "unknown surface '{}' (expected sphere, ripple or fractal)",
            other
        )),
    }
}

fn parse_shading(s: &str) -> Result<ShadingMode, String> {
    match s {
        "fire" => Ok(ShadingMode::Fire),
        "lambert" => Ok(ShadingMode::Lambert),
        "unlit" => Ok(ShadingMode::Unlit),
        other => Err(format!(
            "unknown shading '{}' (expected fire, lambert or unlit)",
            other
        )),
    }
}

impl Args {
    fn scene(&self) -> anyhow::Result<SceneConfig> {
        let mut config = match &self.config {
            Some(path) => SceneConfig::load_from_file(path)
                .with_context(|| format!("Failed to load scene {}", path.display()))?,
            None => SceneConfig::default(),
        };

        if let Some(width) = self.width {
            config.width = width;
        }
        if let Some(height) = self.height {
            config.height = height;
        }
        if let Some(surface) = self.surface {
            config.surface = surface;
        }
        if let Some(shading) = self.shading {
            config.shading = shading;
        }

        config.validate()?;
        Ok(config)
    }
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let args = Args::parse();
    let config = args.scene()?;

    if args.dump_config {
        println!("{}", config.to_ron()?);
        return Ok(());
    }

    let mut tracer = CpuTracer::new(config)?;
    tracer.render();
    tracer
        .save_image(&args.output)
        .with_context(|| format!("Failed to write {}", args.output.display()))?;

    info!(output = %args.output.display(), "Saved image");
    Ok(())
}
