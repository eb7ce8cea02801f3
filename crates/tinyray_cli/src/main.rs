use std::path::Path;
use std::process::ExitCode;

use anyhow::{Context, Result};
use tinyray_core::{MaterialCatalog, RenderSettings, SceneDescription};
use tinyray_renderer::{render, World};

mod args;
mod output;

use args::Args;

const OUTPUT_DIR: &str = "out";

fn main() -> ExitCode {
    env_logger::Builder::from_default_env()
        .filter_level(log::LevelFilter::Info)
        .parse_default_env()
        .init();

    let mut argv = std::env::args();
    let program = argv.next().unwrap_or_else(|| "tinyray".to_string());

    let args = match Args::parse(argv) {
        Ok(args) => args,
        Err(e) => {
            eprintln!("{}", e);
            eprintln!("{}", args::usage(&program));
            return ExitCode::FAILURE;
        }
    };

    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            log::error!("{:#}", e);
            ExitCode::FAILURE
        }
    }
}

fn run(args: &Args) -> Result<()> {
    log::info!("Starting tinyray");

    let mut settings = RenderSettings::default().with_max_depth(args.max_depth);
    if let Some(seed) = args::env_var::<u64>(args::SEED_VAR) {
        settings = settings.with_seed(seed);
    }
    if let Some(samples) = args::env_var::<u32>(args::SAMPLES_VAR) {
        settings = settings.with_samples(samples);
    }
    settings.validate()?;

    let desc = SceneDescription::load(&args.scene)
        .with_context(|| format!("loading scene {}", args.scene.display()))?;
    let catalog = MaterialCatalog::new();
    let world = World::from_description(&desc, &catalog).context("building camera basis")?;

    let image = render(&world.context(), world.width, world.height, &settings);

    output::save_all(&image, Path::new(OUTPUT_DIR))
}
