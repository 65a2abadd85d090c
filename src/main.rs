use anyhow::{Context, Result};
use log::{error, info};
use lsystem_tree::logging::init_logging;
use lsystem_tree::scene::Scene;
use lsystem_tree::{CliArgs, GeometryBuffer, LSystemEngine};
use serde::Serialize;
use std::io::Write;

/// What the viewer loads: the plant's line list and the scene around it.
#[derive(Serialize)]
struct Output<'a> {
    geometry: &'a GeometryBuffer,
    scene: &'a Scene,
}

fn main() {
    let args: CliArgs = argh::from_env();
    init_logging(args.log.as_deref());

    if let Err(e) = run(args) {
        error!("{e:#}");
        std::process::exit(1);
    }
}

fn run(args: CliArgs) -> Result<()> {
    let opts = args.into_options().context("invalid arguments")?;
    let config = &opts.config;
    info!(
        "generating {} generation(s) at {}° from {}",
        config.generations,
        config.turn_angle,
        config.grammar_path.display()
    );

    let engine = LSystemEngine::from_config(config).context("failed to set up generation")?;
    let plant = engine.run().context("failed to build plant")?;

    for (generation, symbols) in plant.history.iter().enumerate() {
        eprintln!("{generation}: {symbols}");
    }

    info!(
        "{} symbols -> {} edges -> {} vertices",
        plant.symbols.chars().count(),
        plant.edges.len(),
        plant.geometry.vertex_count()
    );
    if let Some(bounds) = plant.geometry.bounds() {
        info!(
            "bounds min {} max {} center {}",
            bounds.min,
            bounds.max,
            bounds.center()
        );
    }

    let mut scene = Scene::default().with_floor_wireframe(opts.floor_wireframe);
    if let Some(dir) = &opts.skybox_dir {
        scene = scene.with_skybox(dir);
    }

    let output = Output {
        geometry: &plant.geometry,
        scene: &scene,
    };
    let json = serde_json::to_string(&output).context("failed to encode output")?;
    match &opts.output {
        Some(path) => {
            std::fs::write(path, json)
                .with_context(|| format!("failed to write {}", path.display()))?;
            info!("wrote plant and scene to {}", path.display());
        }
        None => {
            let mut stdout = std::io::stdout().lock();
            writeln!(stdout, "{json}").context("failed to write output to stdout")?;
        }
    }

    Ok(())
}
