//! Globe generator command-line host.
//!
//! Loads `config.ron`, applies CLI overrides, generates the globe, and writes
//! the biome texture as PNG and the mesh as OBJ.
//!
//! Run with: `cargo run -p globe-app -- --seed 7`

mod export;

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use globe_config::{CliArgs, Config};
use globe_planet::Globe;
use tracing::{error, info};

fn config_dir(args: &CliArgs) -> PathBuf {
    args.config.clone().unwrap_or_else(|| {
        dirs::config_dir()
            .map(|d| d.join("globe"))
            .unwrap_or_else(|| PathBuf::from("."))
    })
}

fn main() -> ExitCode {
    let args = CliArgs::parse();
    let config_dir = config_dir(&args);

    let mut config = Config::load_or_create(&config_dir).unwrap_or_else(|e| {
        eprintln!("Failed to load config: {e}, using defaults");
        Config::default()
    });
    config.apply_cli_overrides(&args);

    globe_log::init_logging(Some(&config.debug), cfg!(debug_assertions));
    info!(config_dir = %config_dir.display(), "globe generator starting");

    match run(&config) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{e}");
            ExitCode::FAILURE
        }
    }
}

fn run(config: &Config) -> Result<(), Box<dyn std::error::Error>> {
    let mut globe = Globe::new(config.globe.clone())?;
    let world = globe.generate()?;

    info!(
        seed = config.globe.noise_seed,
        vertices = world.mesh.vertex_count(),
        triangles = world.mesh.triangle_count(),
        colors = world.texture.unique_color_count(),
        max_altitude = world.max_altitude(),
        "generation complete"
    );

    export::write_texture_png(&world.texture, &config.export.texture_path)?;
    if let Some(mesh_path) = &config.export.mesh_path {
        export::write_mesh_obj(&world.mesh, mesh_path)?;
    }
    Ok(())
}
