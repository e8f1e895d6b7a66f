//! Command-line argument parsing for the globe generator.

use std::path::PathBuf;

use clap::Parser;

use crate::Config;

/// Globe generator command-line arguments.
///
/// CLI values override settings loaded from `config.ron`.
#[derive(Parser, Debug, Default)]
#[command(name = "globe", about = "Procedural planet mesh and texture generator")]
pub struct CliArgs {
    /// Noise seed.
    #[arg(long, allow_negative_numbers = true)]
    pub seed: Option<i64>,

    /// Sphere radius.
    #[arg(long)]
    pub radius: Option<f64>,

    /// Elevation multiplier for vertex displacement.
    #[arg(long)]
    pub height_scale: Option<f64>,

    /// Mesh latitude bands.
    #[arg(long)]
    pub lat_samples: Option<u32>,

    /// Mesh longitude columns.
    #[arg(long)]
    pub lon_samples: Option<u32>,

    /// Texture width in pixels.
    #[arg(long)]
    pub texture_width: Option<u32>,

    /// Texture height in pixels.
    #[arg(long)]
    pub texture_height: Option<u32>,

    /// Output PNG path for the texture.
    #[arg(long)]
    pub texture_out: Option<PathBuf>,

    /// Output OBJ path for the mesh.
    #[arg(long)]
    pub mesh_out: Option<PathBuf>,

    /// Log level (error, warn, info, debug, trace).
    #[arg(long)]
    pub log_level: Option<String>,

    /// Path to config directory (overrides default location).
    #[arg(long)]
    pub config: Option<PathBuf>,
}

impl Config {
    /// Apply CLI overrides to a loaded config.
    pub fn apply_cli_overrides(&mut self, args: &CliArgs) {
        if let Some(seed) = args.seed {
            self.globe.noise_seed = seed;
        }
        if let Some(radius) = args.radius {
            self.globe.radius = radius;
        }
        if let Some(scale) = args.height_scale {
            self.globe.height_scale = scale;
        }
        if let Some(lat) = args.lat_samples {
            self.globe.latitude_samples = lat;
        }
        if let Some(lon) = args.lon_samples {
            self.globe.longitude_samples = lon;
        }
        if let Some(w) = args.texture_width {
            self.globe.texture_width = w;
        }
        if let Some(h) = args.texture_height {
            self.globe.texture_height = h;
        }
        if let Some(ref path) = args.texture_out {
            self.export.texture_path = path.clone();
        }
        if let Some(ref path) = args.mesh_out {
            self.export.mesh_path = Some(path.clone());
        }
        if let Some(ref level) = args.log_level {
            self.debug.log_level = level.clone();
        }
    }
}
