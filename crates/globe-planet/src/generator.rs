//! One-shot globe generation runs.
//!
//! [`Globe`] owns the validated configuration and the elevation field built
//! from it. Each [`Globe::generate`] call tessellates and paints a fresh
//! [`World`] and publishes it only once every part is complete.

use std::sync::Arc;

use globe_config::GenerationConfig;
use globe_terrain::{ElevationField, FieldSample, IceCapParams};
use tracing::{info, warn};

use crate::error::GenerateError;
use crate::mesh::{GlobeMesh, HeightGrid, tessellate};
use crate::texture::{Texture, TexturePainter};

/// Everything produced by a single run.
#[derive(Clone, Debug, PartialEq)]
pub struct World {
    pub mesh: GlobeMesh,
    pub heights: HeightGrid,
    pub texture: Texture,
    /// The configuration the run was built from.
    pub config: GenerationConfig,
}

impl World {
    /// Highest grid elevation, never below zero.
    pub fn max_altitude(&self) -> f64 {
        self.heights.iter().fold(0.0, f64::max)
    }
}

fn cap_params(config: &GenerationConfig) -> IceCapParams {
    IceCapParams {
        latitude: config.ice_cap_latitude,
        level: config.ice_cap_level,
        transition_range: config.ice_cap_transition_range,
    }
}

/// Generator context: configuration, field, painter, and the last
/// published world.
#[derive(Clone, Debug)]
pub struct Globe {
    config: GenerationConfig,
    field: ElevationField,
    painter: TexturePainter,
    world: Option<Arc<World>>,
}

impl Globe {
    /// Validate `config` and build its elevation field.
    pub fn new(config: GenerationConfig) -> Result<Self, GenerateError> {
        config.validate()?;
        let field = ElevationField::new(config.seed_u32(), cap_params(&config));
        info!(seed = config.noise_seed, "globe field initialized");
        Ok(Self {
            config,
            field,
            painter: TexturePainter::default(),
            world: None,
        })
    }

    /// Replace the configuration and rebuild the field.
    ///
    /// On error nothing changes. The previously published world stays
    /// available until the next successful [`generate`](Self::generate).
    pub fn configure(&mut self, config: GenerationConfig) -> Result<(), GenerateError> {
        config.validate()?;
        let field = ElevationField::new(config.seed_u32(), cap_params(&config));
        info!(
            seed = config.noise_seed,
            radius = config.radius,
            "globe reconfigured"
        );
        self.field = field;
        self.config = config;
        Ok(())
    }

    /// Run the full pipeline and publish the result.
    pub fn generate(&mut self) -> Result<Arc<World>, GenerateError> {
        let config = &self.config;
        info!(
            longitude_samples = config.longitude_samples,
            latitude_samples = config.latitude_samples,
            texture_width = config.texture_width,
            texture_height = config.texture_height,
            "generating globe"
        );

        let (mesh, heights) = tessellate(&self.field, config)?;
        if let Some(i) = mesh.positions.iter().position(|p| !p.is_finite()) {
            let rows = config.latitude_samples + 1;
            let i = i as u32;
            warn!(vertex = i, "generation produced a non-finite vertex");
            return Err(GenerateError::NumericDegeneracy {
                longitude_index: i / rows,
                latitude_index: i % rows,
            });
        }

        let texture = self
            .painter
            .paint(&self.field, config.texture_width, config.texture_height)?;

        let world = Arc::new(World {
            mesh,
            heights,
            texture,
            config: config.clone(),
        });
        info!(
            vertices = world.mesh.vertex_count(),
            triangles = world.mesh.triangle_count(),
            max_altitude = world.max_altitude(),
            "globe generated"
        );
        self.world = Some(Arc::clone(&world));
        Ok(world)
    }

    /// The last successfully generated world.
    pub fn world(&self) -> Option<&Arc<World>> {
        self.world.as_ref()
    }

    pub fn config(&self) -> &GenerationConfig {
        &self.config
    }

    pub fn field(&self) -> &ElevationField {
        &self.field
    }

    pub fn painter(&self) -> &TexturePainter {
        &self.painter
    }

    /// Use a different painter for subsequent runs.
    pub fn set_painter(&mut self, painter: TexturePainter) {
        self.painter = painter;
    }

    /// Sample the current field directly.
    pub fn sample_altitude(&self, longitude: f64, latitude: f64) -> FieldSample {
        self.field.sample(longitude, latitude)
    }

    /// Highest elevation of the published world, if any.
    pub fn max_altitude(&self) -> Option<f64> {
        self.world.as_ref().map(|w| w.max_altitude())
    }

    /// Distance from the globe center to the displaced surface.
    pub fn surface_radius(&self, longitude: f64, latitude: f64) -> f64 {
        let elevation = self.field.sample(longitude, latitude).elevation;
        self.config.radius * (1.0 + self.config.height_scale * elevation)
    }
}

/// Validate `config` and run one generation.
pub fn generate(config: &GenerationConfig) -> Result<World, GenerateError> {
    let mut globe = Globe::new(config.clone())?;
    let world = globe.generate()?;
    Ok(Arc::unwrap_or_clone(world))
}
