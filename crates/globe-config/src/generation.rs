//! Globe generation parameters and their validation.

use std::f64::consts::FRAC_PI_2;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Bytes per vertex in the largest per-vertex buffer (interleaved position
/// and normal, `f32` each).
const VERTEX_BYTES: usize = 24;

/// Bytes per RGB texture pixel.
const PIXEL_BYTES: usize = 3;

/// No single allocation may exceed `isize::MAX` bytes.
fn fits_allocation(bytes: usize) -> bool {
    isize::try_from(bytes).is_ok()
}

/// How each quad of the latitude/longitude grid is split into two triangles.
///
/// The choice only affects shading facets, never topology.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
pub enum DiagonalMode {
    /// Every cell is split along the `(a, b)`–`(a+1, b+1)` diagonal.
    #[default]
    Fixed,
    /// Each cell picks a diagonal from a stream seeded with the noise seed.
    Seeded,
}

/// Parameters for one globe generation run.
///
/// Angles are in radians, heights are fractions of the radius.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct GenerationConfig {
    /// Radius of the undisplaced sphere in scene units.
    pub radius: f64,
    /// Multiplier applied to field elevation before radial displacement.
    pub height_scale: f64,
    /// Number of latitude bands in the mesh grid (rows = bands + 1).
    pub latitude_samples: u32,
    /// Number of longitude columns in the mesh grid.
    pub longitude_samples: u32,
    /// Width of the equirectangular texture in pixels.
    pub texture_width: u32,
    /// Height of the equirectangular texture in pixels.
    pub texture_height: u32,
    /// Seed for the noise field and octave offsets.
    pub noise_seed: i64,
    /// Latitude at which the polar ice caps begin, before perturbation.
    pub ice_cap_latitude: f64,
    /// Elevation of the flat ice cap interior.
    pub ice_cap_level: f64,
    /// Width parameter of the parabolic ramp between terrain and cap.
    pub ice_cap_transition_range: f64,
    /// Triangulation diagonal selection.
    pub diagonal: DiagonalMode,
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            radius: 1.0,
            height_scale: 0.05,
            latitude_samples: 256,
            longitude_samples: 256,
            texture_width: 1024,
            texture_height: 1024,
            noise_seed: 1,
            ice_cap_latitude: 0.75,
            ice_cap_level: 0.025,
            ice_cap_transition_range: 0.05,
            diagonal: DiagonalMode::Fixed,
        }
    }
}

impl GenerationConfig {
    /// Check every setting before any computation begins.
    pub fn validate(&self) -> Result<(), ConfigError> {
        for (field, value) in [
            ("radius", self.radius),
            ("height_scale", self.height_scale),
            ("ice_cap_latitude", self.ice_cap_latitude),
            ("ice_cap_level", self.ice_cap_level),
            ("ice_cap_transition_range", self.ice_cap_transition_range),
        ] {
            if !value.is_finite() {
                return Err(ConfigError::NonFinite { field });
            }
        }

        if self.radius <= 0.0 {
            return Err(ConfigError::NonPositiveRadius(self.radius));
        }
        if self.latitude_samples < 2 {
            return Err(ConfigError::TooFewLatitudeSamples(self.latitude_samples));
        }
        if self.longitude_samples < 3 {
            return Err(ConfigError::TooFewLongitudeSamples(self.longitude_samples));
        }
        if self.texture_width == 0 || self.texture_height == 0 {
            return Err(ConfigError::EmptyTexture {
                width: self.texture_width,
                height: self.texture_height,
            });
        }
        if !(0.0..=FRAC_PI_2).contains(&self.ice_cap_latitude) {
            return Err(ConfigError::IceCapLatitudeOutOfRange(self.ice_cap_latitude));
        }
        if self.ice_cap_level < 0.0 {
            return Err(ConfigError::NegativeIceCapLevel(self.ice_cap_level));
        }
        if self.ice_cap_transition_range <= 0.0 {
            return Err(ConfigError::NonPositiveTransitionRange(
                self.ice_cap_transition_range,
            ));
        }
        if self.noise_seed < i64::from(i32::MIN) || self.noise_seed > i64::from(u32::MAX) {
            return Err(ConfigError::SeedOutOfRange(self.noise_seed));
        }

        // Triangle indices are u32, so the vertex count must fit in one.
        self.vertex_count()
            .filter(|&n| u32::try_from(n).is_ok())
            .and_then(|n| n.checked_mul(VERTEX_BYTES))
            .filter(|&bytes| fits_allocation(bytes))
            .ok_or(ConfigError::ResolutionTooLarge { what: "mesh" })?;
        self.pixel_count()
            .and_then(|n| n.checked_mul(PIXEL_BYTES))
            .filter(|&bytes| fits_allocation(bytes))
            .ok_or(ConfigError::ResolutionTooLarge { what: "texture" })?;

        Ok(())
    }

    /// Number of mesh vertices: `longitude_samples * (latitude_samples + 1)`.
    pub fn vertex_count(&self) -> Option<usize> {
        let rows = usize::try_from(self.latitude_samples).ok()?.checked_add(1)?;
        usize::try_from(self.longitude_samples).ok()?.checked_mul(rows)
    }

    /// Number of texture pixels.
    pub fn pixel_count(&self) -> Option<usize> {
        usize::try_from(self.texture_width)
            .ok()?
            .checked_mul(usize::try_from(self.texture_height).ok()?)
    }

    /// The seed reduced to the 32 bits consumed by the noise source.
    ///
    /// Negative seeds wrap (two's complement); callers validate first.
    pub fn seed_u32(&self) -> u32 {
        self.noise_seed as u32
    }
}
