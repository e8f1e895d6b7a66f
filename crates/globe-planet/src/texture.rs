//! Biome color texture generation for the globe surface.
//!
//! Samples the elevation field across an equirectangular raster and colors
//! each pixel from an elevation-keyed color ramp. Ice pixels and the polar
//! rows outside the painted band keep the background color.

use std::collections::HashSet;
use std::f64::consts::{PI, TAU};

use globe_config::GenerationConfig;
use globe_terrain::{ElevationField, det_cos};
use tracing::debug;

use crate::error::{GenerateError, RampError, try_buffer};

/// An 8-bit RGB raster, row-major from the top row.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Texture {
    width: u32,
    height: u32,
    pixels: Vec<[u8; 3]>,
}

impl Texture {
    /// A `width × height` raster filled with `color`.
    ///
    /// Fails with `ResourceExhausted` when the pixel buffer cannot be
    /// allocated.
    pub fn filled(width: u32, height: u32, color: [u8; 3]) -> Result<Self, GenerateError> {
        let len = (width as usize)
            .checked_mul(height as usize)
            .ok_or(GenerateError::ResourceExhausted { what: "texture" })?;
        let mut pixels = try_buffer(len, "texture")?;
        pixels.resize(len, color);
        Ok(Self {
            width,
            height,
            pixels,
        })
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Color at column `x`, row `y`, or `None` outside the raster.
    pub fn get(&self, x: u32, y: u32) -> Option<[u8; 3]> {
        self.offset(x, y).map(|i| self.pixels[i])
    }

    /// Overwrite one pixel. Out-of-range coordinates are ignored.
    pub fn set(&mut self, x: u32, y: u32, color: [u8; 3]) {
        if let Some(i) = self.offset(x, y) {
            self.pixels[i] = color;
        }
    }

    fn offset(&self, x: u32, y: u32) -> Option<usize> {
        (x < self.width && y < self.height)
            .then(|| y as usize * self.width as usize + x as usize)
    }

    /// All pixels, row-major.
    pub fn pixels(&self) -> &[[u8; 3]] {
        &self.pixels
    }

    /// Tightly packed RGB bytes.
    pub fn as_bytes(&self) -> &[u8] {
        self.pixels.as_flattened()
    }

    /// Expand to opaque RGBA for upload.
    pub fn to_rgba8(&self) -> Vec<u8> {
        self.pixels
            .iter()
            .flat_map(|&[r, g, b]| [r, g, b, 255])
            .collect()
    }

    /// Number of distinct colors in the raster.
    pub fn unique_color_count(&self) -> usize {
        self.pixels.iter().collect::<HashSet<_>>().len()
    }
}

/// Easing applied between two neighbouring control points.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Interpolation {
    Linear,
    /// `-2t³ + 3t²`
    #[default]
    Cubic,
    /// `(1 - cos(tπ)) / 2`
    Sine,
}

impl Interpolation {
    /// Remap a unit parameter.
    pub fn ease(self, t: f64) -> f64 {
        match self {
            Self::Linear => t,
            Self::Cubic => -2.0 * t * t * t + 3.0 * t * t,
            Self::Sine => (1.0 - det_cos(t * PI)) / 2.0,
        }
    }
}

/// One ramp stop: an elevation and the color at that elevation.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ControlPoint {
    pub position: f64,
    pub color: [u8; 3],
}

impl ControlPoint {
    pub const fn new(position: f64, r: u8, g: u8, b: u8) -> Self {
        Self {
            position,
            color: [r, g, b],
        }
    }
}

const TERRAIN_POINTS: [ControlPoint; 8] = [
    ControlPoint::new(-1.0, 140, 140, 140),
    ControlPoint::new(-0.4, 140, 140, 140),
    ControlPoint::new(0.0, 177, 180, 117),
    ControlPoint::new(0.05, 77, 223, 90),
    ControlPoint::new(0.3, 63, 191, 71),
    ControlPoint::new(0.4, 170, 170, 170),
    ControlPoint::new(0.45, 255, 255, 255),
    ControlPoint::new(1.0, 255, 255, 255),
];

/// Piecewise color ramp over strictly increasing control points.
#[derive(Clone, Debug, PartialEq)]
pub struct ColorRamp {
    points: Vec<ControlPoint>,
    interpolation: Interpolation,
}

impl ColorRamp {
    /// Build a ramp, rejecting fewer than two points or positions that are
    /// not finite and strictly increasing.
    pub fn new(points: Vec<ControlPoint>, interpolation: Interpolation) -> Result<Self, RampError> {
        if points.len() < 2 {
            return Err(RampError::TooFewPoints(points.len()));
        }
        if let Some(index) = points.iter().position(|p| !p.position.is_finite()) {
            return Err(RampError::NonFinitePosition { index });
        }
        if let Some(index) = points
            .windows(2)
            .position(|w| w[1].position <= w[0].position)
        {
            return Err(RampError::Unordered { index: index + 1 });
        }
        Ok(Self {
            points,
            interpolation,
        })
    }

    /// Gray ocean floor, sand, grass, rock, snow; cubic easing.
    pub fn terrain() -> Self {
        Self {
            points: TERRAIN_POINTS.to_vec(),
            interpolation: Interpolation::Cubic,
        }
    }

    pub fn points(&self) -> &[ControlPoint] {
        &self.points
    }

    pub fn interpolation(&self) -> Interpolation {
        self.interpolation
    }

    /// Color at elevation `t`, clamped to the end colors outside the ramp.
    pub fn color_at(&self, t: f64) -> [u8; 3] {
        let (first, last) = match (self.points.first(), self.points.last()) {
            (Some(first), Some(last)) => (first, last),
            _ => return [0, 0, 0],
        };
        if t.is_nan() || t <= first.position {
            return first.color;
        }
        if t >= last.position {
            return last.color;
        }

        // First interval whose upper bound exceeds t.
        let upper = self
            .points
            .iter()
            .position(|p| p.position > t)
            .unwrap_or(self.points.len() - 1);
        let lo = &self.points[upper - 1];
        let hi = &self.points[upper];

        let s = self
            .interpolation
            .ease((t - lo.position) / (hi.position - lo.position));
        std::array::from_fn(|c| {
            let a = f64::from(lo.color[c]);
            let b = f64::from(hi.color[c]);
            (a + s * (b - a)).round().clamp(0.0, 255.0) as u8
        })
    }
}

impl Default for ColorRamp {
    fn default() -> Self {
        Self::terrain()
    }
}

/// Paints the biome texture from an elevation field.
#[derive(Clone, Debug, PartialEq)]
pub struct TexturePainter {
    pub ramp: ColorRamp,
    /// Fill for ice and unpainted polar rows.
    pub background: [u8; 3],
    /// Rows with `|y / height - 0.5|` below this are sampled.
    pub paint_band: f64,
}

impl Default for TexturePainter {
    fn default() -> Self {
        Self {
            ramp: ColorRamp::terrain(),
            background: [255, 255, 255],
            paint_band: 0.3,
        }
    }
}

impl TexturePainter {
    /// Paint a `width × height` equirectangular texture.
    ///
    /// Column `x` maps to longitude `x / width · 2π` and row `y` to latitude
    /// `(y / height - 0.5) · π`.
    pub fn paint(
        &self,
        field: &ElevationField,
        width: u32,
        height: u32,
    ) -> Result<Texture, GenerateError> {
        let mut texture = Texture::filled(width, height, self.background)?;
        let mut painted = 0usize;

        for y in 0..height {
            let v = f64::from(y) / f64::from(height) - 0.5;
            if v.abs() >= self.paint_band {
                continue;
            }
            let latitude = v * PI;
            for x in 0..width {
                let longitude = f64::from(x) / f64::from(width) * TAU;
                let sample = field.sample(longitude, latitude);
                if sample.biome.is_ice() {
                    continue;
                }
                texture.set(x, y, self.ramp.color_at(sample.elevation));
                painted += 1;
            }
        }

        debug!(width, height, painted, "painted biome texture");
        Ok(texture)
    }
}

/// Paint with the default painter at the configured texture resolution.
pub fn paint(field: &ElevationField, config: &GenerationConfig) -> Result<Texture, GenerateError> {
    TexturePainter::default().paint(field, config.texture_width, config.texture_height)
}
