//! Elevation and biome field over the sphere.
//!
//! Sums octaves of 3D Perlin noise sampled on the unit sphere, then blends in
//! polar ice caps whose boundaries are perturbed by 2D noise along longitude.
//! The field is a pure function of `(longitude, latitude)` once built.

use noise::{NoiseFn, Perlin};
use tracing::debug;

use crate::biome::Biome;
use crate::seed::{OctaveSeeds, REPS, det_cos, det_sin, det_sqrt};

/// Ratio between the amplitudes of successive elevation octaves.
pub const SCALAR_RATIO: f64 = 1.6;

/// Divisor applied to every elevation octave: `-(1 + r / (1 - r))`.
pub const ELEVATION_NORMALIZER: f64 = -(1.0 + SCALAR_RATIO / (1.0 - SCALAR_RATIO));

/// Ice cap placement and shape.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct IceCapParams {
    /// Unperturbed cap latitude in radians (mirrored for the south cap).
    pub latitude: f64,
    /// Elevation of the flat cap interior.
    pub level: f64,
    /// Width parameter of the parabolic ramp.
    pub transition_range: f64,
}

impl Default for IceCapParams {
    fn default() -> Self {
        Self {
            latitude: 0.75,
            level: 0.025,
            transition_range: 0.05,
        }
    }
}

impl IceCapParams {
    /// Half-width of the ramp: `sqrt(level * transition_range)`.
    ///
    /// The ramp floor climbs from 0 at the cap boundary to `level` this far
    /// poleward of it.
    pub fn surface_break(&self) -> f64 {
        det_sqrt(self.level * self.transition_range)
    }
}

/// Perturbed cap boundary latitudes at one longitude.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CapBoundaries {
    /// Latitudes above this are in the northern cap.
    pub north: f64,
    /// Latitudes below this are in the southern cap.
    pub south: f64,
}

/// Elevation and biome at one surface point.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FieldSample {
    /// Signed elevation as a fraction of the radius before height scaling.
    pub elevation: f64,
    /// Surface classification.
    pub biome: Biome,
}

/// The seeded elevation/biome field.
///
/// Owns its noise function and octave offsets. Reseeding builds a new field;
/// there is no shared state to update in place.
#[derive(Clone, Debug)]
pub struct ElevationField {
    seed: u32,
    noise: Perlin,
    seeds: OctaveSeeds,
    caps: IceCapParams,
}

impl ElevationField {
    /// Build a field for `seed` with the given cap parameters.
    pub fn new(seed: u32, caps: IceCapParams) -> Self {
        debug!(seed, ?caps, "seeding elevation field");
        Self {
            seed,
            noise: Perlin::new(seed),
            seeds: OctaveSeeds::from_seed(seed),
            caps,
        }
    }

    /// Sample elevation and biome at a point.
    ///
    /// Angles are in radians. Inputs outside `[-π, π) × [-π/2, π/2]` are
    /// evaluated with the same formulas.
    pub fn sample(&self, longitude: f64, latitude: f64) -> FieldSample {
        let mut elevation = self.base_elevation(longitude, latitude);
        let bounds = self.cap_boundaries(longitude);

        let mut biome = if latitude > bounds.north || latitude < bounds.south {
            Biome::IceCap
        } else if elevation < 0.0 {
            Biome::Ocean
        } else {
            Biome::Default
        };

        let floor = self.cap_floor(latitude, bounds);
        if elevation < floor {
            elevation = floor;
            if floor != self.caps.level {
                biome = Biome::IceCapEdge;
            }
        }

        FieldSample { elevation, biome }
    }

    /// Octave-summed terrain elevation before the cap floor is applied.
    pub fn base_elevation(&self, longitude: f64, latitude: f64) -> f64 {
        let (sin_lon, cos_lon) = (det_sin(longitude), det_cos(longitude));
        let (sin_lat, cos_lat) = (det_sin(latitude), det_cos(latitude));

        let mut total = 0.0;
        let mut frequency = 2.0;
        let mut weight = 1.0;
        for octave in self.seeds.iter() {
            let n = self.noise.get([
                frequency * cos_lon * cos_lat,
                frequency * sin_lat + octave.elevation,
                frequency * sin_lon * cos_lat,
            ]);
            total += n / weight / ELEVATION_NORMALIZER;
            frequency *= 2.0;
            weight *= SCALAR_RATIO;
        }
        total
    }

    /// Cap boundary latitudes at a longitude.
    ///
    /// Each octave shifts the boundary by at most `1 / 2^(a+2)` radians, so
    /// the total perturbation stays below 0.5 radians.
    pub fn cap_boundaries(&self, longitude: f64) -> CapBoundaries {
        let (sin_lon, cos_lon) = (det_sin(longitude), det_cos(longitude));

        let mut north = self.caps.latitude;
        let mut south = -self.caps.latitude;
        let mut frequency = 1.0;
        let mut divisor = 4.0;
        for octave in self.seeds.iter() {
            let x = frequency * sin_lon;
            let y = frequency * cos_lon;
            north += self.noise.get([x, y + octave.cap_north]) / divisor;
            south -= self.noise.get([x, y + octave.cap_south]) / divisor;
            frequency *= 2.0;
            divisor *= 2.0;
        }
        CapBoundaries { north, south }
    }

    /// Minimum elevation enforced at `latitude` given the cap boundaries.
    ///
    /// Equal to the cap level beyond the ramp, otherwise an inverted parabola
    /// in latitude that is 0 at the boundary and `level` at the ramp's inner
    /// edge. Far from the caps it is strongly negative and never binds.
    pub fn cap_floor(&self, latitude: f64, bounds: CapBoundaries) -> f64 {
        let surface_break = self.caps.surface_break();
        let level = self.caps.level;
        let range = self.caps.transition_range;

        if latitude - surface_break > bounds.north || latitude + surface_break < bounds.south {
            level
        } else if latitude > 0.0 {
            let d = latitude - surface_break - bounds.north;
            level - d * d / range
        } else {
            let d = latitude + surface_break - bounds.south;
            level - d * d / range
        }
    }

    /// The seed this field was built from.
    pub fn seed(&self) -> u32 {
        self.seed
    }

    /// The per-octave offsets in use.
    pub fn octave_seeds(&self) -> &OctaveSeeds {
        &self.seeds
    }

    /// The ice cap parameters in use.
    pub fn caps(&self) -> &IceCapParams {
        &self.caps
    }

    /// Number of octaves layered per sample.
    pub const fn octaves() -> usize {
        REPS
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::{FRAC_PI_2, PI};

    fn field(seed: u32) -> ElevationField {
        ElevationField::new(seed, IceCapParams::default())
    }

    fn longitudes(n: usize) -> impl Iterator<Item = f64> {
        (0..n).map(move |i| (i as f64 / n as f64 * 2.0 - 1.0) * PI)
    }

    #[test]
    fn test_normalizer_value() {
        assert!((ELEVATION_NORMALIZER - 5.0 / 3.0).abs() < 1e-12);
    }

    #[test]
    fn test_same_seed_bit_identical() {
        let a = field(42);
        let b = field(42);
        for lon in longitudes(32) {
            for i in 0..16 {
                let lat = (i as f64 / 15.0 - 0.5) * PI;
                assert_eq!(a.sample(lon, lat), b.sample(lon, lat));
            }
        }
    }

    #[test]
    fn test_different_seeds_differ() {
        let a = field(1);
        let b = field(2);
        let differs = longitudes(64).any(|lon| a.base_elevation(lon, 0.3) != b.base_elevation(lon, 0.3));
        assert!(differs, "Different seeds should produce different elevations");
    }

    #[test]
    fn test_elevation_bounded() {
        // Perlin output lies in [-1, 1]; the weighted sum stays below ~1.54.
        let f = field(5);
        for lon in longitudes(64) {
            for i in 0..33 {
                let lat = (i as f64 / 32.0 - 0.5) * PI;
                let e = f.base_elevation(lon, lat);
                assert!(e.is_finite());
                assert!(e.abs() < 1.6, "elevation {e} out of range at ({lon}, {lat})");
            }
        }
    }

    #[test]
    fn test_elevation_has_relief() {
        let f = field(1);
        let samples: Vec<f64> = longitudes(128).map(|lon| f.base_elevation(lon, 0.2)).collect();
        let min = samples.iter().copied().fold(f64::INFINITY, f64::min);
        let max = samples.iter().copied().fold(f64::NEG_INFINITY, f64::max);
        assert!(max - min > 0.01, "terrain should vary along a parallel: {min}..{max}");
    }

    #[test]
    fn test_cap_boundaries_within_perturbation_bound() {
        let f = field(11);
        for lon in longitudes(64) {
            let b = f.cap_boundaries(lon);
            assert!((b.north - 0.75).abs() < 0.5, "north boundary {}", b.north);
            assert!((b.south + 0.75).abs() < 0.5, "south boundary {}", b.south);
        }
    }

    #[test]
    fn test_cap_boundaries_are_irregular() {
        let f = field(3);
        let norths: Vec<f64> = longitudes(32).map(|lon| f.cap_boundaries(lon).north).collect();
        assert!(norths.iter().any(|&n| (n - norths[0]).abs() > 1e-6));
    }

    #[test]
    fn test_poles_are_ice_caps() {
        let f = field(1);
        for lon in longitudes(16) {
            for lat in [FRAC_PI_2, -FRAC_PI_2] {
                let s = f.sample(lon, lat);
                assert_eq!(s.biome, Biome::IceCap);
                assert!(s.elevation >= 0.025);
            }
        }
    }

    #[test]
    fn test_equator_is_ocean_or_land_by_sign() {
        let f = field(1);
        for lon in longitudes(64) {
            let s = f.sample(lon, 0.0);
            let expected = if s.elevation < 0.0 {
                Biome::Ocean
            } else {
                Biome::Default
            };
            assert_eq!(s.biome, expected);
            assert_eq!(s.elevation, f.base_elevation(lon, 0.0));
        }
    }

    #[test]
    fn test_cap_classification_monotonic() {
        let f = field(8);
        let surface_break = f.caps().surface_break();
        for lon in longitudes(24) {
            let bounds = f.cap_boundaries(lon);
            for i in 1..=200 {
                let lat = i as f64 / 200.0 * FRAC_PI_2;

                let north = f.sample(lon, lat).biome;
                if lat <= bounds.north {
                    assert_ne!(north, Biome::IceCap, "IceCap equatorward at lat {lat}");
                } else if lat > bounds.north + surface_break {
                    assert_eq!(north, Biome::IceCap, "non-cap poleward at lat {lat}");
                }

                let south = f.sample(lon, -lat).biome;
                if -lat >= bounds.south {
                    assert_ne!(south, Biome::IceCap, "IceCap equatorward at lat {}", -lat);
                } else if -lat < bounds.south - surface_break {
                    assert_eq!(south, Biome::IceCap, "non-cap poleward at lat {}", -lat);
                }
            }
        }
    }

    #[test]
    fn test_elevation_never_below_cap_floor() {
        let f = field(4);
        for lon in longitudes(32) {
            let bounds = f.cap_boundaries(lon);
            for i in 0..=64 {
                let lat = (i as f64 / 64.0 - 0.5) * PI;
                let s = f.sample(lon, lat);
                assert!(s.elevation >= f.cap_floor(lat, bounds));
            }
        }
    }

    #[test]
    fn test_ramp_marks_ice_cap_edge() {
        let caps = IceCapParams {
            latitude: 0.75,
            level: 0.5,
            transition_range: 0.5,
        };
        let f = ElevationField::new(6, caps);
        let surface_break = caps.surface_break();

        let mut edges = 0;
        for lon in longitudes(64) {
            let bounds = f.cap_boundaries(lon);
            let lat = bounds.north + surface_break * 0.9;
            let s = f.sample(lon, lat);
            if s.biome == Biome::IceCapEdge {
                edges += 1;
                assert_eq!(s.elevation, f.cap_floor(lat, bounds));
                assert!(s.elevation < caps.level);
            }
        }
        assert!(edges > 0, "expected ramp samples near the cap boundary");
    }

    #[test]
    fn test_flat_cap_never_marked_edge() {
        let f = field(2);
        for lon in longitudes(32) {
            let bounds = f.cap_boundaries(lon);
            let lat = bounds.north + f.caps().surface_break() + 0.01;
            let s = f.sample(lon, lat);
            assert_eq!(s.biome, Biome::IceCap);
        }
    }

    #[test]
    fn test_out_of_range_latitude_extrapolates() {
        let f = field(1);
        let s = f.sample(0.5, 2.5);
        assert!(s.elevation.is_finite());
        let s = f.sample(10.0 * PI, -3.0);
        assert!(s.elevation.is_finite());
    }
}
