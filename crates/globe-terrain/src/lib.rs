//! Procedural planet terrain: seeded octave offsets, the elevation field, and
//! biome classification.

mod biome;
mod field;
mod seed;

pub use biome::Biome;
pub use field::{
    CapBoundaries, ELEVATION_NORMALIZER, ElevationField, FieldSample, IceCapParams, SCALAR_RATIO,
};
pub use seed::{
    Mulberry32, OFFSET_SCALE, OctaveOffsets, OctaveSeeds, REPS, det_cos, det_sin, det_sqrt,
    facet_rng,
};
