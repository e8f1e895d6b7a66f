//! Globe construction: grid tessellation of the displaced sphere, the biome
//! texture painter, and the generator that ties a run together.

mod error;
mod generator;
mod mesh;
mod texture;

pub use error::{GenerateError, RampError};
pub use generator::{Globe, World, generate};
pub use mesh::{
    GlobeMesh, HeightGrid, MeshVertex, column_longitude, row_latitude, sphere_direction,
    tessellate,
};
pub use texture::{ColorRamp, ControlPoint, Interpolation, Texture, TexturePainter, paint};
