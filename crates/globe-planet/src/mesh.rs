//! Latitude/longitude grid tessellation of the displaced globe.
//!
//! Samples the elevation field on a `longitude × (latitude + 1)` grid, pushes
//! each vertex out along its radial direction, and stitches the grid into
//! triangles. The last longitude column connects back to column 0, so the
//! seam carries no duplicated vertices.

use std::f64::consts::PI;

use bytemuck::{Pod, Zeroable};
use glam::{DVec3, Vec3};
use globe_config::{DiagonalMode, GenerationConfig};
use globe_terrain::{ElevationField, det_cos, det_sin, facet_rng};
use rand::Rng;
use tracing::debug;

use crate::error::{GenerateError, try_buffer};

/// Elevations at every mesh vertex, indexed `[longitude][latitude]`.
#[derive(Clone, Debug, PartialEq)]
pub struct HeightGrid {
    longitude_samples: usize,
    latitude_rows: usize,
    heights: Vec<f64>,
}

impl HeightGrid {
    fn try_new(longitude_samples: usize, latitude_rows: usize) -> Result<Self, GenerateError> {
        let len = longitude_samples * latitude_rows;
        let mut heights = try_buffer(len, "height grid")?;
        heights.resize(len, 0.0);
        Ok(Self {
            longitude_samples,
            latitude_rows,
            heights,
        })
    }

    /// Elevation at longitude index `a`, latitude index `b`.
    ///
    /// # Panics
    ///
    /// Panics if either index is out of range.
    pub fn get(&self, a: usize, b: usize) -> f64 {
        self.column(a)[b]
    }

    /// All latitude rows of one longitude column, south to north.
    pub fn column(&self, a: usize) -> &[f64] {
        let start = a * self.latitude_rows;
        &self.heights[start..start + self.latitude_rows]
    }

    fn set(&mut self, a: usize, b: usize, value: f64) {
        self.heights[a * self.latitude_rows + b] = value;
    }

    /// `(longitude_samples, latitude_samples + 1)`.
    pub fn dimensions(&self) -> (usize, usize) {
        (self.longitude_samples, self.latitude_rows)
    }

    /// Every stored elevation, column by column.
    pub fn iter(&self) -> impl Iterator<Item = f64> + '_ {
        self.heights.iter().copied()
    }

    /// Lowest stored elevation.
    pub fn min(&self) -> f64 {
        self.iter().fold(f64::INFINITY, f64::min)
    }

    /// Highest stored elevation.
    pub fn max(&self) -> f64 {
        self.iter().fold(f64::NEG_INFINITY, f64::max)
    }
}

/// Interleaved vertex layout for GPU upload.
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, Pod, Zeroable)]
pub struct MeshVertex {
    /// World-space position.
    pub position: [f32; 3],
    /// Unit surface normal.
    pub normal: [f32; 3],
}

/// A closed triangle mesh of the displaced globe.
#[derive(Clone, Debug, PartialEq)]
pub struct GlobeMesh {
    /// Vertex positions, indexed `a * (latitude_samples + 1) + b`.
    pub positions: Vec<Vec3>,
    /// Per-vertex normals accumulated from incident faces.
    pub normals: Vec<Vec3>,
    /// Triangle indices, counter-clockwise seen from outside.
    pub indices: Vec<u32>,
    longitude_samples: u32,
    latitude_samples: u32,
}

impl GlobeMesh {
    /// Index of the vertex at grid position `(a, b)`.
    pub fn vertex_index(&self, a: u32, b: u32) -> u32 {
        a * (self.latitude_samples + 1) + b
    }

    /// Number of vertices.
    pub fn vertex_count(&self) -> usize {
        self.positions.len()
    }

    /// Number of triangles.
    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    /// `(longitude_samples, latitude_samples)` of the source grid.
    pub fn grid_size(&self) -> (u32, u32) {
        (self.longitude_samples, self.latitude_samples)
    }

    /// Interleave positions and normals for a vertex buffer.
    pub fn gpu_vertices(&self) -> Vec<MeshVertex> {
        self.positions
            .iter()
            .zip(&self.normals)
            .map(|(p, n)| MeshVertex {
                position: p.to_array(),
                normal: n.to_array(),
            })
            .collect()
    }

    /// Index buffer as raw bytes.
    pub fn index_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.indices)
    }
}

/// Longitude in radians of column `a`: `((a / n) * 2 - 1) * π`.
pub fn column_longitude(a: u32, longitude_samples: u32) -> f64 {
    (f64::from(a) / f64::from(longitude_samples) * 2.0 - 1.0) * PI
}

/// Latitude in radians of row `b`: `((b / n) - 0.5) * π`.
pub fn row_latitude(b: u32, latitude_samples: u32) -> f64 {
    (f64::from(b) / f64::from(latitude_samples) - 0.5) * PI
}

/// Unit direction for a longitude/latitude pair (y is the polar axis).
pub fn sphere_direction(longitude: f64, latitude: f64) -> DVec3 {
    let cos_lat = det_cos(latitude);
    DVec3::new(
        det_cos(longitude) * cos_lat,
        det_sin(latitude),
        det_sin(longitude) * cos_lat,
    )
}

/// Sample the field on the mesh grid and build the displaced mesh.
///
/// The config must already be validated. Fails with `ResourceExhausted` when
/// the vertex or index buffers cannot be allocated.
pub fn tessellate(
    field: &ElevationField,
    config: &GenerationConfig,
) -> Result<(GlobeMesh, HeightGrid), GenerateError> {
    let lon_n = config.longitude_samples;
    let lat_n = config.latitude_samples;
    let rows = lat_n as usize + 1;
    let vertex_count = lon_n as usize * rows;

    let mut heights = HeightGrid::try_new(lon_n as usize, rows)?;
    let mut positions = try_buffer(vertex_count, "mesh")?;

    for a in 0..lon_n {
        let longitude = column_longitude(a, lon_n);
        for b in 0..=lat_n {
            let latitude = row_latitude(b, lat_n);
            let elevation = field.sample(longitude, latitude).elevation;
            heights.set(a as usize, b as usize, elevation);

            let r = config.radius * (1.0 + config.height_scale * elevation);
            positions.push((sphere_direction(longitude, latitude) * r).as_vec3());
        }
    }

    let indices = triangulate(lon_n, lat_n, config.diagonal, config.seed_u32())?;
    let normals = vertex_normals(&positions, &indices)?;

    debug!(
        vertices = positions.len(),
        triangles = indices.len() / 3,
        "tessellated globe"
    );

    let mesh = GlobeMesh {
        positions,
        normals,
        indices,
        longitude_samples: lon_n,
        latitude_samples: lat_n,
    };
    Ok((mesh, heights))
}

/// Connect the grid into two triangles per cell.
///
/// The column after `lon_n - 1` is column 0.
fn triangulate(
    lon_n: u32,
    lat_n: u32,
    mode: DiagonalMode,
    seed: u32,
) -> Result<Vec<u32>, GenerateError> {
    let rows = lat_n + 1;
    let index = |a: u32, b: u32| a * rows + b;
    let mut rng = facet_rng(seed);
    let mut indices = try_buffer(lon_n as usize * lat_n as usize * 6, "index")?;

    for a in 0..lon_n {
        let next = if a == lon_n - 1 { 0 } else { a + 1 };
        for b in 0..lat_n {
            let (v00, v01) = (index(a, b), index(a, b + 1));
            let (v10, v11) = (index(next, b), index(next, b + 1));

            let alternate = match mode {
                DiagonalMode::Fixed => false,
                DiagonalMode::Seeded => rng.random_bool(0.5),
            };
            if alternate {
                indices.extend_from_slice(&[v00, v01, v10, v11, v10, v01]);
            } else {
                indices.extend_from_slice(&[v00, v01, v11, v11, v10, v00]);
            }
        }
    }

    Ok(indices)
}

/// Area-weighted vertex normals.
///
/// Pole vertices whose incident faces are degenerate fall back to their
/// radial direction.
fn vertex_normals(positions: &[Vec3], indices: &[u32]) -> Result<Vec<Vec3>, GenerateError> {
    let mut sums = try_buffer(positions.len(), "normal")?;
    sums.resize(positions.len(), Vec3::ZERO);
    for tri in indices.chunks_exact(3) {
        let [i0, i1, i2] = [tri[0] as usize, tri[1] as usize, tri[2] as usize];
        let face = (positions[i1] - positions[i0]).cross(positions[i2] - positions[i0]);
        if face.is_finite() {
            sums[i0] += face;
            sums[i1] += face;
            sums[i2] += face;
        }
    }

    for (sum, pos) in sums.iter_mut().zip(positions) {
        *sum = sum
            .try_normalize()
            .or_else(|| pos.try_normalize())
            .unwrap_or(Vec3::Y);
    }
    Ok(sums)
}
