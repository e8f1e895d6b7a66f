//! Writers for generated globes: PNG for the texture, Wavefront OBJ for the
//! mesh.

use std::fs::{self, File};
use std::io::{self, BufWriter, Write};
use std::path::Path;

use globe_planet::{GlobeMesh, Texture};
use thiserror::Error;
use tracing::info;

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("failed to write {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: io::Error,
    },

    #[error("failed to encode PNG: {0}")]
    Png(#[from] png::EncodingError),
}

fn io_error(path: &Path) -> impl FnOnce(io::Error) -> ExportError + '_ {
    move |source| ExportError::Io {
        path: path.display().to_string(),
        source,
    }
}

fn create(path: &Path) -> Result<BufWriter<File>, ExportError> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(io_error(path))?;
    }
    let file = File::create(path).map_err(io_error(path))?;
    Ok(BufWriter::new(file))
}

/// Encode the texture as an 8-bit RGB PNG.
pub fn encode_png<W: Write>(texture: &Texture, out: W) -> Result<(), ExportError> {
    let mut encoder = png::Encoder::new(out, texture.width(), texture.height());
    encoder.set_color(png::ColorType::Rgb);
    encoder.set_depth(png::BitDepth::Eight);
    let mut writer = encoder.write_header()?;
    writer.write_image_data(texture.as_bytes())?;
    writer.finish()?;
    Ok(())
}

/// Write the texture to `path` as PNG.
pub fn write_texture_png(texture: &Texture, path: &Path) -> Result<(), ExportError> {
    let out = create(path)?;
    encode_png(texture, out)?;
    info!(path = %path.display(), "wrote texture");
    Ok(())
}

/// Write positions, normals and faces in Wavefront OBJ text form.
pub fn encode_obj<W: Write>(mesh: &GlobeMesh, mut out: W) -> io::Result<()> {
    let (lon, lat) = mesh.grid_size();
    writeln!(out, "# globe {lon}x{lat}")?;
    for p in &mesh.positions {
        writeln!(out, "v {} {} {}", p.x, p.y, p.z)?;
    }
    for n in &mesh.normals {
        writeln!(out, "vn {} {} {}", n.x, n.y, n.z)?;
    }
    for tri in mesh.indices.chunks_exact(3) {
        let [a, b, c] = [tri[0] + 1, tri[1] + 1, tri[2] + 1];
        writeln!(out, "f {a}//{a} {b}//{b} {c}//{c}")?;
    }
    out.flush()
}

/// Write the mesh to `path` as OBJ.
pub fn write_mesh_obj(mesh: &GlobeMesh, path: &Path) -> Result<(), ExportError> {
    let out = create(path)?;
    encode_obj(mesh, out).map_err(io_error(path))?;
    info!(path = %path.display(), "wrote mesh");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use globe_config::GenerationConfig;
    use globe_planet::generate;

    fn small_world() -> globe_planet::World {
        generate(&GenerationConfig {
            latitude_samples: 4,
            longitude_samples: 4,
            texture_width: 8,
            texture_height: 8,
            ..Default::default()
        })
        .unwrap()
    }

    #[test]
    fn test_png_roundtrip_dimensions() {
        let world = small_world();
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out").join("texture.png");
        write_texture_png(&world.texture, &path).unwrap();

        let decoder = png::Decoder::new(File::open(&path).unwrap());
        let mut reader = decoder.read_info().unwrap();
        let mut buf = vec![0; reader.output_buffer_size()];
        let info = reader.next_frame(&mut buf).unwrap();
        assert_eq!((info.width, info.height), (8, 8));
        assert_eq!(info.color_type, png::ColorType::Rgb);
        assert_eq!(&buf[..info.buffer_size()], world.texture.as_bytes());
    }

    #[test]
    fn test_obj_counts() {
        let world = small_world();
        let mut buf = Vec::new();
        encode_obj(&world.mesh, &mut buf).unwrap();
        let text = String::from_utf8(buf).unwrap();

        assert_eq!(text.lines().filter(|l| l.starts_with("v ")).count(), 20);
        assert_eq!(text.lines().filter(|l| l.starts_with("vn ")).count(), 20);
        assert_eq!(text.lines().filter(|l| l.starts_with("f ")).count(), 32);
        assert!(text.lines().all(|l| !l.contains("f 0/")));
    }

    #[test]
    fn test_write_mesh_obj_creates_file() {
        let world = small_world();
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("mesh.obj");
        write_mesh_obj(&world.mesh, &path).unwrap();
        assert!(fs::read_to_string(&path).unwrap().starts_with("# globe 4x4"));
    }

    #[test]
    fn test_write_into_file_path_fails() {
        let dir = tempfile::tempdir().unwrap();
        let blocker = dir.path().join("blocker");
        fs::write(&blocker, b"x").unwrap();
        let world = small_world();
        let err = write_texture_png(&world.texture, &blocker.join("t.png")).unwrap_err();
        assert!(matches!(err, ExportError::Io { .. }));
    }
}
