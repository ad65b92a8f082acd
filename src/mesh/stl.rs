use super::Mesh;
use super::builder::calculate_normal;
use anyhow::{Context, Result};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

const HEADER_TEXT: &[u8] = b"trackto3d - GPS track model";

/// Write a mesh to a binary STL file
///
/// Binary STL format:
/// - 80 byte header
/// - 4 byte u32 triangle count (little endian)
/// - For each triangle:
///   - 3 x f32 normal (12 bytes)
///   - 3 x 3 x f32 vertices (36 bytes)
///   - 2 byte attribute (usually 0)
///
/// Scene space is y-up with north towards -z; slicers expect z-up, so every
/// vertex is rotated to (x, -z, y) on the way out. The rotation keeps winding.
pub fn write_stl(path: &Path, mesh: &Mesh) -> Result<()> {
    let file = File::create(path)
        .with_context(|| format!("Failed to create STL file: {}", path.display()))?;
    let mut writer = BufWriter::new(file);
    write_stl_to(&mut writer, mesh)?;
    writer.flush()?;
    Ok(())
}

/// Write binary STL into any writer
pub fn write_stl_to<W: Write>(writer: &mut W, mesh: &Mesh) -> Result<()> {
    let mut header = [b' '; 80];
    header[..HEADER_TEXT.len()].copy_from_slice(HEADER_TEXT);
    writer.write_all(&header)?;

    let count = u32::try_from(mesh.triangle_count()).context("Too many triangles for STL")?;
    writer.write_all(&count.to_le_bytes())?;

    for [a, b, c] in mesh.triangles() {
        let vertices = [to_print_frame(a), to_print_frame(b), to_print_frame(c)];
        let normal = calculate_normal(vertices[0], vertices[1], vertices[2]);

        for n in normal {
            writer.write_all(&n.to_le_bytes())?;
        }
        for vertex in &vertices {
            for coord in vertex {
                writer.write_all(&coord.to_le_bytes())?;
            }
        }

        // Attribute byte count (2 bytes, usually 0)
        writer.write_all(&[0u8, 0u8])?;
    }

    Ok(())
}

fn to_print_frame([x, y, z]: [f32; 3]) -> [f32; 3] {
    [x, -z, y]
}

/// Get the file size of an STL with the given number of triangles
pub fn estimate_stl_size(triangle_count: usize) -> usize {
    // 80 (header) + 4 (count) + triangles * (12 normal + 36 vertices + 2 attribute)
    80 + 4 + triangle_count * 50
}
