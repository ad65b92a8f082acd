use super::Mesh;
use crate::error::GeometryError;

/// Concatenate meshes into a single buffer
///
/// Vertices are appended in input order and each mesh's indices are shifted by
/// the number of vertices that precede it, so triangle winding is preserved.
/// Nothing is welded. A single input is handed back untouched.
pub fn merge(mut meshes: Vec<Mesh>) -> Result<Mesh, GeometryError> {
    match meshes.len() {
        0 => return Ok(Mesh::empty()),
        1 => return Ok(meshes.pop().unwrap_or_default()),
        _ => {}
    }

    let total_vertices: usize = meshes.iter().map(Mesh::vertex_count).sum();
    if u32::try_from(total_vertices).is_err() {
        return Err(GeometryError::IndexOverflow(total_vertices));
    }
    let total_indices: usize = meshes.iter().map(|m| m.indices().len()).sum();

    let mut vertices = Vec::with_capacity(total_vertices);
    let mut indices = Vec::with_capacity(total_indices);

    for mesh in meshes {
        let offset = vertices.len() as u32;
        let (v, i) = mesh.into_parts();
        vertices.extend(v);
        indices.extend(i.into_iter().map(|idx| idx + offset));
    }

    Ok(Mesh::from_parts(vertices, indices))
}
