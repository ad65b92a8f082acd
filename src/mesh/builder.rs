use crate::error::GeometryError;

/// Indexed triangle mesh in scene units, y up
///
/// Immutable once built: every index is guaranteed to address a vertex and the
/// index count is a multiple of three.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Mesh {
    vertices: Vec<[f32; 3]>,
    indices: Vec<u32>,
}

impl Mesh {
    pub fn empty() -> Self {
        Self::default()
    }

    /// Build a mesh from raw buffers, rejecting inconsistent ones
    pub fn new(vertices: Vec<[f32; 3]>, indices: Vec<u32>) -> Result<Self, GeometryError> {
        if indices.len() % 3 != 0 {
            return Err(GeometryError::InvalidMesh(format!(
                "index count {} is not a multiple of 3",
                indices.len()
            )));
        }
        if let Some(&bad) = indices.iter().find(|&&i| i as usize >= vertices.len()) {
            return Err(GeometryError::InvalidMesh(format!(
                "index {} out of range for {} vertices",
                bad,
                vertices.len()
            )));
        }
        Ok(Self { vertices, indices })
    }

    /// Buffers already known to be consistent (builder and merge output)
    pub(crate) fn from_parts(vertices: Vec<[f32; 3]>, indices: Vec<u32>) -> Self {
        debug_assert!(indices.len() % 3 == 0);
        debug_assert!(indices.iter().all(|&i| (i as usize) < vertices.len()));
        Self { vertices, indices }
    }

    pub fn vertices(&self) -> &[[f32; 3]] {
        &self.vertices
    }

    pub fn indices(&self) -> &[u32] {
        &self.indices
    }

    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }

    pub fn into_parts(self) -> (Vec<[f32; 3]>, Vec<u32>) {
        (self.vertices, self.indices)
    }

    /// Corner positions of every triangle, in index order
    pub fn triangles(&self) -> impl Iterator<Item = [[f32; 3]; 3]> + '_ {
        self.indices.chunks_exact(3).map(|t| {
            [
                self.vertices[t[0] as usize],
                self.vertices[t[1] as usize],
                self.vertices[t[2] as usize],
            ]
        })
    }

    /// One unit normal per triangle (right-hand rule)
    pub fn face_normals(&self) -> Vec<[f32; 3]> {
        self.triangles()
            .map(|[v0, v1, v2]| calculate_normal(v0, v1, v2))
            .collect()
    }

    /// Area-weighted vertex normals
    ///
    /// Computed from the final index buffer, so call this once on a merged
    /// mesh rather than per source mesh.
    pub fn vertex_normals(&self) -> Vec<[f32; 3]> {
        let mut normals = vec![[0.0f32; 3]; self.vertices.len()];

        for t in self.indices.chunks_exact(3) {
            let [v0, v1, v2] = [
                self.vertices[t[0] as usize],
                self.vertices[t[1] as usize],
                self.vertices[t[2] as usize],
            ];
            // Unnormalized cross product, its length is twice the area
            let n = cross(sub(v1, v0), sub(v2, v0));
            for &i in t {
                let acc = &mut normals[i as usize];
                acc[0] += n[0];
                acc[1] += n[1];
                acc[2] += n[2];
            }
        }

        normals.into_iter().map(normalize_or_up).collect()
    }
}

/// Calculate the normal vector for a triangle using the cross product
pub(crate) fn calculate_normal(v0: [f32; 3], v1: [f32; 3], v2: [f32; 3]) -> [f32; 3] {
    normalize_or_up(cross(sub(v1, v0), sub(v2, v0)))
}

fn sub(a: [f32; 3], b: [f32; 3]) -> [f32; 3] {
    [a[0] - b[0], a[1] - b[1], a[2] - b[2]]
}

fn cross(u: [f32; 3], v: [f32; 3]) -> [f32; 3] {
    [
        u[1] * v[2] - u[2] * v[1],
        u[2] * v[0] - u[0] * v[2],
        u[0] * v[1] - u[1] * v[0],
    ]
}

fn normalize_or_up([x, y, z]: [f32; 3]) -> [f32; 3] {
    let len = (x * x + y * y + z * z).sqrt();
    if len > 1e-10 {
        [x / len, y / len, z / len]
    } else {
        [0.0, 1.0, 0.0] // Scene up for degenerate triangles
    }
}

/// Accumulator for indexed meshes
#[derive(Debug, Default)]
pub struct MeshBuilder {
    vertices: Vec<[f32; 3]>,
    indices: Vec<u32>,
}

impl MeshBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(vertices: usize, triangles: usize) -> Self {
        Self {
            vertices: Vec::with_capacity(vertices),
            indices: Vec::with_capacity(triangles * 3),
        }
    }

    /// Append a vertex and return its index
    pub fn add_vertex(&mut self, v: [f32; 3]) -> u32 {
        self.vertices.push(v);
        (self.vertices.len() - 1) as u32
    }

    pub fn add_triangle(&mut self, a: u32, b: u32, c: u32) {
        self.indices.extend_from_slice(&[a, b, c]);
    }

    /// Add a quad (two triangles), corners in winding order
    pub fn add_quad(&mut self, a: u32, b: u32, c: u32, d: u32) {
        self.add_triangle(a, b, c);
        self.add_triangle(a, c, d);
    }

    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }

    pub fn finish(self) -> Mesh {
        Mesh::from_parts(self.vertices, self.indices)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_triangle_normal() {
        // Counter-clockwise seen from above (+y) in the x/z plane is z -> x
        let n = calculate_normal([0.0, 0.0, 0.0], [0.0, 0.0, 1.0], [1.0, 0.0, 0.0]);
        assert!(n[0].abs() < 0.001);
        assert!((n[1] - 1.0).abs() < 0.001);
        assert!(n[2].abs() < 0.001);
    }

    #[test]
    fn test_mesh_builder() {
        let mut builder = MeshBuilder::new();
        let a = builder.add_vertex([0.0, 0.0, 0.0]);
        let b = builder.add_vertex([1.0, 0.0, 0.0]);
        let c = builder.add_vertex([1.0, 0.0, 1.0]);
        let d = builder.add_vertex([0.0, 0.0, 1.0]);
        builder.add_triangle(a, b, c);
        builder.add_quad(a, b, c, d);

        assert_eq!(builder.triangle_count(), 3); // 1 triangle + 2 from quad
        let mesh = builder.finish();
        assert_eq!(mesh.vertex_count(), 4);
        assert_eq!(mesh.indices().len(), 9);
    }

    #[test]
    fn test_new_rejects_bad_buffers() {
        let vertices = vec![[0.0, 0.0, 0.0], [1.0, 0.0, 0.0], [0.0, 0.0, 1.0]];
        assert!(Mesh::new(vertices.clone(), vec![0, 1]).is_err());
        assert!(Mesh::new(vertices.clone(), vec![0, 1, 3]).is_err());
        assert!(Mesh::new(vertices, vec![0, 1, 2]).is_ok());
    }

    #[test]
    fn test_vertex_normals_flat_quad() {
        let mesh = Mesh::new(
            vec![
                [0.0, 0.0, 0.0],
                [0.0, 0.0, 1.0],
                [1.0, 0.0, 1.0],
                [1.0, 0.0, 0.0],
            ],
            vec![0, 1, 2, 0, 2, 3],
        )
        .unwrap();

        for n in mesh.vertex_normals() {
            assert!((n[1] - 1.0).abs() < 1e-6);
        }
        assert_eq!(mesh.face_normals().len(), 2);
    }
}
