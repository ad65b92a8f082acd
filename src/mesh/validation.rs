//! Mesh validation for 3D printing export
//!
//! - Detect degenerate triangles (zero area)
//! - Check for NaN/Inf coordinates
//! - Remove invalid triangles while keeping the vertex buffer intact

use super::Mesh;

/// Result of mesh validation
#[derive(Debug, Default)]
pub struct ValidationReport {
    /// Total number of triangles validated
    pub total: usize,
    /// Number of degenerate triangles (zero or near-zero area)
    pub degenerate: usize,
    /// Number of triangles touching a NaN/Inf vertex
    pub invalid_coords: usize,
    /// Warning messages for issues found
    pub warnings: Vec<String>,
}

impl ValidationReport {
    /// Check if the mesh passed validation without critical issues
    pub fn is_valid(&self) -> bool {
        self.invalid_coords == 0
    }

    /// Check if the mesh has any issues at all
    pub fn has_issues(&self) -> bool {
        self.degenerate > 0 || self.invalid_coords > 0
    }

    pub fn summary(&self) -> String {
        if !self.has_issues() {
            format!("Mesh valid: {} triangles, no issues", self.total)
        } else {
            format!(
                "Mesh issues: {} total, {} degenerate, {} invalid coords",
                self.total, self.degenerate, self.invalid_coords
            )
        }
    }
}

/// Minimum area threshold for non-degenerate triangles (in square model units)
const MIN_TRIANGLE_AREA: f32 = 1e-10;

/// Validate a mesh and return a detailed report
pub fn validate_mesh(mesh: &Mesh) -> ValidationReport {
    let mut report = ValidationReport {
        total: mesh.triangle_count(),
        ..Default::default()
    };

    for (i, tri) in mesh.triangles().enumerate() {
        if has_invalid_coords(&tri) {
            report.invalid_coords += 1;
            report
                .warnings
                .push(format!("Triangle {} has NaN/Inf coordinates", i));
            continue;
        }

        if is_degenerate(&tri) {
            report.degenerate += 1;
        }
    }

    if report.degenerate > 0 {
        report.warnings.push(format!(
            "{} degenerate triangles detected (will be removed)",
            report.degenerate
        ));
    }

    report
}

fn has_invalid_coords(tri: &[[f32; 3]; 3]) -> bool {
    tri.iter().flatten().any(|c| !c.is_finite())
}

fn is_degenerate(tri: &[[f32; 3]; 3]) -> bool {
    triangle_area(tri) < MIN_TRIANGLE_AREA
}

/// Calculate the area of a triangle from its vertices
fn triangle_area(vertices: &[[f32; 3]; 3]) -> f32 {
    let [v0, v1, v2] = *vertices;

    let edge_a = [v1[0] - v0[0], v1[1] - v0[1], v1[2] - v0[2]];
    let edge_b = [v2[0] - v0[0], v2[1] - v0[1], v2[2] - v0[2]];

    let cx = edge_a[1] * edge_b[2] - edge_a[2] * edge_b[1];
    let cy = edge_a[2] * edge_b[0] - edge_a[0] * edge_b[2];
    let cz = edge_a[0] * edge_b[1] - edge_a[1] * edge_b[0];

    0.5 * (cx * cx + cy * cy + cz * cz).sqrt()
}

/// Drop degenerate and invalid triangles
///
/// Vertices are kept as they are; only the index buffer shrinks.
pub fn remove_degenerate(mesh: Mesh) -> Mesh {
    let keep: Vec<bool> = mesh
        .triangles()
        .map(|tri| !has_invalid_coords(&tri) && !is_degenerate(&tri))
        .collect();

    let (vertices, indices) = mesh.into_parts();
    let indices = indices
        .chunks_exact(3)
        .zip(keep)
        .filter(|(_, keep)| *keep)
        .flat_map(|(tri, _)| tri.iter().copied())
        .collect();

    Mesh::from_parts(vertices, indices)
}

/// Validate and clean a mesh in one pass
pub fn validate_and_clean(mesh: Mesh) -> (Mesh, ValidationReport) {
    let report = validate_mesh(&mesh);
    let cleaned = remove_degenerate(mesh);
    (cleaned, report)
}
