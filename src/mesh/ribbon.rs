use super::Mesh;
use super::extrusion::extrude_prism;
use crate::geometry::ProjectedPoint;

/// Closed outline of a constant-width ribbon following `points`
///
/// The outline walks the left offsets forward, then the right offsets back,
/// so a path of N points gives 2N outline vertices: left `i` sits at index
/// `i`, right `i` at index `2N - 1 - i`.
///
/// Interior vertices use the normalized sum of the incoming and outgoing
/// directions (an averaged miter). The offset at a turn is exactly
/// `half_width` along that bisector, so the ribbon gets visibly narrower at
/// sharp turns.
pub fn ribbon_outline(points: &[ProjectedPoint], half_width: f64) -> Vec<ProjectedPoint> {
    let n = points.len();
    if n < 2 {
        return Vec::new();
    }

    let mut left = Vec::with_capacity(n);
    let mut right = Vec::with_capacity(n);

    for (i, p) in points.iter().enumerate() {
        let (dx, dz) = if i == 0 {
            direction(points[0], points[1])
        } else if i == n - 1 {
            direction(points[i - 1], points[i])
        } else {
            let d1 = direction(points[i - 1], points[i]);
            let d2 = direction(points[i], points[i + 1]);
            normalize_or((d1.0 + d2.0, d1.1 + d2.1), d1)
        };

        // Perpendicular (rotate 90 degrees); +z is south, so this points right
        let (px, pz) = (-dz, dx);

        left.push(ProjectedPoint::new(p.x - px * half_width, p.z - pz * half_width));
        right.push(ProjectedPoint::new(p.x + px * half_width, p.z + pz * half_width));
    }

    left.extend(right.into_iter().rev());
    left
}

/// Extrude a projected track into a solid ribbon on the scene floor
///
/// The prism spans `0..depth` on the vertical axis with flat caps and flat
/// end faces. Fewer than two points yield an empty mesh.
pub fn extrude_track(points: &[ProjectedPoint], half_width: f64, depth: f64) -> Mesh {
    let outline = ribbon_outline(points, half_width);
    if outline.is_empty() {
        return Mesh::empty();
    }

    // The cap of this outline is the strip of per-segment quads
    let n = points.len() as u32;
    let mut cap = Vec::with_capacity((points.len() - 1) * 6);
    for i in 0..n - 1 {
        let l0 = i;
        let l1 = i + 1;
        let r1 = 2 * n - 2 - i;
        let r0 = 2 * n - 1 - i;
        cap.extend_from_slice(&[l0, l1, r1, l0, r1, r0]);
    }

    extrude_prism(&outline, &cap, 0.0, depth as f32)
}

/// Calculate normalized direction vector between two points
fn direction(p1: ProjectedPoint, p2: ProjectedPoint) -> (f64, f64) {
    normalize_or((p2.x - p1.x, p2.z - p1.z), (1.0, 0.0))
}

/// Normalize a 2D vector, falling back for zero-length input
fn normalize_or((x, z): (f64, f64), fallback: (f64, f64)) -> (f64, f64) {
    let len = (x * x + z * z).sqrt();
    if len > 1e-10 {
        (x / len, z / len)
    } else {
        fallback
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn pts(raw: &[(f64, f64)]) -> Vec<ProjectedPoint> {
        raw.iter().map(|&(x, z)| ProjectedPoint::new(x, z)).collect()
    }

    #[test]
    fn test_extrude_simple_segment() {
        let mesh = extrude_track(&pts(&[(0.0, 0.0), (10.0, 0.0)]), 1.0, 1.0);

        // 4 outline vertices, bottom + top ring
        assert_eq!(mesh.vertex_count(), 8);
        // 2 top + 2 bottom + 4 walls of 2 triangles each
        assert_eq!(mesh.triangle_count(), 12);
    }

    #[test]
    fn test_extrude_empty() {
        assert!(extrude_track(&[], 1.0, 1.0).is_empty());
    }

    #[test]
    fn test_extrude_single_point() {
        assert!(extrude_track(&pts(&[(3.0, 4.0)]), 1.0, 1.0).is_empty());
    }

    #[test]
    fn test_outline_order() {
        let outline = ribbon_outline(&pts(&[(0.0, 0.0), (10.0, 0.0), (20.0, 0.0)]), 2.0);
        assert_eq!(outline.len(), 6);

        // Heading east, left is north (-z)
        for p in &outline[..3] {
            assert_relative_eq!(p.z, -2.0);
        }
        for p in &outline[3..] {
            assert_relative_eq!(p.z, 2.0);
        }
        assert_relative_eq!(outline[0].x, 0.0);
        assert_relative_eq!(outline[2].x, 20.0);
        assert_relative_eq!(outline[3].x, 20.0);
        assert_relative_eq!(outline[5].x, 0.0);
    }

    #[test]
    fn test_prism_spans_depth() {
        let mesh = extrude_track(&pts(&[(0.0, 0.0), (5.0, 5.0), (10.0, 0.0)]), 0.5, 2.5);
        let (min_y, max_y) = mesh
            .vertices()
            .iter()
            .fold((f32::MAX, f32::MIN), |(lo, hi), v| (lo.min(v[1]), hi.max(v[1])));
        assert_eq!(min_y, 0.0);
        assert_eq!(max_y, 2.5);
    }

    #[test]
    fn test_top_faces_up() {
        let mesh = extrude_track(&pts(&[(0.0, 0.0), (10.0, 0.0), (10.0, 10.0)]), 1.0, 1.0);
        let normals = mesh.face_normals();
        // First cap triangle of the strip is a top face
        assert!((normals[0][1] - 1.0).abs() < 1e-6);
        assert!((normals[1][1] + 1.0).abs() < 1e-6);
    }

    /// The averaged miter keeps the offset at `half_width` along the bisector
    /// instead of stretching it to `half_width / cos(theta / 2)`, so a right
    /// angle turn narrows the ribbon to about 71% of its width there. This is
    /// the accepted approximation, not a true miter join.
    #[test]
    fn test_sharp_turn_narrows_ribbon() {
        let half_width = 1.0;
        let path = pts(&[(0.0, 0.0), (10.0, 0.0), (10.0, 10.0)]);
        let outline = ribbon_outline(&path, half_width);

        let corner = path[1];
        let left = outline[1];
        let offset = ((left.x - corner.x).powi(2) + (left.z - corner.z).powi(2)).sqrt();
        assert_relative_eq!(offset, half_width, epsilon = 1e-12);

        // Distance from the incoming segment's centerline (z = 0)
        let across = left.z.abs();
        assert_relative_eq!(across, half_width * std::f64::consts::FRAC_1_SQRT_2, epsilon = 1e-12);
        assert!(across < half_width);
    }

    #[test]
    fn test_u_turn_uses_incoming_direction() {
        let path = pts(&[(0.0, 0.0), (10.0, 0.0), (0.0, 0.0)]);
        let outline = ribbon_outline(&path, 1.0);
        assert!(outline.iter().all(|p| p.x.is_finite() && p.z.is_finite()));
        assert_relative_eq!(outline[1].z, -1.0);
    }

    #[test]
    fn test_duplicate_points_stay_finite() {
        let mesh = extrude_track(&pts(&[(1.0, 1.0), (1.0, 1.0), (4.0, 1.0)]), 1.0, 1.0);
        assert!(mesh.vertices().iter().flatten().all(|c| c.is_finite()));
    }
}
