use earcutr::earcut;

use crate::geometry::ProjectedPoint;

/// Ear-clipping triangulation of a simple outline
///
/// Returns indices into `outline`, three per triangle, or nothing when the
/// outline has no area or earcut rejects it.
pub fn triangulate_outline(outline: &[ProjectedPoint]) -> Vec<u32> {
    if outline.len() < 3 {
        return Vec::new();
    }

    let mut vertices: Vec<f64> = Vec::with_capacity(outline.len() * 2);
    for p in outline {
        vertices.push(p.x);
        vertices.push(p.z);
    }

    earcut(&vertices, &[], 2)
        .unwrap_or_default()
        .into_iter()
        .map(|i| i as u32)
        .collect()
}

/// Twice the signed area of an outline in the (x, z) plane
///
/// Positive when the vertices run counter-clockwise with x as the first axis
/// and z as the second.
pub fn signed_area2(outline: &[ProjectedPoint]) -> f64 {
    let n = outline.len();
    (0..n)
        .map(|i| {
            let a = outline[i];
            let b = outline[(i + 1) % n];
            a.x * b.z - b.x * a.z
        })
        .sum()
}

/// Orientation of the triangle `a, b, c` in the same sense as [`signed_area2`]
pub fn orientation(a: ProjectedPoint, b: ProjectedPoint, c: ProjectedPoint) -> f64 {
    (b.x - a.x) * (c.z - a.z) - (b.z - a.z) * (c.x - a.x)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn square() -> Vec<ProjectedPoint> {
        vec![
            ProjectedPoint::new(0.0, 0.0),
            ProjectedPoint::new(1.0, 0.0),
            ProjectedPoint::new(1.0, 1.0),
            ProjectedPoint::new(0.0, 1.0),
        ]
    }

    #[test]
    fn test_triangulate_square() {
        let indices = triangulate_outline(&square());
        assert_eq!(indices.len(), 6);
        assert!(indices.iter().all(|&i| i < 4));
    }

    #[test]
    fn test_triangulate_empty() {
        assert!(triangulate_outline(&[]).is_empty());
    }

    #[test]
    fn test_triangulate_concave() {
        // L-shaped footprint
        let outline = vec![
            ProjectedPoint::new(0.0, 0.0),
            ProjectedPoint::new(2.0, 0.0),
            ProjectedPoint::new(2.0, 1.0),
            ProjectedPoint::new(1.0, 1.0),
            ProjectedPoint::new(1.0, 2.0),
            ProjectedPoint::new(0.0, 2.0),
        ];
        let indices = triangulate_outline(&outline);
        assert_eq!(indices.len(), 12);
    }

    #[test]
    fn test_signed_area() {
        let ccw = square();
        assert!((signed_area2(&ccw) - 2.0).abs() < 1e-12);

        let cw: Vec<ProjectedPoint> = ccw.into_iter().rev().collect();
        assert!((signed_area2(&cw) + 2.0).abs() < 1e-12);
    }
}
