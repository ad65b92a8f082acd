use geo::{LineString, Simplify};

/// Douglas-Peucker simplification of a 2D polyline
///
/// Endpoints are always kept; anything with two points or fewer is returned as is.
pub fn simplify_polyline(points: &[(f64, f64)], epsilon: f64) -> Vec<(f64, f64)> {
    if points.len() <= 2 {
        return points.to_vec();
    }

    let line: LineString<f64> = points
        .iter()
        .map(|&(x, y)| geo::coord! { x: x, y: y })
        .collect();

    let simplified = line.simplify(&epsilon);

    simplified.0.into_iter().map(|c| (c.x, c.y)).collect()
}

/// Share of points removed by simplification, in percent
pub fn reduction_percent(original: usize, simplified: usize) -> f64 {
    if original == 0 {
        return 0.0;
    }
    (1.0 - simplified as f64 / original as f64) * 100.0
}
