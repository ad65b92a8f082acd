use std::f64::consts::FRAC_PI_4;
use std::fmt::Write;

use crate::domain::GeoPoint;

/// Side of the square SVG canvas
pub const CANVAS_SIZE: f64 = 1000.0;
/// Side of the square area the track is fitted into
const DRAW_AREA: f64 = 800.0;
/// Latitude where Web Mercator reaches a square world
const MERCATOR_MAX_LAT: f64 = 85.051_128_78;

/// Project points onto the SVG canvas with Web Mercator
///
/// The track is scaled uniformly to fit the 800x800 drawing area and centered
/// on the 1000x1000 canvas; y grows downwards. Latitudes beyond the Mercator
/// limit are clamped to it. A track without any extent collapses onto the
/// canvas center.
pub fn plan_view_points(points: &[GeoPoint]) -> Vec<(f64, f64)> {
    if points.is_empty() {
        return Vec::new();
    }

    let mercator: Vec<(f64, f64)> = points
        .iter()
        .map(|p| {
            let x = p.longitude.to_radians();
            let lat = p.latitude.clamp(-MERCATOR_MAX_LAT, MERCATOR_MAX_LAT);
            let y = (lat.to_radians() / 2.0 + FRAC_PI_4).tan().ln();
            (x, y)
        })
        .collect();

    let (min_x, max_x, min_y, max_y) = mercator.iter().fold(
        (f64::MAX, f64::MIN, f64::MAX, f64::MIN),
        |(lx, hx, ly, hy), &(x, y)| (lx.min(x), hx.max(x), ly.min(y), hy.max(y)),
    );

    let x_range = max_x - min_x;
    let y_range = max_y - min_y;
    let margin = (CANVAS_SIZE - DRAW_AREA) / 2.0;

    let (scale, x_offset, y_offset) = if x_range == 0.0 && y_range == 0.0 {
        let center = CANVAS_SIZE / 2.0;
        return vec![(center, center); points.len()];
    } else if x_range == 0.0 {
        (DRAW_AREA / y_range, CANVAS_SIZE / 2.0, margin)
    } else if y_range == 0.0 {
        (DRAW_AREA / x_range, margin, CANVAS_SIZE / 2.0)
    } else {
        let scale = (DRAW_AREA / x_range).min(DRAW_AREA / y_range);
        (
            scale,
            (CANVAS_SIZE - x_range * scale) / 2.0,
            (CANVAS_SIZE - y_range * scale) / 2.0,
        )
    };

    mercator
        .into_iter()
        .map(|(x, y)| {
            (
                (x - min_x) * scale + x_offset,
                // Flip so north is up
                (max_y - y) * scale + y_offset,
            )
        })
        .collect()
}

/// Straight polyline through every point
pub fn direct_path(points: &[(f64, f64)]) -> String {
    let Some(((x0, y0), rest)) = points.split_first() else {
        return String::new();
    };

    let mut d = format!("M {:.2},{:.2}", x0, y0);
    for (x, y) in rest {
        let _ = write!(d, " L {:.2},{:.2}", x, y);
    }
    d
}

/// Smoothed path through already simplified points
///
/// Interior points become quadratic Bézier control points; each curve ends at
/// the midpoint to the next point, so consecutive curves join smoothly. The
/// first curve is an explicit `Q`, the rest use the reflected `T` form.
pub fn smoothed_path(points: &[(f64, f64)]) -> String {
    let Some(&(x0, y0)) = points.first() else {
        return String::new();
    };

    let mut d = format!("M {:.2},{:.2}", x0, y0);

    match points.len() {
        1 => {}
        2 => {
            let _ = write!(d, " L {:.2},{:.2}", points[1].0, points[1].1);
        }
        n => {
            for i in 1..n - 1 {
                let (cx, cy) = points[i];
                let (nx, ny) = points[i + 1];
                let (mx, my) = ((cx + nx) / 2.0, (cy + ny) / 2.0);
                if i == 1 {
                    let _ = write!(d, " Q {:.2},{:.2} {:.2},{:.2}", cx, cy, mx, my);
                } else {
                    let _ = write!(d, " T {:.2},{:.2}", mx, my);
                }
            }
            let (lx, ly) = points[n - 1];
            let _ = write!(d, " T {:.2},{:.2}", lx, ly);
        }
    }

    d
}
