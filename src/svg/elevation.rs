use std::fmt::Write;

use crate::domain::GeoPoint;

const CHART_WIDTH: f64 = 1000.0;
const CHART_HEIGHT: f64 = 300.0;

/// Elevation profile chart along the track
///
/// Points are placed by their index among all track points, so gaps in the
/// elevation data keep their horizontal position. Returns `None` when no
/// point carries an elevation.
pub fn elevation_profile_svg(points: &[GeoPoint], title: &str) -> Option<String> {
    let samples: Vec<(usize, f64)> = points
        .iter()
        .enumerate()
        .filter_map(|(i, p)| p.elevation.map(|e| (i, e)))
        .collect();
    if samples.is_empty() {
        return None;
    }

    let min_ele = samples.iter().map(|&(_, e)| e).fold(f64::MAX, f64::min);
    let max_ele = samples.iter().map(|&(_, e)| e).fold(f64::MIN, f64::max);
    let range = if max_ele > min_ele { max_ele - min_ele } else { 1.0 };
    let last_index = points.len().saturating_sub(1).max(1) as f64;

    let path_data = profile_path(&samples, last_index, min_ele, range);

    let mut stops = String::new();
    for pct in (0..=100).step_by(20) {
        // Blue at the bottom to green at the top
        let hue = 240 - pct * 6 / 5;
        let _ = writeln!(
            stops,
            r#"    <stop offset="{pct}%" stop-color="hsl({hue}, 70%, 50%)" />"#
        );
    }

    Some(format!(
        r##"<?xml version="1.0" encoding="UTF-8"?>
<svg xmlns="http://www.w3.org/2000/svg" viewBox="0 0 1000 400" width="1000" height="400">
  <title>{title} - Elevation Profile</title>
  <desc>Elevation profile showing height changes along the track</desc>
  <defs>
    <linearGradient id="elevationGradient" x1="0%" y1="100%" x2="0%" y2="0%">
{stops}    </linearGradient>
  </defs>
  <style>
    .elevation-profile {{
      fill: none;
      stroke: url(#elevationGradient);
      stroke-width: 3;
      stroke-linecap: round;
      stroke-linejoin: round;
    }}
    .elevation-fill {{
      fill: url(#elevationGradient);
      fill-opacity: 0.3;
    }}
    .elevation-grid {{
      stroke: #E0E0E0;
      stroke-width: 1;
      stroke-dasharray: 2,2;
    }}
    .elevation-text {{
      font-family: Arial, sans-serif;
      font-size: 12px;
      fill: #666;
    }}
  </style>

  <g class="elevation-grid">
    <line x1="0" y1="50" x2="1000" y2="50" />
    <line x1="0" y1="150" x2="1000" y2="150" />
    <line x1="0" y1="250" x2="1000" y2="250" />
  </g>

  <path class="elevation-fill" d="{path_data} L 1000,300 L 0,300 Z" />
  <path class="elevation-profile" d="{path_data}" />

  <text class="elevation-text" x="10" y="25">Max: {max_ele:.0}m</text>
  <text class="elevation-text" x="10" y="385">Min: {min_ele:.0}m</text>
</svg>"##
    ))
}

fn profile_path(samples: &[(usize, f64)], last_index: f64, min_ele: f64, range: f64) -> String {
    let mut d = String::new();
    for (n, &(idx, ele)) in samples.iter().enumerate() {
        let x = idx as f64 / last_index * CHART_WIDTH;
        let y = CHART_HEIGHT - (ele - min_ele) / range * CHART_HEIGHT;
        let cmd = if n == 0 { "M" } else { " L" };
        let _ = write!(d, "{cmd} {x:.2},{y:.2}");
    }
    d
}
