//! Flat SVG renderings of a track: plan view paths and the elevation chart

pub mod elevation;
pub mod path;

pub use elevation::elevation_profile_svg;
pub use path::{direct_path, plan_view_points, smoothed_path};

/// Which plan-view path a document holds
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PathVariant {
    /// Every recorded point, joined by straight lines
    Direct,
    /// Simplified points joined by quadratic curves
    Optimized,
}

impl PathVariant {
    pub fn label(self) -> &'static str {
        match self {
            PathVariant::Direct => "direct",
            PathVariant::Optimized => "optimized",
        }
    }

    fn class(self) -> &'static str {
        match self {
            PathVariant::Direct => "track-path",
            PathVariant::Optimized => "track-path-optimized",
        }
    }
}

/// Complete SVG document for a plan-view path
pub fn track_svg(path_data: &str, title: &str, variant: PathVariant) -> String {
    let label = variant.label();
    let class = variant.class();
    format!(
        r##"<?xml version="1.0" encoding="UTF-8"?>
<svg xmlns="http://www.w3.org/2000/svg" viewBox="0 0 1000 1000" width="1000" height="1000">
  <title>{title} - {label}</title>
  <desc>GPX track converted to SVG - {label} version</desc>
  <style>
    .track-path {{
      fill: none;
      stroke: #FF6B6B;
      stroke-width: 2;
      stroke-linecap: round;
      stroke-linejoin: round;
    }}
    .track-path-optimized {{
      fill: none;
      stroke: #4ECDC4;
      stroke-width: 2;
      stroke-linecap: round;
      stroke-linejoin: round;
    }}
  </style>
  <path class="{class}" d="{path_data}" />
</svg>"##
    )
}
