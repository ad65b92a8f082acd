use crate::domain::GeoPoint;
use crate::geometry::Projector;
use crate::mesh::{Mesh, extrude_track};

/// Ribbon dimensions for the track layer, in model units
#[derive(Debug, Clone, Copy)]
pub struct TrackConfig {
    pub half_width: f64,
    pub depth: f64,
}

/// Generate the track ribbon prism
///
/// # Arguments
/// * `points` - Track points in recording order
/// * `projector` - Scene projector (lat/lon → model units)
/// * `config` - Ribbon half width and extrusion depth
///
/// # Returns
/// `None` when the track has fewer than two points
pub fn generate_track_mesh(
    points: &[GeoPoint],
    projector: &Projector,
    config: &TrackConfig,
) -> Option<Mesh> {
    if points.len() < 2 {
        log::debug!("Track has {} point(s), skipping ribbon", points.len());
        return None;
    }

    let projected = projector.project_points(points);
    let mesh = extrude_track(&projected, config.half_width, config.depth);

    (!mesh.is_empty()).then_some(mesh)
}
