use crate::domain::FootprintPolygon;
use crate::geometry::{Bounds, ModelDimensions, Projector};
use crate::mesh::{Mesh, extrude_polygon, triangulate_outline};

/// Extrude one footprint from the scene floor up to `output_height`
///
/// Vertices are projected in the order they were fetched; winding and
/// self-intersections are left as the source data has them. Returns `None`
/// for footprints with fewer than three usable vertices or no area.
pub fn extrude_footprint(
    polygon: &FootprintPolygon,
    bounds: &Bounds,
    dims: &ModelDimensions,
    output_height: f64,
) -> Option<Mesh> {
    extrude_footprint_between(polygon, bounds, dims, 0.0, output_height)
}

/// Extrude one footprint between two vertical levels
pub fn extrude_footprint_between(
    polygon: &FootprintPolygon,
    bounds: &Bounds,
    dims: &ModelDimensions,
    bottom: f64,
    top: f64,
) -> Option<Mesh> {
    let vertices = polygon.usable_vertices();
    if vertices.len() < 3 {
        log::debug!(
            "Skipping footprint with {} usable vertices",
            vertices.len()
        );
        return None;
    }

    let projector = Projector::new(*bounds, *dims);
    let outline = projector.project_points(&vertices);

    let mesh = extrude_polygon(&outline, bottom as f32, top as f32);
    if mesh.is_none() {
        log::debug!(
            "Skipping footprint with {} vertices: triangulation produced no area",
            vertices.len()
        );
    }
    mesh
}

/// Whether a footprint has enough usable vertices and a cap with area
pub fn is_extrudable(polygon: &FootprintPolygon, bounds: &Bounds, dims: &ModelDimensions) -> bool {
    let vertices = polygon.usable_vertices();
    if vertices.len() < 3 {
        return false;
    }
    let outline = Projector::new(*bounds, *dims).project_points(&vertices);
    !triangulate_outline(&outline).is_empty()
}
