use super::{Bounds, ModelDimensions};
use crate::domain::GeoPoint;

/// A position on the scene floor in model units
///
/// Origin at the scene center, +x east, north towards -z.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ProjectedPoint {
    pub x: f64,
    pub z: f64,
}

impl ProjectedPoint {
    pub fn new(x: f64, z: f64) -> Self {
        Self { x, z }
    }
}

/// Linear projection of a bounding box onto the model floor
///
/// The box is stretched to fill `width x depth` exactly. Callers that care
/// about ground aspect pick dimensions with [`ModelDimensions::fit_to_bounds`].
#[derive(Debug, Clone, Copy)]
pub struct Projector {
    bounds: Bounds,
    dims: ModelDimensions,
}

impl Projector {
    pub fn new(bounds: Bounds, dims: ModelDimensions) -> Self {
        Self { bounds, dims }
    }

    /// Project a lat/lon point to model units
    pub fn project(&self, point: &GeoPoint) -> ProjectedPoint {
        project(point, &self.bounds, &self.dims)
    }

    /// Project a slice of points, preserving order
    pub fn project_points(&self, points: &[GeoPoint]) -> Vec<ProjectedPoint> {
        points.iter().map(|p| self.project(p)).collect()
    }
}

/// Map a geographic coordinate into the scene
///
/// `Bounds` cannot be constructed with zero area, so both divisions are safe.
pub fn project(point: &GeoPoint, bounds: &Bounds, dims: &ModelDimensions) -> ProjectedPoint {
    let u = (point.longitude - bounds.west()) / (bounds.east() - bounds.west());
    let v = (point.latitude - bounds.south()) / (bounds.north() - bounds.south());

    ProjectedPoint {
        x: (u - 0.5) * dims.width(),
        z: -(v - 0.5) * dims.depth(),
    }
}
