//! Scene composition: foundation, buildings and track in one consistent frame
//!
//! Everything is rebuilt from scratch on each call. Projection depends on the
//! shared bounds and dimensions and height mapping depends on the whole
//! footprint set, so there is nothing to patch incrementally.

use crate::config::defaults;
use crate::domain::{FootprintPolygon, GeoPoint};
use crate::error::GeometryError;
use crate::geometry::{Bounds, ModelDimensions, Projector};
use crate::heights::{HeightRange, compute_range, map_height, resolve_height};
use crate::layers::{
    FoundationConfig, TrackConfig, extrude_footprint, generate_foundation, generate_track_mesh,
    is_extrudable,
};
use crate::mesh::{Mesh, merge};

/// Numeric styling of the generated geometry, in model units
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SceneStyle {
    pub track_half_width: f64,
    pub track_depth: f64,
    pub foundation_thickness: f64,
    /// Level of the foundation's top face; kept slightly below zero so the
    /// slabs never share a plane with building bottoms
    pub foundation_offset: f64,
}

impl Default for SceneStyle {
    fn default() -> Self {
        Self {
            track_half_width: defaults::TRACK_HALF_WIDTH,
            track_depth: defaults::TRACK_DEPTH,
            foundation_thickness: defaults::FOUNDATION_THICKNESS,
            foundation_offset: defaults::FOUNDATION_OFFSET,
        }
    }
}

impl SceneStyle {
    /// Reject negative or non-finite widths and depths
    pub fn validate(&self) -> Result<(), GeometryError> {
        let checks = [
            ("track_half_width", self.track_half_width),
            ("track_depth", self.track_depth),
            ("foundation_thickness", self.foundation_thickness),
        ];
        for (name, value) in checks {
            if !value.is_finite() || value < 0.0 {
                return Err(GeometryError::InvalidStyle(format!(
                    "{name} must be a non-negative number, got {value}"
                )));
            }
        }
        if !self.foundation_offset.is_finite() {
            return Err(GeometryError::InvalidStyle(format!(
                "foundation_offset must be finite, got {}",
                self.foundation_offset
            )));
        }
        Ok(())
    }

    fn track(&self) -> TrackConfig {
        TrackConfig {
            half_width: self.track_half_width,
            depth: self.track_depth,
        }
    }

    fn foundation(&self) -> FoundationConfig {
        FoundationConfig {
            thickness: self.foundation_thickness,
            offset: self.foundation_offset,
        }
    }
}

/// Renderable geometry for one parameter set
#[derive(Debug, Clone, Default)]
pub struct Scene {
    pub foundation: Option<Mesh>,
    pub buildings: Vec<Mesh>,
    pub track: Option<Mesh>,
}

impl Scene {
    pub fn is_empty(&self) -> bool {
        self.foundation.is_none() && self.buildings.is_empty() && self.track.is_none()
    }

    pub fn meshes(&self) -> impl Iterator<Item = &Mesh> {
        self.foundation
            .iter()
            .chain(self.buildings.iter())
            .chain(self.track.iter())
    }

    pub fn triangle_count(&self) -> usize {
        self.meshes().map(Mesh::triangle_count).sum()
    }

    /// Everything in one buffer, foundation first and track last
    pub fn combined(&self) -> Result<Mesh, GeometryError> {
        merge(self.meshes().cloned().collect())
    }
}

/// Build the full scene for a set of footprints and a track
///
/// * without `bounds` the scene is empty; nothing here guesses a window
/// * footprints that cannot be extruded are skipped without failing the scene
/// * every remaining footprint's height is resolved from its tags, and the
///   source range is computed once over them so all buildings share the same
///   mapping into `height_range`
/// * a track with fewer than two points produces no ribbon
///
/// Only contract violations (an invalid style, an index overflow while
/// merging) are returned as errors.
pub fn compose(
    footprints: &[FootprintPolygon],
    track: Option<&[GeoPoint]>,
    bounds: Option<&Bounds>,
    dims: &ModelDimensions,
    height_range: &HeightRange,
    style: &SceneStyle,
) -> Result<Scene, GeometryError> {
    style.validate()?;

    let Some(bounds) = bounds else {
        log::info!("No bounds available, composing an empty scene");
        return Ok(Scene::default());
    };

    let mut scene = Scene::default();

    // Only footprints that will become prisms take part in the height range
    let usable: Vec<&FootprintPolygon> = footprints
        .iter()
        .filter(|f| is_extrudable(f, bounds, dims))
        .collect();
    if usable.len() < footprints.len() {
        log::debug!(
            "Skipping {} footprints without a usable outline",
            footprints.len() - usable.len()
        );
    }

    let real_heights: Vec<f64> = usable.iter().map(|f| resolve_height(&f.tags)).collect();
    if let Some(source) = compute_range(&real_heights) {
        scene.buildings = usable
            .iter()
            .zip(&real_heights)
            .filter_map(|(footprint, &h)| {
                let output = map_height(h, &source, height_range);
                extrude_footprint(footprint, bounds, dims, output)
            })
            .collect();

        scene.foundation = generate_foundation(footprints, bounds, dims, &style.foundation())?;

        log::info!(
            "Extruded {}/{} buildings, real heights {:.1}..{:.1} m mapped to {:.1}..{:.1}",
            scene.buildings.len(),
            footprints.len(),
            source.min(),
            source.max(),
            height_range.min(),
            height_range.max()
        );
    }

    if let Some(points) = track {
        let projector = Projector::new(*bounds, *dims);
        scene.track = generate_track_mesh(points, &projector, &style.track());
    }

    Ok(scene)
}
