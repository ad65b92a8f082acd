use super::buildings::extrude_footprint_between;
use crate::domain::FootprintPolygon;
use crate::error::GeometryError;
use crate::geometry::{Bounds, ModelDimensions};
use crate::mesh::{Mesh, merge};

/// Placement of the slab layer that sits under the buildings
#[derive(Debug, Clone, Copy)]
pub struct FoundationConfig {
    /// Slab thickness in model units
    pub thickness: f64,
    /// Level of the slab top, at or just below the scene floor
    pub offset: f64,
}

/// Merge a thin slab under every footprint into one ground-plane mesh
///
/// Slabs span `offset - thickness ..= offset`. Footprints that cannot be
/// extruded are skipped. Returns `None` when no slab was produced.
pub fn generate_foundation(
    footprints: &[FootprintPolygon],
    bounds: &Bounds,
    dims: &ModelDimensions,
    config: &FoundationConfig,
) -> Result<Option<Mesh>, GeometryError> {
    let top = config.offset;
    let bottom = config.offset - config.thickness;

    let slabs: Vec<Mesh> = footprints
        .iter()
        .filter_map(|f| extrude_footprint_between(f, bounds, dims, bottom, top))
        .collect();

    if slabs.is_empty() {
        return Ok(None);
    }

    merge(slabs).map(Some)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::GeoPoint;
    use std::collections::HashMap;

    #[test]
    fn test_foundation_merges_slabs() {
        let bounds = Bounds::new(1.0, 0.0, 1.0, 0.0).unwrap();
        let dims = ModelDimensions::new(100.0, 100.0).unwrap();
        let square = |o: f64| {
            FootprintPolygon::new(
                vec![
                    GeoPoint::new(o, o),
                    GeoPoint::new(o, o + 0.1),
                    GeoPoint::new(o + 0.1, o + 0.1),
                    GeoPoint::new(o + 0.1, o),
                ],
                HashMap::new(),
            )
        };
        let broken = FootprintPolygon::new(vec![GeoPoint::new(0.5, 0.5)], HashMap::new());

        let config = FoundationConfig {
            thickness: 1.0,
            offset: -0.2,
        };
        let mesh = generate_foundation(&[square(0.1), broken, square(0.6)], &bounds, &dims, &config)
            .unwrap()
            .unwrap();

        assert_eq!(mesh.vertex_count(), 16);
        for v in mesh.vertices() {
            assert!(v[1] <= -0.2 + 1e-6);
            assert!(v[1] >= -1.2 - 1e-6);
        }
    }

    #[test]
    fn test_foundation_empty() {
        let bounds = Bounds::new(1.0, 0.0, 1.0, 0.0).unwrap();
        let dims = ModelDimensions::new(100.0, 100.0).unwrap();
        let config = FoundationConfig {
            thickness: 1.0,
            offset: -0.2,
        };
        assert!(generate_foundation(&[], &bounds, &dims, &config).unwrap().is_none());
    }
}
