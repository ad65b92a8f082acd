use std::collections::HashMap;

use super::GeoPoint;

/// A building ground plan with its OSM tags
#[derive(Debug, Clone, Default)]
pub struct FootprintPolygon {
    /// Outline as fetched; may or may not repeat the first vertex at the end
    pub outline: Vec<GeoPoint>,
    pub tags: HashMap<String, String>,
}

impl FootprintPolygon {
    pub fn new(outline: Vec<GeoPoint>, tags: HashMap<String, String>) -> Self {
        Self { outline, tags }
    }

    /// Vertices that can be projected, without the explicit closing vertex
    pub fn usable_vertices(&self) -> Vec<GeoPoint> {
        let mut vertices: Vec<GeoPoint> =
            self.outline.iter().copied().filter(GeoPoint::is_finite).collect();

        if vertices.len() > 1 {
            let first = vertices[0];
            let last = vertices[vertices.len() - 1];
            if first.latitude == last.latitude && first.longitude == last.longitude {
                vertices.pop();
            }
        }

        vertices
    }

    pub fn is_valid(&self) -> bool {
        self.usable_vertices().len() >= 3
    }
}
