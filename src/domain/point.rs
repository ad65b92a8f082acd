/// A single recorded position in WGS84
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GeoPoint {
    pub latitude: f64,
    pub longitude: f64,
    /// Elevation in meters, when the recording carries one
    pub elevation: Option<f64>,
}

impl GeoPoint {
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
            elevation: None,
        }
    }

    pub fn with_elevation(latitude: f64, longitude: f64, elevation: f64) -> Self {
        Self {
            latitude,
            longitude,
            elevation: Some(elevation),
        }
    }

    pub fn is_finite(&self) -> bool {
        self.latitude.is_finite() && self.longitude.is_finite()
    }
}

/// An ordered GPS recording with an optional display name
#[derive(Debug, Clone, Default)]
pub struct Track {
    pub name: Option<String>,
    pub points: Vec<GeoPoint>,
}

impl Track {
    pub fn new(name: Option<String>, points: Vec<GeoPoint>) -> Self {
        Self { name, points }
    }

    pub fn point_count(&self) -> usize {
        self.points.len()
    }

    /// A ribbon needs at least one segment
    pub fn is_drawable(&self) -> bool {
        self.points.len() >= 2
    }

    pub fn has_elevation(&self) -> bool {
        self.points.iter().any(|p| p.elevation.is_some())
    }
}
