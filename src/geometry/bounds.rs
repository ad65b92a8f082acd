use crate::domain::GeoPoint;
use crate::error::GeometryError;

/// Smallest span in degrees a derived bounding box may have on either axis
const MIN_SPAN_DEGREES: f64 = 1e-4;

/// Geographic projection window shared by everything in one scene
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    north: f64,
    south: f64,
    east: f64,
    west: f64,
}

impl Bounds {
    /// Create bounds, rejecting zero-area or inverted boxes
    pub fn new(north: f64, south: f64, east: f64, west: f64) -> Result<Self, GeometryError> {
        let finite = [north, south, east, west].iter().all(|v| v.is_finite());
        if !finite || north <= south || east <= west {
            return Err(GeometryError::DegenerateBounds {
                north,
                south,
                east,
                west,
            });
        }

        Ok(Self {
            north,
            south,
            east,
            west,
        })
    }

    /// Bounding box of a point set, padded on every side by `padding` times its span
    ///
    /// Points without finite coordinates are ignored. A set with no extent
    /// (a single point, or a perfectly straight meridian) is widened to a
    /// minimum span so the result is always usable for projection.
    pub fn around_points(points: &[GeoPoint], padding: f64) -> Option<Self> {
        let mut finite = points.iter().filter(|p| p.is_finite());
        let first = finite.next()?;

        let mut north = first.latitude;
        let mut south = first.latitude;
        let mut east = first.longitude;
        let mut west = first.longitude;

        for p in finite {
            north = north.max(p.latitude);
            south = south.min(p.latitude);
            east = east.max(p.longitude);
            west = west.min(p.longitude);
        }

        let padding = if padding.is_finite() { padding.max(0.0) } else { 0.0 };
        let lat_pad = ((north - south) * padding).max(MIN_SPAN_DEGREES / 2.0);
        let lon_pad = ((east - west) * padding).max(MIN_SPAN_DEGREES / 2.0);

        Some(Self {
            north: north + lat_pad,
            south: south - lat_pad,
            east: east + lon_pad,
            west: west - lon_pad,
        })
    }

    pub fn north(&self) -> f64 {
        self.north
    }

    pub fn south(&self) -> f64 {
        self.south
    }

    pub fn east(&self) -> f64 {
        self.east
    }

    pub fn west(&self) -> f64 {
        self.west
    }

    pub fn lat_span(&self) -> f64 {
        self.north - self.south
    }

    pub fn lon_span(&self) -> f64 {
        self.east - self.west
    }

    pub fn center(&self) -> GeoPoint {
        GeoPoint::new(
            (self.north + self.south) / 2.0,
            (self.east + self.west) / 2.0,
        )
    }

    pub fn contains(&self, point: &GeoPoint) -> bool {
        (self.south..=self.north).contains(&point.latitude)
            && (self.west..=self.east).contains(&point.longitude)
    }
}

/// Output scene extents in model units (millimeters for print export)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ModelDimensions {
    width: f64,
    depth: f64,
}

impl ModelDimensions {
    pub fn new(width: f64, depth: f64) -> Result<Self, GeometryError> {
        if !(width.is_finite() && depth.is_finite() && width > 0.0 && depth > 0.0) {
            return Err(GeometryError::InvalidDimensions { width, depth });
        }
        Ok(Self { width, depth })
    }

    /// Dimensions whose larger side is `size` and whose aspect follows the
    /// ground extent of `bounds`
    ///
    /// Longitude degrees shrink by cos(latitude), so the east-west span is
    /// measured at the middle latitude of the box.
    pub fn fit_to_bounds(bounds: &Bounds, size: f64) -> Result<Self, GeometryError> {
        let cos_lat = bounds.center().latitude.to_radians().cos();
        let ground_width = bounds.lon_span() * cos_lat;
        let ground_depth = bounds.lat_span();

        if ground_width >= ground_depth {
            Self::new(size, size * ground_depth / ground_width)
        } else {
            Self::new(size * ground_width / ground_depth, size)
        }
    }

    pub fn width(&self) -> f64 {
        self.width
    }

    pub fn depth(&self) -> f64 {
        self.depth
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_degenerate_bounds_rejected() {
        assert!(Bounds::new(1.0, 1.0, 1.0, 0.0).is_err());
        assert!(Bounds::new(1.0, 0.0, 0.0, 0.0).is_err());
        assert!(Bounds::new(0.0, 1.0, 1.0, 0.0).is_err());
        assert!(Bounds::new(f64::NAN, 0.0, 1.0, 0.0).is_err());
        assert!(Bounds::new(1.0, 0.0, 1.0, 0.0).is_ok());
    }

    #[test]
    fn test_around_points_padding() {
        let points = vec![
            GeoPoint::new(10.0, 20.0),
            GeoPoint::new(12.0, 24.0),
            GeoPoint::new(11.0, 22.0),
        ];
        let bounds = Bounds::around_points(&points, 0.1).unwrap();

        assert_relative_eq!(bounds.north(), 12.2);
        assert_relative_eq!(bounds.south(), 9.8);
        assert_relative_eq!(bounds.east(), 24.4);
        assert_relative_eq!(bounds.west(), 19.6);
    }

    #[test]
    fn test_around_single_point_not_degenerate() {
        let bounds = Bounds::around_points(&[GeoPoint::new(48.0, 11.0)], 0.1).unwrap();
        assert!(bounds.lat_span() > 0.0);
        assert!(bounds.lon_span() > 0.0);
        assert!(bounds.contains(&GeoPoint::new(48.0, 11.0)));
    }

    #[test]
    fn test_around_no_points() {
        assert!(Bounds::around_points(&[], 0.1).is_none());
        assert!(Bounds::around_points(&[GeoPoint::new(f64::NAN, 1.0)], 0.1).is_none());
    }

    #[test]
    fn test_dimensions_must_be_positive() {
        assert!(ModelDimensions::new(0.0, 10.0).is_err());
        assert!(ModelDimensions::new(10.0, -1.0).is_err());
        assert!(ModelDimensions::new(f64::INFINITY, 1.0).is_err());
        assert!(ModelDimensions::new(100.0, 50.0).is_ok());
    }

    #[test]
    fn test_fit_to_bounds_at_equator() {
        // Twice as wide as deep on the ground
        let bounds = Bounds::new(1.0, 0.0, 2.0, 0.0).unwrap();
        let dims = ModelDimensions::fit_to_bounds(&bounds, 200.0).unwrap();
        assert_relative_eq!(dims.width(), 200.0);
        assert_relative_eq!(dims.depth(), 100.0, epsilon = 0.1);
    }

    #[test]
    fn test_fit_to_bounds_high_latitude() {
        // At 60 degrees north a degree of longitude is half a degree of latitude
        let bounds = Bounds::new(60.01, 59.99, 0.02, -0.02).unwrap();
        let dims = ModelDimensions::fit_to_bounds(&bounds, 100.0).unwrap();
        assert_relative_eq!(dims.width(), 100.0, epsilon = 0.01);
        assert_relative_eq!(dims.depth(), 100.0, epsilon = 0.01);
    }
}
