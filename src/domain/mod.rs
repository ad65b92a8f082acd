pub mod footprint;
pub mod point;

pub use footprint::FootprintPolygon;
pub use point::{GeoPoint, Track};
