pub mod bounds;
pub mod projection;
pub mod simplify;

pub use bounds::{Bounds, ModelDimensions};
pub use projection::{ProjectedPoint, Projector, project};
pub use simplify::{reduction_percent, simplify_polyline};
