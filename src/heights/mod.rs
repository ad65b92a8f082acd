pub mod mapper;
pub mod resolver;

pub use mapper::{HeightRange, compute_range, map_height};
pub use resolver::{DEFAULT_HEIGHT_M, METERS_PER_LEVEL, category_height, resolve_height};
