pub mod overpass;

pub use overpass::{OverpassResponse, building_query, fetch_buildings};
