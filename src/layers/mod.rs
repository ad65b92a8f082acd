pub mod buildings;
pub mod foundation;
pub mod track;

pub use buildings::{extrude_footprint, extrude_footprint_between, is_extrudable};
pub use foundation::{FoundationConfig, generate_foundation};
pub use track::{TrackConfig, generate_track_mesh};
