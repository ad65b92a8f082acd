pub mod builder;
pub mod extrusion;
pub mod merge;
pub mod ribbon;
pub mod stl;
pub mod triangulation;
pub mod validation;

pub use builder::{Mesh, MeshBuilder};
pub use extrusion::{extrude_polygon, extrude_prism};
pub use merge::merge;
pub use ribbon::{extrude_track, ribbon_outline};
pub use stl::{estimate_stl_size, write_stl};
pub use triangulation::triangulate_outline;
pub use validation::{ValidationReport, validate_and_clean};
