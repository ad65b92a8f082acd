pub mod files;
pub mod parser;

pub use files::collect_gpx_inputs;
pub use parser::{GpxError, parse_gpx, read_gpx};
