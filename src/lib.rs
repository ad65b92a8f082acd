//! trackto3d - Turn a GPS track and surrounding buildings into a printable 3D model

pub mod api;
pub mod config;
pub mod domain;
pub mod error;
pub mod geometry;
pub mod gpx;
pub mod heights;
pub mod layers;
pub mod mesh;
pub mod osm;
pub mod scene;
pub mod svg;
