use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Default geometry settings, in model units (millimeters for print export).
///
/// The foundation sits just under the floor so its top never coincides with
/// building or track bottoms:
///   Foundation: -1.2mm -> -0.2mm
///   Buildings:   0.0mm -> 5..30mm (mapped from real heights)
///   Track:       0.0mm -> 3.0mm
pub mod defaults {
    pub const MODEL_SIZE: f64 = 200.0;

    pub const TRACK_HALF_WIDTH: f64 = 1.0;
    pub const TRACK_DEPTH: f64 = 3.0;

    pub const BUILDING_MIN_HEIGHT: f64 = 5.0;
    pub const BUILDING_MAX_HEIGHT: f64 = 30.0;

    pub const FOUNDATION_THICKNESS: f64 = 1.0;
    pub const FOUNDATION_OFFSET: f64 = -0.2;

    /// Douglas-Peucker tolerance in SVG canvas units
    pub const SIMPLIFY_EPSILON: f64 = 2.0;

    /// Fraction of the track extent added around it when deriving bounds
    pub const BOUNDS_PADDING: f64 = 0.1;
}

fn default_output_dir() -> PathBuf {
    PathBuf::from("output")
}
fn default_size() -> f64 {
    defaults::MODEL_SIZE
}
fn default_track_width() -> f64 {
    defaults::TRACK_HALF_WIDTH * 2.0
}
fn default_track_depth() -> f64 {
    defaults::TRACK_DEPTH
}
fn default_min_height() -> f64 {
    defaults::BUILDING_MIN_HEIGHT
}
fn default_max_height() -> f64 {
    defaults::BUILDING_MAX_HEIGHT
}
fn default_foundation_thickness() -> f64 {
    defaults::FOUNDATION_THICKNESS
}
fn default_foundation_offset() -> f64 {
    defaults::FOUNDATION_OFFSET
}
fn default_simplify_epsilon() -> f64 {
    defaults::SIMPLIFY_EPSILON
}
fn default_padding() -> f64 {
    defaults::BOUNDS_PADDING
}

#[derive(Debug, Deserialize)]
pub struct FileConfig {
    #[serde(default = "default_output_dir")]
    pub output_dir: PathBuf,
    #[serde(default = "default_size")]
    pub size: f64,
    /// Full ribbon width
    #[serde(default = "default_track_width")]
    pub track_width: f64,
    #[serde(default = "default_track_depth")]
    pub track_depth: f64,
    #[serde(default = "default_min_height")]
    pub min_height: f64,
    #[serde(default = "default_max_height")]
    pub max_height: f64,
    #[serde(default = "default_foundation_thickness")]
    pub foundation_thickness: f64,
    #[serde(default = "default_foundation_offset")]
    pub foundation_offset: f64,
    #[serde(default = "default_simplify_epsilon")]
    pub simplify_epsilon: f64,
    #[serde(default = "default_padding")]
    pub padding: f64,
    #[serde(default)]
    pub buildings: bool,
    #[serde(default)]
    pub verbose: bool,
    #[serde(default)]
    pub overpass: Option<OverpassConfig>,
}

impl Default for FileConfig {
    fn default() -> Self {
        Self {
            output_dir: default_output_dir(),
            size: default_size(),
            track_width: default_track_width(),
            track_depth: default_track_depth(),
            min_height: default_min_height(),
            max_height: default_max_height(),
            foundation_thickness: default_foundation_thickness(),
            foundation_offset: default_foundation_offset(),
            simplify_epsilon: default_simplify_epsilon(),
            padding: default_padding(),
            buildings: false,
            verbose: false,
            overpass: None,
        }
    }
}

fn default_overpass_url() -> String {
    "https://overpass-api.de/api/interpreter".to_string()
}

fn default_timeout_secs() -> u64 {
    120
}

#[derive(Debug, Deserialize, Clone)]
pub struct OverpassConfig {
    #[serde(default = "default_overpass_url")]
    pub url: String,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for OverpassConfig {
    fn default() -> Self {
        Self {
            url: default_overpass_url(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl FileConfig {
    /// Parse a config file's contents
    pub fn from_toml(contents: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(contents)
    }

    /// Read an explicitly requested config file
    pub fn read(path: &Path) -> anyhow::Result<Self> {
        use anyhow::Context;

        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        Self::from_toml(&contents)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))
    }

    /// First parseable config file from the search path, if any
    pub fn load() -> Option<Self> {
        for path in get_config_paths() {
            if path.exists()
                && let Ok(contents) = std::fs::read_to_string(&path)
            {
                match Self::from_toml(&contents) {
                    Ok(config) => {
                        log::info!("Loaded config from {}", path.display());
                        return Some(config);
                    }
                    Err(e) => {
                        log::warn!("Failed to parse config file {}: {}", path.display(), e);
                    }
                }
            }
        }
        None
    }
}

fn get_config_paths() -> Vec<PathBuf> {
    let mut paths = vec![
        PathBuf::from("trackto3d.toml"),
        PathBuf::from(".trackto3d.toml"),
    ];

    if let Some(config_dir) = dirs::config_dir() {
        paths.push(config_dir.join("trackto3d").join("config.toml"));
        paths.push(config_dir.join("trackto3d.toml"));
    }

    if let Some(home) = dirs::home_dir() {
        paths.push(home.join(".trackto3d.toml"));
    }

    paths
}
