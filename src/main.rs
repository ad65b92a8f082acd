use anyhow::{Context, Result, bail};
use clap::Parser;
use indicatif::{ProgressBar, ProgressStyle};
use std::path::{Path, PathBuf};
use std::time::Instant;

use trackto3d::api::fetch_buildings;
use trackto3d::config::{FileConfig, OverpassConfig};
use trackto3d::domain::{FootprintPolygon, Track};
use trackto3d::geometry::{Bounds, ModelDimensions, reduction_percent, simplify_polyline};
use trackto3d::gpx::{collect_gpx_inputs, read_gpx};
use trackto3d::heights::HeightRange;
use trackto3d::mesh::{estimate_stl_size, validate_and_clean, write_stl};
use trackto3d::osm::parse_buildings;
use trackto3d::scene::{SceneStyle, compose};
use trackto3d::svg::{
    PathVariant, direct_path, elevation_profile_svg, plan_view_points, smoothed_path, track_svg,
};

/// Turn a GPX track into SVG plans, an elevation chart and a printable STL model
///
/// Examples:
///   # Plans, elevation chart and a track-only model
///   trackto3d ride.gpx
///
///   # Every GPX file in a directory
///   trackto3d tracks/
///
///   # Include the buildings around the track, 150mm model
///   trackto3d ride.gpx --buildings --size 150
///
///   # Use a config file
///   trackto3d ride.gpx --config my-settings.toml
#[derive(Parser, Debug)]
#[command(name = "trackto3d")]
#[command(version, about, long_about = None)]
struct Args {
    /// GPX files with a track or route, or directories containing them
    #[arg(required = true, num_args = 1..)]
    inputs: Vec<PathBuf>,

    /// Path to config file (optional, auto-searches trackto3d.toml if not provided)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Output directory; files go to <output>/<track name>/
    #[arg(short = 'o', long)]
    output: Option<PathBuf>,

    /// Model size in mm along the longer side
    #[arg(short = 's', long)]
    size: Option<f64>,

    /// Full width of the track ribbon in mm
    #[arg(long)]
    track_width: Option<f64>,

    /// Height of the track ribbon in mm
    #[arg(long)]
    track_depth: Option<f64>,

    /// Model height of the lowest building in mm
    #[arg(long)]
    min_height: Option<f64>,

    /// Model height of the tallest building in mm
    #[arg(long)]
    max_height: Option<f64>,

    /// Thickness of the slabs under buildings in mm
    #[arg(long)]
    foundation_thickness: Option<f64>,

    /// Simplification tolerance for the optimized SVG path, in canvas units
    #[arg(long)]
    simplify_epsilon: Option<f64>,

    /// Margin around the track as a fraction of its extent
    #[arg(long)]
    padding: Option<f64>,

    /// Fetch building footprints around the track from OpenStreetMap
    #[arg(long)]
    buildings: bool,

    /// Enable verbose logging
    #[arg(short = 'v', long)]
    verbose: bool,
}

/// Effective settings after merging CLI flags over the config file
struct Settings {
    output_dir: PathBuf,
    size: f64,
    min_height: f64,
    max_height: f64,
    simplify_epsilon: f64,
    padding: f64,
    buildings: bool,
    style: SceneStyle,
}

impl Settings {
    fn merge(args: &Args, file: FileConfig) -> Self {
        let track_width = args.track_width.unwrap_or(file.track_width);
        Self {
            output_dir: args.output.clone().unwrap_or(file.output_dir),
            size: args.size.unwrap_or(file.size),
            min_height: args.min_height.unwrap_or(file.min_height),
            max_height: args.max_height.unwrap_or(file.max_height),
            simplify_epsilon: args.simplify_epsilon.unwrap_or(file.simplify_epsilon),
            padding: args.padding.unwrap_or(file.padding),
            buildings: args.buildings || file.buildings,
            style: SceneStyle {
                track_half_width: track_width / 2.0,
                track_depth: args.track_depth.unwrap_or(file.track_depth),
                foundation_thickness: args
                    .foundation_thickness
                    .unwrap_or(file.foundation_thickness),
                foundation_offset: file.foundation_offset,
            },
        }
    }
}

fn main() -> Result<()> {
    let args = Args::parse();
    let total_start = Instant::now();

    let file_config = match args.config {
        Some(ref path) => {
            if !path.exists() {
                bail!("Config file not found: {}", path.display());
            }
            Some(FileConfig::read(path)?)
        }
        None => None,
    };
    let verbose = args.verbose || file_config.as_ref().is_some_and(|c| c.verbose);
    init_logging(verbose);

    // Search the default locations only after logging is up
    let file_config = file_config.or_else(FileConfig::load).unwrap_or_default();
    let overpass_config = file_config.overpass.clone().unwrap_or_default();
    let settings = Settings::merge(&args, file_config);

    println!("trackto3d - GPS Track Model Generator");
    println!("=====================================");
    println!();

    let files = collect_gpx_inputs(&args.inputs)?;
    if files.is_empty() {
        bail!("No GPX files to process");
    }

    let failed = process_all(&files, |path| process_file(path, &settings, &overpass_config));

    println!();
    println!(
        "Done! {}/{} tracks converted. Total time: {:.1}s",
        files.len() - failed,
        files.len(),
        total_start.elapsed().as_secs_f32()
    );

    if failed == files.len() {
        bail!("All {} tracks failed", failed);
    }
    Ok(())
}

/// Run `process` on every file; a failure is logged and the rest still run
///
/// Returns the number of failed files.
fn process_all(files: &[PathBuf], mut process: impl FnMut(&Path) -> Result<()>) -> usize {
    let mut failed = 0;
    for path in files {
        if let Err(e) = process(path) {
            log::warn!("Skipping {}: {e:#}", path.display());
            failed += 1;
        }
    }
    failed
}

/// Full pipeline for one GPX file
fn process_file(input: &Path, settings: &Settings, overpass_config: &OverpassConfig) -> Result<()> {
    println!("{}", input.display());

    let spinner = create_spinner("Reading GPX track...");
    let track = read_gpx(input)?;
    if !track.is_drawable() {
        spinner.finish_and_clear();
        bail!(
            "Track in {} needs at least 2 points, found {}",
            input.display(),
            track.point_count()
        );
    }
    spinner.finish_with_message(format!(
        "Read {} points{}",
        track.point_count(),
        if track.has_elevation() { " with elevation" } else { "" }
    ));

    let stem = output_stem(input, &track);
    let out_dir = settings.output_dir.join(&stem);
    std::fs::create_dir_all(&out_dir)
        .with_context(|| format!("Failed to create output directory: {}", out_dir.display()))?;

    write_svgs(&track, &stem, &out_dir, settings.simplify_epsilon)?;

    let bounds = Bounds::around_points(&track.points, settings.padding)
        .context("Track has no usable coordinates")?;
    let dims = ModelDimensions::fit_to_bounds(&bounds, settings.size)?;
    log::info!(
        "Model area: ({:.5}, {:.5}) to ({:.5}, {:.5}) -> {:.1}mm x {:.1}mm",
        bounds.south(),
        bounds.west(),
        bounds.north(),
        bounds.east(),
        dims.width(),
        dims.depth()
    );

    let footprints = if settings.buildings {
        fetch_footprints(&bounds, overpass_config)
    } else {
        Vec::new()
    };

    let spinner = create_spinner("Generating meshes...");
    let start = Instant::now();
    let height_range = HeightRange::new(settings.min_height, settings.max_height)?;
    let scene = compose(
        &footprints,
        Some(track.points.as_slice()),
        Some(&bounds),
        &dims,
        &height_range,
        &settings.style,
    )?;
    spinner.finish_with_message(format!(
        "Generated {} buildings, {} triangles [{:.1}s]",
        scene.buildings.len(),
        scene.triangle_count(),
        start.elapsed().as_secs_f32()
    ));

    let spinner = create_spinner("Validating and writing STL file...");
    let start = Instant::now();
    let (mesh, report) = validate_and_clean(scene.combined()?);
    if report.has_issues() {
        log::warn!("{}", report.summary());
    }

    let stl_path = out_dir.join(format!("{stem}.stl"));
    write_stl(&stl_path, &mesh).context("Failed to write STL file")?;
    spinner.finish_with_message(format!(
        "Wrote {} triangles ({:.1} KB) [{:.1}s]",
        mesh.triangle_count(),
        estimate_stl_size(mesh.triangle_count()) as f64 / 1024.0,
        start.elapsed().as_secs_f32()
    ));
    println!("Output: {}", out_dir.display());

    Ok(())
}

fn init_logging(verbose: bool) {
    let level = if verbose {
        log::LevelFilter::Debug
    } else {
        log::LevelFilter::Info
    };
    env_logger::Builder::from_default_env()
        .filter_level(level)
        .format_timestamp(None)
        .init();
}

/// File-name stem for outputs: the input file's stem, else the track name
fn output_stem(input: &Path, track: &Track) -> String {
    input
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .or_else(|| track.name.clone())
        .unwrap_or_else(|| "track".to_string())
}

fn write_svgs(track: &Track, stem: &str, out_dir: &Path, epsilon: f64) -> Result<()> {
    let spinner = create_spinner("Writing SVG plans...");
    let title = track.name.as_deref().unwrap_or(stem);

    let points = plan_view_points(&track.points);
    let direct = track_svg(&direct_path(&points), title, PathVariant::Direct);
    write_text(&out_dir.join(format!("{stem}_direct.svg")), &direct)?;

    let simplified = simplify_polyline(&points, epsilon);
    let optimized = track_svg(&smoothed_path(&simplified), title, PathVariant::Optimized);
    write_text(&out_dir.join(format!("{stem}_optimized.svg")), &optimized)?;

    spinner.finish_with_message(format!(
        "Wrote SVG plans: {} -> {} points ({:.1}% reduction)",
        points.len(),
        simplified.len(),
        reduction_percent(points.len(), simplified.len())
    ));

    match elevation_profile_svg(&track.points, title) {
        Some(svg) => {
            let path = out_dir.join(format!("{stem}_elevation.svg"));
            write_text(&path, &svg)?;
            log::info!("Wrote elevation profile to {}", path.display());
        }
        None => log::info!("Track has no elevation data, skipping elevation profile"),
    }

    Ok(())
}

fn write_text(path: &Path, contents: &str) -> Result<()> {
    std::fs::write(path, contents).with_context(|| format!("Failed to write {}", path.display()))
}

/// Buildings inside the bounds; a failed fetch leaves the model track-only
fn fetch_footprints(bounds: &Bounds, config: &OverpassConfig) -> Vec<FootprintPolygon> {
    let spinner = create_spinner("Fetching buildings from OpenStreetMap...");
    let start = Instant::now();
    match fetch_buildings(bounds, config) {
        Ok(response) => {
            let footprints = parse_buildings(&response);
            spinner.finish_with_message(format!(
                "Fetched {} building footprints [{:.1}s]",
                footprints.len(),
                start.elapsed().as_secs_f32()
            ));
            footprints
        }
        Err(e) => {
            spinner.finish_and_clear();
            log::warn!("Could not fetch buildings, continuing without them: {e:#}");
            Vec::new()
        }
    }
}

fn create_spinner(message: &str) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    if let Ok(style) = ProgressStyle::with_template("{spinner:.green} {msg}") {
        pb.set_style(style.tick_strings(&["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"]));
    }
    pb.set_message(message.to_string());
    pb.enable_steady_tick(std::time::Duration::from_millis(80));
    pb
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_failure_does_not_stop_batch() {
        let files: Vec<PathBuf> = ["a.gpx", "broken.gpx", "c.gpx"]
            .iter()
            .map(PathBuf::from)
            .collect();
        let mut seen = Vec::new();

        let failed = process_all(&files, |path| {
            seen.push(path.to_path_buf());
            if path.ends_with("broken.gpx") {
                bail!("unreadable");
            }
            Ok(())
        });

        assert_eq!(failed, 1);
        assert_eq!(seen, files);
    }
}
