use approx::assert_relative_eq;
use std::collections::HashMap;

use trackto3d::domain::{FootprintPolygon, GeoPoint};
use trackto3d::geometry::{Bounds, ModelDimensions, Projector};
use trackto3d::gpx::read_gpx;
use trackto3d::heights::{HeightRange, compute_range, map_height, resolve_height};
use trackto3d::mesh::{Mesh, estimate_stl_size, merge, validate_and_clean, write_stl};
use trackto3d::scene::{SceneStyle, compose};
use trackto3d::svg::elevation_profile_svg;

fn unit_bounds() -> Bounds {
    Bounds::new(1.0, 0.0, 1.0, 0.0).unwrap()
}

fn square_dims() -> ModelDimensions {
    ModelDimensions::new(100.0, 100.0).unwrap()
}

fn tags(pairs: &[(&str, &str)]) -> HashMap<String, String> {
    pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
}

fn square(lat: f64, lon: f64, size: f64, tags: HashMap<String, String>) -> FootprintPolygon {
    FootprintPolygon::new(
        vec![
            GeoPoint::new(lat, lon),
            GeoPoint::new(lat, lon + size),
            GeoPoint::new(lat + size, lon + size),
            GeoPoint::new(lat + size, lon),
            GeoPoint::new(lat, lon),
        ],
        tags,
    )
}

fn max_y(mesh: &Mesh) -> f32 {
    mesh.vertices().iter().map(|v| v[1]).fold(f32::MIN, f32::max)
}

#[test]
fn center_and_corners_project_to_model_extremes() {
    let projector = Projector::new(unit_bounds(), square_dims());

    let center = projector.project(&GeoPoint::new(0.5, 0.5));
    assert_relative_eq!(center.x, 0.0);
    assert_relative_eq!(center.z, 0.0);

    let northwest = projector.project(&GeoPoint::new(1.0, 0.0));
    let southeast = projector.project(&GeoPoint::new(0.0, 1.0));
    assert_relative_eq!(northwest.x, -50.0);
    assert_relative_eq!(northwest.z, -50.0);
    assert_relative_eq!(southeast.x, 50.0);
    assert_relative_eq!(southeast.z, 50.0);
}

#[test]
fn resolver_rules_in_order() {
    assert_eq!(
        resolve_height(&tags(&[("height", "15"), ("building:levels", "9"), ("building", "office")])),
        15.0
    );
    assert_eq!(resolve_height(&tags(&[("building:levels", "3")])), 9.0);
    assert_eq!(resolve_height(&tags(&[("building", "office")])), 20.0);
    assert_eq!(resolve_height(&HashMap::new()), 6.0);
    assert_eq!(resolve_height(&tags(&[("height", "tall"), ("building", "church")])), 15.0);
}

#[test]
fn repeated_height_gets_a_real_range() {
    let range = compute_range(&[7.0, 7.0, 7.0]).unwrap();
    assert!(range.min() < 7.0 && 7.0 < range.max());
}

#[test]
fn height_mapping_is_monotonic() {
    let source = compute_range(&[2.0, 50.0]).unwrap();
    let target = HeightRange::new(5.0, 30.0).unwrap();
    let mut previous = f64::MIN;
    for h in [2.0, 3.5, 10.0, 10.0, 33.3, 50.0] {
        let mapped = map_height(h, &source, &target);
        assert!(mapped >= previous);
        previous = mapped;
    }
}

#[test]
fn merge_counts_add_up() {
    let a = square(0.1, 0.1, 0.1, tags(&[("building", "yes")]));
    let b = square(0.5, 0.5, 0.2, tags(&[("building", "yes")]));
    let scene = compose(
        &[a, b],
        None,
        Some(&unit_bounds()),
        &square_dims(),
        &HeightRange::new(5.0, 30.0).unwrap(),
        &SceneStyle::default(),
    )
    .unwrap();
    let [m1, m2] = [scene.buildings[0].clone(), scene.buildings[1].clone()];

    assert!(merge(Vec::new()).unwrap().is_empty());

    let single = merge(vec![m1.clone()]).unwrap();
    assert_eq!(single.vertex_count(), m1.vertex_count());
    assert_eq!(single.indices().len(), m1.indices().len());

    let total = m1.vertex_count() + m2.vertex_count();
    let merged = merge(vec![m1, m2]).unwrap();
    assert_eq!(merged.vertex_count(), total);
    assert!(merged.indices().iter().all(|&i| (i as usize) < total));
}

#[test]
fn track_stays_inside_model() {
    // (lon, lat) = (0.5, 0.5) -> (0.5, 1.0)
    let track = [GeoPoint::new(0.5, 0.5), GeoPoint::new(1.0, 0.5)];
    let scene = compose(
        &[],
        Some(&track[..]),
        Some(&unit_bounds()),
        &square_dims(),
        &HeightRange::new(5.0, 30.0).unwrap(),
        &SceneStyle::default(),
    )
    .unwrap();

    let mesh = scene.track.expect("track mesh");
    assert!(!mesh.is_empty());
    for v in mesh.vertices() {
        assert!((-50.0..=50.0).contains(&v[2]), "z out of range: {}", v[2]);
    }
}

#[test]
fn shared_height_mapping_across_buildings() {
    let footprints = [
        square(0.1, 0.1, 0.05, tags(&[("building", "shed"), ("height", "4")])),
        square(0.4, 0.4, 0.05, tags(&[("building", "tower"), ("height", "40")])),
        square(0.7, 0.7, 0.05, tags(&[("building", "shed"), ("height", "4")])),
    ];
    let scene = compose(
        &footprints,
        None,
        Some(&unit_bounds()),
        &square_dims(),
        &HeightRange::new(5.0, 30.0).unwrap(),
        &SceneStyle::default(),
    )
    .unwrap();

    let tops: Vec<f32> = scene.buildings.iter().map(max_y).collect();
    assert_eq!(tops.len(), 3);
    assert_eq!(tops[0], tops[2]);
    assert!(tops[0] < tops[1]);
    assert_eq!(tops[1], 30.0);
}

#[test]
fn gpx_to_stl() {
    let dir = tempfile::tempdir().unwrap();
    let gpx_path = dir.path().join("loop.gpx");
    std::fs::write(
        &gpx_path,
        r#"<?xml version="1.0"?>
<gpx version="1.1" xmlns="http://www.topografix.com/GPX/1/1">
  <trk><name>Park loop</name><trkseg>
    <trkpt lat="52.5200" lon="13.4040"><ele>34</ele></trkpt>
    <trkpt lat="52.5210" lon="13.4055"><ele>36</ele></trkpt>
    <trkpt lat="52.5222" lon="13.4049"><ele>41</ele></trkpt>
    <trkpt lat="52.5215" lon="13.4030"><ele>38</ele></trkpt>
  </trkseg></trk>
</gpx>"#,
    )
    .unwrap();

    let track = read_gpx(&gpx_path).unwrap();
    assert_eq!(track.name.as_deref(), Some("Park loop"));
    assert!(elevation_profile_svg(&track.points, "Park loop").is_some());

    let bounds = Bounds::around_points(&track.points, 0.1).unwrap();
    let dims = ModelDimensions::fit_to_bounds(&bounds, 150.0).unwrap();
    let footprint = square(
        52.5205,
        13.4045,
        0.0003,
        tags(&[("building", "apartments")]),
    );
    let scene = compose(
        &[footprint],
        Some(track.points.as_slice()),
        Some(&bounds),
        &dims,
        &HeightRange::new(5.0, 30.0).unwrap(),
        &SceneStyle::default(),
    )
    .unwrap();
    assert!(scene.foundation.is_some());
    assert_eq!(scene.buildings.len(), 1);
    assert!(scene.track.is_some());

    let (mesh, report) = validate_and_clean(scene.combined().unwrap());
    assert!(report.is_valid());

    let stl_path = dir.path().join("loop.stl");
    write_stl(&stl_path, &mesh).unwrap();
    let written = std::fs::metadata(&stl_path).unwrap().len() as usize;
    assert_eq!(written, estimate_stl_size(mesh.triangle_count()));
}
