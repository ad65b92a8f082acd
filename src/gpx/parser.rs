use anyhow::{Context, Result};
use quick_xml::Reader;
use quick_xml::events::{BytesStart, Event};
use std::path::Path;
use thiserror::Error;

use crate::domain::{GeoPoint, Track};

#[derive(Debug, Error)]
pub enum GpxError {
    #[error("malformed GPX document: {0}")]
    Xml(#[from] quick_xml::Error),

    #[error("point {index} has a missing or invalid `{attribute}` attribute")]
    InvalidCoordinate {
        index: usize,
        attribute: &'static str,
    },
}

/// Read and parse a GPX file
pub fn read_gpx(path: &Path) -> Result<Track> {
    let contents = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read GPX file: {}", path.display()))?;
    parse_gpx(&contents).with_context(|| format!("Failed to parse GPX file: {}", path.display()))
}

/// Parse GPX text into a track
///
/// # Algorithm
/// 1. Stream the document, tracking the path of open element local names
///    (so GPX 1.0, 1.1 and un-namespaced files all match)
/// 2. Every `trkpt`/`rtept` opens a point from its `lat`/`lon` attributes
/// 3. An `ele` child inside a point sets its elevation; unparseable text is ignored
/// 4. The first `name` directly under `trk`, `rte` or `metadata` becomes the track name
pub fn parse_gpx(xml: &str) -> Result<Track, GpxError> {
    let mut reader = Reader::from_str(xml);
    reader.trim_text(true);

    let mut path: Vec<String> = Vec::new();
    let mut name: Option<String> = None;
    let mut points: Vec<GeoPoint> = Vec::new();
    let mut current: Option<GeoPoint> = None;

    loop {
        match reader.read_event()? {
            Event::Start(start) => {
                let local = local_name(&start);
                if is_point_element(&local) {
                    current = Some(read_point(&start, points.len())?);
                }
                path.push(local);
            }
            Event::Empty(start) => {
                if is_point_element(&local_name(&start)) {
                    points.push(read_point(&start, points.len())?);
                }
            }
            Event::Text(text) => {
                let value = text.unescape()?;
                let value = value.trim();
                match path.last().map(String::as_str) {
                    Some("ele") => {
                        if let Some(point) = current.as_mut() {
                            point.elevation = value.parse::<f64>().ok().filter(|e| e.is_finite());
                        }
                    }
                    Some("name") if name.is_none() && !value.is_empty() => {
                        let parent = path.len().checked_sub(2).map(|i| path[i].as_str());
                        if matches!(parent, Some("trk" | "rte" | "metadata")) {
                            name = Some(value.to_string());
                        }
                    }
                    _ => {}
                }
            }
            Event::End(_) => {
                if let Some(local) = path.pop()
                    && is_point_element(&local)
                    && let Some(point) = current.take()
                {
                    points.push(point);
                }
            }
            Event::Eof => break,
            _ => {}
        }
    }

    Ok(Track::new(name, points))
}

fn local_name(start: &BytesStart<'_>) -> String {
    String::from_utf8_lossy(start.local_name().as_ref()).into_owned()
}

fn is_point_element(local: &str) -> bool {
    local == "trkpt" || local == "rtept"
}

fn read_point(start: &BytesStart<'_>, index: usize) -> Result<GeoPoint, GpxError> {
    let mut lat = None;
    let mut lon = None;

    for attr in start.attributes() {
        let attr = attr.map_err(quick_xml::Error::from)?;
        let value = attr.unescape_value()?;
        match attr.key.local_name().as_ref() {
            b"lat" => lat = value.trim().parse::<f64>().ok(),
            b"lon" => lon = value.trim().parse::<f64>().ok(),
            _ => {}
        }
    }

    let latitude = lat
        .filter(|v| v.is_finite() && v.abs() <= 90.0)
        .ok_or(GpxError::InvalidCoordinate {
            index,
            attribute: "lat",
        })?;
    let longitude = lon
        .filter(|v| v.is_finite() && v.abs() <= 180.0)
        .ok_or(GpxError::InvalidCoordinate {
            index,
            attribute: "lon",
        })?;

    Ok(GeoPoint::new(latitude, longitude))
}
