use anyhow::{Context, Result, bail};
use serde::Deserialize;
use std::collections::HashMap;
use std::time::Duration;

use crate::config::OverpassConfig;
use crate::geometry::Bounds;

const USER_AGENT: &str = concat!("trackto3d/", env!("CARGO_PKG_VERSION"));

/// Raw Overpass API response
#[derive(Debug, Deserialize)]
pub struct OverpassResponse {
    pub elements: Vec<Element>,
}

/// A single element from Overpass (node or way)
#[derive(Debug, Deserialize)]
pub struct Element {
    #[serde(rename = "type")]
    pub type_: String,
    pub id: u64,
    #[serde(default)]
    pub nodes: Option<Vec<u64>>,
    #[serde(default)]
    pub tags: Option<HashMap<String, String>>,
    #[serde(default)]
    pub lat: Option<f64>,
    #[serde(default)]
    pub lon: Option<f64>,
}

/// Overpass QL query for every building way inside the bounds
pub fn building_query(bounds: &Bounds, timeout_secs: u64) -> String {
    format!(
        r#"[out:json][timeout:{timeout}];
(
  way["building"]({south},{west},{north},{east});
);
out body;
>;
out skel qt;"#,
        timeout = timeout_secs,
        south = bounds.south(),
        west = bounds.west(),
        north = bounds.north(),
        east = bounds.east(),
    )
}

/// Fetch building footprints inside the bounds from Overpass
///
/// Makes a single request; a non-200 status is an error.
pub fn fetch_buildings(bounds: &Bounds, config: &OverpassConfig) -> Result<OverpassResponse> {
    let query = building_query(bounds, config.timeout_secs);

    let client = reqwest::blocking::Client::builder()
        .user_agent(USER_AGENT)
        .timeout(client_timeout(config.timeout_secs))
        .build()
        .context("Failed to create HTTP client")?;

    log::debug!("Querying {} for buildings", config.url);

    // Overpass expects form-encoded `data=<query>`, not a raw body
    let response = client
        .post(&config.url)
        .form(&[("data", query.as_str())])
        .send()
        .context("Failed to send request to Overpass API")?;

    let status = response.status();
    if !status.is_success() {
        bail!("Overpass API returned error status: {}", status);
    }

    let result: OverpassResponse = response
        .json()
        .context("Failed to parse Overpass JSON response")?;
    log::debug!("Overpass returned {} elements", result.elements.len());
    Ok(result)
}

/// Client timeout slightly above the server-side query timeout
fn client_timeout(query_timeout_secs: u64) -> Duration {
    Duration::from_secs(query_timeout_secs.saturating_add(20))
}
