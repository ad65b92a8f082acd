use std::collections::HashMap;

pub const METERS_PER_LEVEL: f64 = 3.0;
pub const DEFAULT_HEIGHT_M: f64 = 6.0;

/// Typical height in meters for a `building=*` category
pub fn category_height(building: &str) -> Option<f64> {
    match building {
        "house" | "residential" => Some(6.0),
        "apartments" => Some(15.0),
        "commercial" | "retail" => Some(4.0),
        "industrial" => Some(8.0),
        "office" => Some(20.0),
        "hospital" => Some(12.0),
        "school" => Some(4.0),
        "church" => Some(15.0),
        _ => None,
    }
}

/// Real-world height of a building in meters, derived from its tags
///
/// First match wins:
/// 1. `height` as a decimal, optionally suffixed with `m`
/// 2. `building:levels` (or `levels`) times [`METERS_PER_LEVEL`]
/// 3. the `building` category table
/// 4. [`DEFAULT_HEIGHT_M`]
///
/// Unparseable or non-positive values fall through to the next rule, so the
/// result is always finite and positive.
pub fn resolve_height(tags: &HashMap<String, String>) -> f64 {
    if let Some(height) = tags.get("height").and_then(|h| parse_meters(h)) {
        return height;
    }

    let levels = tags
        .get("building:levels")
        .or_else(|| tags.get("levels"))
        .and_then(|l| l.trim().parse::<u32>().ok())
        .filter(|&l| l > 0);
    if let Some(levels) = levels {
        return levels as f64 * METERS_PER_LEVEL;
    }

    tags.get("building")
        .and_then(|b| category_height(b.trim()))
        .unwrap_or(DEFAULT_HEIGHT_M)
}

fn parse_meters(raw: &str) -> Option<f64> {
    let trimmed = raw.trim();
    let number = trimmed.strip_suffix('m').unwrap_or(trimmed).trim_end();
    number
        .parse::<f64>()
        .ok()
        .filter(|h| h.is_finite() && *h > 0.0)
}
