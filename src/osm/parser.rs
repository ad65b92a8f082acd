use crate::api::OverpassResponse;
use crate::domain::{FootprintPolygon, GeoPoint};
use std::collections::HashMap;

/// Parse an Overpass response into building footprints
///
/// # Algorithm
/// 1. Build node_id → point lookup map from all node elements
/// 2. For each way element carrying a `building` tag:
///    - Resolve node refs to points, dropping refs with no node
///    - Keep the way if at least 3 distinct vertices remain
///    - Copy all tags so heights can be resolved later
pub fn parse_buildings(response: &OverpassResponse) -> Vec<FootprintPolygon> {
    let nodes = build_node_lookup(response);
    let mut footprints = Vec::new();

    for element in &response.elements {
        if element.type_ != "way" {
            continue;
        }

        let Some(tags) = &element.tags else {
            continue;
        };
        if !tags.contains_key("building") {
            continue;
        }

        let Some(node_refs) = &element.nodes else {
            continue;
        };

        let outline = resolve_way_to_points(node_refs, &nodes);
        let footprint = FootprintPolygon::new(outline, tags.clone());

        if !footprint.is_valid() {
            log::debug!("Skipping building way {}: too few resolvable nodes", element.id);
            continue;
        }

        footprints.push(footprint);
    }

    footprints
}

fn build_node_lookup(response: &OverpassResponse) -> HashMap<u64, GeoPoint> {
    response
        .elements
        .iter()
        .filter(|e| e.type_ == "node")
        .filter_map(|e| Some((e.id, GeoPoint::new(e.lat?, e.lon?))))
        .collect()
}

fn resolve_way_to_points(node_refs: &[u64], nodes: &HashMap<u64, GeoPoint>) -> Vec<GeoPoint> {
    node_refs
        .iter()
        .filter_map(|id| nodes.get(id).copied())
        .collect()
}
