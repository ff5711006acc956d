//! Floor data model: layers, nodes, and regions.
//!
//! This is the in-memory model the controller renders from. It mirrors the
//! mapping supplied by the external floor-data loader:
//! layer id -> { node id -> node, region name -> region }.

pub mod sample;

use std::collections::BTreeMap;

use geo_types::Coord;
use serde::Deserialize;

use crate::map::PolylineId;

/// A geographic point used as a navigation graph vertex.
///
/// Nodes are immutable once placed on the map; navigation paths arrive as
/// ordered sequences of nodes tagged with their layer.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Node {
    pub lat: f64,
    pub lng: f64,
    /// Id of the layer (floor) this node belongs to. Filled in from the
    /// containing key when loading floor data.
    #[serde(default)]
    pub layer: String,
}

impl Node {
    pub fn new(lat: f64, lng: f64, layer: impl Into<String>) -> Self {
        Self {
            lat,
            lng,
            layer: layer.into(),
        }
    }

    /// Position as a (lng, lat) coordinate.
    pub fn position(&self) -> Coord<f64> {
        Coord {
            x: self.lng,
            y: self.lat,
        }
    }
}

/// A named floor-plan image anchored to geographic coordinates.
///
/// One region maps to one overlay instance for the controller's lifetime;
/// the overlay is shown/hidden rather than recreated.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Region {
    /// Key of the plan image in the host's image store.
    pub image: String,
    /// Anchor latitude (image center).
    pub lat: f64,
    /// Anchor longitude (image center).
    pub lng: f64,
    /// Pixels per meter of the plan image.
    pub ppm: f64,
    /// Clockwise rotation in degrees.
    #[serde(default)]
    pub rotate: f64,
    /// Plan image width in pixels.
    #[serde(default = "default_plan_extent")]
    pub width: f64,
    /// Plan image height in pixels.
    #[serde(default = "default_plan_extent")]
    pub height: f64,
    /// Overlay opacity, 0.0 (transparent) to 1.0 (opaque).
    #[serde(default = "default_opacity")]
    pub opacity: f32,
}

fn default_plan_extent() -> f64 {
    1000.0
}

fn default_opacity() -> f32 {
    1.0
}

impl Region {
    /// Anchor as a (lng, lat) coordinate.
    pub fn anchor(&self) -> Coord<f64> {
        Coord {
            x: self.lng,
            y: self.lat,
        }
    }
}

/// One floor of a building: nodes, regions, and the line overlays created
/// for the active route.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Layer {
    #[serde(default)]
    pub nodes: BTreeMap<String, Node>,
    #[serde(default)]
    pub regions: BTreeMap<String, Region>,
    /// Route line overlays on this floor, in path order. Rebuilt from
    /// scratch on every navigation start and discarded on stop.
    #[serde(skip)]
    pub edge_lines: Vec<PolylineId>,
}

/// The full floors mapping, keyed by layer id.
pub type Floors = BTreeMap<String, Layer>;

/// Parses the floor-data mapping from JSON.
///
/// Each node's `layer` field is back-filled from the layer key containing
/// it, so path construction can compare node layers directly.
pub fn floors_from_json(json: &str) -> Result<Floors, String> {
    let mut floors: Floors =
        serde_json::from_str(json).map_err(|e| format!("Failed to parse floor data: {}", e))?;

    for (layer_id, layer) in floors.iter_mut() {
        for node in layer.nodes.values_mut() {
            node.layer = layer_id.clone();
        }
    }

    Ok(floors)
}

#[cfg(test)]
mod tests {
    use super::*;

    const FLOOR_JSON: &str = r#"{
        "floor-1": {
            "nodes": {
                "n1": { "lat": 40.4434, "lng": -79.9451 },
                "n2": { "lat": 40.4436, "lng": -79.9449 }
            },
            "regions": {
                "lobby": {
                    "image": "lobby",
                    "lat": 40.4435,
                    "lng": -79.9450,
                    "ppm": 10.0,
                    "rotate": 15.0
                }
            }
        },
        "floor-2": {}
    }"#;

    #[test]
    fn test_parse_floor_data() {
        let floors = floors_from_json(FLOOR_JSON).unwrap();
        assert_eq!(floors.len(), 2);

        let floor = &floors["floor-1"];
        assert_eq!(floor.nodes.len(), 2);
        assert_eq!(floor.regions.len(), 1);
        assert!(floor.edge_lines.is_empty());
    }

    #[test]
    fn test_node_layer_backfill() {
        let floors = floors_from_json(FLOOR_JSON).unwrap();
        for (layer_id, layer) in &floors {
            for node in layer.nodes.values() {
                assert_eq!(&node.layer, layer_id);
            }
        }
    }

    #[test]
    fn test_region_defaults() {
        let floors = floors_from_json(FLOOR_JSON).unwrap();
        let region = &floors["floor-1"].regions["lobby"];
        assert_eq!(region.width, 1000.0);
        assert_eq!(region.height, 1000.0);
        assert_eq!(region.opacity, 1.0);
        assert_eq!(region.rotate, 15.0);
    }

    #[test]
    fn test_parse_error_is_reported() {
        assert!(floors_from_json("not json").is_err());
    }
}
