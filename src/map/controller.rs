//! Map controller: the context object for all rendering operations.
//!
//! Holds the floors mapping, the region overlay instances, and the two
//! singleton markers, and turns navigation paths into per-floor line
//! overlays. The host surface and the overlay factory are injected at
//! construction; there is no hidden process-wide state.

use std::collections::HashMap;

use geo_types::Coord;

use super::surface::{MapSurface, MarkerId, MarkerStyle, OverlayId, PolylineStyle};
use crate::model::{Floors, Node};
use crate::overlay::{OverlayConfig, OverlayFactory};

/// Controller for floor, route, and marker rendering.
pub struct MapController<S: MapSurface> {
    surface: S,
    factory: Box<dyn OverlayFactory>,

    floors: Floors,
    /// One overlay instance per region for the controller's lifetime,
    /// keyed by region name. Shown/hidden, never recreated.
    region_overlays: HashMap<String, OverlayId>,
    active_layer: Option<String>,

    /// Start point marked by the user, if any.
    start_node: Option<Node>,
    position_marker: Option<MarkerId>,
    target_marker: Option<MarkerId>,
}

impl<S: MapSurface> MapController<S> {
    /// Creates a controller rendering onto `surface`, creating region
    /// overlays through `factory`.
    pub fn new(surface: S, factory: Box<dyn OverlayFactory>) -> Self {
        Self {
            surface,
            factory,
            floors: Floors::new(),
            region_overlays: HashMap::new(),
            active_layer: None,
            start_node: None,
            position_marker: None,
            target_marker: None,
        }
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn surface_mut(&mut self) -> &mut S {
        &mut self.surface
    }

    pub fn floors(&self) -> &Floors {
        &self.floors
    }

    pub fn active_layer(&self) -> Option<&str> {
        self.active_layer.as_deref()
    }

    pub fn start_node(&self) -> Option<&Node> {
        self.start_node.as_ref()
    }

    /// Replaces the floors mapping wholesale.
    ///
    /// Region overlay instances persist across data swaps; regions no
    /// longer present simply stay hidden after the next stop/switch.
    pub fn set_floors(&mut self, floors: Floors) {
        log::info!("Floor data set: {} layer(s)", floors.len());
        self.floors = floors;
    }

    /// Marks the navigation start point and moves the position marker
    /// there. The node is tagged with the active layer.
    pub fn set_start_node(&mut self, lat: f64, lng: f64) {
        let layer = self.active_layer.clone().unwrap_or_default();
        let node = Node::new(lat, lng, layer);
        self.update_position_marker(node.position());
        self.start_node = Some(node);
    }

    /// Creates or moves the current-position marker, re-attaches it, and
    /// centers the map on it.
    pub fn update_position_marker(&mut self, position: Coord<f64>) {
        match self.position_marker {
            Some(id) => {
                self.surface.set_marker_attached(id, true);
                self.surface.move_marker(id, position);
            }
            None => {
                let id = self.surface.add_marker(position, MarkerStyle::position());
                self.position_marker = Some(id);
            }
        }
        self.surface.set_center(position);
    }

    /// Creates, moves, or hides the secondary indicator marker.
    ///
    /// `None` hides the marker without destroying it; a later call with a
    /// coordinate reshows the same instance.
    pub fn update_target_marker(&mut self, position: Option<Coord<f64>>) {
        let Some(position) = position else {
            if let Some(id) = self.target_marker {
                self.surface.set_marker_attached(id, false);
            }
            return;
        };

        match self.target_marker {
            Some(id) => {
                self.surface.set_marker_attached(id, true);
                self.surface.move_marker(id, position);
            }
            None => {
                let id = self.surface.add_marker(position, MarkerStyle::target());
                self.target_marker = Some(id);
            }
        }
        self.surface.set_center(position);
    }

    /// Builds route lines for `path` and renders the target layer.
    ///
    /// For every adjacent pair of path nodes on the same layer a line is
    /// created on that layer. Adjacent pairs on different layers are
    /// skipped: no line is drawn across a floor transition.
    pub fn start_navigation(&mut self, path: &[Node], layer_id: &str) {
        log::info!(
            "Starting navigation: {} path node(s), target layer '{}'",
            path.len(),
            layer_id
        );

        for pair in path.windows(2) {
            if pair[0].layer == pair[1].layer {
                self.add_line_to_layer(&pair[0].layer, &pair[0], &pair[1]);
            }
        }
        self.render_layer(layer_id);
    }

    /// Discards every layer's route lines and hides every region overlay.
    pub fn stop_navigation(&mut self) {
        log::info!("Stopping navigation");

        for layer in self.floors.values_mut() {
            for id in layer.edge_lines.drain(..) {
                self.surface.remove_polyline(id);
            }
        }
        for id in self.region_overlays.values() {
            self.surface.set_overlay_attached(*id, false);
        }
    }

    /// Hides everything, then renders only the requested layer.
    pub fn switch_to_layer(&mut self, layer_id: &str) {
        self.clear_map();
        self.render_layer(layer_id);
    }

    /// Hides all layers' route lines and all region overlays without
    /// discarding anything.
    pub fn clear_map(&mut self) {
        for layer in self.floors.values() {
            for id in &layer.edge_lines {
                self.surface.set_polyline_attached(*id, false);
            }
        }
        for id in self.region_overlays.values() {
            self.surface.set_overlay_attached(*id, false);
        }
    }

    /// Shows a layer's stored route lines and region overlays, creating
    /// each region's overlay on first use (keyed by region name).
    pub fn render_layer(&mut self, layer_id: &str) {
        let Some(layer) = self.floors.get(layer_id) else {
            log::debug!("render_layer: unknown layer '{}'", layer_id);
            return;
        };

        for id in &layer.edge_lines {
            self.surface.set_polyline_attached(*id, true);
        }

        for (name, region) in &layer.regions {
            match self.region_overlays.get(name) {
                Some(id) => self.surface.set_overlay_attached(*id, true),
                None => {
                    let overlay = self
                        .factory
                        .create_overlay(OverlayConfig::for_region(name, region));
                    let id = self.surface.add_overlay(overlay);
                    self.surface.set_overlay_attached(id, true);
                    self.region_overlays.insert(name.clone(), id);
                }
            }
        }

        self.active_layer = Some(layer_id.to_string());
    }

    fn add_line_to_layer(&mut self, layer_id: &str, from: &Node, to: &Node) {
        let Some(layer) = self.floors.get_mut(layer_id) else {
            log::debug!("add_line_to_layer: unknown layer '{}'", layer_id);
            return;
        };

        let id = self
            .surface
            .add_polyline(vec![from.position(), to.position()], PolylineStyle::route());
        layer.edge_lines.push(id);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::map::PolylineId;
    use crate::model::{floors_from_json, Layer, Region};
    use crate::overlay::FloorPlanFactory;

    /// Host surface double that records every call.
    #[derive(Default)]
    struct RecordingSurface {
        markers: Vec<(Coord<f64>, bool)>,
        polylines: Vec<Option<bool>>,
        overlays: Vec<bool>,
        centers: Vec<Coord<f64>>,
    }

    impl RecordingSurface {
        fn attached_polylines(&self) -> usize {
            self.polylines
                .iter()
                .filter(|slot| matches!(slot, Some(true)))
                .count()
        }

        fn attached_overlays(&self) -> usize {
            self.overlays.iter().filter(|attached| **attached).count()
        }
    }

    impl MapSurface for RecordingSurface {
        fn add_marker(&mut self, position: Coord<f64>, _style: MarkerStyle) -> MarkerId {
            self.markers.push((position, true));
            MarkerId(self.markers.len() - 1)
        }

        fn move_marker(&mut self, id: MarkerId, position: Coord<f64>) {
            self.markers[id.0].0 = position;
        }

        fn set_marker_attached(&mut self, id: MarkerId, attached: bool) {
            self.markers[id.0].1 = attached;
        }

        fn add_polyline(&mut self, _points: Vec<Coord<f64>>, _style: PolylineStyle) -> PolylineId {
            self.polylines.push(Some(false));
            PolylineId(self.polylines.len() - 1)
        }

        fn set_polyline_attached(&mut self, id: PolylineId, attached: bool) {
            if let Some(slot) = self.polylines.get_mut(id.0) {
                if let Some(state) = slot.as_mut() {
                    *state = attached;
                }
            }
        }

        fn remove_polyline(&mut self, id: PolylineId) {
            self.polylines[id.0] = None;
        }

        fn add_overlay(&mut self, _overlay: Box<dyn crate::overlay::MapOverlay>) -> OverlayId {
            self.overlays.push(false);
            OverlayId(self.overlays.len() - 1)
        }

        fn set_overlay_attached(&mut self, id: OverlayId, attached: bool) {
            self.overlays[id.0] = attached;
        }

        fn set_center(&mut self, position: Coord<f64>) {
            self.centers.push(position);
        }
    }

    fn test_region(lat: f64, lng: f64) -> Region {
        Region {
            image: "plan".to_string(),
            lat,
            lng,
            ppm: 10.0,
            rotate: 0.0,
            width: 1000.0,
            height: 1000.0,
            opacity: 1.0,
        }
    }

    fn test_floors() -> Floors {
        let mut floors = Floors::new();

        let mut ground = Layer::default();
        ground
            .regions
            .insert("lobby".to_string(), test_region(40.4434, -79.9451));
        ground
            .regions
            .insert("atrium".to_string(), test_region(40.4436, -79.9449));
        floors.insert("floor-1".to_string(), ground);

        floors.insert("floor-2".to_string(), Layer::default());
        floors
    }

    fn test_controller() -> MapController<RecordingSurface> {
        let mut controller =
            MapController::new(RecordingSurface::default(), Box::new(FloorPlanFactory));
        controller.set_floors(test_floors());
        controller
    }

    fn path_on(layers: &[&str]) -> Vec<Node> {
        layers
            .iter()
            .enumerate()
            .map(|(i, layer)| Node::new(40.4434 + i as f64 * 1e-4, -79.9451, *layer))
            .collect()
    }

    #[test]
    fn test_navigation_single_layer_line_count() {
        let mut controller = test_controller();
        let path = path_on(&["floor-1", "floor-1", "floor-1", "floor-1"]);

        controller.start_navigation(&path, "floor-1");

        // path length - 1 lines, all shown on the rendered layer
        assert_eq!(controller.floors()["floor-1"].edge_lines.len(), 3);
        assert_eq!(controller.surface().attached_polylines(), 3);
    }

    #[test]
    fn test_navigation_skips_floor_transitions() {
        let mut controller = test_controller();
        let path = path_on(&["floor-1", "floor-1", "floor-2", "floor-2"]);

        controller.start_navigation(&path, "floor-1");

        // One line per same-layer adjacent pair; none across the transition
        assert_eq!(controller.floors()["floor-1"].edge_lines.len(), 1);
        assert_eq!(controller.floors()["floor-2"].edge_lines.len(), 1);

        // Only the target layer's line is attached
        assert_eq!(controller.surface().attached_polylines(), 1);
    }

    #[test]
    fn test_region_overlays_created_once() {
        let mut controller = test_controller();

        controller.switch_to_layer("floor-1");
        assert_eq!(controller.surface().overlays.len(), 2);
        assert_eq!(controller.surface().attached_overlays(), 2);

        controller.switch_to_layer("floor-2");
        assert_eq!(controller.surface().attached_overlays(), 0);

        // Switching back reuses the same instances, no duplicates
        controller.switch_to_layer("floor-1");
        assert_eq!(controller.surface().overlays.len(), 2);
        assert_eq!(controller.surface().attached_overlays(), 2);
    }

    #[test]
    fn test_stop_discards_lines() {
        let mut controller = test_controller();
        let path = path_on(&["floor-1", "floor-1", "floor-1"]);

        controller.start_navigation(&path, "floor-1");
        controller.stop_navigation();

        assert!(controller.floors()["floor-1"].edge_lines.is_empty());
        assert_eq!(controller.surface().attached_overlays(), 0);

        // The layer renders clean afterwards
        controller.switch_to_layer("floor-1");
        assert_eq!(controller.surface().attached_polylines(), 0);
        assert_eq!(controller.surface().attached_overlays(), 2);
    }

    #[test]
    fn test_restart_rebuilds_lines_from_scratch() {
        let mut controller = test_controller();
        let path = path_on(&["floor-1", "floor-1"]);

        controller.start_navigation(&path, "floor-1");
        controller.stop_navigation();
        controller.start_navigation(&path, "floor-1");

        assert_eq!(controller.floors()["floor-1"].edge_lines.len(), 1);
        assert_eq!(controller.surface().attached_polylines(), 1);
    }

    #[test]
    fn test_target_marker_hides_without_discard() {
        let mut controller = test_controller();
        let spot = Coord {
            x: -79.9450,
            y: 40.4435,
        };

        controller.update_target_marker(Some(spot));
        assert_eq!(controller.surface().markers.len(), 1);
        assert!(controller.surface().markers[0].1);
        assert_eq!(controller.surface().centers.len(), 1);

        controller.update_target_marker(None);
        assert_eq!(controller.surface().markers.len(), 1);
        assert!(!controller.surface().markers[0].1);
        // Hiding does not recenter
        assert_eq!(controller.surface().centers.len(), 1);

        controller.update_target_marker(Some(spot));
        assert_eq!(controller.surface().markers.len(), 1, "marker was recreated");
        assert!(controller.surface().markers[0].1);
    }

    #[test]
    fn test_start_node_tagged_with_active_layer() {
        let mut controller = test_controller();
        controller.switch_to_layer("floor-1");

        controller.set_start_node(40.4435, -79.9450);

        let node = controller.start_node().unwrap();
        assert_eq!(node.layer, "floor-1");
        assert_eq!(controller.surface().markers.len(), 1);
        assert_eq!(
            controller.surface().centers.last().unwrap(),
            &node.position()
        );
    }

    #[test]
    fn test_unknown_layer_is_noop() {
        let mut controller = test_controller();
        controller.switch_to_layer("mezzanine");

        assert_eq!(controller.active_layer(), None);
        assert_eq!(controller.surface().overlays.len(), 0);
    }

    #[test]
    fn test_floors_loaded_from_json_render() {
        let json = r#"{
            "g": {
                "nodes": { "a": { "lat": 40.4434, "lng": -79.9451 } },
                "regions": { "hall": { "image": "hall", "lat": 40.4434,
                                       "lng": -79.9451, "ppm": 8.0 } }
            }
        }"#;
        let mut controller =
            MapController::new(RecordingSurface::default(), Box::new(FloorPlanFactory));
        controller.set_floors(floors_from_json(json).unwrap());

        controller.switch_to_layer("g");
        assert_eq!(controller.active_layer(), Some("g"));
        assert_eq!(controller.surface().attached_overlays(), 1);
    }
}
