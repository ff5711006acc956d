//! Host map surface interface.
//!
//! The controller renders through this trait: marker and polyline
//! primitives plus the custom-overlay extension point, with attach/detach
//! ("on the map" / "off the map") semantics matching the usual mapping
//! widget object model. Hiding never destroys: a detached element keeps
//! its handle and can be re-attached later.

use eframe::egui::Color32;
use geo_types::Coord;

use crate::overlay::MapOverlay;
use crate::ui::colors;

/// Handle to a marker created on the surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MarkerId(pub(crate) usize);

/// Handle to a polyline created on the surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PolylineId(pub(crate) usize);

/// Handle to an overlay added to the surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct OverlayId(pub(crate) usize);

/// Visual style of a circular marker.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MarkerStyle {
    pub radius: f32,
    pub fill: Color32,
    pub ring: Color32,
}

impl MarkerStyle {
    /// The current-position marker: a 25px blue dot.
    pub fn position() -> Self {
        Self {
            radius: 12.5,
            fill: colors::nav::POSITION,
            ring: colors::nav::POSITION_RING,
        }
    }

    /// The secondary indicator marker: a 12.5px red dot.
    pub fn target() -> Self {
        Self {
            radius: 6.25,
            fill: colors::nav::TARGET,
            ring: colors::nav::TARGET_RING,
        }
    }
}

/// Visual style of a polyline.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PolylineStyle {
    pub width: f32,
    pub color: Color32,
}

impl PolylineStyle {
    /// The navigation route style: heavy teal stroke.
    pub fn route() -> Self {
        Self {
            width: 10.0,
            color: colors::nav::ROUTE,
        }
    }
}

/// The host mapping widget as seen by the controller.
///
/// All elements are created detached unless noted; the controller decides
/// what is on the map at any moment.
pub trait MapSurface {
    /// Creates a marker at `position`, attached to the map.
    fn add_marker(&mut self, position: Coord<f64>, style: MarkerStyle) -> MarkerId;

    /// Moves an existing marker.
    fn move_marker(&mut self, id: MarkerId, position: Coord<f64>);

    /// Shows or hides a marker without destroying it.
    fn set_marker_attached(&mut self, id: MarkerId, attached: bool);

    /// Creates a polyline through `points`, detached.
    fn add_polyline(&mut self, points: Vec<Coord<f64>>, style: PolylineStyle) -> PolylineId;

    /// Shows or hides a polyline without destroying it.
    fn set_polyline_attached(&mut self, id: PolylineId, attached: bool);

    /// Destroys a polyline. The handle becomes dead.
    fn remove_polyline(&mut self, id: PolylineId);

    /// Adds an overlay to the overlay pane, detached.
    fn add_overlay(&mut self, overlay: Box<dyn MapOverlay>) -> OverlayId;

    /// Shows or hides an overlay without destroying it. Attach/detach
    /// lifecycle hooks run on the next redraw pass.
    fn set_overlay_attached(&mut self, id: OverlayId, attached: bool);

    /// Centers the viewport on a geographic point.
    fn set_center(&mut self, position: Coord<f64>);
}
