//! egui implementation of the host map surface.
//!
//! `MapView` owns the viewport (projection, zoom, pan) and retained
//! display lists for markers, polylines, and overlays. Its `show` pass
//! updates the projection from the allocated canvas rect, runs the overlay
//! lifecycle, and paints everything back-to-front: plan overlays, route
//! lines, markers.

use eframe::egui::{self, Pos2, Rect, Sense, Stroke, Vec2};
use geo_types::Coord;

use super::surface::{MapSurface, MarkerId, MarkerStyle, OverlayId, PolylineId, PolylineStyle};
use crate::geo::MapProjection;
use crate::overlay::{self, ImageStore, MapOverlay, OverlayPane};
use crate::ui::colors;

struct Marker {
    position: Coord<f64>,
    style: MarkerStyle,
    attached: bool,
}

struct Polyline {
    points: Vec<Coord<f64>>,
    style: PolylineStyle,
    attached: bool,
}

struct OverlayEntry {
    overlay: Box<dyn MapOverlay>,
    attached: bool,
    /// Whether `on_attach` has run and the screen element exists.
    mounted: bool,
}

/// The egui map canvas.
pub struct MapView {
    projection: MapProjection,
    zoom: f32,
    pan_offset: Vec2,
    markers: Vec<Marker>,
    polylines: Vec<Option<Polyline>>,
    overlays: Vec<OverlayEntry>,
    images: ImageStore,
}

impl MapView {
    /// Creates a view centered on a geographic point.
    pub fn new(center: Coord<f64>) -> Self {
        Self {
            projection: MapProjection::new(center),
            zoom: 1.0,
            pan_offset: Vec2::ZERO,
            markers: Vec::new(),
            polylines: Vec::new(),
            overlays: Vec::new(),
            images: ImageStore::new(),
        }
    }

    /// The current projection (for hit-testing clicks, etc.).
    pub fn projection(&self) -> &MapProjection {
        &self.projection
    }

    /// The plan image store.
    pub fn images_mut(&mut self) -> &mut ImageStore {
        &mut self.images
    }

    /// Renders the map into the available space and handles interaction.
    pub fn show(&mut self, ui: &mut egui::Ui) -> egui::Response {
        let available_size = ui.available_size();
        let (response, painter) = ui.allocate_painter(available_size, Sense::click_and_drag());
        let rect = response.rect;

        painter.rect_filled(rect, 0.0, colors::canvas::BACKGROUND);

        self.handle_interaction(&response, &rect);
        self.projection.update(self.zoom, self.pan_offset, rect);

        // Overlay lifecycle + draw. One viewport change, one draw pass.
        let ctx = ui.ctx().clone();
        let mut pane = OverlayPane {
            ctx: &ctx,
            painter: &painter,
            images: &self.images,
        };
        for entry in &mut self.overlays {
            if entry.attached {
                if !entry.mounted {
                    entry.overlay.on_attach(&mut pane);
                    entry.mounted = true;
                }
                entry.overlay.draw(&self.projection, &mut pane);
            } else if entry.mounted {
                entry.overlay.on_detach();
                entry.mounted = false;
            }
        }

        if self.overlays.is_empty() {
            overlay::draw_empty_hint(&painter, rect);
        }

        // Route lines above the plans
        for line in self.polylines.iter().flatten() {
            if line.attached {
                render_polyline(&painter, &self.projection, line);
            }
        }

        // Markers on top
        for marker in &self.markers {
            if marker.attached && self.projection.is_visible(marker.position, 0.0005) {
                let pos = self.projection.geo_to_screen(marker.position);
                painter.circle_filled(pos, marker.style.radius, marker.style.fill);
                painter.circle_stroke(
                    pos,
                    marker.style.radius,
                    Stroke::new(1.5, marker.style.ring),
                );
            }
        }

        response
    }

    fn handle_interaction(&mut self, response: &egui::Response, rect: &Rect) {
        // Drag to pan
        if response.dragged() {
            self.pan_offset += response.drag_delta();
        }

        // Scroll to zoom relative to cursor position
        if response.hovered() {
            let scroll_delta = response.ctx.input(|i| i.raw_scroll_delta);
            if scroll_delta.y != 0.0 {
                let zoom_factor = 1.0 + scroll_delta.y * 0.001;
                let old_zoom = self.zoom;
                let new_zoom = (old_zoom * zoom_factor).clamp(0.1, 10.0);

                // Keep the point under the cursor stationary
                if let Some(cursor_pos) = response.hover_pos() {
                    let cursor_rel = cursor_pos - rect.center();
                    let ratio = new_zoom / old_zoom;
                    self.pan_offset = cursor_rel * (1.0 - ratio) + self.pan_offset * ratio;
                }

                self.zoom = new_zoom;
            }
        }

        // Reset view on double-click
        if response.double_clicked() {
            self.zoom = 1.0;
            self.pan_offset = Vec2::ZERO;
        }
    }
}

impl MapSurface for MapView {
    fn add_marker(&mut self, position: Coord<f64>, style: MarkerStyle) -> MarkerId {
        self.markers.push(Marker {
            position,
            style,
            attached: true,
        });
        MarkerId(self.markers.len() - 1)
    }

    fn move_marker(&mut self, id: MarkerId, position: Coord<f64>) {
        if let Some(marker) = self.markers.get_mut(id.0) {
            marker.position = position;
        }
    }

    fn set_marker_attached(&mut self, id: MarkerId, attached: bool) {
        if let Some(marker) = self.markers.get_mut(id.0) {
            marker.attached = attached;
        }
    }

    fn add_polyline(&mut self, points: Vec<Coord<f64>>, style: PolylineStyle) -> PolylineId {
        self.polylines.push(Some(Polyline {
            points,
            style,
            attached: false,
        }));
        PolylineId(self.polylines.len() - 1)
    }

    fn set_polyline_attached(&mut self, id: PolylineId, attached: bool) {
        if let Some(Some(line)) = self.polylines.get_mut(id.0) {
            line.attached = attached;
        }
    }

    fn remove_polyline(&mut self, id: PolylineId) {
        if let Some(slot) = self.polylines.get_mut(id.0) {
            *slot = None;
        }
    }

    fn add_overlay(&mut self, overlay: Box<dyn MapOverlay>) -> OverlayId {
        self.overlays.push(OverlayEntry {
            overlay,
            attached: false,
            mounted: false,
        });
        OverlayId(self.overlays.len() - 1)
    }

    fn set_overlay_attached(&mut self, id: OverlayId, attached: bool) {
        if let Some(entry) = self.overlays.get_mut(id.0) {
            entry.attached = attached;
        }
    }

    fn set_center(&mut self, position: Coord<f64>) {
        self.projection.set_center(position);
        self.pan_offset = Vec2::ZERO;
    }
}

/// Renders a polyline with a quick bounding-box visibility check.
fn render_polyline(painter: &egui::Painter, projection: &MapProjection, line: &Polyline) {
    if line.points.len() < 2 {
        return;
    }

    let (min_lng, max_lng, min_lat, max_lat) = line.points.iter().fold(
        (f64::MAX, f64::MIN, f64::MAX, f64::MIN),
        |(min_x, max_x, min_y, max_y), c| {
            (
                min_x.min(c.x),
                max_x.max(c.x),
                min_y.min(c.y),
                max_y.max(c.y),
            )
        },
    );

    if !projection.bbox_visible(min_lng, min_lat, max_lng, max_lat) {
        return;
    }

    let screen_points: Vec<Pos2> = line
        .points
        .iter()
        .map(|c| projection.geo_to_screen(*c))
        .collect();

    let stroke = Stroke::new(line.style.width, line.style.color);
    for window in screen_points.windows(2) {
        if let [p1, p2] = window {
            painter.line_segment([*p1, *p2], stroke);
        }
    }
}
