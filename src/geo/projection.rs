//! Map projection and coordinate transformation.
//!
//! Handles converting between geographic coordinates (lat/lng) and
//! screen coordinates for rendering on the map canvas. The projection is
//! the piece of viewport state overlays recompute their bounds against:
//! every pan or zoom produces an updated projection and one redraw pass.

use eframe::egui::{Pos2, Rect, Vec2};
use geo_types::Coord;

/// Map projection for converting geographic to screen coordinates.
#[derive(Debug, Clone)]
pub struct MapProjection {
    /// Center latitude of the view
    pub center_lat: f64,
    /// Center longitude of the view
    pub center_lng: f64,
    /// Visible range in degrees (how much lat/lng span is visible)
    pub range_deg: f64,
    /// Current zoom level
    pub zoom: f32,
    /// Pan offset in screen pixels
    pub pan_offset: Vec2,
    /// Screen rectangle for the canvas
    pub screen_rect: Rect,
}

impl Default for MapProjection {
    fn default() -> Self {
        Self {
            // Default to the sample campus building
            center_lat: 40.443_420,
            center_lng: -79.945_130,
            // ~300m across, a building-and-surroundings view
            range_deg: 0.003,
            zoom: 1.0,
            pan_offset: Vec2::ZERO,
            screen_rect: Rect::from_min_size(Pos2::ZERO, Vec2::new(800.0, 600.0)),
        }
    }
}

impl MapProjection {
    /// Creates a new projection centered on a geographic point.
    pub fn new(center: Coord<f64>) -> Self {
        Self {
            center_lat: center.y,
            center_lng: center.x,
            ..Default::default()
        }
    }

    /// Updates the projection with current view state.
    pub fn update(&mut self, zoom: f32, pan_offset: Vec2, screen_rect: Rect) {
        self.zoom = zoom;
        self.pan_offset = pan_offset;
        self.screen_rect = screen_rect;
    }

    /// Recenters the view on a geographic point.
    pub fn set_center(&mut self, center: Coord<f64>) {
        self.center_lat = center.y;
        self.center_lng = center.x;
    }

    /// Converts geographic coordinates (lng, lat) to screen position.
    ///
    /// Uses an equirectangular projection with cosine latitude correction,
    /// which is adequate for the few hundred meters an indoor map spans.
    pub fn geo_to_screen(&self, coord: Coord<f64>) -> Pos2 {
        let effective_range = self.range_deg / self.zoom as f64;

        let rel_lng = coord.x - self.center_lng;
        let rel_lat = coord.y - self.center_lat;

        // Latitude correction so east-west distances keep their proportions
        let lat_correction = self.center_lat.to_radians().cos();
        let corrected_lng = rel_lng * lat_correction;

        let norm_x = corrected_lng / effective_range;
        let norm_y = -rel_lat / effective_range; // Flip Y since screen Y increases downward

        let center = self.screen_rect.center() + self.pan_offset;
        let half_size = self.screen_rect.size().min_elem() / 2.0;

        Pos2::new(
            center.x + (norm_x as f32) * half_size,
            center.y + (norm_y as f32) * half_size,
        )
    }

    /// Converts screen position to geographic coordinates (lng, lat).
    pub fn screen_to_geo(&self, pos: Pos2) -> Coord<f64> {
        let effective_range = self.range_deg / self.zoom as f64;

        let center = self.screen_rect.center() + self.pan_offset;
        let half_size = self.screen_rect.size().min_elem() / 2.0;

        let norm_x = (pos.x - center.x) / half_size;
        let norm_y = (pos.y - center.y) / half_size;

        let lat_correction = self.center_lat.to_radians().cos();
        let rel_lng = (norm_x as f64) * effective_range / lat_correction;
        let rel_lat = -(norm_y as f64) * effective_range; // Flip Y back

        Coord {
            x: self.center_lng + rel_lng,
            y: self.center_lat + rel_lat,
        }
    }

    /// Returns the visible geographic bounds as (min_lng, min_lat, max_lng, max_lat).
    pub fn visible_bounds(&self) -> (f64, f64, f64, f64) {
        let top_left = self.screen_to_geo(self.screen_rect.left_top());
        let bottom_right = self.screen_to_geo(self.screen_rect.right_bottom());

        (
            top_left.x.min(bottom_right.x),
            top_left.y.min(bottom_right.y),
            top_left.x.max(bottom_right.x),
            top_left.y.max(bottom_right.y),
        )
    }

    /// Checks if a coordinate is within the visible bounds (with margin).
    pub fn is_visible(&self, coord: Coord<f64>, margin_deg: f64) -> bool {
        let (min_lng, min_lat, max_lng, max_lat) = self.visible_bounds();
        coord.x >= min_lng - margin_deg
            && coord.x <= max_lng + margin_deg
            && coord.y >= min_lat - margin_deg
            && coord.y <= max_lat + margin_deg
    }

    /// Checks if a bounding box intersects the visible bounds (with margin).
    pub fn bbox_visible(&self, min_lng: f64, min_lat: f64, max_lng: f64, max_lat: f64) -> bool {
        let (vis_min_lng, vis_min_lat, vis_max_lng, vis_max_lat) = self.visible_bounds();

        let margin = self.range_deg;
        !(max_lng < vis_min_lng - margin
            || min_lng > vis_max_lng + margin
            || max_lat < vis_min_lat - margin
            || min_lat > vis_max_lat + margin)
    }
}
