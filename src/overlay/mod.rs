//! Screen-space image overlays anchored to geographic coordinates.
//!
//! A floor-plan overlay is bound to an anchor point, a pixel size, a
//! pixels-per-meter scale, and a rotation. Its screen placement is
//! recomputed from the current projection on every redraw pass, so the
//! image tracks the map through pans and zooms.

use std::collections::HashMap;

use eframe::egui::{
    self, Align2, Color32, ColorImage, FontId, Mesh, Painter, Pos2, Rect, Shape, Stroke,
    StrokeKind, TextureHandle, TextureOptions,
};
use eframe::egui::emath::Rot2;
use geo_types::Coord;
use glam::DVec2;

use crate::geo::{spherical, MapProjection};
use crate::model::Region;
use crate::ui::colors;

/// Configuration for a floor-plan overlay.
///
/// Named, typed fields; one config per region, built from the region's
/// record in the floor data.
#[derive(Debug, Clone, PartialEq)]
pub struct OverlayConfig {
    /// Display name (the region name), used for labels and texture ids.
    pub name: String,
    /// Key of the plan image in the host's image store.
    pub image: String,
    /// Geographic anchor the image is centered on (lng, lat).
    pub anchor: Coord<f64>,
    /// Image width in pixels.
    pub width: f64,
    /// Image height in pixels.
    pub height: f64,
    /// Pixels per meter of the plan image.
    pub ppm: f64,
    /// Clockwise rotation in degrees.
    pub rotate: f64,
    /// Opacity, 0.0 (transparent) to 1.0 (opaque).
    pub opacity: f32,
}

impl OverlayConfig {
    /// Builds the overlay config for a named region.
    pub fn for_region(name: &str, region: &Region) -> Self {
        Self {
            name: name.to_string(),
            image: region.image.clone(),
            anchor: region.anchor(),
            width: region.width,
            height: region.height,
            ppm: region.ppm,
            rotate: region.rotate,
            opacity: region.opacity,
        }
    }
}

/// Screen-space placement of an overlay: axis-aligned bounding rect plus
/// the rotation applied about its center.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScreenBounds {
    pub rect: Rect,
    pub rotate_deg: f32,
}

/// Named plan images available to overlays.
///
/// The external loader (or the demo's generator) fills the store; overlays
/// pull their image by key when attached.
#[derive(Default)]
pub struct ImageStore {
    images: HashMap<String, ColorImage>,
}

impl ImageStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, key: impl Into<String>, image: ColorImage) {
        self.images.insert(key.into(), image);
    }

    pub fn get(&self, key: &str) -> Option<&ColorImage> {
        self.images.get(key)
    }

    pub fn len(&self) -> usize {
        self.images.len()
    }

    pub fn is_empty(&self) -> bool {
        self.images.is_empty()
    }
}

/// Resources the host map hands to overlays during lifecycle hooks.
pub struct OverlayPane<'a> {
    pub ctx: &'a egui::Context,
    pub painter: &'a Painter,
    pub images: &'a ImageStore,
}

/// The host map's custom-overlay extension point.
///
/// `on_attach` runs once when the overlay is added to the map and creates
/// the screen element; `draw` runs on every redraw pass with the current
/// projection; `on_detach` runs when the overlay is removed from the map
/// and must release the screen element.
pub trait MapOverlay {
    fn on_attach(&mut self, pane: &mut OverlayPane<'_>);
    fn draw(&mut self, projection: &MapProjection, pane: &mut OverlayPane<'_>);
    fn on_detach(&mut self);
}

/// Creates overlay instances for the controller.
///
/// Injected into the controller so tests can substitute a counting
/// factory and hosts can substitute richer overlay types.
pub trait OverlayFactory {
    fn create_overlay(&self, config: OverlayConfig) -> Box<dyn MapOverlay>;
}

/// Default factory producing [`FloorPlanOverlay`]s.
#[derive(Debug, Default, Clone, Copy)]
pub struct FloorPlanFactory;

impl OverlayFactory for FloorPlanFactory {
    fn create_overlay(&self, config: OverlayConfig) -> Box<dyn MapOverlay> {
        Box::new(FloorPlanOverlay::new(config))
    }
}

/// A floor-plan image overlay.
pub struct FloorPlanOverlay {
    config: OverlayConfig,
    /// The screen element: a texture uploaded on attach, dropped on detach.
    texture: Option<TextureHandle>,
}

impl FloorPlanOverlay {
    pub fn new(config: OverlayConfig) -> Self {
        Self {
            config,
            texture: None,
        }
    }

    pub fn config(&self) -> &OverlayConfig {
        &self.config
    }

    /// Computes the overlay's screen placement under `projection`.
    ///
    /// The image's metric extent is its pixel size divided by the
    /// pixels-per-meter scale. The northeast/southwest corners are found
    /// by offsetting the anchor along the half-diagonal, then projected to
    /// screen pixels; the image stays centered on the anchor regardless of
    /// rotation.
    pub fn screen_bounds(&self, projection: &MapProjection) -> ScreenBounds {
        let half = DVec2::new(
            self.config.width / self.config.ppm / 2.0,
            self.config.height / self.config.ppm / 2.0,
        );
        let diagonal = half.length();

        // Corner bearings, clockwise from north
        let to_ne = half.x.atan2(half.y).to_degrees();
        let to_sw = (-half.x).atan2(-half.y).to_degrees();

        let ne = spherical::offset(self.config.anchor, diagonal, to_ne);
        let sw = spherical::offset(self.config.anchor, diagonal, to_sw);

        let ne_px = projection.geo_to_screen(ne);
        let sw_px = projection.geo_to_screen(sw);

        ScreenBounds {
            rect: Rect::from_min_max(Pos2::new(sw_px.x, ne_px.y), Pos2::new(ne_px.x, sw_px.y)),
            rotate_deg: self.config.rotate as f32,
        }
    }

    /// Translates the anchor by `distance_m` meters along `bearing_deg`
    /// and returns the new anchor.
    pub fn move_by(&mut self, distance_m: f64, bearing_deg: f64) -> Coord<f64> {
        self.config.anchor = spherical::offset(self.config.anchor, distance_m, bearing_deg);
        self.config.anchor
    }
}

impl MapOverlay for FloorPlanOverlay {
    fn on_attach(&mut self, pane: &mut OverlayPane<'_>) {
        match pane.images.get(&self.config.image) {
            Some(image) => {
                self.texture = Some(pane.ctx.load_texture(
                    format!("plan_{}", self.config.name),
                    image.clone(),
                    TextureOptions {
                        magnification: egui::TextureFilter::Linear,
                        minification: egui::TextureFilter::Linear,
                        ..Default::default()
                    },
                ));
            }
            None => {
                log::debug!(
                    "No plan image '{}' for region '{}', drawing placeholder",
                    self.config.image,
                    self.config.name
                );
            }
        }
    }

    fn draw(&mut self, projection: &MapProjection, pane: &mut OverlayPane<'_>) {
        let bounds = self.screen_bounds(projection);
        let angle = bounds.rotate_deg.to_radians();

        match &self.texture {
            Some(texture) => {
                let tint = Color32::WHITE.gamma_multiply(self.config.opacity);
                let uv = Rect::from_min_max(Pos2::new(0.0, 0.0), Pos2::new(1.0, 1.0));

                let mut mesh = Mesh::with_texture(texture.id());
                mesh.add_rect_with_uv(bounds.rect, uv, tint);
                mesh.rotate(Rot2::from_angle(angle), bounds.rect.center());
                pane.painter.add(Shape::mesh(mesh));
            }
            None => {
                // Missing image: rotated outline plus the region name
                let rot = Rot2::from_angle(angle);
                let center = bounds.rect.center();
                let corners = [
                    bounds.rect.left_top(),
                    bounds.rect.right_top(),
                    bounds.rect.right_bottom(),
                    bounds.rect.left_bottom(),
                ]
                .map(|corner| center + rot * (corner - center));

                pane.painter.add(Shape::closed_line(
                    corners.to_vec(),
                    Stroke::new(1.5, colors::canvas::PLACEHOLDER),
                ));
                pane.painter.text(
                    center,
                    Align2::CENTER_CENTER,
                    &self.config.name,
                    FontId::proportional(12.0),
                    colors::canvas::PLACEHOLDER,
                );
            }
        }
    }

    fn on_detach(&mut self) {
        self.texture = None;
    }
}

/// Draws a non-overlay placeholder frame while no floors are loaded.
pub fn draw_empty_hint(painter: &Painter, rect: Rect) {
    painter.rect_stroke(
        rect.shrink(40.0),
        4.0,
        Stroke::new(1.0, colors::canvas::PLACEHOLDER),
        StrokeKind::Inside,
    );
    painter.text(
        rect.center(),
        Align2::CENTER_CENTER,
        "No floor data loaded",
        FontId::proportional(14.0),
        colors::canvas::PLACEHOLDER,
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use eframe::egui::Vec2;

    fn test_config(rotate: f64) -> OverlayConfig {
        OverlayConfig {
            name: "lobby".to_string(),
            image: "lobby".to_string(),
            anchor: Coord {
                x: -79.945_130,
                y: 40.443_420,
            },
            width: 1000.0,
            height: 600.0,
            ppm: 10.0,
            rotate,
            opacity: 1.0,
        }
    }

    fn test_projection() -> MapProjection {
        let mut projection = MapProjection::new(Coord {
            x: -79.945_130,
            y: 40.443_420,
        });
        projection.update(
            1.0,
            Vec2::ZERO,
            Rect::from_min_size(Pos2::ZERO, Vec2::new(800.0, 600.0)),
        );
        projection
    }

    #[test]
    fn test_bounds_centered_on_anchor() {
        let projection = test_projection();
        for rotate in [0.0, 15.0, 90.0, 233.5] {
            let overlay = FloorPlanOverlay::new(test_config(rotate));
            let bounds = overlay.screen_bounds(&projection);
            let anchor_px = projection.geo_to_screen(overlay.config().anchor);

            let center = bounds.rect.center();
            assert!(
                (center.x - anchor_px.x).abs() < 0.5 && (center.y - anchor_px.y).abs() < 0.5,
                "bounds center {:?} drifted from anchor {:?} at rotation {}",
                center,
                anchor_px,
                rotate
            );
        }
    }

    #[test]
    fn test_bounds_aspect_matches_config() {
        let projection = test_projection();
        let overlay = FloorPlanOverlay::new(test_config(0.0));
        let bounds = overlay.screen_bounds(&projection);

        // 1000x600 px at 10 ppm is a 100m x 60m footprint
        let aspect = bounds.rect.width() / bounds.rect.height();
        assert!((aspect - 1000.0 / 600.0).abs() < 0.02);
    }

    #[test]
    fn test_bounds_scale_with_ppm() {
        let projection = test_projection();
        let coarse = FloorPlanOverlay::new(test_config(0.0));

        let mut config = test_config(0.0);
        config.ppm = 20.0; // same pixels, half the physical size
        let fine = FloorPlanOverlay::new(config);

        let w1 = coarse.screen_bounds(&projection).rect.width();
        let w2 = fine.screen_bounds(&projection).rect.width();
        assert!((w1 / w2 - 2.0).abs() < 0.02);
    }

    #[test]
    fn test_rotation_passes_through() {
        let projection = test_projection();
        let overlay = FloorPlanOverlay::new(test_config(42.0));
        assert_eq!(overlay.screen_bounds(&projection).rotate_deg, 42.0);
    }

    #[test]
    fn test_move_by_updates_anchor() {
        let mut overlay = FloorPlanOverlay::new(test_config(0.0));
        let before = overlay.config().anchor;

        let after = overlay.move_by(50.0, 0.0);
        assert_eq!(after, overlay.config().anchor);
        assert!(after.y > before.y);
        assert!((spherical::distance(before, after) - 50.0).abs() < 0.01);
    }

    #[test]
    fn test_factory_builds_floor_plan_overlays() {
        let factory = FloorPlanFactory;
        let mut overlay = factory.create_overlay(test_config(0.0));
        // The trait object is usable without a UI context for detach.
        overlay.on_detach();
    }
}
