//! Generated sample building data for the demo application.
//!
//! Two floors of a campus building with plan regions, corridor nodes, and
//! a demo route that crosses the floor boundary. Plan images are generated
//! procedurally so the demo needs no bundled assets.

use eframe::egui::ColorImage;
use geo_types::Coord;

use super::{Floors, Layer, Node, Region};
use crate::geo::spherical;
use crate::overlay::ImageStore;

/// Anchor point of the sample building.
pub const BUILDING_CENTER: Coord<f64> = Coord {
    x: -79.945_130,
    y: 40.443_420,
};

/// Layer id of the sample ground floor.
pub const GROUND_FLOOR: &str = "floor-1";

/// Plan image dimensions in pixels.
const PLAN_WIDTH: usize = 800;
const PLAN_HEIGHT: usize = 500;

/// Pixels per meter of the generated plans (an 80m x 50m footprint).
const PLAN_PPM: f64 = 10.0;

/// Builds the two-floor sample building.
pub fn sample_floors() -> Floors {
    let mut floors = Floors::new();
    floors.insert(
        GROUND_FLOOR.to_string(),
        sample_floor(GROUND_FLOOR, "plan-1", 12.0),
    );
    floors.insert("floor-2".to_string(), sample_floor("floor-2", "plan-2", 12.0));
    floors
}

fn sample_floor(layer_id: &str, image: &str, rotate: f64) -> Layer {
    let mut layer = Layer::default();

    layer.regions.insert(
        format!("{}-plan", layer_id),
        Region {
            image: image.to_string(),
            lat: BUILDING_CENTER.y,
            lng: BUILDING_CENTER.x,
            ppm: PLAN_PPM,
            rotate,
            width: PLAN_WIDTH as f64,
            height: PLAN_HEIGHT as f64,
            opacity: 0.85,
        },
    );

    // Corridor nodes spaced 15m apart along the long axis
    for (i, along) in [-22.5_f64, -7.5, 7.5, 22.5].iter().enumerate() {
        let position = spherical::offset(BUILDING_CENTER, along.abs(), bearing_along(*along));
        layer.nodes.insert(
            format!("n{}", i + 1),
            Node::new(position.y, position.x, layer_id),
        );
    }

    layer
}

fn bearing_along(along: f64) -> f64 {
    if along >= 0.0 {
        90.0
    } else {
        270.0
    }
}

/// A demo route: along the ground-floor corridor, then (after the implied
/// stair transition) across the second floor.
pub fn sample_path() -> Vec<Node> {
    let mut path = Vec::new();

    let floors = sample_floors();
    for layer_id in [GROUND_FLOOR, "floor-2"] {
        let layer = &floors[layer_id];
        path.extend(layer.nodes.values().cloned());
    }

    path
}

/// Generates and installs the plan images the sample regions reference.
pub fn install_plan_images(store: &mut ImageStore) {
    store.insert("plan-1", generate_plan_image([235, 231, 221], [142, 130, 111]));
    store.insert("plan-2", generate_plan_image([222, 231, 235], [111, 130, 142]));
}

/// Generates a simple floor-plan pattern: outer walls, room dividers, and
/// a corridor band across the middle.
fn generate_plan_image(floor_rgb: [u8; 3], wall_rgb: [u8; 3]) -> ColorImage {
    let mut pixels = vec![0u8; PLAN_WIDTH * PLAN_HEIGHT * 4];

    let wall = 6; // wall thickness in pixels
    let corridor_top = PLAN_HEIGHT / 2 - 30;
    let corridor_bottom = PLAN_HEIGHT / 2 + 30;
    let room_span = PLAN_WIDTH / 5;

    for y in 0..PLAN_HEIGHT {
        for x in 0..PLAN_WIDTH {
            let on_outer_wall =
                x < wall || x >= PLAN_WIDTH - wall || y < wall || y >= PLAN_HEIGHT - wall;

            let in_corridor = y >= corridor_top && y < corridor_bottom;
            let on_corridor_wall = !in_corridor
                && (y.abs_diff(corridor_top) < wall || y.abs_diff(corridor_bottom) < wall);

            // Room divider walls above and below the corridor
            let on_divider = !in_corridor && x % room_span < wall;

            let rgb = if on_outer_wall || on_corridor_wall || on_divider {
                wall_rgb
            } else {
                floor_rgb
            };

            let idx = (y * PLAN_WIDTH + x) * 4;
            pixels[idx] = rgb[0];
            pixels[idx + 1] = rgb[1];
            pixels[idx + 2] = rgb[2];
            pixels[idx + 3] = 255;
        }
    }

    ColorImage::from_rgba_unmultiplied([PLAN_WIDTH, PLAN_HEIGHT], &pixels)
}
