//! The FloorNav demo application shell.

use eframe::egui;

use crate::map::{MapController, MapView};
use crate::model::{sample, Node};
use crate::overlay::FloorPlanFactory;
use crate::ui;

/// UI-facing state outside the controller: status line, interaction
/// toggles, and the demo route.
pub struct ViewerState {
    /// Status message displayed in the top bar
    pub status: String,
    /// When set, the next map click marks the navigation start point
    pub marking_start: bool,
    /// The demo route fed to `start_navigation`
    pub demo_path: Vec<Node>,
}

/// Main application state and logic.
pub struct ViewerApp {
    controller: MapController<MapView>,
    state: ViewerState,
}

impl ViewerApp {
    /// Creates a new ViewerApp instance with the sample building loaded.
    pub fn new(cc: &eframe::CreationContext<'_>) -> Self {
        let mut fonts = egui::FontDefinitions::default();
        egui_phosphor::add_to_fonts(&mut fonts, egui_phosphor::Variant::Regular);
        cc.egui_ctx.set_fonts(fonts);

        let mut view = MapView::new(sample::BUILDING_CENTER);
        sample::install_plan_images(view.images_mut());

        let mut controller = MapController::new(view, Box::new(FloorPlanFactory));
        controller.set_floors(sample::sample_floors());
        controller.switch_to_layer(sample::GROUND_FLOOR);

        log::info!(
            "Loaded sample building: {} floor(s)",
            controller.floors().len()
        );

        Self {
            controller,
            state: ViewerState {
                status: "Ready".to_string(),
                marking_start: false,
                demo_path: sample::sample_path(),
            },
        }
    }

    fn handle_map_click(&mut self, response: &egui::Response) {
        if !self.state.marking_start || !response.clicked() {
            return;
        }
        let Some(pos) = response.interact_pointer_pos() else {
            return;
        };

        let geo = self.controller.surface().projection().screen_to_geo(pos);
        self.controller.set_start_node(geo.y, geo.x);
        self.state.marking_start = false;
        self.state.status = format!("Start point set at {:.5}, {:.5}", geo.y, geo.x);
    }
}

impl eframe::App for ViewerApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // Side and top panels must be rendered before the central canvas
        ui::render_top_bar(ctx, &self.state, self.controller.active_layer());
        ui::render_side_panel(ctx, &mut self.controller, &mut self.state);

        egui::CentralPanel::default().show(ctx, |ui| {
            let response = self.controller.surface_mut().show(ui);
            self.handle_map_click(&response);
        });
    }
}
