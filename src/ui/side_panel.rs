//! Side panel UI: floor switching and navigation controls.

use eframe::egui::{self, RichText};

use crate::app::ViewerState;
use crate::map::{MapController, MapView};
use crate::model::sample;

use super::colors;

pub fn render_side_panel(
    ctx: &egui::Context,
    controller: &mut MapController<MapView>,
    state: &mut ViewerState,
) {
    egui::SidePanel::left("side_panel")
        .resizable(true)
        .default_width(220.0)
        .min_width(180.0)
        .max_width(320.0)
        .show(ctx, |ui| {
            render_floors_section(ui, controller, state);
            ui.add_space(5.0);

            render_navigation_section(ui, controller, state);
            ui.add_space(5.0);

            render_markers_section(ui, controller, state);
        });
}

fn render_floors_section(
    ui: &mut egui::Ui,
    controller: &mut MapController<MapView>,
    state: &mut ViewerState,
) {
    ui.heading(format!("{} Floors", egui_phosphor::regular::STACK));
    ui.separator();

    let layer_ids: Vec<String> = controller.floors().keys().cloned().collect();
    if layer_ids.is_empty() {
        ui.label(RichText::new("No floor data").color(colors::ui::LABEL));
        return;
    }

    for layer_id in layer_ids {
        let is_active = controller.active_layer() == Some(layer_id.as_str());
        if ui.selectable_label(is_active, &layer_id).clicked() && !is_active {
            controller.switch_to_layer(&layer_id);
            state.status = format!("Switched to {}", layer_id);
        }
    }
}

fn render_navigation_section(
    ui: &mut egui::Ui,
    controller: &mut MapController<MapView>,
    state: &mut ViewerState,
) {
    egui::CollapsingHeader::new(RichText::new("Navigation").strong())
        .default_open(true)
        .show(ui, |ui| {
            let start_label = format!(
                "{} Start demo route",
                egui_phosphor::regular::NAVIGATION_ARROW
            );
            if ui.button(start_label).clicked() {
                // Render the floor the route begins on
                let target = state
                    .demo_path
                    .first()
                    .map(|node| node.layer.clone())
                    .unwrap_or_else(|| sample::GROUND_FLOOR.to_string());
                controller.start_navigation(&state.demo_path, &target);
                state.status = format!("Navigating on {}", target);
            }

            if ui.button("Stop navigation").clicked() {
                controller.stop_navigation();
                state.status = "Navigation stopped".to_string();
            }

            ui.label(
                RichText::new("Lines are drawn per floor; the route resumes after the stairs.")
                    .small()
                    .color(colors::ui::LABEL),
            );
        });
}

fn render_markers_section(
    ui: &mut egui::Ui,
    controller: &mut MapController<MapView>,
    state: &mut ViewerState,
) {
    egui::CollapsingHeader::new(RichText::new("Markers").strong())
        .default_open(true)
        .show(ui, |ui| {
            ui.checkbox(
                &mut state.marking_start,
                format!("{} Click map to set start", egui_phosphor::regular::MAP_PIN),
            );

            if ui
                .button(format!(
                    "{} Target at entrance",
                    egui_phosphor::regular::CROSSHAIR
                ))
                .clicked()
            {
                controller.update_target_marker(Some(sample::BUILDING_CENTER));
                state.status = "Target marker shown".to_string();
            }

            if ui.button("Hide target").clicked() {
                controller.update_target_marker(None);
                state.status = "Target marker hidden".to_string();
            }

            if let Some(node) = controller.start_node() {
                ui.label(
                    RichText::new(format!("Start: {:.5}, {:.5}", node.lat, node.lng))
                        .small()
                        .monospace()
                        .color(colors::ui::VALUE),
                );
            }
        });
}
