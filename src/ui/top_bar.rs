//! Top bar UI: app title, active floor, and status.

use crate::app::ViewerState;
use eframe::egui::{self, Color32, RichText};

use super::colors;

pub fn render_top_bar(ctx: &egui::Context, state: &ViewerState, active_layer: Option<&str>) {
    egui::TopBottomPanel::top("top_bar")
        .exact_height(36.0)
        .show(ctx, |ui| {
            ui.horizontal_centered(|ui| {
                // App title
                ui.label(
                    RichText::new("FloorNav")
                        .strong()
                        .size(16.0)
                        .color(Color32::WHITE),
                );

                ui.separator();

                ui.label(RichText::new("Floor:").size(12.0).color(colors::ui::LABEL));
                ui.label(
                    RichText::new(active_layer.unwrap_or("--"))
                        .size(13.0)
                        .monospace()
                        .color(colors::ui::ACTIVE),
                );

                ui.separator();

                // Status text
                ui.label(
                    RichText::new(&state.status)
                        .size(13.0)
                        .color(colors::ui::VALUE),
                );
            });
        });
}
