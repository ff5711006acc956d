//! Centralized color constants for the UI.
//!
//! This module provides consistent colors across the canvas and panels.

use eframe::egui::Color32;

/// General UI colors for labels and values.
pub mod ui {
    use super::Color32;

    /// Muted gray for labels.
    pub const LABEL: Color32 = Color32::from_rgb(100, 100, 100);
    /// Slightly brighter for values.
    pub const VALUE: Color32 = Color32::from_rgb(160, 160, 160);
    /// Emphasized color for the active floor.
    pub const ACTIVE: Color32 = Color32::from_rgb(100, 180, 255);
}

/// Colors for navigation rendering.
pub mod nav {
    use super::Color32;

    /// Route line teal (#00B4B4).
    pub const ROUTE: Color32 = Color32::from_rgb(0, 180, 180);
    /// Current-position marker fill.
    pub const POSITION: Color32 = Color32::from_rgb(66, 133, 244);
    /// Current-position marker outline.
    pub const POSITION_RING: Color32 = Color32::from_rgb(235, 242, 255);
    /// Secondary indicator marker fill.
    pub const TARGET: Color32 = Color32::from_rgb(219, 68, 55);
    /// Secondary indicator marker outline.
    pub const TARGET_RING: Color32 = Color32::from_rgb(255, 238, 236);
}

/// Colors for the map canvas.
pub mod canvas {
    use super::Color32;

    /// Background behind the floor plans.
    pub const BACKGROUND: Color32 = Color32::from_rgb(24, 26, 32);
    /// Outlines and hints drawn where imagery is missing.
    pub const PLACEHOLDER: Color32 = Color32::from_rgb(110, 116, 130);
}
