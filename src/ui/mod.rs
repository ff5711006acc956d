//! UI modules for the FloorNav application.
//!
//! The UI is split into distinct panels:
//! - Top bar: title, active floor, and status
//! - Side panel: floor switching and navigation controls
//! - Central canvas: the map view itself (see `map::MapView`)

pub mod colors;
mod side_panel;
mod top_bar;

pub use side_panel::render_side_panel;
pub use top_bar::render_top_bar;
