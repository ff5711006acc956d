//! Map rendering: host surface, egui view, and the controller.

mod controller;
mod surface;
mod view;

pub use controller::MapController;
pub use surface::{MapSurface, MarkerId, MarkerStyle, OverlayId, PolylineId, PolylineStyle};
pub use view::MapView;
