#![warn(clippy::all)]

//! FloorNav - an indoor navigation overlay viewer.
//!
//! Renders floor-plan image overlays, navigation route lines, and position
//! markers on a pannable/zoomable map canvas. The crate is a presentation
//! layer: floor data and navigation paths are supplied by the caller, and
//! the [`map::MapController`] turns them into visual primitives on a host
//! [`map::MapSurface`].

pub mod app;
pub mod geo;
pub mod map;
pub mod model;
pub mod overlay;
pub mod ui;
