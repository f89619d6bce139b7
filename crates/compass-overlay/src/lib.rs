//! High-level facade crate for the `compass-overlay-*` workspace.
//!
//! This crate provides:
//! - stable re-exports of the core, render and session crates
//! - [`run`] helpers that build a session from a JSON config, replay an
//!   event script and render the final frame
//! - (feature `image`) background probing via the `image` crate
//! - (feature `cli`) the `compass-overlay` binary
//!
//! ## Quickstart
//!
//! ```
//! use compass_overlay::{HeatmapDataset, InputEvent, OverlayEngine, RenderInputs};
//! use compass_overlay::Point2;
//!
//! let mut engine = OverlayEngine::default();
//! engine.add_marker_at("Fire", Point2::new(300.0, 300.0));
//! engine.handle(&InputEvent::wheel(1.0, true));
//!
//! let heatmap = HeatmapDataset::from_rows(&[
//!     vec![0.0, 0.9, 0.0],
//!     vec![0.2, 0.5, 0.0],
//!     vec![0.0, 0.0, 0.3],
//! ])
//! .expect("3x3 non-negative");
//! let frame = engine.render(&RenderInputs {
//!     facing_angle_deg: 90.0,
//!     heatmap: Some(&heatmap),
//!     background: None,
//! });
//! println!("{}", frame.to_svg());
//! ```
//!
//! ## API map
//! - `compass_overlay::core`: transform state, coordinate mapping, datasets, markers.
//! - `compass_overlay::render`: layers, primitives, frames and SVG export.
//! - `compass_overlay::session`: interaction state machine and the session engine.
//! - `compass_overlay::run`: config + script in, frame + marker payload out.
//! - `compass_overlay::probe` (feature `image`): background image dimensions.

pub use compass_overlay_core as core;
pub use compass_overlay_render as render;
pub use compass_overlay_session as session;

pub use compass_overlay_core::{
    CoordinateMapper, Direction, GridTopology, HeatmapDataset, Marker, TransformState, Viewport,
};
pub use compass_overlay_render::{BackgroundImage, Frame, LayerKind, Primitive, RenderInputs};
pub use compass_overlay_session::{
    Command, EventScript, InputEvent, MarkerPayload, MarkersChangedListener, OverlayConfig,
    OverlayEngine,
};
pub use nalgebra::Point2;

pub mod run;

#[cfg(feature = "image")]
pub mod probe;
