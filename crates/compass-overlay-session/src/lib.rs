//! Interactive session for the compass grid overlay.
//!
//! [`OverlayEngine`] is the single owner of mutable state: transform,
//! markers, interaction state, topology and opacity. Hosts feed it
//! [`InputEvent`]s and [`Command`]s, pass fresh [`RenderInputs`] on every
//! render, and subscribe to marker changes through
//! [`MarkersChangedListener`].
//!
//! ```
//! use compass_overlay_session::{InputEvent, OverlayEngine, RenderInputs};
//! use nalgebra::Point2;
//!
//! let mut engine = OverlayEngine::default();
//! engine.add_marker_at("Fire", Point2::new(300.0, 300.0));
//! engine.handle(&InputEvent::wheel(1.0, true));
//! let frame = engine.render(&RenderInputs::default());
//! assert_eq!(frame.layers.len(), 4);
//! ```

mod controller;
mod engine;
mod event;
mod io;
mod marker_layer;

pub use controller::{
    InteractionController, InteractionState, Outcome, WHEEL_ROTATE_STEP, WHEEL_ZOOM_IN,
    WHEEL_ZOOM_OUT,
};
pub use engine::{MarkersChangedListener, OverlayEngine};
pub use event::{Command, InputEvent, ScriptStep};
pub use io::{
    EventScript, HeatmapSource, MarkerPayload, OverlayConfig, OverlayIoError, PayloadError,
    MARKER_PAYLOAD_VERSION,
};
pub use marker_layer::{MarkerLayer, HIT_RADIUS_SQ};

pub use compass_overlay_render::RenderInputs;
