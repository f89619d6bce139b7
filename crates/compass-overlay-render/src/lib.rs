//! Layered rendering for the compass grid overlay.
//!
//! Every layer turns the current [`TransformState`] plus read-only inputs
//! into screen-space [`Primitive`]s. Nothing here mutates state, so
//! [`render_frame`] is a pure function of its arguments and two calls with
//! the same arguments produce equal frames.
//!
//! ```
//! use compass_overlay_core::{GridTopology, HeatmapDataset, TransformState, Viewport};
//! use compass_overlay_render::{render_frame, LayerKind, RenderInputs, RenderStyle, SceneState};
//!
//! let viewport = Viewport::default();
//! let scene = SceneState {
//!     viewport,
//!     transform: TransformState::default(),
//!     topology: GridTopology::Radial,
//!     opacity: 1.0,
//!     markers: &[],
//!     active_marker: None,
//! };
//! let data = HeatmapDataset::from_matrix([[0.0, 1.0, 0.0], [0.0, 0.5, 0.0], [0.0, 0.0, 0.0]])
//!     .expect("valid matrix");
//! let inputs = RenderInputs {
//!     facing_angle_deg: 180.0,
//!     heatmap: Some(&data),
//!     background: None,
//! };
//! let frame = render_frame(&scene, &inputs, &RenderStyle::default());
//! assert_eq!(frame.layer(LayerKind::Heatmap).map(|l| l.primitives.len()), Some(2));
//! ```

mod background;
mod compass;
mod grid;
mod heatmap;
mod markers;
mod primitive;
mod style;
mod svg;

pub use background::{BackgroundImage, BackgroundLayer};
pub use compass::{CompassArrows, CompassIndicator};
pub use grid::{GridRenderer, FIRST_SPOKE_ANGLE, SPOKE_COUNT};
pub use heatmap::{HeatmapOverlay, Sector, SECTOR_TABLE};
pub use markers::MarkerRenderer;
pub use primitive::{ArrowRole, Frame, Layer, LayerKind, Primitive, Rgba, Shape, Stroke};
pub use style::{HeatmapParams, RenderStyle};

use compass_overlay_core::{GridTopology, HeatmapDataset, Marker, TransformState, Viewport};

#[cfg(feature = "tracing")]
use tracing::instrument;

/// Values owned by external collaborators, sampled fresh on every render.
#[derive(Clone, Copy, Debug)]
pub struct RenderInputs<'a> {
    pub facing_angle_deg: f64,
    pub heatmap: Option<&'a HeatmapDataset>,
    pub background: Option<&'a BackgroundImage>,
}

impl Default for RenderInputs<'_> {
    fn default() -> Self {
        Self {
            facing_angle_deg: 180.0,
            heatmap: None,
            background: None,
        }
    }
}

/// Borrowed snapshot of the engine state a frame depends on.
#[derive(Clone, Copy, Debug)]
pub struct SceneState<'a> {
    pub viewport: Viewport,
    pub transform: TransformState,
    pub topology: GridTopology,
    /// Global heatmap alpha multiplier in `[0, 1]`.
    pub opacity: f64,
    pub markers: &'a [Marker],
    pub active_marker: Option<usize>,
}

/// Render all layers back to front.
///
/// The heatmap layer is omitted entirely when `inputs.heatmap` is `None`;
/// every other layer is always present.
#[cfg_attr(
    feature = "tracing",
    instrument(level = "debug", skip_all, fields(topology = ?scene.topology))
)]
pub fn render_frame(scene: &SceneState<'_>, inputs: &RenderInputs<'_>, style: &RenderStyle) -> Frame {
    let state = &scene.transform;
    let mut layers = Vec::with_capacity(5);

    let background = BackgroundLayer {
        placeholder_text: style.placeholder_text.clone(),
    };
    layers.push(Layer::new(
        LayerKind::Background,
        background.render(scene.viewport, inputs.background),
    ));

    if let Some(data) = inputs.heatmap {
        let overlay = HeatmapOverlay::new(style.heatmap);
        layers.push(Layer::new(
            LayerKind::Heatmap,
            overlay.render(
                state,
                scene.topology,
                data,
                inputs.facing_angle_deg,
                scene.opacity,
            ),
        ));
    }

    layers.push(Layer::new(
        LayerKind::Grid,
        GridRenderer::new(style.grid_stroke).render(state, scene.topology),
    ));

    let markers = MarkerRenderer {
        color: style.marker_color,
        active_color: style.active_marker_color,
        radius: style.marker_radius,
        label_color: style.label_color,
        label_size: style.label_size,
    };
    layers.push(Layer::new(
        LayerKind::Markers,
        markers.render(state, scene.markers, scene.active_marker),
    ));

    let compass = CompassIndicator {
        facing_stroke: style.facing_stroke,
        reference_stroke: style.reference_stroke,
        length_frac: style.arrow_length_frac,
    };
    layers.push(Layer::new(
        LayerKind::Compass,
        compass.render(state, inputs.facing_angle_deg),
    ));

    let frame = Frame {
        viewport: scene.viewport,
        layers,
    };
    log::trace!(
        "rendered {} layers, {} primitives",
        frame.layers.len(),
        frame.primitive_count()
    );
    frame
}
