use compass_overlay_core::{GridTopology, Marker, TransformState, Viewport, DEFAULT_SCALE};
use compass_overlay_render::{render_frame, Frame, RenderInputs, RenderStyle, SceneState};
use nalgebra::Point2;

#[cfg(feature = "tracing")]
use tracing::instrument;

use crate::controller::{InteractionController, InteractionState};
use crate::event::{Command, InputEvent, ScriptStep};
use crate::marker_layer::MarkerLayer;

/// Receives the full marker list after every completed add or drag.
pub trait MarkersChangedListener {
    fn markers_changed(&mut self, markers: &[Marker]);
}

impl<F> MarkersChangedListener for F
where
    F: FnMut(&[Marker]),
{
    fn markers_changed(&mut self, markers: &[Marker]) {
        self(markers)
    }
}

/// Explicit session object: owns all mutable overlay state.
///
/// Each [`handle`](Self::handle) or [`apply`](Self::apply) call performs one
/// synchronous mutation; [`render`](Self::render) is pure given the engine
/// state and the inputs passed in.
pub struct OverlayEngine {
    viewport: Viewport,
    default_scale: f64,
    transform: TransformState,
    markers: MarkerLayer,
    controller: InteractionController,
    topology: GridTopology,
    opacity: f64,
    style: RenderStyle,
    listener: Option<Box<dyn MarkersChangedListener>>,
}

impl std::fmt::Debug for OverlayEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OverlayEngine")
            .field("viewport", &self.viewport)
            .field("transform", &self.transform)
            .field("markers", &self.markers.len())
            .field("interaction", &self.controller.state().name())
            .field("topology", &self.topology)
            .field("opacity", &self.opacity)
            .field("listener", &self.listener.is_some())
            .finish()
    }
}

impl Default for OverlayEngine {
    fn default() -> Self {
        Self::new(Viewport::default())
    }
}

impl OverlayEngine {
    pub fn new(viewport: Viewport) -> Self {
        Self::with_default_scale(viewport, DEFAULT_SCALE)
    }

    pub fn with_default_scale(viewport: Viewport, default_scale: f64) -> Self {
        let transform = TransformState::centered(viewport, default_scale);
        Self {
            viewport,
            default_scale: transform.scale,
            transform,
            markers: MarkerLayer::new(),
            controller: InteractionController::new(),
            topology: GridTopology::default(),
            opacity: 1.0,
            style: RenderStyle::default(),
            listener: None,
        }
    }

    pub fn with_style(mut self, style: RenderStyle) -> Self {
        self.style = style;
        self
    }

    /// Seed the marker list without notifying.
    pub fn with_markers(mut self, markers: Vec<Marker>) -> Self {
        self.markers = MarkerLayer::from_markers(markers);
        self
    }

    pub fn set_listener(&mut self, listener: impl MarkersChangedListener + 'static) {
        self.listener = Some(Box::new(listener));
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    pub fn transform(&self) -> &TransformState {
        &self.transform
    }

    pub fn markers(&self) -> &[Marker] {
        self.markers.markers()
    }

    pub fn interaction(&self) -> InteractionState {
        self.controller.state()
    }

    pub fn topology(&self) -> GridTopology {
        self.topology
    }

    pub fn opacity(&self) -> f64 {
        self.opacity
    }

    pub fn style(&self) -> &RenderStyle {
        &self.style
    }

    /// Feed one pointer or wheel event through the state machine.
    pub fn handle(&mut self, event: &InputEvent) {
        let outcome = self
            .controller
            .handle(event, &mut self.transform, &mut self.markers);
        if outcome.drag_released {
            self.notify();
        }
    }

    /// Run one host command.
    pub fn apply(&mut self, command: &Command) {
        match command {
            Command::AddMarker { label } => {
                self.add_marker(label.clone());
            }
            Command::DropMarker { label, x, y } => {
                self.add_marker_at(label.clone(), Point2::new(*x, *y));
            }
            Command::ToggleTopology => self.toggle_topology(),
            Command::SetTopology { topology } => self.set_topology(*topology),
            Command::SetOpacity { opacity } => self.set_opacity(*opacity),
            Command::Reset => self.reset(),
            Command::Resize { viewport } => self.resize(*viewport),
        }
    }

    pub fn apply_step(&mut self, step: &ScriptStep) {
        match step {
            ScriptStep::Input(e) => self.handle(e),
            ScriptStep::Command(c) => self.apply(c),
        }
    }

    /// Full render of the current state.
    #[cfg_attr(feature = "tracing", instrument(level = "debug", skip_all))]
    pub fn render(&self, inputs: &RenderInputs<'_>) -> Frame {
        let scene = SceneState {
            viewport: self.viewport,
            transform: self.transform,
            topology: self.topology,
            opacity: self.opacity,
            markers: self.markers.markers(),
            active_marker: self.controller.active_marker(),
        };
        render_frame(&scene, inputs, &self.style)
    }

    /// One mutation followed by one full render.
    pub fn process(&mut self, event: &InputEvent, inputs: &RenderInputs<'_>) -> Frame {
        self.handle(event);
        self.render(inputs)
    }

    /// Append a marker at the grid center and publish the list.
    pub fn add_marker(&mut self, label: impl Into<String>) -> usize {
        let idx = self.markers.add(label);
        self.notify();
        idx
    }

    /// Append a marker at a drop point and publish the list. Drops outside
    /// the grid square are kept where they land.
    pub fn add_marker_at(&mut self, label: impl Into<String>, screen: Point2<f64>) -> usize {
        let idx = self.markers.add_at_screen_point(label, &self.transform, screen);
        if let Some(m) = self.markers.get(idx).filter(|m| !m.is_inside_grid()) {
            log::info!(
                "marker {:?} dropped outside the grid at ({:.3}, {:.3})",
                m.label,
                m.x,
                m.y
            );
        }
        self.notify();
        idx
    }

    /// Restore the default transform. Markers are kept.
    pub fn reset(&mut self) {
        self.transform = TransformState::centered(self.viewport, self.default_scale);
        log::debug!("transform reset to {:?}", self.transform);
    }

    /// Adopt a new viewport and reset the transform to its center.
    pub fn resize(&mut self, viewport: Viewport) {
        self.viewport = viewport;
        self.reset();
    }

    pub fn toggle_topology(&mut self) {
        self.set_topology(self.topology.toggled());
    }

    pub fn set_topology(&mut self, topology: GridTopology) {
        if topology != self.topology {
            log::debug!("topology {:?} -> {:?}", self.topology, topology);
        }
        self.topology = topology;
    }

    /// Global heatmap alpha multiplier, clamped to `[0, 1]`. Non-finite
    /// values are ignored.
    pub fn set_opacity(&mut self, opacity: f64) {
        if !opacity.is_finite() {
            log::warn!("ignoring non-finite opacity {opacity}");
            return;
        }
        self.opacity = opacity.clamp(0.0, 1.0);
    }

    fn notify(&mut self) {
        let markers = self.markers.markers();
        log::debug!("markers changed ({} total)", markers.len());
        if let Some(listener) = self.listener.as_mut() {
            listener.markers_changed(markers);
        }
    }
}
