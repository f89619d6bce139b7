//! Pointer/wheel state machine.
//!
//! ```text
//! Idle --down on marker--> DraggingMarker --move--> DraggingMarker --up--> Idle (notify)
//! Idle --down elsewhere--> PanningGrid    --move--> PanningGrid    --up--> Idle
//! wheel: any state, never changes the state
//! ```

use compass_overlay_core::TransformState;
use nalgebra::Point2;

use crate::event::InputEvent;
use crate::marker_layer::MarkerLayer;

/// Rotation applied per modified wheel notch, radians.
pub const WHEEL_ROTATE_STEP: f64 = 0.05;
/// Scale factor for a wheel notch away from the user (`delta_y > 0`).
pub const WHEEL_ZOOM_OUT: f64 = 0.9;
/// Scale factor for a wheel notch toward the user (`delta_y < 0`).
pub const WHEEL_ZOOM_IN: f64 = 1.1;

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub enum InteractionState {
    #[default]
    Idle,
    PanningGrid {
        last: Point2<f64>,
    },
    DraggingMarker {
        index: usize,
        last: Point2<f64>,
    },
}

impl InteractionState {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::PanningGrid { .. } => "panning_grid",
            Self::DraggingMarker { .. } => "dragging_marker",
        }
    }
}

/// What a single event did, so the owner knows whether to notify.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Outcome {
    /// A drag just ended; the marker list should be published.
    pub drag_released: bool,
}

#[derive(Clone, Debug, Default)]
pub struct InteractionController {
    state: InteractionState,
}

impl InteractionController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> InteractionState {
        self.state
    }

    /// Index of the marker currently being dragged.
    pub fn active_marker(&self) -> Option<usize> {
        match self.state {
            InteractionState::DraggingMarker { index, .. } => Some(index),
            _ => None,
        }
    }

    /// Apply one event. At most one of transform or markers is mutated.
    pub fn handle(
        &mut self,
        event: &InputEvent,
        transform: &mut TransformState,
        markers: &mut MarkerLayer,
    ) -> Outcome {
        let mut out = Outcome::default();
        let next = match (self.state, *event) {
            (InteractionState::Idle, InputEvent::PointerDown { x, y }) => {
                let p = Point2::new(x, y);
                match markers.hit_test(transform, p) {
                    Some(index) => InteractionState::DraggingMarker { index, last: p },
                    None => InteractionState::PanningGrid { last: p },
                }
            }
            (InteractionState::PanningGrid { last }, InputEvent::PointerMove { x, y }) => {
                let p = Point2::new(x, y);
                let d = p - last;
                transform.translate_by(d.x, d.y);
                InteractionState::PanningGrid { last: p }
            }
            (InteractionState::DraggingMarker { index, .. }, InputEvent::PointerMove { x, y }) => {
                let p = Point2::new(x, y);
                if !markers.relocate(index, transform, p) {
                    log::warn!("drag target {index} no longer exists");
                }
                InteractionState::DraggingMarker { index, last: p }
            }
            (InteractionState::PanningGrid { .. }, InputEvent::PointerUp { .. }) => {
                InteractionState::Idle
            }
            (InteractionState::DraggingMarker { .. }, InputEvent::PointerUp { .. }) => {
                out.drag_released = true;
                InteractionState::Idle
            }
            (s, InputEvent::Wheel { delta_y, modifier }) => {
                apply_wheel(transform, delta_y, modifier);
                s
            }
            // stray down while busy, move/up while idle
            (s, _) => s,
        };
        if next.name() != self.state.name() {
            log::debug!("interaction {} -> {}", self.state.name(), next.name());
        }
        self.state = next;
        out
    }
}

/// `delta_y == 0` and NaN are no-ops.
fn apply_wheel(transform: &mut TransformState, delta_y: f64, modifier: bool) {
    if delta_y == 0.0 || delta_y.is_nan() {
        return;
    }
    let away = delta_y > 0.0;
    if modifier {
        let step = if away {
            WHEEL_ROTATE_STEP
        } else {
            -WHEEL_ROTATE_STEP
        };
        transform.rotate_by(step);
        log::trace!("wheel rotate to {:.4} rad", transform.rotation);
    } else {
        transform.zoom_by(if away { WHEEL_ZOOM_OUT } else { WHEEL_ZOOM_IN });
        log::trace!("wheel zoom to scale {:.4}", transform.scale);
    }
}
