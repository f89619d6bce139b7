use compass_overlay_core::{GridTopology, Viewport};
use nalgebra::Point2;
use serde::{Deserialize, Serialize};

/// Pointer and wheel input in screen pixels.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum InputEvent {
    PointerDown { x: f64, y: f64 },
    PointerMove { x: f64, y: f64 },
    PointerUp { x: f64, y: f64 },
    /// `modifier` is true while the rotate modifier key is held.
    Wheel {
        delta_y: f64,
        #[serde(default)]
        modifier: bool,
    },
}

impl InputEvent {
    pub fn pointer_down(x: f64, y: f64) -> Self {
        Self::PointerDown { x, y }
    }

    pub fn pointer_move(x: f64, y: f64) -> Self {
        Self::PointerMove { x, y }
    }

    pub fn pointer_up(x: f64, y: f64) -> Self {
        Self::PointerUp { x, y }
    }

    pub fn wheel(delta_y: f64, modifier: bool) -> Self {
        Self::Wheel { delta_y, modifier }
    }

    pub fn position(&self) -> Option<Point2<f64>> {
        match *self {
            Self::PointerDown { x, y } | Self::PointerMove { x, y } | Self::PointerUp { x, y } => {
                Some(Point2::new(x, y))
            }
            Self::Wheel { .. } => None,
        }
    }
}

/// Explicit commands issued by the host, outside the pointer state machine.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "command", rename_all = "snake_case")]
pub enum Command {
    AddMarker { label: String },
    /// Drag-and-drop placement at a screen point.
    DropMarker { label: String, x: f64, y: f64 },
    ToggleTopology,
    SetTopology { topology: GridTopology },
    SetOpacity { opacity: f64 },
    Reset,
    Resize { viewport: Viewport },
}

/// One step of a replayable event script.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ScriptStep {
    Input(InputEvent),
    Command(Command),
}

impl From<InputEvent> for ScriptStep {
    fn from(e: InputEvent) -> Self {
        Self::Input(e)
    }
}

impl From<Command> for ScriptStep {
    fn from(c: Command) -> Self {
        Self::Command(c)
    }
}
