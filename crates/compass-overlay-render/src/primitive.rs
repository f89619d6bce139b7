use compass_overlay_core::{CellIndex, Viewport};
use nalgebra::Point2;
use serde::{Deserialize, Serialize};

/// 8-bit RGB with a floating alpha in `[0, 1]`.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: f64,
}

impl Rgba {
    pub const fn new(r: u8, g: u8, b: u8, a: f64) -> Self {
        Self { r, g, b, a }
    }

    pub fn with_alpha(self, a: f64) -> Self {
        Self {
            a: a.clamp(0.0, 1.0),
            ..self
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Stroke {
    pub color: Rgba,
    pub width: f64,
}

/// Fillable screen-space geometry.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "shape", rename_all = "snake_case")]
pub enum Shape {
    Polygon {
        points: Vec<Point2<f64>>,
    },
    /// Annular sector. Angles are radians in screen space, measured from
    /// +x toward +y, with `start_angle < end_angle`.
    Wedge {
        center: Point2<f64>,
        inner_radius: f64,
        outer_radius: f64,
        start_angle: f64,
        end_angle: f64,
    },
    Disc {
        center: Point2<f64>,
        radius: f64,
    },
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ArrowRole {
    Facing,
    Reference,
}

/// One drawing instruction in screen space.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Primitive {
    Line {
        from: Point2<f64>,
        to: Point2<f64>,
        stroke: Stroke,
    },
    Circle {
        center: Point2<f64>,
        radius: f64,
        stroke: Stroke,
    },
    Fill {
        #[serde(flatten)]
        shape: Shape,
        color: Rgba,
        /// Canonical heatmap cell this fill represents, if any.
        #[serde(default, skip_serializing_if = "Option::is_none")]
        region: Option<CellIndex>,
    },
    Arrow {
        role: ArrowRole,
        tail: Point2<f64>,
        tip: Point2<f64>,
        /// Direction in degrees, `[0, 360)`, positive sense of `R(θ)`.
        angle_deg: f64,
        stroke: Stroke,
    },
    Label {
        position: Point2<f64>,
        text: String,
        color: Rgba,
        size: f64,
    },
    Image {
        source: String,
        x: f64,
        y: f64,
        width: f64,
        height: f64,
    },
    Placeholder {
        center: Point2<f64>,
        text: String,
    },
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LayerKind {
    Background,
    Heatmap,
    Grid,
    Markers,
    Compass,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Layer {
    pub kind: LayerKind,
    pub primitives: Vec<Primitive>,
}

impl Layer {
    pub fn new(kind: LayerKind, primitives: Vec<Primitive>) -> Self {
        Self { kind, primitives }
    }
}

/// Result of one full render, back to front.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Frame {
    pub viewport: Viewport,
    pub layers: Vec<Layer>,
}

impl Frame {
    pub fn layer(&self, kind: LayerKind) -> Option<&Layer> {
        self.layers.iter().find(|l| l.kind == kind)
    }

    pub fn primitive_count(&self) -> usize {
        self.layers.iter().map(|l| l.primitives.len()).sum()
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}
