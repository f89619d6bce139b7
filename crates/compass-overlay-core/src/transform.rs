use serde::{Deserialize, Serialize};

/// Grid dimension `N`: the grid spans `0..N` per axis in normalized cell space.
pub const GRID_DIM: usize = 3;

/// Smallest scale a mutation may leave behind.
pub const SCALE_EPSILON: f64 = 1e-3;

/// Default grid side length in screen pixels.
pub const DEFAULT_SCALE: f64 = 200.0;

/// Size of the drawing surface in screen pixels.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    pub width: f64,
    pub height: f64,
}

impl Viewport {
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    #[inline]
    pub fn center(&self) -> (f64, f64) {
        (self.width * 0.5, self.height * 0.5)
    }
}

impl Default for Viewport {
    fn default() -> Self {
        Self::new(600.0, 600.0)
    }
}

/// Pan, zoom and rotation of the grid frame.
///
/// `scale` is the grid side length in screen pixels, `rotation` is in
/// radians and unbounded (winding is preserved).
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct TransformState {
    pub translation_x: f64,
    pub translation_y: f64,
    pub scale: f64,
    pub rotation: f64,
}

impl TransformState {
    /// Default state for a viewport: centered, `default_scale`, unrotated.
    pub fn centered(viewport: Viewport, default_scale: f64) -> Self {
        let (cx, cy) = viewport.center();
        Self {
            translation_x: cx,
            translation_y: cy,
            scale: default_scale.max(SCALE_EPSILON),
            rotation: 0.0,
        }
    }

    pub fn translate_by(&mut self, dx: f64, dy: f64) {
        self.translation_x += dx;
        self.translation_y += dy;
    }

    /// Multiply the scale, flooring at [`SCALE_EPSILON`].
    pub fn zoom_by(&mut self, factor: f64) {
        self.set_scale(self.scale * factor);
    }

    /// NaN and anything at or below [`SCALE_EPSILON`] floor to it; overflow
    /// saturates at `f64::MAX`.
    pub fn set_scale(&mut self, scale: f64) {
        self.scale = if scale.is_nan() || scale <= SCALE_EPSILON {
            SCALE_EPSILON
        } else {
            scale.min(f64::MAX)
        };
    }

    pub fn rotate_by(&mut self, radians: f64) {
        self.rotation += radians;
    }

    /// Scale factor from normalized cell units to screen pixels.
    #[inline]
    pub fn cell_size(&self) -> f64 {
        self.scale / GRID_DIM as f64
    }
}

impl Default for TransformState {
    fn default() -> Self {
        Self::centered(Viewport::default(), DEFAULT_SCALE)
    }
}
