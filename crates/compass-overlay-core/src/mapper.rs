//! Forward and inverse maps between the three coordinate frames.
//!
//! - Normalized cell space: the grid spans `0..N` per axis.
//! - Grid-local space: pixels, centered on the grid origin, unrotated.
//! - Screen space: grid-local rotated by `rotation` and translated.
//!
//! The mapper borrows the current [`TransformState`]; it never caches a
//! derived inverse, so every query sees the latest pan/zoom/rotation.

use nalgebra::{Point2, Vector2};

use crate::affine::Affine2;
use crate::transform::{TransformState, GRID_DIM};

#[derive(Clone, Copy, Debug)]
pub struct CoordinateMapper<'a> {
    state: &'a TransformState,
}

impl<'a> CoordinateMapper<'a> {
    pub fn new(state: &'a TransformState) -> Self {
        Self { state }
    }

    pub fn state(&self) -> &TransformState {
        self.state
    }

    /// Normalized cell space -> screen space.
    pub fn forward_point(&self, cell: Point2<f64>) -> Point2<f64> {
        self.local_to_screen(self.cell_to_local(cell))
    }

    /// Screen space -> normalized cell space. Exact inverse of [`Self::forward_point`].
    pub fn inverse_point(&self, screen: Point2<f64>) -> Point2<f64> {
        self.local_to_cell(self.screen_to_local(screen))
    }

    pub fn cell_to_local(&self, cell: Point2<f64>) -> Point2<f64> {
        let half = GRID_DIM as f64 * 0.5;
        let k = self.state.cell_size();
        Point2::new((cell.x - half) * k, (cell.y - half) * k)
    }

    pub fn local_to_cell(&self, local: Point2<f64>) -> Point2<f64> {
        let half = GRID_DIM as f64 * 0.5;
        let k = self.state.cell_size();
        Point2::new(local.x / k + half, local.y / k + half)
    }

    pub fn local_to_screen(&self, local: Point2<f64>) -> Point2<f64> {
        let (s, c) = self.state.rotation.sin_cos();
        Point2::new(
            c * local.x - s * local.y + self.state.translation_x,
            s * local.x + c * local.y + self.state.translation_y,
        )
    }

    pub fn screen_to_local(&self, screen: Point2<f64>) -> Point2<f64> {
        let dx = screen.x - self.state.translation_x;
        let dy = screen.y - self.state.translation_y;
        // R(-θ)
        let (s, c) = self.state.rotation.sin_cos();
        Point2::new(c * dx + s * dy, -s * dx + c * dy)
    }

    /// Rotate a grid-local direction into screen space (no translation).
    pub fn local_vector_to_screen(&self, v: Vector2<f64>) -> Vector2<f64> {
        let (s, c) = self.state.rotation.sin_cos();
        Vector2::new(c * v.x - s * v.y, s * v.x + c * v.y)
    }

    /// Grid-local -> screen as a matrix: rotation, then translation.
    pub fn local_to_screen_affine(&self) -> Affine2 {
        Affine2::rotation(self.state.rotation).then(&Affine2::translation(
            self.state.translation_x,
            self.state.translation_y,
        ))
    }

    /// Canonical heatmap space -> screen.
    ///
    /// The facing rotation is applied first, around the grid-local origin,
    /// and the manual grid rotation after it. Callers must not reorder.
    pub fn canonical_to_screen_affine(&self, facing: FacingRotation) -> Affine2 {
        facing
            .canonical_to_local()
            .then(&self.local_to_screen_affine())
    }
}

/// Orientation correction from canonical data space into grid-local space.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FacingRotation {
    degrees: f64,
}

impl FacingRotation {
    pub fn from_degrees(degrees: f64) -> Self {
        Self { degrees }
    }

    pub fn degrees(&self) -> f64 {
        self.degrees
    }

    pub fn radians(&self) -> f64 {
        self.degrees.to_radians()
    }

    /// Canonical data space -> facing-rotated space. Grid-local space shares
    /// the same origin and radius, so this is also canonical -> grid-local.
    pub fn canonical_to_local(&self) -> Affine2 {
        Affine2::rotation(self.radians())
    }
}
